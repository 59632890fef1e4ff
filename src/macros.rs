//! Helper macros used across the crate.

/// Lazily compile a [`Regex`] with a custom panic message.
///
/// The caller must have `std::sync::LazyLock` and `regex::Regex` in scope.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static RE: LazyLock<Regex> = mdtexfix::lazy_regex!(r"\\real\{(0\.\d+)\}", "real fraction");
/// assert!(RE.is_match(r"\real{0.25}"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        LazyLock::new(|| Regex::new($pattern).expect($msg))
    };
}
