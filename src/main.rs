use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use mdtexfix::{
    ConvertOptions, convert_all,
    convert::DEFAULT_PATTERN,
    fetch_templates,
    pandoc::{DEFAULT_PANDOC, pandoc_version},
    template::TEMPLATE_REPO,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Convert Markdown documentation to LaTeX")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a directory of Markdown files to LaTeX
    MarkdownToLatex(ConvertArgs),
    /// Copy the LaTeX style files from the template repository
    GetTexTemplate {
        /// Directory receiving the style files
        #[arg(long = "output-dir")]
        output_dir: PathBuf,
        /// Repository to clone
        #[arg(long, default_value = TEMPLATE_REPO)]
        repo: String,
    },
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Input directory with Markdown files
    #[arg(short, long)]
    input: PathBuf,
    /// Output directory for LaTeX files
    #[arg(long)]
    output: PathBuf,
    /// Custom pandoc LaTeX template
    #[arg(long)]
    template: Option<PathBuf>,
    /// Generate standalone LaTeX documents instead of fragments
    #[arg(long)]
    standalone: bool,
    /// Glob pattern for matching files
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,
    /// Pandoc executable
    #[arg(long, env = "MDTEXFIX_PANDOC", default_value = DEFAULT_PANDOC)]
    pandoc: PathBuf,
}

fn markdown_to_latex(args: ConvertArgs) -> anyhow::Result<()> {
    match pandoc_version(&args.pandoc) {
        Ok(version) => info!("Found Pandoc: {version}"),
        Err(err) => {
            error!("{err}");
            bail!(
                "pandoc is not installed or not in PATH; see https://pandoc.org/installing.html"
            );
        }
    }

    if !args.input.exists() {
        bail!("input directory not found: {}", args.input.display());
    }
    if !args.input.is_dir() {
        bail!("input path is not a directory: {}", args.input.display());
    }
    if let Some(template) = &args.template
        && !template.exists()
    {
        bail!("template file not found: {}", template.display());
    }

    info!("Input:  {}", args.input.display());
    info!("Output: {}", args.output.display());
    if let Some(template) = &args.template {
        info!("Template: {}", template.display());
    }

    let opts = ConvertOptions {
        pandoc: args.pandoc,
        template: args.template,
        standalone: args.standalone,
        pattern: args.pattern,
    };
    let summary = convert_all(&args.input, &args.output, &opts)
        .with_context(|| format!("converting files in {}", args.input.display()))?;

    info!(
        "Conversion complete: {}/{} files converted successfully",
        summary.converted, summary.total
    );
    if !summary.all_converted() {
        for (file, message) in &summary.failures {
            warn!("{file}: {message}");
        }
        bail!("{} file(s) failed to convert", summary.total - summary.converted);
    }
    Ok(())
}

/// Entry point for the `mdtexfix` command-line tool.
///
/// # Examples
///
/// ```sh
/// # Convert all Markdown files in a directory to LaTeX fragments
/// mdtexfix markdown-to-latex --input docs/mkdocs --output docs/latex
///
/// # Generate standalone documents
/// mdtexfix markdown-to-latex -i docs/mkdocs --output docs/latex --standalone
///
/// # Fetch the LaTeX style files
/// mdtexfix get-tex-template --output-dir ./templates
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();

    match cli.command {
        Commands::MarkdownToLatex(args) => markdown_to_latex(args),
        Commands::GetTexTemplate { output_dir, repo } => {
            fetch_templates(&repo, &output_dir)?;
            Ok(())
        }
    }
}
