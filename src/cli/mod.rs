//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// retequiv - Filter trivially equivalent return-value mutants before testing.
#[derive(Parser)]
#[command(name = "retequiv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to search for retequiv.toml
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short = 'j', long, global = true)]
    pub jobs: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Remove equivalent mutants from unit files
    #[command(alias = "f")]
    Filter(FilterArgs),

    /// List filter features and whether they are enabled
    Features,

    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct FilterArgs {
    /// Unit files (JSON: a class and its mutation candidates)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also list the candidates that were kept
    #[arg(long)]
    pub show_kept: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the commented default configuration instead
    #[arg(long)]
    pub default: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

impl From<OutputFormat> for crate::output::Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Markdown => Self::Markdown,
            OutputFormat::Text => Self::Text,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
