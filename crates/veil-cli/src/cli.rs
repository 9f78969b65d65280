use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;
use veil_config::{ExtractorKind, OutputFormat};

#[derive(Parser)]
#[command(name = "veil")]
#[command(about = "Consistent pseudonymization of healthcare and legal documents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the global one
    #[arg(long, global = true, env = "VEIL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace sensitive values and print the replacement log
    Transform(TransformArgs),

    /// List detected sensitive values without replacing them
    Detect {
        /// Source URIs (file:path, bare path, text:content, glob:pattern, -)
        #[arg(required = true)]
        sources: Vec<String>,

        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Detection strategy (regex, llm, hybrid)
        #[arg(long)]
        extractor: Option<ExtractorKind>,
    },

    /// Start the HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// Detection strategy (regex, llm, hybrid)
        #[arg(long)]
        extractor: Option<ExtractorKind>,
    },

    /// Inspect or initialize configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct TransformArgs {
    /// Source URIs (file:path, bare path, text:content, glob:pattern, -)
    #[arg(required = true)]
    pub sources: Vec<String>,

    /// Write the result to this file instead of stdout
    #[arg(long, short, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Write one result per document into this directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Write the replacement log here instead of after the document
    #[arg(long)]
    pub log: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Fixed seed (default: derived from each document's content)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Detection strategy (regex, llm, hybrid)
    #[arg(long)]
    pub extractor: Option<ExtractorKind>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the global config file path
    Path,

    /// Write a starter veil.toml in the current directory
    Init {
        /// Overwrite an existing veil.toml
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}
