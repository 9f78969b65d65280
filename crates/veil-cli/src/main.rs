mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use veil_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries documents
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let explicit = cli.config.as_deref();

    match cli.command {
        cli::Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut cli::Cli::command(), "veil", &mut std::io::stdout());
            Ok(())
        }
        cli::Commands::Config(cmd) => commands::config::handle(cmd, explicit),
        cli::Commands::Transform(args) => {
            let config = Config::effective(explicit)?;
            commands::transform::handle(args, config).await
        }
        cli::Commands::Detect {
            sources,
            format,
            extractor,
        } => {
            let config = Config::effective(explicit)?;
            commands::detect::handle(sources, format, extractor, config).await
        }
        cli::Commands::Serve {
            host,
            port,
            extractor,
        } => {
            let config = Config::effective(explicit)?;
            commands::serve::handle(config, host, port, extractor).await
        }
    }
}
