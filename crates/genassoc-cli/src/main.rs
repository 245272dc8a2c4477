//! CLI entry point - the composition root.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use genassoc_cli::{Cli, CliConfig, CliError, bootstrap, handlers};

async fn run(cli: Cli) -> Result<(), CliError> {
    let pretty = cli.pretty;
    let config = CliConfig::from_cli(&cli)?;
    let ctx = bootstrap(config)?;

    let value = handlers::execute(&ctx, cli.command).await?;
    println!("{}", handlers::render(&value, pretty)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("Error: {err}");
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Ok(ExitCode::from(err.exit_code() as u8))
        }
    }
}
