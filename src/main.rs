use blastgate::cli::Cli;
use blastgate::BlastgateError;
use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then BLASTGATE_LOG, then the -v level
    let log_level = std::env::var("BLASTGATE_LOG").unwrap_or_else(|_| cli.log_level().to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<BlastgateError>() {
            Some(BlastgateError::Configuration(_)) | Some(BlastgateError::Serialization(_)) => 2,
            Some(BlastgateError::Io(_)) => 3,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::debug!(
        "Environment path defaults:\n{}",
        blastgate_core::system::describe_paths()
    );
    let config = cli.effective_config()?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    tracing::info!(
        "blastgate {} starting (databases: {}, timeout: {}s)",
        blastgate_core::VERSION,
        config.database.database_dir.display(),
        config.search.timeout_secs
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(blastgate::serve(config))?;
    Ok(())
}
