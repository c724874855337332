//! Command-line interface

use anyhow::Context;
use blastgate_core::{load_config, Config, OutputMode};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blastgate",
    version,
    about = "HTTP gateway for BLAST+ nucleotide and protein searches",
    long_about = "Blastgate serves POST /blastn and POST /blastp. Each request is validated, \
                  its FASTA query is normalized, the requested databases are checked, and \
                  BLAST+ is run with a wall-clock limit. The HTML report is returned as-is."
)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "BLASTGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding the BLAST databases
    #[arg(long)]
    pub database_dir: Option<PathBuf>,

    /// Directory holding the blastn/blastp executables (default: PATH)
    #[arg(long)]
    pub tools_dir: Option<PathBuf>,

    /// Search timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// How BLAST hands back its report
    #[arg(long, value_enum)]
    pub output: Option<OutputMode>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the selected verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Configuration file settings with command-line overrides applied
    pub fn effective_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.database_dir {
            config.database.database_dir = dir.clone();
        }
        if let Some(dir) = &self.tools_dir {
            config.search.tools_dir = Some(dir.clone());
        }
        if let Some(timeout) = self.timeout {
            config.search.timeout_secs = timeout;
        }
        if let Some(output) = self.output {
            config.search.output = output;
        }

        config.validate()?;
        Ok(config)
    }
}
