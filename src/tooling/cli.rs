//! CLI Tooling
//!
//! Command-line interface for fleet inventory reporting. Commands resolve
//! their configuration once at startup and return the full text to print;
//! the binary owns process concerns (printing, exit codes).

use crate::config::{ConfigLoader, FleetConfig};
use crate::directory::DirectoryClient;
use crate::error::ReportError;
use crate::fdb::FdbInspector;
use crate::format::{format_directory_failure_text, format_fleet_report_text};
use crate::scan::FleetScanner;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// fdbscan CLI - fleet inventory reporting
#[derive(Parser)]
#[command(name = "fdbscan")]
#[command(about = "Best-effort inventory reporting over a fleet of file-database nodes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one inventory pass over the fleet and print the report
    Report {
        /// Directory endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Port every node's document store listens on
        #[arg(long)]
        port: Option<u16>,

        /// Per-node connection timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Database holding the record collection
        #[arg(long)]
        database: Option<String>,

        /// Collection to scan
        #[arg(long)]
        collection: Option<String>,
    },
    /// Show the effective configuration
    Config,
}

/// CLI context holding the resolved configuration.
#[derive(Debug)]
pub struct CliContext {
    config: FleetConfig,
}

impl CliContext {
    /// Create a new CLI context, loading configuration and applying the
    /// global logging flags on top.
    pub fn new(
        config_path: Option<PathBuf>,
        log_level: Option<String>,
        log_format: Option<String>,
    ) -> Result<Self, ReportError> {
        let mut config = if let Some(path) = &config_path {
            ConfigLoader::load_from_file(path).map_err(|e| {
                ReportError::Config(format!(
                    "Failed to load config from {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            ConfigLoader::load()
                .map_err(|e| ReportError::Config(format!("Failed to load config: {}", e)))?
        };

        if let Some(level) = log_level {
            config.logging.level = level;
        }
        if let Some(format) = log_format {
            config.logging.format = format;
        }

        Ok(Self { config })
    }

    /// The resolved configuration.
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Execute a CLI command, returning the text to print.
    pub fn execute(&self, command: &Commands) -> Result<String, ReportError> {
        match command {
            Commands::Report {
                endpoint,
                port,
                timeout_ms,
                database,
                collection,
            } => {
                let config = self.report_config(
                    endpoint.as_deref(),
                    *port,
                    *timeout_ms,
                    database.as_deref(),
                    collection.as_deref(),
                );
                self.run_report(&config)
            }
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                ReportError::Config(format!("Failed to render configuration: {}", e))
            }),
        }
    }

    /// Overlay report flags on the loaded configuration.
    fn report_config(
        &self,
        endpoint: Option<&str>,
        port: Option<u16>,
        timeout_ms: Option<u64>,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> FleetConfig {
        let mut config = self.config.clone();
        if let Some(endpoint) = endpoint {
            config.directory.endpoint = endpoint.to_string();
        }
        if let Some(port) = port {
            config.fdb.port = port;
        }
        if let Some(timeout_ms) = timeout_ms {
            config.fdb.timeout_ms = timeout_ms;
        }
        if let Some(database) = database {
            config.fdb.database = database.to_string();
        }
        if let Some(collection) = collection {
            config.fdb.collection = collection.to_string();
        }
        config
    }

    /// Run one reporting pass to completion on a fresh runtime.
    ///
    /// A directory failure is a reported outcome, not a tool error: the
    /// failure notice becomes the output and the process still exits 0.
    fn run_report(&self, config: &FleetConfig) -> Result<String, ReportError> {
        let directory = DirectoryClient::new(config.directory.endpoint.clone());
        let inspector = FdbInspector::new(config.fdb.clone());
        let scanner = FleetScanner::new(directory, inspector);

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ReportError::Runtime(format!("Failed to create runtime: {}", e)))?;
        match rt.block_on(scanner.run_pass()) {
            Ok(report) => {
                info!(nodes = report.nodes.len(), "fleet pass finished");
                Ok(format_fleet_report_text(&report, &config.fdb.collection))
            }
            Err(ReportError::Directory(e)) => Ok(format_directory_failure_text(&e)),
            Err(e) => Err(e),
        }
    }
}
