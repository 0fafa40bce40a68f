//! Command-line interface definitions.
//!
//! Defines the CLI structure for the chatgate binary using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Multi-modal chat gateway
#[derive(Parser, Debug)]
#[command(name = "chatgate")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the gateway (foreground, until Ctrl-C)
    Serve(ServeArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `chatgate check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and credential presence.
    Config(ConfigPathArg),
}

/// Shared `--config` argument.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for `chatgate serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the listen address (e.g. 127.0.0.1:8080).
    #[arg(long)]
    pub bind: Option<String>,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}
