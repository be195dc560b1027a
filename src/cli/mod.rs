//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! vropsapi binary.

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::Scheme;

/// vRealize Operations API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "vropsapi", about = "vRealize Operations API CLI", version)]
pub struct Cli {
    /// vRealize Operations Manager hostname.
    #[arg(long, env = "VROPS_HOST")]
    pub host: String,

    /// Port number for the API calls.
    #[arg(long, env = "VROPS_PORT", default_value_t = 443)]
    pub port: u16,

    /// Protocol for the API calls (http or https).
    #[arg(long, env = "VROPS_SCHEME", default_value = "https")]
    pub scheme: Scheme,

    /// API username.
    #[arg(long, env = "VROPS_USERNAME")]
    pub username: String,

    /// API password.
    #[arg(long, env = "VROPS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Enforce validation of server certificates.
    #[arg(
        long,
        env = "VROPS_VALIDATE_CERTS",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub validate_certs: bool,

    /// Skip unknown response keys instead of failing on them.
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Output results as a table instead of JSON lines.
    #[arg(long, global = true)]
    pub table: bool,

    /// Logging severity level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the full inventory of an entity kind.
    List {
        /// The kind of entity to list.
        entity: Entity,
    },
}

/// Entity kinds that can be listed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A virtual machine inventoried by the platform.
    #[value(alias = "virtual-machines", alias = "vm", alias = "vms")]
    VirtualMachine,
}
