//! Command-line interface for reliefdesk.
//!
//! This module provides the CLI structure and command handlers for the
//! `rdesk` binary.

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CheckCommand, ConfigCommand, EmergencyCommand, ListCommand, LoginCommand, OutputFormat,
    ProfileArgs, RegisterCommand, ReportArgs, ResourceArgs, ResourceCommand, RoleArg,
    StatusCommand, TableArg,
};
pub use render::render_view;

/// rdesk - Emergency coordination desk
///
/// Keeps users, volunteers, emergencies and resources in one local database,
/// assigns an available volunteer to each reported emergency, and frees the
/// volunteer again once the emergency is resolved or closed.
#[derive(Debug, Parser)]
#[command(name = "rdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a user or volunteer
    #[command(subcommand)]
    Register(RegisterCommand),

    /// Log in and show the role's dashboard
    Login(LoginCommand),

    /// Report emergencies and change their status
    #[command(subcommand)]
    Emergency(EmergencyCommand),

    /// Log resources
    #[command(subcommand)]
    Resource(ResourceCommand),

    /// Show the rows of a table
    List(ListCommand),

    /// Check volunteer assignments for inconsistencies
    Check(CheckCommand),

    /// Show database location and row counts
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}
