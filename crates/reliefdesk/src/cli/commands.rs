//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::{EmergencyStatus, Role, RowFilter, TableName};
use crate::registry::Profile;

/// Registration commands.
#[derive(Debug, Subcommand)]
pub enum RegisterCommand {
    /// Register a user who can report emergencies
    User(ProfileArgs),

    /// Register a volunteer who can be assigned to emergencies
    Volunteer(ProfileArgs),
}

/// Account details collected at registration.
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Login email
    #[arg(long)]
    pub email: String,

    /// Contact phone
    #[arg(long)]
    pub phone: String,

    /// Location
    #[arg(long)]
    pub location: String,

    /// Login password
    #[arg(long)]
    pub password: String,
}

impl From<ProfileArgs> for Profile {
    fn from(args: ProfileArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            location: args.location,
            password: args.password,
        }
    }
}

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Role to log in as
    #[arg(value_enum)]
    pub role: RoleArg,

    /// Login email
    #[arg(long)]
    pub email: String,

    /// Login password
    #[arg(long)]
    pub password: String,
}

/// Emergency commands.
#[derive(Debug, Subcommand)]
pub enum EmergencyCommand {
    /// Report an emergency and assign an available volunteer
    Report(ReportArgs),

    /// Change an emergency's status
    Status {
        /// Emergency id
        id: i64,

        /// New status (Pending, "In Progress", Resolved, Closed)
        status: EmergencyStatus,
    },
}

/// Emergency report arguments.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Reporting user id (0 for an administrator)
    #[arg(long, default_value_t = 0)]
    pub reporter: i64,

    /// Emergency type, e.g. Fire or Flood [default: from config]
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Free-form description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Where it is happening
    #[arg(long)]
    pub location: String,

    /// Time of day as HH:MM [default: now]
    #[arg(long)]
    pub time: Option<String>,

    /// Date as YYYY-MM-DD [default: today]
    #[arg(long)]
    pub date: Option<String>,
}

/// Resource commands.
#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    /// Log a resource
    Add(ResourceArgs),
}

/// Resource arguments.
#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Resource name
    #[arg(long)]
    pub name: String,

    /// Quantity [default: from config]
    #[arg(long)]
    pub quantity: Option<String>,

    /// Status label such as Available, In Use or Reserved [default: from config]
    #[arg(long)]
    pub status: Option<String>,

    /// Where it is kept
    #[arg(long, default_value = "")]
    pub location: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Table to show
    #[arg(value_enum)]
    pub table: TableArg,

    /// Keep only rows where a column equals a value (empty value matches nulls)
    #[arg(short = 'w', long = "where", value_name = "COLUMN=VALUE")]
    pub filter: Option<RowFilter>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Role argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Administrator
    Admin,
    /// User
    User,
    /// Volunteer
    Volunteer,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Self::Admin,
            RoleArg::User => Self::User,
            RoleArg::Volunteer => Self::Volunteer,
        }
    }
}

/// Table argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    /// Administrators
    Admins,
    /// Users
    Users,
    /// Volunteers
    Volunteers,
    /// Emergencies
    Emergencies,
    /// Resources
    Resources,
}

impl From<TableArg> for TableName {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Admins => Self::Admins,
            TableArg::Users => Self::Users,
            TableArg::Volunteers => Self::Volunteers,
            TableArg::Emergencies => Self::Emergencies,
            TableArg::Resources => Self::Resources,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
