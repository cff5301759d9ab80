//! `rdesk` - CLI for reliefdesk
//!
//! This binary provides the command-line interface for registering accounts,
//! reporting emergencies, logging resources and inspecting the desk's tables.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::warn;

use reliefdesk::cli::{
    render_view, CheckCommand, Cli, Command, ConfigCommand, EmergencyCommand, ListCommand,
    LoginCommand, OutputFormat, RegisterCommand, ReportArgs, ResourceArgs, ResourceCommand,
};
use reliefdesk::coordinator::{EmergencyReport, RandomPicker, VolunteerPicker};
use reliefdesk::ledger::ResourceEntry;
use reliefdesk::model::{EmergencyStatus, Role, RowFilter, TableName, Volunteer};
use reliefdesk::{init_logging, Config, Desk, Error, SqliteStore};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::Register(register_cmd) => {
            let mut desk = open_desk(&config)?;
            handle_register(&mut desk, register_cmd)
        }
        Command::Login(login_cmd) => {
            let desk = open_desk(&config)?;
            handle_login(&desk, &login_cmd)
        }
        Command::Emergency(EmergencyCommand::Report(args)) => {
            let mut desk = open_desk(&config)?;
            handle_report(&mut desk, &config, args)
        }
        Command::Emergency(EmergencyCommand::Status { id, status }) => {
            let mut desk = open_desk(&config)?;
            handle_emergency_status(&mut desk, id, status)
        }
        Command::Resource(ResourceCommand::Add(args)) => {
            let mut desk = open_desk(&config)?;
            handle_resource_add(&mut desk, &config, args)
        }
        Command::List(list_cmd) => {
            let desk = open_desk(&config)?;
            handle_list(&desk, &list_cmd)
        }
        Command::Check(check_cmd) => {
            let desk = open_desk(&config)?;
            handle_check(&desk, &check_cmd)
        }
        Command::Status(status_cmd) => {
            let desk = open_desk(&config)?;
            handle_status(&desk, status_cmd.json)
        }
    }
}

fn open_desk(config: &Config) -> Result<Desk<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("failed to open desk database at {}", path.display()))?;

    let picker: Box<dyn VolunteerPicker> = match config.assignment.seed {
        Some(seed) => Box::new(RandomPicker::seeded(seed)),
        None => Box::new(RandomPicker::from_os_rng()),
    };

    Ok(Desk::open(store, picker)?)
}

fn handle_register(desk: &mut Desk<SqliteStore>, cmd: RegisterCommand) -> Result<ExitCode> {
    let (role, id) = match cmd {
        RegisterCommand::User(args) => (Role::User, desk.register_user(args.into())?),
        RegisterCommand::Volunteer(args) => {
            (Role::Volunteer, desk.register_volunteer(args.into())?)
        }
    };
    println!("Registered {role} with id {id}");
    Ok(ExitCode::SUCCESS)
}

fn handle_login(desk: &Desk<SqliteStore>, cmd: &LoginCommand) -> Result<ExitCode> {
    let role = Role::from(cmd.role);
    let Some(id) = desk.login(role, &cmd.email, &cmd.password) else {
        println!("Invalid credentials");
        warn!("Failed {} login for {}", role, cmd.email);
        return Err(Error::Authentication { role }.into());
    };

    let name = desk.display_name(role, id).unwrap_or_default();
    println!("Welcome, {name}!");
    println!();

    match role {
        Role::Admin => {
            println!("Desk overview");
            println!("-------------");
            for table in TableName::ALL {
                println!("  {:<12} {}", table.to_string(), desk.tables().count(table));
            }
        }
        Role::User => {
            println!("Your reported emergencies");
            println!("-------------------------");
            let filter = RowFilter::new("user_id", id.to_string());
            let view = desk.list_table(TableName::Emergencies, Some(&filter))?;
            println!("{}", render_view(&view, OutputFormat::Table)?);
        }
        Role::Volunteer => {
            if let Some(volunteer) = desk.tables().find::<Volunteer>(id) {
                println!("Status: {}", volunteer.status);
            }
            println!("Your assigned emergencies");
            println!("-------------------------");
            let filter = RowFilter::new("assigned_volunteer_id", id.to_string());
            let view = desk.list_table(TableName::Emergencies, Some(&filter))?;
            println!("{}", render_view(&view, OutputFormat::Table)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_report(
    desk: &mut Desk<SqliteStore>,
    config: &Config,
    args: ReportArgs,
) -> Result<ExitCode> {
    let now = Local::now();
    let report = EmergencyReport {
        reporter_id: args.reporter,
        kind: args
            .kind
            .unwrap_or_else(|| config.defaults.emergency_type.clone()),
        description: args.description,
        location: args.location,
        time: args
            .time
            .unwrap_or_else(|| now.format("%H:%M").to_string()),
        date: args
            .date
            .unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
    };

    let assignment = desk.create_emergency(report)?;
    println!("Emergency reported with id {}", assignment.emergency_id);
    match assignment.volunteer_id {
        Some(volunteer_id) => {
            let name = desk
                .display_name(Role::Volunteer, volunteer_id)
                .unwrap_or_default();
            println!("Assigned volunteer {volunteer_id} ({name})");
        }
        None => println!("No volunteers available at the moment"),
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_emergency_status(
    desk: &mut Desk<SqliteStore>,
    id: i64,
    status: EmergencyStatus,
) -> Result<ExitCode> {
    let change = desk.update_emergency_status(id, status)?;
    println!(
        "Emergency {} status: {} -> {}",
        change.emergency_id, change.previous, change.current
    );
    if let Some(volunteer_id) = change.released_volunteer_id {
        println!("Volunteer {volunteer_id} is available again");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_resource_add(
    desk: &mut Desk<SqliteStore>,
    config: &Config,
    args: ResourceArgs,
) -> Result<ExitCode> {
    let entry = ResourceEntry {
        name: args.name,
        quantity: args
            .quantity
            .unwrap_or_else(|| config.defaults.resource_quantity.clone()),
        status: Some(
            args.status
                .unwrap_or_else(|| config.defaults.resource_status.clone()),
        ),
        location: args.location,
    };
    let id = desk.add_resource(entry)?;
    println!("Resource added with id {id}");
    Ok(ExitCode::SUCCESS)
}

fn handle_list(desk: &Desk<SqliteStore>, cmd: &ListCommand) -> Result<ExitCode> {
    let view = desk.list_table(cmd.table.into(), cmd.filter.as_ref())?;
    println!("{}", render_view(&view, cmd.format)?);
    Ok(ExitCode::SUCCESS)
}

fn handle_check(desk: &Desk<SqliteStore>, cmd: &CheckCommand) -> Result<ExitCode> {
    let issues = desk.audit();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else if issues.is_empty() {
        println!("No inconsistencies found");
    } else {
        println!("Found {} inconsistencies:", issues.len());
        for issue in &issues {
            println!("  - {issue}");
        }
    }

    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_status(desk: &Desk<SqliteStore>, json: bool) -> Result<ExitCode> {
    let stats = desk.store().stats()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("rdesk status");
        println!("------------");
        println!("Database:      {}", stats.path.display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!();
        for count in &stats.tables {
            println!("  {:<12} {}", count.table.to_string(), count.rows);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Assignment]");
                match config.assignment.seed {
                    Some(seed) => println!("  Seed:               {seed}"),
                    None => println!("  Seed:               (random)"),
                }
                println!();
                println!("[Defaults]");
                println!("  Emergency type:     {}", config.defaults.emergency_type);
                println!(
                    "  Resource quantity:  {}",
                    config.defaults.resource_quantity
                );
                println!("  Resource status:    {}", config.defaults.resource_status);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
