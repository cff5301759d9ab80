//! `reliefdesk` - A single-operator emergency coordination desk
//!
//! This library keeps administrators, users, volunteers, emergencies and
//! resources in five tables, assigns a randomly chosen available volunteer to
//! each new emergency, and releases that volunteer when the emergency is
//! resolved or closed. Every change is written through to `SQLite` before it
//! becomes visible.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod desk;
pub mod error;
pub mod integrity;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod registry;
pub mod storage;

pub use config::Config;
pub use desk::Desk;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Role, TableName, Tables};
pub use storage::{SqliteStore, StoreStats, TableStore};
