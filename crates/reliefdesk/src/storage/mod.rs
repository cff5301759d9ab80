//! Storage layer for reliefdesk.
//!
//! The desk works on a whole [`Tables`] snapshot at a time: it loads every
//! table on startup and writes every table back after each mutation. This
//! module defines that contract as [`TableStore`] and implements it on
//! `SQLite` with [`SqliteStore`].

pub mod migrations;
pub mod schema;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rusqlite::{params, Connection};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{
    Admin, Emergency, EmergencyStatus, Resource, TableName, Tables, User, Volunteer,
    VolunteerStatus,
};

/// Durable home of the five tables.
pub trait TableStore: fmt::Debug {
    /// Read every table, each in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds a malformed row.
    fn load_all(&mut self) -> Result<Tables>;

    /// Replace the stored contents with `tables`.
    ///
    /// Either every table is written or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the previous contents are kept.
    fn save_all(&mut self, tables: &Tables) -> Result<()>;
}

/// `SQLite`-backed [`TableStore`].
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// A new database gets the schema and the default administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Row counts and file size.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let mut rows = Vec::with_capacity(TableName::ALL.len());
        for table in TableName::ALL {
            let count: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                        row.get(0)
                    })?;
            rows.push(TableCount { table, rows: count });
        }

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            path: self.path.clone(),
            tables: rows,
            db_size_bytes,
        })
    }
}

impl TableStore for SqliteStore {
    fn load_all(&mut self) -> Result<Tables> {
        let tables = Tables {
            admins: load_admins(&self.conn)?,
            users: load_users(&self.conn)?,
            volunteers: load_volunteers(&self.conn)?,
            emergencies: load_emergencies(&self.conn)?,
            resources: load_resources(&self.conn)?,
        };
        debug!(
            "Loaded {} users, {} volunteers, {} emergencies, {} resources",
            tables.users.len(),
            tables.volunteers.len(),
            tables.emergencies.len(),
            tables.resources.len()
        );
        Ok(tables)
    }

    fn save_all(&mut self, tables: &Tables) -> Result<()> {
        let tx = self.conn.transaction()?;

        for table in TableName::ALL {
            tx.execute(&format!("DELETE FROM {table}"), [])?;
        }
        save_admins(&tx, &tables.admins)?;
        save_users(&tx, &tables.users)?;
        save_volunteers(&tx, &tables.volunteers)?;
        save_emergencies(&tx, &tables.emergencies)?;
        save_resources(&tx, &tables.resources)?;

        tx.commit()?;
        debug!("Saved all tables to {}", self.path.display());
        Ok(())
    }
}

/// Rows held by one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    /// The table.
    pub table: TableName,
    /// Number of rows.
    pub rows: i64,
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Path to the database file.
    pub path: PathBuf,
    /// Row count of every table.
    pub tables: Vec<TableCount>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

fn parse_status<T>(table: TableName, id: i64, label: &str) -> Result<T>
where
    T: FromStr<Err = Error>,
{
    label.parse().map_err(|_| Error::InvalidRecord {
        table,
        id,
        message: format!("unknown status '{label}'"),
    })
}

fn load_admins(conn: &Connection) -> Result<Vec<Admin>> {
    let mut stmt =
        conn.prepare("SELECT admin_id, name, email, password FROM admins ORDER BY rowid")?;
    let admins = stmt
        .query_map([], |row| {
            Ok(Admin {
                admin_id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                password: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(admins)
}

fn load_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, name, email, phone, location, password FROM users ORDER BY rowid",
    )?;
    let users = stmt
        .query_map([], |row| {
            Ok(User {
                user_id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                location: row.get(4)?,
                password: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(users)
}

fn load_volunteers(conn: &Connection) -> Result<Vec<Volunteer>> {
    let mut stmt = conn.prepare(
        r"
        SELECT volunteer_id, name, email, phone, location, password, status, assigned_emergency_id
        FROM volunteers ORDER BY rowid
        ",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let status: String = row.get(6)?;
            let volunteer = Volunteer {
                volunteer_id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                location: row.get(4)?,
                password: row.get(5)?,
                status: VolunteerStatus::default(),
                assigned_emergency_id: row.get(7)?,
            };
            Ok((volunteer, status))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(mut volunteer, status)| -> Result<Volunteer> {
            volunteer.status = parse_status(TableName::Volunteers, volunteer.volunteer_id, &status)?;
            Ok(volunteer)
        })
        .collect()
}

fn load_emergencies(conn: &Connection) -> Result<Vec<Emergency>> {
    let mut stmt = conn.prepare(
        r"
        SELECT emergency_id, user_id, type, description, location, time, date, status,
               assigned_volunteer_id
        FROM emergencies ORDER BY rowid
        ",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let status: String = row.get(7)?;
            let emergency = Emergency {
                emergency_id: row.get(0)?,
                user_id: row.get(1)?,
                kind: row.get(2)?,
                description: row.get(3)?,
                location: row.get(4)?,
                time: row.get(5)?,
                date: row.get(6)?,
                status: EmergencyStatus::default(),
                assigned_volunteer_id: row.get(8)?,
            };
            Ok((emergency, status))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(mut emergency, status)| -> Result<Emergency> {
            emergency.status =
                parse_status(TableName::Emergencies, emergency.emergency_id, &status)?;
            Ok(emergency)
        })
        .collect()
}

fn load_resources(conn: &Connection) -> Result<Vec<Resource>> {
    let mut stmt = conn.prepare(
        r"
        SELECT resource_id, name, quantity, status, location, assigned_emergency_id
        FROM resources ORDER BY rowid
        ",
    )?;
    let resources = stmt
        .query_map([], |row| {
            Ok(Resource {
                resource_id: row.get(0)?,
                name: row.get(1)?,
                quantity: row.get(2)?,
                status: row.get(3)?,
                location: row.get(4)?,
                assigned_emergency_id: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(resources)
}

fn save_admins(conn: &Connection, admins: &[Admin]) -> Result<()> {
    let mut stmt = conn
        .prepare("INSERT INTO admins (admin_id, name, email, password) VALUES (?1, ?2, ?3, ?4)")?;
    for admin in admins {
        stmt.execute(params![admin.admin_id, admin.name, admin.email, admin.password])?;
    }
    Ok(())
}

fn save_users(conn: &Connection, users: &[User]) -> Result<()> {
    let mut stmt = conn.prepare(
        r"
        INSERT INTO users (user_id, name, email, phone, location, password)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ",
    )?;
    for user in users {
        stmt.execute(params![
            user.user_id,
            user.name,
            user.email,
            user.phone,
            user.location,
            user.password,
        ])?;
    }
    Ok(())
}

fn save_volunteers(conn: &Connection, volunteers: &[Volunteer]) -> Result<()> {
    let mut stmt = conn.prepare(
        r"
        INSERT INTO volunteers
            (volunteer_id, name, email, phone, location, password, status, assigned_emergency_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ",
    )?;
    for volunteer in volunteers {
        stmt.execute(params![
            volunteer.volunteer_id,
            volunteer.name,
            volunteer.email,
            volunteer.phone,
            volunteer.location,
            volunteer.password,
            volunteer.status.to_string(),
            volunteer.assigned_emergency_id,
        ])?;
    }
    Ok(())
}

fn save_emergencies(conn: &Connection, emergencies: &[Emergency]) -> Result<()> {
    let mut stmt = conn.prepare(
        r"
        INSERT INTO emergencies
            (emergency_id, user_id, type, description, location, time, date, status,
             assigned_volunteer_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ",
    )?;
    for emergency in emergencies {
        stmt.execute(params![
            emergency.emergency_id,
            emergency.user_id,
            emergency.kind,
            emergency.description,
            emergency.location,
            emergency.time,
            emergency.date,
            emergency.status.to_string(),
            emergency.assigned_volunteer_id,
        ])?;
    }
    Ok(())
}

fn save_resources(conn: &Connection, resources: &[Resource]) -> Result<()> {
    let mut stmt = conn.prepare(
        r"
        INSERT INTO resources (resource_id, name, quantity, status, location, assigned_emergency_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ",
    )?;
    for resource in resources {
        stmt.execute(params![
            resource.resource_id,
            resource.name,
            resource.quantity,
            resource.status,
            resource.location,
            resource.assigned_emergency_id,
        ])?;
    }
    Ok(())
}
