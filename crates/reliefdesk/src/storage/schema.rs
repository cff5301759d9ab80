//! `SQLite` schema definitions for reliefdesk.
//!
//! This module contains the SQL statements for creating the five record
//! tables and the metadata table. Row order is insertion order, so keys are
//! plain unique columns rather than rowid aliases.

/// SQL statement to create the admins table.
pub const CREATE_ADMINS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS admins (
    admin_id INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL
)
";

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    location TEXT NOT NULL,
    password TEXT NOT NULL
)
";

/// SQL statement to create the volunteers table.
pub const CREATE_VOLUNTEERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS volunteers (
    volunteer_id INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    location TEXT NOT NULL,
    password TEXT NOT NULL,
    status TEXT NOT NULL,
    assigned_emergency_id INTEGER
)
";

/// SQL statement to create the emergencies table.
pub const CREATE_EMERGENCIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS emergencies (
    emergency_id INTEGER NOT NULL UNIQUE,
    user_id INTEGER NOT NULL,
    type TEXT NOT NULL,
    description TEXT NOT NULL,
    location TEXT NOT NULL,
    time TEXT NOT NULL,
    date TEXT NOT NULL,
    status TEXT NOT NULL,
    assigned_volunteer_id INTEGER
)
";

/// SQL statement to create the resources table.
pub const CREATE_RESOURCES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS resources (
    resource_id INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    quantity TEXT NOT NULL,
    status TEXT NOT NULL,
    location TEXT NOT NULL,
    assigned_emergency_id INTEGER
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_ADMINS_TABLE,
    CREATE_USERS_TABLE,
    CREATE_VOLUNTEERS_TABLE,
    CREATE_EMERGENCIES_TABLE,
    CREATE_RESOURCES_TABLE,
    CREATE_METADATA_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableName;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_every_column_is_declared() {
        let statements = [
            (TableName::Admins, CREATE_ADMINS_TABLE),
            (TableName::Users, CREATE_USERS_TABLE),
            (TableName::Volunteers, CREATE_VOLUNTEERS_TABLE),
            (TableName::Emergencies, CREATE_EMERGENCIES_TABLE),
            (TableName::Resources, CREATE_RESOURCES_TABLE),
        ];
        for (table, sql) in statements {
            assert!(sql.contains(&format!("EXISTS {table} (")));
            for column in table.columns() {
                assert!(sql.contains(&format!("    {column} ")), "{table}.{column}");
            }
        }
    }

    #[test]
    fn test_references_are_nullable() {
        assert!(CREATE_VOLUNTEERS_TABLE.contains("assigned_emergency_id INTEGER\n"));
        assert!(CREATE_EMERGENCIES_TABLE.contains("assigned_volunteer_id INTEGER\n"));
        assert!(CREATE_RESOURCES_TABLE.contains("assigned_emergency_id INTEGER\n"));
    }

    #[test]
    fn test_create_metadata_table_structure() {
        assert!(CREATE_METADATA_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_METADATA_TABLE.contains("value TEXT NOT NULL"));
    }
}
