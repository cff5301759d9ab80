//! Record model for reliefdesk.
//!
//! This module defines the five record types the desk keeps, their closed
//! status variants, and [`Tables`], the in-memory snapshot every component
//! reads and mutates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the seeded administrator.
pub const DEFAULT_ADMIN_NAME: &str = "Admin";

/// Email of the seeded administrator.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@mail.com";

/// Password of the seeded administrator.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// The five tables kept by the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    /// Administrators.
    Admins,
    /// Registered users who report emergencies.
    Users,
    /// Volunteers who get assigned to emergencies.
    Volunteers,
    /// Reported emergencies.
    Emergencies,
    /// Logged resources.
    Resources,
}

impl TableName {
    /// All tables, in persistence order.
    pub const ALL: [TableName; 5] = [
        Self::Admins,
        Self::Users,
        Self::Volunteers,
        Self::Emergencies,
        Self::Resources,
    ];

    /// Column names of this table, key column first.
    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Admins => &["admin_id", "name", "email", "password"],
            Self::Users => &["user_id", "name", "email", "phone", "location", "password"],
            Self::Volunteers => &[
                "volunteer_id",
                "name",
                "email",
                "phone",
                "location",
                "password",
                "status",
                "assigned_emergency_id",
            ],
            Self::Emergencies => &[
                "emergency_id",
                "user_id",
                "type",
                "description",
                "location",
                "time",
                "date",
                "status",
                "assigned_volunteer_id",
            ],
            Self::Resources => &[
                "resource_id",
                "name",
                "quantity",
                "status",
                "location",
                "assigned_emergency_id",
            ],
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admins => write!(f, "admins"),
            Self::Users => write!(f, "users"),
            Self::Volunteers => write!(f, "volunteers"),
            Self::Emergencies => write!(f, "emergencies"),
            Self::Resources => write!(f, "resources"),
        }
    }
}

/// The three account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every table.
    Admin,
    /// Reports emergencies.
    User,
    /// Gets assigned to emergencies.
    Volunteer,
}

impl Role {
    /// The table holding accounts of this role.
    #[must_use]
    pub fn table(self) -> TableName {
        match self {
            Self::Admin => TableName::Admins,
            Self::User => TableName::Users,
            Self::Volunteer => TableName::Volunteers,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Volunteer => write!(f, "volunteer"),
        }
    }
}

/// Lowercase a status label and fold `_`, `-` and runs of whitespace into single spaces.
fn normalize_label(label: &str) -> String {
    label
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Availability of a volunteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VolunteerStatus {
    /// Free to take an emergency.
    #[default]
    Available,
    /// Assigned to an open emergency.
    Busy,
}

impl fmt::Display for VolunteerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Busy => write!(f, "Busy"),
        }
    }
}

impl FromStr for VolunteerStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "available" => Ok(Self::Available),
            "busy" => Ok(Self::Busy),
            _ => Err(Error::validation(
                "status",
                format!("unknown volunteer status '{s}' (expected Available or Busy)"),
            )),
        }
    }
}

/// Lifecycle state of an emergency.
///
/// Any state may be written at any time; only [`EmergencyStatus::is_terminal`]
/// changes what an update does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmergencyStatus {
    /// Reported, not yet worked on.
    #[default]
    Pending,
    /// Being handled.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Handled.
    Resolved,
    /// Closed out.
    Closed,
}

impl EmergencyStatus {
    /// Whether reaching this state releases the assigned volunteer.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl fmt::Display for EmergencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Resolved => write!(f, "Resolved"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

impl FromStr for EmergencyStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "pending" => Ok(Self::Pending),
            "in progress" | "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(Error::validation(
                "status",
                format!(
                    "unknown emergency status '{s}' (expected Pending, In Progress, Resolved or Closed)"
                ),
            )),
        }
    }
}

/// An administrator account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    /// Key.
    pub admin_id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Login password, stored as entered.
    pub password: String,
}

impl Admin {
    /// The administrator seeded into a fresh store.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            admin_id: 1,
            name: DEFAULT_ADMIN_NAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Key.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Home location.
    pub location: String,
    /// Login password, stored as entered.
    pub password: String,
}

/// A volunteer account and its current assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    /// Key.
    pub volunteer_id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Base location.
    pub location: String,
    /// Login password, stored as entered.
    pub password: String,
    /// Availability.
    pub status: VolunteerStatus,
    /// Emergency being served; set only while busy.
    pub assigned_emergency_id: Option<i64>,
}

impl Volunteer {
    /// Whether this volunteer can take an emergency.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == VolunteerStatus::Available
    }
}

/// A reported emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emergency {
    /// Key.
    pub emergency_id: i64,
    /// Reporting user, or 0 when entered by an administrator.
    pub user_id: i64,
    /// Free-form category such as Fire or Flood.
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form description.
    pub description: String,
    /// Where it happened.
    pub location: String,
    /// Reported time of day.
    pub time: String,
    /// Reported date.
    pub date: String,
    /// Lifecycle state.
    pub status: EmergencyStatus,
    /// Volunteer picked at creation; kept after release.
    pub assigned_volunteer_id: Option<i64>,
}

/// A logged resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Key.
    pub resource_id: i64,
    /// Resource name.
    pub name: String,
    /// Free-form quantity.
    pub quantity: String,
    /// Free-form label such as Available, In Use or Reserved.
    pub status: String,
    /// Where it is kept.
    pub location: String,
    /// Never populated; kept so the persisted layout stays stable.
    pub assigned_emergency_id: Option<i64>,
}

/// A row type stored in one of the [`Tables`].
pub trait Record: Clone {
    /// The table this record lives in.
    const TABLE: TableName;

    /// Value of the key column.
    fn id(&self) -> i64;

    /// Cell values in [`TableName::columns`] order; `None` is a null cell.
    fn cells(&self) -> Vec<Option<String>>;

    /// The rows of this record's table.
    fn rows(tables: &Tables) -> &[Self];

    /// Mutable access to the rows of this record's table.
    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self>;
}

fn id_cell(id: Option<i64>) -> Option<String> {
    id.map(|id| id.to_string())
}

impl Record for Admin {
    const TABLE: TableName = TableName::Admins;

    fn id(&self) -> i64 {
        self.admin_id
    }

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            Some(self.admin_id.to_string()),
            Some(self.name.clone()),
            Some(self.email.clone()),
            Some(self.password.clone()),
        ]
    }

    fn rows(tables: &Tables) -> &[Self] {
        &tables.admins
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.admins
    }
}

impl Record for User {
    const TABLE: TableName = TableName::Users;

    fn id(&self) -> i64 {
        self.user_id
    }

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            Some(self.user_id.to_string()),
            Some(self.name.clone()),
            Some(self.email.clone()),
            Some(self.phone.clone()),
            Some(self.location.clone()),
            Some(self.password.clone()),
        ]
    }

    fn rows(tables: &Tables) -> &[Self] {
        &tables.users
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.users
    }
}

impl Record for Volunteer {
    const TABLE: TableName = TableName::Volunteers;

    fn id(&self) -> i64 {
        self.volunteer_id
    }

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            Some(self.volunteer_id.to_string()),
            Some(self.name.clone()),
            Some(self.email.clone()),
            Some(self.phone.clone()),
            Some(self.location.clone()),
            Some(self.password.clone()),
            Some(self.status.to_string()),
            id_cell(self.assigned_emergency_id),
        ]
    }

    fn rows(tables: &Tables) -> &[Self] {
        &tables.volunteers
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.volunteers
    }
}

impl Record for Emergency {
    const TABLE: TableName = TableName::Emergencies;

    fn id(&self) -> i64 {
        self.emergency_id
    }

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            Some(self.emergency_id.to_string()),
            Some(self.user_id.to_string()),
            Some(self.kind.clone()),
            Some(self.description.clone()),
            Some(self.location.clone()),
            Some(self.time.clone()),
            Some(self.date.clone()),
            Some(self.status.to_string()),
            id_cell(self.assigned_volunteer_id),
        ]
    }

    fn rows(tables: &Tables) -> &[Self] {
        &tables.emergencies
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.emergencies
    }
}

impl Record for Resource {
    const TABLE: TableName = TableName::Resources;

    fn id(&self) -> i64 {
        self.resource_id
    }

    fn cells(&self) -> Vec<Option<String>> {
        vec![
            Some(self.resource_id.to_string()),
            Some(self.name.clone()),
            Some(self.quantity.clone()),
            Some(self.status.clone()),
            Some(self.location.clone()),
            id_cell(self.assigned_emergency_id),
        ]
    }

    fn rows(tables: &Tables) -> &[Self] {
        &tables.resources
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.resources
    }
}

/// The complete record set, each table in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    /// Administrator accounts.
    pub admins: Vec<Admin>,
    /// User accounts.
    pub users: Vec<User>,
    /// Volunteer accounts.
    pub volunteers: Vec<Volunteer>,
    /// Reported emergencies.
    pub emergencies: Vec<Emergency>,
    /// Logged resources.
    pub resources: Vec<Resource>,
}

impl Tables {
    /// The identifier the next record of `R` receives: `max + 1`, or 1 for an empty table.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the table already holds `i64::MAX`.
    pub fn next_id<R: Record>(&self) -> Result<i64> {
        match R::rows(self).iter().map(Record::id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                Error::internal(format!("{} has no identifier left after {max}", R::TABLE))
            }),
        }
    }

    /// Find a record by key.
    #[must_use]
    pub fn find<R: Record>(&self, id: i64) -> Option<&R> {
        R::rows(self).iter().find(|row| row.id() == id)
    }

    /// Find a record by key for mutation.
    pub fn find_mut<R: Record>(&mut self, id: i64) -> Option<&mut R> {
        R::rows_mut(self).iter_mut().find(|row| row.id() == id)
    }

    /// All records of `R` matching `predicate`, in table order.
    pub fn select<R: Record>(&self, predicate: impl Fn(&R) -> bool) -> Vec<&R> {
        R::rows(self).iter().filter(|row| predicate(row)).collect()
    }

    /// Number of rows in a table.
    #[must_use]
    pub fn count(&self, table: TableName) -> usize {
        match table {
            TableName::Admins => self.admins.len(),
            TableName::Users => self.users.len(),
            TableName::Volunteers => self.volunteers.len(),
            TableName::Emergencies => self.emergencies.len(),
            TableName::Resources => self.resources.len(),
        }
    }

    /// Render a table as string cells, keeping only rows matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the filter names a column the table lacks.
    pub fn view(&self, table: TableName, filter: Option<&RowFilter>) -> Result<TableView> {
        match table {
            TableName::Admins => self.view_of::<Admin>(filter),
            TableName::Users => self.view_of::<User>(filter),
            TableName::Volunteers => self.view_of::<Volunteer>(filter),
            TableName::Emergencies => self.view_of::<Emergency>(filter),
            TableName::Resources => self.view_of::<Resource>(filter),
        }
    }

    fn view_of<R: Record>(&self, filter: Option<&RowFilter>) -> Result<TableView> {
        let columns = R::TABLE.columns();
        let column = filter
            .map(|filter| {
                columns
                    .iter()
                    .position(|name| *name == filter.column)
                    .map(|index| (index, filter.value.as_str()))
                    .ok_or_else(|| {
                        Error::validation(
                            "filter",
                            format!("{} has no column '{}'", R::TABLE, filter.column),
                        )
                    })
            })
            .transpose()?;

        let rows = R::rows(self)
            .iter()
            .map(Record::cells)
            .filter(|cells| match column {
                Some((index, value)) => match &cells[index] {
                    Some(cell) => cell == value,
                    None => value.is_empty(),
                },
                None => true,
            })
            .collect();

        Ok(TableView {
            table: R::TABLE,
            columns,
            rows,
        })
    }
}

/// A `column=value` equality predicate over a table's cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    /// Column to compare.
    pub column: String,
    /// Value the cell must equal; empty matches null cells.
    pub value: String,
}

impl RowFilter {
    /// Create a filter on one column.
    #[must_use]
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl FromStr for RowFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (column, value) = s
            .split_once('=')
            .ok_or_else(|| Error::validation("filter", format!("expected column=value, got '{s}'")))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(Error::required("filter column"));
        }
        Ok(Self::new(column, value.trim()))
    }
}

/// A table rendered as string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Which table this is.
    pub table: TableName,
    /// Column headers.
    pub columns: &'static [&'static str],
    /// Row cells in column order; `None` is a null cell.
    pub rows: Vec<Vec<Option<String>>>,
}

impl TableView {
    /// Whether no rows matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as JSON objects keyed by column, nulls preserved.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|cells| {
                let object = self
                    .columns
                    .iter()
                    .zip(cells)
                    .map(|(column, cell)| {
                        let value = cell
                            .as_ref()
                            .map_or(serde_json::Value::Null, |s| serde_json::Value::from(s.as_str()));
                        ((*column).to_string(), value)
                    })
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volunteer(id: i64, status: VolunteerStatus, emergency: Option<i64>) -> Volunteer {
        Volunteer {
            volunteer_id: id,
            name: format!("Volunteer {id}"),
            email: format!("v{id}@mail.com"),
            phone: "555".to_string(),
            location: "Harbor".to_string(),
            password: "pw".to_string(),
            status,
            assigned_emergency_id: emergency,
        }
    }

    #[test]
    fn test_next_id_empty_table_is_one() {
        let tables = Tables::default();
        assert_eq!(tables.next_id::<User>().unwrap(), 1);
        assert_eq!(tables.next_id::<Emergency>().unwrap(), 1);
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        let mut tables = Tables::default();
        tables
            .volunteers
            .push(volunteer(7, VolunteerStatus::Available, None));
        tables
            .volunteers
            .push(volunteer(3, VolunteerStatus::Available, None));
        assert_eq!(tables.next_id::<Volunteer>().unwrap(), 8);
        // Other tables are independent
        assert_eq!(tables.next_id::<User>().unwrap(), 1);
    }

    #[test]
    fn test_next_id_exhausted_table() {
        let mut tables = Tables::default();
        tables
            .volunteers
            .push(volunteer(i64::MAX, VolunteerStatus::Available, None));

        let err = tables.next_id::<Volunteer>().unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert!(err.to_string().contains("volunteers"));
    }

    #[test]
    fn test_find_and_select() {
        let mut tables = Tables::default();
        tables
            .volunteers
            .push(volunteer(1, VolunteerStatus::Busy, Some(4)));
        tables
            .volunteers
            .push(volunteer(2, VolunteerStatus::Available, None));

        assert_eq!(tables.find::<Volunteer>(2).map(|v| v.volunteer_id), Some(2));
        assert!(tables.find::<Volunteer>(9).is_none());

        let available = tables.select::<Volunteer>(Volunteer::is_available);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].volunteer_id, 2);
    }

    #[test]
    fn test_emergency_status_parse_normalizes() {
        assert_eq!(
            "In Progress".parse::<EmergencyStatus>().unwrap(),
            EmergencyStatus::InProgress
        );
        assert_eq!(
            " in_progress ".parse::<EmergencyStatus>().unwrap(),
            EmergencyStatus::InProgress
        );
        assert_eq!(
            "InProgress".parse::<EmergencyStatus>().unwrap(),
            EmergencyStatus::InProgress
        );
        assert_eq!(
            "CLOSED".parse::<EmergencyStatus>().unwrap(),
            EmergencyStatus::Closed
        );
    }

    #[test]
    fn test_emergency_status_rejects_unknown() {
        let err = "Escalated".parse::<EmergencyStatus>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Escalated"));
    }

    #[test]
    fn test_emergency_status_display_round_trip() {
        for status in [
            EmergencyStatus::Pending,
            EmergencyStatus::InProgress,
            EmergencyStatus::Resolved,
            EmergencyStatus::Closed,
        ] {
            assert_eq!(status.to_string().parse::<EmergencyStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!EmergencyStatus::Pending.is_terminal());
        assert!(!EmergencyStatus::InProgress.is_terminal());
        assert!(EmergencyStatus::Resolved.is_terminal());
        assert!(EmergencyStatus::Closed.is_terminal());
    }

    #[test]
    fn test_volunteer_status_parse() {
        assert_eq!(
            "busy".parse::<VolunteerStatus>().unwrap(),
            VolunteerStatus::Busy
        );
        assert!("Asleep".parse::<VolunteerStatus>().is_err());
    }

    #[test]
    fn test_emergency_status_serializes_as_label() {
        let json = serde_json::to_string(&EmergencyStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn test_columns_match_cells() {
        let mut tables = Tables::default();
        tables.admins.push(Admin::seed());
        tables
            .volunteers
            .push(volunteer(1, VolunteerStatus::Available, None));
        for table in TableName::ALL {
            let view = tables.view(table, None).unwrap();
            for row in &view.rows {
                assert_eq!(row.len(), table.columns().len(), "{table}");
            }
        }
    }

    #[test]
    fn test_view_null_cells() {
        let mut tables = Tables::default();
        tables
            .volunteers
            .push(volunteer(1, VolunteerStatus::Available, None));
        let view = tables.view(TableName::Volunteers, None).unwrap();
        assert_eq!(view.rows[0][7], None);
        assert_eq!(view.rows[0][6].as_deref(), Some("Available"));
    }

    #[test]
    fn test_view_filter() {
        let mut tables = Tables::default();
        tables
            .volunteers
            .push(volunteer(1, VolunteerStatus::Busy, Some(2)));
        tables
            .volunteers
            .push(volunteer(2, VolunteerStatus::Available, None));

        let busy = RowFilter::new("status", "Busy");
        let view = tables.view(TableName::Volunteers, Some(&busy)).unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0][0].as_deref(), Some("1"));

        // An empty value selects null cells
        let unassigned = RowFilter::new("assigned_emergency_id", "");
        let view = tables
            .view(TableName::Volunteers, Some(&unassigned))
            .unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0][0].as_deref(), Some("2"));
    }

    #[test]
    fn test_view_filter_unknown_column() {
        let tables = Tables::default();
        let filter = RowFilter::new("shoe_size", "42");
        let err = tables.view(TableName::Users, Some(&filter)).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("shoe_size"));
    }

    #[test]
    fn test_row_filter_parse() {
        let filter: RowFilter = "user_id=5".parse().unwrap();
        assert_eq!(filter, RowFilter::new("user_id", "5"));

        let filter: RowFilter = "assigned_volunteer_id=".parse().unwrap();
        assert_eq!(filter.value, "");

        assert!("user_id".parse::<RowFilter>().is_err());
        assert!("=5".parse::<RowFilter>().is_err());
    }

    #[test]
    fn test_view_to_json_keeps_nulls() {
        let mut tables = Tables::default();
        tables
            .volunteers
            .push(volunteer(1, VolunteerStatus::Available, None));
        let json = tables
            .view(TableName::Volunteers, None)
            .unwrap()
            .to_json();
        assert_eq!(json[0]["volunteer_id"], "1");
        assert!(json[0]["assigned_emergency_id"].is_null());
    }

    #[test]
    fn test_role_tables() {
        assert_eq!(Role::Admin.table(), TableName::Admins);
        assert_eq!(Role::User.table(), TableName::Users);
        assert_eq!(Role::Volunteer.table(), TableName::Volunteers);
    }
}
