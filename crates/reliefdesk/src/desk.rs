//! The desk: one store, one in-memory snapshot, one volunteer picker.
//!
//! Every mutation runs against a staged copy of the tables. The copy is
//! written to the store and only then replaces the live snapshot, so a failed
//! write leaves both the store and the desk exactly as they were.

use tracing::{debug, warn};

use crate::coordinator::{self, Assignment, EmergencyReport, StatusChange, VolunteerPicker};
use crate::error::{Error, Result};
use crate::integrity::{self, Inconsistency};
use crate::ledger::{self, ResourceEntry};
use crate::model::{EmergencyStatus, Role, RowFilter, TableName, TableView, Tables};
use crate::registry::{self, Profile};
use crate::storage::TableStore;

/// Single-operator front desk over a [`TableStore`].
#[derive(Debug)]
pub struct Desk<S: TableStore> {
    store: S,
    tables: Tables,
    picker: Box<dyn VolunteerPicker>,
}

impl<S: TableStore> Desk<S> {
    /// Load every table from `store` and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(mut store: S, picker: Box<dyn VolunteerPicker>) -> Result<Self> {
        let tables = store.load_all()?;
        debug!(
            "Desk opened with {} volunteers and {} emergencies",
            tables.volunteers.len(),
            tables.emergencies.len()
        );
        Ok(Self {
            store,
            tables,
            picker,
        })
    }

    /// Read access to the live snapshot.
    #[must_use]
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty, or a persistence error
    /// if the tables cannot be saved.
    pub fn register_user(&mut self, profile: Profile) -> Result<i64> {
        self.commit(|tables, _| registry::register(tables, Role::User, profile))
    }

    /// Register a volunteer, initially available.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty, or a persistence error
    /// if the tables cannot be saved.
    pub fn register_volunteer(&mut self, profile: Profile) -> Result<i64> {
        self.commit(|tables, _| registry::register(tables, Role::Volunteer, profile))
    }

    /// Id of the first account of `role` matching both credentials.
    #[must_use]
    pub fn login(&self, role: Role, email: &str, password: &str) -> Option<i64> {
        registry::authenticate(&self.tables, role, email, password)
    }

    /// Name of the account with the given role and id.
    #[must_use]
    pub fn display_name(&self, role: Role, id: i64) -> Option<&str> {
        registry::display_name(&self.tables, role, id)
    }

    /// Record an emergency and assign an available volunteer if there is one.
    ///
    /// # Errors
    ///
    /// Returns a validation error if type or location is empty, or a
    /// persistence error if the tables cannot be saved.
    pub fn create_emergency(&mut self, report: EmergencyReport) -> Result<Assignment> {
        self.commit(|tables, picker| coordinator::create(tables, picker, report))
    }

    /// Log a resource.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty, or a persistence error
    /// if the tables cannot be saved.
    pub fn add_resource(&mut self, entry: ResourceEntry) -> Result<i64> {
        self.commit(|tables, _| ledger::add(tables, entry))
    }

    /// Overwrite an emergency's status, releasing its volunteer on a terminal status.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id, or a persistence error if
    /// the tables cannot be saved.
    pub fn update_emergency_status(
        &mut self,
        emergency_id: i64,
        status: EmergencyStatus,
    ) -> Result<StatusChange> {
        self.commit(|tables, _| coordinator::update_status(tables, emergency_id, status))
    }

    /// Render one table, optionally keeping only rows matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the filter names an unknown column.
    pub fn list_table(&self, table: TableName, filter: Option<&RowFilter>) -> Result<TableView> {
        self.tables.view(table, filter)
    }

    /// Check the live snapshot for broken volunteer pairings and duplicate keys.
    #[must_use]
    pub fn audit(&self) -> Vec<Inconsistency> {
        integrity::audit(&self.tables)
    }

    fn commit<T>(
        &mut self,
        operation: impl FnOnce(&mut Tables, &mut dyn VolunteerPicker) -> Result<T>,
    ) -> Result<T> {
        let mut staged = self.tables.clone();
        let outcome = operation(&mut staged, self.picker.as_mut())?;

        if let Err(e) = self.store.save_all(&staged) {
            warn!("Discarding change, save failed: {}", e);
            return Err(Error::persistence(e));
        }

        self.tables = staged;
        Ok(outcome)
    }
}
