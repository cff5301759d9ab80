//! Resource ledger.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Resource, Tables};

/// Status given to a resource logged without one.
pub const DEFAULT_RESOURCE_STATUS: &str = "Available";

/// Details of a resource to log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Resource name (required).
    pub name: String,
    /// Free-form quantity.
    pub quantity: String,
    /// Free-form status; blank or absent means [`DEFAULT_RESOURCE_STATUS`].
    pub status: Option<String>,
    /// Where it is kept; may be empty.
    pub location: String,
}

/// Append a resource and return its id.
///
/// The quantity is stored as given, and the emergency link starts (and stays) empty.
///
/// # Errors
///
/// Returns a validation error, without touching the tables, if the name is empty.
pub fn add(tables: &mut Tables, entry: ResourceEntry) -> Result<i64> {
    if entry.name.trim().is_empty() {
        return Err(Error::required("name"));
    }

    let status = entry
        .status
        .filter(|status| !status.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_RESOURCE_STATUS.to_string());

    let resource_id = tables.next_id::<Resource>()?;
    tables.resources.push(Resource {
        resource_id,
        name: entry.name,
        quantity: entry.quantity,
        status,
        location: entry.location,
        assigned_emergency_id: None,
    });

    info!("Logged resource {}", resource_id);
    Ok(resource_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> ResourceEntry {
        ResourceEntry {
            name: name.to_string(),
            quantity: "4".to_string(),
            status: None,
            location: "Depot".to_string(),
        }
    }

    #[test]
    fn test_add_defaults_status() {
        let mut tables = Tables::default();
        let id = add(&mut tables, entry("Sandbags")).unwrap();

        assert_eq!(id, 1);
        let resource = &tables.resources[0];
        assert_eq!(resource.status, "Available");
        assert!(resource.assigned_emergency_id.is_none());
    }

    #[test]
    fn test_add_blank_status_uses_default() {
        let mut tables = Tables::default();
        let mut blank = entry("Tarp");
        blank.status = Some("  ".to_string());
        add(&mut tables, blank).unwrap();
        assert_eq!(tables.resources[0].status, "Available");
    }

    #[test]
    fn test_add_keeps_free_form_fields() {
        let mut tables = Tables::default();
        let resource = ResourceEntry {
            name: "Water".to_string(),
            quantity: "two pallets".to_string(),
            status: Some("Reserved".to_string()),
            location: String::new(),
        };
        add(&mut tables, resource).unwrap();

        let stored = &tables.resources[0];
        assert_eq!(stored.quantity, "two pallets");
        assert_eq!(stored.status, "Reserved");
        assert_eq!(stored.location, "");
    }

    #[test]
    fn test_add_requires_name() {
        let mut tables = Tables::default();
        let err = add(&mut tables, entry("")).unwrap_err();
        assert!(err.is_validation());
        assert!(tables.resources.is_empty());
    }

    #[test]
    fn test_add_sequential_ids() {
        let mut tables = Tables::default();
        assert_eq!(add(&mut tables, entry("A")).unwrap(), 1);
        assert_eq!(add(&mut tables, entry("B")).unwrap(), 2);
        assert_eq!(add(&mut tables, entry("C")).unwrap(), 3);
    }

    #[test]
    fn test_add_with_exhausted_ids_appends_nothing() {
        let mut tables = Tables::default();
        add(&mut tables, entry("A")).unwrap();
        tables.resources[0].resource_id = i64::MAX;

        let err = add(&mut tables, entry("B")).unwrap_err();

        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(tables.resources.len(), 1);
    }
}
