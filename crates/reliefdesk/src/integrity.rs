//! Consistency audit over the volunteer/emergency pairing.
//!
//! A volunteer is busy exactly when it points at an open emergency that points
//! back at it. [`audit`] reports every row that breaks this, plus duplicate
//! keys, without changing anything.
//!
//! Open emergencies that nobody serves are reported as well: ones created while
//! no volunteer was available, and ones reopened after their volunteer was
//! released. Nothing reassigns those automatically.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::model::{Emergency, Record, TableName, Tables, Volunteer, VolunteerStatus};

/// One broken invariant found by [`audit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inconsistency {
    /// A busy volunteer with no emergency recorded.
    BusyWithoutEmergency {
        /// The volunteer.
        volunteer_id: i64,
    },
    /// A volunteer points at an emergency that does not exist.
    MissingEmergency {
        /// The volunteer.
        volunteer_id: i64,
        /// The dangling reference.
        emergency_id: i64,
    },
    /// A volunteer points at an emergency assigned to someone else (or nobody).
    NotPaired {
        /// The volunteer.
        volunteer_id: i64,
        /// The emergency it points at.
        emergency_id: i64,
        /// Who the emergency names instead.
        assigned_volunteer_id: Option<i64>,
    },
    /// A volunteer is still held by a resolved or closed emergency.
    HeldByTerminalEmergency {
        /// The volunteer.
        volunteer_id: i64,
        /// The finished emergency.
        emergency_id: i64,
    },
    /// An available volunteer still carries an emergency id.
    AvailableButAssigned {
        /// The volunteer.
        volunteer_id: i64,
        /// The leftover reference.
        emergency_id: i64,
    },
    /// An open emergency with no volunteer.
    Unassigned {
        /// The emergency.
        emergency_id: i64,
    },
    /// An open emergency names a volunteer that does not point back at it.
    VolunteerNotHeld {
        /// The emergency.
        emergency_id: i64,
        /// The volunteer it names.
        volunteer_id: i64,
    },
    /// Two rows of one table share a key.
    DuplicateId {
        /// The table.
        table: TableName,
        /// The repeated key.
        id: i64,
    },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusyWithoutEmergency { volunteer_id } => {
                write!(f, "volunteer {volunteer_id} is busy without an emergency")
            }
            Self::MissingEmergency {
                volunteer_id,
                emergency_id,
            } => write!(
                f,
                "volunteer {volunteer_id} references missing emergency {emergency_id}"
            ),
            Self::NotPaired {
                volunteer_id,
                emergency_id,
                assigned_volunteer_id,
            } => match assigned_volunteer_id {
                Some(other) => write!(
                    f,
                    "volunteer {volunteer_id} serves emergency {emergency_id}, which names volunteer {other}"
                ),
                None => write!(
                    f,
                    "volunteer {volunteer_id} serves emergency {emergency_id}, which names no volunteer"
                ),
            },
            Self::HeldByTerminalEmergency {
                volunteer_id,
                emergency_id,
            } => write!(
                f,
                "volunteer {volunteer_id} is still held by finished emergency {emergency_id}"
            ),
            Self::AvailableButAssigned {
                volunteer_id,
                emergency_id,
            } => write!(
                f,
                "volunteer {volunteer_id} is available but still references emergency {emergency_id}"
            ),
            Self::Unassigned { emergency_id } => {
                write!(f, "open emergency {emergency_id} has no volunteer")
            }
            Self::VolunteerNotHeld {
                emergency_id,
                volunteer_id,
            } => write!(
                f,
                "open emergency {emergency_id} names volunteer {volunteer_id}, who is not serving it"
            ),
            Self::DuplicateId { table, id } => write!(f, "{table} has more than one row with id {id}"),
        }
    }
}

/// Check every table for broken pairings, unserved open emergencies and duplicate keys.
#[must_use]
pub fn audit(tables: &Tables) -> Vec<Inconsistency> {
    let mut issues = Vec::new();

    duplicate_ids(&tables.admins, &mut issues);
    duplicate_ids(&tables.users, &mut issues);
    duplicate_ids(&tables.volunteers, &mut issues);
    duplicate_ids(&tables.emergencies, &mut issues);
    duplicate_ids(&tables.resources, &mut issues);

    for volunteer in &tables.volunteers {
        if let Some(issue) = check_volunteer(tables, volunteer) {
            issues.push(issue);
        }
    }

    for emergency in &tables.emergencies {
        if let Some(issue) = check_emergency(tables, emergency) {
            issues.push(issue);
        }
    }

    issues
}

fn duplicate_ids<R: Record>(rows: &[R], issues: &mut Vec<Inconsistency>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for row in rows {
        let id = row.id();
        if !seen.insert(id) && reported.insert(id) {
            issues.push(Inconsistency::DuplicateId {
                table: R::TABLE,
                id,
            });
        }
    }
}

fn check_volunteer(tables: &Tables, volunteer: &Volunteer) -> Option<Inconsistency> {
    let volunteer_id = volunteer.volunteer_id;

    match (volunteer.status, volunteer.assigned_emergency_id) {
        (VolunteerStatus::Available, None) => None,
        (VolunteerStatus::Available, Some(emergency_id)) => {
            Some(Inconsistency::AvailableButAssigned {
                volunteer_id,
                emergency_id,
            })
        }
        (VolunteerStatus::Busy, None) => Some(Inconsistency::BusyWithoutEmergency { volunteer_id }),
        (VolunteerStatus::Busy, Some(emergency_id)) => {
            let Some(emergency) = tables.find::<Emergency>(emergency_id) else {
                return Some(Inconsistency::MissingEmergency {
                    volunteer_id,
                    emergency_id,
                });
            };
            if emergency.assigned_volunteer_id != Some(volunteer_id) {
                Some(Inconsistency::NotPaired {
                    volunteer_id,
                    emergency_id,
                    assigned_volunteer_id: emergency.assigned_volunteer_id,
                })
            } else if emergency.status.is_terminal() {
                Some(Inconsistency::HeldByTerminalEmergency {
                    volunteer_id,
                    emergency_id,
                })
            } else {
                None
            }
        }
    }
}

fn check_emergency(tables: &Tables, emergency: &Emergency) -> Option<Inconsistency> {
    if emergency.status.is_terminal() {
        return None;
    }
    let emergency_id = emergency.emergency_id;

    let Some(volunteer_id) = emergency.assigned_volunteer_id else {
        return Some(Inconsistency::Unassigned { emergency_id });
    };

    let held = tables
        .find::<Volunteer>(volunteer_id)
        .is_some_and(|v| v.assigned_emergency_id == Some(emergency_id));
    (!held).then_some(Inconsistency::VolunteerNotHeld {
        emergency_id,
        volunteer_id,
    })
}
