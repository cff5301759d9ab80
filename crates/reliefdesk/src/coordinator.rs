//! Emergency coordinator: creation with volunteer assignment, and status updates
//! with volunteer release.
//!
//! Creating an emergency pairs it with one currently available volunteer,
//! chosen by a [`VolunteerPicker`]. The pairing is recorded on both rows:
//! the volunteer becomes busy with `assigned_emergency_id` pointing at the new
//! emergency, and the emergency keeps `assigned_volunteer_id` for good.
//!
//! Moving an emergency to a terminal status (Resolved or Closed) frees the
//! volunteer it names. Nothing ever re-acquires a volunteer, and emergencies
//! created while nobody was available stay unassigned.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{Emergency, EmergencyStatus, TableName, Tables, Volunteer, VolunteerStatus};

/// Chooses which of several available volunteers takes an emergency.
pub trait VolunteerPicker: fmt::Debug {
    /// Return an index in `0..candidates`. Never called with zero candidates.
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Uniform random choice backed by a `rand` generator.
pub struct RandomPicker<R> {
    rng: R,
}

impl<R> fmt::Debug for RandomPicker<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomPicker").finish_non_exhaustive()
    }
}

impl<R: Rng> RandomPicker<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<StdRng> {
    /// A picker seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl RandomPicker<ChaCha8Rng> {
    /// A reproducible picker.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> VolunteerPicker for RandomPicker<R> {
    fn pick(&mut self, candidates: usize) -> usize {
        self.rng.random_range(0..candidates)
    }
}

/// Details of a reported emergency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyReport {
    /// Reporting user, or 0 when an administrator enters it.
    pub reporter_id: i64,
    /// Category such as Fire, Flood, Accident, Medical or Other (required).
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form description; may be empty.
    pub description: String,
    /// Where it happened (required).
    pub location: String,
    /// Time of day, typically `HH:MM`.
    pub time: String,
    /// Date, typically `YYYY-MM-DD`.
    pub date: String,
}

/// Outcome of creating an emergency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The new emergency.
    pub emergency_id: i64,
    /// Volunteer now serving it, if anyone was available.
    pub volunteer_id: Option<i64>,
}

/// Outcome of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// The updated emergency.
    pub emergency_id: i64,
    /// Status before the update.
    pub previous: EmergencyStatus,
    /// Status after the update.
    pub current: EmergencyStatus,
    /// Volunteer freed by this update, if any.
    pub released_volunteer_id: Option<i64>,
}

/// Record a new emergency and assign it a random available volunteer.
///
/// # Errors
///
/// Returns a validation error if the type or location is empty, or an
/// internal error if the picker answers outside the candidate range. The
/// tables are untouched in both cases.
pub fn create(
    tables: &mut Tables,
    picker: &mut dyn VolunteerPicker,
    report: EmergencyReport,
) -> Result<Assignment> {
    if report.kind.trim().is_empty() {
        return Err(Error::required("type"));
    }
    if report.location.trim().is_empty() {
        return Err(Error::required("location"));
    }

    let emergency_id = tables.next_id::<Emergency>()?;

    let candidates: Vec<i64> = tables
        .select::<Volunteer>(Volunteer::is_available)
        .into_iter()
        .map(|v| v.volunteer_id)
        .collect();

    let volunteer_id = if candidates.is_empty() {
        None
    } else {
        let index = picker.pick(candidates.len());
        let chosen = candidates.get(index).copied().ok_or_else(|| {
            Error::internal(format!(
                "picker chose {index} out of {} candidates",
                candidates.len()
            ))
        })?;
        debug!(
            "Picked volunteer {} out of {} available",
            chosen,
            candidates.len()
        );
        Some(chosen)
    };

    if let Some(id) = volunteer_id {
        let volunteer = tables
            .find_mut::<Volunteer>(id)
            .ok_or_else(|| Error::not_found(TableName::Volunteers, id))?;
        volunteer.status = VolunteerStatus::Busy;
        volunteer.assigned_emergency_id = Some(emergency_id);
    }

    tables.emergencies.push(Emergency {
        emergency_id,
        user_id: report.reporter_id,
        kind: report.kind,
        description: report.description,
        location: report.location,
        time: report.time,
        date: report.date,
        status: EmergencyStatus::Pending,
        assigned_volunteer_id: volunteer_id,
    });

    match volunteer_id {
        Some(volunteer) => info!(
            "Emergency {} assigned to volunteer {}",
            emergency_id, volunteer
        ),
        None => info!(
            "Emergency {} recorded with no volunteer available",
            emergency_id
        ),
    }

    Ok(Assignment {
        emergency_id,
        volunteer_id,
    })
}

/// Overwrite an emergency's status, releasing its volunteer on a terminal status.
///
/// Any status may follow any other. Every terminal update frees the volunteer
/// the emergency names, even one that has since moved on to another
/// emergency. The emergency row keeps its `assigned_volunteer_id`.
///
/// # Errors
///
/// Returns a not-found error, without touching the tables, if no emergency has `emergency_id`.
pub fn update_status(
    tables: &mut Tables,
    emergency_id: i64,
    status: EmergencyStatus,
) -> Result<StatusChange> {
    let emergency = tables
        .find_mut::<Emergency>(emergency_id)
        .ok_or_else(|| Error::not_found(TableName::Emergencies, emergency_id))?;

    let previous = emergency.status;
    emergency.status = status;
    let assigned = emergency.assigned_volunteer_id;

    let released_volunteer_id = match assigned {
        Some(volunteer_id) if status.is_terminal() => release(tables, volunteer_id, emergency_id),
        _ => None,
    };

    info!(
        "Emergency {} status {} -> {}",
        emergency_id, previous, status
    );

    Ok(StatusChange {
        emergency_id,
        previous,
        current: status,
        released_volunteer_id,
    })
}

/// Set `volunteer_id` back to available with no emergency.
fn release(tables: &mut Tables, volunteer_id: i64, emergency_id: i64) -> Option<i64> {
    let Some(volunteer) = tables.find_mut::<Volunteer>(volunteer_id) else {
        warn!(
            "Emergency {} references missing volunteer {}",
            emergency_id, volunteer_id
        );
        return None;
    };

    if let Some(serving) = volunteer.assigned_emergency_id.filter(|&id| id != emergency_id) {
        warn!(
            "Releasing volunteer {} from emergency {} while it serves emergency {}",
            volunteer_id, emergency_id, serving
        );
    }

    volunteer.status = VolunteerStatus::Available;
    volunteer.assigned_emergency_id = None;
    info!("Released volunteer {}", volunteer_id);
    Some(volunteer_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, User};
    use crate::registry::{self, Profile};

    /// Always takes the candidate at a fixed index.
    #[derive(Debug)]
    struct FixedPicker(usize);

    impl VolunteerPicker for FixedPicker {
        fn pick(&mut self, _candidates: usize) -> usize {
            self.0
        }
    }

    /// Fails the test if consulted.
    #[derive(Debug)]
    struct NeverPicker;

    impl VolunteerPicker for NeverPicker {
        fn pick(&mut self, _candidates: usize) -> usize {
            panic!("picker consulted with no available volunteers");
        }
    }

    fn volunteer(id: i64) -> Volunteer {
        Volunteer {
            volunteer_id: id,
            name: format!("Volunteer {id}"),
            email: format!("v{id}@mail.com"),
            phone: "555".to_string(),
            location: "Harbor".to_string(),
            password: "pw".to_string(),
            status: VolunteerStatus::Available,
            assigned_emergency_id: None,
        }
    }

    fn report(reporter_id: i64, kind: &str) -> EmergencyReport {
        EmergencyReport {
            reporter_id,
            kind: kind.to_string(),
            description: "Smoke from the roof".to_string(),
            location: "12 Elm St".to_string(),
            time: "14:05".to_string(),
            date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_create_without_volunteers() {
        let mut tables = Tables::default();

        let assignment = create(&mut tables, &mut NeverPicker, report(5, "Fire")).unwrap();

        assert_eq!(
            assignment,
            Assignment {
                emergency_id: 1,
                volunteer_id: None
            }
        );
        let emergency = &tables.emergencies[0];
        assert_eq!(emergency.emergency_id, 1);
        assert_eq!(emergency.user_id, 5);
        assert_eq!(emergency.kind, "Fire");
        assert_eq!(emergency.status, EmergencyStatus::Pending);
        assert!(emergency.assigned_volunteer_id.is_none());
    }

    #[test]
    fn test_create_assigns_single_available_volunteer() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(7));

        let assignment = create(&mut tables, &mut FixedPicker(0), report(5, "Fire")).unwrap();

        assert_eq!(assignment.emergency_id, 1);
        assert_eq!(assignment.volunteer_id, Some(7));
        let v = tables.find::<Volunteer>(7).unwrap();
        assert_eq!(v.status, VolunteerStatus::Busy);
        assert_eq!(v.assigned_emergency_id, Some(1));
        assert_eq!(tables.emergencies[0].assigned_volunteer_id, Some(7));
    }

    #[test]
    fn test_create_skips_busy_volunteers() {
        let mut tables = Tables::default();
        let mut busy = volunteer(1);
        busy.status = VolunteerStatus::Busy;
        busy.assigned_emergency_id = Some(99);
        tables.volunteers.push(busy);
        tables.volunteers.push(volunteer(2));
        tables.volunteers.push(volunteer(3));

        // Index 1 among the available ones is volunteer 3
        let assignment = create(&mut tables, &mut FixedPicker(1), report(0, "Flood")).unwrap();
        assert_eq!(assignment.volunteer_id, Some(3));

        // Volunteer 1 kept its old assignment
        let v1 = tables.find::<Volunteer>(1).unwrap();
        assert_eq!(v1.assigned_emergency_id, Some(99));
        // Volunteer 2 untouched
        assert!(tables.find::<Volunteer>(2).unwrap().is_available());
    }

    #[test]
    fn test_create_with_all_busy_changes_no_volunteer() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(1));
        create(&mut tables, &mut FixedPicker(0), report(0, "Fire")).unwrap();
        let volunteers_before = tables.volunteers.clone();

        let assignment = create(&mut tables, &mut NeverPicker, report(0, "Medical")).unwrap();

        assert_eq!(assignment.emergency_id, 2);
        assert!(assignment.volunteer_id.is_none());
        assert_eq!(tables.volunteers, volunteers_before);
    }

    #[test]
    fn test_create_requires_type_and_location() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(1));

        let err = create(&mut tables, &mut FixedPicker(0), report(0, "")).unwrap_err();
        assert!(err.to_string().contains("type"));

        let mut no_location = report(0, "Fire");
        no_location.location = " ".to_string();
        let err = create(&mut tables, &mut FixedPicker(0), no_location).unwrap_err();
        assert!(err.to_string().contains("location"));

        assert!(tables.emergencies.is_empty());
        assert!(tables.volunteers[0].is_available());
    }

    #[test]
    fn test_create_allows_empty_description() {
        let mut tables = Tables::default();
        let mut quiet = report(0, "Other");
        quiet.description = String::new();
        assert!(create(&mut tables, &mut NeverPicker, quiet).is_ok());
    }

    #[test]
    fn test_create_out_of_range_pick_leaves_tables_untouched() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(1));
        let before = tables.clone();

        let err = create(&mut tables, &mut FixedPicker(5), report(0, "Fire")).unwrap_err();

        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(tables, before);
    }

    #[test]
    fn test_create_ids_follow_max() {
        let mut tables = Tables::default();
        create(&mut tables, &mut NeverPicker, report(0, "Fire")).unwrap();
        tables.emergencies[0].emergency_id = 40;
        let assignment = create(&mut tables, &mut NeverPicker, report(0, "Fire")).unwrap();
        assert_eq!(assignment.emergency_id, 41);
    }

    #[test]
    fn test_close_releases_volunteer() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(7));
        create(&mut tables, &mut FixedPicker(0), report(5, "Fire")).unwrap();

        let change = update_status(&mut tables, 1, EmergencyStatus::Closed).unwrap();

        assert_eq!(change.previous, EmergencyStatus::Pending);
        assert_eq!(change.current, EmergencyStatus::Closed);
        assert_eq!(change.released_volunteer_id, Some(7));
        let v = tables.find::<Volunteer>(7).unwrap();
        assert_eq!(v.status, VolunteerStatus::Available);
        assert!(v.assigned_emergency_id.is_none());
        // The emergency still remembers who served it
        assert_eq!(tables.emergencies[0].assigned_volunteer_id, Some(7));
        assert_eq!(tables.emergencies[0].status, EmergencyStatus::Closed);
    }

    #[test]
    fn test_resolve_releases_volunteer() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(2));
        create(&mut tables, &mut FixedPicker(0), report(0, "Accident")).unwrap();

        let change = update_status(&mut tables, 1, EmergencyStatus::Resolved).unwrap();
        assert_eq!(change.released_volunteer_id, Some(2));
        assert!(tables.find::<Volunteer>(2).unwrap().is_available());
    }

    #[test]
    fn test_non_terminal_update_leaves_volunteers_alone() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(7));
        create(&mut tables, &mut FixedPicker(0), report(0, "Fire")).unwrap();
        let volunteers_before = tables.volunteers.clone();

        let change = update_status(&mut tables, 1, EmergencyStatus::InProgress).unwrap();
        assert!(change.released_volunteer_id.is_none());
        assert_eq!(tables.volunteers, volunteers_before);

        update_status(&mut tables, 1, EmergencyStatus::Pending).unwrap();
        assert_eq!(tables.volunteers, volunteers_before);
    }

    #[test]
    fn test_reopen_does_not_reacquire() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(7));
        create(&mut tables, &mut FixedPicker(0), report(0, "Fire")).unwrap();
        update_status(&mut tables, 1, EmergencyStatus::Resolved).unwrap();

        update_status(&mut tables, 1, EmergencyStatus::Pending).unwrap();

        let v = tables.find::<Volunteer>(7).unwrap();
        assert!(v.is_available());
        assert!(v.assigned_emergency_id.is_none());
        assert_eq!(tables.emergencies[0].status, EmergencyStatus::Pending);
    }

    #[test]
    fn test_repeat_terminal_update_releases_named_volunteer() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(7));
        create(&mut tables, &mut FixedPicker(0), report(0, "Fire")).unwrap();
        update_status(&mut tables, 1, EmergencyStatus::Resolved).unwrap();
        // Volunteer 7 moves on to emergency 2
        create(&mut tables, &mut FixedPicker(0), report(0, "Flood")).unwrap();
        assert_eq!(
            tables.find::<Volunteer>(7).unwrap().assigned_emergency_id,
            Some(2)
        );

        let change = update_status(&mut tables, 1, EmergencyStatus::Closed).unwrap();

        assert_eq!(change.released_volunteer_id, Some(7));
        let v = tables.find::<Volunteer>(7).unwrap();
        assert_eq!(v.status, VolunteerStatus::Available);
        assert!(v.assigned_emergency_id.is_none());
        // Emergency 2 still names volunteer 7
        assert_eq!(tables.emergencies[1].assigned_volunteer_id, Some(7));
    }

    #[test]
    fn test_terminal_update_with_missing_volunteer() {
        let mut tables = Tables::default();
        tables.volunteers.push(volunteer(7));
        create(&mut tables, &mut FixedPicker(0), report(0, "Fire")).unwrap();
        tables.volunteers.clear();

        let change = update_status(&mut tables, 1, EmergencyStatus::Closed).unwrap();

        assert!(change.released_volunteer_id.is_none());
        assert_eq!(tables.emergencies[0].status, EmergencyStatus::Closed);
    }

    #[test]
    fn test_update_unassigned_emergency() {
        let mut tables = Tables::default();
        create(&mut tables, &mut NeverPicker, report(0, "Fire")).unwrap();
        let change = update_status(&mut tables, 1, EmergencyStatus::Closed).unwrap();
        assert!(change.released_volunteer_id.is_none());
    }

    #[test]
    fn test_update_missing_emergency() {
        let mut tables = Tables::default();
        let err = update_status(&mut tables, 3, EmergencyStatus::Closed).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(tables, Tables::default());
    }

    #[test]
    fn test_reporter_is_not_validated() {
        let mut tables = Tables::default();
        registry::register(
            &mut tables,
            Role::User,
            Profile {
                name: "Ana".to_string(),
                email: "ana@mail.com".to_string(),
                phone: "1".to_string(),
                location: "Here".to_string(),
                password: "pw".to_string(),
            },
        )
        .unwrap();
        assert!(tables.find::<User>(12).is_none());
        let assignment = create(&mut tables, &mut NeverPicker, report(12, "Other")).unwrap();
        assert_eq!(tables.emergencies[0].user_id, 12);
        assert_eq!(assignment.emergency_id, 1);
    }

    #[test]
    fn test_random_picker_stays_in_range() {
        let mut picker = RandomPicker::seeded(7);
        for candidates in 1..20 {
            for _ in 0..50 {
                assert!(picker.pick(candidates) < candidates);
            }
        }
        assert_eq!(picker.pick(1), 0);
    }

    #[test]
    fn test_random_picker_is_roughly_uniform() {
        let mut picker = RandomPicker::seeded(2024);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            counts[picker.pick(3)] += 1;
        }
        for count in counts {
            assert!((800..=1200).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn test_seeded_pickers_repeat() {
        let mut a = RandomPicker::seeded(11);
        let mut b = RandomPicker::seeded(11);
        let picks_a: Vec<usize> = (0..20).map(|_| a.pick(10)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.pick(10)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_random_assignment_is_one_of_the_available() {
        let mut tables = Tables::default();
        for id in 1..=5 {
            tables.volunteers.push(volunteer(id));
        }
        let mut picker = RandomPicker::from_os_rng();

        let assignment = create(&mut tables, &mut picker, report(0, "Fire")).unwrap();

        let chosen = assignment.volunteer_id.unwrap();
        assert!((1..=5).contains(&chosen));
        let busy: Vec<_> = tables.select::<Volunteer>(|v| !v.is_available());
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].volunteer_id, chosen);
    }

    #[test]
    fn test_random_picker_debug() {
        let picker = RandomPicker::seeded(1);
        assert!(format!("{picker:?}").contains("RandomPicker"));
    }
}
