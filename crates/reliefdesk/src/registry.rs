//! Identity registry: account registration and login.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Admin, Role, Tables, User, Volunteer, VolunteerStatus};

/// Details collected when someone registers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Location.
    pub location: String,
    /// Login password.
    pub password: String,
}

impl Profile {
    /// Check that every field is filled in, in entry order.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("location", &self.location),
            ("password", &self.password),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(Error::required(*field)),
            None => Ok(()),
        }
    }
}

/// Register a user or volunteer and return the new id.
///
/// Volunteers start out available with no assignment.
///
/// # Errors
///
/// Returns a validation error, without touching the tables, if a field is
/// empty or `role` is [`Role::Admin`].
pub fn register(tables: &mut Tables, role: Role, profile: Profile) -> Result<i64> {
    profile.validate()?;

    let Profile {
        name,
        email,
        phone,
        location,
        password,
    } = profile;

    let id = match role {
        Role::Admin => {
            return Err(Error::validation(
                "role",
                "administrators cannot be registered",
            ))
        }
        Role::User => {
            let user_id = tables.next_id::<User>()?;
            tables.users.push(User {
                user_id,
                name,
                email,
                phone,
                location,
                password,
            });
            user_id
        }
        Role::Volunteer => {
            let volunteer_id = tables.next_id::<Volunteer>()?;
            tables.volunteers.push(Volunteer {
                volunteer_id,
                name,
                email,
                phone,
                location,
                password,
                status: VolunteerStatus::Available,
                assigned_emergency_id: None,
            });
            volunteer_id
        }
    };

    info!("Registered {} with id {}", role, id);
    Ok(id)
}

/// Find the first account of `role` whose email and password both match exactly.
#[must_use]
pub fn authenticate(tables: &Tables, role: Role, email: &str, password: &str) -> Option<i64> {
    let id = match role {
        Role::Admin => tables
            .admins
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| a.admin_id),
        Role::User => tables
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(|u| u.user_id),
        Role::Volunteer => tables
            .volunteers
            .iter()
            .find(|v| v.email == email && v.password == password)
            .map(|v| v.volunteer_id),
    };

    match id {
        Some(id) => debug!("Authenticated {} {}", role, id),
        None => debug!("No {} matched the supplied credentials", role),
    }
    id
}

/// Name of the account with the given role and id.
#[must_use]
pub fn display_name(tables: &Tables, role: Role, id: i64) -> Option<&str> {
    match role {
        Role::Admin => tables.find::<Admin>(id).map(|a| a.name.as_str()),
        Role::User => tables.find::<User>(id).map(|u| u.name.as_str()),
        Role::Volunteer => tables.find::<Volunteer>(id).map(|v| v.name.as_str()),
    }
}
