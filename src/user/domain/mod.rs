//! Domain model for users, their board sets, and caller identities.

mod error;
mod identity;
mod ids;
mod user;

pub use error::{AccessError, UserDomainError};
pub use identity::Identity;
pub use ids::{Email, ExternalId, MAX_EMAIL_LENGTH, MAX_EXTERNAL_ID_LENGTH, UserId};
pub use user::{PersistedUserData, User};
