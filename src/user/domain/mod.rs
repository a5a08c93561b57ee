//! Domain model for user accounts.
//!
//! Validated value types (username, email, password) guard every field of
//! the [`User`] aggregate, and lifecycle rules that depend on owned projects
//! receive those projects as explicit arguments.

mod email;
mod error;
mod password;
mod status;
mod user;
mod username;

pub use email::Email;
pub use error::{ParseUserStatusError, UserDomainError};
pub use password::Password;
pub use status::UserStatus;
pub use user::{PersistedUserData, User};
pub use username::Username;

crate::id::uuid_identifier! {
    /// Unique identifier for a user account.
    pub struct UserId;
}
