//! Application services for user account orchestration.

mod account;

pub use account::{RegisterUserRequest, UserAccountError, UserAccountResult, UserAccountService};
