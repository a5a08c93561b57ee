//! In-memory user storage.

mod user;

pub use user::InMemoryUserRepository;
