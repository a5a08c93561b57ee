//! User account management for TaskFlow.
//!
//! Users register with a unique username and email, own projects, and may be
//! assigned tasks. Deactivation is refused while the user still owns an
//! active project. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
