//! Step definitions for project completion scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
