//! Storage adapters for the project module.

pub mod memory;
