//! Storage adapters for the user module.

pub mod memory;
