//! Unit tests for the user context.

mod repository_tests;
