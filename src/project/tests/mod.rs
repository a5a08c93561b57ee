//! Unit tests for the project context.

mod task_query_tests;
