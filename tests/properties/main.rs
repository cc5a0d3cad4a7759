//! Property test suite entry point.

mod determinism_tests;
mod shortlist_tests;
