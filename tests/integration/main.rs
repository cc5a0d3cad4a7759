//! Integration test suite entry point.

mod advisor_tests;
mod gemini_http_tests;
