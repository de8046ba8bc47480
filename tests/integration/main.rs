//! Integration tests for the analyzer
//!
//! These tests use wiremock to serve pages and drive full analyses
//! end-to-end.

mod analyze_tests;
mod cache_tests;
