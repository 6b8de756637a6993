//! Public API test suites.

#[path = "api/mod.rs"]
mod api;
