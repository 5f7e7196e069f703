//! Helpers for testing the HTTP health check.
//!
//! It provides a [`stub_server::StubServer`] that can be used as the target of
//! a health check.
pub mod stub_server;
