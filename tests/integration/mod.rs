//! Integration test suite for pixel-motion
//!
//! End-to-end tests that run the real binary against a registry served by a
//! local axum server. Package managers are replaced by shell scripts on an
//! isolated `PATH` (unix only), so no real `npm` is ever invoked.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **add**: Resolution, file installation, overwrite policy, dependency install
//! - **init**: Project configuration creation
//! - **list**: Registry listing in table and JSON form

#[path = "../common/mod.rs"]
mod common;

mod list;
