//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Logger setup so `RUST_LOG=debug` shows library output
//! - Hand-assembled runtime bytecode and artifact directories
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::*;
//!
//! fn test_versioned_contract() {
//!     common::init_logger();
//!     let code = version_returning([1, 2, 3, 4]);
//! }
//! ```

pub mod fixtures;

/// Initialize env_logger once per test binary
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
