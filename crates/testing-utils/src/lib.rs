//! # Console Testing Utils
//!
//! Shared testing utilities for the scheduler console workspace.
//! Provides a scriptable mock transport, snapshot builders, and small
//! async helpers used across the other crates' test suites.
//!
//! Add this crate as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! console-testing-utils = { path = "../testing-utils" }
//! ```

pub mod builders;
pub mod helpers;
pub mod mocks;

pub use builders::*;
pub use helpers::*;
pub use mocks::*;
