//! Shared test utilities for Trailbrake.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`assertions`] - Float and range assertion macros
//! - [`fixtures`] - Pattern fixtures and scripted drivers
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! Only from integration tests under `tests/`. The core crates list this crate
//! as a dev-dependency, so their `#[cfg(test)]` unit tests would see a second
//! copy of their own types.
//!
//! ```rust,ignore
//! use trailbrake_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assertions;
pub mod must;
pub mod prelude;

#[cfg(feature = "fixtures")]
#[cfg_attr(docsrs, doc(cfg(feature = "fixtures")))]
pub mod fixtures;

pub use must::*;
