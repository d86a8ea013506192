//! Core types for nbgen.
//!
//! Provides the error foundation used throughout the crate:
//! - [`NbgenError`] - enumerated failure modes (parse, resolution, I/O)
//! - [`ErrorContext`] - user-friendly wrapper with suggestions and details
//! - [`user_friendly_error`] - conversion applied at the CLI boundary
//!
//! Every fallible operation in the crate returns a [`Result`] carrying one
//! of these, and fatal conditions surface before any output is written.

pub mod error;

pub use error::{ErrorContext, NbgenError, user_friendly_error};
