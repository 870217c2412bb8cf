//! Core types shared by every qxs component.
//!
//! - [`QxsError`] and [`ErrorKind`] form the single error family of the crate.
//! - [`ErrorContext`] and [`user_friendly_error`] render errors for the CLI.

pub mod error;

pub use error::{ErrorContext, ErrorKind, QxsError, Result, user_friendly_error};
