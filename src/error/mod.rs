//! Error handling for Flattener
//!
//! This module provides the error taxonomy used across the selection engine,
//! including error types, result aliases, and error context utilities.

pub mod context;
pub mod types;

pub use context::{OptionExt, ResultExt, handle_error, try_with_recovery};
pub use types::{ErrorSeverity, FlattenError, Result};
