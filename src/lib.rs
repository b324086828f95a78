//! Flattener - concatenate a repository into a single text file
//!
//! This library walks a repository (or selected workspace packages, or explicit
//! files) and assembles every admitted text file into one document. Explicit
//! JavaScript/TypeScript files can be expanded with the workspace files that
//! define the symbols they import.

#![feature(error_generic_member_access)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use core::flattener::{Flattener, RunReport};
pub use error::{handle_error, try_with_recovery, ErrorSeverity, FlattenError, OptionExt, Result, ResultExt};
pub use models::{
    config::Settings,
    selection::{SelectionMode, SelectionPolicy, SelectionResult},
    workspace::WorkspacePackage,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
