//! Data models and structures for Flattener

pub mod config;
pub mod module_info;
pub mod selection;
pub mod workspace;

pub use config::{OutputFormat, PartialSettings, Settings};
pub use module_info::{ExportSet, FileType, ImportKind, ImportReference};
pub use selection::{SelectionMode, SelectionPolicy, SelectionResult, TraversalEntry};
pub use workspace::{WorkspaceIndexEntry, WorkspacePackage};
