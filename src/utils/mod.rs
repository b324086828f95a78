//! Filesystem and repository helpers

pub mod fs;
pub mod repo;

pub use fs::{format_size, is_binary, to_forward_slashes};
pub use repo::find_repository_root;
