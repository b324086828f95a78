//! Core functionality for package discovery, dependency resolution and file selection

pub mod assembler;
pub mod flattener;
pub mod registry;
pub mod resolver;
pub mod traversal;

pub use assembler::{AssembledOutput, OutputAssembler};
pub use flattener::{Flattener, RunReport};
pub use registry::{DiscoveryOptions, WorkspaceRegistry};
pub use resolver::{DependencyResolver, ResolverConfig};
pub use traversal::Traversal;
