//! Error types and definitions for Flattener
//!
//! The variants follow the taxonomy the selection engine recovers from: input
//! errors abort the run, manifest and parse errors degrade to warnings,
//! filesystem errors during traversal count as skipped files and search errors
//! abort a single file's dependency expansion.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for Flattener operations
#[derive(Debug, Error)]
pub enum FlattenError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// YAML parsing errors with file context
    #[error("YAML parsing error in {file}: {source}")]
    YamlParse {
        file: PathBuf,
        #[source]
        source: serde_yaml::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Path does not exist
    #[error("Invalid path: {path}")]
    InvalidPath {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Path exists but is neither a regular file nor a directory
    #[error("Not a file or directory: {path}")]
    NotFileOrDirectory {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// No repository root could be located
    #[error("Not a repository: {path}")]
    NotARepository {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Workspace manifest present but structurally invalid
    #[error("Invalid workspace manifest {path}: {message}")]
    WorkspaceManifest {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Invalid package.json structure
    #[error("Invalid package.json structure in {path}: {message}")]
    InvalidPackageJson {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Source file could not be parsed for import/export analysis
    #[error("Syntax errors in {}: {}", path.display(), messages.join("; "))]
    Parse {
        path: PathBuf,
        messages: Vec<String>,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A file that passed the filters could not be read
    #[error("Error reading {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// The whole-word symbol search itself failed
    #[error("Symbol search for '{symbol}' in {path} failed: {message}")]
    ResolutionSearch {
        symbol: String,
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Selection errors wrapping a lower-level failure with context
    #[error("Selection error: {message}")]
    Selection {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Workspace index artifact could not be written
    #[error("Workspace index error for {path}: {message}")]
    IndexCache {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },
}

impl FlattenError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Recovered locally: fallback discovery, skipped package or skipped file
            FlattenError::PermissionDenied { .. } => ErrorSeverity::Warning,
            FlattenError::JsonParse { .. } => ErrorSeverity::Warning,
            FlattenError::YamlParse { .. } => ErrorSeverity::Warning,
            FlattenError::WorkspaceManifest { .. } => ErrorSeverity::Warning,
            FlattenError::InvalidPackageJson { .. } => ErrorSeverity::Warning,
            FlattenError::Parse { .. } => ErrorSeverity::Warning,
            FlattenError::FileRead { .. } => ErrorSeverity::Warning,
            FlattenError::DirectoryTraversal { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            FlattenError::Config { .. } => ErrorSeverity::Critical,
            FlattenError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            FlattenError::ConfigRead { .. } => ErrorSeverity::Critical,
            FlattenError::ConfigParse { .. } => ErrorSeverity::Critical,
            FlattenError::InvalidPath { .. } => ErrorSeverity::Critical,
            FlattenError::NotFileOrDirectory { .. } => ErrorSeverity::Critical,
            FlattenError::NotARepository { .. } => ErrorSeverity::Critical,
            FlattenError::OutputWrite { .. } => ErrorSeverity::Critical,
            FlattenError::StdoutWrite { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FlattenError::PermissionDenied { path, .. } => {
                format!("Cannot access '{}' due to permission denied.", path.display())
            }
            FlattenError::JsonParse { file, source, .. } => {
                format!("Invalid JSON in '{}': {}.", file.display(), source)
            }
            FlattenError::Io { source, .. } => {
                format!("File system error: {}.", source)
            }
            FlattenError::InvalidPath { path, .. } => {
                format!("Path not found: '{}'.", path.display())
            }
            FlattenError::NotFileOrDirectory { path, .. } => {
                format!("'{}' is neither a regular file nor a directory.", path.display())
            }
            FlattenError::NotARepository { path, .. } => {
                format!("No repository found at or above '{}'.", path.display())
            }
            FlattenError::ConfigNotFound { path, .. } => {
                format!("Configuration file not found at '{}'.", path.display())
            }
            FlattenError::InvalidPackageJson { path, message, .. } => {
                format!("Invalid package.json in '{}': {}. Skipping package.", path.display(), message)
            }
            FlattenError::WorkspaceManifest { path, message, .. } => {
                format!("Invalid workspace manifest '{}': {}. Scanning the repository instead.", path.display(), message)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Get a contextual hint for fatal errors
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FlattenError::InvalidPath { .. } => {
                Some("path not found: check that the path exists and is spelled correctly")
            }
            FlattenError::NotFileOrDirectory { .. } => {
                Some("only regular files and directories can be flattened")
            }
            FlattenError::NotARepository { .. } => {
                Some("not a repository: run inside a git checkout or pass --root")
            }
            FlattenError::ConfigNotFound { .. } => {
                Some("create a .flattener.toml with --init or pass --config")
            }
            FlattenError::PermissionDenied { .. } => {
                Some("check file permissions")
            }
            FlattenError::OutputWrite { .. } => {
                Some("check that the output directory exists and is writable")
            }
            _ => None,
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        FlattenError::Io {
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        FlattenError::JsonParse {
            file: file.into(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a YAML parse error with file context
    pub fn yaml_parse_error(file: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        FlattenError::YamlParse {
            file: file.into(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        FlattenError::Config {
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        FlattenError::PermissionDenied {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        FlattenError::InvalidPath {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an error for paths that are neither files nor directories
    pub fn not_file_or_directory(path: impl Into<PathBuf>) -> Self {
        FlattenError::NotFileOrDirectory {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a missing repository error
    pub fn not_a_repository(path: impl Into<PathBuf>) -> Self {
        FlattenError::NotARepository {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a workspace manifest error
    pub fn workspace_manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FlattenError::WorkspaceManifest {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an invalid package.json error
    pub fn invalid_package_json(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FlattenError::InvalidPackageJson {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a source parse error
    pub fn parse_error(path: impl Into<PathBuf>, messages: Vec<String>) -> Self {
        FlattenError::Parse {
            path: path.into(),
            messages,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return FlattenError::permission_denied(path);
        }
        FlattenError::FileRead {
            path,
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FlattenError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a symbol search error
    pub fn resolution_search(
        symbol: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        FlattenError::ResolutionSearch {
            symbol: symbol.into(),
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a workspace index error
    pub fn index_cache(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FlattenError::IndexCache {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create an output write error
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FlattenError::OutputWrite {
            path: path.into(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for FlattenError {
    fn from(err: std::io::Error) -> Self {
        FlattenError::io_error(err)
    }
}

impl From<glob::PatternError> for FlattenError {
    fn from(err: glob::PatternError) -> Self {
        FlattenError::GlobPattern {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl From<serde_json::Error> for FlattenError {
    fn from(err: serde_json::Error) -> Self {
        FlattenError::JsonSerialize {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

/// Result type alias for Flattener operations
pub type Result<T> = std::result::Result<T, FlattenError>;
