//! Unified error types for vaultview.
//!
//! Only the edges of the crate return errors: loading snapshots, reading and
//! writing the expansion state file, and configuration. A render pass never
//! fails; it degrades to a partial render instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vaultview operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum VaultError {
    /// Errors while reading an inventory snapshot
    #[error("Failed to load snapshot: {context}")]
    Snapshot {
        context: String,
        #[source]
        source: SnapshotErrorKind,
    },

    /// Errors while loading or saving persisted expansion state
    #[error("Expansion state error: {context}")]
    State {
        context: String,
        #[source]
        source: StateErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific snapshot error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnapshotErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Unsupported snapshot version: {version} (supported: {supported})")]
    UnsupportedVersion { version: u32, supported: u32 },

    #[error("Duplicate {kind} entity {id} for owner '{owner}'")]
    DuplicateEntity { kind: String, id: u64, owner: String },

    #[error("Duplicate character key: {0}")]
    DuplicateCharacter(String),
}

/// Specific expansion-state error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StateErrorKind {
    #[error("Malformed state file: {0}")]
    Malformed(String),

    #[error("No writable state location available")]
    NoLocation,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for vaultview operations
pub type Result<T> = std::result::Result<T, VaultError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl VaultError {
    /// Create a snapshot error with context
    pub fn snapshot(context: impl Into<String>, source: SnapshotErrorKind) -> Self {
        Self::Snapshot {
            context: context.into(),
            source,
        }
    }

    /// Create a state error with context
    pub fn state(context: impl Into<String>, source: StateErrorKind) -> Self {
        Self::State {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::snapshot(
            "JSON deserialization",
            SnapshotErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// ```ignore
/// use vaultview::error::ErrorContext;
///
/// let text = std::fs::read_to_string(path).context("reading snapshot file")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error, chained in front of any existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<VaultError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: VaultError, new_ctx: &str) -> VaultError {
    match err {
        VaultError::Snapshot {
            context: existing,
            source,
        } => VaultError::Snapshot {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VaultError::State {
            context: existing,
            source,
        } => VaultError::State {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VaultError::Io {
            path,
            message,
            source,
        } => VaultError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        VaultError::Config(msg) => VaultError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
