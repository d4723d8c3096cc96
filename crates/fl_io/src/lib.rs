//! crates/fl_io/src/lib.rs
//! File I/O for one league season.
//!
//! - `layout`: where every document of a season lives under the root directory
//! - `loader`: typed loading of season info, result tables, team sheets and checks
//! - `canonical_json`: canonical bytes for hashing, pretty atomic writes for outputs
//! - `hasher`: SHA-256 digests (lowercase hex)
//! - `run_record`: input digest of the last scoring run
//!
//! No network I/O; all paths are local.

#![forbid(unsafe_code)]

use std::path::Path;

use thiserror::Error;

/// Unified error for fl_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, fsync, ...).
    #[error("io error at {path}: {msg}")]
    Path { path: String, msg: String },

    /// A required document does not exist.
    #[error("missing {what}: {path}")]
    Missing { what: &'static str, path: String },

    /// JSON syntax or shape errors.
    #[error("json error in {path}: {msg}")]
    Json { path: String, msg: String },

    /// Parsed fine but violates a domain rule.
    #[error("invalid {path}: {msg}")]
    Invalid { path: String, msg: String },
}

pub type IoResult<T> = Result<T, IoError>;

impl IoError {
    pub(crate) fn path(path: &Path, e: impl ToString) -> Self {
        IoError::Path { path: path.display().to_string(), msg: e.to_string() }
    }

    pub(crate) fn json(path: &Path, e: impl ToString) -> Self {
        IoError::Json { path: path.display().to_string(), msg: e.to_string() }
    }

    pub(crate) fn invalid(path: &Path, msg: impl Into<String>) -> Self {
        IoError::Invalid { path: path.display().to_string(), msg: msg.into() }
    }
}

pub mod layout;
pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod run_record;

