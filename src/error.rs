use std::path::PathBuf;
use thiserror::Error;

/// Exit codes, one per failure family
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_ARGUMENT: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;
pub const EXIT_CONFIG: i32 = 4;
pub const EXIT_GIT: i32 = 5;
pub const EXIT_IO: i32 = 6;

#[derive(Error, Debug)]
pub enum GhopperError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Config file at {} is corrupt: {reason}", .path.display())]
    ConfigCorrupt { path: PathBuf, reason: String },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No git context: {0}")]
    NoGitContext(String),

    #[error("HEAD is detached; pass the branch explicitly")]
    DetachedHead,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GhopperError {
    pub fn alias_not_found(alias: &str) -> Self {
        GhopperError::NotFound(format!("Alias '{}'", alias))
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        GhopperError::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GhopperError::NotFound(_) => EXIT_NOT_FOUND,
            GhopperError::ConfigCorrupt { .. } => EXIT_CONFIG,
            GhopperError::Io { .. } => EXIT_IO,
            GhopperError::NoGitContext(_) | GhopperError::DetachedHead => EXIT_GIT,
            GhopperError::InvalidArgument(_) => EXIT_INVALID_ARGUMENT,
        }
    }
}

/// Map any error bubbled up to `main` to an exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<GhopperError>())
        .map(GhopperError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
