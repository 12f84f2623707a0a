use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    // Stream fetch
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("symlink loop: {}", .0.display())]
    SymlinkLoop(PathBuf),

    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("target producer panicked")]
    ProducerPanicked,

    // Runtime
    #[error("failed to spawn target producer")]
    ThreadSpawn(#[source] std::io::Error),

    // Third-party listers
    #[error("listing failed: {0}")]
    Listing(String),

    // Ordering contract
    #[error("query `{key}` arrived after `{previous}`")]
    OutOfOrderQuery { previous: String, key: String },

    #[error("target stream yielded `{key}` after `{previous}`")]
    UnsortedTarget { previous: String, key: String },

    // Config
    #[error("no target provided")]
    MissingTarget,
}

impl DiffError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::SymlinkLoop(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Whether this error came from pulling the target stream.
    ///
    /// Fetch errors leave the session untouched: the caller may retry the same
    /// query, which resumes pulling from where the stream stopped. Everything
    /// else is a broken ordering contract or a configuration mistake.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied(_)
                | Self::NotFound(_)
                | Self::SymlinkLoop(_)
                | Self::Io { .. }
                | Self::ProducerPanicked
                | Self::Listing(_)
        )
    }
}
