use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Failed to read directory {path}: {source}")]
    DirRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // The two tree-tool variants are recoverable: `tree::Fallback` swallows them.
    #[error("Could not run `{program}`: {source}")]
    TreeSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}")]
    TreeStatus { program: String, status: ExitStatus },
}

impl AppError {
    /// True for failures that only mean "use another tree renderer".
    pub fn is_tree_tool(&self) -> bool {
        matches!(self, AppError::TreeSpawn { .. } | AppError::TreeStatus { .. })
    }
}
