use {
    std::{io, path::PathBuf},
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum HandlerError {
    /// Mount path is missing, usually means the function was deployed without a volume attached.
    #[error("EFS volume not mounted at {}", .path.display())]
    MountNotPresent {
        path: PathBuf,
    },

    #[error("failed to read counter file: {0}")]
    FailedToReadCounter(io::Error),

    /// Counter file contains something other than a non-negative integer.
    #[error("invalid counter value {value:?}: {reason}")]
    InvalidCounterValue {
        value: String,
        reason: String,
    },

    #[error("failed to create directory for counter file: {0}")]
    FailedToCreateDirectory(io::Error),

    #[error("failed to write counter file: {0}")]
    FailedToWriteCounter(io::Error),

    #[error("failed to append to execution log: {0}")]
    FailedToAppendLog(io::Error),

    #[error("failed to read file metadata: {0}")]
    FailedToReadMetadata(io::Error),
}
