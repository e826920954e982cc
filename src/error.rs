use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("column {column} is past the end of a line of length {len}")]
    InvalidPosition { column: usize, len: usize },
    #[error("cannot remove {count} characters before column {column}")]
    InvalidRange { column: usize, count: usize },
    #[error("row {row} is out of range for a buffer of {count} lines")]
    InvalidLine { row: usize, count: usize },
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("{} is a directory", .0.display())]
    TargetIsDirectory(PathBuf),
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
