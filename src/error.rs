use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Cannot {action} '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No file selected for deletion!")]
    NoFileSelected,
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("'{}' is a directory", .0.display())]
    IsADirectory(PathBuf),
}

impl ExplorerError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Warnings are user mistakes rather than filesystem failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoFileSelected)
    }
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Choose an answer first!")]
    NoSelection,
    #[error("question set is empty")]
    EmptyQuestionSet,
    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
    #[error("cannot load questions from '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },
}
