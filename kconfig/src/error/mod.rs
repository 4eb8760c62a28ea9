use std::path::PathBuf;

use thiserror::Error;

use crate::grammar::{Keyword, ScopeKind};

pub type KconfigResult<T> = Result<T, KconfigError>;

#[derive(Error, Debug)]
pub enum KconfigError {
    #[error("cannot open {}: {source}", .path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}:{line}: unexpected `{keyword}` inside {scope}")]
    UnexpectedTerminator {
        keyword: Keyword,
        scope: ScopeKind,
        file: String,
        line: usize,
    },

    #[error("undefined variable $({0})")]
    UndefinedVariable(String),

    #[error("{file}:{line}: a line is already pushed back")]
    LookaheadOccupied { file: String, line: usize },

    #[error("Failed to parse config snapshot: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Helper macro to create a `KconfigError::Snapshot`
#[macro_export]
macro_rules! snapshot_error {
    ( $($arg:tt)* ) => {
        $crate::error::KconfigError::Snapshot(format!($($arg)*))
    };
}
