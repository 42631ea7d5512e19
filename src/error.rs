use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("required setting `{field}` is not set")]
    MissingConfiguration { field: &'static str },

    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create instrumenter: {0}")]
    InstrumenterInit(String),

    #[error("failed to instrument {}: {reason}", artifact.display())]
    Instrumentation { artifact: PathBuf, reason: String },
}

impl TaskError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        TaskError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
