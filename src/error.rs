//! Harness-specific error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to launch process '{tag}': {source}")]
    Launch {
        tag: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process '{tag}' exited with code {code}")]
    AbnormalExit { tag: String, code: i32 },

    #[error("Process '{tag}' still running after {seconds} seconds")]
    Timeout { tag: String, seconds: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
