use std::io;
use std::string::FromUtf8Error;
use std::time::Duration;

use thiserror::Error;

/// Failure while producing the route listing
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to run artisan: {0}")]
    Io(#[from] io::Error),

    #[error("artisan route:list exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("artisan route:list timed out after {0:?}")]
    Timeout(Duration),

    #[error("artisan output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
