use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("flag `--{0}` is required and can't be empty")]
    MissingFlag(&'static str),
    #[error("failed to open `{}`: {}", .0.display(), .1)]
    InputOpenFailed(PathBuf, #[source] io::Error),
    #[error("failed to read `{}`: {}", .0.display(), .1)]
    InputReadFailed(PathBuf, #[source] io::Error),
    #[error("failed to write to stdout: {0}")]
    OutputWriteFailed(#[source] io::Error),
}
