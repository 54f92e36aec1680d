use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] fileview_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No fixture provided. Pass --fixture PATH or set FILEVIEW_FIXTURE.")]
    MissingFixture,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Attachment fetch failed; rerun with RUST_LOG=fileview=debug for details")]
    FetchFailed,
}
