//! Crate-wide error type.
//!
//! Only backend and I/O failures surface as errors. Misuse of the widget tree
//! (adding a child twice, touching a destroyed node) panics, and soft UI
//! conditions such as an off-screen drag are ignored by the caller.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TvError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error("input thread disconnected")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, TvError>;

impl TvError {
    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
