//! Error types for the kaizen-sheet decoder.

use thiserror::Error;

/// Why a row, or a whole export, was not turned into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("row discarded: missing {0}")]
  MissingField(&'static str),

  #[error("export has no header row")]
  Empty,

  #[error("unexpected header: expected {expected:?}, found {found:?}")]
  UnexpectedHeader {
    expected: &'static str,
    found:    String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
