//! Error types for `marquee-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(String),

  /// Only the continue-watching list is ever looked up entry-by-entry.
  #[error("media {media_id} not in continue-watching list for user {user_id}")]
  EntryNotFound { user_id: String, media_id: i64 },

  #[error("user already exists: {0}")]
  UserExists(String),

  #[error("media {media_id} already in watchlist for user {user_id}")]
  AlreadyInWatchlist { user_id: String, media_id: i64 },

  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("storage failure: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The coarse classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Conflict,
  InvalidInput,
  /// The only kind worth retrying; backoff is the caller's business.
  StorageFailure,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::UserNotFound(_) | Self::EntryNotFound { .. } => ErrorKind::NotFound,
      Self::UserExists(_) | Self::AlreadyInWatchlist { .. } => {
        ErrorKind::Conflict
      }
      Self::InvalidInput(_) => ErrorKind::InvalidInput,
      Self::Storage(_) => ErrorKind::StorageFailure,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
