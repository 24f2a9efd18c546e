//! Media references and the two kinds of saved entry built on them.
//!
//! A media reference is whatever the catalog provider told the front-end
//! about a title. It is stored exactly as submitted; nothing here checks it
//! against the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Media type ──────────────────────────────────────────────────────────────

/// Discriminates movie entries from TV-series entries.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaType {
  Movie,
  Tv,
}

// ─── Media reference ─────────────────────────────────────────────────────────

/// The identity fields shared by watchlist and continue-watching entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
  /// External catalog id. The front-end posts raw catalog objects, whose id
  /// field is plain `id`.
  #[serde(alias = "id")]
  pub media_id:     i64,
  /// Stored as submitted; progress updates from the player may omit it.
  #[serde(default)]
  pub title:        String,
  /// Often empty for TV series.
  #[serde(default)]
  pub release_date: String,
  #[serde(default)]
  pub poster_path:  String,
  pub media_type:   MediaType,
}

impl MediaRef {
  pub fn validate(&self) -> Result<()> {
    if self.media_id <= 0 {
      return Err(Error::InvalidInput(format!(
        "mediaId must be positive, got {}",
        self.media_id
      )));
    }
    Ok(())
  }
}

// ─── Watchlist ───────────────────────────────────────────────────────────────

/// An item the user has saved for later. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
  #[serde(flatten)]
  pub media:    MediaRef,
  pub added_at: DateTime<Utc>,
}

// ─── Continue watching ───────────────────────────────────────────────────────

/// An item with resumable playback progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueWatchingEntry {
  #[serde(flatten)]
  pub media:      MediaRef,
  /// Playback position or fraction; the only mutable field.
  pub progress:   f64,
  pub added_at:   DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::WatchStore::add_to_continue_watching`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContinueWatching {
  #[serde(flatten)]
  pub media:    MediaRef,
  #[serde(default)]
  pub progress: f64,
}

impl NewContinueWatching {
  pub fn validate(&self) -> Result<()> {
    self.media.validate()?;
    validate_progress(self.progress)
  }
}

/// Progress must be a finite, non-negative number.
pub fn validate_progress(progress: f64) -> Result<()> {
  if !progress.is_finite() || progress < 0.0 {
    return Err(Error::InvalidInput(format!(
      "progress must be a non-negative number, got {progress}"
    )));
  }
  Ok(())
}
