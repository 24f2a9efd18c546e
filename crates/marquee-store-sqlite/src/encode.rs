//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and media types as their
//! lowercase names. Rows are first read into `Raw*` structs inside the
//! connection closure, then decoded outside it.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use marquee_core::{
  media::{ContinueWatchingEntry, MediaRef, MediaType, WatchlistEntry},
  user::UserProfile,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── MediaType ───────────────────────────────────────────────────────────────

/// The strum text form, matching the schema's `CHECK` constraint.
pub fn encode_media_type(t: MediaType) -> &'static str { t.into() }

pub fn decode_media_type(s: &str) -> Result<MediaType> {
  MediaType::from_str(s).map_err(|_| Error::UnknownMediaType(s.to_owned()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

pub struct RawUser {
  pub user_id:      String,
  pub display_name: String,
  pub email:        String,
  pub avatar_url:   String,
  pub created_at:   String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:      row.get(0)?,
      display_name: row.get(1)?,
      email:        row.get(2)?,
      avatar_url:   row.get(3)?,
      created_at:   row.get(4)?,
    })
  }

  pub fn into_profile(
    self,
    watchlist: Vec<WatchlistEntry>,
    continue_watching: Vec<ContinueWatchingEntry>,
  ) -> Result<UserProfile> {
    Ok(UserProfile {
      id: self.user_id,
      display_name: self.display_name,
      email: self.email,
      avatar_url: self.avatar_url,
      created_at: decode_dt(&self.created_at)?,
      watchlist,
      continue_watching,
    })
  }
}

/// Columns shared by both entry tables, in `SELECT` order.
pub struct RawMedia {
  pub media_id:     i64,
  pub title:        String,
  pub release_date: String,
  pub poster_path:  String,
  pub media_type:   String,
}

impl RawMedia {
  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      media_id:     row.get(0)?,
      title:        row.get(1)?,
      release_date: row.get(2)?,
      poster_path:  row.get(3)?,
      media_type:   row.get(4)?,
    })
  }

  fn into_media(self) -> Result<MediaRef> {
    Ok(MediaRef {
      media_id:     self.media_id,
      title:        self.title,
      release_date: self.release_date,
      poster_path:  self.poster_path,
      media_type:   decode_media_type(&self.media_type)?,
    })
  }
}

pub struct RawWatchlistEntry {
  pub media:    RawMedia,
  pub added_at: String,
}

impl RawWatchlistEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { media: RawMedia::from_row(row)?, added_at: row.get(5)? })
  }

  pub fn into_entry(self) -> Result<WatchlistEntry> {
    Ok(WatchlistEntry {
      media:    self.media.into_media()?,
      added_at: decode_dt(&self.added_at)?,
    })
  }
}

pub struct RawContinueWatchingEntry {
  pub media:      RawMedia,
  pub progress:   f64,
  pub added_at:   String,
  pub updated_at: String,
}

impl RawContinueWatchingEntry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      media:      RawMedia::from_row(row)?,
      progress:   row.get(5)?,
      added_at:   row.get(6)?,
      updated_at: row.get(7)?,
    })
  }

  pub fn into_entry(self) -> Result<ContinueWatchingEntry> {
    Ok(ContinueWatchingEntry {
      media:      self.media.into_media()?,
      progress:   self.progress,
      added_at:   decode_dt(&self.added_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
