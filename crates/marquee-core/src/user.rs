//! User profiles: the identity anchor that owns both lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  media::{ContinueWatchingEntry, WatchlistEntry},
};

/// Identity fields handed over by the external identity provider at sign-in.
///
/// All four are opaque strings; only `id` is required to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub id:           String,
  #[serde(default)]
  pub display_name: String,
  #[serde(default)]
  pub email:        String,
  #[serde(default)]
  pub avatar_url:   String,
}

impl NewUser {
  pub fn validate(&self) -> Result<()> {
    if self.id.trim().is_empty() {
      return Err(Error::InvalidInput("user id must not be empty".into()));
    }
    Ok(())
  }
}

/// A stored profile together with the entries it owns.
///
/// Profile fields are written once at creation and never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub id:                String,
  pub display_name:      String,
  pub email:             String,
  pub avatar_url:        String,
  pub created_at:        DateTime<Utc>,
  pub watchlist:         Vec<WatchlistEntry>,
  pub continue_watching: Vec<ContinueWatchingEntry>,
}
