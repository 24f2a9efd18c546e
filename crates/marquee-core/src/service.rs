//! [`WatchlistService`], the request-facing layer over a [`WatchStore`].
//!
//! The service rejects invalid input before it reaches storage and folds
//! backend errors into [`crate::Error`], so callers only ever deal with the
//! four [`crate::ErrorKind`]s.

use std::sync::Arc;

use crate::{
  Result,
  media::{
    ContinueWatchingEntry, MediaRef, NewContinueWatching, WatchlistEntry,
    validate_progress,
  },
  store::WatchStore,
  user::{NewUser, UserProfile},
};

pub struct WatchlistService<S> {
  store: Arc<S>,
}

impl<S> Clone for WatchlistService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: WatchStore> WatchlistService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  // ── Users ─────────────────────────────────────────────────────────────────

  pub async fn create_user(&self, input: NewUser) -> Result<UserProfile> {
    input.validate()?;
    self.store.create_user(input).await.map_err(Into::into)
  }

  pub async fn get_user(&self, user_id: &str) -> Result<UserProfile> {
    self.store.get_user(user_id).await.map_err(Into::into)
  }

  // ── Watchlist ─────────────────────────────────────────────────────────────

  pub async fn add_to_watchlist(
    &self,
    user_id: &str,
    media: MediaRef,
  ) -> Result<Vec<WatchlistEntry>> {
    media.validate()?;
    self
      .store
      .add_to_watchlist(user_id, media)
      .await
      .map_err(Into::into)
  }

  pub async fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistEntry>> {
    self.store.get_watchlist(user_id).await.map_err(Into::into)
  }

  pub async fn remove_from_watchlist(
    &self,
    user_id: &str,
    media_id: i64,
  ) -> Result<Vec<WatchlistEntry>> {
    self
      .store
      .remove_from_watchlist(user_id, media_id)
      .await
      .map_err(Into::into)
  }

  // ── Continue watching ─────────────────────────────────────────────────────

  pub async fn add_to_continue_watching(
    &self,
    user_id: &str,
    input: NewContinueWatching,
  ) -> Result<Vec<ContinueWatchingEntry>> {
    input.validate()?;
    self
      .store
      .add_to_continue_watching(user_id, input)
      .await
      .map_err(Into::into)
  }

  pub async fn get_continue_watching(
    &self,
    user_id: &str,
  ) -> Result<Vec<ContinueWatchingEntry>> {
    self
      .store
      .get_continue_watching(user_id)
      .await
      .map_err(Into::into)
  }

  pub async fn update_progress(
    &self,
    user_id: &str,
    media_id: i64,
    progress: f64,
  ) -> Result<ContinueWatchingEntry> {
    validate_progress(progress)?;
    self
      .store
      .update_progress(user_id, media_id, progress)
      .await
      .map_err(Into::into)
  }

  pub async fn remove_from_continue_watching(
    &self,
    user_id: &str,
    media_id: i64,
  ) -> Result<Vec<ContinueWatchingEntry>> {
    self
      .store
      .remove_from_continue_watching(user_id, media_id)
      .await
      .map_err(Into::into)
  }
}
