//! The `WatchStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `marquee-store-sqlite`).
//! Higher layers reach it through [`crate::service::WatchlistService`], which
//! validates input before any backend sees it.

use std::future::Future;

use crate::{
  media::{ContinueWatchingEntry, MediaRef, NewContinueWatching, WatchlistEntry},
  user::{NewUser, UserProfile},
};

/// Abstraction over a Marquee storage backend.
///
/// Every mutation is keyed by the natural identity (`user_id`, `media_id`),
/// never by a backend-assigned row id, so a retried request lands on the
/// same record. Backends must enforce that identity as a uniqueness
/// constraint and must make each call a single atomic read-modify-write.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait WatchStore: Send + Sync {
  /// Backend error; anything that is not a domain error becomes
  /// [`crate::Error::Storage`].
  type Error: std::error::Error + Send + Sync + 'static + Into<crate::Error>;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist an empty profile. Fails with `UserExists` if `input.id` is
  /// taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + '_;

  /// The profile with both of its lists. Fails with `UserNotFound`.
  fn get_user<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + 'a;

  // ── Watchlist ─────────────────────────────────────────────────────────

  /// Append `media` and return the whole list. Fails with
  /// `AlreadyInWatchlist` if the media id is present.
  fn add_to_watchlist<'a>(
    &'a self,
    user_id: &'a str,
    media: MediaRef,
  ) -> impl Future<Output = Result<Vec<WatchlistEntry>, Self::Error>> + Send + 'a;

  /// The watchlist in insertion order.
  fn get_watchlist<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Vec<WatchlistEntry>, Self::Error>> + Send + 'a;

  /// Remove `media_id` if present and return the list. Removing an absent
  /// media id is not an error.
  fn remove_from_watchlist<'a>(
    &'a self,
    user_id: &'a str,
    media_id: i64,
  ) -> impl Future<Output = Result<Vec<WatchlistEntry>, Self::Error>> + Send + 'a;

  // ── Continue watching ─────────────────────────────────────────────────

  /// Append `input` unless its media id is already present, in which case
  /// the stored entry (and its progress) is left alone. Returns the list.
  fn add_to_continue_watching<'a>(
    &'a self,
    user_id: &'a str,
    input: NewContinueWatching,
  ) -> impl Future<Output = Result<Vec<ContinueWatchingEntry>, Self::Error>>
  + Send
  + 'a;

  /// The continue-watching list in insertion order.
  fn get_continue_watching<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Vec<ContinueWatchingEntry>, Self::Error>>
  + Send
  + 'a;

  /// Overwrite the progress of an existing entry in place. Fails with
  /// `EntryNotFound` if the media id is not in the list.
  fn update_progress<'a>(
    &'a self,
    user_id: &'a str,
    media_id: i64,
    progress: f64,
  ) -> impl Future<Output = Result<ContinueWatchingEntry, Self::Error>> + Send + 'a;

  /// Idempotent removal, as for the watchlist.
  fn remove_from_continue_watching<'a>(
    &'a self,
    user_id: &'a str,
    media_id: i64,
  ) -> impl Future<Output = Result<Vec<ContinueWatchingEntry>, Self::Error>>
  + Send
  + 'a;
}
