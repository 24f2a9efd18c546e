//! [`SqliteStore`], the SQLite implementation of [`WatchStore`].

use std::path::Path;

use chrono::Utc;
use marquee_core::{
  media::{ContinueWatchingEntry, MediaRef, NewContinueWatching, WatchlistEntry},
  store::WatchStore,
  user::{NewUser, UserProfile},
};
use rusqlite::{OptionalExtension as _, Transaction};

use crate::{
  Error, Result,
  encode::{
    RawContinueWatchingEntry, RawUser, RawWatchlistEntry, encode_dt,
    encode_media_type,
  },
  schema::SCHEMA,
};

/// What a closure on the connection thread hands back: either the rows it
/// read or the domain error that aborted it.
type Outcome<T> = std::result::Result<T, marquee_core::Error>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Marquee store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` inside one transaction on the connection thread.
  ///
  /// The transaction commits only when `f` returns a successful outcome; a
  /// domain error rolls back whatever `f` wrote.
  async fn run<R, F>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&Transaction<'_>) -> rusqlite::Result<Outcome<R>> + Send + 'static,
    R: Send + 'static,
  {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcome = f(&tx)?;
        if outcome.is_ok() {
          tx.commit()?;
        }
        Ok(outcome)
      })
      .await?;
    Ok(outcome?)
  }
}

// ─── Row helpers (connection thread) ─────────────────────────────────────────

fn user_exists(conn: &rusqlite::Connection, user_id: &str) -> rusqlite::Result<bool> {
  let found = conn
    .query_row(
      "SELECT 1 FROM users WHERE user_id = ?1",
      rusqlite::params![user_id],
      |_| Ok(()),
    )
    .optional()?;
  Ok(found.is_some())
}

fn select_watchlist(
  conn: &rusqlite::Connection,
  user_id: &str,
) -> rusqlite::Result<Vec<RawWatchlistEntry>> {
  let mut stmt = conn.prepare(
    "SELECT media_id, title, release_date, poster_path, media_type, added_at
     FROM watchlist_entries
     WHERE user_id = ?1
     ORDER BY seq",
  )?;
  let rows = stmt
    .query_map(rusqlite::params![user_id], RawWatchlistEntry::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

const CONTINUE_WATCHING_SELECT: &str =
  "SELECT media_id, title, release_date, poster_path, media_type,
          progress, added_at, updated_at
   FROM continue_watching_entries";

fn select_continue_watching(
  conn: &rusqlite::Connection,
  user_id: &str,
) -> rusqlite::Result<Vec<RawContinueWatchingEntry>> {
  let mut stmt = conn.prepare(&format!(
    "{CONTINUE_WATCHING_SELECT} WHERE user_id = ?1 ORDER BY seq"
  ))?;
  let rows = stmt
    .query_map(rusqlite::params![user_id], RawContinueWatchingEntry::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn decode_watchlist(raws: Vec<RawWatchlistEntry>) -> Result<Vec<WatchlistEntry>> {
  raws.into_iter().map(RawWatchlistEntry::into_entry).collect()
}

fn decode_continue_watching(
  raws: Vec<RawContinueWatchingEntry>,
) -> Result<Vec<ContinueWatchingEntry>> {
  raws
    .into_iter()
    .map(RawContinueWatchingEntry::into_entry)
    .collect()
}

// ─── WatchStore impl ─────────────────────────────────────────────────────────

impl WatchStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<UserProfile> {
    let created_at = Utc::now();
    let at_str     = encode_dt(created_at);
    let row        = input.clone();

    self
      .run(move |tx| {
        let inserted = tx.execute(
          "INSERT INTO users (user_id, display_name, email, avatar_url, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (user_id) DO NOTHING",
          rusqlite::params![
            row.id,
            row.display_name,
            row.email,
            row.avatar_url,
            at_str,
          ],
        )?;
        if inserted == 0 {
          return Ok(Err(marquee_core::Error::UserExists(row.id)));
        }
        Ok(Ok(()))
      })
      .await?;

    Ok(UserProfile {
      id: input.id,
      display_name: input.display_name,
      email: input.email,
      avatar_url: input.avatar_url,
      created_at,
      watchlist: Vec::new(),
      continue_watching: Vec::new(),
    })
  }

  async fn get_user(&self, user_id: &str) -> Result<UserProfile> {
    let user_id = user_id.to_owned();

    let (raw, watchlist, continue_watching) = self
      .run(move |tx| {
        let raw = tx
          .query_row(
            "SELECT user_id, display_name, email, avatar_url, created_at
             FROM users WHERE user_id = ?1",
            rusqlite::params![user_id],
            RawUser::from_row,
          )
          .optional()?;
        let Some(raw) = raw else {
          return Ok(Err(marquee_core::Error::UserNotFound(user_id)));
        };
        let watchlist         = select_watchlist(tx, &user_id)?;
        let continue_watching = select_continue_watching(tx, &user_id)?;
        Ok(Ok((raw, watchlist, continue_watching)))
      })
      .await?;

    raw.into_profile(
      decode_watchlist(watchlist)?,
      decode_continue_watching(continue_watching)?,
    )
  }

  // ── Watchlist ─────────────────────────────────────────────────────────────

  async fn add_to_watchlist(
    &self,
    user_id: &str,
    media:   MediaRef,
  ) -> Result<Vec<WatchlistEntry>> {
    let user_id    = user_id.to_owned();
    let media_type = encode_media_type(media.media_type);
    let at_str     = encode_dt(Utc::now());

    let raws = self
      .run(move |tx| {
        if !user_exists(tx, &user_id)? {
          return Ok(Err(marquee_core::Error::UserNotFound(user_id)));
        }
        // The UNIQUE (user_id, media_id) constraint decides duplicates.
        let inserted = tx.execute(
          "INSERT INTO watchlist_entries (
             user_id, media_id, title, release_date, poster_path,
             media_type, added_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
           ON CONFLICT (user_id, media_id) DO NOTHING",
          rusqlite::params![
            user_id,
            media.media_id,
            media.title,
            media.release_date,
            media.poster_path,
            media_type,
            at_str,
          ],
        )?;
        if inserted == 0 {
          return Ok(Err(marquee_core::Error::AlreadyInWatchlist {
            user_id,
            media_id: media.media_id,
          }));
        }
        Ok(Ok(select_watchlist(tx, &user_id)?))
      })
      .await?;

    decode_watchlist(raws)
  }

  async fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistEntry>> {
    let user_id = user_id.to_owned();

    let raws = self
      .run(move |tx| {
        if !user_exists(tx, &user_id)? {
          return Ok(Err(marquee_core::Error::UserNotFound(user_id)));
        }
        Ok(Ok(select_watchlist(tx, &user_id)?))
      })
      .await?;

    decode_watchlist(raws)
  }

  async fn remove_from_watchlist(
    &self,
    user_id:  &str,
    media_id: i64,
  ) -> Result<Vec<WatchlistEntry>> {
    let user_id = user_id.to_owned();

    let raws = self
      .run(move |tx| {
        if !user_exists(tx, &user_id)? {
          return Ok(Err(marquee_core::Error::UserNotFound(user_id)));
        }
        // Zero rows affected is fine: removal is idempotent.
        tx.execute(
          "DELETE FROM watchlist_entries WHERE user_id = ?1 AND media_id = ?2",
          rusqlite::params![user_id, media_id],
        )?;
        Ok(Ok(select_watchlist(tx, &user_id)?))
      })
      .await?;

    decode_watchlist(raws)
  }

  // ── Continue watching ─────────────────────────────────────────────────────

  async fn add_to_continue_watching(
    &self,
    user_id: &str,
    input:   NewContinueWatching,
  ) -> Result<Vec<ContinueWatchingEntry>> {
    let user_id    = user_id.to_owned();
    let media_type = encode_media_type(input.media.media_type);
    let at_str     = encode_dt(Utc::now());

    let raws = self
      .run(move |tx| {
        if !user_exists(tx, &user_id)? {
          return Ok(Err(marquee_core::Error::UserNotFound(user_id)));
        }
        // An existing entry keeps its progress; the insert is simply skipped.
        tx.execute(
          "INSERT INTO continue_watching_entries (
             user_id, media_id, title, release_date, poster_path,
             media_type, progress, added_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
           ON CONFLICT (user_id, media_id) DO NOTHING",
          rusqlite::params![
            user_id,
            input.media.media_id,
            input.media.title,
            input.media.release_date,
            input.media.poster_path,
            media_type,
            input.progress,
            at_str,
          ],
        )?;
        Ok(Ok(select_continue_watching(tx, &user_id)?))
      })
      .await?;

    decode_continue_watching(raws)
  }

  async fn get_continue_watching(
    &self,
    user_id: &str,
  ) -> Result<Vec<ContinueWatchingEntry>> {
    let user_id = user_id.to_owned();

    let raws = self
      .run(move |tx| {
        if !user_exists(tx, &user_id)? {
          return Ok(Err(marquee_core::Error::UserNotFound(user_id)));
        }
        Ok(Ok(select_continue_watching(tx, &user_id)?))
      })
      .await?;

    decode_continue_watching(raws)
  }

  async fn update_progress(
    &self,
    user_id:  &str,
    media_id: i64,
    progress: f64,
  ) -> Result<ContinueWatchingEntry> {
    let user_id = user_id.to_owned();
    let at_str  = encode_dt(Utc::now());

    let raw = self
      .run(move |tx| {
        if !user_exists(tx, &user_id)? {
          return Ok(Err(marquee_core::Error::UserNotFound(user_id)));
        }
        let updated = tx.execute(
          "UPDATE continue_watching_entries
           SET progress = ?3, updated_at = ?4
           WHERE user_id = ?1 AND media_id = ?2",
          rusqlite::params![user_id, media_id, progress, at_str],
        )?;
        if updated == 0 {
          return Ok(Err(marquee_core::Error::EntryNotFound { user_id, media_id }));
        }
        let raw = tx.query_row(
          &format!("{CONTINUE_WATCHING_SELECT} WHERE user_id = ?1 AND media_id = ?2"),
          rusqlite::params![user_id, media_id],
          RawContinueWatchingEntry::from_row,
        )?;
        Ok(Ok(raw))
      })
      .await?;

    raw.into_entry()
  }

  async fn remove_from_continue_watching(
    &self,
    user_id:  &str,
    media_id: i64,
  ) -> Result<Vec<ContinueWatchingEntry>> {
    let user_id = user_id.to_owned();

    let raws = self
      .run(move |tx| {
        if !user_exists(tx, &user_id)? {
          return Ok(Err(marquee_core::Error::UserNotFound(user_id)));
        }
        tx.execute(
          "DELETE FROM continue_watching_entries
           WHERE user_id = ?1 AND media_id = ?2",
          rusqlite::params![user_id, media_id],
        )?;
        Ok(Ok(select_continue_watching(tx, &user_id)?))
      })
      .await?;

    decode_continue_watching(raws)
  }
}
