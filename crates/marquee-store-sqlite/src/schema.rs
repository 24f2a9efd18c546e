//! SQL schema for the Marquee SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,   -- identity-provider subject id
    display_name  TEXT NOT NULL,
    email         TEXT NOT NULL,
    avatar_url    TEXT NOT NULL,
    created_at    TEXT NOT NULL       -- ISO 8601 UTC; server-assigned
);

-- Rows are inserted and deleted, never updated.
-- `seq` only orders rows; callers address entries by (user_id, media_id).
CREATE TABLE IF NOT EXISTS watchlist_entries (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id       TEXT    NOT NULL REFERENCES users(user_id),
    media_id      INTEGER NOT NULL,
    title         TEXT    NOT NULL,
    release_date  TEXT    NOT NULL,
    poster_path   TEXT    NOT NULL,
    media_type    TEXT    NOT NULL CHECK (media_type IN ('movie', 'tv')),
    added_at      TEXT    NOT NULL,
    UNIQUE (user_id, media_id)
);

-- `progress` and `updated_at` are the only columns ever updated.
CREATE TABLE IF NOT EXISTS continue_watching_entries (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id       TEXT    NOT NULL REFERENCES users(user_id),
    media_id      INTEGER NOT NULL,
    title         TEXT    NOT NULL,
    release_date  TEXT    NOT NULL,
    poster_path   TEXT    NOT NULL,
    media_type    TEXT    NOT NULL CHECK (media_type IN ('movie', 'tv')),
    progress      REAL    NOT NULL DEFAULT 0 CHECK (progress >= 0),
    added_at      TEXT    NOT NULL,
    updated_at    TEXT    NOT NULL,
    UNIQUE (user_id, media_id)
);

PRAGMA user_version = 1;
";
