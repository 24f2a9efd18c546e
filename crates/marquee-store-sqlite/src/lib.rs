//! SQLite backend for the Marquee watchlist store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. That thread also serialises every
//! operation, which is what keeps concurrent writes for one user from losing
//! updates.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
