//! Core types and trait definitions for the Marquee watchlist service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::WatchStore`]; the HTTP layer talks to
//! a backend through [`service::WatchlistService`].

pub mod error;
pub mod media;
pub mod service;
pub mod store;
pub mod user;

pub use error::{Error, ErrorKind, Result};
