//! Handlers for `/users/:id/watchlist` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/:id/watchlist` | Insertion order |
//! | `POST`   | `/users/:id/watchlist` | Body: [`MediaRef`]; 400 if already saved |
//! | `DELETE` | `/users/:id/watchlist/:media_id` | Idempotent; always returns the list |
//!
//! Every endpoint returns the full list and 404s for an unknown user.

use axum::{Json, extract::State};
use marquee_core::{
  media::{MediaRef, WatchlistEntry},
  service::WatchlistService,
  store::WatchStore,
};

use crate::error::{ApiError, JsonBody, PathParams};

/// `GET /users/:id/watchlist`
pub async fn list<S>(
  State(service): State<WatchlistService<S>>,
  PathParams(user_id): PathParams<String>,
) -> Result<Json<Vec<WatchlistEntry>>, ApiError>
where
  S: WatchStore,
{
  Ok(Json(service.get_watchlist(&user_id).await?))
}

/// `POST /users/:id/watchlist`
pub async fn add<S>(
  State(service): State<WatchlistService<S>>,
  PathParams(user_id): PathParams<String>,
  JsonBody(media): JsonBody<MediaRef>,
) -> Result<Json<Vec<WatchlistEntry>>, ApiError>
where
  S: WatchStore,
{
  let media_id = media.media_id;
  let list = service.add_to_watchlist(&user_id, media).await?;
  tracing::info!(%user_id, media_id, len = list.len(), "added to watchlist");
  Ok(Json(list))
}

/// `DELETE /users/:id/watchlist/:media_id`
pub async fn remove<S>(
  State(service): State<WatchlistService<S>>,
  PathParams((user_id, media_id)): PathParams<(String, i64)>,
) -> Result<Json<Vec<WatchlistEntry>>, ApiError>
where
  S: WatchStore,
{
  let list = service.remove_from_watchlist(&user_id, media_id).await?;
  tracing::info!(%user_id, media_id, len = list.len(), "removed from watchlist");
  Ok(Json(list))
}
