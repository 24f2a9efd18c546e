//! Handlers for `/users/:id/continue-watching` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/:id/continue-watching` | Empty list if nothing started |
//! | `POST`   | `/users/:id/continue-watching` | Body: [`NewContinueWatching`]; no-op if present |
//! | `PUT`    | `/users/:id/continue-watching/:media_id` | Body: `{"progress":42.5}`; returns the entry |
//! | `DELETE` | `/users/:id/continue-watching/:media_id` | Idempotent; returns the list |

use axum::{Json, extract::State};
use marquee_core::{
  media::{ContinueWatchingEntry, NewContinueWatching},
  service::WatchlistService,
  store::WatchStore,
};
use serde::Deserialize;

use crate::error::{ApiError, JsonBody, PathParams};

/// `GET /users/:id/continue-watching`
pub async fn list<S>(
  State(service): State<WatchlistService<S>>,
  PathParams(user_id): PathParams<String>,
) -> Result<Json<Vec<ContinueWatchingEntry>>, ApiError>
where
  S: WatchStore,
{
  Ok(Json(service.get_continue_watching(&user_id).await?))
}

/// `POST /users/:id/continue-watching`
pub async fn add<S>(
  State(service): State<WatchlistService<S>>,
  PathParams(user_id): PathParams<String>,
  JsonBody(input): JsonBody<NewContinueWatching>,
) -> Result<Json<Vec<ContinueWatchingEntry>>, ApiError>
where
  S: WatchStore,
{
  let media_id = input.media.media_id;
  let list = service.add_to_continue_watching(&user_id, input).await?;
  tracing::info!(%user_id, media_id, len = list.len(), "added to continue watching");
  Ok(Json(list))
}

#[derive(Debug, Deserialize)]
pub struct ProgressBody {
  pub progress: f64,
}

/// `PUT /users/:id/continue-watching/:media_id`
pub async fn update_progress<S>(
  State(service): State<WatchlistService<S>>,
  PathParams((user_id, media_id)): PathParams<(String, i64)>,
  JsonBody(body): JsonBody<ProgressBody>,
) -> Result<Json<ContinueWatchingEntry>, ApiError>
where
  S: WatchStore,
{
  let entry = service
    .update_progress(&user_id, media_id, body.progress)
    .await?;
  tracing::debug!(%user_id, media_id, progress = entry.progress, "updated progress");
  Ok(Json(entry))
}

/// `DELETE /users/:id/continue-watching/:media_id`
pub async fn remove<S>(
  State(service): State<WatchlistService<S>>,
  PathParams((user_id, media_id)): PathParams<(String, i64)>,
) -> Result<Json<Vec<ContinueWatchingEntry>>, ApiError>
where
  S: WatchStore,
{
  let list = service
    .remove_from_continue_watching(&user_id, media_id)
    .await?;
  tracing::info!(%user_id, media_id, len = list.len(), "removed from continue watching");
  Ok(Json(list))
}
