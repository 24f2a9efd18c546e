//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Body: [`NewUser`]; 201 + profile, 400 if the id exists |
//! | `GET`  | `/users/:id` | Profile with both lists; 404 if unknown |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use marquee_core::{
  service::WatchlistService,
  store::WatchStore,
  user::{NewUser, UserProfile},
};

use crate::error::{ApiError, JsonBody, PathParams};

/// `POST /users`: returns 201 + the new, empty profile.
pub async fn create<S>(
  State(service): State<WatchlistService<S>>,
  JsonBody(body): JsonBody<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: WatchStore,
{
  let profile = service.create_user(body).await?;
  tracing::info!(user_id = %profile.id, "created user");
  Ok((StatusCode::CREATED, Json(profile)))
}

/// `GET /users/:id`
pub async fn get_one<S>(
  State(service): State<WatchlistService<S>>,
  PathParams(id): PathParams<String>,
) -> Result<Json<UserProfile>, ApiError>
where
  S: WatchStore,
{
  Ok(Json(service.get_user(&id).await?))
}
