//! JSON REST API for Marquee.
//!
//! Exposes an axum [`Router`] backed by any [`WatchStore`] via a
//! [`WatchlistService`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", marquee_api::api_router(service.clone()))
//! ```

pub mod continue_watching;
pub mod error;
pub mod users;
pub mod watchlist;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use marquee_core::{service::WatchlistService, store::WatchStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: WatchlistService<S>) -> Router<()>
where
  S: WatchStore + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::create::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    // Watchlist
    .route(
      "/users/{id}/watchlist",
      get(watchlist::list::<S>).post(watchlist::add::<S>),
    )
    .route(
      "/users/{id}/watchlist/{media_id}",
      delete(watchlist::remove::<S>),
    )
    // Continue watching
    .route(
      "/users/{id}/continue-watching",
      get(continue_watching::list::<S>).post(continue_watching::add::<S>),
    )
    .route(
      "/users/{id}/continue-watching/{media_id}",
      put(continue_watching::update_progress::<S>)
        .delete(continue_watching::remove::<S>),
    )
    .with_state(service)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use marquee_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  async fn make_router() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(WatchlistService::new(Arc::new(store)))
  }

  async fn call(
    router: &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = router
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn u1() -> Value {
    json!({
      "id": "u1",
      "displayName": "Dom Cobb",
      "email": "cobb@example.com",
      "avatarUrl": "https://example.com/cobb.png",
    })
  }

  fn inception() -> Value {
    json!({
      "mediaId": 27205,
      "title": "Inception",
      "releaseDate": "2010-07-15",
      "posterPath": "/inception.jpg",
      "mediaType": "movie",
    })
  }

  // ── Users ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_user_returns_201_then_400() {
    let router = make_router().await;

    let (status, body) = call(&router, "POST", "/users", Some(u1())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "u1");
    assert_eq!(body["displayName"], "Dom Cobb");
    assert_eq!(body["watchlist"], json!([]));
    assert_eq!(body["continueWatching"], json!([]));

    let (status, body) = call(&router, "POST", "/users", Some(u1())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
  }

  #[tokio::test]
  async fn get_unknown_user_is_404() {
    let router = make_router().await;
    let (status, body) = call(&router, "GET", "/users/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn malformed_body_is_400_with_json_error() {
    let router = make_router().await;
    let (status, body) =
      call(&router, "POST", "/users", Some(json!({ "displayName": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  // ── Watchlist ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn watchlist_scenario() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;

    let (status, body) =
      call(&router, "POST", "/users/u1/watchlist", Some(inception())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["mediaId"], 27205);
    assert_eq!(body[0]["mediaType"], "movie");

    let (status, _) =
      call(&router, "POST", "/users/u1/watchlist", Some(inception())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&router, "GET", "/users/u1/watchlist", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) =
      call(&router, "DELETE", "/users/u1/watchlist/27205", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) =
      call(&router, "DELETE", "/users/u1/watchlist/27205", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn watchlist_for_unknown_user_is_404() {
    let router = make_router().await;
    let (status, _) =
      call(&router, "POST", "/users/ghost/watchlist", Some(inception())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&router, "GET", "/users/ghost/watchlist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
      call(&router, "DELETE", "/users/ghost/watchlist/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn watchlist_accepts_catalog_shaped_body() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;

    let (status, body) = call(
      &router,
      "POST",
      "/users/u1/watchlist",
      Some(json!({ "id": 1396, "title": "Breaking Bad", "mediaType": "tv" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["mediaId"], 1396);
    assert_eq!(body[0]["releaseDate"], "");
  }

  #[tokio::test]
  async fn watchlist_rejects_unknown_media_type_and_bad_ids() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;

    let mut podcast = inception();
    podcast["mediaType"] = json!("podcast");
    let (status, _) =
      call(&router, "POST", "/users/u1/watchlist", Some(podcast)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
      call(&router, "DELETE", "/users/u1/watchlist/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  // ── Continue watching ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn continue_watching_scenario() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;

    let (status, body) =
      call(&router, "GET", "/users/u1/continue-watching", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let show = json!({
      "mediaId": 1396,
      "title": "Breaking Bad",
      "mediaType": "tv",
      "progress": 0,
    });
    let (status, body) =
      call(&router, "POST", "/users/u1/continue-watching", Some(show.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = call(
      &router,
      "PUT",
      "/users/u1/continue-watching/1396",
      Some(json!({ "progress": 42.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mediaId"], 1396);
    assert_eq!(body["progress"], 42.5);

    // A repeated add is a no-op and does not reset progress.
    let (status, body) =
      call(&router, "POST", "/users/u1/continue-watching", Some(show)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["progress"], 42.5);

    let (_, body) =
      call(&router, "GET", "/users/u1/continue-watching", None).await;
    assert_eq!(body[0]["progress"], 42.5);
  }

  #[tokio::test]
  async fn continue_watching_accepts_player_body_without_title() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;

    let (status, body) = call(
      &router,
      "POST",
      "/users/u1/continue-watching",
      Some(json!({ "mediaId": 1396, "mediaType": "tv", "progress": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["mediaId"], 1396);
    assert_eq!(body[0]["title"], "");

    let (status, body) = call(
      &router,
      "PUT",
      "/users/u1/continue-watching/1396",
      Some(json!({ "progress": 42.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 42.5);

    let (_, body) =
      call(&router, "GET", "/users/u1/continue-watching", None).await;
    assert_eq!(body[0]["progress"], 42.5);
  }

  #[tokio::test]
  async fn update_progress_for_absent_entry_is_404() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;

    let (status, body) = call(
      &router,
      "PUT",
      "/users/u1/continue-watching/1396",
      Some(json!({ "progress": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("1396"));
  }

  #[tokio::test]
  async fn update_progress_rejects_negative_progress() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;
    call(
      &router,
      "POST",
      "/users/u1/continue-watching",
      Some(json!({ "mediaId": 1396, "title": "Breaking Bad", "mediaType": "tv" })),
    )
    .await;

    let (status, _) = call(
      &router,
      "PUT",
      "/users/u1/continue-watching/1396",
      Some(json!({ "progress": -3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn continue_watching_delete_is_idempotent() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;
    call(
      &router,
      "POST",
      "/users/u1/continue-watching",
      Some(json!({ "mediaId": 1396, "title": "Breaking Bad", "mediaType": "tv" })),
    )
    .await;

    for _ in 0..2 {
      let (status, body) =
        call(&router, "DELETE", "/users/u1/continue-watching/1396", None).await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body, json!([]));
    }
  }

  #[tokio::test]
  async fn profile_shows_saved_entries() {
    let router = make_router().await;
    call(&router, "POST", "/users", Some(u1())).await;
    call(&router, "POST", "/users/u1/watchlist", Some(inception())).await;

    let (status, body) = call(&router, "GET", "/users/u1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["watchlist"][0]["title"], "Inception");
    assert!(body["createdAt"].is_string());
  }

  // ── Storage failures ────────────────────────────────────────────────────────

  /// A backend whose database is unreachable.
  struct OfflineStore;

  fn offline() -> marquee_core::Error {
    marquee_core::Error::Storage(Box::new(std::io::Error::new(
      std::io::ErrorKind::NotConnected,
      "database offline",
    )))
  }

  impl WatchStore for OfflineStore {
    type Error = marquee_core::Error;

    async fn create_user(
      &self,
      _input: marquee_core::user::NewUser,
    ) -> marquee_core::Result<marquee_core::user::UserProfile> {
      Err(offline())
    }

    async fn get_user(
      &self,
      _user_id: &str,
    ) -> marquee_core::Result<marquee_core::user::UserProfile> {
      Err(offline())
    }

    async fn add_to_watchlist(
      &self,
      _user_id: &str,
      _media: marquee_core::media::MediaRef,
    ) -> marquee_core::Result<Vec<marquee_core::media::WatchlistEntry>> {
      Err(offline())
    }

    async fn get_watchlist(
      &self,
      _user_id: &str,
    ) -> marquee_core::Result<Vec<marquee_core::media::WatchlistEntry>> {
      Err(offline())
    }

    async fn remove_from_watchlist(
      &self,
      _user_id: &str,
      _media_id: i64,
    ) -> marquee_core::Result<Vec<marquee_core::media::WatchlistEntry>> {
      Err(offline())
    }

    async fn add_to_continue_watching(
      &self,
      _user_id: &str,
      _input: marquee_core::media::NewContinueWatching,
    ) -> marquee_core::Result<Vec<marquee_core::media::ContinueWatchingEntry>>
    {
      Err(offline())
    }

    async fn get_continue_watching(
      &self,
      _user_id: &str,
    ) -> marquee_core::Result<Vec<marquee_core::media::ContinueWatchingEntry>>
    {
      Err(offline())
    }

    async fn update_progress(
      &self,
      _user_id: &str,
      _media_id: i64,
      _progress: f64,
    ) -> marquee_core::Result<marquee_core::media::ContinueWatchingEntry> {
      Err(offline())
    }

    async fn remove_from_continue_watching(
      &self,
      _user_id: &str,
      _media_id: i64,
    ) -> marquee_core::Result<Vec<marquee_core::media::ContinueWatchingEntry>>
    {
      Err(offline())
    }
  }

  #[tokio::test]
  async fn storage_failure_is_500_with_json_error() {
    let router = api_router(WatchlistService::new(Arc::new(OfflineStore)));

    let (status, body) = call(&router, "GET", "/users/u1/watchlist", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("database offline"));

    let (status, body) =
      call(&router, "POST", "/users/u1/watchlist", Some(inception())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
  }
}
