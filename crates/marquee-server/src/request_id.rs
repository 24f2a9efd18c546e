//! Per-request ids, carried in `x-request-id`.

use axum::{
  body::Body,
  extract::Request,
  http::HeaderValue,
  middleware::Next,
  response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Stored in request extensions by [`request_id_middleware`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl std::fmt::Display for RequestId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

/// Reuse the caller's `x-request-id` when it is a UUID, otherwise mint a v4
/// one. The id is echoed on the response either way.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
  let request_id = request
    .headers()
    .get(REQUEST_ID_HEADER)
    .and_then(|h| h.to_str().ok())
    .and_then(|s| Uuid::parse_str(s).ok())
    .map(RequestId)
    .unwrap_or_else(|| RequestId(Uuid::new_v4()));

  request.extensions_mut().insert(request_id);

  let mut response = next.run(request).await;

  if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
    response.headers_mut().insert(REQUEST_ID_HEADER, value);
  }

  response
}

/// Span for `TraceLayer`; must run inside the request-id middleware.
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
  let request_id = request
    .extensions()
    .get::<RequestId>()
    .map(ToString::to_string)
    .unwrap_or_else(|| "unknown".to_string());

  tracing::info_span!(
    "http_request",
    method = %request.method(),
    uri = %request.uri(),
    request_id = %request_id,
  )
}
