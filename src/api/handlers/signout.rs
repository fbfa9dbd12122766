use crate::api::{handlers::server_error, session::Sessions};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect},
};
use std::sync::Arc;
use tracing::{error, instrument};

/// Drop the session identity. Idempotent for clients that are already
/// signed out.
#[instrument(skip(sessions, headers))]
pub async fn submit(headers: HeaderMap, sessions: Extension<Arc<Sessions>>) -> impl IntoResponse {
    match sessions.sign_out(&headers, "Goodbye! See you soon.").await {
        Ok(cookie) => {
            let mut response_headers = HeaderMap::new();
            response_headers.insert(SET_COOKIE, cookie);
            (response_headers, Redirect::to("/")).into_response()
        }
        Err(err) => {
            error!("Failed to sign out: {err:#}");
            server_error()
        }
    }
}
