use crate::api::{
    session::{require_signed_in, Sessions},
    views,
};
use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

/// Category index for the signed-in user.
pub async fn index(headers: HeaderMap, sessions: Extension<Arc<Sessions>>) -> impl IntoResponse {
    let username = match require_signed_in(&sessions, &headers).await {
        Ok(username) => username,
        Err(redirect) => return redirect.into_response(),
    };

    let flash = sessions.take_message(&headers).await;
    Html(views::category_index(&username, flash.as_deref())).into_response()
}
