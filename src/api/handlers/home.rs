use crate::api::{session::Sessions, views};
use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect},
};
use std::sync::Arc;

/// Landing page. Signed-in visitors go straight to their list.
pub async fn index(headers: HeaderMap, sessions: Extension<Arc<Sessions>>) -> impl IntoResponse {
    if sessions.identity(&headers).await.is_some() {
        return Redirect::to("/list").into_response();
    }

    let flash = sessions.take_message(&headers).await;
    Html(views::landing(flash.as_deref())).into_response()
}
