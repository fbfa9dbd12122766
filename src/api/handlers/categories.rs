use crate::{
    api::{
        handlers::server_error,
        session::{require_signed_in, Sessions},
        views,
    },
    contacts::{CategoryFilter, Contact},
    store::contacts::ContactStore,
};
use axum::{
    extract::{Extension, Path},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect},
};
use std::sync::Arc;
use tracing::error;

/// One bucket's contacts, or the flattened view for `all`. Unknown
/// category names bounce back to the index.
pub async fn show(
    Path(category): Path<String>,
    headers: HeaderMap,
    sessions: Extension<Arc<Sessions>>,
    contacts: Extension<Arc<ContactStore>>,
) -> impl IntoResponse {
    let username = match require_signed_in(&sessions, &headers).await {
        Ok(username) => username,
        Err(redirect) => return redirect.into_response(),
    };

    let Some(filter) = CategoryFilter::parse(&category) else {
        return Redirect::to("/list").into_response();
    };

    let book = match contacts.load_for_user(&username).await {
        Ok(book) => book,
        Err(err) => {
            error!("Failed to load contacts for {username}: {err:#}");
            return server_error();
        }
    };

    let listed: Vec<Contact> = match filter {
        CategoryFilter::All => book.all().cloned().collect(),
        CategoryFilter::Bucket(bucket) => book.bucket(bucket).to_vec(),
    };

    let flash = sessions.take_message(&headers).await;
    Html(views::contact_table(filter, &listed, flash.as_deref())).into_response()
}
