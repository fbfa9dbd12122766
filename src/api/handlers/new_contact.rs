use crate::{
    api::{
        handlers::server_error,
        session::{require_signed_in, Sessions},
        views,
    },
    contacts::Category,
    store::contacts::ContactStore,
};
use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, instrument};

const REJECTED_NAME_MESSAGE: &str = "You may not enter that name. Please try again.";
const INVALID_INPUT_MESSAGE: &str = "Invalid input! Please try again.";

#[derive(Debug, Deserialize)]
pub struct NewContactForm {
    contact: String,
    category: String,
    #[serde(default)]
    mobile: String,
    #[serde(default)]
    home: String,
    #[serde(default)]
    email: String,
}

pub async fn form(headers: HeaderMap, sessions: Extension<Arc<Sessions>>) -> impl IntoResponse {
    if let Err(redirect) = require_signed_in(&sessions, &headers).await {
        return redirect.into_response();
    }

    let flash = sessions.take_message(&headers).await;
    Html(views::new_contact_form(flash.as_deref())).into_response()
}

#[instrument(skip(sessions, contacts, headers, form))]
pub async fn submit(
    headers: HeaderMap,
    sessions: Extension<Arc<Sessions>>,
    contacts: Extension<Arc<ContactStore>>,
    Form(form): Form<NewContactForm>,
) -> impl IntoResponse {
    let username = match require_signed_in(&sessions, &headers).await {
        Ok(username) => username,
        Err(redirect) => return redirect.into_response(),
    };

    // The category reaches the document as a closed enum; a submission
    // outside the three buckets is rejected here, never indexed blindly.
    let Some(category) = Category::parse(&form.category) else {
        return Html(views::new_contact_form(Some(INVALID_INPUT_MESSAGE))).into_response();
    };

    let outcome = contacts
        .update_for_user(&username, |book| {
            book.add(category, &form.contact, &form.mobile, &form.home, &form.email)
        })
        .await;

    match outcome {
        Ok(Ok(name)) => {
            sessions
                .set_message(&headers, &format!("{name} is now in your contact list."))
                .await;
            Redirect::to("/list").into_response()
        }
        Ok(Err(_)) => Html(views::new_contact_form(Some(REJECTED_NAME_MESSAGE))).into_response(),
        Err(err) => {
            error!("Failed to add contact for {username}: {err:#}");
            server_error()
        }
    }
}
