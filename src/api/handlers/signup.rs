use crate::{
    api::{handlers::server_error, session::Sessions, views},
    auth::{self, SignupOutcome},
    store::{contacts::ContactStore, credentials::CredentialStore},
};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{Html, IntoResponse, Redirect},
    Form,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, instrument};

// Deliberately coarse: does not say which field was invalid.
const REJECTED_MESSAGE: &str = "Invalid input! Please try a new username and password.";

#[derive(Deserialize)]
pub struct SignupForm {
    username: String,
    password: String,
}

pub async fn form(headers: HeaderMap, sessions: Extension<Arc<Sessions>>) -> impl IntoResponse {
    let flash = sessions.take_message(&headers).await;
    Html(views::signup_form(flash.as_deref()))
}

#[instrument(skip(credentials, contacts, sessions, form))]
pub async fn submit(
    credentials: Extension<Arc<CredentialStore>>,
    contacts: Extension<Arc<ContactStore>>,
    sessions: Extension<Arc<Sessions>>,
    Form(form): Form<SignupForm>,
) -> impl IntoResponse {
    let password = SecretString::from(form.password);

    match auth::signup(&credentials, &contacts, &form.username, &password).await {
        Ok(SignupOutcome::Created) => match sessions.sign_in(&form.username, "Welcome!").await {
            Ok(cookie) => {
                let mut headers = HeaderMap::new();
                headers.insert(SET_COOKIE, cookie);
                (headers, Redirect::to("/list")).into_response()
            }
            Err(err) => {
                error!("Failed to establish session: {err:#}");
                server_error()
            }
        },
        Ok(SignupOutcome::Rejected) => {
            Html(views::signup_form(Some(REJECTED_MESSAGE))).into_response()
        }
        Err(err) => {
            error!("Signup failed: {err:#}");
            server_error()
        }
    }
}
