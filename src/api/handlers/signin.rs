use crate::{
    api::{handlers::server_error, session::Sessions, views},
    auth,
    store::credentials::CredentialStore,
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

// Same message for an unknown user and a wrong password.
const REJECTED_MESSAGE: &str = "Invalid input! Please try again.";

#[derive(Deserialize)]
pub struct SigninForm {
    username: String,
    password: String,
}

pub async fn form(headers: HeaderMap, sessions: Extension<Arc<Sessions>>) -> impl IntoResponse {
    let flash = sessions.take_message(&headers).await;
    Html(views::signin_form(flash.as_deref()))
}

#[instrument(skip(credentials, sessions, form))]
pub async fn submit(
    credentials: Extension<Arc<CredentialStore>>,
    sessions: Extension<Arc<Sessions>>,
    Form(form): Form<SigninForm>,
) -> impl IntoResponse {
    let password = SecretString::from(form.password);

    match auth::signin(&credentials, &form.username, &password).await {
        Ok(true) => match sessions.sign_in(&form.username, "Welcome back!").await {
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
        Ok(false) => Html(views::signin_form(Some(REJECTED_MESSAGE))).into_response(),
        Err(err) => {
            error!("Signin failed: {err:#}");
            server_error()
        }
    }
}
