//! Route handlers for the kontakti web UI.
//!
//! Handlers own request-parameter reading, flash-message placement, and
//! the choice between redirects and rendered views. Storage failures are
//! logged at the call site and answered with a generic 500.

pub mod categories;
pub mod health;
pub mod home;
pub mod list;
pub mod new_contact;
pub mod signin;
pub mod signout;
pub mod signup;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub(crate) fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong. Please try again later.".to_string(),
    )
        .into_response()
}
