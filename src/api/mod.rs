//! HTTP surface: router, middleware, and server startup.

pub mod handlers;
pub mod session;
pub(crate) mod views;

use crate::store::{contacts::ContactStore, credentials::CredentialStore};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use session::Sessions;
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

/// Build the application router over the given stores.
#[must_use]
pub fn router(
    credentials: Arc<CredentialStore>,
    contacts: Arc<ContactStore>,
    sessions: Arc<Sessions>,
) -> Router {
    Router::new()
        .route("/", get(handlers::home::index))
        .route(
            "/signup",
            get(handlers::signup::form).post(handlers::signup::submit),
        )
        .route(
            "/signin",
            get(handlers::signin::form).post(handlers::signin::submit),
        )
        .route("/signout", post(handlers::signout::submit))
        .route("/list", get(handlers::list::index))
        .route("/categories/:category", get(handlers::categories::show))
        .route(
            "/new",
            get(handlers::new_contact::form).post(handlers::new_contact::submit),
        )
        .route("/health", get(handlers::health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(credentials))
                .layer(Extension(contacts))
                .layer(Extension(sessions)),
        )
}

/// Start the server.
///
/// # Errors
/// Returns an error if the data directory cannot be prepared or the
/// listener fails.
pub async fn new(port: u16, data_dir: PathBuf, session_ttl_seconds: u64) -> Result<()> {
    let contacts_dir = data_dir.join("contacts");
    tokio::fs::create_dir_all(&contacts_dir)
        .await
        .with_context(|| format!("failed to create data directory {}", contacts_dir.display()))?;

    let credentials = Arc::new(CredentialStore::new(data_dir.join("users.yml")));
    let contacts = Arc::new(ContactStore::new(contacts_dir));
    let sessions = Arc::new(Sessions::new(session_ttl_seconds));

    let app = router(credentials, contacts, sessions);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
