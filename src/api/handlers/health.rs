use crate::{
    store::{contacts::ContactStore, credentials::CredentialStore},
    GIT_COMMIT_HASH,
};
use axum::{
    extract::Extension,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Deserialize, Serialize)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    storage: String,
}

/// Service health: package identity plus whether the data directory is
/// reachable.
pub async fn health(
    credentials: Extension<Arc<CredentialStore>>,
    contacts: Extension<Arc<ContactStore>>,
) -> impl IntoResponse {
    let storage = match (credentials.ping().await, contacts.ping().await) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(err), _) | (_, Err(err)) => {
            error!("Storage unavailable: {err:#}");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: if storage.is_ok() {
            "ok".to_string()
        } else {
            "error".to_string()
        },
    };

    let short_hash = if health.commit.len() > 7 {
        &health.commit[0..7]
    } else {
        ""
    };

    let mut headers = HeaderMap::new();
    if let Ok(x_app) =
        format!("{}:{}:{}", health.name, health.version, short_hash).parse::<HeaderValue>()
    {
        debug!("X-App header: {:?}", x_app);
        headers.insert("X-App", x_app);
    }

    let status = storage.err().unwrap_or(StatusCode::OK);
    (status, headers, Json(health))
}
