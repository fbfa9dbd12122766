//! Server-side sessions and the cookie that addresses them.
//!
//! Each session is a random URL-safe token mapped to `{ username, message }`.
//! The token travels in an `HttpOnly` cookie; the map lives in process
//! memory and entries expire after the configured TTL. `message` is the
//! one-shot flash consumed by the next rendered page.

use anyhow::{anyhow, Context, Result};
use axum::{
    http::{header::COOKIE, HeaderMap, HeaderValue},
    response::Redirect,
};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

const SESSION_COOKIE_NAME: &str = "kontakti_session";

/// What one session carries: the authenticated identity (absent for an
/// anonymous session) and the pending flash message.
#[derive(Clone, Debug, Default)]
struct SessionData {
    username: Option<String>,
    message: Option<String>,
}

struct Entry {
    data: SessionData,
    expires_at: Instant,
}

/// In-memory session store keyed by the cookie token.
pub struct Sessions {
    ttl: Duration,
    inner: RwLock<HashMap<String, Entry>>,
}

impl Sessions {
    #[must_use]
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl: Duration::from_secs(ttl_seconds),
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the request's session cookie to a signed-in username.
    pub async fn identity(&self, headers: &HeaderMap) -> Option<String> {
        let token = extract_session_token(headers)?;
        let mut inner = self.inner.write().await;
        if expired(&inner, &token) {
            inner.remove(&token);
            return None;
        }
        inner.get(&token).and_then(|entry| entry.data.username.clone())
    }

    /// Consume the pending flash message, if any. A flash is shown at
    /// most once.
    pub async fn take_message(&self, headers: &HeaderMap) -> Option<String> {
        let token = extract_session_token(headers)?;
        let mut inner = self.inner.write().await;
        if expired(&inner, &token) {
            inner.remove(&token);
            return None;
        }
        inner.get_mut(&token).and_then(|entry| entry.data.message.take())
    }

    /// Set the flash message on the request's session, if one exists.
    pub async fn set_message(&self, headers: &HeaderMap, message: &str) {
        let Some(token) = extract_session_token(headers) else {
            return;
        };
        let mut inner = self.inner.write().await;
        if expired(&inner, &token) {
            inner.remove(&token);
            return;
        }
        if let Some(entry) = inner.get_mut(&token) {
            entry.data.message = Some(message.to_string());
        }
    }

    /// Establish a fresh session for `username` with a welcome flash.
    /// Returns the `Set-Cookie` value for the response.
    ///
    /// # Errors
    /// Returns an error when token generation or cookie encoding fails.
    pub async fn sign_in(&self, username: &str, message: &str) -> Result<HeaderValue> {
        self.insert(SessionData {
            username: Some(username.to_string()),
            message: Some(message.to_string()),
        })
        .await
    }

    /// Drop the request's session and replace it with an anonymous one
    /// carrying the goodbye flash. Idempotent for signed-out clients.
    ///
    /// # Errors
    /// Returns an error when token generation or cookie encoding fails.
    pub async fn sign_out(&self, headers: &HeaderMap, message: &str) -> Result<HeaderValue> {
        if let Some(token) = extract_session_token(headers) {
            self.inner.write().await.remove(&token);
        }
        self.insert(SessionData {
            username: None,
            message: Some(message.to_string()),
        })
        .await
    }

    async fn insert(&self, data: SessionData) -> Result<HeaderValue> {
        let token = generate_session_token()?;
        let cookie = session_cookie(&token, self.ttl)?;
        self.inner.write().await.insert(
            token,
            Entry {
                data,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(cookie)
    }
}

/// Gate for authenticated-only routes: the username, or a redirect to `/`.
///
/// # Errors
/// Returns the redirect when no signed-in session is present.
pub async fn require_signed_in(
    sessions: &Sessions,
    headers: &HeaderMap,
) -> Result<String, Redirect> {
    sessions
        .identity(headers)
        .await
        .ok_or_else(|| Redirect::to("/"))
}

fn expired(inner: &HashMap<String, Entry>, token: &str) -> bool {
    inner
        .get(token)
        .is_some_and(|entry| entry.expires_at <= Instant::now())
}

/// Create a new session token. The raw value only ever lives in the
/// cookie; it is the map key server-side.
fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Build the `HttpOnly` cookie for the session token.
fn session_cookie(token: &str, ttl: Duration) -> Result<HeaderValue> {
    let ttl_seconds = ttl.as_secs();
    let cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    HeaderValue::from_str(&cookie).map_err(|err| anyhow!("invalid session cookie: {err}"))
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}
