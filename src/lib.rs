//! # Kontakti (personal contact list)
//!
//! `kontakti` is a small self-hosted contact list. Users sign up with a
//! username and password, sign in, and keep contacts (name, mobile, home
//! phone, email) in three fixed categories: family, friends and work.
//!
//! ## Storage
//!
//! Persistence is flat-file YAML under a single data directory:
//!
//! - `users.yml` — one mapping from username to Argon2id password hash.
//! - `contacts/<username>.yml` — one three-bucket contact document per user.
//!
//! Documents are loaded fully on each access and rewritten fully on each
//! mutation. Every read-modify-write runs under a per-store lock, so
//! concurrent requests against the same document cannot lose writes.
//!
//! ## Sessions
//!
//! Authentication state lives server-side in an in-memory session store,
//! addressed by a random token carried in an `HttpOnly` cookie. Sessions
//! also carry the one-shot flash message shown on the next rendered page.

pub mod api;
pub mod auth;
pub mod cli;
pub mod contacts;
pub mod store;

pub const GIT_COMMIT_HASH: &str = env!("KONTAKTI_GIT_SHA");
