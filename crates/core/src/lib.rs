//! Core domain types for the UserHub client SDK.
//!
//! Everything the client crates share: the user model, auth payloads,
//! response envelopes, the uniform [`error::ApiError`] value, and the
//! [`types::ActionResult`] contract returned by session-store actions.
//!
//! This crate is intentionally transport-free -- it knows nothing about
//! HTTP. Conversions from transport errors live in `userhub-client`.

pub mod auth;
pub mod error;
pub mod types;
pub mod user;
