//! HTTP client for the storefront chat backend.
//!
//! Implements the [`ChatTransport`](crate::ChatTransport) trait against the
//! backend's fixed contract:
//! - `POST /chat` with `{"message", "session_id"}`, optional bearer auth
//! - `DELETE /chat/end_session` with `{"session_id"}`, response ignored

mod api;
mod client;
mod config;

pub use client::BackendClient;
pub use config::BackendConfig;
