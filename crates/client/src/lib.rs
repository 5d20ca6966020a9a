//! Webhook client — the resilient request layer.
//!
//! This crate is the single place rowhook talks HTTP: every operation
//! is a JSON POST tried against each candidate endpoint in order until
//! one succeeds. First success wins; exhaustion surfaces the last
//! error together with every URL that was attempted.
//!
//! No UI concepts. No retries within a URL. No concurrency.

mod client;
mod error;

pub use client::WebhookClient;
pub use error::{AttemptError, EndpointsExhausted};
