//! HTTP client layer — `GeckoHttp` with per-request retry policies.

pub mod client;
pub mod retry;

pub use client::GeckoHttp;
pub use retry::{RetryConfig, RetryPolicy};
