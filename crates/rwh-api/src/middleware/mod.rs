//! # HTTP Middleware
//!
//! - `metrics` — Prometheus request metrics recorded around every handler,
//!   plus the registry the `/metrics` scrape endpoint encodes.

pub mod metrics;
