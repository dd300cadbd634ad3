//! # API Route Modules
//!
//! - `compliance` — Compliance checks, report generation, and the
//!   owner-scoped record store (`/compliance/*`).

pub mod compliance;
