//! # rwh-core
//!
//! Foundational types for the rainwater-harvesting compliance engine.
//!
//! This crate defines the shapes every other crate agrees on:
//!
//! - [`SystemParameters`] — one rooftop harvesting design as submitted for
//!   assessment (location, roof area, pit geometry, storage, filtration)
//! - [`RuleOutcome`] — the result of evaluating a single regulation
//! - [`ComplianceVerdict`] — the aggregated check result with a content digest
//! - [`ComplianceStatus`] — the persisted record status derived from outcomes
//! - [`InputError`] — typed validation failures for caller-supplied input
//!
//! Evaluation logic lives in `rwh-reg`; this crate stays free of catalogue
//! and HTTP concerns so the CLI, API, and engine all share one vocabulary.

pub mod error;
pub mod params;
pub mod verdict;

pub use error::InputError;
pub use params::{FiltrationSpec, RechargePit, SystemParameters, SystemSpecs};
pub use verdict::{ComplianceStatus, ComplianceVerdict, RuleOutcome};
