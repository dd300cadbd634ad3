//! Typed validation errors for caller-supplied input.
//!
//! These carry the exact messages surfaced to callers at the service
//! boundary, so the HTTP layer maps them without rewording.

use thiserror::Error;

/// A required piece of caller input is missing or unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// No usable location was supplied for regulation selection.
    #[error("location is required")]
    MissingLocation,

    /// A report was requested without any rule outcomes to render.
    #[error("compliance results are required")]
    MissingResults,

    /// A report was requested without stating which region it covers.
    #[error("region is required")]
    MissingRegion,
}
