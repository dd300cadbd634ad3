//! Error types for catalogue loading and rule evaluation.

use thiserror::Error;

/// Result alias for catalogue operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A rule could not be evaluated against the supplied parameters.
///
/// Absent inputs are NOT errors (they fail the thresholds that need them);
/// only unusable values reach this type. The aggregation layer folds these
/// into non-compliant outcomes rather than propagating them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A numeric parameter is NaN or infinite.
    #[error("parameter {field} is not a finite number")]
    NonFiniteValue { field: &'static str },
}

/// A regulation catalogue failed validation or could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two regulations share the same id.
    #[error("duplicate regulation id: {id}")]
    DuplicateRuleId { id: String },

    /// A regulation has an empty required text field.
    #[error("regulation {id} has an empty {field}")]
    EmptyField { id: String, field: &'static str },

    /// A regulation threshold is NaN or infinite.
    #[error("regulation {id} has a non-finite threshold")]
    NonFiniteThreshold { id: String },

    /// A region scope was empty or whitespace-only.
    #[error("region scope must not be empty")]
    EmptyRegionScope,

    /// The catalogue file could not be parsed.
    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_error_names_the_field() {
        let err = EvalError::NonFiniteValue { field: "roofArea" };
        assert_eq!(err.to_string(), "parameter roofArea is not a finite number");
    }

    #[test]
    fn catalog_error_messages() {
        let dup = CatalogError::DuplicateRuleId {
            id: "CGWB-2020-3.2".to_string(),
        };
        assert!(dup.to_string().contains("CGWB-2020-3.2"));

        let empty = CatalogError::EmptyField {
            id: "X-1".to_string(),
            field: "source",
        };
        assert_eq!(empty.to_string(), "regulation X-1 has an empty source");
    }
}
