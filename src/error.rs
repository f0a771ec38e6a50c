//! Error types for materialization rendering.

use thiserror::Error;

use crate::asset::{MaterializationStrategy, MaterializationType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterializeError {
    /// The (type, strategy) pair has no render rule in this materializer.
    #[error("unsupported materialization: type {kind}, strategy {strategy}")]
    UnsupportedMaterialization {
        kind: MaterializationType,
        strategy: MaterializationStrategy,
    },

    /// A strategy-specific required field is absent or empty.
    #[error("materialization strategy {strategy} requires the `{field}` field to be set")]
    MissingRequiredField {
        strategy: MaterializationStrategy,
        field: &'static str,
    },
}

impl MaterializeError {
    /// Create a missing-field error for a strategy.
    pub fn missing(strategy: MaterializationStrategy, field: &'static str) -> Self {
        Self::MissingRequiredField { strategy, field }
    }

    /// Create an unsupported-combination error.
    pub fn unsupported(kind: MaterializationType, strategy: MaterializationStrategy) -> Self {
        Self::UnsupportedMaterialization { kind, strategy }
    }
}

/// Result type alias for materialization rendering.
pub type MaterializeResult<T> = Result<T, MaterializeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MaterializeError::missing(MaterializationStrategy::DeleteInsert, "incremental_key");
        assert_eq!(
            err.to_string(),
            "materialization strategy delete_insert requires the `incremental_key` field to be set"
        );

        let err = MaterializeError::unsupported(
            MaterializationType::Table,
            MaterializationStrategy::Scd2ByTime,
        );
        assert_eq!(
            err.to_string(),
            "unsupported materialization: type table, strategy scd2_by_time"
        );
    }
}
