//! The materializer: dispatch from (type, strategy) to rendered SQL.

mod dialect;
pub mod strategy;
mod suffix;

pub use dialect::{AnsiDialect, Dialect};
pub use strategy::TEMP_TABLE_PREFIX;
pub use suffix::{RandomSuffix, SuffixGenerator};

use crate::asset::{Asset, MaterializationStrategy, MaterializationType};
use crate::error::{MaterializeError, MaterializeResult};

/// Renders the SQL that materializes an asset's query into its destination.
///
/// Construction fixes the dialect and the staging-suffix source; after that
/// the materializer holds no mutable state and is safe to share across the
/// threads rendering a pipeline's assets.
pub struct Materializer {
    dialect: Box<dyn Dialect>,
    suffix: Box<dyn SuffixGenerator>,
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Materializer {
    /// ANSI dialect, random staging suffixes.
    pub fn new() -> Self {
        Self {
            dialect: Box::new(AnsiDialect::new()),
            suffix: Box::new(RandomSuffix),
        }
    }

    /// Render through a specific dialect.
    pub fn with_dialect(mut self, dialect: impl Dialect + 'static) -> Self {
        self.dialect = Box::new(dialect);
        self
    }

    /// Replace the staging-suffix source; tests inject a deterministic stub.
    pub fn with_suffix_generator(mut self, generator: impl SuffixGenerator + 'static) -> Self {
        self.suffix = Box::new(generator);
        self
    }

    /// Produce the SQL text that materializes `query` into `asset`.
    ///
    /// Returns the query untouched for assets with no materialization;
    /// otherwise a single statement or one BEGIN TRANSACTION block. Fails
    /// without emitting any SQL when a strategy precondition is unmet or the
    /// (type, strategy) pair has no render rule.
    ///
    /// The match below is deliberately exhaustive: adding a strategy variant
    /// breaks compilation here until the new combination is handled.
    pub fn render(&self, asset: &Asset, query: &str) -> MaterializeResult<String> {
        let materialization = &asset.materialization;
        match (materialization.kind, materialization.strategy) {
            (MaterializationType::None, _) => Ok(query.to_string()),

            // Strategy is ignored for views; replacement is always a single
            // atomic DDL statement.
            (MaterializationType::View, _) => self.dialect.view(asset, query),

            (
                MaterializationType::Table,
                MaterializationStrategy::Default | MaterializationStrategy::CreateReplace,
            ) => self.dialect.create_replace(asset, query),

            (MaterializationType::Table, MaterializationStrategy::Append) => {
                self.dialect.append(asset, query)
            }

            (MaterializationType::Table, MaterializationStrategy::DeleteInsert) => {
                let key = require_field(
                    materialization.incremental_key.as_deref(),
                    materialization.strategy,
                    "incremental_key",
                )?;
                let suffix = self.suffix.generate();
                self.dialect.delete_insert(asset, query, key, &suffix)
            }

            (MaterializationType::Table, MaterializationStrategy::Merge) => {
                if asset.columns.is_empty() {
                    return Err(MaterializeError::missing(materialization.strategy, "columns"));
                }
                if asset.primary_key_columns().is_empty() {
                    return Err(MaterializeError::missing(
                        materialization.strategy,
                        "primary_key",
                    ));
                }
                self.dialect.merge(asset, query)
            }

            (MaterializationType::Table, MaterializationStrategy::TimeInterval) => {
                let key = require_field(
                    materialization.incremental_key.as_deref(),
                    materialization.strategy,
                    "incremental_key",
                )?;
                let granularity = materialization.time_granularity.ok_or_else(|| {
                    MaterializeError::missing(materialization.strategy, "time_granularity")
                })?;
                self.dialect.time_interval(asset, query, key, granularity)
            }

            (MaterializationType::Table, MaterializationStrategy::Ddl) => {
                if asset.columns.is_empty() {
                    return Err(MaterializeError::missing(materialization.strategy, "columns"));
                }
                self.dialect.ddl(asset)
            }

            // Representable in configuration but not rendered here; SCD2
            // loads are engine-specific.
            (
                MaterializationType::Table,
                MaterializationStrategy::Scd2ByColumn | MaterializationStrategy::Scd2ByTime,
            ) => Err(MaterializeError::unsupported(
                materialization.kind,
                materialization.strategy,
            )),
        }
    }
}

/// A required strategy field: present and non-empty, or a missing-field error
/// naming it.
fn require_field<'a>(
    value: Option<&'a str>,
    strategy: MaterializationStrategy,
    field: &'static str,
) -> MaterializeResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(MaterializeError::missing(strategy, field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field_rejects_empty_and_absent() {
        let err = require_field(
            Some(""),
            MaterializationStrategy::DeleteInsert,
            "incremental_key",
        )
        .unwrap_err();
        assert_eq!(
            err,
            MaterializeError::missing(MaterializationStrategy::DeleteInsert, "incremental_key")
        );

        assert!(
            require_field(None, MaterializationStrategy::DeleteInsert, "incremental_key").is_err()
        );
        assert_eq!(
            require_field(Some("dt"), MaterializationStrategy::DeleteInsert, "incremental_key"),
            Ok("dt")
        );
    }
}
