//! Dialect seam for engines that deviate from the ANSI render functions.

use crate::asset::{Asset, TimeGranularity};
use crate::error::MaterializeResult;
use crate::materializer::strategy;

/// Per-strategy SQL generation for one destination engine.
///
/// Every method defaults to the ANSI text from [`strategy`]; a dialect
/// overrides only what its engine does differently, e.g. a rename/swap full
/// refresh where DDL is not transactional. The dispatcher validates strategy
/// preconditions before calling in, so `incremental_key` and `suffix` arrive
/// non-empty.
pub trait Dialect: Send + Sync {
    /// `CREATE OR REPLACE VIEW`.
    fn view(&self, asset: &Asset, query: &str) -> MaterializeResult<String> {
        Ok(strategy::build_view(asset, query))
    }

    /// Full refresh: drop and recreate the table in one transaction.
    fn create_replace(&self, asset: &Asset, query: &str) -> MaterializeResult<String> {
        Ok(strategy::build_create_replace(asset, query))
    }

    /// `INSERT INTO ... SELECT`, no transaction wrapper.
    fn append(&self, asset: &Asset, query: &str) -> MaterializeResult<String> {
        Ok(strategy::build_append(asset, query))
    }

    /// Incremental upsert-by-key through a staging temp table.
    fn delete_insert(
        &self,
        asset: &Asset,
        query: &str,
        incremental_key: &str,
        suffix: &str,
    ) -> MaterializeResult<String> {
        Ok(strategy::build_delete_insert(asset, query, incremental_key, suffix))
    }

    /// ANSI MERGE on the primary-key columns.
    fn merge(&self, asset: &Asset, query: &str) -> MaterializeResult<String> {
        Ok(strategy::build_merge(asset, query))
    }

    /// Replace one load window bounded by the pipeline's start/end variables.
    fn time_interval(
        &self,
        asset: &Asset,
        query: &str,
        incremental_key: &str,
        granularity: TimeGranularity,
    ) -> MaterializeResult<String> {
        Ok(strategy::build_time_interval(asset, query, incremental_key, granularity))
    }

    /// `CREATE TABLE IF NOT EXISTS` from the declared columns.
    fn ddl(&self, asset: &Asset) -> MaterializeResult<String> {
        Ok(strategy::build_ddl(asset))
    }
}

/// ANSI SQL with transactional DDL; the default dialect.
pub struct AnsiDialect;

impl Default for AnsiDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for AnsiDialect {}
