//! Asset and materialization descriptors.
//!
//! These types mirror the pipeline configuration files: the external loader
//! deserializes them with serde and hands them to the
//! [`Materializer`](crate::Materializer) untouched. Spellings on the wire are
//! snake_case (`delete_insert`, `time_interval`, ...).

use serde::{Deserialize, Serialize};

/// A named unit of a data pipeline, typically a table or view produced by
/// running a query against the destination warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Asset {
    /// Qualified destination name, e.g. `analytics.daily_orders`. Embedded
    /// verbatim in the generated SQL.
    pub name: String,
    #[serde(default)]
    pub materialization: Materialization,
    /// Destination column metadata; only the merge and ddl strategies read it.
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Asset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Names of all declared columns, in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of the columns flagged as primary key.
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of the columns a merge overwrites when it matches an existing row.
    pub fn update_on_merge_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.update_on_merge)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// A column of the destination table, as declared in the asset config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Warehouse type, embedded verbatim by the ddl strategy.
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub update_on_merge: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            primary_key: false,
            update_on_merge: false,
        }
    }

    /// Flag this column as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Flag this column to be overwritten when a merge matches on the key.
    pub fn update_on_merge(mut self) -> Self {
        self.update_on_merge = true;
        self
    }
}

/// How an asset's query result is persisted in the destination store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Materialization {
    #[serde(default, rename = "type")]
    pub kind: MaterializationType,
    #[serde(default)]
    pub strategy: MaterializationStrategy,
    /// Column identifying the rows an incremental load replaces. Required by
    /// the delete_insert and time_interval strategies.
    #[serde(default)]
    pub incremental_key: Option<String>,
    /// Resolution of the load window for the time_interval strategy.
    #[serde(default)]
    pub time_granularity: Option<TimeGranularity>,
}

/// What kind of object the asset materializes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterializationType {
    /// No persisted target; the raw query passes through untouched.
    #[default]
    None,
    View,
    Table,
}

impl std::fmt::Display for MaterializationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterializationType::None => write!(f, "none"),
            MaterializationType::View => write!(f, "view"),
            MaterializationType::Table => write!(f, "table"),
        }
    }
}

/// How rows reach the destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterializationStrategy {
    /// What an unset strategy means: full refresh.
    #[default]
    Default,
    /// Explicit spelling of the default full refresh.
    CreateReplace,
    Append,
    DeleteInsert,
    Merge,
    TimeInterval,
    Ddl,
    Scd2ByColumn,
    Scd2ByTime,
}

impl std::fmt::Display for MaterializationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterializationStrategy::Default => write!(f, "default"),
            MaterializationStrategy::CreateReplace => write!(f, "create_replace"),
            MaterializationStrategy::Append => write!(f, "append"),
            MaterializationStrategy::DeleteInsert => write!(f, "delete_insert"),
            MaterializationStrategy::Merge => write!(f, "merge"),
            MaterializationStrategy::TimeInterval => write!(f, "time_interval"),
            MaterializationStrategy::Ddl => write!(f, "ddl"),
            MaterializationStrategy::Scd2ByColumn => write!(f, "scd2_by_column"),
            MaterializationStrategy::Scd2ByTime => write!(f, "scd2_by_time"),
        }
    }
}

/// Resolution of a time_interval load window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeGranularity {
    Date,
    Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_spellings() {
        let strategy: MaterializationStrategy = serde_json::from_str("\"delete_insert\"").unwrap();
        assert_eq!(strategy, MaterializationStrategy::DeleteInsert);
        assert_eq!(strategy.to_string(), "delete_insert");
        assert_eq!(
            serde_json::to_string(&MaterializationStrategy::Scd2ByColumn).unwrap(),
            "\"scd2_by_column\""
        );
    }

    #[test]
    fn test_default_materialization_is_none() {
        let materialization = Materialization::default();
        assert_eq!(materialization.kind, MaterializationType::None);
        assert_eq!(materialization.strategy, MaterializationStrategy::Default);
        assert!(materialization.incremental_key.is_none());
        assert!(materialization.time_granularity.is_none());
    }

    #[test]
    fn test_column_accessors() {
        let mut asset = Asset::new("my.asset");
        asset.columns = vec![
            Column::new("id", "bigint").primary_key(),
            Column::new("name", "text"),
            Column::new("amount", "numeric").update_on_merge(),
        ];

        assert_eq!(asset.column_names(), vec!["id", "name", "amount"]);
        assert_eq!(asset.primary_key_columns(), vec!["id"]);
        assert_eq!(asset.update_on_merge_columns(), vec!["amount"]);
    }
}
