//! ANSI render functions, one per materialization strategy.
//!
//! Each function is a pure mapping from asset + query to SQL text; the query
//! is embedded verbatim, never parsed. Multi-statement plans are wrapped in a
//! single BEGIN TRANSACTION block so a rerun either applies completely or not
//! at all, and readers never observe the target half-built.

use crate::asset::{Asset, TimeGranularity};

/// Prefix of the staging table used by incremental strategies.
pub const TEMP_TABLE_PREFIX: &str = "__tmp_";

/// Wrap statements in a BEGIN TRANSACTION block, one statement per line.
fn transaction<I>(statements: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut all = vec!["BEGIN TRANSACTION".to_string()];
    all.extend(statements);
    all.push("COMMIT".to_string());
    all.join(";\n") + ";"
}

/// `CREATE OR REPLACE VIEW`; replacement is atomic in the target engine.
pub fn build_view(asset: &Asset, query: &str) -> String {
    format!("CREATE OR REPLACE VIEW {} AS\n{}", asset.name, query)
}

/// Full snapshot rebuild: drop and recreate the table in one transaction.
/// Assumes the engine supports transactional DDL; engines that do not
/// override this through the dialect seam with a rename/swap pattern.
pub fn build_create_replace(asset: &Asset, query: &str) -> String {
    transaction([
        format!("DROP TABLE IF EXISTS {}", asset.name),
        format!("CREATE TABLE {} AS {}", asset.name, query),
    ])
}

/// Plain `INSERT INTO ... SELECT`; atomicity is the engine's own statement
/// guarantee, so no transaction wrapper.
pub fn build_append(asset: &Asset, query: &str) -> String {
    format!("INSERT INTO {} {}", asset.name, query)
}

/// Incremental upsert-by-key: stage the query result, delete every key the
/// stage contains from the target, insert the staged rows, drop the stage.
pub fn build_delete_insert(
    asset: &Asset,
    query: &str,
    incremental_key: &str,
    suffix: &str,
) -> String {
    let tmp = format!("{}{}", TEMP_TABLE_PREFIX, suffix);
    transaction([
        format!("CREATE TEMP TABLE {} AS {}", tmp, query),
        format!(
            "DELETE FROM {} WHERE {} IN (SELECT DISTINCT {} FROM {})",
            asset.name, incremental_key, incremental_key, tmp
        ),
        format!("INSERT INTO {} SELECT * FROM {}", asset.name, tmp),
        format!("DROP TABLE IF EXISTS {}", tmp),
    ])
}

/// ANSI MERGE on the primary-key columns. The dispatcher guarantees at least
/// one primary-key column before calling this.
pub fn build_merge(asset: &Asset, query: &str) -> String {
    let primary_keys = asset.primary_key_columns();
    let update_columns = asset.update_on_merge_columns();
    let all_columns = asset.column_names().join(", ");

    let on = primary_keys
        .iter()
        .map(|c| format!("target.{} = source.{}", c, c))
        .collect::<Vec<_>>()
        .join(" AND ");

    // A trailing semicolon inside the parenthesised source is invalid SQL.
    let source = query.trim_end().trim_end_matches(';');

    let mut lines = vec![
        format!("MERGE INTO {} target", asset.name),
        format!("USING ({}) source ON {}", source, on),
    ];
    if !update_columns.is_empty() {
        let assignments = update_columns
            .iter()
            .map(|c| format!("target.{} = source.{}", c, c))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("WHEN MATCHED THEN UPDATE SET {}", assignments));
    }
    lines.push(format!(
        "WHEN NOT MATCHED THEN INSERT({}) VALUES({})",
        all_columns, all_columns
    ));

    lines.join("\n") + ";"
}

/// Replace one load window: delete the rows whose incremental key falls
/// between the pipeline's start/end variables, then insert the fresh rows.
/// The `{{...}}` placeholders are substituted by the surrounding pipeline
/// before execution; to this renderer they are opaque text.
pub fn build_time_interval(
    asset: &Asset,
    query: &str,
    incremental_key: &str,
    granularity: TimeGranularity,
) -> String {
    let (start, end) = match granularity {
        TimeGranularity::Date => ("{{start_date}}", "{{end_date}}"),
        TimeGranularity::Timestamp => ("{{start_timestamp}}", "{{end_timestamp}}"),
    };
    transaction([
        format!(
            "DELETE FROM {} WHERE {} BETWEEN '{}' AND '{}'",
            asset.name, incremental_key, start, end
        ),
        format!("INSERT INTO {} {}", asset.name, query),
    ])
}

/// `CREATE TABLE IF NOT EXISTS` from the declared columns; the query is not
/// consulted. The dispatcher guarantees the column list is non-empty.
pub fn build_ddl(asset: &Asset) -> String {
    let mut defs: Vec<String> = asset
        .columns
        .iter()
        .map(|c| format!("{} {}", c.name, c.data_type))
        .collect();

    let primary_keys = asset.primary_key_columns();
    if !primary_keys.is_empty() {
        defs.push(format!("PRIMARY KEY ({})", primary_keys.join(", ")));
    }

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        asset.name,
        defs.join(",\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Column;

    #[test]
    fn test_transaction_envelope() {
        let sql = transaction([
            "DROP TABLE IF EXISTS t".to_string(),
            "CREATE TABLE t AS SELECT 1".to_string(),
        ]);
        assert_eq!(
            sql,
            "BEGIN TRANSACTION;\nDROP TABLE IF EXISTS t;\nCREATE TABLE t AS SELECT 1;\nCOMMIT;"
        );
    }

    #[test]
    fn test_merge_trims_trailing_semicolon() {
        let mut asset = Asset::new("t");
        asset.columns = vec![Column::new("id", "bigint").primary_key()];

        let sql = build_merge(&asset, "SELECT 1;\n");
        assert!(sql.contains("USING (SELECT 1) source ON target.id = source.id"));
    }

    #[test]
    fn test_ddl_places_primary_key_last() {
        let mut asset = Asset::new("t");
        asset.columns = vec![
            Column::new("id", "bigint").primary_key(),
            Column::new("dt", "date").primary_key(),
        ];

        assert_eq!(
            build_ddl(&asset),
            "CREATE TABLE IF NOT EXISTS t (\nid bigint,\ndt date,\nPRIMARY KEY (id, dt)\n)"
        );
    }
}
