//! Materialization SQL renderer for keel pipelines.
//!
//! Turn an asset descriptor plus the SELECT that computes it into the exact
//! SQL text to run against the destination warehouse. Pure text generation:
//! no connections, no execution.
//!
//! ```
//! use keel_materialize::{Asset, Materializer, MaterializationType};
//!
//! let mut asset = Asset::new("analytics.daily_orders");
//! asset.materialization.kind = MaterializationType::View;
//!
//! let sql = Materializer::new()
//!     .render(&asset, "SELECT * FROM raw.orders")
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     "CREATE OR REPLACE VIEW analytics.daily_orders AS\nSELECT * FROM raw.orders"
//! );
//! ```

pub mod asset;
pub mod error;
pub mod materializer;

pub use asset::{
    Asset, Column, Materialization, MaterializationStrategy, MaterializationType, TimeGranularity,
};
pub use error::{MaterializeError, MaterializeResult};
pub use materializer::{
    AnsiDialect, Dialect, Materializer, RandomSuffix, SuffixGenerator, TEMP_TABLE_PREFIX,
};

pub mod prelude {
    pub use crate::asset::*;
    pub use crate::error::*;
    pub use crate::materializer::{
        AnsiDialect, Dialect, Materializer, RandomSuffix, SuffixGenerator, TEMP_TABLE_PREFIX,
    };
}
