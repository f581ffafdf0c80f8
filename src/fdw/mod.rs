//! Foreign data sources
//!
//! A foreign table is queried once per scan: it receives the query
//! qualifiers and the requested columns and hands back a fresh, finite
//! sequence of rows. Dropping the iterator cancels the scan.

mod random_point;

use std::collections::BTreeMap;

pub use random_point::RandomPoint;

/// A row, keyed by column name. Geometry columns hold hex WKB.
pub type Row = BTreeMap<String, String>;

/// A query qualifier pushed down by the host. Sources may ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qual {
    pub field_name: String,
    pub operator: String,
    pub value: String,
}

pub trait ForeignTable {
    /// Start a scan producing the rows of this table.
    fn execute(&self, quals: &[Qual], columns: &[String]) -> Box<dyn Iterator<Item = Row> + '_>;
}
