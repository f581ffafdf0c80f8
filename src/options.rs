//! Table options
//!
//! Foreign tables are configured with string-keyed options. [`TableOptions`]
//! parses them into the numeric types the data sources need.
//!
//! ```
//! use pgraster::options::TableOptions;
//!
//! let options = TableOptions::from_iter([("min_x", "-10"), ("num", "5")]);
//! assert_eq!(options.required_f64("min_x").unwrap(), -10.0);
//! assert_eq!(options.optional_usize("num", 1).unwrap(), 5);
//! assert_eq!(options.optional_i32("srid").unwrap(), None);
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use crate::errors::{RasterError, Result};

#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    options: HashMap<String, String>,
}

impl TableOptions {
    pub fn new(options: HashMap<String, String>) -> Self {
        TableOptions { options }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Parse a finite float that must be present.
    pub fn required_f64(&self, key: &str) -> Result<f64> {
        let value = self
            .get(key)
            .ok_or_else(|| RasterError::MissingOption(key.to_string()))?;
        match self.parse::<f64>(key)? {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(invalid(key, value)),
        }
    }

    pub fn optional_usize(&self, key: &str, default: usize) -> Result<usize> {
        Ok(self.parse(key)?.unwrap_or(default))
    }

    pub fn optional_i32(&self, key: &str) -> Result<Option<i32>> {
        self.parse(key)
    }

    fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|value| value.trim().parse().map_err(|_| invalid(key, value)))
            .transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TableOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TableOptions::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn invalid(key: &str, value: &str) -> RasterError {
    RasterError::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
    }
}
