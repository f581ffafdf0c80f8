use geo_types::Point;
use rand::distributions::Uniform;
use rand::Rng;
use tracing::debug;

use crate::errors::{RasterError, Result};
use crate::fdw::{ForeignTable, Qual, Row};
use crate::options::TableOptions;
use crate::vector::point_to_wkb_hex;

/// Name of the single geometry column.
pub const GEOM_COLUMN: &str = "geom";

/// A table of uniformly distributed random points.
///
/// Options:
///  * `min_x`, `min_y`, `max_x`, `max_y`: sampling bounds (required)
///  * `num`: number of points per scan, defaults to 1
///  * `srid`: SRID attached to every point
#[derive(Debug, Clone)]
pub struct RandomPoint {
    x: Uniform<f64>,
    y: Uniform<f64>,
    num: usize,
    srid: Option<i32>,
}

impl RandomPoint {
    pub fn new(options: &TableOptions) -> Result<Self> {
        let min_x = options.required_f64("min_x")?;
        let min_y = options.required_f64("min_y")?;
        let max_x = options.required_f64("max_x")?;
        let max_y = options.required_f64("max_y")?;
        for (key, span) in [("max_x", max_x - min_x), ("max_y", max_y - min_y)] {
            if !span.is_finite() {
                return Err(RasterError::InvalidOption {
                    key: key.to_string(),
                    value: options.get(key).unwrap_or_default().to_string(),
                });
            }
        }
        Ok(RandomPoint {
            x: uniform(min_x, max_x),
            y: uniform(min_y, max_y),
            num: options.optional_usize("num", 1)?,
            srid: options.optional_i32("srid")?,
        })
    }

    pub fn num(&self) -> usize {
        self.num
    }

    pub fn srid(&self) -> Option<i32> {
        self.srid
    }

    /// Produce the rows of one scan, drawing coordinates from `rng`.
    pub fn execute_with_rng<'a, R: Rng + 'a>(
        &'a self,
        mut rng: R,
    ) -> impl Iterator<Item = Row> + 'a {
        (0..self.num).map(move |_| {
            let point = Point::new(rng.sample(&self.x), rng.sample(&self.y));
            Row::from([(GEOM_COLUMN.to_string(), point_to_wkb_hex(&point, self.srid))])
        })
    }
}

impl ForeignTable for RandomPoint {
    fn execute(&self, quals: &[Qual], columns: &[String]) -> Box<dyn Iterator<Item = Row> + '_> {
        debug!(
            num = self.num,
            quals = quals.len(),
            ?columns,
            "scanning random points"
        );
        Box::new(self.execute_with_rng(rand::thread_rng()))
    }
}

/// Inclusive uniform range; the bounds may be given in either order.
fn uniform(a: f64, b: f64) -> Uniform<f64> {
    Uniform::new_inclusive(a.min(b), a.max(b))
}
