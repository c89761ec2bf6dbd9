//! Rebuild a full sorting-index table from the emitted windows
//!
//! This is what the consumer of the generated arrays does at runtime; doing
//! it here lets the generator show how far the compressed table is from the
//! source dump.

use ndarray::Array2;
use tracing::debug;

use crate::compress::CompressedSortIndex;
use crate::config::SwathGeometry;
use crate::emit::swath_windows;
use crate::error::{Result, SortGenError};

/// Expand the first/middle/last windows to `swaths` swaths of full width
pub fn expand(
    compressed: &CompressedSortIndex,
    swaths: usize,
    geometry: &SwathGeometry,
) -> Result<Array2<i32>> {
    let h = geometry.swath_height;
    let height = swaths * h;
    geometry.check_rows(height)?;

    let total = compressed.total_width();
    if total != geometry.columns {
        return Err(SortGenError::WidthMismatch {
            expected: geometry.columns,
            actual: total,
        });
    }

    let windows = swath_windows(compressed)?;
    let mut table = Array2::<i32>::zeros((height, geometry.columns));
    let mut x = 0;
    for (segment, w) in compressed.segments.iter().zip(&windows) {
        for col in x..x + segment.width {
            for y in 0..height {
                let base = (y - y % h) as i32;
                let value = if y < h {
                    i32::from(w.first[y])
                } else if y < height - h {
                    base + i32::from(w.mid[y % h])
                } else {
                    base + i32::from(w.last[y % h])
                };
                table[[y, col]] = value;
            }
        }
        x += segment.width;
    }

    debug!("Expanded {} segments to {}x{}", windows.len(), height, geometry.columns);
    Ok(table)
}

/// Number of cells where two equally-shaped tables differ
pub fn count_mismatches(a: &Array2<i32>, b: &Array2<i32>) -> Result<usize> {
    if a.dim() != b.dim() {
        return Err(SortGenError::DegenerateGeometry(format!(
            "cannot compare {:?} with {:?}",
            a.dim(),
            b.dim()
        )));
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}
