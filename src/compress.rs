//! Segment compression
//!
//! Every segment between two seams is replaced by one representative column:
//! the per-scanline median over the segment's columns, made relative to the
//! first scanline of its swath.

use ndarray::{s, Array1, Array2, ArrayView1};
use tracing::debug;

use crate::config::SwathGeometry;
use crate::error::{Result, SortGenError};
use crate::seams::Seam;

/// One segment of the compressed table
#[derive(Debug, Clone, PartialEq)]
pub struct SortSegment {
    /// Swath-relative sorting index per scanline
    pub column: Array1<i32>,
    /// Number of original columns this segment stands in for
    pub width: usize,
    /// Column range the median was taken over
    pub window: (usize, usize),
}

/// Ordered representative columns with their widths
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedSortIndex {
    pub segments: Vec<SortSegment>,
    pub swath_height: usize,
}

impl CompressedSortIndex {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn widths(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.width).collect()
    }

    pub fn total_width(&self) -> usize {
        self.segments.iter().map(|s| s.width).sum()
    }

    /// Scanline count of the columns (all segments share it)
    pub fn rows(&self) -> usize {
        self.segments.first().map(|s| s.column.len()).unwrap_or(0)
    }
}

/// Reduce the table to one representative column per segment.
///
/// The median window of each segment runs from the previous seam's `end` up
/// to the current seam's `start`; the final segment runs from the last `end`
/// to the last column. Widths are distances between consecutive seam
/// midpoints, so they always add up to the table width.
pub fn compress(
    table: &Array2<i32>,
    seams: &[Seam],
    geometry: &SwathGeometry,
) -> Result<CompressedSortIndex> {
    geometry.check_rows(table.nrows())?;
    if table.ncols() != geometry.columns {
        return Err(SortGenError::DegenerateGeometry(format!(
            "table has {} columns, geometry expects {}",
            table.ncols(),
            geometry.columns
        )));
    }

    let columns = table.ncols();
    let mut segments = Vec::with_capacity(seams.len() + 1);
    let mut prev_end = 0;
    let mut prev_mid = 0;

    for (index, seam) in seams.iter().enumerate() {
        let column = representative_column(table, index, prev_end, seam.start, geometry)?;
        segments.push(SortSegment {
            column,
            width: seam.mid - prev_mid,
            window: (prev_end, seam.start),
        });
        prev_end = seam.end;
        prev_mid = seam.mid;
    }

    let column = representative_column(table, seams.len(), prev_end, columns, geometry)?;
    segments.push(SortSegment {
        column,
        width: columns - prev_mid,
        window: (prev_end, columns),
    });

    debug!(
        "Compressed {} columns into {} segments",
        columns,
        segments.len()
    );

    Ok(CompressedSortIndex {
        segments,
        swath_height: geometry.swath_height,
    })
}

fn representative_column(
    table: &Array2<i32>,
    segment: usize,
    lo: usize,
    hi: usize,
    geometry: &SwathGeometry,
) -> Result<Array1<i32>> {
    if lo >= hi {
        return Err(SortGenError::DegenerateGeometry(format!(
            "segment {} has an empty median window [{}, {})",
            segment, lo, hi
        )));
    }

    let window = table.slice(s![.., lo..hi]);
    let h = geometry.swath_height;
    let column = window
        .rows()
        .into_iter()
        .enumerate()
        .map(|(r, row)| {
            let swath_start = (r - r % h) as i32;
            median_truncated(row).wrapping_sub(swath_start)
        })
        .collect();
    Ok(column)
}

/// Median of a non-empty row, truncated toward zero
pub fn median_truncated(row: ArrayView1<i32>) -> i32 {
    let mut values = row.to_vec();
    values.sort_unstable();
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        let pair = f64::from(values[n / 2 - 1]) + f64::from(values[n / 2]);
        (pair / 2.0) as i32
    }
}
