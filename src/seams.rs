//! Seam detection over the column axis
//!
//! A seam is a column gap whose absolute difference is zero in every
//! scanline. The gaps between seams become segments, each of which is later
//! stood in for by a single representative column.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Boundary of one detected segment, in column-gap indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seam {
    pub start: usize,
    pub end: usize,
    pub mid: usize,
}

/// Mean absolute difference across all rows for every adjacent column pair.
///
/// The result has `ncols - 1` entries; entry `j` is exactly `0.0` iff
/// columns `j` and `j + 1` are identical in every row.
pub fn column_spikes(table: &Array2<i32>) -> Array1<f64> {
    let rows = table.nrows().max(1) as f64;
    let gaps = table.ncols().saturating_sub(1);

    Array1::from_shape_fn(gaps, |j| {
        let left = table.index_axis(Axis(1), j);
        let right = table.index_axis(Axis(1), j + 1);
        let total: i64 = left
            .iter()
            .zip(right.iter())
            .map(|(&a, &b)| (i64::from(b) - i64::from(a)).abs())
            .sum();
        total as f64 / rows
    })
}

/// Split the gap range at every zero spike and keep runs longer than one.
///
/// Each kept run reports its second index as `start`: the leading index of
/// every run is dropped, including the very first run that starts at gap 0
/// (sic, kept for compatibility with the shipped tables). A spike vector
/// without any zero yields no seams at all.
pub fn detect_seams(spikes: &Array1<f64>) -> Vec<Seam> {
    let zeros: Vec<usize> = spikes
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == 0.0)
        .map(|(i, _)| i)
        .collect();
    if zeros.is_empty() {
        debug!("No zero spikes in {} gaps", spikes.len());
        return Vec::new();
    }

    let mut bounds = Vec::with_capacity(zeros.len() + 2);
    bounds.push(0);
    bounds.extend_from_slice(&zeros);
    bounds.push(spikes.len());

    let seams: Vec<Seam> = bounds
        .windows(2)
        .filter(|w| w[1] > w[0] + 1)
        .map(|w| {
            let start = w[0] + 1;
            let end = w[1] - 1;
            Seam { start, end, mid: (start + end) / 2 }
        })
        .collect();

    debug!("{} zero spikes -> {} seams", zeros.len(), seams.len());
    seams
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_identical_columns_give_zero_spike() {
        let table = array![[0, 5, 5, 1], [3, 2, 2, 7], [1, 1, 1, 1]];
        let spikes = column_spikes(&table);
        assert_eq!(spikes.len(), 3);
        assert_eq!(spikes[1], 0.0);
        assert!(spikes[0] > 0.0);
        assert!(spikes[2] > 0.0);
        // |5-0| + |2-3| + |1-1| over 3 rows
        assert_eq!(spikes[0], 2.0);
    }

    #[test]
    fn test_spike_is_nonzero_if_any_row_differs() {
        let table = array![[4, 4], [4, 4], [4, 5]];
        let spikes = column_spikes(&table);
        assert!(spikes[0] > 0.0);
    }

    #[test]
    fn test_seams_at_known_positions() {
        let spikes = array![2.0, 0.0, 2.0, 0.0, 1.5];
        let seams = detect_seams(&spikes);
        assert_eq!(
            seams,
            vec![
                Seam { start: 2, end: 2, mid: 2 },
                Seam { start: 4, end: 4, mid: 4 },
            ]
        );
    }

    #[test]
    fn test_leading_index_of_first_run_is_dropped() {
        let spikes = array![1.0, 1.0, 1.0, 0.0, 1.0];
        let seams = detect_seams(&spikes);
        assert_eq!(seams[0], Seam { start: 1, end: 2, mid: 1 });
        assert_eq!(seams[1], Seam { start: 4, end: 4, mid: 4 });
    }

    #[test]
    fn test_adjacent_zeros_are_not_segments() {
        // Runs [0], [1] have length one and are skipped
        let spikes = array![1.0, 0.0, 0.0, 1.0, 1.0];
        assert_eq!(detect_seams(&spikes), vec![Seam { start: 3, end: 4, mid: 3 }]);
    }

    #[test]
    fn test_trailing_zero_makes_no_seam() {
        let spikes = array![1.0, 1.0, 0.0];
        assert_eq!(detect_seams(&spikes), vec![Seam { start: 1, end: 1, mid: 1 }]);
    }

    #[test]
    fn test_no_zero_spikes() {
        let spikes = array![1.0, 0.5, 3.0];
        assert!(detect_seams(&spikes).is_empty());
    }
}
