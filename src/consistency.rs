//! Periodicity check on the compressed columns
//!
//! Only the first and last swath may differ; every interior swath must carry
//! the same swath-relative pattern, otherwise the SORT_MID row cannot stand
//! in for it.

use ndarray::s;
use tracing::info;

use crate::compress::CompressedSortIndex;
use crate::error::{Result, SortGenError};

pub fn check_periodicity(compressed: &CompressedSortIndex) -> Result<()> {
    let h = compressed.swath_height;
    if h == 0 {
        return Err(SortGenError::DegenerateGeometry(
            "swath height must be positive".to_string(),
        ));
    }

    for (index, segment) in compressed.segments.iter().enumerate() {
        let len = segment.column.len();
        if len < 2 * h || len % h != 0 {
            return Err(SortGenError::DegenerateGeometry(format!(
                "segment {} has {} rows, need a multiple of {} and at least {}",
                index,
                len,
                h,
                2 * h
            )));
        }

        let interior = segment.column.slice(s![h..len - h]);
        let groups: Vec<_> = interior.exact_chunks(h).into_iter().collect();
        if let Some(group) = groups.windows(2).position(|pair| pair[0] != pair[1]) {
            return Err(SortGenError::Periodicity {
                segment: index,
                group: group + 1,
            });
        }
    }

    info!(
        "All {} segments repeat identically across interior swaths",
        compressed.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::SortSegment;
    use ndarray::{array, Array1};

    fn compressed(columns: Vec<Array1<i32>>, swath_height: usize) -> CompressedSortIndex {
        CompressedSortIndex {
            segments: columns
                .into_iter()
                .map(|column| SortSegment { column, width: 1, window: (0, 1) })
                .collect(),
            swath_height,
        }
    }

    #[test]
    fn test_accepts_identical_interior_swaths() {
        // First and last swath are free to differ
        let c = compressed(vec![array![9, 9, 0, 1, 0, 1, 0, 1, 7, 7]], 2);
        assert!(check_periodicity(&c).is_ok());
    }

    #[test]
    fn test_rejects_single_value_change() {
        let c = compressed(
            vec![
                array![0, 1, 0, 1, 0, 1, 0, 1],
                array![0, 1, 0, 1, 1, 1, 0, 1],
            ],
            2,
        );
        match check_periodicity(&c) {
            Err(SortGenError::Periodicity { segment, group }) => {
                assert_eq!(segment, 1);
                // Interior groups are swaths 1 and 2; swath 2 differs from swath 1
                assert_eq!(group, 1);
            }
            other => panic!("expected periodicity error, got {:?}", other),
        }
    }

    #[test]
    fn test_two_swaths_have_no_interior() {
        let c = compressed(vec![array![0, 1, 1, 0]], 2);
        assert!(check_periodicity(&c).is_ok());
    }

    #[test]
    fn test_rejects_short_column() {
        let c = compressed(vec![array![0, 1, 0]], 2);
        assert!(matches!(
            check_periodicity(&c),
            Err(SortGenError::DegenerateGeometry(_))
        ));
    }
}
