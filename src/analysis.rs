//! Full analysis pass: spikes, seams, compression and the periodicity check

use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::compress::{compress, CompressedSortIndex};
use crate::config::{Provenance, SwathGeometry};
use crate::consistency::check_periodicity;
use crate::error::Result;
use crate::seams::{column_spikes, detect_seams, Seam};

/// Everything derived from one index table
#[derive(Debug, Clone)]
pub struct Analysis {
    pub spikes: Array1<f64>,
    pub seams: Vec<Seam>,
    pub compressed: CompressedSortIndex,
}

/// Run the whole pipeline short of emitting.
///
/// Fails on a degenerate table shape or a periodicity violation; in either
/// case nothing should be emitted.
pub fn analyze(table: &Array2<i32>, geometry: &SwathGeometry) -> Result<Analysis> {
    geometry.validate()?;
    geometry.check_rows(table.nrows())?;

    let spikes = column_spikes(table);
    let zero_gaps = spikes.iter().filter(|&&s| s == 0.0).count();
    let seams = detect_seams(&spikes);
    info!("Found {} zero-difference gaps, {} seams", zero_gaps, seams.len());

    let compressed = compress(table, &seams, geometry)?;
    check_periodicity(&compressed)?;

    Ok(Analysis { spikes, seams, compressed })
}

/// JSON summary of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub geometry: SwathGeometry,
    pub provenance: Provenance,
    pub scanlines: usize,
    pub seams: Vec<Seam>,
    pub widths: Vec<usize>,
    pub columns: Vec<Vec<i32>>,
    /// Cells where the expanded table differs from the input
    pub mismatches: Option<usize>,
}

impl AnalysisReport {
    pub fn new(
        analysis: &Analysis,
        geometry: &SwathGeometry,
        provenance: &Provenance,
        mismatches: Option<usize>,
    ) -> Self {
        Self {
            geometry: *geometry,
            provenance: provenance.clone(),
            scanlines: analysis.compressed.rows(),
            seams: analysis.seams.clone(),
            widths: analysis.compressed.widths(),
            columns: analysis
                .compressed
                .segments
                .iter()
                .map(|s| s.column.to_vec())
                .collect(),
            mismatches,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SortGenError;
    use ndarray::Array2;

    #[test]
    fn test_analyze_without_seams() {
        let geometry = SwathGeometry::new(4, 2).unwrap();
        // Neighbouring columns always differ by one, so no gap is flat
        let table = Array2::from_shape_fn((6, 4), |(r, c)| (r - r % 2) as i32 + (c as i32 % 2));
        let analysis = analyze(&table, &geometry).unwrap();
        assert!(analysis.seams.is_empty());
        assert_eq!(analysis.compressed.len(), 1);
        assert_eq!(analysis.compressed.widths(), vec![4]);
    }

    #[test]
    fn test_analyze_rejects_broken_period() {
        let geometry = SwathGeometry::new(2, 1).unwrap();
        let mut table = Array2::<i32>::zeros((5, 2));
        for r in 0..5 {
            table[[r, 0]] = r as i32;
            table[[r, 1]] = r as i32;
        }
        table[[2, 0]] = 7;
        table[[2, 1]] = 7;
        assert!(matches!(
            analyze(&table, &geometry),
            Err(SortGenError::Periodicity { segment: 0, .. })
        ));
    }

    #[test]
    fn test_report_roundtrips_through_json() {
        let geometry = SwathGeometry::new(2, 1).unwrap();
        let table = Array2::from_shape_fn((3, 2), |(r, _)| r as i32);
        let analysis = analyze(&table, &geometry).unwrap();
        let report = AnalysisReport::new(&analysis, &geometry, &Provenance::default(), Some(0));

        let json = serde_json::to_string(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.widths, vec![2]);
        assert_eq!(back.columns, vec![vec![0, 0, 0]]);
        assert_eq!(back.geometry, geometry);
    }
}
