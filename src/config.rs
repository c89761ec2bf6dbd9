//! Fixed geometry and provenance for the generated tables

use serde::{Deserialize, Serialize};

use crate::error::{Result, SortGenError};

/// Cross-track pixel count of a 1 km MODIS swath
pub const MODIS_1KM_COLUMNS: usize = 1354;

/// Scanlines per swath (one mirror scan at 1 km)
pub const MODIS_SWATH_HEIGHT: usize = 10;

/// Shape of the sorting-index table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwathGeometry {
    pub columns: usize,
    pub swath_height: usize,
}

impl Default for SwathGeometry {
    fn default() -> Self {
        Self {
            columns: MODIS_1KM_COLUMNS,
            swath_height: MODIS_SWATH_HEIGHT,
        }
    }
}

impl SwathGeometry {
    pub fn new(columns: usize, swath_height: usize) -> Result<Self> {
        let geometry = Self { columns, swath_height };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns < 2 {
            return Err(SortGenError::DegenerateGeometry(format!(
                "need at least 2 columns, got {}",
                self.columns
            )));
        }
        if self.swath_height == 0 {
            return Err(SortGenError::DegenerateGeometry(
                "swath height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that `rows` splits into at least two whole swaths
    pub fn check_rows(&self, rows: usize) -> Result<usize> {
        if rows % self.swath_height != 0 {
            return Err(SortGenError::DegenerateGeometry(format!(
                "{} rows is not a multiple of the swath height {}",
                rows, self.swath_height
            )));
        }
        let swaths = rows / self.swath_height;
        if swaths < 2 {
            return Err(SortGenError::DegenerateGeometry(format!(
                "{} rows holds {} swath(s), need at least 2",
                rows, swaths
            )));
        }
        Ok(swaths)
    }
}

/// Provenance written into the header of the generated source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Name of the generator as shown in the DO NOT EDIT banner
    pub generator: String,
    /// Calibration granule the sorting indices were taken from
    pub granule: String,
}

impl Default for Provenance {
    fn default() -> Self {
        Self {
            generator: "swath_sortgen".to_string(),
            granule: "MOD03.A2015129.1540.005.2015131111937.hdf".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let geometry = SwathGeometry::default();
        assert_eq!(geometry.columns, 1354);
        assert_eq!(geometry.swath_height, 10);
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_swath_height() {
        assert!(SwathGeometry::new(1354, 0).is_err());
        assert!(SwathGeometry::new(1, 10).is_err());
    }

    #[test]
    fn test_check_rows() {
        let geometry = SwathGeometry::new(6, 2).unwrap();
        assert_eq!(geometry.check_rows(40).unwrap(), 20);
        assert!(geometry.check_rows(41).is_err());
        assert!(geometry.check_rows(2).is_err());
        assert_eq!(geometry.check_rows(4).unwrap(), 2);
    }
}
