//! Binary sorting-index dumps
//!
//! The dump is a headerless run of native-endian `i32` values, row-major,
//! `columns` values per scanline.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use tracing::{debug, info};

use crate::config::SwathGeometry;
use crate::error::{Result, SortGenError};

const ELEM_SIZE: usize = std::mem::size_of::<i32>();

/// Read a dump from disk and reshape it to (scanlines x columns)
pub fn load_index_table(path: impl AsRef<Path>, geometry: &SwathGeometry) -> Result<Array2<i32>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let table = parse_index_table(&bytes, geometry)?;
    info!(
        "Loaded sorting indices {}: {} scanlines x {} columns",
        path.display(),
        table.nrows(),
        table.ncols()
    );
    Ok(table)
}

/// Reshape raw bytes into the index table
pub fn parse_index_table(bytes: &[u8], geometry: &SwathGeometry) -> Result<Array2<i32>> {
    let row_bytes = geometry.columns * ELEM_SIZE;
    if bytes.is_empty() {
        return Err(SortGenError::Format("input is empty".to_string()));
    }
    if bytes.len() % row_bytes != 0 {
        return Err(SortGenError::Format(format!(
            "{} bytes is not a multiple of {} ({} columns x {} bytes)",
            bytes.len(),
            row_bytes,
            geometry.columns,
            ELEM_SIZE
        )));
    }

    let values: Vec<i32> = bytes
        .chunks_exact(ELEM_SIZE)
        .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let rows = bytes.len() / row_bytes;

    Array2::from_shape_vec((rows, geometry.columns), values)
        .map_err(|e| SortGenError::Format(format!("reshape failed: {}", e)))
}

/// Write a table back out in the dump layout
pub fn write_index_table(path: impl AsRef<Path>, table: &Array2<i32>) -> Result<()> {
    let mut bytes = Vec::with_capacity(table.len() * ELEM_SIZE);
    for value in table.iter() {
        bytes.extend_from_slice(&value.to_ne_bytes());
    }
    fs::write(path.as_ref(), &bytes)?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.as_ref().display());
    Ok(())
}
