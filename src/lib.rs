//! swath_sortgen - embedded sorting-index tables for MODIS swaths
//!
//! Compresses a dump of per-scanline pixel sorting indices into the
//! `SORT_WIDTHS` / `SORT_FIRST` / `SORT_MID` / `SORT_LAST` C arrays used by
//! the resampler. Pipeline: load, detect seams, compress, check periodicity,
//! emit.

pub mod analysis;
pub mod compress;
pub mod config;
pub mod consistency;
pub mod emit;
pub mod error;
pub mod expand;
pub mod loader;
pub mod seams;

pub use analysis::{analyze, Analysis, AnalysisReport};
pub use compress::{compress, CompressedSortIndex, SortSegment};
pub use config::{Provenance, SwathGeometry};
pub use consistency::check_periodicity;
pub use emit::{render_c_arrays, swath_windows, write_c_arrays, SortWindows};
pub use error::{Result, SortGenError};
pub use expand::{count_mismatches, expand};
pub use loader::{load_index_table, parse_index_table, write_index_table};
pub use seams::{column_spikes, detect_seams, Seam};
