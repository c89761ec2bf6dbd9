//! C array emitter
//!
//! Renders the compressed table as four `short` arrays: the segment widths
//! and the first, middle and last swath window of every representative
//! column. Nothing is written until the whole text has been rendered.

use std::fmt::Write as _;
use std::io::Write;

use ndarray::{s, ArrayView1};

use crate::compress::CompressedSortIndex;
use crate::config::Provenance;
use crate::error::{Result, SortGenError};

/// The three swath windows emitted for one segment
#[derive(Debug, Clone, PartialEq)]
pub struct SortWindows {
    pub first: Vec<i16>,
    pub mid: Vec<i16>,
    pub last: Vec<i16>,
}

/// Slice every segment into its first, middle and last swath windows
pub fn swath_windows(compressed: &CompressedSortIndex) -> Result<Vec<SortWindows>> {
    let h = compressed.swath_height;
    compressed
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let len = segment.column.len();
            if h == 0 || len < 2 * h {
                return Err(SortGenError::DegenerateGeometry(format!(
                    "segment {} has {} rows, need at least {} for the first and middle windows",
                    index,
                    len,
                    2 * h
                )));
            }
            Ok(SortWindows {
                first: to_short(index, segment.column.slice(s![..h]))?,
                mid: to_short(index, segment.column.slice(s![h..2 * h]))?,
                last: to_short(index, segment.column.slice(s![len - h..]))?,
            })
        })
        .collect()
}

fn to_short(segment: usize, values: ArrayView1<i32>) -> Result<Vec<i16>> {
    values
        .iter()
        .map(|&v| {
            i16::try_from(v).map_err(|_| SortGenError::ValueOutOfRange {
                segment,
                value: i64::from(v),
            })
        })
        .collect()
}

/// Render the generated source text
pub fn render_c_arrays(compressed: &CompressedSortIndex, provenance: &Provenance) -> Result<String> {
    let windows = swath_windows(compressed)?;
    let widths = compressed
        .segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            i16::try_from(segment.width).map_err(|_| SortGenError::ValueOutOfRange {
                segment: index,
                value: segment.width as i64,
            })
        })
        .collect::<Result<Vec<i16>>>()?;
    let h = compressed.swath_height;

    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "// DO NOT EDIT. This file was auto-generated by {}",
        provenance.generator
    );
    let _ = writeln!(out, "// using the latitude sorting indices of");
    let _ = writeln!(out, "// {}", provenance.granule);

    let _ = writeln!(out);
    let _ = writeln!(out, "short SORT_WIDTHS[] = {{");
    let _ = writeln!(out, "\t{}", join(&widths));
    let _ = writeln!(out, "}};");

    write_section(&mut out, "SORT_FIRST", h, windows.iter().map(|w| &w.first[..]));
    write_section(&mut out, "SORT_MID", h, windows.iter().map(|w| &w.mid[..]));
    write_section(&mut out, "SORT_LAST", h, windows.iter().map(|w| &w.last[..]));

    Ok(out)
}

/// Render and write the generated source in one piece
pub fn write_c_arrays<W: Write>(
    compressed: &CompressedSortIndex,
    provenance: &Provenance,
    mut writer: W,
) -> Result<()> {
    let text = render_c_arrays(compressed, provenance)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn write_section<'a>(
    out: &mut String,
    name: &str,
    swath_height: usize,
    rows: impl Iterator<Item = &'a [i16]>,
) {
    let _ = writeln!(out);
    let _ = writeln!(out, "short {}[][{}] = {{", name, swath_height);
    for row in rows {
        let _ = writeln!(out, "\t{{{}}},", join(row));
    }
    let _ = writeln!(out, "}};");
}

fn join(values: &[i16]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
