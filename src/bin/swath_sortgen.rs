// swath_sortgen - sorting-index table generator
// Reads a binary dump of latitude sorting indices and prints C arrays

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use swath_sortgen::config::{MODIS_1KM_COLUMNS, MODIS_SWATH_HEIGHT};
use swath_sortgen::{
    analyze, count_mismatches, expand, load_index_table, render_c_arrays, write_index_table,
    AnalysisReport, Provenance, SwathGeometry,
};

#[derive(Parser)]
#[command(name = "swath_sortgen", version, about = "Generate embedded swath sorting-index tables")]
struct Args {
    /// Binary dump of the sorting indices (native-endian i32)
    #[arg(default_value = "sind.bin")]
    input: PathBuf,

    /// Pixels per scanline
    #[arg(long, default_value_t = MODIS_1KM_COLUMNS)]
    columns: usize,

    /// Scanlines per swath
    #[arg(long, default_value_t = MODIS_SWATH_HEIGHT)]
    swath_height: usize,

    /// Calibration granule named in the generated header
    #[arg(long)]
    granule: Option<String>,

    /// Write the C arrays here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump the table rebuilt from the emitted arrays
    #[arg(long)]
    dump_expanded: Option<PathBuf>,

    /// Write a JSON summary of the analysis
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the generated source
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let geometry = SwathGeometry::new(args.columns, args.swath_height)
        .context("Invalid swath geometry")?;
    let mut provenance = Provenance::default();
    if let Some(granule) = args.granule {
        provenance.granule = granule;
    }

    let table = load_index_table(&args.input, &geometry)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let analysis = analyze(&table, &geometry)
        .with_context(|| format!("Failed to analyze {}", args.input.display()))?;

    let text = render_c_arrays(&analysis.compressed, &provenance)
        .context("Failed to render C arrays")?;

    let swaths = table.nrows() / geometry.swath_height;
    let expanded = expand(&analysis.compressed, swaths, &geometry)
        .context("Failed to expand compressed table")?;
    let mismatches = count_mismatches(&table, &expanded)?;
    if mismatches > 0 {
        warn!(
            "Expanded table differs from input in {} of {} cells",
            mismatches,
            table.len()
        );
    } else {
        info!("Expanded table matches input exactly");
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} segments to {}", analysis.compressed.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(text.as_bytes())?;
            lock.flush()?;
        }
    }

    if let Some(path) = &args.dump_expanded {
        write_index_table(path, &expanded)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Dumped expanded table to {}", path.display());
    }

    if let Some(path) = &args.report {
        AnalysisReport::new(&analysis, &geometry, &provenance, Some(mismatches))
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote report to {}", path.display());
    }

    Ok(())
}
