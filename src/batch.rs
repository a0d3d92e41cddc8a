//! Batch orchestration
//!
//! Runs every configured input through the transform pipeline and writes the
//! transformed images, histogram charts and the transfer-function chart.
//! An input that fails to decode is logged and skipped; any other failure
//! stops the batch.

use crate::chart;
use crate::config::{BatchEntry, Config};
use crate::error::TransformError;
use crate::histogram::{Histogram, TransferFunction};
use crate::output::{file_stem, save_gray, OutputLayout};
use crate::processing::{Pipeline, Variant};
use image::GrayImage;
use std::path::Path;

/// Title of the transfer-function chart
const TRANSFER_TITLE: &str = "Funcao de Transformacao Equalizacao";

/// Outcome of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// Process every entry of the configured batch in order
pub fn run(config: &Config) -> Result<BatchSummary, TransformError> {
    let layout = OutputLayout::new(&config.output_dir);
    std::fs::create_dir_all(layout.base())?;

    let mut summary = BatchSummary::default();
    for entry in &config.batch {
        match process_image(entry, &layout) {
            Ok(()) => summary.processed += 1,
            Err(err) if err.is_decode() => {
                tracing::error!("{}", err);
                summary.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        "Batch complete: {} processed, {} skipped",
        summary.processed,
        summary.skipped
    );
    Ok(summary)
}

/// Decode one input and write all of its outputs
pub fn process_image(entry: &BatchEntry, layout: &OutputLayout) -> Result<(), TransformError> {
    let image = load_grayscale(&entry.path)?;
    let stem = file_stem(&entry.path)?;
    let (width, height) = image.dimensions();
    tracing::debug!("Loaded {} ({}x{})", entry.path.display(), width, height);

    layout.ensure_standard_dirs()?;

    let result = Pipeline::new(entry.local_equalization).process(image)?;
    for step in &result.steps {
        tracing::debug!("{}: {} took {}ms", stem, step.name, step.time_ms);
    }

    for variant in Variant::STANDARD {
        let (Some(image), Some(suffix)) = (result.get(variant), variant.histogram_suffix()) else {
            continue;
        };
        chart::histogram::render(&Histogram::of(image), variant.title())?
            .save(&layout.histogram_path(&stem, suffix))?;
    }

    for variant in Variant::STANDARD {
        if let Some(image) = result.get(variant) {
            save_gray(image, &layout.image_path(&stem, variant))?;
        }
    }

    if let Some(original) = result.get(Variant::Original) {
        chart::transfer::render(&TransferFunction::of(original), TRANSFER_TITLE)?
            .save(&layout.transfer_path(&stem))?;
    }

    tracing::info!(
        "Processing complete for {} ({}ms of transforms)",
        entry.path.display(),
        result.total_time_ms
    );

    if let Some(local) = result.get(Variant::LocalEqualization) {
        layout.ensure_local_equalization_dir()?;
        save_gray(local, &layout.image_path(&stem, Variant::LocalEqualization))?;
        tracing::info!("Local equalization complete for {}", entry.path.display());
    }

    Ok(())
}

/// Decode any supported format into 8-bit grayscale
pub fn load_grayscale(path: &Path) -> Result<GrayImage, TransformError> {
    image::open(path)
        .map(|img| img.to_luma8())
        .map_err(|source| TransformError::Decode {
            path: path.to_path_buf(),
            source,
        })
}
