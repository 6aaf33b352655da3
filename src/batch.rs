//! Batch processing of sky image directories into a cloudiness table.
//!
//! The actual cloud detection lives behind the [`ImageProcessor`] trait;
//! this module owns the file enumeration, the per-image failure isolation,
//! and the `cloudiness.csv` export.

use crate::{camera::Camera, error::Error};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::warn;

/// Per-image analysis results produced by an [`ImageProcessor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyReport {
    /// Fraction of the visible sky covered by cloud.
    pub cloudiness: f64,

    /// Exposure time of the image.
    pub timestamp: DateTime<Utc>,

    /// Mean pixel brightness of the image.
    pub mean_brightness: f64,

    /// Number of catalog stars detected in the image.
    pub star_count: u32,

    /// Height of the moon above the horizon, in degrees.
    pub moon_height: f64,
}

/// Analyzes a single sky image.
///
/// Implementations hold the image analysis proper (brightness thresholding,
/// star matching, moon position) and fail with [`Error::ImageRejected`] for
/// images that cannot be processed, e.g. frames with missing metadata. Any
/// other error aborts the batch.
pub trait ImageProcessor<L> {
    fn process(&self, path: &Path, cam: &Camera<L>) -> Result<SkyReport, Error>;
}

/// One row of the cloudiness table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudinessRow {
    pub cloudiness: f64,

    /// ISO 8601 (RFC 3339) timestamp.
    pub timestamp: String,

    pub mean_brightness: f64,

    /// Path of the source image as enumerated.
    pub image: String,

    pub number: u32,

    /// Spelling kept from the original `cloudiness.csv` artifact so that
    /// downstream consumers of the column name keep working.
    pub moon_hight: f64,
}

impl CloudinessRow {
    fn from_report(path: &Path, report: SkyReport) -> Self {
        Self {
            cloudiness: report.cloudiness,
            timestamp: report.timestamp.to_rfc3339(),
            mean_brightness: report.mean_brightness,
            image: path.display().to_string(),
            number: report.star_count,
            moon_hight: report.moon_height,
        }
    }
}

/// The outcome of a batch run.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchOutcome {
    /// Successful rows, in file enumeration order.
    pub rows: Vec<CloudinessRow>,

    /// Paths of images the processor rejected.
    pub rejected: Vec<PathBuf>,
}

/// Analyzes every image matching `pattern` and collects a cloudiness table.
///
/// Files are visited in the (sorted) enumeration order of the glob walk. An
/// [`Error::ImageRejected`] from the processor logs the failing path and
/// skips the file without aborting the batch; every other error aborts.
pub fn process_images<L, P>(
    pattern: &str,
    cam: &Camera<L>,
    processor: &P,
) -> Result<BatchOutcome, Error>
where
    P: ImageProcessor<L>,
{
    let mut rows = Vec::new();
    let mut rejected = Vec::new();

    for entry in glob::glob(pattern)? {
        let path = entry?;
        match processor.process(&path, cam) {
            Ok(report) => rows.push(CloudinessRow::from_report(&path, report)),
            Err(Error::ImageRejected { path }) => {
                warn!(path = %path.display(), "skipping rejected image");
                rejected.push(path);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(BatchOutcome { rows, rejected })
}

/// Runs [`process_images`] and persists the table to `csv_path`.
pub fn process_images_to_csv<L, P>(
    pattern: &str,
    cam: &Camera<L>,
    processor: &P,
    csv_path: &Path,
) -> Result<BatchOutcome, Error>
where
    P: ImageProcessor<L>,
{
    let outcome = process_images(pattern, cam, processor)?;
    write_csv(&outcome.rows, File::create(csv_path)?)?;
    Ok(outcome)
}

/// Writes the cloudiness table as delimited text.
///
/// The first column is an unnamed row index, matching the layout of the
/// original artifact.
pub fn write_csv<W: Write>(rows: &[CloudinessRow], writer: W) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record([
        "",
        "cloudiness",
        "timestamp",
        "mean_brightness",
        "image",
        "number",
        "moon_hight",
    ])?;

    for (index, row) in rows.iter().enumerate() {
        writer.write_record([
            index.to_string(),
            row.cloudiness.to_string(),
            row.timestamp.clone(),
            row.mean_brightness.to_string(),
            row.image.clone(),
            row.number.to_string(),
            row.moon_hight.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
