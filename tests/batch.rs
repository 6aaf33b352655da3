use allsky::{
    Angle, Camera, Equidistant, Error, ImageGeometry,
    batch::{ImageProcessor, SkyReport, process_images, process_images_to_csv},
};
use chrono::{TimeZone, Utc};
use std::{fs, path::Path};
use tempfile::TempDir;

/// Rejects any image whose file name contains `img3`, reports fixed values
/// for the rest.
struct StubProcessor;

impl ImageProcessor<Equidistant> for StubProcessor {
    fn process(&self, path: &Path, _cam: &Camera<Equidistant>) -> Result<SkyReport, Error> {
        let name = path.file_name().unwrap().to_string_lossy();
        if name.contains("img3") {
            return Err(Error::ImageRejected {
                path: path.to_path_buf(),
            });
        }

        Ok(SkyReport {
            cloudiness: 0.5,
            timestamp: Utc.with_ymd_and_hms(2019, 8, 1, 23, 30, 0).unwrap(),
            mean_brightness: 38.25,
            star_count: 142,
            moon_height: 17.0,
        })
    }
}

fn make_camera() -> Camera<Equidistant> {
    Camera::new(
        ImageGeometry::new(820.0, 512.0, 640.0, Angle::ZERO),
        Equidistant,
    )
}

fn image_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 1..=5 {
        fs::write(dir.path().join(format!("img{i}.fits")), b"").unwrap();
    }
    dir
}

#[test]
fn rejected_image_is_skipped() {
    let dir = image_dir();
    let pattern = dir.path().join("*.fits");

    let outcome = process_images(pattern.to_str().unwrap(), &make_camera(), &StubProcessor)
        .expect("pattern is valid");

    assert_eq!(outcome.rows.len(), 4);
    assert_eq!(outcome.rejected.len(), 1);
    assert!(outcome.rejected[0].ends_with("img3.fits"));

    // Row order follows file enumeration order.
    let names: Vec<&str> = outcome
        .rows
        .iter()
        .map(|row| row.image.rsplit('/').next().unwrap())
        .collect();
    assert_eq!(names, vec!["img1.fits", "img2.fits", "img4.fits", "img5.fits"]);
}

#[test]
fn csv_artifact_matches_rows() {
    let dir = image_dir();
    let pattern = dir.path().join("*.fits");
    let csv_path = dir.path().join("cloudiness.csv");

    let outcome = process_images_to_csv(
        pattern.to_str().unwrap(),
        &make_camera(),
        &StubProcessor,
        &csv_path,
    )
    .unwrap();

    let text = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), outcome.rows.len() + 1);
    assert_eq!(
        lines[0],
        ",cloudiness,timestamp,mean_brightness,image,number,moon_hight"
    );
    assert!(lines[1].starts_with("0,0.5,2019-08-01T23:30:00+00:00,38.25,"));
    assert!(lines[1].ends_with(",142,17"));
}

#[test]
fn empty_match_is_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.fits");

    let outcome =
        process_images(pattern.to_str().unwrap(), &make_camera(), &StubProcessor).unwrap();

    assert!(outcome.rows.is_empty());
    assert!(outcome.rejected.is_empty());
}

#[test]
fn invalid_pattern_fails() {
    let result = process_images("images/***.fits", &make_camera(), &StubProcessor);
    assert!(matches!(result, Err(Error::Pattern(_))));
}
