//! Bidirectional mapping between horizontal and pixel coordinates.
//!
//! [`horizontal_to_pixel`] images a sky direction onto the fisheye frame and
//! [`pixel_to_horizontal`] recovers the sky direction of a pixel. Both are
//! pure and vectorized over slices of independent coordinate pairs; `par_`
//! variants fan the elements out over rayon.
//!
//! # Conventions
//!
//! - `theta` is the polar angle above the horizon: 90° at the zenith, 0° at
//!   the horizon. The lens mapping receives the complementary zenith
//!   distance `90° − theta`.
//! - `phi` is the azimuth. On the image plane it is folded through
//!   `phi + 90° + azimuth_offset − 360°`; the inverse unfolds with
//!   `phi_raw + 90° + (180° − azimuth_offset)`. The two offsets sum to one
//!   full turn, so the round trip is exact once azimuths are normalized
//!   onto `[0°, 360°)`.
//! - Pixel positions are not clamped to the image; a `theta` outside the
//!   lens field of view simply lands off-image and callers validate.

use crate::{angle::Angle, camera::Camera, error::Error, lens::Lens};
use nalgebra::Vector2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A floating-point pixel position, origin at the image corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelPosition {
    pub row: f64,
    pub col: f64,
}

/// A sky direction recovered from a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPosition {
    /// Radial distance between the pixel and the zenith pixel, in pixels.
    pub r: f64,

    /// Azimuth, normalized onto `[0°, 360°)`.
    pub phi: Angle,

    /// Polar angle above the horizon; 90° is the zenith.
    pub theta: Angle,
}

fn check_shape(left: usize, right: usize) -> Result<(), Error> {
    if left != right {
        return Err(Error::ShapeMismatch { left, right });
    }

    Ok(())
}

fn project_one<L: Lens>(theta: Angle, phi: Angle, cam: &Camera<L>) -> PixelPosition {
    let geom = cam.geometry();

    let r = cam
        .lens()
        .radius_from_angle(geom.radius(), Angle::QUARTER_TURN - theta);

    // Fold the azimuth into the image-plane rotation convention.
    let cylindrical = phi + Angle::QUARTER_TURN + geom.azimuth_offset() - Angle::FULL_TURN;

    let zenith = Vector2::new(geom.zenith_row(), geom.zenith_col());
    let position = Vector2::new(r * cylindrical.cos(), r * cylindrical.sin()) + zenith;

    PixelPosition {
        row: position.x,
        col: position.y,
    }
}

fn unproject_one<L: Lens>(
    row: f64,
    col: f64,
    cam: &Camera<L>,
    clamp: bool,
) -> Result<HorizontalPosition, Error> {
    let geom = cam.geometry();

    let relative = Vector2::new(row - geom.zenith_row(), col - geom.zenith_col());
    let r = relative.norm();
    let phi_raw = Angle::atan2(relative.y, relative.x);

    // Unfold the forward azimuth convention.
    let phi = (phi_raw + Angle::QUARTER_TURN + (Angle::HALF_TURN - geom.azimuth_offset()))
        .wrap_to_full_turn();

    let r_lens = if clamp { r.min(geom.radius()) } else { r };
    let theta = Angle::QUARTER_TURN - cam.lens().angle_from_radius(geom.radius(), r_lens)?;

    Ok(HorizontalPosition { r, phi, theta })
}

/// Converts horizontal coordinates to pixel coordinates.
///
/// `theta` and `phi` are paired element-wise and must have equal lengths;
/// a mismatch fails with [`Error::ShapeMismatch`] before any computation.
/// Outputs are not clamped to the image extent.
pub fn horizontal_to_pixel<L: Lens>(
    theta: &[Angle],
    phi: &[Angle],
    cam: &Camera<L>,
) -> Result<Vec<PixelPosition>, Error> {
    check_shape(theta.len(), phi.len())?;

    Ok(theta
        .iter()
        .zip(phi)
        .map(|(&theta, &phi)| project_one(theta, phi, cam))
        .collect())
}

/// [`horizontal_to_pixel`] with the elements mapped in parallel.
pub fn par_horizontal_to_pixel<L: Lens + Sync>(
    theta: &[Angle],
    phi: &[Angle],
    cam: &Camera<L>,
) -> Result<Vec<PixelPosition>, Error> {
    check_shape(theta.len(), phi.len())?;

    Ok(theta
        .par_iter()
        .zip(phi)
        .map(|(&theta, &phi)| project_one(theta, phi, cam))
        .collect())
}

/// Converts pixel coordinates to horizontal coordinates.
///
/// `row` and `col` are paired element-wise and must have equal lengths.
/// A pixel whose radial distance from the zenith pixel exceeds the
/// calibrated image radius fails with [`Error::OutOfRange`]; see
/// [`pixel_to_horizontal_clamped`] for the clamping variant.
pub fn pixel_to_horizontal<L: Lens>(
    row: &[f64],
    col: &[f64],
    cam: &Camera<L>,
) -> Result<Vec<HorizontalPosition>, Error> {
    check_shape(row.len(), col.len())?;

    row.iter()
        .zip(col)
        .map(|(&row, &col)| unproject_one(row, col, cam, false))
        .collect()
}

/// [`pixel_to_horizontal`] with out-of-range radial distances clamped to
/// the calibrated image radius.
///
/// Clamped elements report their true radial distance in
/// [`HorizontalPosition::r`] but a horizon polar angle of 0°.
pub fn pixel_to_horizontal_clamped<L: Lens>(
    row: &[f64],
    col: &[f64],
    cam: &Camera<L>,
) -> Result<Vec<HorizontalPosition>, Error> {
    check_shape(row.len(), col.len())?;

    row.iter()
        .zip(col)
        .map(|(&row, &col)| unproject_one(row, col, cam, true))
        .collect()
}

/// [`pixel_to_horizontal`] with the elements mapped in parallel.
pub fn par_pixel_to_horizontal<L: Lens + Sync>(
    row: &[f64],
    col: &[f64],
    cam: &Camera<L>,
) -> Result<Vec<HorizontalPosition>, Error> {
    check_shape(row.len(), col.len())?;

    row.par_iter()
        .zip(col)
        .map(|(&row, &col)| unproject_one(row, col, cam, false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{camera::ImageGeometry, lens::Equidistant};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn make_camera(azimuth_offset: f64) -> Camera<Equidistant> {
        Camera::new(
            ImageGeometry::new(820.0, 512.0, 640.0, Angle::from_degrees(azimuth_offset)),
            Equidistant,
        )
    }

    #[rstest]
    #[case(0.0)]
    #[case(117.5)]
    #[case(359.0)]
    fn zenith_maps_to_zenith_pixel(#[case] phi: f64) {
        let cam = make_camera(3.0);
        let pixels = horizontal_to_pixel(
            &[Angle::QUARTER_TURN],
            &[Angle::from_degrees(phi)],
            &cam,
        )
        .unwrap();

        assert_relative_eq!(pixels[0].row, 512.0);
        assert_relative_eq!(pixels[0].col, 640.0);
    }

    #[test]
    fn azimuth_full_turn_is_identical() {
        let cam = make_camera(12.0);
        let theta = [Angle::from_degrees(40.0); 2];
        let phi = [Angle::ZERO, Angle::FULL_TURN];
        let pixels = horizontal_to_pixel(&theta, &phi, &cam).unwrap();

        assert_relative_eq!(pixels[0].row, pixels[1].row, max_relative = 1e-9);
        assert_relative_eq!(pixels[0].col, pixels[1].col, max_relative = 1e-9);
    }

    #[test]
    fn shape_mismatch_fails_fast() {
        let cam = make_camera(0.0);
        let theta = [Angle::ZERO; 3];
        let phi = [Angle::ZERO; 2];

        assert!(matches!(
            horizontal_to_pixel(&theta, &phi, &cam),
            Err(Error::ShapeMismatch { left: 3, right: 2 })
        ));
        assert!(matches!(
            pixel_to_horizontal(&[0.0; 3], &[0.0; 2], &cam),
            Err(Error::ShapeMismatch { left: 3, right: 2 })
        ));
    }

    #[test]
    fn off_image_pixel_is_out_of_range() {
        let cam = make_camera(0.0);
        let result = pixel_to_horizontal(&[512.0], &[640.0 + 821.0], &cam);
        assert!(matches!(result, Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn clamped_variant_reports_horizon() {
        let cam = make_camera(0.0);
        let positions = pixel_to_horizontal_clamped(&[512.0], &[640.0 + 900.0], &cam).unwrap();

        assert_relative_eq!(positions[0].r, 900.0);
        assert_relative_eq!(positions[0].theta.degrees(), 0.0);
    }

    #[test]
    fn forward_matches_sequential_for_par() {
        let cam = make_camera(33.0);
        let theta: Vec<Angle> = (0..90).map(|d| Angle::from_degrees(d as f64)).collect();
        let phi: Vec<Angle> = (0..90).map(|d| Angle::from_degrees(d as f64 * 4.0)).collect();

        let seq = horizontal_to_pixel(&theta, &phi, &cam).unwrap();
        let par = par_horizontal_to_pixel(&theta, &phi, &cam).unwrap();
        assert_eq!(seq, par);
    }
}
