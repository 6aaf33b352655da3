use crate::{angle::Angle, error::Error};
use serde::{Deserialize, Serialize};

/// The mapping function of a fisheye lens.
///
/// Relates the zenith distance of an incident ray to the radial distance of
/// its image from the optical center. Implementations must form an exact
/// numerical inverse pair over the valid domain: zenith distances on
/// `[0°, 90°]` and radial distances on `[0, radius]` pixels.
pub trait Lens {
    /// Maps a zenith-distance `angle` to a radial distance in pixels.
    ///
    /// `radius` is the calibrated image radius, the radial distance at which
    /// the horizon (90° zenith distance) is imaged.
    fn radius_from_angle(&self, radius: f64, angle: Angle) -> f64;

    /// Maps a radial pixel distance `r` back to a zenith-distance angle.
    ///
    /// Fails with [`Error::OutOfRange`] if `r` lies beyond the calibrated
    /// image radius. Callers that prefer clamping over failure must clamp
    /// `r` themselves before calling.
    fn angle_from_radius(&self, radius: f64, r: f64) -> Result<Angle, Error>;
}

fn check_radial_domain(radius: f64, r: f64) -> Result<(), Error> {
    // A rim pixel reconstructed from its Cartesian parts can overshoot the
    // radius by a few ulps.
    if r > radius * (1.0 + 4.0 * f64::EPSILON) {
        return Err(Error::OutOfRange { r, radius });
    }

    Ok(())
}

/// Equidistant fisheye projection, `r = R · θ / 90°`.
///
/// The radial distance grows linearly with zenith distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Equidistant;

impl Lens for Equidistant {
    fn radius_from_angle(&self, radius: f64, angle: Angle) -> f64 {
        radius * angle.degrees() / 90.0
    }

    fn angle_from_radius(&self, radius: f64, r: f64) -> Result<Angle, Error> {
        check_radial_domain(radius, r)?;
        Ok(Angle::from_degrees(90.0 * r / radius))
    }
}

/// Equisolid-angle fisheye projection, `r = R · √2 · sin(θ / 2)`.
///
/// Equal solid angles on the sky cover equal areas on the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Equisolid;

impl Lens for Equisolid {
    fn radius_from_angle(&self, radius: f64, angle: Angle) -> f64 {
        radius * std::f64::consts::SQRT_2 * (angle.radians() / 2.0).sin()
    }

    fn angle_from_radius(&self, radius: f64, r: f64) -> Result<Angle, Error> {
        check_radial_domain(radius, r)?;
        Ok(Angle::from_radians(
            2.0 * (r / (radius * std::f64::consts::SQRT_2)).asin(),
        ))
    }
}

/// Stereographic fisheye projection, `r = R · tan(θ / 2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stereographic;

impl Lens for Stereographic {
    fn radius_from_angle(&self, radius: f64, angle: Angle) -> f64 {
        radius * (angle.radians() / 2.0).tan()
    }

    fn angle_from_radius(&self, radius: f64, r: f64) -> Result<Angle, Error> {
        check_radial_domain(radius, r)?;
        Ok(Angle::from_radians(2.0 * (r / radius).atan()))
    }
}
