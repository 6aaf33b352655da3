use crate::angle::Angle;
use serde::{Deserialize, Serialize};

/// Per-camera image constants.
///
/// Loaded once from the camera calibration and read-only afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageGeometry {
    /// Radial distance in pixels at which the horizon is imaged.
    radius: f64,

    /// Pixel row of the optical zenith.
    zenith_row: f64,

    /// Pixel column of the optical zenith.
    zenith_col: f64,

    /// Rotational misalignment between the pixel-row axis and true north.
    azimuth_offset: Angle,
}

impl ImageGeometry {
    pub fn new(radius: f64, zenith_row: f64, zenith_col: f64, azimuth_offset: Angle) -> Self {
        Self {
            radius,
            zenith_row,
            zenith_col,
            azimuth_offset,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn zenith_row(&self) -> f64 {
        self.zenith_row
    }

    pub fn zenith_col(&self) -> f64 {
        self.zenith_col
    }

    pub fn azimuth_offset(&self) -> Angle {
        self.azimuth_offset
    }
}

/// A calibrated all-sky camera.
///
/// Pairs the per-camera [`ImageGeometry`] with a [`Lens`](crate::lens::Lens)
/// strategy so that the projection functions stay free of per-lens
/// branching; the physical lens type is selected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera<L> {
    geometry: ImageGeometry,
    lens: L,
}

impl<L> Camera<L> {
    pub fn new(geometry: ImageGeometry, lens: L) -> Self {
        Self { geometry, lens }
    }

    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    pub fn lens(&self) -> &L {
        &self.lens
    }
}
