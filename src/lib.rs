//! All-Sky Camera Coordinate Utilities
//!
//! Converts between horizontal astronomical coordinates and pixel
//! coordinates on a fisheye all-sky camera image, and batch-processes
//! directories of sky images into a cloudiness summary table.
//!
//! The projection model is a fisheye [`Lens`](lens::Lens) mapping between
//! zenith distance and radial pixel distance, combined with the per-camera
//! [`ImageGeometry`](camera::ImageGeometry): zenith pixel position and
//! azimuth offset. [`transform::horizontal_to_pixel`] and
//! [`transform::pixel_to_horizontal`] are exact inverses over the valid
//! field of view.

pub mod angle;
pub mod batch;
pub mod camera;
#[allow(missing_docs)]
pub mod error;
pub mod lens;
pub mod transform;

pub use angle::Angle;
pub use camera::{Camera, ImageGeometry};
pub use error::Error;
pub use lens::{Equidistant, Equisolid, Lens, Stereographic};
pub use transform::{
    HorizontalPosition, PixelPosition, horizontal_to_pixel, pixel_to_horizontal,
    pixel_to_horizontal_clamped,
};
