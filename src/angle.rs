use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// An angle stored explicitly in degrees.
///
/// Every angular quantity in this crate goes through this type so that
/// degree/radian confusion cannot creep into the projection math. Azimuths
/// are normalized onto `[0.0, 360.0)` with [`Angle::wrap_to_full_turn`].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { degrees: 0.0 };
    pub const QUARTER_TURN: Angle = Angle { degrees: 90.0 };
    pub const HALF_TURN: Angle = Angle { degrees: 180.0 };
    pub const FULL_TURN: Angle = Angle { degrees: 360.0 };

    /// Creates a new `Angle` from a value in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    /// Creates a new `Angle` from a value in radians.
    pub fn from_radians(radians: f64) -> Self {
        Self {
            degrees: radians.to_degrees(),
        }
    }

    /// Creates a new `Angle` from the four-quadrant arctangent of `y / x`.
    pub fn atan2(y: f64, x: f64) -> Self {
        Self::from_radians(y.atan2(x))
    }

    pub fn degrees(self) -> f64 {
        self.degrees
    }

    pub fn radians(self) -> f64 {
        self.degrees.to_radians()
    }

    pub fn sin(self) -> f64 {
        self.radians().sin()
    }

    pub fn cos(self) -> f64 {
        self.radians().cos()
    }

    /// Returns the equivalent angle on `[0.0, 360.0)` degrees.
    pub fn wrap_to_full_turn(self) -> Self {
        let mut degrees = self.degrees.rem_euclid(360.0);
        // rem_euclid of a tiny negative value can round up to exactly 360.
        if degrees >= 360.0 {
            degrees = 0.0;
        }
        Self { degrees }
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            degrees: self.degrees + other.degrees,
        }
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self {
            degrees: self.degrees - other.degrees,
        }
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            degrees: -self.degrees,
        }
    }
}
