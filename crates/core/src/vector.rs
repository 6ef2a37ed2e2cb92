//! Four-component vector used for ECI positions and velocities.
//!
//! `w` carries the magnitude computed by the frame engine at construction time. Every
//! arithmetic operator returns `w = 0`: a sum or difference has no meaningful cached
//! magnitude, and nothing recomputes it automatically.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Cartesian vector `(x, y, z)` plus the cached magnitude slot `w`.
///
/// Equality compares all four fields exactly, with no tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector {
    /// Build a vector with `w = 0`.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Build a vector with an explicit `w`.
    #[inline]
    pub const fn with_w(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Euclidean norm of `(x, y, z)`; `w` is ignored.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Dot product over `(x, y, z)`.
    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Copy of this vector with `w` set to the current magnitude.
    #[inline]
    pub fn with_magnitude(self) -> Self {
        Self {
            w: self.magnitude(),
            ..self
        }
    }

    /// Unit vector in the same direction, `w = 1`.
    ///
    /// A zero-length vector has no direction and yields the zero vector.
    pub fn normalized(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Self::default();
        }
        Self::with_w(self.x / magnitude, self.y / magnitude, self.z / magnitude, 1.0)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        Vector::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

/// Division by zero follows IEEE-754 (±∞ or NaN components); it never panics.
impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, k: f64) -> Vector {
        Vector::new(self.x / k, self.y / k, self.z / k)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X: {:9.3}, Y: {:9.3}, Z: {:9.3}, W: {:9.3}",
            self.x, self.y, self.z, self.w
        )
    }
}
