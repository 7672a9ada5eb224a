//! Plain coordinate value types.
//!
//! - `Vect2`: 2D point/vector with elementwise `+ - *`, scalar `*`, `norm`.
//! - `Vect3`: coefficient triple `(x, y, constant)` and site variables
//!   `(x, y, angle)`.
//!
//! Conversions to `nalgebra::Vector2` keep the affine-map code in
//! `crate::symmetry` on nalgebra while call sites stay on these types.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// 2D point or displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vect2 {
    pub x: f64,
    pub y: f64,
}

impl Vect2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }
    /// Wrap both coordinates into `[0, modulo)`.
    #[inline]
    pub fn positive_modulo(&self, modulo: f64) -> Self {
        Self {
            x: positive_modulo(self.x, modulo),
            y: positive_modulo(self.y, modulo),
        }
    }
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// `i mod n` mapped into `[0, n)`.
#[inline]
pub(crate) fn positive_modulo(i: f64, n: f64) -> f64 {
    let r = ((i % n) + n) % n;
    // `-1e-17 mod 1` rounds up to exactly `n`.
    if r >= n {
        0.0
    } else {
        r
    }
}

impl Add for Vect2 {
    type Output = Vect2;
    #[inline]
    fn add(self, rhs: Vect2) -> Self::Output {
        Vect2::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Vect2 {
    type Output = Vect2;
    #[inline]
    fn sub(self, rhs: Vect2) -> Self::Output {
        Vect2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
/// Elementwise product.
impl Mul for Vect2 {
    type Output = Vect2;
    #[inline]
    fn mul(self, rhs: Vect2) -> Self::Output {
        Vect2::new(self.x * rhs.x, self.y * rhs.y)
    }
}
impl Mul<f64> for Vect2 {
    type Output = Vect2;
    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Vect2::new(self.x * rhs, self.y * rhs)
    }
}
impl Neg for Vect2 {
    type Output = Vect2;
    #[inline]
    fn neg(self) -> Self::Output {
        Vect2::new(-self.x, -self.y)
    }
}

impl From<Vector2<f64>> for Vect2 {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Vect2::new(v.x, v.y)
    }
}
impl From<Vect2> for Vector2<f64> {
    #[inline]
    fn from(v: Vect2) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl fmt::Display for Vect2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

/// Triple of coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vect3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vect3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }
}

impl Add for Vect3 {
    type Output = Vect3;
    #[inline]
    fn add(self, rhs: Vect3) -> Self::Output {
        Vect3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl Sub for Vect3 {
    type Output = Vect3;
    #[inline]
    fn sub(self, rhs: Vect3) -> Self::Output {
        Vect3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl Mul for Vect3 {
    type Output = Vect3;
    #[inline]
    fn mul(self, rhs: Vect3) -> Self::Output {
        Vect3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl From<Vector3<f64>> for Vect3 {
    #[inline]
    fn from(v: Vector3<f64>) -> Self {
        Vect3::new(v.x, v.y, v.z)
    }
}
impl From<Vect3> for Vector3<f64> {
    #[inline]
    fn from(v: Vect3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}
