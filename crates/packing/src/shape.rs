//! Convex shapes described by radial distances.
//!
//! A `Shape` stores one boundary distance per vertex; vertex `i` sits at angle
//! `i · angular_step()` from the shape centre. Regular polygons are presets of
//! the same type (`polygon`, `square`, `triangle`, `circle`), not subtypes.

use nalgebra::{Matrix2, Vector2};
use thiserror::Error;

use crate::geom2::Vect2;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    #[error("a shape needs at least 3 points, got {0}")]
    TooFewSides(usize),
    #[error("point index {index} out of range for a shape with {len} points")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("radial distances must be finite and positive")]
    InvalidRadius,
}

/// Immutable star-shaped polygon around its centre.
///
/// Invariants:
/// - at least 3 radial points, each finite and `> 0`;
/// - `min_radius`/`max_radius` are the extremes of the radial points.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    name: String,
    radial_points: Vec<f64>,
    rotational_symmetries: u32,
    mirrors: u32,
    min_radius: f64,
    max_radius: f64,
}

impl Shape {
    pub fn new(
        name: impl Into<String>,
        radial_points: Vec<f64>,
        rotational_symmetries: u32,
        mirrors: u32,
    ) -> Result<Self, ShapeError> {
        if radial_points.len() < 3 {
            return Err(ShapeError::TooFewSides(radial_points.len()));
        }
        if radial_points.iter().any(|r| !(r.is_finite() && *r > 0.0)) {
            return Err(ShapeError::InvalidRadius);
        }
        let min_radius = radial_points.iter().copied().fold(f64::INFINITY, f64::min);
        let max_radius = radial_points.iter().copied().fold(0.0, f64::max);
        Ok(Self {
            name: name.into(),
            radial_points,
            rotational_symmetries: rotational_symmetries.max(1),
            mirrors,
            min_radius,
            max_radius,
        })
    }

    /// Shape without declared symmetry.
    pub fn from_radii(
        name: impl Into<String>,
        radial_points: Vec<f64>,
    ) -> Result<Self, ShapeError> {
        Self::new(name, radial_points, 1, 0)
    }

    /// Regular polygon with unit circumradius, `sides` rotations and mirrors.
    pub fn polygon(sides: usize) -> Result<Self, ShapeError> {
        Self::regular(format!("Polygon-{sides}"), sides)
    }

    pub fn square() -> Self {
        Self::regular_preset("Square", 4)
    }

    pub fn triangle() -> Self {
        Self::regular_preset("Triangle", 3)
    }

    /// Circle approximated by a `resolution`-gon.
    pub fn circle(resolution: usize) -> Result<Self, ShapeError> {
        Self::regular("Circle", resolution)
    }

    fn regular(name: impl Into<String>, sides: usize) -> Result<Self, ShapeError> {
        let n = sides as u32;
        Self::new(name, vec![1.0; sides], n, n)
    }

    fn regular_preset(name: &str, sides: usize) -> Self {
        let n = sides as u32;
        Self {
            name: name.to_string(),
            radial_points: vec![1.0; sides],
            rotational_symmetries: n,
            mirrors: n,
            min_radius: 1.0,
            max_radius: 1.0,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[inline]
    pub fn radial_points(&self) -> &[f64] {
        &self.radial_points
    }
    #[inline]
    pub fn rotational_symmetries(&self) -> u32 {
        self.rotational_symmetries
    }
    #[inline]
    pub fn mirrors(&self) -> u32 {
        self.mirrors
    }
    #[inline]
    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }
    #[inline]
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.radial_points.len()
    }

    #[inline]
    pub fn angular_step(&self) -> f64 {
        std::f64::consts::TAU / self.resolution() as f64
    }

    /// Radial distance of vertex `index`; negative or too large indices fail.
    pub fn get_point(&self, index: isize) -> Result<f64, ShapeError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.radial_points.get(i).copied())
            .ok_or(ShapeError::IndexOutOfRange {
                index,
                len: self.resolution(),
            })
    }

    /// Area by side-angle-side over the consecutive vertex triangles.
    pub fn area(&self) -> f64 {
        let sin_step = self.angular_step().sin();
        let n = self.resolution();
        (0..n)
            .map(|i| 0.5 * self.radial_points[i] * self.radial_points[(i + 1) % n] * sin_step)
            .sum()
    }

    /// Cartesian vertex `index` in the shape's own frame.
    pub fn vertex(&self, index: isize) -> Result<Vect2, ShapeError> {
        let r = self.get_point(index)?;
        let theta = self.angular_step() * index as f64;
        Ok(Vect2::new(r * theta.cos(), r * theta.sin()))
    }

    /// Vertices in the shape's own frame, centre at the origin.
    pub fn vertices(&self) -> impl Iterator<Item = Vect2> + '_ {
        let step = self.angular_step();
        self.radial_points.iter().enumerate().map(move |(i, &r)| {
            let theta = step * i as f64;
            Vect2::new(r * theta.cos(), r * theta.sin())
        })
    }

    /// Vertices after applying `linear` (rotation, possibly with reflection)
    /// and translating to `centre`.
    pub fn placed_vertices(&self, centre: Vect2, linear: &Matrix2<f64>) -> Vec<Vect2> {
        self.vertices()
            .map(|v| centre + Vect2::from(linear * Vector2::from(v)))
            .collect()
    }
}
