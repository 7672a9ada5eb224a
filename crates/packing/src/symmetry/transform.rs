//! Affine symmetry transforms in fractional coordinates.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use nalgebra::{Matrix2, Vector2};

use super::expr::{parse_expr, split_coordinates, Expr};
use super::{Mirror, SymmetryError};
use crate::cfg::{COEFF_EPS, MATRIX_EPS};
use crate::geom2::{positive_modulo, Vect2, Vect3};

/// One image of a Wyckoff site: `p ↦ linear·p + translation`.
///
/// `orientation` is the proper or improper lattice operation that carries a
/// shape at the first image onto this one. For general positions it equals
/// `linear`; special positions get it from their group. The derived fields
/// (`rotation_order`, `flipped`, `rotation_offset`, `mirror`) all describe
/// `orientation` read in the canonical real cell of angle `lattice_angle`.
#[derive(Clone, Debug, PartialEq)]
pub struct SymmetryTransform {
    linear: Matrix2<f64>,
    translation: Vector2<f64>,
    orientation: Matrix2<f64>,
    lattice_angle: f64,
    real_orientation: Matrix2<f64>,
    rotation_order: u32,
    flipped: bool,
    rotation_offset: f64,
    mirror: Mirror,
}

impl SymmetryTransform {
    pub fn new(linear: Matrix2<f64>, translation: Vector2<f64>) -> Self {
        let orientation = if (linear.determinant().abs() - 1.0).abs() < MATRIX_EPS {
            linear
        } else {
            Matrix2::identity()
        };
        let mut out = Self {
            linear,
            translation,
            orientation,
            lattice_angle: FRAC_PI_2,
            real_orientation: Matrix2::identity(),
            rotation_order: 1,
            flipped: false,
            rotation_offset: 0.0,
            mirror: Mirror::None,
        };
        out.derive();
        out
    }

    pub fn identity() -> Self {
        Self::new(Matrix2::identity(), Vector2::zeros())
    }

    /// From coefficient rows `(coef_x, coef_y, constant)` of the two outputs.
    pub fn from_coeffs(x: Vect3, y: Vect3) -> Self {
        Self::new(Matrix2::new(x.x, x.y, y.x, y.y), Vector2::new(x.z, y.z))
    }

    /// Parse a single generator such as `(-x+1/2, y)`.
    pub fn parse(generator: &str) -> Result<Self, SymmetryError> {
        let pairs = split_coordinates(generator).map_err(|source| SymmetryError::Generator {
            generator: generator.to_string(),
            source,
        })?;
        match pairs.as_slice() {
            [(f, g)] => Self::from_expressions(f, g),
            _ => Err(SymmetryError::Generator {
                generator: generator.to_string(),
                source: super::ExprError::MalformedCoordinates(generator.to_string()),
            }),
        }
    }

    /// Parse a whole generator list such as `(x,y) (-x,-y)`.
    pub fn parse_list(generators: &str) -> Result<Vec<Self>, SymmetryError> {
        let pairs = split_coordinates(generators).map_err(|source| SymmetryError::Generator {
            generator: generators.to_string(),
            source,
        })?;
        pairs
            .iter()
            .map(|(f, g)| Self::from_expressions(f, g))
            .collect()
    }

    /// Reduce the two coordinate expressions to an affine map.
    pub fn from_expressions(f: &str, g: &str) -> Result<Self, SymmetryError> {
        let row_x = affine_row(f)?;
        let row_y = affine_row(g)?;
        Ok(Self::from_coeffs(row_x, row_y))
    }

    /// Same map, derived quantities re-read in a cell of angle `gamma`.
    pub fn with_lattice_angle(mut self, gamma: f64) -> Self {
        self.lattice_angle = gamma;
        self.derive();
        self
    }

    pub(crate) fn with_orientation(mut self, orientation: Matrix2<f64>) -> Self {
        self.orientation = orientation;
        self.derive();
        self
    }

    fn derive(&mut self) {
        let gamma = self.lattice_angle;
        let basis = Matrix2::new(1.0, gamma.cos(), 0.0, gamma.sin());
        let real = match basis.try_inverse() {
            Some(inv) => basis * self.orientation * inv,
            None => self.orientation,
        };
        self.real_orientation = real;
        self.flipped = self.orientation.determinant() < 0.0;
        self.rotation_offset = positive_modulo(real[(1, 0)].atan2(real[(0, 0)]), TAU);
        self.rotation_order = rotation_order(&self.orientation);
        self.mirror = if self.flipped {
            Mirror::from_line_angle_deg(self.rotation_offset.to_degrees() / 2.0)
        } else {
            Mirror::None
        };
    }

    #[inline]
    pub fn linear(&self) -> &Matrix2<f64> {
        &self.linear
    }
    #[inline]
    pub fn translation(&self) -> &Vector2<f64> {
        &self.translation
    }
    #[inline]
    pub fn orientation(&self) -> &Matrix2<f64> {
        &self.orientation
    }
    /// Orientation as a real-space rotation or reflection.
    #[inline]
    pub fn real_orientation(&self) -> &Matrix2<f64> {
        &self.real_orientation
    }
    #[inline]
    pub fn lattice_angle(&self) -> f64 {
        self.lattice_angle
    }
    #[inline]
    pub fn rotation_order(&self) -> u32 {
        self.rotation_order
    }
    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }
    /// Real-space angle of the orientation, in `[0, 2π)`.
    #[inline]
    pub fn rotation_offset(&self) -> f64 {
        self.rotation_offset
    }
    #[inline]
    pub fn mirror(&self) -> Mirror {
        self.mirror
    }

    /// Coefficient rows `(coef_x, coef_y, constant)`.
    pub fn coefficients(&self) -> (Vect3, Vect3) {
        let m = &self.linear;
        let t = &self.translation;
        (
            Vect3::new(m[(0, 0)], m[(0, 1)], t.x),
            Vect3::new(m[(1, 0)], m[(1, 1)], t.y),
        )
    }

    /// Forward map, without wrapping.
    pub fn fractional_to_real(&self, p: Vect2) -> Vect2 {
        Vect2::from(self.linear * Vector2::from(p) + self.translation)
    }

    /// Inverse map; `None` when the linear part is singular (special positions).
    pub fn real_to_fractional(&self, p: Vect2) -> Option<Vect2> {
        let inv = self.linear.try_inverse()?;
        Some(Vect2::from(inv * (Vector2::from(p) - self.translation)))
    }

    /// Forward map wrapped into the unit cell `[0, 1)²`.
    pub fn image(&self, p: Vect2) -> Vect2 {
        self.fractional_to_real(p).positive_modulo(1.0)
    }

    /// `self ∘ from == to` up to a lattice translation, as affine maps.
    pub(crate) fn carries(&self, from: &Self, to: &Self) -> bool {
        let linear = self.linear * from.linear;
        if (linear - to.linear).amax() > MATRIX_EPS {
            return false;
        }
        let shift = self.linear * from.translation + self.translation - to.translation;
        shift.iter().all(|v| (v - v.round()).abs() < MATRIX_EPS)
    }
}

fn rotation_order(m: &Matrix2<f64>) -> u32 {
    let mut power = *m;
    for k in 1..=6 {
        if (power - Matrix2::identity()).amax() < MATRIX_EPS {
            return k;
        }
        power = power * m;
    }
    1
}

fn affine_row(src: &str) -> Result<Vect3, SymmetryError> {
    let expr: Expr = parse_expr(src).map_err(|source| SymmetryError::Generator {
        generator: src.to_string(),
        source,
    })?;
    let c = expr.eval(0.0, 0.0);
    let a = expr.eval(1.0, 0.0) - c;
    let b = expr.eval(0.0, 1.0) - c;
    let affine = [a, b, c].iter().all(|v| v.is_finite())
        && [(1.0, 1.0), (2.0, -3.0)].iter().all(|&(px, py)| {
            let expect = a * px + b * py + c;
            (expr.eval(px, py) - expect).abs() <= COEFF_EPS * (1.0 + expect.abs())
        });
    if !affine {
        return Err(SymmetryError::NonAffine(src.to_string()));
    }
    let snap = |v: f64| if v.abs() < COEFF_EPS { 0.0 } else { v };
    Ok(Vect3::new(snap(a), snap(b), snap(c)))
}

fn fmt_row(f: &mut fmt::Formatter<'_>, row: Vect3) -> fmt::Result {
    let mut wrote = false;
    for (coef, name) in [(row.x, "x"), (row.y, "y")] {
        if coef == 0.0 {
            continue;
        }
        let sign = if coef < 0.0 {
            "-"
        } else if wrote {
            "+"
        } else {
            ""
        };
        let mag = coef.abs();
        if (mag - 1.0).abs() < COEFF_EPS {
            write!(f, "{sign}{name}")?;
        } else {
            write!(f, "{sign}{mag}{name}")?;
        }
        wrote = true;
    }
    if row.z != 0.0 || !wrote {
        if wrote && row.z > 0.0 {
            write!(f, "+")?;
        }
        write!(f, "{}", row.z)?;
    }
    Ok(())
}

impl fmt::Display for SymmetryTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.coefficients();
        write!(f, "(")?;
        fmt_row(f, x)?;
        write!(f, ",")?;
        fmt_row(f, y)?;
        write!(f, ")")
    }
}
