//! Placed shapes and the periodic overlap search.

use std::f64::consts::FRAC_PI_4;

use nalgebra::{Matrix2, Rotation2, Vector2};

use crate::geom2::{polygons_intersect, Vect2};
use crate::shape::Shape;
use crate::symmetry::SymmetryTransform;
use crate::util::combinations;

/// One image of one occupied site, placed in the home cell.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeInstance {
    /// Index into the state's occupied sites.
    pub occupied: usize,
    /// Index of the site transform that produced this image.
    pub image: usize,
    pub fractional: Vect2,
    pub centre: Vect2,
    pub flipped: bool,
    pub vertices: Vec<Vect2>,
}

impl ShapeInstance {
    /// Place `shape` for the image `transform` of site variables
    /// `(site, angle)` in the cell with edge matrix `lattice`.
    pub fn place(
        shape: &Shape,
        transform: &SymmetryTransform,
        site: Vect2,
        angle: f64,
        lattice: &Matrix2<f64>,
        occupied: usize,
        image: usize,
    ) -> Self {
        let fractional = transform.image(site);
        let centre = Vect2::from(lattice * Vector2::from(fractional));
        let linear = transform.real_orientation() * Rotation2::new(angle).into_inner();
        Self {
            occupied,
            image,
            fractional,
            centre,
            flipped: transform.is_flipped(),
            vertices: shape.placed_vertices(centre, &linear),
        }
    }

    /// Signed image count for chirality bookkeeping.
    #[inline]
    pub fn handedness(&self) -> i32 {
        if self.flipped {
            -1
        } else {
            1
        }
    }
}

/// Lattice shells to scan around the home cell.
///
/// One shell, two for cells within π/4 of degenerate, and more whenever a
/// cell height is shorter than `reach`, so no translate within `reach` of
/// the home cell is missed.
pub fn shell_count(lattice: &Matrix2<f64>, reach: f64) -> i32 {
    let a = lattice.column(0).into_owned();
    let b = lattice.column(1).into_owned();
    let area = lattice.determinant().abs();
    let angle = a.angle(&b);
    let base = if !(FRAC_PI_4..=3.0 * FRAC_PI_4).contains(&angle) {
        2
    } else {
        1
    };
    let min_height = (area / a.norm()).min(area / b.norm());
    if !(min_height > 0.0) || !reach.is_finite() {
        return base;
    }
    base.max((reach / min_height).ceil() as i32)
}

/// True when any two placed shapes (including periodic copies) overlap.
///
/// `reach` bounds the centre distance of two overlapping shapes, usually
/// twice the shape's `max_radius`.
pub fn any_overlap(instances: &[ShapeInstance], lattice: &Matrix2<f64>, reach: f64) -> bool {
    let shells = shell_count(lattice, reach);
    let idx: Vec<usize> = (0..instances.len()).collect();
    let pairs = combinations(&idx, 2)
        .into_iter()
        .map(|p| (p[0], p[1]))
        .chain(idx.iter().map(|&i| (i, i)));
    for (i, j) in pairs {
        if pair_overlaps(&instances[i], &instances[j], i == j, lattice, reach, shells) {
            return true;
        }
    }
    false
}

fn pair_overlaps(
    a: &ShapeInstance,
    b: &ShapeInstance,
    same: bool,
    lattice: &Matrix2<f64>,
    reach: f64,
    shells: i32,
) -> bool {
    for i in -shells..=shells {
        for j in -shells..=shells {
            if same && i == 0 && j == 0 {
                continue;
            }
            let shift = Vect2::from(lattice * Vector2::new(i as f64, j as f64));
            if (b.centre + shift - a.centre).norm() > reach {
                continue;
            }
            let moved: Vec<Vect2> = b.vertices.iter().map(|&v| v + shift).collect();
            if polygons_intersect(&a.vertices, &moved) {
                return true;
            }
        }
    }
    false
}
