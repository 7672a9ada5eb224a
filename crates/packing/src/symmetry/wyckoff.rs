//! Wyckoff sites and their site-symmetry codes.

use std::fmt;

use nalgebra::{Matrix2, Vector2};

use super::{Lattice, Mirror, SymmetryError, SymmetryTransform};
use crate::cfg::VARY_EPS;
use crate::geom2::Vect2;

/// Parsed site-symmetry code such as `1`, `.m.`, `2mm` or `2.mm`.
///
/// The first character is the rotation order (`.` for none). The remaining
/// positions refer to the primary and secondary symmetry directions; a `m`
/// in either marks a mirror line through the site in that direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteSymmetry {
    code: String,
    rotations: u32,
    primary_mirror: bool,
    secondary_mirror: bool,
}

impl SiteSymmetry {
    /// Symmetry of a general position.
    pub fn general() -> Self {
        Self {
            code: "1".to_string(),
            rotations: 1,
            primary_mirror: false,
            secondary_mirror: false,
        }
    }

    pub fn parse(code: &str) -> Result<Self, SymmetryError> {
        let bad = || SymmetryError::BadSymmetryCode(code.to_string());
        let chars: Vec<char> = code.trim().chars().collect();
        if chars.is_empty() || chars.len() > 4 {
            return Err(bad());
        }
        if chars[1..].iter().any(|c| *c != 'm' && *c != '.') {
            return Err(bad());
        }
        let rotations = match chars[0] {
            '.' | '1' => 1,
            '2' => 2,
            '3' => 3,
            '4' => 4,
            '6' => 6,
            _ => return Err(bad()),
        };
        let rest = &chars[1..];
        // Four-character forms put a doubled mirror into one direction slot.
        let doubled = rest.len() == 3 && rest[..2] == ['m', 'm'];
        let (primary, secondary): (&[char], &[char]) = if doubled {
            (&rest[..2], &rest[2..])
        } else if rest.is_empty() {
            (&[], &[])
        } else {
            (&rest[..1], &rest[1..])
        };
        Ok(Self {
            code: chars.iter().collect(),
            rotations,
            primary_mirror: primary.contains(&'m'),
            secondary_mirror: secondary.contains(&'m'),
        })
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }
    #[inline]
    pub fn rotations(&self) -> u32 {
        self.rotations
    }
    #[inline]
    pub fn primary_mirror(&self) -> bool {
        self.primary_mirror
    }
    #[inline]
    pub fn secondary_mirror(&self) -> bool {
        self.secondary_mirror
    }
    #[inline]
    pub fn has_mirror(&self) -> bool {
        self.primary_mirror || self.secondary_mirror
    }
}

impl fmt::Display for SiteSymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Orbit of one site under the group: the ordered images of its first copy.
#[derive(Clone, Debug, PartialEq)]
pub struct WyckoffSite {
    letter: char,
    symmetry: SiteSymmetry,
    transforms: Vec<SymmetryTransform>,
    mirror: Mirror,
}

impl WyckoffSite {
    /// Site with general-position symmetry.
    pub fn new(letter: char, transforms: Vec<SymmetryTransform>) -> Result<Self, SymmetryError> {
        Self::with_symmetry(letter, SiteSymmetry::general(), transforms)
    }

    pub fn with_symmetry(
        letter: char,
        symmetry: SiteSymmetry,
        transforms: Vec<SymmetryTransform>,
    ) -> Result<Self, SymmetryError> {
        if transforms.is_empty() {
            return Err(SymmetryError::EmptySite { letter });
        }
        let mut site = Self {
            letter,
            symmetry,
            transforms,
            mirror: Mirror::None,
        };
        site.mirror = site.mirror_for(Lattice::Rectangular);
        Ok(site)
    }

    #[inline]
    pub fn letter(&self) -> char {
        self.letter
    }
    #[inline]
    pub fn symmetry(&self) -> &SiteSymmetry {
        &self.symmetry
    }
    #[inline]
    pub fn transforms(&self) -> &[SymmetryTransform] {
        &self.transforms
    }
    #[inline]
    pub fn multiplicity(&self) -> usize {
        self.transforms.len()
    }

    /// The first image leaves `x` free.
    pub fn vary_x(&self) -> bool {
        self.transforms[0].linear()[(0, 0)].abs() > VARY_EPS
    }

    /// The first image leaves `y` free.
    pub fn vary_y(&self) -> bool {
        self.transforms[0].linear()[(1, 1)].abs() > VARY_EPS
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        self.vary_x() || self.vary_y()
    }

    pub fn degrees_of_freedom(&self) -> usize {
        self.vary_x() as usize + self.vary_y() as usize
    }

    /// Rotation order of the site symmetry.
    #[inline]
    pub fn rotations(&self) -> u32 {
        self.symmetry.rotations
    }

    #[inline]
    pub fn has_mirror(&self) -> bool {
        self.symmetry.has_mirror()
    }

    /// Mirror lines through the site: as many as its rotations, if mirrored.
    pub fn mirror_count(&self) -> u32 {
        if self.has_mirror() {
            self.rotations()
        } else {
            0
        }
    }

    /// Mirror line a shape on this site must keep one of its mirrors on.
    #[inline]
    pub fn mirror_type(&self) -> Mirror {
        self.mirror
    }

    /// Fractional positions of all images of the site variables `(x, y)`.
    pub fn positions(&self, site: Vect2) -> Vec<Vect2> {
        self.transforms.iter().map(|t| t.image(site)).collect()
    }

    /// Re-read the site in its group: lattice angle, image orientations from
    /// the general position, and the mirror line. Returns the index of the
    /// first image no general operation produces.
    pub(crate) fn resolve(
        mut self,
        lattice: Lattice,
        general: &[SymmetryTransform],
    ) -> Result<Self, usize> {
        let gamma = lattice.canonical_angle();
        let first = self.transforms[0].clone();
        let mut resolved = Vec::with_capacity(self.transforms.len());
        for (index, image) in self.transforms.into_iter().enumerate() {
            let op = general
                .iter()
                .find(|g| g.carries(&first, &image))
                .ok_or(index)?;
            let image = image.with_orientation(*op.linear());
            resolved.push(image.with_lattice_angle(gamma));
        }
        self.transforms = resolved;
        self.mirror = self.mirror_for(lattice);
        Ok(self)
    }

    fn mirror_for(&self, lattice: Lattice) -> Mirror {
        let sym = &self.symmetry;
        if !sym.has_mirror() {
            return Mirror::None;
        }
        if self.degrees_of_freedom() == 1 {
            // The site lies on its mirror line, along the free direction.
            let linear = self.transforms[0].linear();
            let column = if self.vary_x() { 0 } else { 1 };
            let frac = Vector2::new(linear[(0, column)], linear[(1, column)]);
            let gamma = lattice.canonical_angle();
            let cell = Matrix2::new(1.0, gamma.cos(), 0.0, gamma.sin());
            let dir = cell * frac;
            return Mirror::from_line_angle_deg(dir.y.atan2(dir.x).to_degrees());
        }
        let (primary, secondary) = match lattice {
            Lattice::Square => (Mirror::M0, Mirror::M45),
            Lattice::Oblique | Lattice::Rectangular | Lattice::Hexagonal => {
                (Mirror::M90, Mirror::M0)
            }
        };
        if sym.primary_mirror {
            primary
        } else {
            secondary
        }
    }
}
