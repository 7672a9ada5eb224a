//! Wallpaper groups and the catalogue built from site records.

use serde::{Deserialize, Serialize};

use super::catalogue::standard_records;
use super::{Lattice, SiteSymmetry, SymmetryError, SymmetryTransform, WyckoffSite};

/// One Wyckoff row as delivered by the data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub multiplicity: usize,
    pub letter: char,
    pub symmetry: String,
    pub coordinates: String,
}

impl SiteRecord {
    /// Parse generators and symmetry code; the generator count must match
    /// the listed multiplicity.
    pub fn to_site(&self, label: &str) -> Result<WyckoffSite, SymmetryError> {
        let transforms = SymmetryTransform::parse_list(&self.coordinates)?;
        if transforms.len() != self.multiplicity {
            return Err(SymmetryError::MultiplicityMismatch {
                label: label.to_string(),
                letter: self.letter,
                expected: self.multiplicity,
                got: transforms.len(),
            });
        }
        let symmetry = SiteSymmetry::parse(&self.symmetry)?;
        WyckoffSite::with_symmetry(self.letter, symmetry, transforms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub label: String,
    pub sites: Vec<SiteRecord>,
}

/// Immutable plane group: label plus ordered Wyckoff sites.
#[derive(Clone, Debug, PartialEq)]
pub struct WallpaperGroup {
    label: String,
    sites: Vec<WyckoffSite>,
    lattice: Lattice,
    num_symmetries: usize,
}

impl WallpaperGroup {
    /// The site with the largest multiplicity is taken as the general
    /// position; every image of every site must be one of its operations
    /// applied to the site's first image.
    pub fn new(label: impl Into<String>, sites: Vec<WyckoffSite>) -> Result<Self, SymmetryError> {
        let label = label.into();
        // `rev` keeps the first of several equally large sites.
        let Some(general) = sites.iter().rev().max_by_key(|s| s.multiplicity()).cloned() else {
            return Err(SymmetryError::EmptyGroup { label });
        };
        let lattice = infer_lattice(general.transforms());
        let num_symmetries = general.multiplicity();
        let sites = sites
            .into_iter()
            .map(|site| {
                let letter = site.letter();
                site.resolve(lattice, general.transforms())
                    .map_err(|index| SymmetryError::UnmatchedImage {
                        label: label.clone(),
                        letter,
                        index,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            label,
            sites,
            lattice,
            num_symmetries,
        })
    }

    pub fn from_record(record: &GroupRecord) -> Result<Self, SymmetryError> {
        let sites = record
            .sites
            .iter()
            .map(|r| r.to_site(&record.label))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(record.label.clone(), sites)
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
    #[inline]
    pub fn sites(&self) -> &[WyckoffSite] {
        &self.sites
    }
    pub fn site(&self, letter: char) -> Option<&WyckoffSite> {
        self.sites.iter().find(|s| s.letter() == letter)
    }
    #[inline]
    pub fn lattice(&self) -> Lattice {
        self.lattice
    }
    /// Largest site multiplicity (the order of the point group, times the
    /// centring for centred groups).
    #[inline]
    pub fn num_symmetries(&self) -> usize {
        self.num_symmetries
    }
    #[inline]
    pub fn a_b_equal(&self) -> bool {
        matches!(self.lattice, Lattice::Square | Lattice::Hexagonal)
    }
    #[inline]
    pub fn hexagonal(&self) -> bool {
        self.lattice == Lattice::Hexagonal
    }
    #[inline]
    pub fn rectangular(&self) -> bool {
        matches!(self.lattice, Lattice::Rectangular | Lattice::Square)
    }
}

fn infer_lattice(general: &[SymmetryTransform]) -> Lattice {
    let orders: Vec<u32> = general.iter().map(|t| t.rotation_order()).collect();
    if orders.iter().any(|&k| k == 3 || k == 6) {
        Lattice::Hexagonal
    } else if orders.contains(&4) {
        Lattice::Square
    } else if general.iter().any(|t| {
        let m = t.orientation();
        // Anything but ±identity fixes the cell axes.
        m[(0, 1)] != 0.0 || m[(1, 0)] != 0.0 || m[(0, 0)] != m[(1, 1)]
    }) {
        Lattice::Rectangular
    } else {
        Lattice::Oblique
    }
}

/// All groups of one table, looked up by label.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalogue {
    groups: Vec<WallpaperGroup>,
}

impl Catalogue {
    /// The 17 plane groups from the built-in table.
    pub fn standard() -> Result<Self, SymmetryError> {
        Self::from_records(&standard_records())
    }

    pub fn from_records(records: &[GroupRecord]) -> Result<Self, SymmetryError> {
        let groups = records
            .iter()
            .map(WallpaperGroup::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { groups })
    }

    /// Exact label match first, then case-insensitive.
    pub fn get(&self, label: &str) -> Result<&WallpaperGroup, SymmetryError> {
        self.groups
            .iter()
            .find(|g| g.label() == label)
            .or_else(|| {
                self.groups
                    .iter()
                    .find(|g| g.label().eq_ignore_ascii_case(label))
            })
            .ok_or_else(|| SymmetryError::UnknownGroup(label.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WallpaperGroup> {
        self.groups.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
