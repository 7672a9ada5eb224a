//! Site combinations a shape can occupy within one group.

use tracing::debug;

use crate::shape::Shape;
use crate::symmetry::{WallpaperGroup, WyckoffSite};
use crate::util::combinations_dedup;

/// True when `shape` carries the rotations and mirrors `site` imposes.
pub(crate) fn compatible(shape: &Shape, site: &WyckoffSite) -> bool {
    if shape.rotational_symmetries() % site.rotations() != 0 {
        return false;
    }
    !site.has_mirror() || (shape.mirrors() > 0 && shape.mirrors() % site.mirror_count() == 0)
}

/// Indices of the sites whose symmetry `shape` can carry.
pub fn valid_sites(shape: &Shape, group: &WallpaperGroup) -> Vec<usize> {
    group
        .sites()
        .iter()
        .enumerate()
        .filter(|(_, site)| compatible(shape, site))
        .map(|(i, _)| i)
        .collect()
}

/// All distinct ways to occupy `count` sites of `group` with `shape`.
///
/// Special positions with no free coordinate can hold one shape only;
/// variable sites may be picked up to `count` times. Each row lists site
/// indices in ascending order.
pub fn isopointal_sites(shape: &Shape, group: &WallpaperGroup, count: usize) -> Vec<Vec<usize>> {
    let mut pool = Vec::new();
    for index in valid_sites(shape, group) {
        let repeats = if group.sites()[index].is_variable() {
            count
        } else {
            1
        };
        pool.extend(std::iter::repeat(index).take(repeats));
    }
    let rows = combinations_dedup(&pool, count);
    debug!(
        group = group.label(),
        shape = shape.name(),
        count,
        combinations = rows.len(),
        "isopointal sites"
    );
    rows
}
