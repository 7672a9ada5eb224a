//! Built-in Wyckoff table of the 17 plane groups.
//!
//! Rows are `(multiplicity, letter, site symmetry, coordinate generators)`,
//! general position first. Generators follow the International Tables
//! setting; centred groups (`cm`, `c2mm`) list the centring copies
//! explicitly. Hexagonal generators assume a 120° cell angle.

use super::group::{GroupRecord, SiteRecord};

type Row = (usize, char, &'static str, &'static str);

pub(crate) static STANDARD_TABLE: &[(&str, &[Row])] = &[
    ("p1", &[(1, 'a', "1", "(x,y)")]),
    (
        "p2",
        &[
            (2, 'e', "1", "(x,y) (-x,-y)"),
            (1, 'd', "2", "(1/2,1/2)"),
            (1, 'c', "2", "(1/2,0)"),
            (1, 'b', "2", "(0,1/2)"),
            (1, 'a', "2", "(0,0)"),
        ],
    ),
    (
        "pm",
        &[
            (2, 'c', "1", "(x,y) (-x,y)"),
            (1, 'b', ".m.", "(1/2,y)"),
            (1, 'a', ".m.", "(0,y)"),
        ],
    ),
    ("pg", &[(2, 'a', "1", "(x,y) (-x,y+1/2)")]),
    (
        "cm",
        &[
            (4, 'b', "1", "(x,y) (-x,y) (x+1/2,y+1/2) (-x+1/2,y+1/2)"),
            (2, 'a', ".m.", "(0,y) (1/2,y+1/2)"),
        ],
    ),
    (
        "p2mm",
        &[
            (4, 'i', "1", "(x,y) (-x,-y) (-x,y) (x,-y)"),
            (2, 'h', ".m.", "(1/2,y) (1/2,-y)"),
            (2, 'g', ".m.", "(0,y) (0,-y)"),
            (2, 'f', "..m", "(x,1/2) (-x,1/2)"),
            (2, 'e', "..m", "(x,0) (-x,0)"),
            (1, 'd', "2mm", "(1/2,1/2)"),
            (1, 'c', "2mm", "(1/2,0)"),
            (1, 'b', "2mm", "(0,1/2)"),
            (1, 'a', "2mm", "(0,0)"),
        ],
    ),
    (
        "p2mg",
        &[
            (4, 'd', "1", "(x,y) (-x,-y) (-x+1/2,y) (x+1/2,-y)"),
            (2, 'c', ".m.", "(1/4,y) (3/4,-y)"),
            (2, 'b', "2..", "(0,1/2) (1/2,1/2)"),
            (2, 'a', "2..", "(0,0) (1/2,0)"),
        ],
    ),
    (
        "p2gg",
        &[
            (4, 'c', "1", "(x,y) (-x,-y) (-x+1/2,y+1/2) (x+1/2,-y+1/2)"),
            (2, 'b', "2..", "(1/2,0) (0,1/2)"),
            (2, 'a', "2..", "(0,0) (1/2,1/2)"),
        ],
    ),
    (
        "c2mm",
        &[
            (
                8,
                'f',
                "1",
                "(x,y) (-x,-y) (-x,y) (x,-y) \
                 (x+1/2,y+1/2) (-x+1/2,-y+1/2) (-x+1/2,y+1/2) (x+1/2,-y+1/2)",
            ),
            (4, 'e', ".m.", "(0,y) (0,-y) (1/2,y+1/2) (1/2,-y+1/2)"),
            (4, 'd', "..m", "(x,0) (-x,0) (x+1/2,1/2) (-x+1/2,1/2)"),
            (4, 'c', "2..", "(1/4,1/4) (3/4,1/4) (3/4,3/4) (1/4,3/4)"),
            (2, 'b', "2mm", "(0,1/2) (1/2,0)"),
            (2, 'a', "2mm", "(0,0) (1/2,1/2)"),
        ],
    ),
    (
        "p4",
        &[
            (4, 'd', "1", "(x,y) (-x,-y) (-y,x) (y,-x)"),
            (2, 'c', "2..", "(1/2,0) (0,1/2)"),
            (1, 'b', "4..", "(1/2,1/2)"),
            (1, 'a', "4..", "(0,0)"),
        ],
    ),
    (
        "p4mm",
        &[
            (
                8,
                'g',
                "1",
                "(x,y) (-x,-y) (-y,x) (y,-x) (-x,y) (x,-y) (y,x) (-y,-x)",
            ),
            (4, 'f', "..m", "(x,x) (-x,-x) (-x,x) (x,-x)"),
            (4, 'e', ".m.", "(x,1/2) (-x,1/2) (1/2,x) (1/2,-x)"),
            (4, 'd', ".m.", "(x,0) (-x,0) (0,x) (0,-x)"),
            (2, 'c', "2mm.", "(1/2,0) (0,1/2)"),
            (1, 'b', "4mm", "(1/2,1/2)"),
            (1, 'a', "4mm", "(0,0)"),
        ],
    ),
    (
        "p4gm",
        &[
            (
                8,
                'd',
                "1",
                "(x,y) (-x,-y) (-y,x) (y,-x) \
                 (-x+1/2,y+1/2) (x+1/2,-y+1/2) (y+1/2,x+1/2) (-y+1/2,-x+1/2)",
            ),
            (4, 'c', "..m", "(x,x+1/2) (-x,-x+1/2) (-x+1/2,x) (x+1/2,-x)"),
            (2, 'b', "2.mm", "(1/2,0) (0,1/2)"),
            (2, 'a', "4..", "(0,0) (1/2,1/2)"),
        ],
    ),
    (
        "p3",
        &[
            (3, 'd', "1", "(x,y) (-y,x-y) (-x+y,-x)"),
            (1, 'c', "3..", "(2/3,1/3)"),
            (1, 'b', "3..", "(1/3,2/3)"),
            (1, 'a', "3..", "(0,0)"),
        ],
    ),
    (
        "p3m1",
        &[
            (
                6,
                'e',
                "1",
                "(x,y) (-y,x-y) (-x+y,-x) (-y,-x) (-x+y,y) (x,x-y)",
            ),
            (3, 'd', ".m.", "(x,-x) (x,2x) (-2x,-x)"),
            (1, 'c', "3m.", "(2/3,1/3)"),
            (1, 'b', "3m.", "(1/3,2/3)"),
            (1, 'a', "3m.", "(0,0)"),
        ],
    ),
    (
        "p31m",
        &[
            (
                6,
                'd',
                "1",
                "(x,y) (-y,x-y) (-x+y,-x) (y,x) (x-y,-y) (-x,-x+y)",
            ),
            (3, 'c', "..m", "(x,0) (0,x) (-x,-x)"),
            (2, 'b', "3..", "(1/3,2/3) (2/3,1/3)"),
            (1, 'a', "3.m", "(0,0)"),
        ],
    ),
    (
        "p6",
        &[
            (
                6,
                'd',
                "1",
                "(x,y) (-y,x-y) (-x+y,-x) (-x,-y) (y,-x+y) (x-y,x)",
            ),
            (3, 'c', "2..", "(1/2,0) (0,1/2) (1/2,1/2)"),
            (2, 'b', "3..", "(1/3,2/3) (2/3,1/3)"),
            (1, 'a', "6..", "(0,0)"),
        ],
    ),
    (
        "p6mm",
        &[
            (
                12,
                'f',
                "1",
                "(x,y) (-y,x-y) (-x+y,-x) (-x,-y) (y,-x+y) (x-y,x) \
                 (-y,-x) (-x+y,y) (x,x-y) (y,x) (x-y,-y) (-x,-x+y)",
            ),
            (
                6,
                'e',
                ".m.",
                "(x,-x) (x,2x) (-2x,-x) (-x,x) (-x,-2x) (2x,x)",
            ),
            (6, 'd', "..m", "(x,0) (0,x) (-x,-x) (-x,0) (0,-x) (x,x)"),
            (3, 'c', "2mm", "(1/2,0) (0,1/2) (1/2,1/2)"),
            (2, 'b', "3m.", "(1/3,2/3) (2/3,1/3)"),
            (1, 'a', "6mm", "(0,0)"),
        ],
    ),
];

/// The built-in table as owned records.
pub fn standard_records() -> Vec<GroupRecord> {
    STANDARD_TABLE
        .iter()
        .map(|(label, rows)| GroupRecord {
            label: label.to_string(),
            sites: rows.iter().map(site_record).collect(),
        })
        .collect()
}

fn site_record(&(multiplicity, letter, symmetry, coordinates): &Row) -> SiteRecord {
    SiteRecord {
        multiplicity,
        letter,
        symmetry: symmetry.to_string(),
        coordinates: coordinates.to_string(),
    }
}
