use super::*;
use crate::basis::BasisKind;
use crate::geom2::{positive_modulo, Vect2};
use crate::shape::Shape;
use crate::symmetry::{Catalogue, WallpaperGroup};
use nalgebra::Matrix2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

fn catalogue() -> Catalogue {
    Catalogue::standard().expect("built-in table parses")
}

fn group(label: &str) -> WallpaperGroup {
    catalogue().get(label).expect("known group").clone()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn quick_cfg(steps: usize) -> SearchCfg {
    SearchCfg {
        steps,
        log_interval: 50,
        ..SearchCfg::default()
    }
}

#[test]
fn shell_count_widens_for_thin_cells() {
    let unit = Matrix2::identity();
    assert_eq!(shell_count(&unit, 0.5), 1);
    assert_eq!(shell_count(&unit, 2.5), 3);
    let sheared = Matrix2::new(1.0, (0.3f64).cos(), 0.0, (0.3f64).sin());
    assert!(shell_count(&sheared, 0.5) >= 2);
}

#[test]
fn initialise_rejects_bad_site_lists() {
    let square = Shape::square();
    let p2 = group("p2");
    let mut rng = StdRng::seed_from_u64(1);
    let cfg = SearchCfg::default();
    assert_eq!(
        PackedState::initialise(&square, &p2, &[], &cfg, &mut rng).unwrap_err(),
        StateError::NoSites
    );
    assert_eq!(
        PackedState::initialise(&square, &p2, &[0, 9], &cfg, &mut rng).unwrap_err(),
        StateError::UnknownSite { index: 9, len: 5 }
    );
}

#[test]
fn initialise_rejects_sites_the_shape_cannot_carry() {
    let cfg = SearchCfg::default();
    let mut rng = StdRng::seed_from_u64(1);
    // No mirror on the shape, so the pm mirror line at x = 1/2 cannot hold it.
    let blob = Shape::from_radii("blob", vec![1.0, 2.0, 1.5, 1.0]).unwrap();
    let pm = group("pm");
    assert_eq!(pm.sites()[1].letter(), 'b');
    assert_eq!(
        PackedState::initialise(&blob, &pm, &[0, 1], &cfg, &mut rng).unwrap_err(),
        StateError::IncompatibleSite {
            index: 1,
            letter: 'b'
        }
    );
    // A triangle has no four-fold axis.
    let p4 = group("p4");
    let triangle = Shape::triangle();
    let err = PackedState::initialise(&triangle, &p4, &[1], &cfg, &mut rng);
    assert!(matches!(
        err,
        Err(StateError::IncompatibleSite { index: 1, .. })
    ));
    let general = PackedState::initialise(&blob, &pm, &[0], &cfg, &mut rng);
    assert!(general.is_ok());
}

#[test]
fn p1_square_is_alone_in_its_cell() {
    let square = Shape::square();
    let p1 = group("p1");
    let mut rng = StdRng::seed_from_u64(7);
    let state =
        PackedState::initialise(&square, &p1, &[0], &SearchCfg::default(), &mut rng).unwrap();
    assert_eq!(state.replicas(), 1);
    assert_eq!(state.instances().len(), 1);
    assert!(!state.has_overlap());
    assert!(state.fits_cell());
    let expected = square.area() / state.cell_area();
    assert!(close(state.packing_fraction(), expected));
    assert_eq!(state.chirality(), Chirality::Chiral);
}

#[test]
fn periodic_copies_are_checked() {
    let square = Shape::square();
    let p1 = group("p1");
    let mut rng = StdRng::seed_from_u64(3);
    let mut state =
        PackedState::initialise(&square, &p1, &[0], &SearchCfg::default(), &mut rng).unwrap();
    // Bases: a, b, angle, x, y, orientation. At π/4 the square is axis
    // aligned with side √2.
    state
        .load_values(&[1.5, 1.5, FRAC_PI_2, 0.5, 0.5, FRAC_PI_4])
        .unwrap();
    assert!(!state.has_overlap());
    assert!(state.is_valid());
    state
        .load_values(&[1.4, 1.5, FRAC_PI_2, 0.5, 0.5, FRAC_PI_4])
        .unwrap();
    assert!(state.has_overlap());
    assert!(!state.is_valid());
}

#[test]
fn p2_images_reflect_through_origin() {
    let square = Shape::square();
    let p2 = group("p2");
    let mut rng = StdRng::seed_from_u64(11);
    let mut state =
        PackedState::initialise(&square, &p2, &[0], &SearchCfg::default(), &mut rng).unwrap();
    state
        .load_values(&[6.0, 6.0, FRAC_PI_2, 0.25, 0.125, 0.3])
        .unwrap();
    let instances = state.instances();
    assert_eq!(instances.len(), 2);
    let (a, b) = (&instances[0], &instances[1]);
    assert!(close(a.fractional.x, 0.25) && close(a.fractional.y, 0.125));
    assert!(close(b.fractional.x, 0.75) && close(b.fractional.y, 0.875));
    // Vertex i of one image is the point reflection of vertex i of the other
    // about the midpoint of the two centres (modulo the cell shift).
    let shift = Vect2::new(6.0, 6.0);
    for (p, q) in a.vertices.iter().zip(&b.vertices) {
        let sum = *p + *q - shift;
        assert!(close(sum.x, 0.0) && close(sum.y, 0.0), "{sum}");
    }
    assert_eq!(state.chirality(), Chirality::Chiral);
}

#[test]
fn mirror_group_is_achiral() {
    let square = Shape::square();
    let pm = group("pm");
    let mut rng = StdRng::seed_from_u64(5);
    let state =
        PackedState::initialise(&square, &pm, &[0], &SearchCfg::default(), &mut rng).unwrap();
    assert_eq!(state.instances().len(), 2);
    assert_eq!(state.chirality(), Chirality::Achiral);
}

#[test]
fn hexagonal_cells_share_one_length() {
    let hexagon = Shape::polygon(6).unwrap();
    let p6 = group("p6");
    let mut rng = StdRng::seed_from_u64(2);
    let state =
        PackedState::initialise(&hexagon, &p6, &[0], &SearchCfg::default(), &mut rng).unwrap();
    let cell = state.cell();
    assert_eq!(cell.x_len, cell.y_len);
    let (a, b, angle) = state.cell_parameters();
    assert_eq!(a, b);
    assert!(close(angle, 2.0 * PI / 3.0));
    let angle_kind = state.bases().get(cell.angle).unwrap().kind();
    assert_eq!(angle_kind, BasisKind::Fixed);
    let bases = state.bases();
    let x = cell.fractional_to_real(bases, Vect2::new(1.0, 0.0));
    let y = cell.fractional_to_real(bases, Vect2::new(0.0, 1.0));
    assert!(close(x.x, a) && close(x.y, 0.0));
    let height = a * (3.0f64).sqrt() / 2.0;
    assert!(close(y.x, -0.5 * a) && close(y.y, height));
    assert!(close(cell.area(bases), a * a * (3.0f64).sqrt() / 2.0));
    assert!(close(state.cell_area(), cell.matrix(bases).determinant()));
}

#[test]
fn mirror_sites_lock_orientation_to_mirror_lines() {
    let square = Shape::square();
    let p2mm = group("p2mm");
    let index = p2mm
        .sites()
        .iter()
        .position(|s| s.letter() == 'a')
        .unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let mut state =
        PackedState::initialise(&square, &p2mm, &[index], &SearchCfg::default(), &mut rng).unwrap();
    let angle = state.sites()[0].angle;
    let basis = state.bases().get(angle).unwrap();
    assert_eq!(basis.kind(), BasisKind::Mirror { mirrors: 4 });
    assert!(close(basis.value(), FRAC_PI_2));
    for _ in 0..200 {
        state.step(&mut rng, |_, _| true).unwrap();
        let v = positive_modulo(state.bases().value(angle), FRAC_PI_4);
        assert!(v < 1e-9 || (FRAC_PI_4 - v) < 1e-9, "{v}");
    }
}

#[test]
fn rejected_steps_leave_values_untouched() {
    let square = Shape::square();
    let p2 = group("p2");
    let mut rng = StdRng::seed_from_u64(9);
    let mut state =
        PackedState::initialise(&square, &p2, &[0], &SearchCfg::default(), &mut rng).unwrap();
    let before = state.values();
    for _ in 0..100 {
        let outcome = state.step(&mut rng, |_, _| false).unwrap();
        assert_ne!(outcome, StepOutcome::Accepted);
        assert_eq!(state.values(), before);
    }
}

#[test]
fn reset_restores_the_start() {
    let square = Shape::square();
    let p2 = group("p2");
    let mut rng = StdRng::seed_from_u64(21);
    let mut state =
        PackedState::initialise(&square, &p2, &[0], &SearchCfg::default(), &mut rng).unwrap();
    let start = state.values();
    for _ in 0..50 {
        state.propose(&mut rng).unwrap();
    }
    state.reset();
    assert_eq!(state.values(), start);
}

#[test]
fn greedy_never_lowers_fraction() {
    assert!(greedy(0.3, 0.3));
    assert!(greedy(0.3, 0.4));
    assert!(!greedy(0.4, 0.3));
}

#[test]
fn run_keeps_densest_valid_state() {
    let square = Shape::square();
    let p2 = group("p2");
    let cfg = quick_cfg(500);
    let mut rng = StdRng::seed_from_u64(13);
    let mut state = PackedState::initialise(&square, &p2, &[0], &cfg, &mut rng).unwrap();
    let report = run(&mut state, &cfg, &mut rng, greedy).unwrap();
    assert_eq!(report.steps, 500);
    assert_eq!(report.accepted + report.invalid + report.declined, 500);
    assert!(report.best_fraction >= report.initial_fraction);
    assert!(report.best_fraction > report.initial_fraction);
    assert_eq!(state.values(), report.best_values);
    assert_eq!(state.packing_fraction(), report.best_fraction);
    assert!(state.is_valid());
    assert_eq!(report.trace.len(), 10);
    assert_eq!(report.group, "p2");
}

#[test]
fn fit_compresses_every_group() {
    let square = Shape::square();
    let cfg = quick_cfg(100);
    for group in catalogue().iter() {
        let mut rng = StdRng::seed_from_u64(17);
        let (state, report) = fit(&square, group, &[0], &cfg, &mut rng).unwrap();
        assert!(state.is_valid(), "{}", group.label());
        assert!(report.best_fraction >= report.initial_fraction);
        assert!(report.best_fraction <= 1.0);
    }
}

#[test]
fn valid_sites_follow_shape_symmetry() {
    let p4 = group("p4");
    assert_eq!(valid_sites(&Shape::triangle(), &p4), vec![0]);
    assert_eq!(valid_sites(&Shape::square(), &p4), vec![0, 1, 2, 3]);
    let p2mm = group("p2mm");
    assert_eq!(valid_sites(&Shape::triangle(), &p2mm), vec![0, 1, 2, 3, 4]);
    let circle = Shape::circle(12).unwrap();
    assert_eq!(valid_sites(&circle, &p2mm).len(), 9);
    let blob = Shape::from_radii("blob", vec![1.0, 2.0, 1.5, 1.0]).unwrap();
    assert_eq!(valid_sites(&blob, &p2mm), vec![0]);
}

#[test]
fn isopointal_enumeration() {
    let square = Shape::square();
    assert_eq!(isopointal_sites(&square, &group("p1"), 1), vec![vec![0]]);
    assert_eq!(isopointal_sites(&square, &group("p1"), 2), vec![vec![0, 0]]);
    let p2 = group("p2");
    assert_eq!(isopointal_sites(&square, &p2, 1).len(), 5);
    let pairs = isopointal_sites(&square, &p2, 2);
    assert_eq!(pairs.len(), 11);
    assert!(pairs.contains(&vec![0, 0]));
    assert!(!pairs.contains(&vec![1, 1]));
    for row in &pairs {
        assert!(row.windows(2).all(|w| w[0] <= w[1]));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn initial_states_are_valid(seed in any::<u64>()) {
        let square = Shape::square();
        let p2gg = group("p2gg");
        let mut rng = StdRng::seed_from_u64(seed);
        let state =
            PackedState::initialise(&square, &p2gg, &[0], &SearchCfg::default(), &mut rng).unwrap();
        prop_assert!(state.is_valid());
        prop_assert_eq!(state.instances().len(), 4);
        for inst in state.instances() {
            prop_assert!(inst.fractional.x >= 0.0 && inst.fractional.x < 1.0);
            prop_assert!(inst.fractional.y >= 0.0 && inst.fractional.y < 1.0);
        }
    }
}
