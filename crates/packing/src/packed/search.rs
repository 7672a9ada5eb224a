//! Monte Carlo compression driver.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Chirality, PackedState, StateError, StepOutcome};
use crate::cfg::DEFAULT_STEP_SIZE;
use crate::shape::Shape;
use crate::symmetry::WallpaperGroup;

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCfg {
    /// Proposals per run.
    pub steps: usize,
    /// Proposal width of coordinate and angle bases, as a fraction of their range.
    pub step_size: f64,
    /// Relative proposal width of cell lengths.
    pub length_step: f64,
    /// Steps between trace points and progress logs; 0 disables both.
    pub log_interval: usize,
    /// Random starts tried before `initialise` gives up.
    pub init_attempts: usize,
}
impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            steps: 20_000,
            step_size: DEFAULT_STEP_SIZE,
            length_step: 0.1,
            log_interval: 1_000,
            init_attempts: 1_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub step: usize,
    pub fraction: f64,
    pub best_fraction: f64,
    pub accepted: usize,
}

/// Summary of one `run`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub group: String,
    pub steps: usize,
    pub accepted: usize,
    /// Proposals reverted for overlap or cell misfit.
    pub invalid: usize,
    pub declined: usize,
    pub initial_fraction: f64,
    pub best_fraction: f64,
    /// Basis values of the densest configuration, in id order.
    pub best_values: Vec<f64>,
    /// Cell `(a, b, angle)` of the densest configuration.
    pub cell: (f64, f64, f64),
    pub chirality: Chirality,
    pub trace: Vec<TracePoint>,
}

/// Accept any move that does not lower the packing fraction.
#[inline]
pub fn greedy(previous: f64, new: f64) -> bool {
    new >= previous
}

/// Run `cfg.steps` proposals under `accept` and leave `state` at the densest
/// valid configuration seen.
pub fn run<R, F>(
    state: &mut PackedState<'_>,
    cfg: &SearchCfg,
    rng: &mut R,
    mut accept: F,
) -> Result<SearchReport, StateError>
where
    R: Rng + ?Sized,
    F: FnMut(f64, f64) -> bool,
{
    let initial_fraction = state.packing_fraction();
    let mut best_fraction = initial_fraction;
    let mut best_values = state.values();
    let (mut accepted, mut invalid, mut declined) = (0, 0, 0);
    let mut trace = Vec::new();

    for step in 1..=cfg.steps {
        match state.step(rng, &mut accept)? {
            StepOutcome::Accepted => {
                accepted += 1;
                let fraction = state.packing_fraction();
                if fraction > best_fraction {
                    best_fraction = fraction;
                    best_values = state.values();
                }
            }
            StepOutcome::Invalid => invalid += 1,
            StepOutcome::Declined => declined += 1,
        }
        if cfg.log_interval > 0 && step % cfg.log_interval == 0 {
            let fraction = state.packing_fraction();
            debug!(step, fraction, best_fraction, accepted, "search progress");
            trace.push(TracePoint {
                step,
                fraction,
                best_fraction,
                accepted,
            });
        }
    }

    state.load_values(&best_values)?;
    let report = SearchReport {
        group: state.group().label().to_string(),
        steps: cfg.steps,
        accepted,
        invalid,
        declined,
        initial_fraction,
        best_fraction,
        best_values,
        cell: state.cell_parameters(),
        chirality: state.chirality(),
        trace,
    };
    info!(
        group = %report.group,
        steps = report.steps,
        accepted,
        initial = initial_fraction,
        best = best_fraction,
        "search finished"
    );
    Ok(report)
}

/// Random start on `site_indices` followed by a greedy `run`.
pub fn fit<'a, R: Rng + ?Sized>(
    shape: &'a Shape,
    group: &'a WallpaperGroup,
    site_indices: &[usize],
    cfg: &SearchCfg,
    rng: &mut R,
) -> Result<(PackedState<'a>, SearchReport), StateError> {
    let mut state = PackedState::initialise(shape, group, site_indices, cfg, rng)?;
    let report = run(&mut state, cfg, rng, greedy)?;
    Ok((state, report))
}
