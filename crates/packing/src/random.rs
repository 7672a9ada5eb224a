//! Uniform random source for proposals.
//!
//! - `fluke()` draws from a per-thread `StdRng`, seeded from OS entropy on
//!   first use; `reseed` makes the stream reproducible.
//! - Search code takes an injected `Rng` instead, so independent runs own
//!   private generators and can be replayed from a seed.
//!
//! Every draw lies in the open interval `(0, 1)`.

use std::cell::RefCell;

use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

thread_local! {
    static FLUKE: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
}

/// Uniform sample from `(0, 1)` using the thread's generator.
pub fn fluke() -> f64 {
    FLUKE.with(|rng| open_unit(&mut *rng.borrow_mut()))
}

/// Restart the thread's generator from `seed`.
pub fn reseed(seed: u64) {
    FLUKE.with(|rng| *rng.borrow_mut() = StdRng::seed_from_u64(seed));
}

/// Uniform sample from `(0, 1)` using a caller-owned generator.
#[inline]
pub fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample(Open01)
}
