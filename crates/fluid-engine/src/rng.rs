//! Deterministic random stream for Phases C/E (spec.md §9 "Random number
//! stream"): a single seeded source, queried only from the sequential
//! phases, so output is reproducible regardless of worker thread count.

use fluid_numeric::Numeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const FIXED_SEED: u64 = 1337;

pub struct DeterministicRng {
    inner: StdRng,
    draws: u64,
}

impl DeterministicRng {
    pub fn new() -> Self {
        Self {
            inner: StdRng::seed_from_u64(FIXED_SEED),
            draws: 0,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Rebuild the stream `seed` started at and fast-forward it past the
    /// first `draws` values, so the next draw continues exactly where a
    /// prior run (that had consumed `draws` values from this same seed)
    /// left off. Used to resume the random stream across a checkpoint
    /// save/restore (spec.md §8 testable property 5).
    pub fn resume(seed: u64, draws: u64) -> Self {
        let mut rng = Self::from_seed(seed);
        for _ in 0..draws {
            let _: f64 = rng.inner.gen_range(0.0..1.0);
        }
        rng.draws = draws;
        rng
    }

    /// Number of values drawn from this stream so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Draw `u` uniformly from `[0, 1)`, widened to whatever numeric type
    /// the caller's velocity field uses.
    ///
    /// Only correct for statically-typed `T` (`f32`/`f64`/`Fixed<N,K,_>`).
    /// For a runtime-tagged `fluid_numeric::Num`, `T::from_f64` always
    /// builds a `Num::Double` regardless of the caller's configured kind
    /// — use [`DeterministicRng::uniform01_like`] instead wherever `T`
    /// might be `Num`.
    pub fn uniform01<T: Numeric>(&mut self) -> T {
        let u: f64 = self.inner.gen_range(0.0..1.0);
        self.draws += 1;
        T::from_f64(u)
    }

    /// Same draw as [`DeterministicRng::uniform01`], but built relative to
    /// `template` via `from_f64_like` so a runtime-tagged `Num` keeps its
    /// caller-chosen kind instead of decaying to `Double`.
    pub fn uniform01_like<T: Numeric>(&mut self, template: &T) -> T {
        let u: f64 = self.inner.gen_range(0.0..1.0);
        self.draws += 1;
        template.from_f64_like(u)
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = DeterministicRng::new();
        let mut b = DeterministicRng::new();
        for _ in 0..20 {
            let x: f64 = a.uniform01();
            let y: f64 = b.uniform01();
            assert_eq!(x, y);
        }
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let mut rng = DeterministicRng::new();
        for _ in 0..1000 {
            let x: f64 = rng.uniform01();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn resume_continues_the_same_stream() {
        let mut full = DeterministicRng::new();
        let mut first_half = Vec::new();
        for _ in 0..10 {
            first_half.push(full.uniform01::<f64>());
        }
        let draws = full.draws();
        assert_eq!(draws, 10);

        let mut resumed = DeterministicRng::resume(FIXED_SEED, draws);
        for _ in 0..10 {
            let (a, b): (f64, f64) = (full.uniform01(), resumed.uniform01());
            assert_eq!(a, b);
        }
    }
}
