//! Seeded key streams shared by the benchmarks.

#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform random keys in `[0, universe)`.
    Uniform,
    /// `hot_prob` of accesses land on the first `hot_fraction` of keys.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
    /// Zipfian with exponent `s`; rank 1 maps to key 0.
    Zipfian { s: f64 },
}

impl Workload {
    pub fn label(self) -> &'static str {
        match self {
            Workload::Uniform => "uniform",
            Workload::Hotset { .. } => "hotset",
            Workload::Scan => "scan",
            Workload::Zipfian { .. } => "zipfian",
        }
    }
}

/// Pre-generates `len` keys so that RNG cost stays out of the measured loop.
pub fn keys(workload: Workload, universe: u64, len: usize, seed: u64) -> Vec<u64> {
    let universe = universe.max(1);
    let mut rng = SmallRng::seed_from_u64(seed);
    match workload {
        Workload::Uniform => (0..len).map(|_| rng.random_range(0..universe)).collect(),
        Workload::Hotset {
            hot_fraction,
            hot_prob,
        } => {
            let hot = ((universe as f64 * hot_fraction.clamp(0.0, 1.0)) as u64).clamp(1, universe);
            (0..len)
                .map(|_| {
                    if rng.random_bool(hot_prob.clamp(0.0, 1.0)) || hot == universe {
                        rng.random_range(0..hot)
                    } else {
                        rng.random_range(hot..universe)
                    }
                })
                .collect()
        },
        Workload::Scan => (0..len as u64).map(|i| i % universe).collect(),
        Workload::Zipfian { s } => {
            let zipf = Zipf::new(universe as f64, s).expect("valid zipf parameters");
            (0..len)
                .map(|_| {
                    let rank: f64 = zipf.sample(&mut rng);
                    (rank as u64).saturating_sub(1).min(universe - 1)
                })
                .collect()
        },
    }
}

pub const WORKLOADS: [Workload; 4] = [
    Workload::Uniform,
    Workload::Hotset {
        hot_fraction: 0.1,
        hot_prob: 0.9,
    },
    Workload::Scan,
    Workload::Zipfian { s: 1.0 },
];
