/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Access-cost experiment.
//!
//! Builds trees of random distinct keys, then replays a workload where a
//! fraction `C` of the accesses target one key that is not in the tree, and
//! measures how long the search path to that key is on average. Only the
//! public tree API is used.

use std::collections::HashSet;
use std::io;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{Result, SplayTree};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of keys in the tree, one experiment per entry.
    pub sizes: Vec<usize>,
    /// The access count of an experiment is `a * n`, with `a` drawn from
    /// this inclusive range.
    pub min_accesses_per_key: usize,
    pub max_accesses_per_key: usize,
    /// Share of the accesses that go to the missing key. Drawn from
    /// `[0, 1)` once per run when unset.
    pub miss_fraction: Option<f64>,
    /// Seeds the generator. Unset means seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            sizes: (20..50).map(|i| 100 * i).collect(),
            min_accesses_per_key: 100,
            max_accesses_per_key: 110,
            miss_fraction: None,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub n: usize,
    /// Average `number_of_nodes` of the missing key over its accesses.
    pub mean_cost: f64,
}

/// `n` distinct keys drawn uniformly from `1..10n`.
pub fn distinct_keys<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<u64> {
    if n == 0 {
        return Vec::new();
    }
    index::sample(rng, 10 * n - 1, n)
        .into_iter()
        .map(|i| i as u64 + 1)
        .collect()
}

/// Smallest key in `1..10n` that is not in `keys`.
pub fn first_missing_key(keys: &[u64], n: usize) -> Option<u64> {
    let present: HashSet<u64> = keys.iter().copied().collect();
    (1..10 * n as u64).find(|key| !present.contains(key))
}

pub fn run_experiment<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    accesses_per_key: usize,
    miss_fraction: f64,
) -> Result<Sample> {
    let keys = distinct_keys(rng, n);
    let mut tree = SplayTree::new();
    for &key in &keys {
        tree.insert(key)?;
    }
    let missing = match first_missing_key(&keys, n) {
        Some(missing) => missing,
        None => return Ok(Sample { n, mean_cost: 0.0 }),
    };

    let m = (accesses_per_key * n) as f64;
    let hits = ((1.0 - miss_fraction) * m) as usize;
    let misses = (miss_fraction * m) as usize;
    debug!(
        "n = {}, accesses = {}, misses = {}, missing key = {}",
        n,
        hits + misses,
        misses,
        missing
    );

    let mut accesses: Vec<u64> = Vec::with_capacity(hits + misses);
    accesses.extend((0..hits).filter_map(|_| keys.choose(rng).copied()));
    accesses.extend(std::iter::repeat(missing).take(misses));
    accesses.shuffle(rng);

    tree.search(&missing);
    let mut steps = 0;
    for key in &accesses {
        if *key == missing {
            steps += tree.number_of_nodes(key);
        }
        tree.search(key);
    }

    let mean_cost = if misses == 0 {
        0.0
    } else {
        steps as f64 / misses as f64
    };
    info!("n = {}: mean cost {:.3}", n, mean_cost);
    Ok(Sample { n, mean_cost })
}

pub fn run(config: &WorkloadConfig) -> Result<Vec<Sample>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let miss_fraction = match config.miss_fraction {
        Some(c) => c,
        None => rng.gen(),
    };
    let lo = config.min_accesses_per_key;
    let hi = config.max_accesses_per_key.max(lo);
    debug!("miss fraction {}", miss_fraction);

    let mut samples = Vec::with_capacity(config.sizes.len());
    for &n in &config.sizes {
        let a = rng.gen_range(lo..=hi);
        samples.push(run_experiment(&mut rng, n, a, miss_fraction)?);
    }
    Ok(samples)
}

/// One `n,mean_cost` line per sample.
pub fn write_results<W: io::Write>(mut w: W, samples: &[Sample]) -> io::Result<()> {
    for sample in samples {
        writeln!(w, "{},{}", sample.n, sample.mean_cost)?;
    }
    w.flush()
}
