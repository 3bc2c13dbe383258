// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::hash::Hash;

use crate::common::derive_seed;
use crate::countmin::CountMinConfig;
use crate::error::Error;
use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::MurmurHash3X64128;

const ROW_SEED_STREAM: u64 = 0x636d;

/// Count-Min sketch over hashable items.
///
/// Row `r` always uses the same hash seed for a given sketch seed, whatever
/// the number of rows. A sketch with more rows therefore reads a superset of
/// the counters a shallower sketch reads, and its estimates are never larger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMinSketch {
    config: CountMinConfig,
    seed: u64,
    hash_seeds: Vec<u64>,
    counts: Vec<u64>,
}

impl CountMinSketch {
    /// Creates a sketch with `num_hashes` rows of `num_buckets` counters and
    /// the default seed.
    pub fn new(num_hashes: usize, num_buckets: usize) -> Result<Self, Error> {
        Self::with_seed(num_hashes, num_buckets, DEFAULT_UPDATE_SEED)
    }

    /// Creates a sketch with an explicit hash seed.
    pub fn with_seed(num_hashes: usize, num_buckets: usize, seed: u64) -> Result<Self, Error> {
        let config = CountMinConfig::new(num_hashes, num_buckets)?;
        Ok(Self::from_config(&config, seed))
    }

    /// Creates a sketch from validated dimensions.
    pub fn from_config(config: &CountMinConfig, seed: u64) -> Self {
        let num_hashes = config.num_hashes();
        let num_buckets = config.num_buckets();
        let hash_seeds = (0..num_hashes as u64)
            .map(|row| derive_seed(seed, ROW_SEED_STREAM, row))
            .collect();
        Self {
            config: *config,
            seed,
            hash_seeds,
            counts: vec![0; num_hashes * num_buckets],
        }
    }

    /// Suggests the number of buckets `m = ceil(e / eps)` for relative error `eps`.
    pub fn suggest_num_buckets(eps: f64) -> Result<usize, Error> {
        if !(eps > 0.0 && eps.is_finite()) {
            return Err(Error::invalid_parameter("eps must be a positive finite number")
                .with_context("eps", eps));
        }
        Ok((std::f64::consts::E / eps).ceil().max(1.0) as usize)
    }

    /// Suggests the number of rows `d = ceil(ln(1 / delta))` for failure
    /// probability `delta`.
    pub fn suggest_num_hashes(delta: f64) -> Result<usize, Error> {
        if !(delta > 0.0 && delta < 1.0) {
            return Err(Error::invalid_parameter("delta must be in (0, 1)")
                .with_context("delta", delta));
        }
        Ok((1.0 / delta).ln().ceil().max(1.0) as usize)
    }

    /// Returns the number of rows (`d`).
    pub fn num_hashes(&self) -> usize {
        self.config.num_hashes()
    }

    /// Returns the number of counters per row (`m`).
    pub fn num_buckets(&self) -> usize {
        self.config.num_buckets()
    }

    /// Returns the dimensions of this sketch.
    pub fn config(&self) -> CountMinConfig {
        self.config
    }

    /// Returns the hash seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of counters held, `m * d`.
    pub fn space(&self) -> u64 {
        self.counts.len() as u64
    }

    /// Adds one occurrence of `item`.
    #[doc(alias = "add")]
    pub fn update<T: Hash>(&mut self, item: T) {
        for row in 0..self.num_hashes() {
            let index = self.index(row, &item);
            self.counts[index] += 1;
        }
    }

    /// Returns the estimated frequency of `item`: the smallest of its `d`
    /// counters.
    pub fn estimate<T: Hash>(&self, item: T) -> u64 {
        (0..self.num_hashes())
            .map(|row| self.counts[self.index(row, &item)])
            .min()
            .unwrap_or(0)
    }

    fn index<T: Hash>(&self, row: usize, item: &T) -> usize {
        let mut hasher = MurmurHash3X64128::with_seed(self.hash_seeds[row]);
        item.hash(&mut hasher);
        let (h1, _) = hasher.finish128();
        let num_buckets = self.num_buckets();
        row * num_buckets + (h1 % num_buckets as u64) as usize
    }
}
