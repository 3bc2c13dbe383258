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

use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;

use crate::common::sample_indices;
use crate::error::Error;

/// Sampling parameters of a [`DistinctnessTester`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistinctnessConfig {
    eps: f64,
    c: f64,
}

impl DistinctnessConfig {
    /// Creates a configuration for duplicate density `eps` and sampling
    /// factor `c`; both must be positive and finite.
    pub fn new(eps: f64, c: f64) -> Result<Self, Error> {
        if !(eps > 0.0 && eps.is_finite()) {
            return Err(Error::invalid_config("eps must be a positive finite number")
                .with_context("eps", eps));
        }
        if !(c > 0.0 && c.is_finite()) {
            return Err(Error::invalid_config("c must be a positive finite number")
                .with_context("c", c));
        }
        Ok(Self { eps, c })
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn c(&self) -> f64 {
        self.c
    }
}

/// What one run of the tester looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleScan {
    /// Whether a sampled value repeated.
    pub duplicate_found: bool,
    /// Number of positions drawn, after clamping to the sequence length.
    pub sample_size: usize,
    /// Number of sampled positions scanned before stopping.
    pub inspected: usize,
}

impl SampleScan {
    /// The verdict as a score: `1.0` if a duplicate was found, else `0.0`.
    pub fn verdict(&self) -> f64 {
        if self.duplicate_found { 1.0 } else { 0.0 }
    }
}

/// Approximate tester for sequences that are far from distinct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistinctnessTester {
    config: DistinctnessConfig,
}

impl DistinctnessTester {
    pub fn new(eps: f64, c: f64) -> Result<Self, Error> {
        Ok(Self::from_config(DistinctnessConfig::new(eps, c)?))
    }

    pub fn from_config(config: DistinctnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> DistinctnessConfig {
        self.config
    }

    /// Returns the unclamped sample size `ceil(c * sqrt(n) / eps)`.
    pub fn requested_sample_size(&self, n: usize) -> usize {
        let size = (self.config.c * (n as f64).sqrt() / self.config.eps).ceil();
        size as usize
    }

    /// Returns the sample size for a sequence of length `n`, clamped to `n`.
    pub fn sample_size(&self, n: usize) -> usize {
        self.requested_sample_size(n).min(n)
    }

    /// Returns `1.0` if a duplicate shows up in the sample, else `0.0`.
    pub fn is_far_from_distinct<T, R>(&self, seq: &[T], rng: &mut R) -> Result<f64, Error>
    where
        T: Hash + Eq,
        R: Rng + ?Sized,
    {
        Ok(self.scan(seq, rng)?.verdict())
    }

    /// Samples without replacement and scans until the first repeated value.
    pub fn scan<T, R>(&self, seq: &[T], rng: &mut R) -> Result<SampleScan, Error>
    where
        T: Hash + Eq,
        R: Rng + ?Sized,
    {
        let n = seq.len();
        let requested = self.requested_sample_size(n);
        let sample_size = requested.min(n);
        if requested > n {
            tracing::debug!(requested, n, "sample size clamped to sequence length");
        }

        let mut seen = HashSet::with_capacity(sample_size);
        let mut inspected = 0;
        for index in sample_indices(n, sample_size, rng)? {
            inspected += 1;
            if !seen.insert(&seq[index]) {
                return Ok(SampleScan {
                    duplicate_found: true,
                    sample_size,
                    inspected,
                });
            }
        }
        Ok(SampleScan {
            duplicate_found: false,
            sample_size,
            inspected,
        })
    }
}
