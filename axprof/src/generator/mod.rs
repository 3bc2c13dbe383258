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

//! Seeded input generators.
//!
//! A generator turns `(length, distribution, seed)` into a [`Sequence`]. The
//! same triple always yields the same sequence; passing no seed draws one
//! from entropy.
//!
//! ```rust
//! use axprof::generator::GeneratorParams;
//! use axprof::generator::generate;
//!
//! let params = GeneratorParams::uniform(1_000, 0, 999);
//! let a = generate(&params, Some(7)).unwrap();
//! let b = generate(&params, Some(7)).unwrap();
//! assert_eq!(a, b);
//! assert!(a.iter().all(|v| (0..=999).contains(v)));
//! ```

mod distinct;
mod uniform;
mod zipf;

use rand::Rng;

use crate::common::rng_from_seed;
use crate::error::Error;

/// An input sequence for one trial.
pub type Sequence = Vec<i64>;

/// Shape of a generated sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    /// Independent draws from `[min, max]`, with replacement.
    Uniform { min: i64, max: i64 },
    /// Draws from a discrete power law on `{1, ..., support}` with exponent
    /// `skew > 1`.
    Zipf { skew: f64, support: u64 },
    /// Pairwise-distinct values drawn without replacement from `[0, 2 * length)`.
    Distinct,
    /// A distinct sequence with positions overwritten until at least
    /// `ceil(eps * length)` elements repeat an earlier value.
    ForcedDuplicates { eps: f64 },
}

/// Arguments of one generator call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorParams {
    pub length: usize,
    pub distribution: Distribution,
}

impl GeneratorParams {
    pub fn uniform(length: usize, min: i64, max: i64) -> Self {
        Self {
            length,
            distribution: Distribution::Uniform { min, max },
        }
    }

    /// Zipf draws over `{1, ..., length}`.
    pub fn zipf(length: usize, skew: f64) -> Self {
        Self::zipf_with_support(length, skew, length as u64)
    }

    pub fn zipf_with_support(length: usize, skew: f64, support: u64) -> Self {
        Self {
            length,
            distribution: Distribution::Zipf { skew, support },
        }
    }

    pub fn distinct(length: usize) -> Self {
        Self {
            length,
            distribution: Distribution::Distinct,
        }
    }

    pub fn forced_duplicates(length: usize, eps: f64) -> Self {
        Self {
            length,
            distribution: Distribution::ForcedDuplicates { eps },
        }
    }
}

/// Generates a sequence, seeding a fresh random source from `seed`.
pub fn generate(params: &GeneratorParams, seed: Option<u64>) -> Result<Sequence, Error> {
    let mut rng = rng_from_seed(seed);
    generate_with(params, &mut rng)
}

/// Generates a sequence from a caller-owned random source.
pub fn generate_with<R: Rng + ?Sized>(
    params: &GeneratorParams,
    rng: &mut R,
) -> Result<Sequence, Error> {
    let length = params.length;
    if length == 0 {
        return Err(Error::invalid_parameter("length must be positive").with_context("length", 0));
    }
    match params.distribution {
        Distribution::Uniform { min, max } => uniform::generate(length, min, max, rng),
        Distribution::Zipf { skew, support } => zipf::generate(length, skew, support, rng),
        Distribution::Distinct => distinct::generate_distinct(length, rng),
        Distribution::ForcedDuplicates { eps } => {
            distinct::generate_forced_duplicates(length, eps, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_zero_length_is_invalid() {
        for params in [
            GeneratorParams::uniform(0, 0, 10),
            GeneratorParams::zipf(0, 1.5),
            GeneratorParams::distinct(0),
            GeneratorParams::forced_duplicates(0, 0.1),
        ] {
            let err = generate(&params, Some(1)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        }
    }

    #[test]
    fn test_every_distribution_is_reproducible() {
        for params in [
            GeneratorParams::uniform(500, -5, 5),
            GeneratorParams::zipf(500, 1.1),
            GeneratorParams::distinct(500),
            GeneratorParams::forced_duplicates(500, 0.2),
        ] {
            let a = generate(&params, Some(99)).unwrap();
            let b = generate(&params, Some(99)).unwrap();
            assert_eq!(a, b, "{params:?}");
            assert_eq!(a.len(), 500);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let params = GeneratorParams::uniform(100, 0, 1_000_000);
        let a = generate(&params, Some(1)).unwrap();
        let b = generate(&params, Some(2)).unwrap();
        assert_ne!(a, b);
    }
}
