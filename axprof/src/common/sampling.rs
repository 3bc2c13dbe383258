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

use rand::Rng;

use crate::error::Error;
use crate::error::ErrorKind;

/// Draws `k` distinct indices from `0..population` without replacement, in
/// random order.
///
/// Returns [`ErrorKind::SamplingExhausted`] if `k > population`; callers that
/// want the clamping policy should pass `k.min(population)`.
pub fn sample_indices<R: Rng + ?Sized>(
    population: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>, Error> {
    if k > population {
        return Err(Error::new(
            ErrorKind::SamplingExhausted,
            "sample size exceeds population",
        )
        .with_context("sample_size", k)
        .with_context("population", population));
    }
    Ok(rand::seq::index::sample(rng, population, k).into_vec())
}
