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

use std::collections::HashMap;

use rand::Rng;

use crate::common::sample_indices;
use crate::error::Error;
use crate::generator::Sequence;

/// `length` distinct values from `[0, 2 * length)`, in random order.
pub(super) fn generate_distinct<R: Rng + ?Sized>(
    length: usize,
    rng: &mut R,
) -> Result<Sequence, Error> {
    let population = length.checked_mul(2).ok_or_else(|| {
        Error::invalid_parameter("length too large for a distinct sequence")
            .with_context("length", length)
    })?;
    let seq = sample_indices(population, length, rng)?
        .into_iter()
        .map(|v| v as i64)
        .collect();
    Ok(seq)
}

/// A distinct sequence where random positions are overwritten with the value
/// at another random position until `ceil(eps * length)` elements are
/// duplicates (capped at `length - 1`, the most a sequence can hold).
///
/// The overwritten position is always one still holding a unique value, so
/// every overwrite adds exactly one duplicate. A new duplicate group is only
/// started while fewer than `length - target` groups exist; past that the
/// source position is drawn from an existing group. Unique values therefore
/// never run out before the target is met, and the expected number of draws
/// is `O(length * ln(length))` even at `eps = 1`.
pub(super) fn generate_forced_duplicates<R: Rng + ?Sized>(
    length: usize,
    eps: f64,
    rng: &mut R,
) -> Result<Sequence, Error> {
    if !(eps > 0.0 && eps <= 1.0) {
        return Err(Error::invalid_parameter("eps must be in (0, 1]").with_context("eps", eps));
    }
    if length < 2 {
        return Err(Error::invalid_parameter("duplicates need at least two elements")
            .with_context("length", length));
    }

    let mut seq = generate_distinct(length, rng)?;
    let target = ((eps * length as f64).ceil() as usize).min(length - 1);
    let max_groups = length - target;

    let mut counts: HashMap<i64, usize> = seq.iter().map(|v| (*v, 1)).collect();
    let mut groups = 0usize;
    let mut draws = 0usize;
    for _ in 0..target {
        let i = loop {
            draws += 1;
            let i = rng.gen_range(0..length);
            if counts.get(&seq[i]) == Some(&1) {
                break i;
            }
        };
        let j = loop {
            draws += 1;
            let j = rng.gen_range(0..length);
            let grouped = counts.get(&seq[j]).is_some_and(|c| *c >= 2);
            if j != i && (grouped || groups < max_groups) {
                break j;
            }
        };

        let new = seq[j];
        counts.remove(&seq[i]);
        let count = counts.entry(new).or_insert(0);
        if *count == 1 {
            groups += 1;
        }
        *count += 1;
        seq[i] = new;
    }

    tracing::debug!(length, eps, target, groups, draws, "forced duplicates");
    Ok(seq)
}
