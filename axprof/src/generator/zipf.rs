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
use rand_distr::Distribution;
use rand_distr::Zipf;

use crate::error::Error;
use crate::generator::Sequence;

/// Draws from `P(k) ∝ k^-skew` on `{1, ..., support}`.
///
/// The support is bounded, so the sampler stays fast for any `skew > 1`,
/// including values arbitrarily close to 1.
pub(super) fn generate<R: Rng + ?Sized>(
    length: usize,
    skew: f64,
    support: u64,
    rng: &mut R,
) -> Result<Sequence, Error> {
    if !(skew > 1.0 && skew.is_finite()) {
        return Err(Error::invalid_parameter("zipf skew must be a finite number above 1")
            .with_context("skew", skew));
    }
    if support == 0 || support > i64::MAX as u64 {
        return Err(Error::invalid_parameter("zipf support must be in [1, i64::MAX]")
            .with_context("support", support));
    }

    let zipf = Zipf::new(support, skew).map_err(|err| {
        Error::invalid_parameter("invalid zipf parameters")
            .with_context("skew", skew)
            .with_context("support", support)
            .set_source(anyhow::anyhow!("{err}"))
    })?;
    Ok((0..length).map(|_| zipf.sample(rng) as i64).collect())
}
