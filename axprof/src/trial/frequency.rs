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
use std::time::Instant;

use rand::Rng;
use rand::RngCore;

use crate::accuracy::AccuracyParams;
use crate::countmin::CountMinConfig;
use crate::countmin::CountMinSketch;
use crate::error::Error;
use crate::generator::GeneratorParams;
use crate::trial::CostModel;
use crate::trial::Measurement;
use crate::trial::Runner;
use crate::trial::TrialConfig;
use crate::truth::exact_counts;

/// Absolute estimation error per distinct input value.
pub type ErrorMap = HashMap<i64, u64>;

/// One point of a Count-Min experiment: the input shape (`n`, `skew`), the
/// accuracy target (`eps`, `delta`) and the sketch dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchTrial {
    n: usize,
    eps: f64,
    delta: f64,
    skew: f64,
    sketch: CountMinConfig,
}

impl SketchTrial {
    /// Uses the closed-form dimensions `m = ceil(e / eps)`, `d = ceil(ln(1 / delta))`.
    pub fn analytic(n: usize, eps: f64, delta: f64, skew: f64) -> Result<Self, Error> {
        validate_target(n, eps, delta)?;
        let sketch = CountMinConfig::analytic(eps, delta)?;
        Ok(Self {
            n,
            eps,
            delta,
            skew,
            sketch,
        })
    }

    /// Uses explicit dimensions, `m` buckets by `d` rows.
    pub fn tuned(
        n: usize,
        eps: f64,
        delta: f64,
        skew: f64,
        num_buckets: usize,
        num_hashes: usize,
    ) -> Result<Self, Error> {
        validate_target(n, eps, delta)?;
        Ok(Self {
            n,
            eps,
            delta,
            skew,
            sketch: CountMinConfig::new(num_hashes, num_buckets)?,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn skew(&self) -> f64 {
        self.skew
    }

    pub fn sketch(&self) -> CountMinConfig {
        self.sketch
    }

    /// `n` Zipf-distributed values with this trial's skew.
    pub fn zipf_input(&self) -> GeneratorParams {
        GeneratorParams::zipf(self.n, self.skew)
    }

    /// `n` values drawn uniformly from `[min, max]`.
    pub fn uniform_input(&self, min: i64, max: i64) -> GeneratorParams {
        GeneratorParams::uniform(self.n, min, max)
    }
}

fn validate_target(n: usize, eps: f64, delta: f64) -> Result<(), Error> {
    if n == 0 {
        return Err(Error::invalid_config("n must be positive").with_context("n", n));
    }
    if !(eps > 0.0 && eps.is_finite()) {
        return Err(Error::invalid_config("eps must be a positive finite number")
            .with_context("eps", eps));
    }
    if !(delta > 0.0 && delta < 1.0) {
        return Err(Error::invalid_config("delta must be in (0, 1)").with_context("delta", delta));
    }
    Ok(())
}

impl TrialConfig for SketchTrial {
    fn accuracy_params(&self) -> AccuracyParams {
        AccuracyParams {
            n: self.n,
            eps: self.eps,
            delta: Some(self.delta),
        }
    }

    fn label(&self) -> String {
        format!(
            "n={} eps={} delta={} skew={} m={} d={}",
            self.n,
            self.eps,
            self.delta,
            self.skew,
            self.sketch.num_buckets(),
            self.sketch.num_hashes()
        )
    }
}

/// Feeds every input value to a fresh [`CountMinSketch`], then queries each
/// distinct value once and records `|estimate - true count|`.
///
/// Only the ingestion loop is timed. The sketch seed is drawn from the
/// trial's random source, so repeated trials on one input see independent
/// hash functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyRunner {
    cost: CostModel,
}

impl FrequencyRunner {
    pub fn new(cost: CostModel) -> Self {
        Self { cost }
    }

    pub fn cost_model(&self) -> CostModel {
        self.cost
    }
}

impl Runner<SketchTrial> for FrequencyRunner {
    type Acc = ErrorMap;

    fn run<R: Rng + ?Sized>(
        &self,
        input: &[i64],
        config: &SketchTrial,
        rng: &mut R,
    ) -> Result<Measurement<ErrorMap>, Error> {
        let mut sketch = CountMinSketch::from_config(&config.sketch, rng.next_u64());

        let start = Instant::now();
        for value in input {
            sketch.update(*value);
        }
        let elapsed = start.elapsed();

        let errors = exact_counts(input)
            .into_iter()
            .map(|(value, count)| (value, sketch.estimate(value).abs_diff(count)))
            .collect();

        let space = sketch.space();
        Ok(Measurement {
            acc: errors,
            time: self.cost.cost(elapsed, space),
            space,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::seeded_rng;
    use crate::error::ErrorKind;

    #[test]
    fn test_analytic_dimensions() {
        let trial = SketchTrial::analytic(1_000, 0.1, 0.05, 1.1).unwrap();
        assert_eq!(trial.sketch().num_buckets(), 28);
        assert_eq!(trial.sketch().num_hashes(), 3);
    }

    #[test]
    fn test_malformed_configurations() {
        let cases = [
            SketchTrial::tuned(1_000, 0.1, 0.05, 1.1, 0, 3),
            SketchTrial::tuned(1_000, 0.1, 0.05, 1.1, 10, 0),
            SketchTrial::tuned(0, 0.1, 0.05, 1.1, 10, 3),
            SketchTrial::tuned(1_000, 0.0, 0.05, 1.1, 10, 3),
            SketchTrial::tuned(1_000, 0.1, 1.0, 1.1, 10, 3),
            SketchTrial::analytic(1_000, -1.0, 0.05, 1.1),
            SketchTrial::tuned(1_000, 0.1, 0.05, 1.1, 4, usize::MAX / 2),
        ];
        for case in cases {
            assert_eq!(case.unwrap_err().kind(), ErrorKind::InvalidConfiguration);
        }
    }

    #[test]
    fn test_error_map_covers_distinct_values() {
        let trial = SketchTrial::tuned(4, 0.1, 0.05, 1.1, 1_000, 5).unwrap();
        let runner = FrequencyRunner::new(CostModel::Declared);
        let mut rng = seeded_rng(1);
        let m = runner.run(&[1, 1, 2, 3], &trial, &mut rng).unwrap();
        assert_eq!(m.acc.len(), 3);
        assert_eq!(m.space, 5_000);
        assert_eq!(m.time, 5_000.0);
    }
}
