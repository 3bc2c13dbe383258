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

use std::time::Instant;

use rand::Rng;

use crate::accuracy::AccuracyParams;
use crate::distinct::DistinctnessConfig;
use crate::distinct::DistinctnessTester;
use crate::error::Error;
use crate::generator::GeneratorParams;
use crate::trial::CostModel;
use crate::trial::Measurement;
use crate::trial::Runner;
use crate::trial::TrialConfig;

/// One point of a distinctness experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct DistinctTrial {
    n: usize,
    tester: DistinctnessConfig,
}

impl DistinctTrial {
    pub fn new(n: usize, eps: f64, c: f64) -> Result<Self, Error> {
        if n == 0 {
            return Err(Error::invalid_config("n must be positive").with_context("n", n));
        }
        Ok(Self {
            n,
            tester: DistinctnessConfig::new(eps, c)?,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn eps(&self) -> f64 {
        self.tester.eps()
    }

    pub fn c(&self) -> f64 {
        self.tester.c()
    }

    pub fn tester(&self) -> DistinctnessConfig {
        self.tester
    }

    /// `n` pairwise-distinct values: the tester must always answer `0.0`.
    pub fn positive_input(&self) -> GeneratorParams {
        GeneratorParams::distinct(self.n)
    }

    /// `n` values of which at least `eps * n` are duplicates.
    pub fn negative_input(&self) -> GeneratorParams {
        GeneratorParams::forced_duplicates(self.n, self.eps().min(1.0))
    }
}

impl TrialConfig for DistinctTrial {
    fn accuracy_params(&self) -> AccuracyParams {
        AccuracyParams {
            n: self.n,
            eps: self.eps(),
            delta: None,
        }
    }

    fn label(&self) -> String {
        format!("n={} eps={} c={}", self.n, self.eps(), self.c())
    }
}

/// Runs a [`DistinctnessTester`] once; the measurement is the verdict and the
/// space is the clamped sample size.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistinctRunner {
    cost: CostModel,
}

impl DistinctRunner {
    pub fn new(cost: CostModel) -> Self {
        Self { cost }
    }
}

impl Runner<DistinctTrial> for DistinctRunner {
    type Acc = f64;

    fn run<R: Rng + ?Sized>(
        &self,
        input: &[i64],
        config: &DistinctTrial,
        rng: &mut R,
    ) -> Result<Measurement<f64>, Error> {
        let tester = DistinctnessTester::from_config(config.tester);

        let start = Instant::now();
        let scan = tester.scan(input, rng)?;
        let elapsed = start.elapsed();

        let space = scan.sample_size as u64;
        Ok(Measurement {
            acc: scan.verdict(),
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
    fn test_verdict_and_space() {
        let trial = DistinctTrial::new(10_000, 0.1, 1.0).unwrap();
        let runner = DistinctRunner::new(CostModel::Declared);
        let input: Vec<i64> = (0..10_000).collect();
        let mut rng = seeded_rng(4);
        let m = runner.run(&input, &trial, &mut rng).unwrap();
        assert_eq!(m.acc, 0.0);
        assert_eq!(m.space, 1_000);
        assert_eq!(m.time, 1_000.0);
    }

    #[test]
    fn test_malformed_configuration() {
        assert_eq!(
            DistinctTrial::new(0, 0.1, 1.0).unwrap_err().kind(),
            ErrorKind::InvalidConfiguration
        );
        assert_eq!(
            DistinctTrial::new(10, 0.1, -1.0).unwrap_err().kind(),
            ErrorKind::InvalidConfiguration
        );
    }
}
