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

use crate::accuracy::AccuracyMetric;
use crate::check::Comparison;
use crate::check::Specification;
use crate::common::derive_seed;
use crate::common::fresh_seed;
use crate::common::seeded_rng;
use crate::error::Error;
use crate::generator::GeneratorParams;
use crate::generator::generate;
use crate::trial::Runner;
use crate::trial::TrialConfig;

const INPUT_STREAM: u64 = 1;
const ALGORITHM_STREAM: u64 = 2;

const DEFAULT_TRIALS: usize = 100;

/// Maps a trial configuration and trial index to generator arguments.
pub trait InputMapper<C> {
    fn input_params(&self, config: &C, trial_index: usize) -> GeneratorParams;
}

impl<C, F> InputMapper<C> for F
where
    F: Fn(&C, usize) -> GeneratorParams,
{
    fn input_params(&self, config: &C, trial_index: usize) -> GeneratorParams {
        self(config, trial_index)
    }
}

/// How many trials a check runs and where their seeds come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConfig {
    pub trials: usize,
    /// Fixed base seed for reproducible checks; `None` draws one per check.
    pub base_seed: Option<u64>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            base_seed: None,
        }
    }
}

impl CheckConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    pub(crate) fn resolve_seed(&self) -> u64 {
        self.base_seed.unwrap_or_else(fresh_seed)
    }
}

/// Result of a single trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub index: usize,
    pub score: f64,
    pub time: f64,
    pub space: u64,
}

/// Aggregate of all trials of one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub label: String,
    pub trials: usize,
    pub base_seed: u64,
    /// Mean score over trials: the empirical satisfaction probability.
    pub probability: f64,
    pub min_score: f64,
    pub mean_time: f64,
    pub max_space: u64,
    pub comparison: Comparison,
    pub threshold: f64,
    pub passed: bool,
}

impl CheckReport {
    /// Hoeffding half-width of the probability estimate at confidence
    /// `1 - alpha`: `sqrt(ln(2 / alpha) / (2 * trials))`.
    pub fn confidence_radius(&self, alpha: f64) -> f64 {
        ((2.0 / alpha).ln() / (2.0 * self.trials as f64)).sqrt()
    }
}

/// Runs trials of an algorithm and compares the mean score with a
/// specification's threshold.
#[derive(Debug, Clone)]
pub struct PropertyChecker<M, R, A> {
    spec: Specification,
    mapper: M,
    runner: R,
    metric: A,
    config: CheckConfig,
}

impl<M, R, A> PropertyChecker<M, R, A> {
    pub fn new(spec: Specification, mapper: M, runner: R, metric: A) -> Self {
        Self {
            spec,
            mapper,
            runner,
            metric,
            config: CheckConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CheckConfig) -> Self {
        self.config = config;
        self
    }

    pub fn spec(&self) -> &Specification {
        &self.spec
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Runs trial `index` of a check seeded with `base_seed`.
    ///
    /// The input is generated from its own seed and the algorithm gets a
    /// separate random source, both derived from `(base_seed, index)`.
    pub fn run_trial<C>(&self, config: &C, index: usize, base_seed: u64) -> Result<TrialOutcome, Error>
    where
        C: TrialConfig,
        M: InputMapper<C>,
        R: Runner<C>,
        A: AccuracyMetric<R::Acc>,
    {
        let params = self.mapper.input_params(config, index);
        let input_seed = derive_seed(base_seed, INPUT_STREAM, index as u64);
        let input = generate(&params, Some(input_seed))?;

        let mut rng = seeded_rng(derive_seed(base_seed, ALGORITHM_STREAM, index as u64));
        let measurement = self.runner.run(&input, config, &mut rng)?;
        let score = self
            .metric
            .score(&input, &measurement.acc, &config.accuracy_params());

        tracing::trace!(index, input_seed, score, time = measurement.time, "trial");
        Ok(TrialOutcome {
            index,
            score,
            time: measurement.time,
            space: measurement.space,
        })
    }

    /// Checks one configuration with the configured trial count.
    pub fn check<C>(&self, config: &C) -> Result<CheckReport, Error>
    where
        C: TrialConfig,
        M: InputMapper<C>,
        R: Runner<C>,
        A: AccuracyMetric<R::Acc>,
    {
        self.check_trials(config, self.config.trials, self.config.resolve_seed())
    }

    /// Checks one configuration with an explicit trial count and base seed.
    ///
    /// The first failing trial aborts the check; its error carries the trial
    /// index and the configuration label.
    pub fn check_trials<C>(&self, config: &C, trials: usize, base_seed: u64) -> Result<CheckReport, Error>
    where
        C: TrialConfig,
        M: InputMapper<C>,
        R: Runner<C>,
        A: AccuracyMetric<R::Acc>,
    {
        if trials == 0 {
            return Err(Error::invalid_config("trial count must be positive"));
        }

        let label = config.label();
        let mut total_score = 0.0;
        let mut min_score = f64::INFINITY;
        let mut total_time = 0.0;
        let mut max_space = 0;
        for index in 0..trials {
            let outcome = self.run_trial(config, index, base_seed).map_err(|err| {
                tracing::warn!(%label, index, %err, "trial failed");
                err.with_context("trial", index).with_context("config", &label)
            })?;
            total_score += outcome.score;
            min_score = min_score.min(outcome.score);
            total_time += outcome.time;
            max_space = max_space.max(outcome.space);
        }

        let probability = total_score / trials as f64;
        let passed = self.spec.is_satisfied_by(probability);
        tracing::info!(
            %label,
            trials,
            probability,
            threshold = self.spec.threshold(),
            passed,
            "property check"
        );
        Ok(CheckReport {
            label,
            trials,
            base_seed,
            probability,
            min_score,
            mean_time: total_time / trials as f64,
            max_space,
            comparison: self.spec.comparison(),
            threshold: self.spec.threshold(),
            passed,
        })
    }

    /// Checks every configuration of a space.
    ///
    /// Configurations share one base seed so they are compared on the same
    /// inputs; a failure in one does not stop the others.
    pub fn check_space<C>(&self, space: &[C]) -> Vec<Result<CheckReport, Error>>
    where
        C: TrialConfig,
        M: InputMapper<C>,
        R: Runner<C>,
        A: AccuracyMetric<R::Acc>,
    {
        let base_seed = self.config.resolve_seed();
        space
            .iter()
            .map(|config| self.check_trials(config, self.config.trials, base_seed))
            .collect()
    }
}
