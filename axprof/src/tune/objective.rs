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
use crate::check::CheckReport;
use crate::check::InputMapper;
use crate::check::PropertyChecker;
use crate::common::derive_seed;
use crate::common::fresh_seed;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::trial::Runner;
use crate::trial::TrialConfig;
use crate::tune::Point;
use crate::tune::SearchEngine;

/// Objective floor for points that miss the specification.
///
/// Any satisfying point scores below it as long as its cost does.
pub const UNSATISFIED_PENALTY: f64 = 1e12;

const VERIFY_STREAM: u64 = 3;

/// Trial budgets of a tuning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuneConfig {
    /// Trials per proposed point.
    pub tune_run: usize,
    /// Trials used to re-check the best point.
    pub spec_run: usize,
    /// Fixed base seed; `None` draws one when the objective is created.
    pub base_seed: Option<u64>,
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            tune_run: 100,
            spec_run: 100,
            base_seed: None,
        }
    }
}

/// Outcome of evaluating one point.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub point: Point,
    pub probability: f64,
    /// Mean `time` of the trials (seconds, or the declared cost).
    pub cost: f64,
    pub satisfied: bool,
    /// The scalar handed back to the search engine.
    pub objective: f64,
}

/// Adapts a [`PropertyChecker`] into a scalar objective over integer points.
pub struct TuningObjective<'a, M, R, A, B> {
    checker: &'a PropertyChecker<M, R, A>,
    build: B,
    config: TuneConfig,
    base_seed: u64,
}

impl<'a, M, R, A, B> TuningObjective<'a, M, R, A, B> {
    /// `build` turns a point into a trial configuration; it should reject
    /// points that do not describe a valid configuration.
    pub fn new(checker: &'a PropertyChecker<M, R, A>, config: TuneConfig, build: B) -> Self {
        let base_seed = config.base_seed.unwrap_or_else(fresh_seed);
        Self {
            checker,
            build,
            config,
            base_seed,
        }
    }

    pub fn config(&self) -> &TuneConfig {
        &self.config
    }

    /// Runs `tune_run` trials at `point` and scores the result.
    ///
    /// Every point is checked on the same trial seeds, so differences between
    /// points come from the configuration rather than from the inputs.
    pub fn evaluate<C>(&self, point: &[i64]) -> Result<Evaluation, Error>
    where
        C: TrialConfig,
        M: InputMapper<C>,
        R: Runner<C>,
        A: AccuracyMetric<R::Acc>,
        B: Fn(&[i64]) -> Result<C, Error>,
    {
        let config = (self.build)(point)?;
        let report = self
            .checker
            .check_trials(&config, self.config.tune_run, self.base_seed)?;
        Ok(self.score(point, &report))
    }

    fn score(&self, point: &[i64], report: &CheckReport) -> Evaluation {
        let spec = self.checker.spec();
        let satisfied = report.passed;
        let objective = if satisfied {
            report.mean_time
        } else {
            UNSATISFIED_PENALTY * (1.0 + spec.shortfall(report.probability))
        };
        Evaluation {
            point: point.to_vec(),
            probability: report.probability,
            cost: report.mean_time,
            satisfied,
            objective,
        }
    }
}

/// Result of a tuning run.
#[derive(Debug, Clone)]
pub struct TuningOutcome<C> {
    /// The cheapest point that met the specification.
    pub point: Point,
    pub config: C,
    pub best: Evaluation,
    /// Re-check of the best point on `spec_run` fresh trials.
    pub verification: CheckReport,
    /// Every successful evaluation, in proposal order.
    pub evaluations: Vec<Evaluation>,
}

/// Drives `engine` until it stops proposing, then re-checks the best point.
///
/// Points whose configuration is rejected or whose trials fail are reported
/// to the engine with a penalty and skipped. Returns
/// [`ErrorKind::SpecificationUnsatisfiable`] if no point met the
/// specification.
pub fn tune<C, M, R, A, B, E>(
    objective: &TuningObjective<'_, M, R, A, B>,
    engine: &mut E,
) -> Result<TuningOutcome<C>, Error>
where
    C: TrialConfig,
    M: InputMapper<C>,
    R: Runner<C>,
    A: AccuracyMetric<R::Acc>,
    B: Fn(&[i64]) -> Result<C, Error>,
    E: SearchEngine,
{
    let mut evaluations: Vec<Evaluation> = vec![];
    let mut best: Option<usize> = None;
    let mut proposals = 0usize;

    while let Some(point) = engine.propose() {
        proposals += 1;
        match objective.evaluate::<C>(&point) {
            Ok(evaluation) => {
                tracing::debug!(
                    ?point,
                    probability = evaluation.probability,
                    cost = evaluation.cost,
                    satisfied = evaluation.satisfied,
                    "evaluated point"
                );
                engine.feedback(&point, evaluation.objective);
                let improves = best.is_none_or(|i| evaluation.objective < evaluations[i].objective);
                if evaluation.satisfied && improves {
                    best = Some(evaluations.len());
                }
                evaluations.push(evaluation);
            }
            Err(err) => {
                tracing::warn!(?point, %err, "point rejected");
                engine.feedback(&point, f64::INFINITY);
            }
        }
    }

    let Some(best) = best else {
        tracing::warn!(proposals, "no point met the specification");
        return Err(Error::new(
            ErrorKind::SpecificationUnsatisfiable,
            "no proposed configuration met the specification",
        )
        .with_context("proposals", proposals)
        .with_context("threshold", objective.checker.spec().threshold()));
    };

    let best = evaluations[best].clone();
    let config = (objective.build)(&best.point)?;
    let verify_seed = derive_seed(objective.base_seed, VERIFY_STREAM, 0);
    let verification =
        objective
            .checker
            .check_trials(&config, objective.config.spec_run, verify_seed)?;
    tracing::info!(
        point = ?best.point,
        cost = best.cost,
        probability = best.probability,
        verified = verification.passed,
        "tuning finished"
    );

    Ok(TuningOutcome {
        point: best.point.clone(),
        config,
        best,
        verification,
        evaluations,
    })
}
