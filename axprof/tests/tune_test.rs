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

use std::fs;

use axprof::accuracy::PerKeyErrorRate;
use axprof::check::PropertyChecker;
use axprof::check::Specification;
use axprof::error::Error;
use axprof::error::ErrorKind;
use axprof::generator::GeneratorParams;
use axprof::trial::CostModel;
use axprof::trial::FrequencyRunner;
use axprof::trial::SketchTrial;
use axprof::tune::GridSearch;
use axprof::tune::IntegerParameter;
use axprof::tune::RandomSearch;
use axprof::tune::SearchSpace;
use axprof::tune::TuneConfig;
use axprof::tune::TuningObjective;
use axprof::tune::TuningOutcome;
use axprof::tune::TuningRecord;
use axprof::tune::UNSATISFIED_PENALTY;
use axprof::tune::tune;
use googletest::assert_that;
use googletest::prelude::ge;
use googletest::prelude::le;

const N: usize = 2_000;
const EPS: f64 = 0.05;
const DELTA: f64 = 0.1;
const SKEW: f64 = 1.1;

fn zipf_input(trial: &SketchTrial, _index: usize) -> GeneratorParams {
    trial.zipf_input()
}

fn build(point: &[i64]) -> Result<SketchTrial, Error> {
    SketchTrial::tuned(N, EPS, DELTA, SKEW, point[0] as usize, point[1] as usize)
}

fn space(m: (i64, i64), d: (i64, i64)) -> SearchSpace {
    SearchSpace::new(vec![
        IntegerParameter::new("m", m.0, m.1).unwrap(),
        IntegerParameter::new("d", d.0, d.1).unwrap(),
    ])
}

fn checker(
    threshold: f64,
) -> PropertyChecker<fn(&SketchTrial, usize) -> GeneratorParams, FrequencyRunner, PerKeyErrorRate> {
    let spec = Specification::at_least("frequency accuracy", threshold).unwrap();
    PropertyChecker::new(
        spec,
        zipf_input as fn(&SketchTrial, usize) -> GeneratorParams,
        FrequencyRunner::new(CostModel::Declared),
        PerKeyErrorRate,
    )
}

fn tune_config() -> TuneConfig {
    TuneConfig {
        tune_run: 3,
        spec_run: 5,
        base_seed: Some(17),
    }
}

#[test]
fn test_grid_finds_cheaper_than_analytic() {
    let checker = checker(1.0 - DELTA);
    let objective = TuningObjective::new(&checker, tune_config(), build);
    let mut grid = GridSearch::new(space((1, 50), (1, 3)));
    let outcome: TuningOutcome<SketchTrial> = tune(&objective, &mut grid).unwrap();

    assert_eq!(outcome.evaluations.len(), 150);
    assert!(outcome.best.satisfied);
    // The closed-form dimensions for this target are 55 x 3.
    assert_that!(outcome.best.cost, le(150.0));
    assert_eq!(outcome.point, outcome.best.point);
    assert_eq!(outcome.verification.trials, 5);

    let corner = &outcome.evaluations[0];
    assert_eq!(corner.point, vec![1, 1]);
    assert!(!corner.satisfied);
    assert_that!(corner.objective, ge(UNSATISFIED_PENALTY));

    // No satisfied point is cheaper than the one returned.
    for evaluation in outcome.evaluations.iter().filter(|e| e.satisfied) {
        assert_that!(evaluation.objective, ge(outcome.best.objective));
    }
}

#[test]
fn test_unsatisfiable_space() {
    let checker = checker(1.0 - DELTA);
    let objective = TuningObjective::new(&checker, tune_config(), build);
    let mut grid = GridSearch::new(space((1, 2), (1, 1)));
    let err = tune::<SketchTrial, _, _, _, _, _>(&objective, &mut grid).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SpecificationUnsatisfiable);
    assert_eq!(err.context("proposals"), Some("2"));
}

#[test]
fn test_trivial_threshold_picks_smallest_point() {
    let checker = checker(0.0);
    let objective = TuningObjective::new(&checker, tune_config(), build);
    let mut grid = GridSearch::new(space((1, 3), (1, 2)));
    let outcome: TuningOutcome<SketchTrial> = tune(&objective, &mut grid).unwrap();
    assert_eq!(outcome.point, vec![1, 1]);
    assert_eq!(outcome.best.cost, 1.0);
    assert!(outcome.verification.passed);
}

#[test]
fn test_rejected_points_are_skipped() {
    let checker = checker(0.0);
    let objective = TuningObjective::new(&checker, tune_config(), build);
    // d = 0 is not a valid sketch; those points are penalized, not fatal.
    let mut grid = GridSearch::new(space((1, 2), (0, 1)));
    let outcome: TuningOutcome<SketchTrial> = tune(&objective, &mut grid).unwrap();
    assert_eq!(outcome.evaluations.len(), 2);
    assert!(outcome.evaluations.iter().all(|e| e.point[1] == 1));
}

#[test]
fn test_random_search_stays_in_budget() {
    let checker = checker(0.0);
    let objective = TuningObjective::new(&checker, tune_config(), build);
    let space = space((1, 20), (1, 4));
    let mut search = RandomSearch::new(space.clone(), 12, Some(5));
    let outcome: TuningOutcome<SketchTrial> = tune(&objective, &mut search).unwrap();
    assert_eq!(outcome.evaluations.len(), 12);
    assert!(outcome.evaluations.iter().all(|e| space.contains(&e.point)));
}

#[test]
fn test_record_round_trips_through_directory() {
    let checker = checker(0.0);
    let config = tune_config();
    let objective = TuningObjective::new(&checker, config, build);
    let space = space((1, 3), (1, 2));
    let mut grid = GridSearch::new(space.clone());
    let outcome = tune(&objective, &mut grid).unwrap();

    let record = TuningRecord::from_outcome(&outcome, &space, &config, "grid search").unwrap();
    assert_eq!(record.m_range, (1, 3));
    assert_eq!(record.d_range, (1, 2));
    assert_eq!((record.opt_m, record.opt_d), (1, 1));
    assert_eq!(record.space(), 1);
    assert_eq!(
        record.file_stem(),
        "dp-n-2000-eps-0.05-delta-0.1-zipf-1.1-grid_search"
    );

    let dir = tempfile::tempdir().unwrap();
    let first = record.save(dir.path()).unwrap();
    let second = record.save(dir.path()).unwrap();
    assert_ne!(first, second);
    assert!(second.to_string_lossy().ends_with("grid_search-1.json"));
    assert_eq!(TuningRecord::load(&first).unwrap(), record);

    let nested = TuningRecord {
        label: "random".to_string(),
        ..record.clone()
    };
    nested.save(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let loaded = TuningRecord::load_dir(dir.path()).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.iter().filter(|r| **r == record).count(), 2);
    assert!(loaded.contains(&nested));
}

#[test]
fn test_malformed_record_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    let err = TuningRecord::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert!(std::error::Error::source(&err).is_some());
}
