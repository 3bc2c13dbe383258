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

//! Parameter search against a probabilistic specification.
//!
//! [`TuningObjective`] turns a proposed integer point (for example `[m, d]`)
//! into a trial configuration, runs a property check and reports a scalar to
//! minimize: the configuration's cost when the specification holds, a large
//! penalty growing with the shortfall when it does not. Any
//! [`SearchEngine`] can drive it; [`GridSearch`] and [`RandomSearch`] are
//! provided.
//!
//! ```rust,no_run
//! use axprof::accuracy::PerKeyErrorRate;
//! use axprof::check::PropertyChecker;
//! use axprof::check::Specification;
//! use axprof::trial::CostModel;
//! use axprof::trial::FrequencyRunner;
//! use axprof::trial::SketchTrial;
//! use axprof::tune::GridSearch;
//! use axprof::tune::IntegerParameter;
//! use axprof::tune::SearchSpace;
//! use axprof::tune::TuneConfig;
//! use axprof::tune::TuningObjective;
//! use axprof::tune::tune;
//!
//! let spec = Specification::at_least("ACC Probability over i in uniques(Input) ...", 0.95).unwrap();
//! let checker = PropertyChecker::new(
//!     spec,
//!     |trial: &SketchTrial, _: usize| trial.zipf_input(),
//!     FrequencyRunner::new(CostModel::Declared),
//!     PerKeyErrorRate,
//! );
//! let space = SearchSpace::new(vec![
//!     IntegerParameter::new("m", 1, 100).unwrap(),
//!     IntegerParameter::new("d", 1, 10).unwrap(),
//! ]);
//! let objective = TuningObjective::new(&checker, TuneConfig::default(), |point: &[i64]| {
//!     SketchTrial::tuned(10_000, 0.05, 0.05, 1.1, point[0] as usize, point[1] as usize)
//! });
//! let outcome = tune(&objective, &mut GridSearch::new(space)).unwrap();
//! println!("m = {}, d = {}", outcome.point[0], outcome.point[1]);
//! ```

mod objective;
mod record;
mod search;

pub use self::objective::Evaluation;
pub use self::objective::TuneConfig;
pub use self::objective::TuningObjective;
pub use self::objective::TuningOutcome;
pub use self::objective::UNSATISFIED_PENALTY;
pub use self::objective::tune;
pub use self::record::TuningRecord;
pub use self::search::GridSearch;
pub use self::search::IntegerParameter;
pub use self::search::Point;
pub use self::search::RandomSearch;
pub use self::search::SearchEngine;
pub use self::search::SearchSpace;
