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

//! Trial runners: one generated input, one algorithm run, one measurement.
//!
//! A [`Runner`] builds the algorithm under test from a typed trial
//! configuration, times only the algorithmic work, and returns a
//! [`Measurement`] whose `acc` field is shaped for an
//! [`AccuracyMetric`](crate::accuracy::AccuracyMetric).

mod distinct;
mod frequency;

use std::time::Duration;

use rand::Rng;

pub use self::distinct::DistinctRunner;
pub use self::distinct::DistinctTrial;
pub use self::frequency::ErrorMap;
pub use self::frequency::FrequencyRunner;
pub use self::frequency::SketchTrial;

use crate::accuracy::AccuracyParams;
use crate::error::Error;

/// Raw result of one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<A> {
    /// Algorithm-specific output: an error map or a verdict.
    pub acc: A,
    /// Elapsed seconds or a deterministic cost proxy, see [`CostModel`].
    pub time: f64,
    /// Resource usage derived from the configuration.
    pub space: u64,
}

/// How a runner reports the `time` of a measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CostModel {
    /// Seconds of monotonic wall-clock time spent in the algorithm.
    #[default]
    WallClock,
    /// The declared space of the configuration (`m * d`, or the sample
    /// size). Deterministic, for searches where timer noise would swamp the
    /// differences between candidates.
    Declared,
}

impl CostModel {
    pub(crate) fn cost(self, elapsed: Duration, space: u64) -> f64 {
        match self {
            CostModel::WallClock => elapsed.as_secs_f64(),
            CostModel::Declared => space as f64,
        }
    }
}

/// A typed trial configuration.
pub trait TrialConfig {
    /// The declared parameters the accuracy metric may read.
    fn accuracy_params(&self) -> AccuracyParams;

    /// A short human-readable name, used in logs and reports.
    fn label(&self) -> String;
}

/// Runs an algorithm under test on one input.
pub trait Runner<C> {
    /// The `acc` payload of the measurement.
    type Acc;

    /// Runs one trial. `rng` supplies the algorithm's own randomness (hash
    /// seeds, sample positions) and is never shared with another trial.
    fn run<R: Rng + ?Sized>(
        &self,
        input: &[i64],
        config: &C,
        rng: &mut R,
    ) -> Result<Measurement<Self::Acc>, Error>;
}
