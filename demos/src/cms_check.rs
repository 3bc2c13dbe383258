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

//! Checks analytically sized Count-Min sketches against their accuracy bound.

use axprof::accuracy::PerKeyErrorRate;
use axprof::check::CheckConfig;
use axprof::check::PropertyChecker;
use axprof::check::Specification;
use axprof::error::Error;
use axprof::trial::FrequencyRunner;
use axprof::trial::SketchTrial;
use tracing_subscriber::EnvFilter;

const SPEC: &str = "Input list of (int, int); Output map from int to int; TIME add, get; \
     ACC Probability over inputs[i] (abs(output[i] - count(inputs[i])) <= eps * len(inputs)) >= 1 - delta";

/// Failure probabilities of the sweep; each is checked at `>= 1 - delta`.
const DELTAS: [f64; 2] = [0.1, 0.2];

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Count-Min accuracy check ===\n");

    let skew = 1.1;
    for n in [1_000, 500] {
        for eps in [0.1, 0.05] {
            for delta in DELTAS {
                let trial = SketchTrial::analytic(n, eps, delta, skew)?;
                let spec = Specification::at_least(SPEC, 1.0 - delta)?;
                let checker = PropertyChecker::new(
                    spec,
                    |t: &SketchTrial, _: usize| t.zipf_input(),
                    FrequencyRunner::default(),
                    PerKeyErrorRate,
                )
                .with_config(CheckConfig::default().with_trials(100));

                let report = checker.check(&trial)?;
                println!(
                    "{:<48} P = {:.4} {} {:.2} +/- {:.4}  {}",
                    report.label,
                    report.probability,
                    report.comparison,
                    report.threshold,
                    report.confidence_radius(0.05),
                    if report.passed { "ok" } else { "FAILED" }
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_are_failure_probabilities() {
        for delta in DELTAS {
            let trial = SketchTrial::analytic(1_000, 0.1, delta, 1.1).unwrap();
            assert!(trial.sketch().num_hashes() >= 2, "delta = {delta}");
            assert!(1.0 - delta >= 0.8, "delta = {delta}");
        }
    }
}
