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

//! Checks the sampling distinctness tester on distinct and far-from-distinct
//! inputs.

use axprof::accuracy::ExpectedVerdict;
use axprof::check::CheckConfig;
use axprof::check::Comparison;
use axprof::check::PropertyChecker;
use axprof::check::Specification;
use axprof::error::Error;
use axprof::trial::DistinctRunner;
use axprof::trial::DistinctTrial;
use tracing_subscriber::EnvFilter;

const POSITIVE: &str =
    "Input list of int; Output bool; TIME is_far_from_distinct; ACC Probability (output == false) == 1";
const NEGATIVE: &str =
    "Input list of int; Output bool; TIME is_far_from_distinct; ACC Probability (output == true) >= 0.75";

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = CheckConfig::default().with_trials(100);
    let positive = PropertyChecker::new(
        Specification::new(POSITIVE, Comparison::Equal, 1.0)?,
        |t: &DistinctTrial, _: usize| t.positive_input(),
        DistinctRunner::default(),
        ExpectedVerdict::distinct(),
    )
    .with_config(config);
    let negative = PropertyChecker::new(
        Specification::at_least(NEGATIVE, 0.75)?,
        |t: &DistinctTrial, _: usize| t.negative_input(),
        DistinctRunner::default(),
        ExpectedVerdict::far_from_distinct(),
    )
    .with_config(config);

    let mut space = vec![];
    for n in [1_000, 10_000] {
        for eps in [0.4, 0.3, 0.2, 0.1, 0.05] {
            space.push(DistinctTrial::new(n, eps, 1.0)?);
        }
    }

    for (name, reports) in [
        ("distinct inputs", positive.check_space(&space)),
        ("far-from-distinct inputs", negative.check_space(&space)),
    ] {
        println!("=== {name} ===");
        for (trial, report) in space.iter().zip(reports) {
            let report = report?;
            println!(
                "n={:<6} eps={:<5} sample={:<5} P = {:.2}  {}",
                trial.n(),
                trial.eps(),
                report.max_space,
                report.probability,
                if report.passed { "ok" } else { "FAILED" }
            );
        }
        println!();
    }
    Ok(())
}
