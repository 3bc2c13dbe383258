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

//! Searches for the smallest Count-Min sketch that still meets its accuracy
//! bound, saves the result, and compares it with the analytic dimensions.
//!
//! ```text
//! cargo x demo cms_tune --search random --budget 80
//! ```

use axprof::accuracy::ErrorSummary;
use axprof::accuracy::PerKeyErrorRate;
use axprof::check::PropertyChecker;
use axprof::check::Specification;
use axprof::common::seeded_rng;
use axprof::error::Error;
use axprof::error::ErrorKind;
use axprof::generator::generate;
use axprof::trial::CostModel;
use axprof::trial::FrequencyRunner;
use axprof::trial::Runner;
use axprof::trial::SketchTrial;
use axprof::tune::GridSearch;
use axprof::tune::IntegerParameter;
use axprof::tune::RandomSearch;
use axprof::tune::SearchEngine;
use axprof::tune::SearchSpace;
use axprof::tune::TuneConfig;
use axprof::tune::TuningObjective;
use axprof::tune::TuningOutcome;
use axprof::tune::TuningRecord;
use axprof::tune::tune;
use clap::Parser;
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Tune Count-Min sketch dimensions against a per-key accuracy bound")]
struct Args {
    #[arg(long, value_enum, default_value_t = Search::Grid)]
    search: Search,
    /// Stream length.
    #[arg(long, default_value_t = 1_000)]
    n: usize,
    /// Relative error bound: estimates may overcount by at most `eps * n`.
    #[arg(long, default_value_t = 0.05)]
    eps: f64,
    /// Allowed failure probability of the bound.
    #[arg(long, default_value_t = 0.1)]
    delta: f64,
    /// Zipf skew of the input stream.
    #[arg(long, default_value_t = 1.1)]
    skew: f64,
    /// Points drawn by random search.
    #[arg(long, default_value_t = 60)]
    budget: usize,
    #[arg(long, default_value_t = 60)]
    max_buckets: i64,
    #[arg(long, default_value_t = 4)]
    max_hashes: i64,
    /// Trials per candidate point.
    #[arg(long, default_value_t = 20)]
    tune_run: usize,
    /// Trials when verifying the best point.
    #[arg(long, default_value_t = 100)]
    spec_run: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Directory for the tuning record.
    #[arg(long, default_value = "output")]
    output: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Search {
    Grid,
    Random,
}

impl Search {
    fn label(self) -> &'static str {
        match self {
            Search::Grid => "grid",
            Search::Random => "random",
        }
    }
}

fn build(args: &Args, point: &[i64]) -> Result<SketchTrial, Error> {
    let dim = |v: i64| {
        usize::try_from(v).map_err(|_| {
            Error::new(ErrorKind::InvalidConfiguration, "dimension must not be negative")
                .with_context("value", v)
        })
    };
    SketchTrial::tuned(
        args.n,
        args.eps,
        args.delta,
        args.skew,
        dim(point[0])?,
        dim(point[1])?,
    )
}

fn run<E: SearchEngine>(args: &Args, engine: &mut E) -> Result<TuningOutcome<SketchTrial>, Error> {
    let spec = Specification::at_least("frequency accuracy", 1.0 - args.delta)?;
    let checker = PropertyChecker::new(
        spec,
        |t: &SketchTrial, _: usize| t.zipf_input(),
        FrequencyRunner::new(CostModel::Declared),
        PerKeyErrorRate,
    );
    let objective = TuningObjective::new(&checker, tune_config(args), |point: &[i64]| {
        build(args, point)
    });
    tune(&objective, engine)
}

fn tune_config(args: &Args) -> TuneConfig {
    TuneConfig {
        tune_run: args.tune_run,
        spec_run: args.spec_run,
        base_seed: args.seed,
    }
}

fn summarize(args: &Args, trial: &SketchTrial, seed: u64) -> Result<ErrorSummary, Error> {
    let input = generate(&trial.zipf_input(), Some(seed))?;
    let measurement = FrequencyRunner::default().run(&input, trial, &mut seeded_rng(seed))?;
    Ok(ErrorSummary::from_errors(&measurement.acc, args.eps * args.n as f64))
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let space = SearchSpace::new(vec![
        IntegerParameter::new("m", 1, args.max_buckets)?,
        IntegerParameter::new("d", 1, args.max_hashes)?,
    ]);
    let outcome = match args.search {
        Search::Random => run(&args, &mut RandomSearch::new(space.clone(), args.budget, args.seed))?,
        Search::Grid => run(&args, &mut GridSearch::new(space.clone()))?,
    };
    let label = args.search.label();

    println!("=== Count-Min tuning ({label} search) ===\n");
    println!(
        "best m={} d={} space={} P = {:.4} (verified {:.4} over {} trials)",
        outcome.point[0],
        outcome.point[1],
        outcome.best.cost,
        outcome.best.probability,
        outcome.verification.probability,
        outcome.verification.trials,
    );

    let record = TuningRecord::from_outcome(&outcome, &space, &tune_config(&args), label)?;
    let path = record.save(&args.output)?;
    println!("saved {}\n", path.display());

    let analytic = SketchTrial::analytic(args.n, args.eps, args.delta, args.skew)?;
    for (name, trial) in [("analytic", &analytic), ("tuned", &outcome.config)] {
        let summary = summarize(&args, trial, 42)?;
        println!(
            "{name:<9} m={:<4} d={:<2} max error={:<4} mean error={:<8.3} over bound={}/{}",
            trial.sketch().num_buckets(),
            trial.sketch().num_hashes(),
            summary.max,
            summary.mean,
            summary.over_bound,
            summary.keys,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let args = Args::try_parse_from(["cms_tune"]).unwrap();
        assert!(matches!(args.search, Search::Grid));
        assert_eq!(args.n, 1_000);
        assert_eq!(args.delta, 0.1);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_random_search_arguments() {
        let args = Args::try_parse_from([
            "cms_tune", "--search", "random", "--n", "500", "--eps", "0.1", "--delta", "0.2",
            "--budget", "12", "--seed", "7",
        ])
        .unwrap();
        assert!(matches!(args.search, Search::Random));
        assert_eq!(args.search.label(), "random");
        assert_eq!((args.n, args.eps, args.delta, args.budget), (500, 0.1, 0.2, 12));
        assert_eq!(args.seed, Some(7));

        let trial = build(&args, &[40, 2]).unwrap();
        assert_eq!(trial.sketch().num_buckets(), 40);
        assert!(build(&args, &[-1, 2]).is_err());
    }

    #[test]
    fn test_unknown_search_is_rejected() {
        assert!(Args::try_parse_from(["cms_tune", "--search", "annealing"]).is_err());
    }
}
