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

//! Reduction of a measurement to a score in `[0, 1]`.
//!
//! A metric sees only the input sequence, the measurement's `acc` payload and
//! the trial's declared parameters, so a score never depends on state left
//! over from another trial.

use std::collections::HashSet;

use crate::trial::ErrorMap;

/// Declared parameters of a trial that a metric may read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyParams {
    pub n: usize,
    pub eps: f64,
    pub delta: Option<f64>,
}

/// Turns one measurement into a score in `[0, 1]`.
pub trait AccuracyMetric<A> {
    fn score(&self, input: &[i64], acc: &A, params: &AccuracyParams) -> f64;
}

impl<A, F> AccuracyMetric<A> for F
where
    F: Fn(&[i64], &A, &AccuracyParams) -> f64,
{
    fn score(&self, input: &[i64], acc: &A, params: &AccuracyParams) -> f64 {
        self(input, acc, params)
    }
}

/// Fraction of distinct input values whose estimation error is at most
/// `eps * len(input)`.
///
/// Every distinct value counts once, however often it occurs: a singleton
/// and the heaviest hitter carry equal weight. This matches a specification
/// quantified over the unique values of the input rather than over its
/// elements. A value missing from the error map counts as bad.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerKeyErrorRate;

impl AccuracyMetric<ErrorMap> for PerKeyErrorRate {
    fn score(&self, input: &[i64], acc: &ErrorMap, params: &AccuracyParams) -> f64 {
        let bound = params.eps * input.len() as f64;
        let unique: HashSet<&i64> = input.iter().collect();
        if unique.is_empty() {
            return 1.0;
        }
        let bad = unique
            .iter()
            .filter(|value| acc.get(**value).is_none_or(|err| *err as f64 > bound))
            .count();
        1.0 - bad as f64 / unique.len() as f64
    }
}

/// Scores a binary verdict against the verdict a test suite expects:
/// `1.0` on a match, `0.0` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedVerdict {
    expected: f64,
}

impl ExpectedVerdict {
    /// Inputs are distinct; the tester must answer `0.0`.
    pub fn distinct() -> Self {
        Self { expected: 0.0 }
    }

    /// Inputs are far from distinct; the tester should answer `1.0`.
    pub fn far_from_distinct() -> Self {
        Self { expected: 1.0 }
    }

    pub fn expected(&self) -> f64 {
        self.expected
    }
}

impl AccuracyMetric<f64> for ExpectedVerdict {
    fn score(&self, _input: &[i64], acc: &f64, _params: &AccuracyParams) -> f64 {
        if (*acc - self.expected).abs() < 0.5 {
            1.0
        } else {
            0.0
        }
    }
}

/// Distribution of per-key errors of one sketch run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    /// Number of distinct keys.
    pub keys: usize,
    /// Largest error.
    pub max: u64,
    /// Mean error over keys.
    pub mean: f64,
    /// Keys whose error exceeds the bound.
    pub over_bound: usize,
}

impl ErrorSummary {
    /// Summarizes an error map against an absolute error bound.
    pub fn from_errors(errors: &ErrorMap, bound: f64) -> Self {
        let keys = errors.len();
        let max = errors.values().copied().max().unwrap_or(0);
        let total: u64 = errors.values().sum();
        let mean = if keys == 0 {
            0.0
        } else {
            total as f64 / keys as f64
        };
        let over_bound = errors.values().filter(|err| **err as f64 > bound).count();
        Self {
            keys,
            max,
            mean,
            over_bound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(eps: f64) -> AccuracyParams {
        AccuracyParams {
            n: 0,
            eps,
            delta: None,
        }
    }

    #[test]
    fn test_per_key_rate_counts_keys_not_elements() {
        // key 1 holds 9 of 10 elements but weighs the same as key 2.
        let input = [1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
        let errors: ErrorMap = [(1, 5), (2, 0)].into_iter().collect();
        let score = PerKeyErrorRate.score(&input, &errors, &params(0.1));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_missing_key_is_bad() {
        let errors: ErrorMap = [(1, 0)].into_iter().collect();
        let score = PerKeyErrorRate.score(&[1, 2], &errors, &params(0.5));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_expected_verdict() {
        let p = params(0.1);
        assert_eq!(ExpectedVerdict::distinct().score(&[], &0.0, &p), 1.0);
        assert_eq!(ExpectedVerdict::distinct().score(&[], &1.0, &p), 0.0);
        assert_eq!(ExpectedVerdict::far_from_distinct().score(&[], &1.0, &p), 1.0);
    }

    #[test]
    fn test_closure_metric() {
        let metric = |input: &[i64], _acc: &f64, _p: &AccuracyParams| input.len() as f64 / 10.0;
        assert_eq!(metric.score(&[1, 2, 3], &0.0, &params(0.1)), 0.3);
    }

    #[test]
    fn test_error_summary() {
        let errors: ErrorMap = [(1, 0), (2, 4), (3, 8)].into_iter().collect();
        let summary = ErrorSummary::from_errors(&errors, 4.0);
        assert_eq!(summary.keys, 3);
        assert_eq!(summary.max, 8);
        assert_eq!(summary.mean, 4.0);
        assert_eq!(summary.over_bound, 1);
    }
}
