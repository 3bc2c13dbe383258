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

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Relation between an empirical probability and a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
}

impl Comparison {
    /// Returns whether `lhs <op> rhs` holds.
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Less => lhs < rhs,
            Comparison::LessEqual => lhs <= rhs,
            Comparison::Equal => lhs == rhs,
            Comparison::GreaterEqual => lhs >= rhs,
            Comparison::Greater => lhs > rhs,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::LessEqual => "<=",
            Comparison::Equal => "==",
            Comparison::GreaterEqual => ">=",
            Comparison::Greater => ">",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparison {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" => Ok(Comparison::Less),
            "<=" => Ok(Comparison::LessEqual),
            "==" => Ok(Comparison::Equal),
            ">=" => Ok(Comparison::GreaterEqual),
            ">" => Ok(Comparison::Greater),
            other => Err(Error::invalid_config("unknown comparison operator")
                .with_context("operator", other)),
        }
    }
}

/// A probabilistic accuracy specification.
///
/// The clause text (`Input ...; Output ...; TIME ...; ACC Probability ...`)
/// is kept verbatim for an external evaluator. The checker only uses the
/// comparison and threshold that close the `ACC` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    text: String,
    comparison: Comparison,
    threshold: f64,
}

impl Specification {
    /// Creates a specification; `threshold` must lie in `[0, 1]`.
    pub fn new(
        text: impl Into<String>,
        comparison: Comparison,
        threshold: f64,
    ) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::invalid_config("threshold must be in [0, 1]")
                .with_context("threshold", threshold));
        }
        Ok(Self {
            text: text.into(),
            comparison,
            threshold,
        })
    }

    /// Shorthand for `Probability ... >= threshold`.
    pub fn at_least(text: impl Into<String>, threshold: f64) -> Result<Self, Error> {
        Self::new(text, Comparison::GreaterEqual, threshold)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns whether an empirical probability satisfies the specification.
    pub fn is_satisfied_by(&self, probability: f64) -> bool {
        self.comparison.holds(probability, self.threshold)
    }

    /// Returns how far `probability` is from satisfying the specification,
    /// `0.0` if it already does.
    pub fn shortfall(&self, probability: f64) -> f64 {
        if self.is_satisfied_by(probability) {
            0.0
        } else {
            (probability - self.threshold).abs()
        }
    }
}
