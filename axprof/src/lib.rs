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

//! # axprof
//!
//! Empirical validation of randomized approximate algorithms against
//! probabilistic accuracy specifications, and search for the cheapest
//! parameters that still satisfy them.
//!
//! The pipeline for one configuration is:
//!
//! 1. a [generator] produces a seeded input [`Sequence`](generator::Sequence);
//! 2. a [trial] runner builds the algorithm under test (a [countmin] sketch or
//!    a [distinct]ness tester), runs it and returns a
//!    [`Measurement`](trial::Measurement);
//! 3. an [accuracy] metric reduces the measurement to a score in `[0, 1]`
//!    using the [truth] computed from the input;
//! 4. the [check]er repeats this over independent trials and compares the
//!    mean score with a [`Specification`](check::Specification) threshold;
//! 5. [tune] exposes the check as a scalar objective for a parameter search.
//!
//! ```rust
//! use axprof::accuracy::ExpectedVerdict;
//! use axprof::check::CheckConfig;
//! use axprof::check::PropertyChecker;
//! use axprof::check::Specification;
//! use axprof::trial::DistinctRunner;
//! use axprof::trial::DistinctTrial;
//!
//! let spec = Specification::new(
//!     "ACC Probability over runs [Output == 0] == 1",
//!     axprof::check::Comparison::Equal,
//!     1.0,
//! )
//! .unwrap();
//! let checker = PropertyChecker::new(
//!     spec,
//!     |trial: &DistinctTrial, _: usize| trial.positive_input(),
//!     DistinctRunner::default(),
//!     ExpectedVerdict::distinct(),
//! )
//! .with_config(CheckConfig::default().with_trials(20).with_base_seed(7));
//!
//! let report = checker.check(&DistinctTrial::new(1_000, 0.1, 1.0).unwrap()).unwrap();
//! assert!(report.passed);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod accuracy;
pub mod check;
pub mod common;
pub mod countmin;
pub mod distinct;
pub mod error;
pub mod generator;
pub mod hash;
pub mod trial;
pub mod truth;
pub mod tune;
