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

//! Repeated trials and the empirical probability that an accuracy predicate
//! holds.
//!
//! A [`PropertyChecker`] bundles the hooks an evaluator needs: an
//! [`InputMapper`] from trial configuration to generator arguments, a
//! [`Runner`](crate::trial::Runner), an
//! [`AccuracyMetric`](crate::accuracy::AccuracyMetric) and the
//! [`Specification`] whose threshold the mean score is compared against.
//!
//! Trial `i` of a check seeds its input generator and its algorithm from
//! `derive_seed(base_seed, stream, i)`, so trials are independent of one
//! another, reproducible for a fixed base seed, and safe to run in any order.

mod checker;
mod spec;

pub use self::checker::CheckConfig;
pub use self::checker::CheckReport;
pub use self::checker::InputMapper;
pub use self::checker::PropertyChecker;
pub use self::checker::TrialOutcome;
pub use self::spec::Comparison;
pub use self::spec::Specification;
