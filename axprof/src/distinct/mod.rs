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

//! Sublinear duplicate detection by sampling.
//!
//! The tester samples `min(n, ceil(c * sqrt(n) / eps))` positions without
//! replacement and reports `1.0` as soon as a sampled value repeats, `0.0`
//! otherwise. A positive answer is always right; a negative answer is only
//! right with some probability when the input has many duplicates.
//!
//! ```rust
//! use axprof::common::seeded_rng;
//! use axprof::distinct::DistinctnessTester;
//!
//! let tester = DistinctnessTester::new(0.1, 1.0).unwrap();
//! assert_eq!(tester.sample_size(10_000), 1_000);
//!
//! let distinct: Vec<i64> = (0..10_000).collect();
//! let mut rng = seeded_rng(1);
//! assert_eq!(tester.is_far_from_distinct(&distinct, &mut rng).unwrap(), 0.0);
//! ```

mod tester;

pub use self::tester::DistinctnessConfig;
pub use self::tester::DistinctnessTester;
pub use self::tester::SampleScan;
