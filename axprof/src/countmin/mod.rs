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

//! Count-Min sketch for approximate frequency estimation.
//!
//! The sketch keeps `d` rows of `m` counters. Each update increments one
//! counter per row; an estimate is the minimum of the `d` counters an item
//! hashes to. Counters only ever over-count, so every estimate is an upper
//! bound on the true frequency.
//!
//! # Usage
//!
//! ```rust
//! use axprof::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(5, 256).unwrap();
//!
//! sketch.update(7);
//! for _ in 0..3 {
//!     sketch.update(9);
//! }
//!
//! assert!(sketch.estimate(9) >= 3);
//! assert!(sketch.estimate(7) >= 1);
//! ```
//!
//! # Configuration Helpers
//!
//! The closed-form choice `m = ceil(e / eps)`, `d = ceil(ln(1 / delta))`
//! bounds the error by `eps * n` except with probability `delta`:
//!
//! ```rust
//! use axprof::countmin::CountMinConfig;
//!
//! let config = CountMinConfig::analytic(0.01, 0.05).unwrap();
//! assert_eq!(config.num_buckets(), 272);
//! assert_eq!(config.num_hashes(), 3);
//! ```

mod config;
pub use self::config::CountMinConfig;

mod sketch;
pub use self::sketch::CountMinSketch;
