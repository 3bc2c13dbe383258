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

use crate::countmin::CountMinSketch;
use crate::error::Error;

/// Table dimensions of a [`CountMinSketch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountMinConfig {
    num_hashes: usize,
    num_buckets: usize,
}

impl CountMinConfig {
    /// Creates a configuration with `num_hashes` rows (`d`) of `num_buckets`
    /// counters (`m`).
    ///
    /// Returns [`ErrorKind::InvalidConfiguration`](crate::error::ErrorKind::InvalidConfiguration)
    /// if either dimension is zero or the table of `m * d` counters could not
    /// be addressed.
    pub fn new(num_hashes: usize, num_buckets: usize) -> Result<Self, Error> {
        if num_hashes == 0 {
            return Err(Error::invalid_config("num_hashes must be positive")
                .with_context("num_hashes", num_hashes));
        }
        if num_buckets == 0 {
            return Err(Error::invalid_config("num_buckets must be positive")
                .with_context("num_buckets", num_buckets));
        }
        let table_bytes = num_hashes
            .checked_mul(num_buckets)
            .and_then(|counters| counters.checked_mul(size_of::<u64>()))
            .filter(|bytes| *bytes <= isize::MAX as usize);
        if table_bytes.is_none() {
            return Err(Error::invalid_config("counter table size overflows")
                .with_context("num_hashes", num_hashes)
                .with_context("num_buckets", num_buckets));
        }
        Ok(Self {
            num_hashes,
            num_buckets,
        })
    }

    /// Creates the closed-form configuration for error `eps * n` with failure
    /// probability `delta`.
    pub fn analytic(eps: f64, delta: f64) -> Result<Self, Error> {
        let num_buckets = CountMinSketch::suggest_num_buckets(eps)?;
        let num_hashes = CountMinSketch::suggest_num_hashes(delta)?;
        Self::new(num_hashes, num_buckets)
    }

    /// Returns the number of rows (`d`).
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Returns the number of counters per row (`m`).
    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    /// Returns the number of counters, `m * d`.
    pub fn space(&self) -> u64 {
        self.num_hashes as u64 * self.num_buckets as u64
    }
}

