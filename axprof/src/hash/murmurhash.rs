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

use std::hash::Hasher;

/// MurmurHash3 x64 128-bit as a [`Hasher`].
///
/// Bytes are buffered until [`finish128`](Self::finish128) is called, so any
/// `T: Hash` can be fed through `T::hash(&item, &mut hasher)`.
#[derive(Debug, Clone)]
pub struct MurmurHash3X64128 {
    seed: u32,
    buffer: Vec<u8>,
}

impl MurmurHash3X64128 {
    /// Creates a hasher with the given seed.
    ///
    /// MurmurHash3 takes a 32-bit seed; the upper half of `seed` is folded in.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: (seed ^ (seed >> 32)) as u32,
            buffer: Vec::with_capacity(16),
        }
    }

    /// Returns both 64-bit halves of the hash.
    pub fn finish128(&self) -> (u64, u64) {
        mur3::murmurhash3_x64_128(&self.buffer, self.seed)
    }
}

impl Hasher for MurmurHash3X64128 {
    fn finish(&self) -> u64 {
        self.finish128().0
    }

    fn write(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }
}
