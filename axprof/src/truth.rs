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

//! Exact answers computed directly from a sequence.
//!
//! These are recomputed for every trial and are never part of the timed
//! region of a run.

use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::Hash;

/// Returns the exact number of occurrences of every value.
pub fn exact_counts<T: Hash + Eq + Copy>(seq: &[T]) -> HashMap<T, u64> {
    let mut counts = HashMap::new();
    for v in seq {
        *counts.entry(*v).or_insert(0) += 1;
    }
    counts
}

/// Returns the number of elements that repeat an earlier element,
/// i.e. `len - distinct`.
pub fn duplicate_count<T: Hash + Eq>(seq: &[T]) -> usize {
    let distinct: HashSet<&T> = seq.iter().collect();
    seq.len() - distinct.len()
}

/// Returns true if at least `eps * len` elements are duplicates.
pub fn is_far_from_distinct<T: Hash + Eq>(seq: &[T], eps: f64) -> bool {
    duplicate_count(seq) as f64 >= eps * seq.len() as f64
}

/// Returns true if any value occurs more than once.
pub fn has_duplicate<T: Hash + Eq>(seq: &[T]) -> bool {
    duplicate_count(seq) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_counts() {
        let counts = exact_counts(&[1, 1, 2, 3]);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&1], 2);
        assert_eq!(counts[&2], 1);
        assert_eq!(counts[&3], 1);
    }

    #[test]
    fn test_duplicates() {
        assert_eq!(duplicate_count(&[1, 1, 1, 2]), 2);
        assert_eq!(duplicate_count::<i64>(&[]), 0);
        assert!(has_duplicate(&[4, 5, 4]));
        assert!(!has_duplicate(&[4, 5, 6]));
    }

    #[test]
    fn test_far_from_distinct_threshold() {
        // 1 duplicate in 10 elements: far at eps = 0.1, not at eps = 0.11.
        let seq = [0, 1, 2, 3, 4, 5, 6, 7, 8, 8];
        assert!(is_far_from_distinct(&seq, 0.1));
        assert!(!is_far_from_distinct(&seq, 0.11));
    }
}
