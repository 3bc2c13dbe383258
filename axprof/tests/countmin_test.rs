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

use axprof::countmin::CountMinConfig;
use axprof::countmin::CountMinSketch;
use axprof::error::ErrorKind;
use axprof::generator::GeneratorParams;
use axprof::generator::generate;
use axprof::truth::exact_counts;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::ge;
use googletest::prelude::le;
use proptest::prelude::*;

fn mean_error(seq: &[i64], num_hashes: usize, num_buckets: usize, seed: u64) -> f64 {
    let mut sketch = CountMinSketch::with_seed(num_hashes, num_buckets, seed).unwrap();
    for v in seq {
        sketch.update(*v);
    }
    let counts = exact_counts(seq);
    let total: u64 = counts
        .iter()
        .map(|(v, c)| sketch.estimate(*v) - *c)
        .sum();
    total as f64 / counts.len() as f64
}

#[test]
fn test_small_sequence_estimates() {
    let mut sketch = CountMinSketch::new(5, 1000).unwrap();
    for v in [1i64, 1, 2, 3] {
        sketch.update(v);
    }

    let slack = (std::f64::consts::E / 1000.0).ceil() as u64 * 4;
    assert_that!(sketch.estimate(1i64), ge(2));
    assert_that!(sketch.estimate(1i64), le(2 + slack));
    assert_that!(sketch.estimate(2i64), ge(1));
    assert_that!(sketch.estimate(3i64), ge(1));
    assert_eq!(sketch.space(), 5_000);
}

#[test]
fn test_empty_sketch() {
    let sketch = CountMinSketch::new(3, 16).unwrap();
    assert_eq!(sketch.estimate("anything"), 0);
    assert_eq!(sketch.space(), 48);
}

#[test]
fn test_zero_dimensions_rejected() {
    let err = CountMinSketch::new(0, 16).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    assert_that!(err.message(), contains_substring("num_hashes"));

    let err = CountMinSketch::new(3, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    assert_that!(err.message(), contains_substring("num_buckets"));
}

#[test]
fn test_suggested_dimensions() {
    assert_eq!(CountMinSketch::suggest_num_buckets(0.1).unwrap(), 28);
    assert_eq!(CountMinSketch::suggest_num_buckets(0.001).unwrap(), 2719);
    assert_eq!(CountMinSketch::suggest_num_hashes(0.05).unwrap(), 3);
    assert_eq!(CountMinSketch::suggest_num_hashes(0.9).unwrap(), 1);
    assert_eq!(
        CountMinSketch::suggest_num_buckets(0.0).unwrap_err().kind(),
        ErrorKind::InvalidParameter
    );
    assert_eq!(
        CountMinSketch::suggest_num_hashes(1.0).unwrap_err().kind(),
        ErrorKind::InvalidParameter
    );
    let config = CountMinConfig::analytic(0.05, 0.1).unwrap();
    assert_eq!((config.num_buckets(), config.num_hashes()), (55, 3));
}

#[test]
fn test_oversized_table_rejected() {
    for (num_hashes, num_buckets) in [(4, usize::MAX / 2), (usize::MAX, 2), (2, usize::MAX / 2)] {
        let err = CountMinConfig::new(num_hashes, num_buckets).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert_that!(err.message(), contains_substring("overflows"));

        let err = CountMinSketch::with_seed(num_hashes, num_buckets, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }
    assert!(CountMinConfig::new(4, 1 << 20).is_ok());
}

#[test]
fn test_more_rows_never_raise_estimates() {
    let seq = generate(&GeneratorParams::zipf(5_000, 1.1), Some(3)).unwrap();
    let mut shallow = CountMinSketch::with_seed(1, 50, 99).unwrap();
    let mut deep = CountMinSketch::with_seed(5, 50, 99).unwrap();
    for v in &seq {
        shallow.update(*v);
        deep.update(*v);
    }
    for v in exact_counts(&seq).keys() {
        assert_that!(deep.estimate(*v), le(shallow.estimate(*v)));
    }
    assert!(mean_error(&seq, 5, 50, 99) <= mean_error(&seq, 1, 50, 99));
}

#[test]
fn test_wider_rows_lower_mean_error() {
    let seq = generate(&GeneratorParams::uniform(5_000, 0, 999), Some(8)).unwrap();
    let narrow: f64 = (0..5).map(|s| mean_error(&seq, 3, 20, s)).sum::<f64>() / 5.0;
    let wide: f64 = (0..5).map(|s| mean_error(&seq, 3, 500, s)).sum::<f64>() / 5.0;
    assert_that!(wide, le(narrow));
}

proptest! {
    #[test]
    fn estimate_never_undercounts(
        values in proptest::collection::vec(0i64..50, 1..300),
        num_buckets in 1usize..64,
        num_hashes in 1usize..6,
        seed in any::<u64>(),
    ) {
        let mut sketch = CountMinSketch::with_seed(num_hashes, num_buckets, seed).unwrap();
        for v in &values {
            sketch.update(*v);
        }
        for (v, count) in exact_counts(&values) {
            prop_assert!(sketch.estimate(v) >= count);
            prop_assert!(sketch.estimate(v) <= values.len() as u64);
        }
    }
}
