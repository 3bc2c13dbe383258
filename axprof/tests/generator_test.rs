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

use axprof::error::ErrorKind;
use axprof::generator::Distribution;
use axprof::generator::GeneratorParams;
use axprof::generator::generate;
use axprof::truth::duplicate_count;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::ge;
use proptest::prelude::*;

#[test]
fn test_inverted_range() {
    let err = generate(&GeneratorParams::uniform(10, 9, 0), Some(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert_that!(err.to_string(), contains_substring("min must not exceed max"));
}

#[test]
fn test_forced_duplicates_meet_density() {
    let params = GeneratorParams::forced_duplicates(1_000, 0.05);
    for seed in 0..10 {
        let seq = generate(&params, Some(seed)).unwrap();
        assert_that!(duplicate_count(&seq), ge(50));
    }
}

#[test]
fn test_zipf_skew_near_one() {
    let seq = generate(&GeneratorParams::zipf(1_000, 1.000_000_001), Some(1)).unwrap();
    assert_eq!(seq.len(), 1_000);
    assert!(seq.iter().all(|v| (1..=1_000).contains(v)));

    let err = generate(&GeneratorParams::zipf(1_000, 1.0), Some(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn test_params_shape() {
    let params = GeneratorParams::zipf(10, 1.1);
    assert_eq!(params.length, 10);
    assert_eq!(
        params.distribution,
        Distribution::Zipf {
            skew: 1.1,
            support: 10
        }
    );
}

proptest! {
    #[test]
    fn same_seed_same_sequence(
        length in 1usize..500,
        a in -1_000i64..1_000,
        b in -1_000i64..1_000,
        seed in any::<u64>(),
    ) {
        let params = GeneratorParams::uniform(length, a.min(b), a.max(b));
        let first = generate(&params, Some(seed)).unwrap();
        let second = generate(&params, Some(seed)).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.iter().all(|v| (a.min(b)..=a.max(b)).contains(v)));
    }

    #[test]
    fn zipf_same_seed_same_sequence(
        length in 1usize..300,
        skew in 1.05f64..4.0,
        seed in any::<u64>(),
    ) {
        let params = GeneratorParams::zipf(length, skew);
        let first = generate(&params, Some(seed)).unwrap();
        prop_assert_eq!(&first, &generate(&params, Some(seed)).unwrap());
        prop_assert!(first.iter().all(|v| (1..=length as i64).contains(v)));
    }
}
