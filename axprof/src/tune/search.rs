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

use rand::Rng;
use rand::rngs::StdRng;

use crate::common::rng_from_seed;
use crate::error::Error;

/// A candidate assignment, one value per parameter of a [`SearchSpace`].
pub type Point = Vec<i64>;

/// An integer parameter ranging over `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerParameter {
    name: String,
    min: i64,
    max: i64,
}

impl IntegerParameter {
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Result<Self, Error> {
        let name = name.into();
        if min > max {
            return Err(Error::invalid_config("parameter range is empty")
                .with_context("name", name)
                .with_context("min", min)
                .with_context("max", max));
        }
        Ok(Self { name, min, max })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns `(min, max)`.
    pub fn range(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    /// Number of values in the range; `0` stands for the full `i64` domain.
    fn width(&self) -> u64 {
        (self.max.wrapping_sub(self.min) as u64).wrapping_add(1)
    }
}

/// The product of several integer parameter ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    params: Vec<IntegerParameter>,
}

impl SearchSpace {
    pub fn new(params: Vec<IntegerParameter>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &[IntegerParameter] {
        &self.params
    }

    /// Returns the parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&IntegerParameter> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Returns the number of points, saturating at `u64::MAX`.
    pub fn size(&self) -> u64 {
        self.params
            .iter()
            .fold(1u64, |acc, p| match p.width() {
                0 => u64::MAX,
                width => acc.saturating_mul(width),
            })
    }

    pub fn contains(&self, point: &[i64]) -> bool {
        point.len() == self.params.len()
            && self
                .params
                .iter()
                .zip(point)
                .all(|(p, v)| (p.min..=p.max).contains(v))
    }
}

/// A black-box optimizer proposing points and receiving their objective.
pub trait SearchEngine {
    /// Returns the next point to evaluate, or `None` when the search is over.
    fn propose(&mut self) -> Option<Point>;

    /// Reports the objective of a proposed point; lower is better.
    fn feedback(&mut self, point: &[i64], objective: f64) {
        let _ = (point, objective);
    }
}

/// Visits every point of the space once, last parameter fastest.
#[derive(Debug, Clone)]
pub struct GridSearch {
    space: SearchSpace,
    next: Option<Point>,
}

impl GridSearch {
    pub fn new(space: SearchSpace) -> Self {
        let next = Some(space.params.iter().map(|p| p.min).collect());
        Self { space, next }
    }
}

impl SearchEngine for GridSearch {
    fn propose(&mut self) -> Option<Point> {
        let current = self.next.take()?;
        let mut following = current.clone();
        for (i, p) in self.space.params.iter().enumerate().rev() {
            if following[i] < p.max {
                following[i] += 1;
                self.next = Some(following);
                break;
            }
            following[i] = p.min;
        }
        Some(current)
    }
}

/// Draws `budget` points uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomSearch {
    space: SearchSpace,
    remaining: usize,
    rng: StdRng,
}

impl RandomSearch {
    pub fn new(space: SearchSpace, budget: usize, seed: Option<u64>) -> Self {
        Self {
            space,
            remaining: budget,
            rng: rng_from_seed(seed),
        }
    }
}

impl SearchEngine for RandomSearch {
    fn propose(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let point = self
            .space
            .params
            .iter()
            .map(|p| self.rng.gen_range(p.min..=p.max))
            .collect();
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> SearchSpace {
        SearchSpace::new(vec![
            IntegerParameter::new("m", 1, 3).unwrap(),
            IntegerParameter::new("d", 5, 6).unwrap(),
        ])
    }

    #[test]
    fn test_grid_visits_every_point_once() {
        let mut grid = GridSearch::new(space());
        let mut points = vec![];
        while let Some(p) = grid.propose() {
            points.push(p);
        }
        assert_eq!(
            points,
            vec![
                vec![1, 5],
                vec![1, 6],
                vec![2, 5],
                vec![2, 6],
                vec![3, 5],
                vec![3, 6]
            ]
        );
        assert_eq!(space().size(), 6);
    }

    #[test]
    fn test_random_search_respects_budget_and_bounds() {
        let space = space();
        let mut search = RandomSearch::new(space.clone(), 50, Some(3));
        let mut count = 0;
        while let Some(p) = search.propose() {
            assert!(space.contains(&p), "{p:?}");
            count += 1;
        }
        assert_eq!(count, 50);
    }

    #[test]
    fn test_random_search_covers_full_domain() {
        let space = SearchSpace::new(vec![IntegerParameter::new("x", i64::MIN, i64::MAX).unwrap()]);
        assert_eq!(space.size(), u64::MAX);
        let mut search = RandomSearch::new(space, 8, Some(3));
        let mut distinct = std::collections::HashSet::new();
        while let Some(p) = search.propose() {
            distinct.insert(p[0]);
        }
        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_empty_range_is_invalid() {
        assert!(IntegerParameter::new("m", 2, 1).is_err());
        assert_eq!(space().param("d").unwrap().range(), (5, 6));
    }
}
