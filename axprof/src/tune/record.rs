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

use std::fs;
use std::fs::OpenOptions;
use std::io::ErrorKind as IoErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::trial::SketchTrial;
use crate::tune::SearchSpace;
use crate::tune::TuneConfig;
use crate::tune::TuningOutcome;

const EXTENSION: &str = "json";

/// The saved result of one Count-Min tuning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningRecord {
    pub n: usize,
    pub eps: f64,
    pub delta: f64,
    pub skew: f64,
    pub m_range: (i64, i64),
    pub d_range: (i64, i64),
    pub tune_run: usize,
    pub spec_run: usize,
    pub opt_m: i64,
    pub opt_d: i64,
    pub label: String,
}

impl TuningRecord {
    /// Builds a record from a finished tuning run over a space with `m` and
    /// `d` parameters.
    pub fn from_outcome(
        outcome: &TuningOutcome<SketchTrial>,
        space: &SearchSpace,
        config: &TuneConfig,
        label: impl Into<String>,
    ) -> Result<Self, Error> {
        let range = |name: &'static str| {
            space.param(name).map(|p| p.range()).ok_or_else(|| {
                Error::invalid_config("search space has no such parameter").with_context("name", name)
            })
        };
        let trial = &outcome.config;
        Ok(Self {
            n: trial.n(),
            eps: trial.eps(),
            delta: trial.delta(),
            skew: trial.skew(),
            m_range: range("m")?,
            d_range: range("d")?,
            tune_run: config.tune_run,
            spec_run: config.spec_run,
            opt_m: trial.sketch().num_buckets() as i64,
            opt_d: trial.sketch().num_hashes() as i64,
            label: label.into(),
        })
    }

    /// Counters used by the optimal configuration, `opt_m * opt_d`.
    pub fn space(&self) -> i64 {
        self.opt_m * self.opt_d
    }

    /// File name stem embedding the experiment parameters.
    pub fn file_stem(&self) -> String {
        let label: String = self
            .label
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
                _ => '_',
            })
            .collect();
        format!(
            "dp-n-{}-eps-{}-delta-{}-zipf-{}-{}",
            self.n, self.eps, self.delta, self.skew, label
        )
    }

    /// Writes the record as JSON into `dir`, never overwriting an existing
    /// file, and returns the path written.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf, Error> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|err| {
            Error::persistence("failed to create output directory")
                .with_context("dir", dir.display())
                .set_source(err)
        })?;
        let body = serde_json::to_vec(self).map_err(|err| {
            Error::persistence("failed to encode tuning record").set_source(err)
        })?;

        let stem = self.file_stem();
        let mut attempt = 0usize;
        loop {
            let name = match attempt {
                0 => format!("{stem}.{EXTENSION}"),
                k => format!("{stem}-{k}.{EXTENSION}"),
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(&body).map_err(|err| {
                        Error::persistence("failed to write tuning record")
                            .with_context("path", path.display())
                            .set_source(err)
                    })?;
                    tracing::info!(path = %path.display(), "saved tuning record");
                    return Ok(path);
                }
                Err(err) if err.kind() == IoErrorKind::AlreadyExists => attempt += 1,
                Err(err) => {
                    return Err(Error::persistence("failed to create tuning record")
                        .with_context("path", path.display())
                        .set_source(err));
                }
            }
        }
    }

    /// Reads one record.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            Error::persistence("failed to read tuning record")
                .with_context("path", path.display())
                .set_source(err)
        })?;
        serde_json::from_slice(&bytes).map_err(|err| {
            Error::persistence("malformed tuning record")
                .with_context("path", path.display())
                .set_source(err)
        })
    }

    /// Reads every `.json` record under `dir`, recursively, ordered by path.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<Self>, Error> {
        let mut paths = vec![];
        collect_json(dir.as_ref(), &mut paths)?;
        paths.sort();
        paths.iter().map(Self::load).collect()
    }
}

fn collect_json(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), Error> {
    let entries = fs::read_dir(dir).map_err(|err| {
        Error::persistence("failed to list directory")
            .with_context("dir", dir.display())
            .set_source(err)
    })?;
    for entry in entries {
        let path = entry
            .map_err(|err| {
                Error::persistence("failed to list directory")
                    .with_context("dir", dir.display())
                    .set_source(err)
            })?
            .path();
        if path.is_dir() {
            collect_json(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == EXTENSION) {
            out.push(path);
        }
    }
    Ok(())
}
