//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.


use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::{Deserialize, Serialize};
use ldatopics_tokenizer::{NormalizerConfig, TokenReduction};
use ldatopics_topicmodel::{LdaConfig, TopicModel};
use crate::errors::PipelineError;

/// The settings of a whole pipeline run, usually read from a json file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub lda: LdaConfig,
    pub normalizer: NormalizerConfig,
    /// Terms shown per topic
    pub top_n: usize,
    /// Topics of a document below this probability are not shown
    pub minimum_probability: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lda: LdaConfig::default(),
            normalizer: NormalizerConfig::default(),
            top_n: 10,
            minimum_probability: TopicModel::<String>::DEFAULT_MINIMUM_PROBABILITY,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(value: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(value)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        self.lda.validate()?;
        if self.top_n == 0 {
            return Err(PipelineError::invalid("top_n", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.minimum_probability) {
            return Err(PipelineError::invalid(
                "minimum_probability",
                format!("must be in [0, 1] but was {}", self.minimum_probability)
            ));
        }
        Ok(())
    }
}

/// Values that replace the ones of a [PipelineConfig], e.g. from the command line.
/// Counts are signed so that negative input can be reported as invalid.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub num_topics: Option<i64>,
    pub passes: Option<i64>,
    pub random_state: Option<u64>,
    pub top_n: Option<i64>,
    pub reduction: Option<TokenReduction>,
}

fn positive_count(parameter: &'static str, value: i64) -> Result<usize, PipelineError> {
    if value <= 0 {
        return Err(PipelineError::invalid(parameter, format!("must be a positive integer but was {value}")));
    }
    usize::try_from(value).map_err(|err| PipelineError::invalid(parameter, err.to_string()))
}

impl PipelineConfig {
    /// Replaces every value set in `overrides` and validates the result.
    pub fn apply(&mut self, overrides: &ConfigOverrides) -> Result<(), PipelineError> {
        if let Some(value) = overrides.num_topics {
            self.lda.num_topics = positive_count("num_topics", value)?;
        }
        if let Some(value) = overrides.passes {
            self.lda.passes = positive_count("passes", value)?;
        }
        if let Some(value) = overrides.top_n {
            self.top_n = positive_count("top_n", value)?;
        }
        if let Some(value) = overrides.random_state {
            self.lda.random_state = Some(value);
        }
        if let Some(value) = overrides.reduction {
            self.normalizer.reduction = value;
        }
        self.validate()
    }
}
