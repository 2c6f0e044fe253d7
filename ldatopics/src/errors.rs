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


use std::io;
use thiserror::Error;
use ldatopics_topicmodel::LdaError;

/// Everything that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Lda(#[from] LdaError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Failed to parse the journal XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Failed to build the stop word list: {0}")]
    StopWords(#[from] fst::Error),
    #[error("Failed to read or write json: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::Lda(LdaError::InvalidConfiguration { parameter, reason: reason.into() })
    }

    /// True for every invalid parameter, wherever it was detected.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::Lda(LdaError::InvalidConfiguration { .. }))
    }

    pub fn is_empty_corpus(&self) -> bool {
        matches!(self, Self::Lda(LdaError::EmptyCorpus { .. }))
    }
}
