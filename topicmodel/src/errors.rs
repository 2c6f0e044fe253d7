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

use rand_distr::GammaError;
use thiserror::Error;
use crate::estimator::LdaConfigBuilderError;

/// The errors while building a corpus or fitting a model
#[derive(Debug, Error)]
pub enum LdaError {
    #[error("The corpus is empty ({documents} documents, {vocabulary_size} words, {tokens} tokens)!")]
    EmptyCorpus {
        documents: usize,
        vocabulary_size: usize,
        tokens: u64
    },
    #[error("Invalid configuration for {parameter}: {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String
    },
    #[error("Document {document_id} references the word id {word_id}, but the vocabulary only has {vocabulary_size} words!")]
    UnknownWordId {
        document_id: usize,
        word_id: usize,
        vocabulary_size: usize
    },
    #[error("The corpus was built for {corpus} words, but the vocabulary has {vocabulary}!")]
    VocabularyMismatch {
        corpus: usize,
        vocabulary: usize
    },
    #[error("The corpus has {corpus} documents, but the model was fitted on {model}!")]
    DocumentMismatch {
        corpus: usize,
        model: usize
    },
    #[error(transparent)]
    Initialization(#[from] GammaError),
}

impl LdaError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { parameter, reason: reason.into() }
    }
}

impl From<LdaConfigBuilderError> for LdaError {
    fn from(value: LdaConfigBuilderError) -> Self {
        Self::invalid("builder", value.to_string())
    }
}
