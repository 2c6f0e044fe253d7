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

mod document;
mod errors;
mod lemmatizer;
mod stemming;
mod stopwords;
mod unicode_segmenter;

pub use document::RawDocument;
pub use errors::MalformedInputError;
pub use lemmatizer::{NounDictionary, NounLemmatizer};
pub use stemming::{Reducer, TokenReduction};
pub use stopwords::{StopWordList, ENGLISH_STOP_WORDS};
pub use unicode_segmenter::AlphabeticWords;

use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// A normalized word-form.
pub type Token = String;

/// The serializable settings of a [Normalizer].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// How surviving words are reduced.
    pub reduction: TokenReduction,
    /// Stop words filtered in addition to the english list.
    pub extra_stop_words: Vec<String>,
}

/// A builder for a normalizer
pub struct NormalizerBuilder {
    reduction: TokenReduction,
    stop_words: Option<Arc<StopWordList>>,
    extra_stop_words: Vec<String>,
    noun_dictionary: Option<Arc<NounDictionary>>,
}

impl Default for NormalizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizerBuilder {
    pub fn new() -> Self {
        Self {
            reduction: TokenReduction::default(),
            stop_words: None,
            extra_stop_words: Vec::new(),
            noun_dictionary: None,
        }
    }

    pub fn reduction(&mut self, reduction: TokenReduction) -> &mut Self {
        self.reduction = reduction;
        self
    }

    /// Replaces the english stop words.
    pub fn stop_words(&mut self, stop_words: Arc<StopWordList>) -> &mut Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Replaces the bundled noun dictionary used by [TokenReduction::Lemmatize],
    /// e.g. with a full WordNet loaded by [NounDictionary::from_wordnet].
    pub fn noun_dictionary(&mut self, dictionary: Arc<NounDictionary>) -> &mut Self {
        self.noun_dictionary = Some(dictionary);
        self
    }

    pub fn extra_stop_words<I, S>(&mut self, words: I) -> &mut Self
    where
        I: IntoIterator<Item=S>,
        S: Into<String>
    {
        self.extra_stop_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn build(&self) -> Result<Normalizer, fst::Error> {
        let base = self.stop_words.clone().unwrap_or_else(StopWordList::english);
        let stop_words = if self.extra_stop_words.is_empty() {
            base
        } else {
            Arc::new(base.with_additional(&self.extra_stop_words)?)
        };
        let reducer = match (self.reduction, &self.noun_dictionary) {
            (TokenReduction::Lemmatize, Some(dictionary)) => Reducer::Lemma(NounLemmatizer::new(dictionary.clone())),
            (reduction, _) => reduction.into(),
        };
        Ok(Normalizer::new(stop_words, reducer))
    }
}

impl From<&NormalizerConfig> for NormalizerBuilder {
    fn from(value: &NormalizerConfig) -> Self {
        let mut builder = NormalizerBuilder::new();
        builder
            .reduction(value.reduction)
            .extra_stop_words(value.extra_stop_words.iter().cloned());
        builder
    }
}

/// Turns raw document text into the token sequence fed to the vocabulary.
///
/// The steps always run in the same order: lower casing, word segmentation,
/// alphabetic filter, stop word filter and finally the reduction.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: Arc<StopWordList>,
    reducer: Reducer,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(StopWordList::english(), Reducer::from(TokenReduction::Lemmatize))
    }
}

impl Normalizer {
    pub fn new(stop_words: Arc<StopWordList>, reducer: Reducer) -> Self {
        Self { stop_words, reducer }
    }

    pub fn stop_words(&self) -> &StopWordList {
        &self.stop_words
    }

    /// Normalizes a single text.
    pub fn normalize(&self, text: &str) -> Vec<Token> {
        let lower = text.to_lowercase();
        AlphabeticWords::new(&lower)
            .filter(|word| !self.stop_words.contains(word))
            .map(|word| self.reducer.reduce(word).into_owned())
            .collect()
    }

    /// Normalizes a document, fails if it is not text.
    pub fn try_normalize(&self, document: &RawDocument) -> Result<Vec<Token>, MalformedInputError> {
        Ok(self.normalize(document.as_text()?))
    }

    /// Normalizes every document of a corpus.
    ///
    /// A malformed document is replaced by an empty token sequence, the output
    /// always has one entry per input document.
    pub fn normalize_all<'a, I>(&self, documents: I) -> Vec<Vec<Token>>
    where
        I: IntoIterator<Item=&'a RawDocument>
    {
        documents
            .into_iter()
            .enumerate()
            .map(|(document_id, document)| {
                self.try_normalize(document).unwrap_or_else(|err| {
                    log::warn!("Document {document_id} is malformed, continuing with no tokens: {err}");
                    Vec::new()
                })
            })
            .collect()
    }
}
