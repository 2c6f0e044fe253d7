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


use std::ops::ControlFlow;
use ldatopics_tokenizer::{Normalizer, NormalizerBuilder, RawDocument, Token};
use ldatopics_topicmodel::{build_corpus, BowCorpus, LdaEstimator, PassReport, TopicModel, TopicReport, Vocabulary};
use crate::config::PipelineConfig;
use crate::errors::PipelineError;

/// Runs normalizer, vocabulary builder and estimator one after another.
///
/// Every run owns its own vocabulary and model, a pipeline can be reused for
/// any number of corpora.
#[derive(Debug, Clone)]
pub struct TopicPipeline {
    normalizer: Normalizer,
    estimator: LdaEstimator,
    top_n: usize,
}

/// Everything a run produced, aligned by document index.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub tokens: Vec<Vec<Token>>,
    pub corpus: BowCorpus,
    pub model: TopicModel<Token>,
    top_n: usize,
}

impl PipelineOutput {
    pub fn vocabulary(&self) -> &Vocabulary<Token> {
        self.model.vocabulary()
    }

    /// The best terms of every topic, as configured.
    pub fn report(&self) -> TopicReport<Token> {
        self.model.report(self.top_n)
    }
}

impl TopicPipeline {
    /// Validates `config` and prepares the stages.
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            normalizer: NormalizerBuilder::from(&config.normalizer).build()?,
            estimator: LdaEstimator::new(config.lda.clone())?,
            top_n: config.top_n,
        })
    }

    pub fn from_parts(normalizer: Normalizer, estimator: LdaEstimator, top_n: usize) -> Result<Self, PipelineError> {
        if top_n == 0 {
            return Err(PipelineError::invalid("top_n", "must be at least 1"));
        }
        Ok(Self { normalizer, estimator, top_n })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn estimator(&self) -> &LdaEstimator {
        &self.estimator
    }

    pub fn run(&self, documents: &[RawDocument]) -> Result<PipelineOutput, PipelineError> {
        self.run_with_control(documents, |_| ControlFlow::Continue(()))
    }

    /// Runs plain texts.
    pub fn run_texts<S: AsRef<str>>(&self, texts: &[S]) -> Result<PipelineOutput, PipelineError> {
        let documents: Vec<RawDocument> = texts.iter().map(|text| RawDocument::from(text.as_ref())).collect();
        self.run(&documents)
    }

    /// Runs the pipeline, `control` is handed to [LdaEstimator::fit_with_control].
    pub fn run_with_control<F>(&self, documents: &[RawDocument], control: F) -> Result<PipelineOutput, PipelineError>
    where
        F: FnMut(&PassReport) -> ControlFlow<()>
    {
        log::info!("Normalizing {} documents.", documents.len());
        let tokens = self.normalizer.normalize_all(documents);
        let (vocabulary, corpus) = build_corpus(&tokens);
        log::info!(
            "Built a vocabulary of {} words over {} tokens.",
            vocabulary.len(),
            corpus.total_tokens()
        );
        let model = self.estimator.fit_with_control(&vocabulary, &corpus, control)?;
        log::info!("Fitted {} topics.", model.k());
        Ok(PipelineOutput { tokens, corpus, model, top_n: self.top_n })
    }
}
