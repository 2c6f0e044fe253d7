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

mod inference;

pub(crate) use inference::variational_bound;

use std::ops::ControlFlow;
use derive_builder::Builder;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Gamma};
use serde::{Deserialize, Serialize};
use crate::corpus::BowCorpus;
use crate::errors::LdaError;
use crate::estimator::inference::DocumentInference;
use crate::math::exp_dirichlet_expectation_2d;
use crate::model::TopicModel;
use crate::vocabulary::Vocabulary;

/// The settings of a LDA fitting run.
///
/// The defaults follow gensim's `LdaModel` with a symmetric prior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, build_fn(private, name = "build_unvalidated"))]
#[serde(default)]
pub struct LdaConfig {
    /// The number of topics K
    pub num_topics: usize,
    /// The number of full sweeps over the corpus
    pub passes: usize,
    /// The seed of every random draw. If not set the OS entropy is used.
    #[builder(setter(strip_option))]
    pub random_state: Option<u64>,
    /// The symmetric document-topic prior, defaults to 1/K
    #[builder(setter(strip_option))]
    pub alpha: Option<f64>,
    /// The symmetric topic-word prior, defaults to 1/K
    #[builder(setter(strip_option))]
    pub eta: Option<f64>,
    /// The maximum number of E-step iterations per document and pass
    pub iterations: usize,
    /// The mean change of gamma below which a document counts as converged
    pub gamma_threshold: f64,
    /// How fast old passes are forgotten: `rho = (offset + pass)^-decay`
    pub decay: f64,
    /// Slows down the first passes, see `decay`
    pub offset: f64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            num_topics: 5,
            passes: 10,
            random_state: None,
            alpha: None,
            eta: None,
            iterations: 50,
            gamma_threshold: 0.001,
            decay: 0.5,
            offset: 1.0,
        }
    }
}

impl LdaConfigBuilder {
    /// Builds and validates the config.
    pub fn build(&self) -> Result<LdaConfig, LdaError> {
        let config = self.build_unvalidated()?;
        config.validate()?;
        Ok(config)
    }
}

impl LdaConfig {
    pub fn builder() -> LdaConfigBuilder {
        LdaConfigBuilder::default()
    }

    /// Checks every parameter, the first invalid one is reported.
    pub fn validate(&self) -> Result<(), LdaError> {
        fn positive_prior(parameter: &'static str, value: Option<f64>) -> Result<(), LdaError> {
            match value {
                Some(value) if !(value.is_finite() && value > 0.0) => {
                    Err(LdaError::invalid(parameter, format!("must be a positive number but was {value}")))
                }
                _ => Ok(())
            }
        }

        if self.num_topics == 0 {
            return Err(LdaError::invalid("num_topics", "must be at least 1"));
        }
        if self.passes == 0 {
            return Err(LdaError::invalid("passes", "must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(LdaError::invalid("iterations", "must be at least 1"));
        }
        positive_prior("alpha", self.alpha)?;
        positive_prior("eta", self.eta)?;
        if !(self.gamma_threshold.is_finite() && self.gamma_threshold >= 0.0) {
            return Err(LdaError::invalid("gamma_threshold", format!("must not be negative but was {}", self.gamma_threshold)));
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(LdaError::invalid("decay", format!("must be in [0, 1] but was {}", self.decay)));
        }
        if !(self.offset.is_finite() && self.offset >= 1.0) {
            return Err(LdaError::invalid("offset", format!("must be at least 1 but was {}", self.offset)));
        }
        Ok(())
    }

    pub fn alpha_value(&self) -> f64 {
        self.alpha.unwrap_or(1.0 / self.num_topics as f64)
    }

    pub fn eta_value(&self) -> f64 {
        self.eta.unwrap_or(1.0 / self.num_topics as f64)
    }

    /// The weight of the statistics of `pass` when blended into the topics.
    pub fn rho(&self, pass: usize) -> f64 {
        (self.offset + pass as f64).powf(-self.decay)
    }
}

/// What happened in a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassReport {
    pub pass: usize,
    pub rho: f64,
    pub converged_documents: usize,
    pub documents: usize,
    /// The variational bound divided by the number of tokens
    pub per_word_log_likelihood: f64,
}

impl PassReport {
    /// The perplexity estimate `2^-bound`, as printed by gensim.
    pub fn perplexity(&self) -> f64 {
        (-self.per_word_log_likelihood).exp2()
    }
}

/// Fits LDA models by variational Bayes.
#[derive(Debug, Clone)]
pub struct LdaEstimator {
    config: LdaConfig,
}

impl LdaEstimator {
    pub fn new(config: LdaConfig) -> Result<Self, LdaError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LdaConfig {
        &self.config
    }

    /// Fits a model over `corpus`, always running all passes.
    pub fn fit<T: Clone>(&self, vocabulary: &Vocabulary<T>, corpus: &BowCorpus) -> Result<TopicModel<T>, LdaError> {
        self.fit_with_control(vocabulary, corpus, |_| ControlFlow::Continue(()))
    }

    /// Fits a model over `corpus`. After every pass `control` is called with the
    /// report of the pass, returning [ControlFlow::Break] ends the training early.
    pub fn fit_with_control<T, F>(
        &self,
        vocabulary: &Vocabulary<T>,
        corpus: &BowCorpus,
        mut control: F
    ) -> Result<TopicModel<T>, LdaError>
    where
        T: Clone,
        F: FnMut(&PassReport) -> ControlFlow<()>
    {
        if corpus.vocabulary_size() != vocabulary.len() {
            return Err(LdaError::VocabularyMismatch { corpus: corpus.vocabulary_size(), vocabulary: vocabulary.len() });
        }
        corpus.ensure_not_empty()?;

        let config = &self.config;
        let k = config.num_topics;
        let alpha = config.alpha_value();
        let eta = config.eta_value();
        let total_tokens = corpus.total_tokens() as f64;

        let mut rng = match config.random_state {
            None => StdRng::from_os_rng(),
            Some(seed) => StdRng::seed_from_u64(seed),
        };
        let init = Gamma::new(100.0, 1.0 / 100.0)?;

        log::info!(
            "Training a LDA model with {k} topics over {} documents, {} words and {} tokens.",
            corpus.len(), corpus.vocabulary_size(), total_tokens
        );

        let mut lambda = (0..k)
            .map(|_| (0..corpus.vocabulary_size()).map(|_| init.sample(&mut rng)).collect_vec())
            .collect_vec();

        for pass in 0..config.passes {
            let exp_e_log_beta = exp_dirichlet_expectation_2d(&lambda);
            let inference = DocumentInference::new(&exp_e_log_beta, alpha, config.iterations, config.gamma_threshold);
            let (step, sstats) = inference.run_with_statistics(corpus, &init, &mut rng);

            let rho = config.rho(pass);
            for ((lambda_k, sstats_k), exp_e_log_beta_k) in lambda.iter_mut().zip_eq(sstats.iter()).zip_eq(exp_e_log_beta.iter()) {
                for ((value, stat), beta) in lambda_k.iter_mut().zip_eq(sstats_k.iter()).zip_eq(exp_e_log_beta_k.iter()) {
                    *value = (1.0 - rho) * *value + rho * (eta + stat * beta);
                }
            }

            let report = PassReport {
                pass,
                rho,
                converged_documents: step.converged,
                documents: corpus.len(),
                per_word_log_likelihood: variational_bound(corpus, &lambda, &step.gamma, alpha, eta) / total_tokens
            };
            log::debug!("Pass {pass}: {}/{} documents converged.", report.converged_documents, report.documents);
            log::info!(
                "Pass {pass}: {:.3} per-word bound, {:.1} perplexity estimate.",
                report.per_word_log_likelihood,
                report.perplexity()
            );
            let last_pass = pass + 1 == config.passes;
            if last_pass && report.converged_documents * 10 < report.documents {
                log::warn!(
                    "Only {}/{} documents converged in the last pass, consider raising passes or iterations.",
                    report.converged_documents, report.documents
                );
            }
            if control(&report).is_break() {
                log::info!("Training stopped after pass {pass}.");
                break;
            }
        }

        let exp_e_log_beta = exp_dirichlet_expectation_2d(&lambda);
        let inference = DocumentInference::new(&exp_e_log_beta, alpha, config.iterations, config.gamma_threshold);
        let step = inference.run(corpus, &init, &mut rng);

        Ok(TopicModel::from_variational(vocabulary.clone(), corpus, lambda, step.gamma, alpha, eta))
    }
}
