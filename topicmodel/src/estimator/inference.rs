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

use itertools::Itertools;
use rand::Rng;
use rand_distr::{Distribution, Gamma};
use crate::corpus::{BagOfWords, BowCorpus};
use crate::math::{dirichlet_bound, dirichlet_expectation_1d, exp_dirichlet_expectation, log_sum_exp};
use crate::model::{DocumentTo, TopicTo, WordTo};

/// The result of one E-step over a corpus.
pub(crate) struct EStep {
    /// The variational topic parameters per document
    pub gamma: DocumentTo<TopicTo<f64>>,
    pub converged: usize,
}

/// Infers the topic mixtures of documents against fixed topics.
/// Implemented like gensim, with the same update rules.
pub(crate) struct DocumentInference<'a> {
    exp_e_log_beta: &'a [Vec<f64>],
    alpha: f64,
    iterations: usize,
    gamma_threshold: f64,
}

impl<'a> DocumentInference<'a> {
    pub fn new(exp_e_log_beta: &'a [Vec<f64>], alpha: f64, iterations: usize, gamma_threshold: f64) -> Self {
        Self { exp_e_log_beta, alpha, iterations, gamma_threshold }
    }

    fn k(&self) -> usize {
        self.exp_e_log_beta.len()
    }

    fn vocabulary_size(&self) -> usize {
        self.exp_e_log_beta.first().map_or(0, Vec::len)
    }

    /// Infers the topic mixtures of every document.
    pub fn run<R: Rng + ?Sized>(&self, corpus: &BowCorpus, init: &Gamma<f64>, rng: &mut R) -> EStep {
        self.run_documents(corpus, init, rng, None)
    }

    /// Like [DocumentInference::run] but also collects the expected topic-word
    /// counts, not yet scaled by exp(E[log beta]).
    pub fn run_with_statistics<R: Rng + ?Sized>(
        &self,
        corpus: &BowCorpus,
        init: &Gamma<f64>,
        rng: &mut R
    ) -> (EStep, TopicTo<WordTo<f64>>) {
        let mut sstats = vec![vec![0.0; self.vocabulary_size()]; self.k()];
        let step = self.run_documents(corpus, init, rng, Some(&mut sstats));
        (step, sstats)
    }

    fn run_documents<R: Rng + ?Sized>(
        &self,
        corpus: &BowCorpus,
        init: &Gamma<f64>,
        rng: &mut R,
        mut sstats: Option<&mut TopicTo<WordTo<f64>>>
    ) -> EStep {
        let mut converged = 0;

        let gamma = corpus.iter().map(|doc| {
            let gamma_d = (0..self.k()).map(|_| init.sample(&mut *rng)).collect_vec();
            let (gamma_d, doc_converged) = self.infer_document(doc, gamma_d, sstats.as_deref_mut());
            if doc_converged {
                converged += 1;
            }
            gamma_d
        }).collect_vec();

        EStep { gamma, converged }
    }

    /// Iterates the update of a single document until the mean change of
    /// gamma drops below the threshold or the iterations are used up.
    fn infer_document(
        &self,
        doc: &BagOfWords,
        mut gamma_d: Vec<f64>,
        sstats: Option<&mut TopicTo<WordTo<f64>>>
    ) -> (Vec<f64>, bool) {
        fn calculate_phi_norm(exp_e_log_theta_d: &[f64], exp_e_log_beta_d: &[Vec<f64>], words: usize) -> Vec<f64> {
            (0..words).map(|pos| {
                exp_e_log_theta_d.iter()
                    .zip_eq(exp_e_log_beta_d.iter())
                    .map(|(theta, beta)| theta * beta[pos])
                    .sum::<f64>() + f64::EPSILON
            }).collect()
        }

        fn weighted_counts(counts: &[f64], phinorm: &[f64]) -> Vec<f64> {
            counts.iter().zip_eq(phinorm.iter()).map(|(ct, norm)| ct / norm).collect()
        }

        let (ids, cts): (Vec<_>, Vec<_>) = doc.iter().map(|(id, ct)| (*id, *ct as f64)).unzip();
        let exp_e_log_beta_d = self.exp_e_log_beta.iter()
            .map(|topic| ids.iter().map(|id| topic[*id]).collect_vec())
            .collect_vec();

        let mut exp_e_log_theta_d = exp_dirichlet_expectation(&gamma_d);
        let mut phinorm = calculate_phi_norm(&exp_e_log_theta_d, &exp_e_log_beta_d, ids.len());
        let mut converged = false;

        for _ in 0..self.iterations {
            let weighted = weighted_counts(&cts, &phinorm);
            let next_gamma = exp_e_log_theta_d.iter()
                .zip_eq(exp_e_log_beta_d.iter())
                .map(|(theta, beta)| {
                    self.alpha + theta * beta.iter().zip_eq(weighted.iter()).map(|(b, w)| b * w).sum::<f64>()
                })
                .collect_vec();
            let last_gamma = std::mem::replace(&mut gamma_d, next_gamma);
            exp_e_log_theta_d = exp_dirichlet_expectation(&gamma_d);
            phinorm = calculate_phi_norm(&exp_e_log_theta_d, &exp_e_log_beta_d, ids.len());
            if crate::math::mean_absolute_difference(&gamma_d, &last_gamma) < self.gamma_threshold {
                converged = true;
                break;
            }
        }

        if let Some(sstats) = sstats {
            let weighted = weighted_counts(&cts, &phinorm);
            for (row, theta) in sstats.iter_mut().zip_eq(exp_e_log_theta_d.iter()) {
                for (id, w) in ids.iter().zip_eq(weighted.iter()) {
                    row[*id] += theta * w;
                }
            }
        }

        (gamma_d, converged)
    }
}

/// The variational lower bound of the log likelihood of `corpus`.
pub(crate) fn variational_bound(
    corpus: &BowCorpus,
    lambda: &[Vec<f64>],
    gamma: &[Vec<f64>],
    alpha: f64,
    eta: f64,
) -> f64 {
    let e_log_beta = lambda.iter().map(|row| dirichlet_expectation_1d(row).collect_vec()).collect_vec();
    let mut score = 0.0;
    let mut scratch = vec![0.0; lambda.len()];

    for (doc, gamma_d) in corpus.iter().zip_eq(gamma.iter()) {
        let e_log_theta_d = dirichlet_expectation_1d(gamma_d).collect_vec();
        for (id, ct) in doc.iter() {
            for (topic_id, value) in scratch.iter_mut().enumerate() {
                *value = e_log_theta_d[topic_id] + e_log_beta[topic_id][*id];
            }
            score += *ct as f64 * log_sum_exp(&scratch);
        }
        score += dirichlet_bound(alpha, gamma_d, &e_log_theta_d);
    }

    score + lambda.iter()
        .zip_eq(e_log_beta.iter())
        .map(|(lambda_k, e_log_beta_k)| dirichlet_bound(eta, lambda_k, e_log_beta_k))
        .sum::<f64>()
}
