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

mod views;

pub use views::*;

use std::fmt::{Display, Formatter};
use std::io;
use std::io::Write;
use std::ops::Range;
use itertools::Itertools;
use crate::corpus::BowCorpus;
use crate::errors::LdaError;
use crate::estimator::variational_bound;
use crate::math::normalized;
use crate::vocabulary::Vocabulary;

pub type TopicTo<T> = Vec<T>;
pub type WordTo<T> = Vec<T>;
pub type DocumentTo<T> = Vec<T>;
pub type Probability = f64;

pub type WordId = usize;
pub type TopicId = usize;
pub type DocumentId = usize;
pub type WordFrequency = u64;
pub type DocumentLength = u64;

/// The variational parameters the distributions were derived from.
#[derive(Debug, Clone)]
struct Variational {
    // Row = Topic, Col = Word
    lambda: TopicTo<WordTo<f64>>,
    // Row = Document, Col = Topic
    gamma: DocumentTo<TopicTo<f64>>,
    alpha: f64,
    eta: f64,
}

/// A fitted topic model.
///
/// Read only after fitting, the reporting methods never change it.
#[derive(Debug, Clone)]
pub struct TopicModel<T> {
    // topic to word
    // Row = Topic
    // Col = Word
    topics: TopicTo<WordTo<Probability>>,
    vocabulary: Vocabulary<T>,
    used_vocab_frequency: WordTo<WordFrequency>,
    // Row = Document
    // Col = Topic
    doc_topic_distributions: DocumentTo<TopicTo<Probability>>,
    document_lengths: DocumentTo<DocumentLength>,
    variational: Variational,
}

impl<T> TopicModel<T> {
    /// Probabilities below this are hidden by [TopicModel::document_topics_above] in gensim.
    pub const DEFAULT_MINIMUM_PROBABILITY: Probability = 0.01;

    pub(crate) fn from_variational(
        vocabulary: Vocabulary<T>,
        corpus: &BowCorpus,
        lambda: TopicTo<WordTo<f64>>,
        gamma: DocumentTo<TopicTo<f64>>,
        alpha: f64,
        eta: f64,
    ) -> Self {
        Self {
            topics: lambda.iter().map(|row| normalized(row)).collect(),
            vocabulary,
            used_vocab_frequency: corpus.term_frequencies(),
            doc_topic_distributions: gamma.iter().map(|row| normalized(row)).collect(),
            document_lengths: corpus.document_lengths(),
            variational: Variational { lambda, gamma, alpha, eta },
        }
    }

    /// The number of topics
    pub fn k(&self) -> usize {
        self.topics.len()
    }

    pub fn topic_ids(&self) -> Range<TopicId> {
        0..self.topics.len()
    }

    pub fn contains_topic_id(&self, topic_id: TopicId) -> bool {
        topic_id < self.topics.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary<T> {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// The topic-word distributions, K rows of V probabilities.
    pub fn topics(&self) -> &TopicTo<WordTo<Probability>> {
        &self.topics
    }

    pub fn topic(&self, topic_id: TopicId) -> Option<&[Probability]> {
        self.topics.get(topic_id).map(Vec::as_slice)
    }

    pub fn get_probability(&self, topic_id: TopicId, word_id: WordId) -> Option<Probability> {
        self.topics.get(topic_id)?.get(word_id).copied()
    }

    /// The document-topic distributions, N rows of K probabilities.
    pub fn doc_topic_distributions(&self) -> &DocumentTo<TopicTo<Probability>> {
        &self.doc_topic_distributions
    }

    pub fn document_count(&self) -> usize {
        self.doc_topic_distributions.len()
    }

    pub fn document_lengths(&self) -> &DocumentTo<DocumentLength> {
        &self.document_lengths
    }

    /// The corpus wide frequency of every word
    pub fn used_vocab_frequency(&self) -> &WordTo<WordFrequency> {
        &self.used_vocab_frequency
    }

    pub fn alpha(&self) -> f64 {
        self.variational.alpha
    }

    pub fn eta(&self) -> f64 {
        self.variational.eta
    }

    /// The topic mixture of a document.
    pub fn document_topics(&self, document_id: DocumentId) -> Option<&[Probability]> {
        self.doc_topic_distributions.get(document_id).map(Vec::as_slice)
    }

    /// The topics of a document with a probability above `minimum_probability`.
    pub fn document_topics_above(&self, document_id: DocumentId, minimum_probability: Probability) -> Option<Vec<(TopicId, Probability)>> {
        Some(
            self.document_topics(document_id)?
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, probability)| *probability > minimum_probability)
                .collect()
        )
    }

    /// The most probable topic of a document, the lowest id wins a tie.
    pub fn dominant_topic(&self, document_id: DocumentId) -> Option<(TopicId, Probability)> {
        self.document_topics(document_id)?
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(TopicId, Probability)>, (topic_id, probability)| {
                match best {
                    Some((_, best_probability)) if best_probability >= probability => best,
                    _ => Some((topic_id, probability))
                }
            })
    }

    /// The per-word variational bound of the training `corpus`, like
    /// gensim's `log_perplexity`. The perplexity is `2^-bound`.
    pub fn log_perplexity(&self, corpus: &BowCorpus) -> Result<f64, LdaError> {
        if corpus.vocabulary_size() != self.vocabulary.len() {
            return Err(LdaError::VocabularyMismatch { corpus: corpus.vocabulary_size(), vocabulary: self.vocabulary.len() });
        }
        if corpus.len() != self.document_count() {
            return Err(LdaError::DocumentMismatch { corpus: corpus.len(), model: self.document_count() });
        }
        corpus.ensure_not_empty()?;
        let Variational { lambda, gamma, alpha, eta } = &self.variational;
        Ok(variational_bound(corpus, lambda, gamma, *alpha, *eta) / corpus.total_tokens() as f64)
    }

    /// The `top_n` terms of every topic. See [TopicReport].
    pub fn report(&self, top_n: usize) -> TopicReport<T> {
        TopicReport::new(self, top_n)
    }

    /// The `top_n` terms of a single topic, sorted by descending weight.
    pub fn top_terms(&self, topic_id: TopicId, top_n: usize) -> Option<Vec<RankedTerm<T>>> {
        let topic = self.topics.get(topic_id)?;
        Some(
            topic
                .iter()
                .enumerate()
                .sorted_unstable_by(|(a_id, a), (b_id, b)| b.total_cmp(a).then(a_id.cmp(b_id)))
                .take(top_n)
                .map(|(word_id, weight)| RankedTerm {
                    word_id,
                    term: self.vocabulary.get_value_by_id(word_id).expect("Every topic column has a word!"),
                    weight: *weight
                })
                .collect()
        )
    }

    /// The inputs of a pyLDAvis style visualization.
    pub fn visualization_data(&self) -> VisualizationData<T> {
        VisualizationData {
            topic_term_dists: &self.topics,
            doc_topic_dists: &self.doc_topic_distributions,
            doc_lengths: &self.document_lengths,
            vocab: &self.vocabulary,
            term_frequency: &self.used_vocab_frequency,
        }
    }
}

impl<T: Display> TopicModel<T> {
    /// Writes one line per topic with its `n` best terms.
    pub fn show_to(&self, n: usize, out: &mut impl Write) -> io::Result<()> {
        for (topic_id, terms) in self.report(n).iter() {
            writeln!(out, "Topic {topic_id}: {}", terms.iter().join(" + "))?;
        }
        Ok(())
    }

    pub fn show(&self, n: usize) -> io::Result<()> {
        self.show_to(n, &mut io::stdout().lock())
    }

    pub fn show_10(&self) -> io::Result<()> {
        self.show(10)
    }
}

impl<T: Display> Display for TopicModel<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.report(10))
    }
}


#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use crate::corpus::{build_corpus, BagOfWords, BowCorpus};
    use crate::errors::LdaError;
    use crate::model::TopicModel;
    use crate::vocabulary::Vocabulary;

    pub(super) fn create_test_model() -> TopicModel<String> {
        let docs: Vec<Vec<String>> = vec![
            vec!["a", "b", "b", "c"],
            vec!["c", "d"],
            vec![],
        ].into_iter().map(|doc| doc.into_iter().map(str::to_string).collect()).collect();
        let (voc, corpus) = build_corpus(&docs);
        TopicModel::from_variational(
            voc,
            &corpus,
            vec![
                vec![1.0, 2.0, 2.0, 5.0],
                vec![4.0, 3.0, 2.0, 1.0],
            ],
            vec![
                vec![3.0, 1.0],
                vec![1.0, 1.0],
                vec![0.5, 1.5],
            ],
            0.5,
            0.5
        )
    }

    #[test]
    fn distributions_are_normalized(){
        let model = create_test_model();
        assert_eq!(2, model.k());
        assert_eq!(4, model.vocabulary_size());
        assert_relative_eq!(0.5, model.get_probability(0, 3).unwrap());
        assert_relative_eq!(0.4, model.get_probability(1, 0).unwrap());
        assert_eq!(&[0.75, 0.25], model.document_topics(0).unwrap());
        assert_eq!(&vec![4, 2, 0], model.document_lengths());
        assert_eq!(&vec![1, 2, 2, 1], model.used_vocab_frequency());
        assert!(model.document_topics(3).is_none());
    }

    #[test]
    fn document_topic_queries(){
        let model = create_test_model();
        assert_eq!(Some((0, 0.75)), model.dominant_topic(0));
        // ties go to the lower topic id
        assert_eq!(Some((0, 0.5)), model.dominant_topic(1));
        assert_eq!(Some((1, 0.75)), model.dominant_topic(2));
        assert_eq!(Some(vec![(1, 0.75)]), model.document_topics_above(2, 0.3));
        assert_eq!(2, model.document_topics_above(1, TopicModel::<String>::DEFAULT_MINIMUM_PROBABILITY).unwrap().len());
    }

    #[test]
    fn top_terms_break_ties_by_id(){
        let model = create_test_model();
        let terms = model.top_terms(0, 3).unwrap();
        assert_eq!(vec![3, 1, 2], terms.iter().map(|term| term.word_id).collect::<Vec<_>>());
        assert_eq!("d", terms[0].term);
        assert!(model.top_terms(2, 3).is_none());
        assert_eq!(4, model.top_terms(1, 100).unwrap().len());
    }

    #[test]
    fn shows_topics(){
        let model = create_test_model();
        let mut out = Vec::new();
        model.show_to(2, &mut out).unwrap();
        assert_eq!(
            "Topic 0: 0.500*\"d\" + 0.200*\"b\"\nTopic 1: 0.400*\"a\" + 0.300*\"b\"\n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn log_perplexity_checks_the_corpus(){
        let model = create_test_model();
        let voc: Vocabulary<String> = ["a", "b", "c", "d"].into_iter().collect();
        let corpus = BowCorpus::from_documents(&voc, &[
            vec!["a".to_string(), "b".to_string(), "b".to_string(), "c".to_string()],
            vec!["c".to_string(), "d".to_string()],
            vec![],
        ]);
        let bound = model.log_perplexity(&corpus).unwrap();
        assert!(bound.is_finite());
        assert!(bound < 0.0);

        let short = BowCorpus::new(vec![BagOfWords::from_pairs([(0, 1)])], 4).unwrap();
        assert!(matches!(model.log_perplexity(&short), Err(LdaError::DocumentMismatch { corpus: 1, model: 3 })));
        let narrow = BowCorpus::new(vec![BagOfWords::default(); 3], 2).unwrap();
        assert!(matches!(model.log_perplexity(&narrow), Err(LdaError::VocabularyMismatch { corpus: 2, vocabulary: 4 })));
    }
}
