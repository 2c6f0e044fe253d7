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

use std::fmt::{Display, Formatter};
use std::iter::FusedIterator;
use std::ops::Range;
use itertools::Itertools;
use serde::Serialize;
use crate::model::{DocumentLength, DocumentTo, Probability, TopicId, TopicModel, TopicTo, WordFrequency, WordId, WordTo};
use crate::vocabulary::Vocabulary;

/// A term of a topic together with its weight in the topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTerm<'a, T> {
    pub word_id: WordId,
    pub term: &'a T,
    pub weight: Probability,
}

impl<T: Display> Display for RankedTerm<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}*\"{}\"", self.weight, self.term)
    }
}

/// A view on the best terms of every topic of a model.
///
/// Nothing is computed before iterating, and every call of [TopicReport::iter]
/// starts over at the first topic.
#[derive(Debug)]
pub struct TopicReport<'a, T> {
    model: &'a TopicModel<T>,
    top_n: usize,
}

impl<T> Clone for TopicReport<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TopicReport<'_, T> {}

impl<'a, T> TopicReport<'a, T> {
    pub(crate) fn new(model: &'a TopicModel<T>, top_n: usize) -> Self {
        Self { model, top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// The number of topics
    pub fn len(&self) -> usize {
        self.model.k()
    }

    pub fn is_empty(&self) -> bool {
        self.model.k() == 0
    }

    pub fn iter(&self) -> TopicReportIter<'a, T> {
        TopicReportIter {
            model: self.model,
            top_n: self.top_n,
            topics: self.model.topic_ids(),
        }
    }
}

impl<'a, T> IntoIterator for &TopicReport<'a, T> {
    type Item = (TopicId, Vec<RankedTerm<'a, T>>);
    type IntoIter = TopicReportIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Display> Display for TopicReport<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (topic_id, terms) in self.iter() {
            if topic_id != 0 {
                f.write_str("\n")?;
            }
            write!(f, "Topic {topic_id}: {}", terms.iter().join(" + "))?;
        }
        Ok(())
    }
}

/// Yields `(topic id, ranked terms)` for every topic in ascending id order.
#[derive(Debug)]
pub struct TopicReportIter<'a, T> {
    model: &'a TopicModel<T>,
    top_n: usize,
    topics: Range<TopicId>,
}

impl<T> Clone for TopicReportIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            model: self.model,
            top_n: self.top_n,
            topics: self.topics.clone(),
        }
    }
}

impl<'a, T> Iterator for TopicReportIter<'a, T> {
    type Item = (TopicId, Vec<RankedTerm<'a, T>>);

    fn next(&mut self) -> Option<Self::Item> {
        let topic_id = self.topics.next()?;
        Some((topic_id, self.model.top_terms(topic_id, self.top_n)?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.topics.size_hint()
    }
}

impl<T> ExactSizeIterator for TopicReportIter<'_, T> {}

impl<T> FusedIterator for TopicReportIter<'_, T> {}

/// Everything a pyLDAvis style renderer needs, serializable with serde.
#[derive(Debug, Serialize)]
pub struct VisualizationData<'a, T> {
    pub topic_term_dists: &'a TopicTo<WordTo<Probability>>,
    pub doc_topic_dists: &'a DocumentTo<TopicTo<Probability>>,
    pub doc_lengths: &'a DocumentTo<DocumentLength>,
    pub vocab: &'a Vocabulary<T>,
    pub term_frequency: &'a WordTo<WordFrequency>,
}


#[cfg(test)]
mod test {
    use crate::model::test::create_test_model;

    #[test]
    fn report_is_lazy_and_restartable(){
        let model = create_test_model();
        let report = model.report(2);
        let mut iter = report.iter();
        assert_eq!(2, iter.len());
        let (topic_id, terms) = iter.next().unwrap();
        assert_eq!(0, topic_id);
        assert_eq!(2, terms.len());
        assert_eq!(1, iter.len());

        let first: Vec<_> = report.iter().map(|(id, terms)| (id, terms.iter().map(|t| t.word_id).collect::<Vec<_>>())).collect();
        let second: Vec<_> = report.iter().map(|(id, terms)| (id, terms.iter().map(|t| t.word_id).collect::<Vec<_>>())).collect();
        assert_eq!(first, second);
        assert_eq!(vec![(0, vec![3, 1]), (1, vec![0, 1])], first);
    }

    #[test]
    fn report_displays_like_print_topics(){
        let model = create_test_model();
        assert_eq!(
            "Topic 0: 0.500*\"d\"\nTopic 1: 0.400*\"a\"",
            model.report(1).to_string()
        );
    }

    #[test]
    fn visualization_data_serializes(){
        let model = create_test_model();
        let json = serde_json::to_value(model.visualization_data()).unwrap();
        assert_eq!(serde_json::json!(["a", "b", "c", "d"]), json["vocab"]);
        assert_eq!(serde_json::json!([4, 2, 0]), json["doc_lengths"]);
        assert_eq!(serde_json::json!([1, 2, 2, 1]), json["term_frequency"]);
        assert_eq!(2, json["topic_term_dists"].as_array().unwrap().len());
        assert_eq!(3, json["doc_topic_dists"].as_array().unwrap().len());
    }
}
