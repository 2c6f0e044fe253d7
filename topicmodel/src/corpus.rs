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

use std::hash::Hash;
use std::slice::Iter;
use serde::Serialize;
use crate::errors::LdaError;
use crate::model::{DocumentId, DocumentLength, DocumentTo, WordFrequency, WordId, WordTo};
use crate::vocabulary::Vocabulary;

/// The sparse term frequencies of a single document.
/// The entries are sorted by the word id and every count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BagOfWords {
    entries: Vec<(WordId, WordFrequency)>,
}

impl BagOfWords {
    /// Expects the entries to be sorted by word id without duplicates.
    pub(crate) fn from_sorted(entries: Vec<(WordId, WordFrequency)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries }
    }

    /// Creates a bag from arbitrary pairs, merging duplicate ids and dropping zero counts.
    pub fn from_pairs(pairs: impl IntoIterator<Item=(WordId, WordFrequency)>) -> Self {
        let mut entries: Vec<(WordId, WordFrequency)> = pairs.into_iter().filter(|(_, count)| *count > 0).collect();
        entries.sort_unstable_by_key(|(word_id, _)| *word_id);
        entries.dedup_by(|next, kept| {
            if next.0 == kept.0 {
                kept.1 += next.1;
                true
            } else {
                false
            }
        });
        Self { entries }
    }

    pub fn entries(&self) -> &[(WordId, WordFrequency)] {
        &self.entries
    }

    pub fn iter(&self) -> Iter<(WordId, WordFrequency)> {
        self.entries.iter()
    }

    /// The number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of tokens in the document
    pub fn total(&self) -> DocumentLength {
        self.entries.iter().map(|(_, count)| *count).sum()
    }

    pub fn get(&self, word_id: WordId) -> Option<WordFrequency> {
        self.entries
            .binary_search_by_key(&word_id, |(id, _)| *id)
            .ok()
            .map(|pos| self.entries[pos].1)
    }

    pub fn max_word_id(&self) -> Option<WordId> {
        self.entries.last().map(|(word_id, _)| *word_id)
    }
}

impl<'a> IntoIterator for &'a BagOfWords {
    type Item = &'a (WordId, WordFrequency);
    type IntoIter = Iter<'a, (WordId, WordFrequency)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The bag of words representation of a whole corpus, aligned by document index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowCorpus {
    documents: DocumentTo<BagOfWords>,
    vocabulary_size: usize,
}

impl BowCorpus {
    /// Creates a corpus for a vocabulary of `vocabulary_size` words.
    /// Fails if any document references an id outside the vocabulary.
    pub fn new(documents: Vec<BagOfWords>, vocabulary_size: usize) -> Result<Self, LdaError> {
        for (document_id, document) in documents.iter().enumerate() {
            if let Some(word_id) = document.max_word_id() {
                if word_id >= vocabulary_size {
                    return Err(LdaError::UnknownWordId { document_id, word_id, vocabulary_size })
                }
            }
        }
        Ok(Self { documents, vocabulary_size })
    }

    /// Builds the bag of words corpus of `documents` against `vocabulary`.
    pub fn from_documents<T, D>(vocabulary: &Vocabulary<T>, documents: &[D]) -> Self
    where
        T: Hash + Eq + Clone,
        D: AsRef<[T]>
    {
        Self {
            documents: documents.iter().map(|document| vocabulary.doc_to_bow(document.as_ref())).collect(),
            vocabulary_size: vocabulary.len()
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn get(&self, document_id: DocumentId) -> Option<&BagOfWords> {
        self.documents.get(document_id)
    }

    pub fn iter(&self) -> Iter<BagOfWords> {
        self.documents.iter()
    }

    pub fn documents(&self) -> &[BagOfWords] {
        &self.documents
    }

    pub fn document_lengths(&self) -> DocumentTo<DocumentLength> {
        self.documents.iter().map(BagOfWords::total).collect()
    }

    /// The corpus wide count of every word id.
    pub fn term_frequencies(&self) -> WordTo<WordFrequency> {
        let mut frequencies = vec![0; self.vocabulary_size];
        for (word_id, count) in self.documents.iter().flat_map(BagOfWords::iter) {
            frequencies[*word_id] += *count;
        }
        frequencies
    }

    pub fn total_tokens(&self) -> u64 {
        self.documents.iter().map(BagOfWords::total).sum()
    }

    /// Fails with [LdaError::EmptyCorpus] if there is nothing to learn from.
    pub fn ensure_not_empty(&self) -> Result<(), LdaError> {
        let tokens = self.total_tokens();
        if self.documents.is_empty() || self.vocabulary_size == 0 || tokens == 0 {
            Err(LdaError::EmptyCorpus {
                documents: self.documents.len(),
                vocabulary_size: self.vocabulary_size,
                tokens
            })
        } else {
            Ok(())
        }
    }
}

impl<'a> IntoIterator for &'a BowCorpus {
    type Item = &'a BagOfWords;
    type IntoIter = Iter<'a, BagOfWords>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Builds the vocabulary and the aligned bag of words corpus in one go.
pub fn build_corpus<T, D>(documents: &[D]) -> (Vocabulary<T>, BowCorpus)
where
    T: Hash + Eq + Clone,
    D: AsRef<[T]>
{
    let vocabulary = Vocabulary::from_documents(documents);
    let corpus = BowCorpus::from_documents(&vocabulary, documents);
    log::debug!("Built a corpus of {} documents over {} words.", corpus.len(), vocabulary.len());
    (vocabulary, corpus)
}


#[cfg(test)]
mod test {
    use crate::corpus::{build_corpus, BagOfWords, BowCorpus};
    use crate::errors::LdaError;

    fn tokens(docs: &[&[&str]]) -> Vec<Vec<String>> {
        docs.iter().map(|doc| doc.iter().map(|s| s.to_string()).collect()).collect()
    }

    #[test]
    fn corpus_is_aligned_with_the_documents(){
        let docs = tokens(&[&["cat", "love", "fish"], &[], &["dog", "love", "love"]]);
        let (voc, corpus) = build_corpus(&docs);
        assert_eq!(3, corpus.len());
        assert_eq!(voc.len(), corpus.vocabulary_size());
        assert!(corpus.get(1).unwrap().is_empty());
        assert_eq!(vec![3, 0, 3], corpus.document_lengths());
        assert_eq!(vec![1, 3, 1, 1], corpus.term_frequencies());
        assert_eq!(6, corpus.total_tokens());
        assert_eq!(Some(2), corpus.get(2).unwrap().get(voc.get_id("love").unwrap()));
        for bow in &corpus {
            assert!(bow.iter().all(|(word_id, count)| *word_id < voc.len() && *count > 0));
        }
        assert!(corpus.ensure_not_empty().is_ok());
    }

    #[test]
    fn pairs_are_merged(){
        let bow = BagOfWords::from_pairs([(4, 1), (1, 2), (4, 3), (2, 0)]);
        assert_eq!(&[(1, 2), (4, 4)], bow.entries());
        assert_eq!(6, bow.total());
        assert_eq!(None, bow.get(2));
    }

    #[test]
    fn unknown_ids_are_rejected(){
        let result = BowCorpus::new(vec![BagOfWords::from_pairs([(0, 1)]), BagOfWords::from_pairs([(3, 1)])], 3);
        assert!(matches!(result, Err(LdaError::UnknownWordId { document_id: 1, word_id: 3, vocabulary_size: 3 })));
    }

    #[test]
    fn empty_corpora_are_detected(){
        let (_, corpus) = build_corpus::<String, Vec<String>>(&[]);
        assert!(matches!(corpus.ensure_not_empty(), Err(LdaError::EmptyCorpus { documents: 0, .. })));
        let (_, corpus) = build_corpus(&tokens(&[&[], &[]]));
        assert!(matches!(corpus.ensure_not_empty(), Err(LdaError::EmptyCorpus { documents: 2, vocabulary_size: 0, tokens: 0 })));
    }
}
