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

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::ops::Range;
use std::slice::Iter;
use itertools::Itertools;
use serde::{Serialize, Serializer};
use crate::corpus::BagOfWords;
use crate::model::{WordFrequency, WordId};

/// A vocabulary mapping between an usize id and a specific object (word)
#[derive(Clone, Debug)]
pub struct Vocabulary<T> {
    id2entry: Vec<T>,
    entry2id: HashMap<T, WordId>,
}

impl<T> Vocabulary<T> {
    /// The number of entries in the vocabulary
    pub fn len(&self) -> usize {
        self.id2entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2entry.is_empty()
    }

    /// Get the ids
    pub fn ids(&self) -> Range<WordId> {
        0..self.id2entry.len()
    }

    /// Iterates over the words in the order of the ids.
    /// To get the ids use .enumerate()
    pub fn iter(&self) -> Iter<T> {
        self.id2entry.iter()
    }

    pub fn get_value_by_id(&self, id: WordId) -> Option<&T> {
        self.id2entry.get(id)
    }

    pub fn contains_id(&self, id: WordId) -> bool {
        id < self.id2entry.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.id2entry
    }
}

impl<T> Vocabulary<T> where T: Hash + Eq + Clone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty vocabulary but sets the [capacity] of the mappings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id2entry: Vec::with_capacity(capacity),
            entry2id: HashMap::with_capacity(capacity),
        }
    }

    /// Builds the vocabulary of a tokenized corpus.
    ///
    /// Ids are handed out in the order of the first occurrence, so the same
    /// document order always results in the same ids.
    pub fn from_documents<D>(documents: &[D]) -> Self where D: AsRef<[T]> {
        let mut vocabulary = Self::new();
        for document in documents {
            vocabulary.extend(document.as_ref().iter().cloned());
        }
        vocabulary
    }

    /// Adds the `value` to the vocabulary and returns the associated id
    pub fn add<V: Into<T>>(&mut self, value: V) -> WordId {
        match self.entry2id.entry(value.into()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = self.id2entry.len();
                self.id2entry.push(entry.key().clone());
                entry.insert(id);
                id
            }
        }
    }

    /// Retrieves the id for `word`
    pub fn get_id<Q: ?Sized>(&self, word: &Q) -> Option<WordId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq
    {
        self.entry2id.get(word).copied()
    }

    pub fn contains_value<Q: ?Sized>(&self, word: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq
    {
        self.entry2id.contains_key(word)
    }

    /// Counts the known words of `document`. Unknown words are skipped.
    pub fn doc_to_bow<Q>(&self, document: &[Q]) -> BagOfWords
    where
        T: Borrow<Q>,
        Q: Hash + Eq
    {
        let mut counts: HashMap<WordId, WordFrequency> = HashMap::with_capacity(document.len());
        for word_id in document.iter().filter_map(|word| self.get_id(word)) {
            *counts.entry(word_id).or_insert(0) += 1;
        }
        BagOfWords::from_sorted(counts.into_iter().sorted_unstable_by_key(|(word_id, _)| *word_id).collect())
    }
}

impl<T> Default for Vocabulary<T> {
    fn default() -> Self {
        Self {
            id2entry: Vec::new(),
            entry2id: HashMap::new(),
        }
    }
}

impl<T: Eq> PartialEq for Vocabulary<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id2entry == other.id2entry
    }
}

impl<T: Eq> Eq for Vocabulary<T> {}

impl<Q: Into<T>, T: Eq + Hash + Clone> Extend<Q> for Vocabulary<T> {
    fn extend<I: IntoIterator<Item=Q>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<Q: Into<T>, T: Eq + Hash + Clone> FromIterator<Q> for Vocabulary<T> {
    fn from_iter<I: IntoIterator<Item=Q>>(iter: I) -> Self {
        let mut vocabulary = Self::new();
        vocabulary.extend(iter);
        vocabulary
    }
}

impl<'a, T> IntoIterator for &'a Vocabulary<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.id2entry.iter()
    }
}

impl<T: Display> Display for Vocabulary<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vocabulary[{}]", self.id2entry.iter().join(", "))
    }
}

/// Serialized as the list of entries in id order.
impl<T: Serialize> Serialize for Vocabulary<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        self.id2entry.serialize(serializer)
    }
}


#[cfg(test)]
mod test {
    use super::Vocabulary;

    fn documents() -> Vec<Vec<String>> {
        vec![
            vec!["cat", "love", "fish"],
            vec!["dog", "love", "bone"],
            vec![],
            vec!["cat", "dog", "play", "cat"],
        ].into_iter().map(|doc| doc.into_iter().map(str::to_string).collect()).collect()
    }

    #[test]
    fn ids_follow_first_occurrence(){
        let voc: Vocabulary<String> = Vocabulary::from_documents(&documents());
        assert_eq!(6, voc.len());
        assert_eq!(
            vec!["cat", "love", "fish", "dog", "bone", "play"],
            voc.iter().map(String::as_str).collect::<Vec<_>>()
        );
        assert_eq!(Some(3), voc.get_id("dog"));
        assert_eq!(None, voc.get_id("and"));
        assert!(voc.contains_value("bone"));
        assert!(voc.contains_id(5));
        assert!(!voc.contains_id(6));
    }

    #[test]
    fn adding_twice_keeps_the_id(){
        let mut voc: Vocabulary<String> = Vocabulary::new();
        let a = voc.add("Test");
        let b = voc.add("Test2");
        assert_eq!(a, voc.add("Test"));
        assert_eq!(Some(&"Test2".to_string()), voc.get_value_by_id(b));
        assert_eq!("Vocabulary[Test, Test2]", voc.to_string());
    }

    #[test]
    fn bow_counts_and_sorts(){
        let docs = documents();
        let voc: Vocabulary<String> = Vocabulary::from_documents(&docs);
        let bow = voc.doc_to_bow(&docs[3]);
        assert_eq!(&[(0, 2), (3, 1), (5, 1)], bow.entries());
        assert!(voc.doc_to_bow(&docs[2]).is_empty());
        let unknown = voc.doc_to_bow(&["unicorn".to_string(), "cat".to_string()]);
        assert_eq!(&[(0, 1)], unknown.entries());
    }

    #[test]
    fn serializes_as_list(){
        let voc: Vocabulary<String> = ["b", "a", "b"].into_iter().collect();
        assert_eq!(r#"["b","a"]"#, serde_json::to_string(&voc).unwrap());
    }
}
