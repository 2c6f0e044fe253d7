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

use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, LazyLock};
use fst::Set;

/// The english stop words as distributed with the NLTK corpora.
pub const ENGLISH_STOP_WORDS: [&str; 179] = [
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

static ENGLISH: LazyLock<Arc<StopWordList>> = LazyLock::new(|| {
    Arc::new(
        StopWordList::from_words(ENGLISH_STOP_WORDS)
            .expect("A sorted in-memory set can always be built.")
    )
});

/// An immutable set of stop words backed by an fst.
#[derive(Clone)]
pub struct StopWordList {
    set: Set<Vec<u8>>
}

impl StopWordList {
    /// Builds a list from arbitrary (unsorted, possibly duplicated) words.
    pub fn from_words<I, S>(words: I) -> Result<Self, fst::Error>
    where
        I: IntoIterator<Item=S>,
        S: AsRef<str>
    {
        let sorted: BTreeSet<String> = words
            .into_iter()
            .map(|value| value.as_ref().to_lowercase())
            .collect();
        Ok(Self { set: Set::from_iter(sorted)? })
    }

    /// The shared english list. Built on first access and read-only afterwards.
    pub fn english() -> Arc<StopWordList> {
        ENGLISH.clone()
    }

    /// Returns a new list containing this list and `additional`.
    pub fn with_additional<I, S>(&self, additional: I) -> Result<Self, fst::Error>
    where
        I: IntoIterator<Item=S>,
        S: AsRef<str>
    {
        let mut stream = self.set.stream();
        let mut words = Vec::with_capacity(self.set.len());
        while let Some(word) = fst::Streamer::next(&mut stream) {
            words.push(String::from_utf8_lossy(word).into_owned());
        }
        words.extend(additional.into_iter().map(|value| value.as_ref().to_string()));
        Self::from_words(words)
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl Debug for StopWordList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopWordList").field("len", &self.set.len()).finish()
    }
}
