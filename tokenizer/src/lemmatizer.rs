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

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Debug, Formatter};
use std::io::BufRead;
use std::sync::{Arc, LazyLock};
use fst::Set;
use itertools::Itertools;

/// The bundled noun lemmas in the layout of WordNet's `index.noun`.
const BUNDLED_LEMMAS: &str = include_str!("../data/noun_lemmas.txt");
/// The bundled irregular plurals in the layout of WordNet's `noun.exc`.
const BUNDLED_EXCEPTIONS: &str = include_str!("../data/noun_exceptions.txt");

/// The noun detachment rules of WordNet morphy.
const SUFFIX_RULES: [(&str, &str); 8] = [
    ("s", ""), ("ses", "s"), ("xes", "x"), ("zes", "z"),
    ("ches", "ch"), ("shes", "sh"), ("men", "man"), ("ies", "y"),
];

static ENGLISH: LazyLock<Arc<NounDictionary>> = LazyLock::new(|| {
    Arc::new(
        NounDictionary::from_wordnet(BUNDLED_LEMMAS.as_bytes(), BUNDLED_EXCEPTIONS.as_bytes())
            .expect("The bundled noun dictionary is readable from memory.")
    )
});

/// The known noun lemmas and the irregular forms pointing to them.
#[derive(Clone)]
pub struct NounDictionary {
    lemmas: Set<Vec<u8>>,
    exceptions: HashMap<String, Vec<String>>,
}

impl NounDictionary {
    /// Reads a dictionary in the WordNet database formats.
    ///
    /// `index` is read like `index.noun`: lines starting with a space are
    /// skipped, every other line starts with a lemma. `exceptions` is read like
    /// `noun.exc`: an inflected form followed by its base forms.
    pub fn from_wordnet<I: BufRead, E: BufRead>(index: I, exceptions: E) -> Result<Self, fst::Error> {
        let mut lemmas = BTreeSet::new();
        for line in index.lines() {
            let line = line?;
            if line.starts_with(' ') {
                continue;
            }
            if let Some(lemma) = line.split_whitespace().next() {
                lemmas.insert(lemma.to_lowercase());
            }
        }

        let mut exception_map: HashMap<String, Vec<String>> = HashMap::new();
        for line in exceptions.lines() {
            let line = line?;
            let mut fields = line.split_whitespace().map(str::to_lowercase);
            let Some(inflected) = fields.next() else {
                continue;
            };
            let bases = fields.collect_vec();
            // every base of noun.exc is a lemma of index.noun
            lemmas.extend(bases.iter().cloned());
            exception_map.entry(inflected).or_default().extend(bases);
        }

        Ok(Self { lemmas: Set::from_iter(lemmas)?, exceptions: exception_map })
    }

    /// The bundled english dictionary. Built on first access and read-only afterwards.
    pub fn english() -> Arc<NounDictionary> {
        ENGLISH.clone()
    }

    #[inline]
    pub fn contains(&self, lemma: &str) -> bool {
        self.lemmas.contains(lemma)
    }

    /// The base forms of an irregular `word`.
    pub fn exceptions(&self, word: &str) -> Option<&[String]> {
        self.exceptions.get(word).map(Vec::as_slice)
    }

    /// The number of lemmas
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl Debug for NounDictionary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NounDictionary")
            .field("lemmas", &self.lemmas.len())
            .field("exceptions", &self.exceptions.len())
            .finish()
    }
}

/// A noun lemmatizer working like WordNet morphy.
///
/// Words are expected in lower case. Irregular forms are looked up first,
/// otherwise the word and its detached forms are checked against the
/// dictionary and the shortest known one wins. A word without any known
/// form is returned unchanged.
#[derive(Debug, Clone)]
pub struct NounLemmatizer {
    dictionary: Arc<NounDictionary>,
}

impl Default for NounLemmatizer {
    fn default() -> Self {
        Self::new(NounDictionary::english())
    }
}

impl NounLemmatizer {
    pub fn new(dictionary: Arc<NounDictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &NounDictionary {
        &self.dictionary
    }

    pub fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        fn detach(forms: &[String]) -> Vec<String> {
            forms.iter()
                .flat_map(|form| {
                    SUFFIX_RULES.iter().filter_map(move |(suffix, replacement)| {
                        form.strip_suffix(suffix).map(|stem| format!("{stem}{replacement}"))
                    })
                })
                .collect()
        }

        let shortest_known = |candidates: Vec<String>| -> Option<String> {
            candidates.into_iter()
                .filter(|candidate| self.dictionary.contains(candidate))
                .min_by_key(String::len)
        };

        let found = if let Some(bases) = self.dictionary.exceptions(word) {
            shortest_known(std::iter::once(word.to_string()).chain(bases.iter().cloned()).collect())
        } else {
            let mut forms = detach(&[word.to_string()]);
            let mut found = shortest_known(std::iter::once(word.to_string()).chain(forms.iter().cloned()).collect());
            while found.is_none() && !forms.is_empty() {
                forms = detach(&forms);
                found = shortest_known(forms.clone());
            }
            found
        };

        match found {
            Some(lemma) if lemma != word => Cow::Owned(lemma),
            _ => Cow::Borrowed(word),
        }
    }
}


#[cfg(test)]
mod test {
    use std::sync::Arc;
    use super::{NounDictionary, NounLemmatizer};

    fn lemma(word: &str) -> String {
        NounLemmatizer::default().lemmatize(word).into_owned()
    }

    #[test]
    fn regular_plurals_lose_their_suffix(){
        assert_eq!("cat", lemma("cats"));
        assert_eq!("dog", lemma("dogs"));
        assert_eq!("bone", lemma("bones"));
        assert_eq!("house", lemma("houses"));
        assert_eq!("wave", lemma("waves"));
        assert_eq!("movie", lemma("movies"));
        assert_eq!("woman", lemma("women"));
    }

    #[test]
    fn sibilant_plurals_drop_es(){
        assert_eq!("class", lemma("classes"));
        assert_eq!("process", lemma("processes"));
        assert_eq!("box", lemma("boxes"));
        assert_eq!("approach", lemma("approaches"));
        assert_eq!("wish", lemma("wishes"));
        assert_eq!("bus", lemma("buses"));
    }

    #[test]
    fn ies_becomes_y(){
        assert_eq!("study", lemma("studies"));
        assert_eq!("policy", lemma("policies"));
        assert_eq!("tie", lemma("ties"));
    }

    #[test]
    fn irregular_forms_come_from_the_exceptions(){
        assert_eq!("child", lemma("children"));
        assert_eq!("analysis", lemma("analyses"));
        assert_eq!("criterion", lemma("criteria"));
        assert_eq!("cortex", lemma("cortices"));
        assert_eq!("quiz", lemma("quizzes"));
        assert_eq!("goose", lemma("geese"));
    }

    #[test]
    fn lemmas_ending_in_s_stay(){
        for word in ["diabetes", "rabies", "herpes", "pancreas", "analysis", "corpus", "series", "glass", "gas", "news"] {
            assert_eq!(word, lemma(word));
        }
    }

    #[test]
    fn unknown_words_stay(){
        for word in ["various", "always", "perhaps", "love", "fish", "play", "buried"] {
            assert_eq!(word, lemma(word));
        }
    }

    #[test]
    fn can_load_wordnet_files(){
        let index = "  1 license header\n  2 more header\nabacus n 1 0 1 0 02666196\nhuntington n 1 0 1 0 11063118\n";
        let exceptions = "abaci abacus\n\nhuntingtons huntington\n";
        let dictionary = NounDictionary::from_wordnet(index.as_bytes(), exceptions.as_bytes()).unwrap();
        assert_eq!(2, dictionary.len());
        assert!(dictionary.contains("abacus"));
        assert!(!dictionary.contains("license"));
        assert_eq!(Some(["abacus".to_string()].as_slice()), dictionary.exceptions("abaci"));

        let lemmatizer = NounLemmatizer::new(Arc::new(dictionary));
        assert_eq!("abacus", lemmatizer.lemmatize("abaci"));
        assert_eq!("abacus", lemmatizer.lemmatize("abacuses"));
        // not in this dictionary
        assert_eq!("cats", lemmatizer.lemmatize("cats"));
    }
}
