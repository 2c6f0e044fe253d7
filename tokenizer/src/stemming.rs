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
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use crate::lemmatizer::NounLemmatizer;

/// How a surviving word is reduced to its base form.
#[derive(
    Debug, Copy, Clone, Ord, PartialOrd, PartialEq, Eq, Hash, Default, AsRefStr, Display, EnumString, Serialize, Deserialize
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TokenReduction {
    /// Noun-form dictionary base form.
    #[default]
    Lemmatize,
    /// English snowball stem.
    Stem,
    /// Keep the lower cased word.
    None,
}

/// The runtime counterpart of [TokenReduction].
#[derive(Clone)]
pub enum Reducer {
    Lemma(NounLemmatizer),
    Stem(Arc<Stemmer>),
    Identity
}

impl Reducer {
    pub fn reduce<'o>(&self, word: &'o str) -> Cow<'o, str> {
        match self {
            Reducer::Lemma(lemmatizer) => lemmatizer.lemmatize(word),
            Reducer::Stem(stemmer) => stemmer.stem(word),
            Reducer::Identity => Cow::Borrowed(word)
        }
    }
}

impl From<TokenReduction> for Reducer {
    fn from(value: TokenReduction) -> Self {
        match value {
            TokenReduction::Lemmatize => Reducer::Lemma(NounLemmatizer::default()),
            TokenReduction::Stem => Reducer::Stem(Arc::new(Stemmer::create(Algorithm::English))),
            TokenReduction::None => Reducer::Identity,
        }
    }
}

impl Debug for Reducer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Reducer::Lemma(lemmatizer) => write!(f, "Reducer::Lemma({:?})", lemmatizer.dictionary()),
            Reducer::Stem(_) => f.write_str("Reducer::Stem(English)"),
            Reducer::Identity => f.write_str("Reducer::Identity"),
        }
    }
}


#[cfg(test)]
mod test {
    use super::{Reducer, TokenReduction};

    #[test]
    fn can_parse_reduction_names(){
        assert_eq!(TokenReduction::Stem, "stem".parse().unwrap());
        assert_eq!(TokenReduction::None, "none".parse().unwrap());
        assert_eq!("lemmatize", TokenReduction::Lemmatize.to_string());
        assert!("porter".parse::<TokenReduction>().is_err());
    }

    #[test]
    fn can_stem_properly(){
        let stemmer = Reducer::from(TokenReduction::Stem);
        assert_eq!("studi", stemmer.reduce("studies"));
        assert_eq!("model", stemmer.reduce("modeling"));
        let lemma = Reducer::from(TokenReduction::Lemmatize);
        assert_eq!("study", lemma.reduce("studies"));
        assert_eq!("modeling", Reducer::Identity.reduce("modeling"));
    }
}
