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

use std::str::Split;
use unicode_segmentation::{UnicodeSegmentation, UWordBounds};

/// Unicode keeps these inside a word, `alzheimer's` has to become `alzheimer` and `s`.
const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// Iterates the alphabetic word candidates of an already lower cased text.
///
/// Segments are cut at unicode word boundaries and again at apostrophes.
/// Whitespace and punctuation pieces are skipped and so is every piece with
/// a non-alphabetic char.
pub struct AlphabeticWords<'o> {
    segments: UWordBounds<'o>,
    pieces: Option<Split<'o, [char; 2]>>,
}

impl<'o> AlphabeticWords<'o> {
    pub fn new(original: &'o str) -> Self {
        Self {
            segments: original.split_word_bounds(),
            pieces: None,
        }
    }
}

impl<'o> Iterator for AlphabeticWords<'o> {
    type Item = &'o str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(piece) = self.pieces.as_mut().and_then(|pieces| pieces.find(|piece| is_alphabetic(piece))) {
                return Some(piece);
            }
            self.pieces = Some(self.segments.next()?.split(APOSTROPHES));
        }
    }
}

#[inline]
fn is_alphabetic(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(char::is_alphabetic)
}


#[cfg(test)]
mod test {
    use itertools::Itertools;
    use super::AlphabeticWords;

    #[test]
    fn drops_numbers_and_punctuation(){
        let words = AlphabeticWords::new("in 2024, we found 3 new cats! x2").collect_vec();
        assert_eq!(vec!["in", "we", "found", "new", "cats"], words);
    }

    #[test]
    fn splits_at_apostrophes(){
        let words = AlphabeticWords::new("alzheimer's and parkinson\u{2019}s patients' isn't").collect_vec();
        assert_eq!(vec!["alzheimer", "s", "and", "parkinson", "s", "patients", "isn", "t"], words);
        assert_eq!(0, AlphabeticWords::new("'' \u{2019}").count());
    }

    #[test]
    fn splits_hyphenated_compounds(){
        let words = AlphabeticWords::new("state-of-the-art models").collect_vec();
        assert_eq!(vec!["state", "of", "the", "art", "models"], words);
    }

    #[test]
    fn keeps_non_ascii_letters(){
        let words = AlphabeticWords::new("über café").collect_vec();
        assert_eq!(vec!["über", "café"], words);
    }

    #[test]
    fn empty_text_has_no_words(){
        assert_eq!(0, AlphabeticWords::new("").count());
        assert_eq!(0, AlphabeticWords::new("  \n\t ").count());
    }
}
