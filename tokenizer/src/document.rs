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

use crate::errors::MalformedInputError;

/// A document as handed over by a corpus source.
///
/// The position of a document in its corpus is its only identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDocument {
    Text(String),
    Bytes(Vec<u8>),
    Missing,
}

impl RawDocument {
    /// Borrows the content as text.
    pub fn as_text(&self) -> Result<&str, MalformedInputError> {
        match self {
            RawDocument::Text(value) => Ok(value.as_str()),
            RawDocument::Bytes(value) => Ok(std::str::from_utf8(value)?),
            RawDocument::Missing => Err(MalformedInputError::Missing),
        }
    }
}

impl From<String> for RawDocument {
    fn from(value: String) -> Self {
        RawDocument::Text(value)
    }
}

impl From<&str> for RawDocument {
    fn from(value: &str) -> Self {
        RawDocument::Text(value.to_string())
    }
}

impl From<&String> for RawDocument {
    fn from(value: &String) -> Self {
        RawDocument::Text(value.clone())
    }
}

impl From<Vec<u8>> for RawDocument {
    fn from(value: Vec<u8>) -> Self {
        match String::from_utf8(value) {
            Ok(text) => RawDocument::Text(text),
            Err(err) => RawDocument::Bytes(err.into_bytes())
        }
    }
}

impl<T> From<Option<T>> for RawDocument where T: Into<RawDocument> {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawDocument::Missing, Into::into)
    }
}


#[cfg(test)]
mod test {
    use crate::document::RawDocument;
    use crate::errors::MalformedInputError;

    #[test]
    fn bytes_are_checked_for_text(){
        assert_eq!(RawDocument::Text("hello".to_string()), RawDocument::from(b"hello".to_vec()));
        let broken = RawDocument::from(vec![0xff, 0xfe, b'a']);
        assert!(matches!(broken, RawDocument::Bytes(_)));
        assert!(matches!(broken.as_text(), Err(MalformedInputError::NotUtf8(_))));
    }

    #[test]
    fn none_is_missing(){
        let doc = RawDocument::from(None::<String>);
        assert_eq!(RawDocument::Missing, doc);
        assert_eq!(Err(MalformedInputError::Missing), doc.as_text());
        assert_eq!(Ok("text"), RawDocument::from(Some("text")).as_text());
    }
}
