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

use thiserror::Error;

/// A document that can not be read as text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    #[error("The document has no content where text was expected!")]
    Missing,
    #[error("The document is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}
