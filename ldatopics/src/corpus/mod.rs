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


//! Reads raw documents from files. The only I/O of a pipeline run.

mod journal_toc;
mod lines;

pub use journal_toc::*;
pub use lines::*;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use strum::{Display, EnumString};
use ldatopics_tokenizer::RawDocument;
use crate::errors::PipelineError;

/// The supported corpus files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InputFormat {
    /// A journal table of contents, one document per article
    Xml,
    /// One document per line
    Lines,
}

impl InputFormat {
    /// Guesses the format by the file extension, everything but `.xml` is read as lines.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension() {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Self::Xml,
            _ => Self::Lines
        }
    }
}

/// A loaded corpus, the documents are aligned with the labels.
#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    pub documents: Vec<RawDocument>,
    /// A human readable name per document
    pub labels: Vec<String>,
}

impl LoadedCorpus {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl From<Vec<JournalArticle>> for LoadedCorpus {
    fn from(articles: Vec<JournalArticle>) -> Self {
        let (documents, labels) = articles
            .into_iter()
            .enumerate()
            .map(|(idx, article)| {
                let label = article.title.clone().unwrap_or_else(|| format!("Article {idx}"));
                (article.to_document(), label)
            })
            .unzip();
        Self { documents, labels }
    }
}

impl From<Vec<RawDocument>> for LoadedCorpus {
    fn from(documents: Vec<RawDocument>) -> Self {
        let labels = (0..documents.len()).map(|idx| format!("Line {}", idx + 1)).collect();
        Self { documents, labels }
    }
}

/// Loads the corpus at `path` in the given `format`.
pub fn load_corpus(path: impl AsRef<Path>, format: InputFormat) -> Result<LoadedCorpus, PipelineError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let corpus: LoadedCorpus = match format {
        InputFormat::Xml => read_journal_toc(reader)?.into_articles().into(),
        InputFormat::Lines => read_lines(reader)?.into(),
    };
    log::info!("Loaded {} documents from {} as {format}.", corpus.len(), path.display());
    Ok(corpus)
}
