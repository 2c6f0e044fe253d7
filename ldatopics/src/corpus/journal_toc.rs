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


use std::io::BufRead;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use ldatopics_tokenizer::RawDocument;

/// A journal of a table of contents file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Journal {
    pub name: Option<String>,
    pub issn: Option<String>,
    pub updated: Option<String>,
    pub articles: Vec<JournalArticle>,
}

/// A single article, every element may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JournalArticle {
    pub title: Option<String>,
    pub article_type: Option<String>,
    pub publication_date: Option<String>,
    pub authors: Option<String>,
    pub doi: Option<String>,
    pub abstract_text: Option<String>,
}

impl JournalArticle {
    /// The modeled text: title and abstract joined by a space.
    /// Missing parts count as empty.
    pub fn document_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or_default(),
            self.abstract_text.as_deref().unwrap_or_default()
        )
    }

    pub fn to_document(&self) -> RawDocument {
        RawDocument::Text(self.document_text())
    }
}

/// The content of a `JournalsTOC` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JournalToc {
    pub updated: Option<String>,
    pub journals: Vec<Journal>,
}

impl JournalToc {
    pub fn articles(&self) -> impl Iterator<Item=&JournalArticle> {
        self.journals.iter().flat_map(|journal| journal.articles.iter())
    }

    /// All articles in file order.
    pub fn into_articles(self) -> Vec<JournalArticle> {
        self.journals.into_iter().flat_map(|journal| journal.articles).collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ArticleField {
    Title,
    Type,
    PublicationDate,
    Authors,
    Doi,
    Abstract,
}

impl ArticleField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"Title" => Some(Self::Title),
            b"Type" => Some(Self::Type),
            b"PublicationDate" => Some(Self::PublicationDate),
            b"Authors" => Some(Self::Authors),
            b"DOI" => Some(Self::Doi),
            b"Abstract" => Some(Self::Abstract),
            _ => None
        }
    }

    fn slot(self, article: &mut JournalArticle) -> &mut Option<String> {
        match self {
            Self::Title => &mut article.title,
            Self::Type => &mut article.article_type,
            Self::PublicationDate => &mut article.publication_date,
            Self::Authors => &mut article.authors,
            Self::Doi => &mut article.doi,
            Self::Abstract => &mut article.abstract_text,
        }
    }
}

/// Text segments are trimmed by the reader, so they are joined by a space.
fn append_segment(content: &mut String, segment: &str) {
    if !content.is_empty() {
        content.push(' ');
    }
    content.push_str(segment);
}

fn attribute(start: &BytesStart, name: &str) -> Result<Option<String>, quick_xml::Error> {
    match start.try_get_attribute(name)? {
        None => Ok(None),
        Some(value) => Ok(Some(value.unescape_value()?.into_owned()))
    }
}

/// Reads a journal table of contents:
/// `<JournalsTOC><Journal name issn updated><Article><Title/>…<Abstract/></Article></Journal></JournalsTOC>`
///
/// Articles outside of a `Journal` element are collected into an anonymous journal.
pub fn read_journal_toc<R: BufRead>(reader: R) -> Result<JournalToc, quick_xml::Error> {
    let mut reader = Reader::from_reader(reader);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut toc = JournalToc::default();
    let mut journal: Option<Journal> = None;
    let mut article: Option<JournalArticle> = None;
    let mut field: Option<(ArticleField, String)> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                match start.local_name().as_ref() {
                    b"JournalsTOC" => toc.updated = attribute(&start, "updated")?,
                    b"Journal" => {
                        journal = Some(Journal {
                            name: attribute(&start, "name")?,
                            issn: attribute(&start, "issn")?,
                            updated: attribute(&start, "updated")?,
                            articles: Vec::new(),
                        });
                    }
                    b"Article" => article = Some(JournalArticle::default()),
                    other => {
                        // markup inside of a field is flattened into the field
                        if article.is_some() && field.is_none() {
                            field = ArticleField::from_tag(other).map(|value| (value, String::new()));
                        }
                    }
                }
            }
            Event::Empty(start) => {
                if start.local_name().as_ref() == b"Article" {
                    journal.get_or_insert_with(Journal::default).articles.push(JournalArticle::default());
                }
            }
            Event::Text(text) => {
                if let Some((_, content)) = field.as_mut() {
                    append_segment(content, &text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some((_, content)) = field.as_mut() {
                    append_segment(content, &String::from_utf8_lossy(&data));
                }
            }
            Event::End(end) => {
                match end.local_name().as_ref() {
                    b"Journal" => {
                        if let Some(finished) = journal.take() {
                            toc.journals.push(finished);
                        }
                    }
                    b"Article" => {
                        if let Some(finished) = article.take() {
                            journal.get_or_insert_with(Journal::default).articles.push(finished);
                        }
                    }
                    other => {
                        let closes_field = matches!(
                            (&field, ArticleField::from_tag(other)),
                            (Some((open, _)), Some(closed)) if *open == closed
                        );
                        if closes_field {
                            if let (Some((target, content)), Some(current)) = (field.take(), article.as_mut()) {
                                *target.slot(current) = Some(content);
                            }
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(unfinished) = journal.take() {
        toc.journals.push(unfinished);
    }

    log::debug!(
        "Read {} journals with {} articles.",
        toc.journals.len(),
        toc.journals.iter().map(|journal| journal.articles.len()).sum::<usize>()
    );
    Ok(toc)
}
