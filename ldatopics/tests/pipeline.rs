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

use std::io::Write;
use approx::assert_relative_eq;
use ldatopics::corpus::{load_corpus, InputFormat};
use ldatopics::tokenizer::{Normalizer, RawDocument};
use ldatopics::topicmodel::LdaError;
use ldatopics::{PipelineConfig, PipelineError, TopicPipeline};

const CORPUS: [&str; 3] = ["cats love fish", "dogs love bones", "cats and dogs play"];

fn pipeline(num_topics: usize, passes: usize, random_state: u64) -> TopicPipeline {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut config = PipelineConfig::default();
    config.lda.num_topics = num_topics;
    config.lda.passes = passes;
    config.lda.random_state = Some(random_state);
    TopicPipeline::new(&config).unwrap()
}

fn assert_distributions(rows: &[Vec<f64>], width: usize) {
    for row in rows {
        assert_eq!(width, row.len());
        assert!(row.iter().all(|value| *value >= 0.0));
        assert_relative_eq!(1.0, row.iter().sum::<f64>(), epsilon = 1e-6);
    }
}

#[test]
fn normalizer_is_deterministic(){
    let normalizer = Normalizer::default();
    for text in CORPUS {
        assert_eq!(normalizer.normalize(text), normalizer.normalize(text));
    }
}

#[test]
fn small_corpus_scenario(){
    let output = pipeline(2, 10, 42).run_texts(&CORPUS).unwrap();

    let vocabulary: Vec<&str> = output.vocabulary().iter().map(String::as_str).collect();
    assert_eq!(vec!["cat", "love", "fish", "dog", "bone", "play"], vocabulary);
    assert!(!output.vocabulary().contains_value("and"));
    for bow in &output.corpus {
        assert!(bow.iter().all(|(word_id, _)| *word_id < vocabulary.len()));
    }

    assert_eq!(3, output.model.doc_topic_distributions().len());
    assert_distributions(output.model.doc_topic_distributions(), 2);
    assert_eq!(2, output.model.topics().len());
    assert_distributions(output.model.topics(), 6);

    let again = pipeline(2, 10, 42).run_texts(&CORPUS).unwrap();
    for (a, b) in output.model.topics().iter().flatten().zip(again.model.topics().iter().flatten()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
    for (a, b) in output.model.doc_topic_distributions().iter().flatten().zip(again.model.doc_topic_distributions().iter().flatten()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }

    let report = output.report();
    assert_eq!(2, report.iter().len());
    for (_, terms) in report.iter() {
        assert_eq!(6, terms.len());
        assert!(terms.windows(2).all(|pair| pair[0].weight >= pair[1].weight));
    }
}

#[test]
fn empty_document_scenario(){
    let output = pipeline(2, 10, 42).run_texts(&["cats love fish", "", "dogs love bones"]).unwrap();
    assert!(output.tokens[1].is_empty());
    assert!(output.corpus.get(1).unwrap().is_empty());
    assert_distributions(output.model.doc_topic_distributions(), 2);
    assert_eq!(3, output.model.document_count());
}

#[test]
fn malformed_documents_keep_their_slot(){
    let documents = vec![
        RawDocument::from("cats love fish"),
        RawDocument::Missing,
        RawDocument::Bytes(vec![0xff, 0xfe]),
        RawDocument::from("dogs love bones"),
    ];
    let output = pipeline(2, 5, 1).run(&documents).unwrap();
    assert_eq!(4, output.tokens.len());
    assert_eq!(4, output.model.document_count());
    assert!(output.tokens[1].is_empty());
    assert!(output.tokens[2].is_empty());
}

#[test]
fn invalid_configuration(){
    for (num_topics, passes) in [(0, 10), (2, 0)] {
        let mut config = PipelineConfig::default();
        config.lda.num_topics = num_topics;
        config.lda.passes = passes;
        let err = TopicPipeline::new(&config).unwrap_err();
        assert!(matches!(err, PipelineError::Lda(LdaError::InvalidConfiguration { .. })));
    }
}

#[test]
fn empty_corpora(){
    let pipeline = pipeline(2, 10, 42);
    for texts in [vec![], vec!["", ""], vec!["the and of", "42 !!"]] {
        let err = pipeline.run_texts(&texts).unwrap_err();
        assert!(err.is_empty_corpus(), "{texts:?} gave {err}");
    }
}

#[test]
fn more_topics_than_documents(){
    let output = pipeline(10, 3, 3).run_texts(&CORPUS).unwrap();
    assert_distributions(output.model.topics(), 6);
    assert_distributions(output.model.doc_topic_distributions(), 10);
}

#[test]
fn journal_toc_end_to_end(){
    let mut file = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
    write!(file, r#"<?xml version='1.0' encoding='utf-8'?>
<JournalsTOC updated="2024-11-02 10:00:00">
    <Journal name="Pets" issn="1111-1111" updated="2024-11-02 10:00:00">
        <Article><Title>Cats love fish</Title><Type>journal-article</Type><Abstract>Cats eat fish daily.</Abstract></Article>
        <Article><Title>Dogs love bones</Title><Abstract>Dogs bury bones.</Abstract></Article>
        <Article><Title>Cats and dogs play</Title></Article>
    </Journal>
</JournalsTOC>"#).unwrap();

    let format = InputFormat::from_path(file.path());
    assert_eq!(InputFormat::Xml, format);
    let corpus = load_corpus(file.path(), format).unwrap();
    assert_eq!(3, corpus.len());
    assert_eq!("Cats and dogs play", corpus.labels[2]);

    let output = pipeline(2, 10, 42).run(&corpus.documents).unwrap();
    assert_eq!(vec!["cat", "love", "fish", "cat", "eat", "fish", "daily"], output.tokens[0]);
    assert_distributions(output.model.doc_topic_distributions(), 2);

    let json = serde_json::to_value(output.model.visualization_data()).unwrap();
    assert_eq!(3, json["doc_lengths"].as_array().unwrap().len());
}
