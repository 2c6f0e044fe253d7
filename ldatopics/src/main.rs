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


use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use env_logger::Target;
use log::LevelFilter;
use ldatopics::config::ConfigOverrides;
use ldatopics::corpus::{load_corpus, InputFormat};
use ldatopics::tokenizer::TokenReduction;
use ldatopics::{PipelineConfig, PipelineError, TopicPipeline};

/// Discovers the topics of a corpus with latent dirichlet allocation.
#[derive(Parser, Debug)]
#[command(name = "ldatopics", version, about)]
struct Cli {
    /// The corpus, a journal table of contents XML or a text file with one document per line
    input: PathBuf,

    /// The format of the input, guessed by the file extension if not set
    #[arg(long)]
    format: Option<InputFormat>,

    /// A json file with the pipeline settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// The number of topics
    #[arg(long, allow_negative_numbers = true)]
    num_topics: Option<i64>,

    /// The number of passes over the corpus
    #[arg(long, allow_negative_numbers = true)]
    passes: Option<i64>,

    /// The seed for reproducible models
    #[arg(long)]
    random_state: Option<u64>,

    /// The number of terms shown per topic
    #[arg(long, allow_negative_numbers = true)]
    top_n: Option<i64>,

    /// How words are reduced: lemmatize, stem or none
    #[arg(long)]
    reduction: Option<TokenReduction>,

    /// Print the topics of every document
    #[arg(long)]
    show_documents: bool,

    /// Write the pyLDAvis inputs as json to this file
    #[arg(long)]
    vis_data: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut config = match &cli.config {
        None => PipelineConfig::default(),
        Some(path) => PipelineConfig::from_file(path)?,
    };
    config.apply(&ConfigOverrides {
        num_topics: cli.num_topics,
        passes: cli.passes,
        random_state: cli.random_state,
        top_n: cli.top_n,
        reduction: cli.reduction,
    })?;
    let pipeline = TopicPipeline::new(&config)?;

    let format = cli.format.unwrap_or_else(|| InputFormat::from_path(&cli.input));
    let corpus = load_corpus(&cli.input, format)?;
    let output = pipeline.run(&corpus.documents)?;

    for (idx, terms) in output.report().iter() {
        println!("Topic {idx}: {}\n", itertools::join(terms.iter(), " + "));
    }

    if cli.show_documents {
        for (document_id, label) in corpus.labels.iter().enumerate() {
            let topics = output.model
                .document_topics_above(document_id, config.minimum_probability)
                .unwrap_or_default()
                .into_iter()
                .map(|(topic_id, probability)| format!("{topic_id}: {probability:.3}"))
                .collect::<Vec<_>>();
            println!("{label}\n    [{}]", topics.join(", "));
        }
    }

    if let Some(path) = &cli.vis_data {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &output.model.visualization_data())?;
        log::info!("Visualization data saved to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::builder()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
