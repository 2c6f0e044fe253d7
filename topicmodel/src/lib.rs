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

//! Vocabulary, bag of words corpus and a variational Bayes LDA estimator.

pub mod corpus;
pub mod errors;
pub mod estimator;
pub mod model;
pub mod vocabulary;
mod math;

pub use corpus::{build_corpus, BagOfWords, BowCorpus};
pub use errors::LdaError;
pub use estimator::{LdaConfig, LdaConfigBuilder, LdaEstimator, PassReport};
pub use model::{RankedTerm, TopicModel, TopicReport, TopicReportIter, VisualizationData};
pub use vocabulary::Vocabulary;
