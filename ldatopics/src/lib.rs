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


//! Discovers the topics of a corpus of short texts, e.g. the titles and
//! abstracts of a journal table of contents.

pub mod config;
pub mod corpus;
pub mod errors;
pub mod pipeline;

pub use config::PipelineConfig;
pub use errors::PipelineError;
pub use pipeline::{PipelineOutput, TopicPipeline};

pub use ldatopics_tokenizer as tokenizer;
pub use ldatopics_topicmodel as topicmodel;
