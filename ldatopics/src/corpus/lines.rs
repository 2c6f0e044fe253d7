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


use std::io;
use std::io::BufRead;
use ldatopics_tokenizer::RawDocument;

/// Reads one document per line.
///
/// Lines that are not UTF-8 are kept as bytes, so the normalizer can replace
/// them without shifting the following documents.
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<RawDocument>> {
    reader
        .split(b'\n')
        .map(|line| {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            Ok(RawDocument::from(line))
        })
        .collect()
}
