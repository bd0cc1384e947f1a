// Dweve LedgerCSV - Dialect-tolerant delimited text ingestion
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logical line resolution.
//!
//! Joins physical lines into complete records. A quoted field may span
//! several physical lines; the resolver keeps appending lines, joined by the
//! terminator that ended the previous line in the source, until quoting
//! balances. Only the current record is held in memory.
//!
//! Each physical line's unmatched-enclosure parity is added to the running
//! parity of the buffer. Enclosure runs never span the joining newline, so
//! this equals re-analyzing the whole buffer.

use crate::reader::PhysicalLine;
use ledgercsv_core::balance::unmatched_enclosures;
use ledgercsv_core::error::preview;
use ledgercsv_core::{CsvError, CsvResult, Limits};
use tracing::debug;

/// One complete record assembled from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    content: String,
    first_line: usize,
    line_number: usize,
    complete: bool,
}

impl LogicalLine {
    pub fn new(content: impl Into<String>, first_line: usize, line_number: usize) -> Self {
        Self {
            content: content.into(),
            first_line,
            line_number,
            complete: true,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// First physical line of the record (1-based).
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// Terminating physical line of the record (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Number of physical lines joined into this record.
    pub fn physical_lines(&self) -> usize {
        self.line_number.saturating_sub(self.first_line) + 1
    }

    /// False when the source ended inside an open quoted span.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

/// Streaming transformation from physical lines to logical lines.
///
/// # Examples
///
/// ```rust
/// use ledgercsv_stream::{LineReader, LogicalLineResolver};
/// use std::io::Cursor;
///
/// let input = "\"650,01\",\"Gutschrift\nPAYPAL\",\"\"\n\"1\",\"2\",\"3\"";
/// let resolver = LogicalLineResolver::new(LineReader::new(Cursor::new(input)), '"');
/// let lines: Vec<_> = resolver.collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].content(), "\"650,01\",\"Gutschrift\nPAYPAL\",\"\"");
/// assert_eq!(lines[0].line_number(), 2);
/// assert_eq!(lines[1].line_number(), 3);
/// ```
pub struct LogicalLineResolver<I> {
    lines: I,
    enclosure: char,
    skip_empty: bool,
    limits: Limits,
    finished: bool,
}

impl<I> LogicalLineResolver<I>
where
    I: Iterator<Item = CsvResult<PhysicalLine>>,
{
    /// Create a resolver that skips blank records.
    pub fn new(lines: I, enclosure: char) -> Self {
        Self {
            lines,
            enclosure,
            skip_empty: true,
            limits: Limits::default(),
            finished: false,
        }
    }

    /// Whether blank records are dropped (default) or emitted as empty lines.
    pub fn skip_empty(mut self, skip: bool) -> Self {
        self.skip_empty = skip;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn fail(&mut self, err: CsvError) -> Option<CsvResult<LogicalLine>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl<I> Iterator for LogicalLineResolver<I>
where
    I: Iterator<Item = CsvResult<PhysicalLine>>,
{
    type Item = CsvResult<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut buffer = String::new();
        let mut first_line = 0;
        let mut last_line = 0;
        let mut parts = 0usize;
        let mut open = false;
        let mut ending = "";

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return self.fail(e),
                None => {
                    self.finished = true;
                    if parts == 0 || buffer.trim().is_empty() {
                        return None;
                    }
                    return Some(Ok(LogicalLine {
                        content: buffer,
                        first_line,
                        line_number: last_line,
                        complete: !open,
                    }));
                }
            };

            if unmatched_enclosures(&line.text, self.enclosure) % 2 == 1 {
                open = !open;
            }

            if parts == 0 {
                first_line = line.number;
                buffer = line.text;
            } else {
                buffer.push_str(ending);
                buffer.push_str(&line.text);
            }
            parts += 1;
            last_line = line.number;
            ending = line.ending.as_str();

            if buffer.len() > self.limits.max_line_length {
                let err = CsvError::LimitExceeded {
                    line: last_line,
                    preview: preview(&buffer),
                    what: "logical line length",
                    limit: self.limits.max_line_length,
                    actual: buffer.len(),
                };
                return self.fail(err);
            }

            if open {
                if parts > self.limits.max_continuation_lines {
                    let err = CsvError::unbalanced(
                        first_line,
                        &buffer,
                        format!(
                            "record still open after {} continuation lines",
                            parts - 1
                        ),
                    );
                    return self.fail(err);
                }
                continue;
            }

            if self.skip_empty && buffer.trim().is_empty() {
                parts = 0;
                buffer.clear();
                continue;
            }

            if parts > 1 {
                debug!(
                    first_line,
                    last_line, parts, "joined continuation lines into one record"
                );
            }
            return Some(Ok(LogicalLine {
                content: buffer,
                first_line,
                line_number: last_line,
                complete: true,
            }));
        }
    }
}
