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

//! Physical line reader.
//!
//! Provides buffered line-by-line reading with 1-based line number tracking,
//! an optional start line and an optional cap on the number of lines read.
//! Line terminators (LF, CRLF) are split off and reported alongside the
//! text; a UTF-8 byte order mark on the first line is dropped.

use ledgercsv_core::{CsvError, CsvResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const BOM: char = '\u{feff}';

/// Terminator that ended a physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    /// Last line of a source without a trailing terminator.
    Eof,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Eof => "",
        }
    }
}

/// One physical line with its 1-based number and terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalLine {
    pub number: usize,
    pub text: String,
    pub ending: LineEnding,
}

impl PhysicalLine {
    /// A line terminated by LF.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            ending: LineEnding::Lf,
        }
    }

    pub fn with_ending(mut self, ending: LineEnding) -> Self {
        self.ending = ending;
        self
    }
}

/// Buffered line reader with line number tracking.
///
/// # Examples
///
/// ```rust
/// use ledgercsv_stream::{LineEnding, LineReader, PhysicalLine};
/// use std::io::Cursor;
///
/// let input = "line1\nline2\r\nline3\nline4";
/// let mut reader = LineReader::new(Cursor::new(input)).starting_at(2).max_lines(Some(2));
///
/// let line = reader.next_line().unwrap().unwrap();
/// assert_eq!(line.text, "line2");
/// assert_eq!(line.ending, LineEnding::CrLf);
/// assert_eq!(reader.next_line().unwrap(), Some(PhysicalLine::new(3, "line3")));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
    start_line: usize,
    max_lines: Option<usize>,
    emitted: usize,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader.
    pub fn new(reader: R) -> Self {
        Self::from_buf(BufReader::new(reader))
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self::from_buf(BufReader::with_capacity(capacity, reader))
    }

    fn from_buf(reader: BufReader<R>) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
            start_line: 1,
            max_lines: None,
            emitted: 0,
        }
    }

    /// Skip physical lines before `line` (1-based).
    pub fn starting_at(mut self, line: usize) -> Self {
        self.start_line = line.max(1);
        self
    }

    /// Stop after `max` lines have been returned.
    pub fn max_lines(mut self, max: Option<usize>) -> Self {
        self.max_lines = max;
        self
    }

    /// Get the current line number.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line.
    pub fn next_line(&mut self) -> CsvResult<Option<PhysicalLine>> {
        if self.max_lines.is_some_and(|max| self.emitted >= max) {
            return Ok(None);
        }

        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None); // EOF
            }
            self.line_number += 1;

            if self.line_number < self.start_line {
                continue;
            }

            let mut ending = LineEnding::Eof;
            if self.buffer.ends_with('\n') {
                self.buffer.pop();
                ending = LineEnding::Lf;
                if self.buffer.ends_with('\r') {
                    self.buffer.pop();
                    ending = LineEnding::CrLf;
                }
            }
            if self.line_number == 1 && self.buffer.starts_with(BOM) {
                self.buffer.remove(0);
            }

            self.emitted += 1;
            return Ok(Some(PhysicalLine {
                number: self.line_number,
                text: self.buffer.clone(),
                ending,
            }));
        }
    }
}

impl LineReader<File> {
    /// Open `path` for reading.
    ///
    /// Fails with [`CsvError::UnreadableSource`] if the file cannot be opened
    /// and [`CsvError::EmptyInput`] if it is empty.
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> CsvResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CsvError::unreadable(path, e))?;
        let metadata = file.metadata().map_err(|e| CsvError::unreadable(path, e))?;
        if metadata.is_dir() {
            return Err(CsvError::unreadable(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, "path is a directory"),
            ));
        }
        if metadata.len() == 0 {
            return Err(CsvError::EmptyInput);
        }
        Ok(Self::with_capacity(file, capacity))
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = CsvResult<PhysicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgercsv_core::CsvErrorKind;
    use std::io::Cursor;

    fn line(number: usize, text: &str) -> PhysicalLine {
        PhysicalLine::new(number, text)
    }

    fn last(number: usize, text: &str) -> PhysicalLine {
        PhysicalLine::new(number, text).with_ending(LineEnding::Eof)
    }

    #[test]
    fn test_read_lines() {
        let input = "line1\nline2\nline3";
        let mut reader = LineReader::new(Cursor::new(input));

        assert_eq!(reader.next_line().unwrap(), Some(line(1, "line1")));
        assert_eq!(reader.next_line().unwrap(), Some(line(2, "line2")));
        assert_eq!(reader.next_line().unwrap(), Some(last(3, "line3")));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    // ==================== Empty input tests ====================

    #[test]
    fn test_empty_input() {
        let mut reader = LineReader::new(Cursor::new(""));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_multiple_empty_lines() {
        let mut reader = LineReader::new(Cursor::new("\n\n"));
        assert_eq!(reader.next_line().unwrap(), Some(line(1, "")));
        assert_eq!(reader.next_line().unwrap(), Some(line(2, "")));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    // ==================== Line ending tests ====================

    #[test]
    fn test_mixed_line_endings() {
        let input = "line1\nline2\r\nline3\nline4";
        let mut reader = LineReader::new(Cursor::new(input));
        assert_eq!(reader.next_line().unwrap(), Some(line(1, "line1")));
        assert_eq!(
            reader.next_line().unwrap(),
            Some(line(2, "line2").with_ending(LineEnding::CrLf))
        );
        assert_eq!(reader.next_line().unwrap(), Some(line(3, "line3")));
        assert_eq!(reader.next_line().unwrap(), Some(last(4, "line4")));
    }

    #[test]
    fn test_line_endings_reported() {
        let mut reader = LineReader::new(Cursor::new("a\r\nb\nc"));
        let endings: Vec<_> = std::iter::from_fn(|| reader.next_line().unwrap())
            .map(|l| l.ending)
            .collect();
        assert_eq!(endings, vec![LineEnding::CrLf, LineEnding::Lf, LineEnding::Eof]);
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
    }

    #[test]
    fn test_lone_carriage_return_kept() {
        let mut reader = LineReader::new(Cursor::new("a\rb\n"));
        assert_eq!(reader.next_line().unwrap(), Some(line(1, "a\rb")));
    }

    #[test]
    fn test_bom_dropped_on_first_line_only() {
        let input = "\u{feff}\"Datum\"\n\u{feff}x";
        let mut reader = LineReader::new(Cursor::new(input));
        assert_eq!(reader.next_line().unwrap(), Some(line(1, "\"Datum\"")));
        assert_eq!(reader.next_line().unwrap(), Some(last(2, "\u{feff}x")));
    }

    // ==================== Window tests ====================

    #[test]
    fn test_starting_at_keeps_numbering() {
        let mut reader = LineReader::new(Cursor::new("a\nb\nc")).starting_at(3);
        assert_eq!(reader.next_line().unwrap(), Some(last(3, "c")));
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 3);
    }

    #[test]
    fn test_starting_at_past_end() {
        let mut reader = LineReader::new(Cursor::new("a\nb")).starting_at(10);
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_starting_at_zero_is_first_line() {
        let mut reader = LineReader::new(Cursor::new("a")).starting_at(0);
        assert_eq!(reader.next_line().unwrap(), Some(last(1, "a")));
    }

    #[test]
    fn test_max_lines_zero() {
        let mut reader = LineReader::new(Cursor::new("a\nb")).max_lines(Some(0));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_max_lines_cap() {
        let reader = LineReader::new(Cursor::new("a\nb\nc")).max_lines(Some(2));
        let lines: Vec<_> = reader.filter_map(|r| r.ok()).collect();
        assert_eq!(lines, vec![line(1, "a"), line(2, "b")]);
    }

    // ==================== Iterator tests ====================

    #[test]
    fn test_iterator() {
        let reader = LineReader::new(Cursor::new("line1\nline2\nline3"));
        let lines: Vec<_> = reader.filter_map(|r| r.ok()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], last(3, "line3"));
    }

    #[test]
    fn test_with_small_capacity() {
        let mut reader = LineReader::with_capacity(Cursor::new("line1\nline2"), 1);
        assert_eq!(reader.next_line().unwrap(), Some(line(1, "line1")));
        assert_eq!(reader.next_line().unwrap(), Some(last(2, "line2")));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let mut reader = LineReader::new(Cursor::new(vec![0xff, 0xfe, b'\n']));
        let err = reader.next_line().unwrap_err();
        assert_eq!(err.kind(), CsvErrorKind::Io);
    }

    #[test]
    fn test_unicode_content() {
        let mut reader = LineReader::new(Cursor::new("Überweisung\n€ 12,50"));
        assert_eq!(reader.next_line().unwrap(), Some(line(1, "Überweisung")));
        assert_eq!(reader.next_line().unwrap(), Some(last(2, "€ 12,50")));
    }

    // ==================== File tests ====================

    #[test]
    fn test_open_missing_file() {
        let err = LineReader::open("/definitely/not/here.csv", 1024).err().unwrap();
        assert_eq!(err.kind(), CsvErrorKind::UnreadableSource);
    }
}
