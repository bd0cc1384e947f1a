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

//! Parse entry points and the lazy row iterator.

use crate::options::ParseOptions;
use crate::reader::LineReader;
use crate::resolver::{LogicalLine, LogicalLineResolver};
use ledgercsv_core::error::preview;
use ledgercsv_core::{
    CsvError, CsvResult, DataLine, Document, DocumentBuilder, FieldExtractor, HeaderLine,
};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Lazy iterator over the data rows of a source.
///
/// The header (if requested) is read when the iterator is created. Rows are
/// parsed one logical line at a time, so memory use is bounded by the longest
/// record. The iterator stops after the first error.
///
/// # Examples
///
/// ```rust
/// use ledgercsv_stream::{ParseOptions, RowIter};
///
/// let input = "name,amount\nAlice,10\nBob,20\n";
/// let rows = RowIter::new(input.as_bytes(), &ParseOptions::default()).unwrap();
///
/// assert_eq!(rows.header().unwrap().get(1), Some("amount"));
/// let names: Vec<String> = rows
///     .map(|r| r.unwrap().get(0).unwrap().to_string())
///     .collect();
/// assert_eq!(names, vec!["Alice", "Bob"]);
/// ```
pub struct RowIter<R: Read> {
    lines: LogicalLineResolver<LineReader<R>>,
    extractor: FieldExtractor,
    depth: Option<usize>,
    header: Option<HeaderLine>,
    expected_fields: Option<usize>,
    strict_consistency: bool,
    strict_validation: bool,
    max_rows: usize,
    emitted: usize,
    finished: bool,
}

impl<R: Read> RowIter<R> {
    /// Create a row iterator over `reader`, reading the header first if
    /// `options.has_header` is set.
    pub fn new(reader: R, options: &ParseOptions) -> CsvResult<Self> {
        Self::from_lines(LineReader::with_capacity(reader, options.buffer_size), options)
    }

    fn from_lines(lines: LineReader<R>, options: &ParseOptions) -> CsvResult<Self> {
        let lines = lines
            .starting_at(options.start_line)
            .max_lines(options.max_lines);
        let mut lines = resolver(lines, options);
        let extractor = extractor(options);

        let header = if options.has_header {
            let logical = lines.next().ok_or(CsvError::MissingHeader)??;
            Some(parse_header(&logical, &extractor, options)?)
        } else {
            None
        };

        Ok(Self::from_parts(lines, extractor, header, options))
    }

    fn from_parts(
        lines: LogicalLineResolver<LineReader<R>>,
        extractor: FieldExtractor,
        header: Option<HeaderLine>,
        options: &ParseOptions,
    ) -> Self {
        let expected_fields = header.as_ref().map(|h| h.len());
        Self {
            lines,
            extractor,
            depth: options.depth,
            header,
            expected_fields,
            strict_consistency: options.strict_consistency,
            strict_validation: options.strict_validation,
            max_rows: options.limits.max_rows,
            emitted: 0,
            finished: false,
        }
    }

    pub fn header(&self) -> Option<&HeaderLine> {
        self.header.as_ref()
    }

    /// Take the header out of the iterator.
    pub fn take_header(&mut self) -> Option<HeaderLine> {
        self.header.take()
    }

    /// Number of rows yielded so far.
    pub fn rows_read(&self) -> usize {
        self.emitted
    }

    fn parse_row(&mut self, logical: LogicalLine) -> CsvResult<DataLine> {
        check_complete(&logical, self.strict_validation)?;

        if self.emitted >= self.max_rows {
            return Err(CsvError::LimitExceeded {
                line: logical.line_number(),
                preview: preview(logical.content()),
                what: "row count",
                limit: self.max_rows,
                actual: self.emitted + 1,
            });
        }

        let row = DataLine::parse(
            logical.content(),
            &self.extractor,
            self.depth,
            logical.line_number(),
        )?;

        if self.strict_consistency {
            let expected = *self.expected_fields.get_or_insert(row.len());
            if row.len() != expected {
                return Err(CsvError::InconsistentFieldCount {
                    line: row.line_number(),
                    preview: preview(logical.content()),
                    expected,
                    actual: row.len(),
                });
            }
        }

        self.emitted += 1;
        Ok(row)
    }
}

impl<R: Read> Iterator for RowIter<R> {
    type Item = CsvResult<DataLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = match self.lines.next()? {
            Ok(logical) => self.parse_row(logical),
            Err(e) => Err(e),
        };
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

fn extractor(options: &ParseOptions) -> FieldExtractor {
    FieldExtractor::new(options.dialect, options.strictness).with_limits(&options.limits)
}

fn resolver<R: Read>(
    lines: LineReader<R>,
    options: &ParseOptions,
) -> LogicalLineResolver<LineReader<R>> {
    LogicalLineResolver::new(lines, options.dialect.enclosure)
        .skip_empty(options.skip_empty)
        .with_limits(options.limits.clone())
}

fn parse_header(
    logical: &LogicalLine,
    extractor: &FieldExtractor,
    options: &ParseOptions,
) -> CsvResult<HeaderLine> {
    check_complete(logical, options.strict_validation)?;
    HeaderLine::parse(
        logical.content(),
        extractor,
        options.depth,
        logical.line_number(),
    )
}

fn check_complete(logical: &LogicalLine, strict_validation: bool) -> CsvResult<()> {
    if logical.is_complete() {
        return Ok(());
    }
    if strict_validation {
        return Err(CsvError::unbalanced(
            logical.first_line(),
            logical.content(),
            "input ended inside a quoted field",
        ));
    }
    warn!(
        first_line = logical.first_line(),
        last_line = logical.line_number(),
        "final record truncated inside a quoted field"
    );
    Ok(())
}

fn collect<R: Read>(mut rows: RowIter<R>, options: &ParseOptions) -> CsvResult<Document> {
    let mut builder = DocumentBuilder::new(options.dialect).encoding(options.encoding.clone());
    if let Some(header) = rows.take_header() {
        builder.set_header(header);
    }
    for row in rows {
        builder.add_row(row?);
    }

    if !builder.has_header() && builder.row_count() == 0 {
        return Err(CsvError::EmptyInput);
    }
    if options.strict_consistency {
        builder.build_strict()
    } else {
        Ok(builder.build())
    }
}

/// Parse a complete document held in memory.
///
/// # Examples
///
/// ```rust
/// use ledgercsv_stream::{parse_str, ParseOptions};
///
/// let doc = parse_str("a,b\n\"1\",\"2\"\n", &ParseOptions::default()).unwrap();
/// assert_eq!(doc.count_rows(), 1);
/// assert_eq!(doc.value(0, "b"), Some("2"));
/// ```
pub fn parse_str(input: &str, options: &ParseOptions) -> CsvResult<Document> {
    if input.trim().is_empty() {
        return Err(CsvError::EmptyInput);
    }
    parse_reader(input.as_bytes(), options)
}

/// Parse a document from any reader.
pub fn parse_reader<R: Read>(reader: R, options: &ParseOptions) -> CsvResult<Document> {
    collect(RowIter::new(reader, options)?, options)
}

/// Parse a file, holding one logical line in memory at a time while reading.
///
/// Honors `options.start_line` and `options.max_lines`.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> CsvResult<Document> {
    let path = path.as_ref();
    debug!(path = %path.display(), "parsing file");
    let doc = collect(rows(path, options)?, options)?;
    debug!(path = %path.display(), rows = doc.count_rows(), "parsed file");
    Ok(doc)
}

/// Parse only the physical lines `from..=to` (1-based) of a file.
///
/// When `options.has_header` is set the header is re-read from the top of
/// the file and data starts after it, even if `from` points inside it.
pub fn parse_file_range(
    path: impl AsRef<Path>,
    from: usize,
    to: usize,
    options: &ParseOptions,
) -> CsvResult<Document> {
    let path = path.as_ref();
    let extractor = extractor(options);

    let (header, data_start) = if options.has_header {
        let mut lines = resolver(LineReader::open(path, options.buffer_size)?, options);
        let logical = lines.next().ok_or(CsvError::MissingHeader)??;
        let header = parse_header(&logical, &extractor, options)?;
        (Some(header), from.max(logical.line_number() + 1))
    } else {
        (None, from.max(1))
    };

    let count = to.saturating_add(1).saturating_sub(data_start);
    debug!(path = %path.display(), from = data_start, to, "parsing line range");

    let lines = LineReader::open(path, options.buffer_size)?
        .starting_at(data_start)
        .max_lines(Some(count));
    let lines = resolver(lines, options);
    let rows = RowIter::from_parts(lines, extractor, header, options);
    collect(rows, options)
}

/// Open a lazy row iterator over a file.
pub fn rows(path: impl AsRef<Path>, options: &ParseOptions) -> CsvResult<RowIter<File>> {
    RowIter::from_lines(LineReader::open(path, options.buffer_size)?, options)
}

/// Open a lazy row iterator over any reader.
pub fn rows_from_reader<R: Read>(reader: R, options: &ParseOptions) -> CsvResult<RowIter<R>> {
    RowIter::new(reader, options)
}
