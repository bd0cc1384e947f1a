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

//! Document structure and incremental builder.
//!
//! # Examples
//!
//! ```
//! use ledgercsv_core::{DataLine, Dialect, DocumentBuilder, HeaderLine, Line};
//!
//! let dialect = Dialect::comma();
//! let mut builder = DocumentBuilder::new(dialect);
//! builder.set_header(HeaderLine::new(Line::new(["a", "b", "c"], &dialect, 1)));
//! builder.add_row(DataLine::new(Line::new(["1", "2", "3", "4"], &dialect, 2)));
//!
//! let doc = builder.build();
//! assert!(doc.has_header());
//! assert_eq!(doc.count_rows(), 1);
//! assert!(!doc.is_consistent());
//! ```

use crate::config::Dialect;
use crate::error::{preview, CsvError, CsvResult};
use crate::line::{DataLine, HeaderLine, Line};

/// Default source encoding label.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// A parsed table: optional header plus ordered data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    header: Option<HeaderLine>,
    rows: Vec<DataLine>,
    delimiter: char,
    enclosure: char,
    /// Source encoding label, informational only.
    encoding: String,
}

impl Document {
    pub fn header(&self) -> Option<&HeaderLine> {
        self.header.as_ref()
    }

    #[inline]
    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn rows(&self) -> &[DataLine] {
        &self.rows
    }

    /// Get a row by zero-based position.
    pub fn row(&self, index: usize) -> Option<&DataLine> {
        self.rows.get(index)
    }

    #[inline]
    pub fn count_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the document holds no data rows. A header alone does not count.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn enclosure(&self) -> char {
        self.enclosure
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Column index of the header field named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.as_ref()?.position(name)
    }

    /// Value of column `name` in row `row`.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let column = self.column_index(name)?;
        self.rows.get(row)?.get(column)
    }

    /// Field count every line is checked against: the header's, else the first row's.
    pub fn expected_field_count(&self) -> Option<usize> {
        self.header
            .as_deref()
            .or_else(|| self.rows.first().map(|r| &**r))
            .map(Line::len)
    }

    /// Whether the header and every row have the same field count.
    pub fn is_consistent(&self) -> bool {
        self.first_inconsistency().is_none()
    }

    /// Fail with [`CsvError::InconsistentFieldCount`] on the first mismatching row.
    pub fn validate_consistency(&self) -> CsvResult<()> {
        match self.first_inconsistency() {
            Some((row, expected)) => Err(CsvError::InconsistentFieldCount {
                line: row.line_number(),
                preview: self.render_row(row),
                expected,
                actual: row.len(),
            }),
            None => Ok(()),
        }
    }

    fn render_row(&self, row: &DataLine) -> String {
        let delimiter = self.delimiter.to_string();
        preview(&row.values().collect::<Vec<_>>().join(&delimiter))
    }

    fn first_inconsistency(&self) -> Option<(&DataLine, usize)> {
        let expected = self.expected_field_count()?;
        self.rows
            .iter()
            .find(|r| r.len() != expected)
            .map(|r| (r, expected))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataLine> {
        self.rows.iter()
    }

    pub fn into_parts(self) -> (Option<HeaderLine>, Vec<DataLine>) {
        (self.header, self.rows)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a DataLine;
    type IntoIter = std::slice::Iter<'a, DataLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Accumulates a header and rows into a [`Document`].
///
/// The builder owns the in-progress collection until [`build`](Self::build)
/// hands it over. Rows keep insertion order; nothing is deduplicated.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    header: Option<HeaderLine>,
    rows: Vec<DataLine>,
    dialect: Dialect,
    encoding: String,
}

impl DocumentBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            header: None,
            rows: Vec::new(),
            dialect,
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    /// Record the source encoding label.
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set the header, replacing any previous one.
    pub fn set_header(&mut self, header: HeaderLine) -> &mut Self {
        self.header = Some(header);
        self
    }

    pub fn add_row(&mut self, row: DataLine) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Finish the document without checking consistency.
    pub fn build(self) -> Document {
        Document {
            header: self.header,
            rows: self.rows,
            delimiter: self.dialect.delimiter,
            enclosure: self.dialect.enclosure,
            encoding: self.encoding,
        }
    }

    /// Finish the document, failing if any row's field count differs.
    pub fn build_strict(self) -> CsvResult<Document> {
        let doc = self.build();
        doc.validate_consistency()?;
        Ok(doc)
    }
}
