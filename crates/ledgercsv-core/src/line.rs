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

//! Field and line model.

use crate::config::Dialect;
use crate::error::CsvResult;
use crate::extract::FieldExtractor;
use std::fmt;
use std::ops::Deref;

/// One field value and its zero-based column index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    index: usize,
    value: String,
}

impl Field {
    pub fn new(index: usize, value: impl Into<String>) -> Self {
        Self {
            index,
            value: value.into(),
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// An ordered sequence of fields parsed from one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    fields: Vec<Field>,
    delimiter: char,
    enclosure: char,
    /// Terminating physical line (1-based, 0 if unknown).
    line_number: usize,
}

impl Line {
    /// Build a line from already extracted values.
    pub fn new<S: Into<String>>(
        values: impl IntoIterator<Item = S>,
        dialect: &Dialect,
        line_number: usize,
    ) -> Self {
        let fields = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Field::new(i, v))
            .collect();
        Self {
            fields,
            delimiter: dialect.delimiter,
            enclosure: dialect.enclosure,
            line_number,
        }
    }

    /// Parse `text` with `extractor`, attaching `line_number` to any error.
    pub fn parse(
        text: &str,
        extractor: &FieldExtractor,
        depth: Option<usize>,
        line_number: usize,
    ) -> CsvResult<Self> {
        let values = extractor
            .extract(text, depth)
            .map_err(|e| e.at_line(line_number))?;
        Ok(Self::new(values, extractor.dialect(), line_number))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get a field by column index.
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Get a field value by column index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(Field::value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::value)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn enclosure(&self) -> char {
        self.enclosure
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn into_values(self) -> Vec<String> {
        self.fields.into_iter().map(Field::into_value).collect()
    }
}

/// The column header line of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderLine(Line);

impl HeaderLine {
    pub fn new(line: Line) -> Self {
        Self(line)
    }

    pub fn parse(
        text: &str,
        extractor: &FieldExtractor,
        depth: Option<usize>,
        line_number: usize,
    ) -> CsvResult<Self> {
        Line::parse(text, extractor, depth, line_number).map(Self)
    }

    /// Column index of the first header field equal to `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.values().position(|v| v == name)
    }

    pub fn into_line(self) -> Line {
        self.0
    }
}

impl Deref for HeaderLine {
    type Target = Line;

    fn deref(&self) -> &Line {
        &self.0
    }
}

/// One data record of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataLine(Line);

impl DataLine {
    pub fn new(line: Line) -> Self {
        Self(line)
    }

    pub fn parse(
        text: &str,
        extractor: &FieldExtractor,
        depth: Option<usize>,
        line_number: usize,
    ) -> CsvResult<Self> {
        Line::parse(text, extractor, depth, line_number).map(Self)
    }

    pub fn into_line(self) -> Line {
        self.0
    }
}

impl Deref for DataLine {
    type Target = Line;

    fn deref(&self) -> &Line {
        &self.0
    }
}
