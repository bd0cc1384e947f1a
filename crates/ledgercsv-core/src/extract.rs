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

//! Field extraction.
//!
//! Splits one logical line into field values. A delimiter inside a properly
//! wrapped field belongs to the value; doubled enclosures inside a field
//! collapse to one literal enclosure at every depth.
//!
//! When no depth is supplied it is detected under the extractor's
//! strictness. A line without any enclosure is split on every delimiter.
//! A lenient extractor falls back to a conventional single-enclosure split
//! for lines no depth fits; a strict one reports
//! [`CsvError::UnresolvableEnclosureDepth`].
//!
//! # Examples
//!
//! ```
//! use ledgercsv_core::{Dialect, EnclosureStrictness, FieldExtractor};
//!
//! let extractor = FieldExtractor::new(Dialect::comma(), EnclosureStrictness::Strict);
//! let fields = extractor.extract(r#"""A"",""B,C"""#, None).unwrap();
//! assert_eq!(fields, vec!["A", "B,C"]);
//!
//! let err = extractor.extract(r#"""A"",""B"""#, Some(1)).unwrap_err();
//! assert_eq!(err.kind(), ledgercsv_core::CsvErrorKind::FieldUnwrapFailure);
//! ```

use crate::config::{Dialect, EnclosureStrictness, Limits};
use crate::enclosure::{split_at_depth, split_plain, EnclosureDetector, Segment};
use crate::error::{CsvError, CsvResult};
use tracing::debug;

/// Splits logical lines into field values for one dialect.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    detector: EnclosureDetector,
}

impl FieldExtractor {
    pub fn new(dialect: Dialect, strictness: EnclosureStrictness) -> Self {
        Self {
            detector: EnclosureDetector::new(dialect, strictness),
        }
    }

    /// Apply the depth ceiling from `limits`.
    pub fn with_limits(mut self, limits: &Limits) -> Self {
        self.detector = self.detector.with_max_depth(limits.max_wrap_depth);
        self
    }

    pub fn dialect(&self) -> &Dialect {
        self.detector.dialect()
    }

    pub fn strictness(&self) -> EnclosureStrictness {
        self.detector.strictness()
    }

    pub fn detector(&self) -> &EnclosureDetector {
        &self.detector
    }

    /// Extract the field values of `line`.
    ///
    /// `depth` forces a wrap depth; `Some(0)` forces the conventional
    /// single-enclosure split. Returned errors carry line `0`; callers
    /// attach the real line with [`CsvError::at_line`].
    pub fn extract(&self, line: &str, depth: Option<usize>) -> CsvResult<Vec<String>> {
        let dialect = self.dialect();
        let body = dialect.strip_outer(line).ok_or_else(|| {
            CsvError::unresolvable_depth(line, "record is not enclosed in the outer wrapper")
        })?;
        let chars: Vec<char> = body.chars().collect();

        match depth {
            Some(0) => Ok(split_conventional(&chars, dialect.delimiter, dialect.enclosure)),
            Some(d) => self.extract_at(&chars, d),
            None => self.extract_detected(&chars),
        }
    }

    fn extract_detected(&self, chars: &[char]) -> CsvResult<Vec<String>> {
        let enclosure = self.dialect().enclosure;
        if let Some((depth, segments)) = self.detector.resolve(chars) {
            return Ok(values(chars, &segments, depth, enclosure));
        }

        let text: String = chars.iter().collect();
        if self.strictness().is_strict() {
            return Err(CsvError::unresolvable_depth(
                &text,
                "fields do not share one enclosure depth",
            ));
        }
        debug!(
            line = %crate::error::preview(&text),
            "no uniform enclosure depth, falling back to conventional split"
        );
        Ok(split_conventional(chars, self.dialect().delimiter, enclosure))
    }

    fn extract_at(&self, chars: &[char], depth: usize) -> CsvResult<Vec<String>> {
        let dialect = self.dialect();
        let segments = split_at_depth(
            chars,
            dialect.delimiter,
            dialect.enclosure,
            depth,
            self.strictness(),
        )
        .map_err(|fault| {
            let rest: String = chars[fault.start()..].iter().collect();
            CsvError::unwrap_failure(fault.column(), &rest, fault.reason(depth))
        })?;

        if self.strictness().is_strict() {
            if let Some((column, seg)) = segments.iter().enumerate().find(|(_, s)| !s.wrapped) {
                let text: String = chars[seg.start..seg.end].iter().collect();
                return Err(CsvError::unwrap_failure(
                    column,
                    &text,
                    format!("field is not wrapped at depth {}", depth),
                ));
            }
        }

        Ok(values(chars, &segments, depth, dialect.enclosure))
    }
}

/// Extract field values from `line` leniently, detecting the depth unless given.
pub fn extract(line: &str, dialect: &Dialect, depth: Option<usize>) -> CsvResult<Vec<String>> {
    FieldExtractor::new(*dialect, EnclosureStrictness::Lenient).extract(line, depth)
}

fn values(chars: &[char], segments: &[Segment], depth: usize, enclosure: char) -> Vec<String> {
    segments
        .iter()
        .map(|s| s.value(chars, depth, enclosure))
        .collect()
}

/// Tolerant single-enclosure split.
///
/// An enclosure opens a quoted span only at the start of a field; text
/// after the closing enclosure is kept literally. An unterminated span runs
/// to the end of the line.
pub(crate) fn split_conventional(chars: &[char], delimiter: char, enclosure: char) -> Vec<String> {
    if !chars.contains(&enclosure) {
        return split_plain(chars, delimiter)
            .iter()
            .map(|s| chars[s.start..s.end].iter().collect())
            .collect();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut at_field_start = true;
    let mut in_quotes = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_quotes {
            if c == enclosure {
                if chars.get(i + 1) == Some(&enclosure) {
                    current.push(enclosure);
                    i += 2;
                    continue;
                }
                in_quotes = false;
            } else {
                current.push(c);
            }
        } else if c == delimiter {
            fields.push(std::mem::take(&mut current));
            at_field_start = true;
            i += 1;
            continue;
        } else if c == enclosure && at_field_start {
            in_quotes = true;
        } else {
            current.push(c);
        }
        at_field_start = false;
        i += 1;
    }

    fields.push(current);
    fields
}
