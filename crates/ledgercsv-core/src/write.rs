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

//! Serializing fields at a given wrap depth.
//!
//! The inverse of extraction: every enclosure inside a value is doubled and
//! the result is wrapped in `depth` enclosures on each side. Depth `0`
//! writes values verbatim.

use crate::config::Dialect;
use crate::line::Line;

/// Wrap one value at `depth`.
///
/// ```
/// use ledgercsv_core::write::wrap_field;
///
/// assert_eq!(wrap_field("A", '"', 2), r#"""A"""#);
/// assert_eq!(wrap_field(r#"5" pipe"#, '"', 1), r#""5"" pipe""#);
/// assert_eq!(wrap_field("", '"', 2), r#""""""#);
/// ```
pub fn wrap_field(value: &str, enclosure: char, depth: usize) -> String {
    if depth == 0 {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2 * depth);
    out.extend(std::iter::repeat(enclosure).take(depth));
    for c in value.chars() {
        if c == enclosure {
            out.push(enclosure);
        }
        out.push(c);
    }
    out.extend(std::iter::repeat(enclosure).take(depth));
    out
}

/// Serialize `values` as one record of `dialect`, including any outer wrapper.
pub fn write_line<S: AsRef<str>>(values: &[S], dialect: &Dialect, depth: usize) -> String {
    let mut out = String::new();
    if let Some(start) = dialect.outer_start {
        out.push(start);
    }
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(dialect.delimiter);
        }
        out.push_str(&wrap_field(value.as_ref(), dialect.enclosure, depth));
    }
    if let Some(close) = dialect.outer_close {
        out.push(close);
    }
    out
}

/// Serialize a parsed line back at `depth`, keeping its delimiter and enclosure.
pub fn write_parsed(line: &Line, depth: usize) -> String {
    let dialect = Dialect::new(line.delimiter(), line.enclosure());
    let values: Vec<&str> = line.values().collect();
    write_line(&values, &dialect, depth)
}
