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

//! Dialect description, strictness policy and security limits.

/// Characters that describe one delimited-text dialect.
///
/// # Examples
///
/// ```
/// use ledgercsv_core::Dialect;
///
/// let dialect = Dialect::semicolon().with_outer('[', ']');
/// assert_eq!(dialect.delimiter, ';');
/// assert_eq!(dialect.outer_start, Some('['));
/// assert!(dialect.has_outer());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dialect {
    /// Field separator (default: `,`).
    pub delimiter: char,
    /// Field enclosure (default: `"`).
    pub enclosure: char,
    /// Character every record must start with, if any.
    pub outer_start: Option<char>,
    /// Character every record must end with, if any.
    pub outer_close: Option<char>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::comma()
    }
}

impl Dialect {
    /// Create a dialect without outer wrapper.
    pub const fn new(delimiter: char, enclosure: char) -> Self {
        Self {
            delimiter,
            enclosure,
            outer_start: None,
            outer_close: None,
        }
    }

    /// Comma separated, double quoted.
    pub const fn comma() -> Self {
        Self::new(',', '"')
    }

    /// Semicolon separated, double quoted (DATEV and most German bank exports).
    pub const fn semicolon() -> Self {
        Self::new(';', '"')
    }

    /// Tab separated, double quoted.
    pub const fn tab() -> Self {
        Self::new('\t', '"')
    }

    /// Require every record to be wrapped in `start` ... `close`.
    pub const fn with_outer(mut self, start: char, close: char) -> Self {
        self.outer_start = Some(start);
        self.outer_close = Some(close);
        self
    }

    /// Whether an outer wrapper is configured.
    #[inline]
    pub fn has_outer(&self) -> bool {
        self.outer_start.is_some() || self.outer_close.is_some()
    }

    /// Strip the configured outer wrapper from `line`.
    ///
    /// Returns `None` if a wrapper is configured and `line` does not carry it.
    /// Lines are returned unchanged when no wrapper is configured.
    pub fn strip_outer<'a>(&self, line: &'a str) -> Option<&'a str> {
        let mut body = line;
        if let Some(start) = self.outer_start {
            body = body.strip_prefix(start)?;
        }
        if let Some(close) = self.outer_close {
            body = body.strip_suffix(close)?;
        }
        Some(body)
    }
}

/// Policy for lines whose fields are not uniformly wrapped.
///
/// `Strict` requires every field, including empty ones, to carry the same
/// wrap depth. `Lenient` tolerates completely unwrapped fields next to
/// wrapped ones, which is what exporters that drop quoting on trailing empty
/// columns produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnclosureStrictness {
    Strict,
    #[default]
    Lenient,
}

impl EnclosureStrictness {
    #[inline]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Configurable limits for parser safety.
///
/// These bound the resources a single malformed or hostile file can consume.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Maximum physical lines appended to one open record (default: 1000).
    pub max_continuation_lines: usize,
    /// Largest wrap depth the detector will consider (default: 8).
    pub max_wrap_depth: usize,
    /// Maximum logical line length in bytes (default: 1MB).
    pub max_line_length: usize,
    /// Maximum number of data rows (default: 10M).
    pub max_rows: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_continuation_lines: 1_000,
            max_wrap_depth: 8,
            max_line_length: 1024 * 1024, // 1MB
            max_rows: 10_000_000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_continuation_lines: usize::MAX,
            max_wrap_depth: usize::MAX,
            max_line_length: usize::MAX,
            max_rows: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect() {
        let d = Dialect::default();
        assert_eq!(d.delimiter, ',');
        assert_eq!(d.enclosure, '"');
        assert!(!d.has_outer());
    }

    #[test]
    fn test_presets() {
        assert_eq!(Dialect::semicolon().delimiter, ';');
        assert_eq!(Dialect::tab().delimiter, '\t');
    }

    #[test]
    fn test_strip_outer_present() {
        let d = Dialect::comma().with_outer('[', ']');
        assert_eq!(d.strip_outer("[\"a\",\"b\"]"), Some("\"a\",\"b\""));
    }

    #[test]
    fn test_strip_outer_missing_close() {
        let d = Dialect::comma().with_outer('[', ']');
        assert_eq!(d.strip_outer("[\"a\""), None);
    }

    #[test]
    fn test_strip_outer_missing_start() {
        let d = Dialect::comma().with_outer('[', ']');
        assert_eq!(d.strip_outer("\"a\"]"), None);
    }

    #[test]
    fn test_strip_outer_none_configured() {
        assert_eq!(Dialect::comma().strip_outer("a,b"), Some("a,b"));
    }

    #[test]
    fn test_strip_outer_only_start() {
        let mut d = Dialect::comma();
        d.outer_start = Some('<');
        assert!(d.has_outer());
        assert_eq!(d.strip_outer("<a,b"), Some("a,b"));
    }

    #[test]
    fn test_default_strictness_is_lenient() {
        assert_eq!(EnclosureStrictness::default(), EnclosureStrictness::Lenient);
        assert!(EnclosureStrictness::Strict.is_strict());
    }

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_continuation_lines, 1_000);
        assert_eq!(limits.max_wrap_depth, 8);
        assert_eq!(limits.max_line_length, 1024 * 1024);
        assert_eq!(limits.max_rows, 10_000_000);
    }

    #[test]
    fn test_unlimited() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_rows, usize::MAX);
        assert_eq!(limits.max_wrap_depth, usize::MAX);
    }
}
