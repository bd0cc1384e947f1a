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

//! Parse configuration for the streaming driver.

use ledgercsv_core::{Dialect, EnclosureStrictness, Limits, DEFAULT_ENCODING};

/// Default read buffer size (64KB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Options controlling how a source is turned into rows.
///
/// # Examples
///
/// ```rust
/// use ledgercsv_stream::ParseOptions;
/// use ledgercsv_core::Dialect;
///
/// let opts = ParseOptions::builder()
///     .dialect(Dialect::semicolon())
///     .depth(2)
///     .strict_consistency(true)
///     .build();
///
/// assert_eq!(opts.depth, Some(2));
/// assert!(opts.has_header);
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub dialect: Dialect,
    pub strictness: EnclosureStrictness,

    /// Forced wrap depth. `None` detects it per line.
    pub depth: Option<usize>,

    /// Whether the first logical line is a column header.
    ///
    /// Default: true
    pub has_header: bool,

    /// Drop records that are empty or whitespace only.
    ///
    /// Default: true
    pub skip_empty: bool,

    /// Fail on the first row whose field count differs from the header
    /// (or from the first row when there is no header).
    ///
    /// Default: false
    pub strict_consistency: bool,

    /// Treat a source that ends inside an open quoted span as an error
    /// instead of emitting the truncated record.
    ///
    /// Default: false
    pub strict_validation: bool,

    /// Encoding label recorded on the document. Input is always read as UTF-8.
    pub encoding: String,

    /// First physical line to read (1-based).
    ///
    /// Default: 1
    pub start_line: usize,

    /// Maximum number of physical lines to read, counted from `start_line`.
    pub max_lines: Option<usize>,

    /// Read buffer size in bytes.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    pub limits: Limits,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            strictness: EnclosureStrictness::default(),
            depth: None,
            has_header: true,
            skip_empty: true,
            strict_consistency: false,
            strict_validation: false,
            encoding: DEFAULT_ENCODING.to_string(),
            start_line: 1,
            max_lines: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            limits: Limits::default(),
        }
    }
}

impl ParseOptions {
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }

    /// Options for headerless input in the given dialect.
    pub fn headerless(dialect: Dialect) -> Self {
        Self {
            dialect,
            has_header: false,
            ..Self::default()
        }
    }
}

/// Fluent builder for [`ParseOptions`].
#[derive(Debug, Clone)]
pub struct ParseOptionsBuilder {
    options: ParseOptions,
}

impl ParseOptionsBuilder {
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.options.dialect = dialect;
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.options.dialect.delimiter = delimiter;
        self
    }

    pub fn enclosure(mut self, enclosure: char) -> Self {
        self.options.dialect.enclosure = enclosure;
        self
    }

    /// Require every line to be wrapped in `start` ... `close`.
    pub fn outer(mut self, start: char, close: char) -> Self {
        self.options.dialect = self.options.dialect.with_outer(start, close);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strictness = if strict {
            EnclosureStrictness::Strict
        } else {
            EnclosureStrictness::Lenient
        };
        self
    }

    /// Force the wrap depth instead of detecting it.
    pub fn depth(mut self, depth: usize) -> Self {
        self.options.depth = Some(depth);
        self
    }

    pub fn detect_depth(mut self) -> Self {
        self.options.depth = None;
        self
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.options.has_header = has_header;
        self
    }

    pub fn skip_empty(mut self, skip: bool) -> Self {
        self.options.skip_empty = skip;
        self
    }

    pub fn strict_consistency(mut self, strict: bool) -> Self {
        self.options.strict_consistency = strict;
        self
    }

    pub fn strict_validation(mut self, strict: bool) -> Self {
        self.options.strict_validation = strict;
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.options.encoding = encoding.into();
        self
    }

    pub fn start_line(mut self, line: usize) -> Self {
        self.options.start_line = line.max(1);
        self
    }

    pub fn max_lines(mut self, max: usize) -> Self {
        self.options.max_lines = Some(max);
        self
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.options.buffer_size = size;
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    pub fn max_rows(mut self, max: usize) -> Self {
        self.options.limits.max_rows = max;
        self
    }

    pub fn max_continuation_lines(mut self, max: usize) -> Self {
        self.options.limits.max_continuation_lines = max;
        self
    }

    pub fn build(self) -> ParseOptions {
        self.options
    }
}

impl Default for ParseOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
