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

//! Error types for delimited text ingestion.
//!
//! Every parse failure carries the 1-based line number it was raised on and
//! a bounded, sanitized preview of the offending text. Errors raised by
//! components that do not know the line number (the field extractor, the
//! enclosure detector) carry line `0` until the caller attaches the real
//! line with [`CsvError::at_line`].
//!
//! # Examples
//!
//! ```
//! use ledgercsv_core::{CsvError, CsvErrorKind};
//!
//! let err = CsvError::unwrap_failure(2, "\"abc", "unterminated field").at_line(17);
//! assert_eq!(err.kind(), CsvErrorKind::FieldUnwrapFailure);
//! assert_eq!(err.line(), Some(17));
//! assert!(err.to_string().contains("line 17"));
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of characters kept in an error preview.
pub const PREVIEW_LIMIT: usize = 100;

/// Placeholder substituted for control characters in previews.
pub const CONTROL_PLACEHOLDER: char = '·';

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsvErrorKind {
    /// Blank source.
    EmptyInput,
    /// File missing or unreadable.
    UnreadableSource,
    /// Header requested but absent.
    MissingHeader,
    /// A record never completes, or exceeds the continuation limit.
    UnbalancedQuoting,
    /// Row and header field counts differ.
    InconsistentFieldCount,
    /// Fields disagree on their wrap depth in strict mode.
    UnresolvableEnclosureDepth,
    /// A segment cannot be unwrapped at the declared depth.
    FieldUnwrapFailure,
    /// Read failure after the source was opened.
    Io,
    /// Configured security limit exceeded.
    LimitExceeded,
}

impl fmt::Display for CsvErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "EmptyInput"),
            Self::UnreadableSource => write!(f, "UnreadableSource"),
            Self::MissingHeader => write!(f, "MissingHeader"),
            Self::UnbalancedQuoting => write!(f, "UnbalancedQuoting"),
            Self::InconsistentFieldCount => write!(f, "InconsistentFieldCount"),
            Self::UnresolvableEnclosureDepth => write!(f, "UnresolvableEnclosureDepth"),
            Self::FieldUnwrapFailure => write!(f, "FieldUnwrapFailure"),
            Self::Io => write!(f, "IoError"),
            Self::LimitExceeded => write!(f, "LimitExceeded"),
        }
    }
}

/// Errors raised while turning raw lines into a [`Document`](crate::Document).
#[derive(Error, Debug)]
pub enum CsvError {
    /// The source contained no records.
    #[error("Empty input: no records found")]
    EmptyInput,

    /// The source could not be opened or read.
    #[error("Unreadable source {}: {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A header line was requested but the source has none.
    #[error("Missing header line")]
    MissingHeader,

    /// Quoting never balanced.
    #[error("Unbalanced quoting at line {line}: {message} (near `{preview}`)")]
    UnbalancedQuoting {
        line: usize,
        preview: String,
        message: String,
    },

    /// A row's field count differs from the header (or first row).
    #[error(
        "Inconsistent field count at line {line}: expected {expected} fields, got {actual} (near `{preview}`)"
    )]
    InconsistentFieldCount {
        line: usize,
        preview: String,
        expected: usize,
        actual: usize,
    },

    /// No single wrap depth fits the whole line.
    #[error("Unresolvable enclosure depth at line {line}: {reason} (near `{preview}`)")]
    UnresolvableEnclosureDepth {
        line: usize,
        preview: String,
        reason: String,
    },

    /// A segment cannot be unwrapped at the detected or declared depth.
    #[error("Field unwrap failure at line {line}, column {column}: {reason} (near `{preview}`)")]
    FieldUnwrapFailure {
        line: usize,
        column: usize,
        preview: String,
        reason: String,
    },

    /// IO error while pulling lines from an opened source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configured security limit was exceeded.
    #[error(
        "Limit exceeded at line {line}: {what} {actual} exceeds maximum {limit} (near `{preview}`)"
    )]
    LimitExceeded {
        line: usize,
        preview: String,
        what: &'static str,
        limit: usize,
        actual: usize,
    },
}

impl CsvError {
    /// Create an unbalanced quoting error.
    pub fn unbalanced(line: usize, text: &str, message: impl Into<String>) -> Self {
        Self::UnbalancedQuoting {
            line,
            preview: preview(text),
            message: message.into(),
        }
    }

    /// Create an unresolvable depth error. The line number is attached later.
    pub fn unresolvable_depth(text: &str, reason: impl Into<String>) -> Self {
        Self::UnresolvableEnclosureDepth {
            line: 0,
            preview: preview(text),
            reason: reason.into(),
        }
    }

    /// Create a field unwrap error. The line number is attached later.
    pub fn unwrap_failure(column: usize, text: &str, reason: impl Into<String>) -> Self {
        Self::FieldUnwrapFailure {
            line: 0,
            column,
            preview: preview(text),
            reason: reason.into(),
        }
    }

    /// Create an unreadable source error.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadableSource {
            path: path.into(),
            source,
        }
    }

    /// Attach a line number to an error that does not carry one yet.
    ///
    /// Errors that already know their line keep it.
    pub fn at_line(mut self, n: usize) -> Self {
        match &mut self {
            Self::UnbalancedQuoting { line, .. }
            | Self::InconsistentFieldCount { line, .. }
            | Self::UnresolvableEnclosureDepth { line, .. }
            | Self::FieldUnwrapFailure { line, .. }
            | Self::LimitExceeded { line, .. } => {
                if *line == 0 {
                    *line = n;
                }
            }
            _ => {}
        }
        self
    }

    /// The kind of this error.
    pub fn kind(&self) -> CsvErrorKind {
        match self {
            Self::EmptyInput => CsvErrorKind::EmptyInput,
            Self::UnreadableSource { .. } => CsvErrorKind::UnreadableSource,
            Self::MissingHeader => CsvErrorKind::MissingHeader,
            Self::UnbalancedQuoting { .. } => CsvErrorKind::UnbalancedQuoting,
            Self::InconsistentFieldCount { .. } => CsvErrorKind::InconsistentFieldCount,
            Self::UnresolvableEnclosureDepth { .. } => CsvErrorKind::UnresolvableEnclosureDepth,
            Self::FieldUnwrapFailure { .. } => CsvErrorKind::FieldUnwrapFailure,
            Self::Io(_) => CsvErrorKind::Io,
            Self::LimitExceeded { .. } => CsvErrorKind::LimitExceeded,
        }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnbalancedQuoting { line, .. }
            | Self::InconsistentFieldCount { line, .. }
            | Self::UnresolvableEnclosureDepth { line, .. }
            | Self::FieldUnwrapFailure { line, .. }
            | Self::LimitExceeded { line, .. } if *line > 0 => Some(*line),
            _ => None,
        }
    }

    /// Get the sanitized preview if available.
    pub fn preview(&self) -> Option<&str> {
        match self {
            Self::UnbalancedQuoting { preview, .. }
            | Self::UnresolvableEnclosureDepth { preview, .. }
            | Self::FieldUnwrapFailure { preview, .. }
            | Self::InconsistentFieldCount { preview, .. }
            | Self::LimitExceeded { preview, .. } => Some(preview),
            _ => None,
        }
    }
}

/// Result type for ingestion operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Build a bounded preview of `text` with control characters made visible.
///
/// ```
/// use ledgercsv_core::error::preview;
///
/// assert_eq!(preview("a\tb\nc"), "a·b·c");
/// assert_eq!(preview(&"x".repeat(150)).chars().count(), 101);
/// ```
pub fn preview(text: &str) -> String {
    let mut out: String = text
        .chars()
        .take(PREVIEW_LIMIT)
        .map(|c| if c.is_control() { CONTROL_PLACEHOLDER } else { c })
        .collect();
    if text.chars().nth(PREVIEW_LIMIT).is_some() {
        out.push('…');
    }
    out
}
