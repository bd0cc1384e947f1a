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

//! Streaming ingestion for dialect-tolerant CSV.
//!
//! This crate turns a source of physical lines into rows, one logical line
//! at a time. A quoted field may span several physical lines; the
//! [`LogicalLineResolver`] joins them before any field is extracted, so
//! memory use is bounded by the longest record rather than the file size.
//!
//! # Entry points
//!
//! - [`parse_str`] / [`parse_reader`]: parse a whole source into a [`Document`]
//! - [`parse_file`]: parse a file, honoring a start line and line cap
//! - [`parse_file_range`]: parse physical lines `from..=to`, re-reading the header
//! - [`rows`] / [`rows_from_reader`]: lazy [`RowIter`] without building a document
//! - [`process_batches`] / [`process_file_batches`]: fixed-size batch callbacks
//!
//! # Example
//!
//! ```rust
//! use ledgercsv_stream::{parse_str, ParseOptions};
//! use ledgercsv_core::Dialect;
//!
//! let input = "Betrag;Text\n\"650,01\";\"Gutschrift\nPAYPAL\"\n";
//! let opts = ParseOptions::builder().dialect(Dialect::semicolon()).build();
//! let doc = parse_str(input, &opts).unwrap();
//!
//! assert_eq!(doc.count_rows(), 1);
//! assert_eq!(doc.value(0, "Text"), Some("Gutschrift\nPAYPAL"));
//! ```
//!
//! # Errors
//!
//! Every failure is a [`CsvError`] carrying the physical line it refers to.
//! Iterators stop after the first error.

mod batch;
mod driver;
mod options;
mod reader;
mod resolver;

pub use batch::{process_batches, process_file_batches};
pub use driver::{parse_file, parse_file_range, parse_reader, parse_str, rows, rows_from_reader, RowIter};
pub use options::{ParseOptions, ParseOptionsBuilder, DEFAULT_BUFFER_SIZE};
pub use reader::{LineEnding, LineReader, PhysicalLine};
pub use resolver::{LogicalLine, LogicalLineResolver};

// Re-export core types for convenience
pub use ledgercsv_core::{
    CsvError, CsvErrorKind, CsvResult, DataLine, Dialect, Document, EnclosureStrictness,
    HeaderLine, Limits,
};
