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

//! Core analysis and data model for dialect-tolerant delimited text.
//!
//! This crate turns one logical line at a time into typed fields and
//! collects them into a [`Document`]. It tolerates the quirks of legacy
//! banking exports:
//!
//! - **Repeated enclosures**: fields wrapped in `""value""` (or deeper) when
//!   an exporter applied its escaping twice
//! - **Outer wrappers**: whole records bracketed by a second character pair
//! - **Dialects**: any delimiter and enclosure character
//!
//! Reading physical lines and joining multi-line records is the job of
//! `ledgercsv-stream`; this crate holds the pieces it drives:
//!
//! - [`balance`]: quote balance analysis deciding whether a buffer is a
//!   complete record
//! - [`enclosure`]: detection of the uniform wrap depth of a line
//! - [`extract`]: splitting a line into field values
//! - [`Document`] / [`DocumentBuilder`]: the table model and its
//!   consistency check
//! - [`write`]: serializing values back at a chosen depth
//!
//! # Example
//!
//! ```
//! use ledgercsv_core::{DataLine, Dialect, DocumentBuilder, EnclosureStrictness, FieldExtractor, HeaderLine};
//!
//! let extractor = FieldExtractor::new(Dialect::semicolon(), EnclosureStrictness::Lenient);
//! let mut builder = DocumentBuilder::new(Dialect::semicolon());
//! builder.set_header(HeaderLine::parse(r#"""Datum"";""Betrag"""#, &extractor, None, 1).unwrap());
//! builder.add_row(DataLine::parse(r#"""02.01.2024"";""-12,50"""#, &extractor, None, 2).unwrap());
//!
//! let doc = builder.build_strict().unwrap();
//! assert_eq!(doc.value(0, "Betrag"), Some("-12,50"));
//! ```

pub mod balance;
mod config;
mod document;
pub mod enclosure;
pub mod error;
pub mod extract;
mod line;
pub mod write;

pub use balance::is_complete;
pub use config::{Dialect, EnclosureStrictness, Limits};
pub use document::{Document, DocumentBuilder, DEFAULT_ENCODING};
pub use enclosure::{detect_depth, Detection, EnclosureDetector};
pub use error::{CsvError, CsvErrorKind, CsvResult};
pub use extract::FieldExtractor;
pub use line::{DataLine, Field, HeaderLine, Line};
