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

//! Shared test fixtures and utilities for LedgerCSV.
//!
//! This crate provides real-world shaped bank export samples, malformed
//! inputs, generators for large sources and a temp-file helper, so the
//! parser crates test against the same data.
//!
//! # Quick Start
//!
//! ```rust
//! use ledgercsv_test::fixtures;
//!
//! let sample = fixtures::datev_depth_two();
//! assert_eq!(sample.depth, 2);
//! assert_eq!(sample.dialect.delimiter, ';');
//!
//! for sample in fixtures::all() {
//!     assert!(!sample.text.is_empty());
//! }
//!
//! for (name, text, _kind) in fixtures::errors::invalid_samples() {
//!     assert!(!name.is_empty(), "{text}");
//! }
//! ```

pub mod fixtures;

pub use fixtures::{generate::bank_export, Sample};

use std::io::Write;
use tempfile::NamedTempFile;

/// Write `contents` to a fresh temporary file.
///
/// The file is removed when the returned handle is dropped.
pub fn temp_csv(contents: &str) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
