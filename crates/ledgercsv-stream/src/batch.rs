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

//! Fixed-size batch processing for large imports.

use crate::driver::rows;
use crate::options::ParseOptions;
use ledgercsv_core::{CsvError, DataLine};
use std::path::Path;
use tracing::trace;

/// Feed rows to `handler` in batches of at most `batch_size`.
///
/// Batches are dispatched in source order, one at a time; only the current
/// batch is held in memory. The last batch may be shorter. Returns the total
/// number of rows handed to `handler`. A row error or handler error stops
/// processing immediately.
///
/// # Examples
///
/// ```rust
/// use ledgercsv_core::CsvError;
/// use ledgercsv_stream::{process_batches, rows_from_reader, ParseOptions};
///
/// let input = "id\n1\n2\n3\n4\n5\n";
/// let rows = rows_from_reader(input.as_bytes(), &ParseOptions::default()).unwrap();
///
/// let mut sizes = Vec::new();
/// let total = process_batches(rows, 2, |batch| {
///     sizes.push(batch.len());
///     Ok::<_, CsvError>(())
/// })
/// .unwrap();
///
/// assert_eq!(total, 5);
/// assert_eq!(sizes, vec![2, 2, 1]);
/// ```
pub fn process_batches<I, F, E>(rows: I, batch_size: usize, mut handler: F) -> Result<usize, E>
where
    I: IntoIterator<Item = Result<DataLine, CsvError>>,
    F: FnMut(Vec<DataLine>) -> Result<(), E>,
    E: From<CsvError>,
{
    let batch_size = batch_size.max(1);
    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0;
    let mut batches = 0usize;

    for row in rows {
        batch.push(row?);
        if batch.len() == batch_size {
            batches += 1;
            total += batch.len();
            trace!(batch = batches, rows = batch.len(), total, "dispatching batch");
            handler(std::mem::replace(&mut batch, Vec::with_capacity(batch_size)))?;
        }
    }

    if !batch.is_empty() {
        batches += 1;
        total += batch.len();
        trace!(batch = batches, rows = batch.len(), total, "dispatching batch");
        handler(batch)?;
    }

    Ok(total)
}

/// Open `path` and feed its rows to `handler` in batches.
pub fn process_file_batches<F, E>(
    path: impl AsRef<Path>,
    options: &ParseOptions,
    batch_size: usize,
    handler: F,
) -> Result<usize, E>
where
    F: FnMut(Vec<DataLine>) -> Result<(), E>,
    E: From<CsvError>,
{
    process_batches(rows(path, options)?, batch_size, handler)
}
