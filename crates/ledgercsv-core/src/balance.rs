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

//! Quote balance analysis.
//!
//! Decides whether a buffer holds a complete record or ends inside an open
//! quoted span. Doubled enclosures are escapes and cancel out; a record is
//! complete iff the number of remaining single enclosures is even. Summing
//! the parity of every enclosure run gives the same count in one pass.
//!
//! # Examples
//!
//! ```
//! use ledgercsv_core::balance::is_complete;
//!
//! assert!(is_complete(r#""a","b""#, '"'));
//! assert!(!is_complete(r#""650,01","Gutschrift"#, '"'));
//! assert!(is_complete(r#""say ""hi""""#, '"'));
//! ```

/// Number of enclosure characters left after removing every doubled pair.
pub fn unmatched_enclosures(buffer: &str, enclosure: char) -> usize {
    if enclosure.is_ascii() {
        return odd_runs_ascii(buffer.as_bytes(), enclosure as u8);
    }

    let mut odd = 0;
    let mut run = 0usize;
    for c in buffer.chars() {
        if c == enclosure {
            run += 1;
        } else {
            odd += run & 1;
            run = 0;
        }
    }
    odd + (run & 1)
}

fn odd_runs_ascii(bytes: &[u8], needle: u8) -> usize {
    let mut odd = 0;
    let mut run = 0usize;
    let mut last: Option<usize> = None;
    for pos in memchr::memchr_iter(needle, bytes) {
        match last {
            Some(prev) if prev + 1 == pos => run += 1,
            _ => {
                odd += run & 1;
                run = 1;
            }
        }
        last = Some(pos);
    }
    odd + (run & 1)
}

/// Whether `buffer` is a complete record with respect to `enclosure`.
#[inline]
pub fn is_complete(buffer: &str, enclosure: char) -> bool {
    unmatched_enclosures(buffer, enclosure) % 2 == 0
}
