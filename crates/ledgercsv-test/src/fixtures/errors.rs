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

//! Malformed inputs for error handling tests.

use ledgercsv_core::CsvErrorKind;

/// Invalid sources with the error kind each must raise.
///
/// Each tuple contains (name, text, expected_error_kind). The expectation
/// holds for a headerless comma parse with strict enclosure matching,
/// strict consistency and strict validation all enabled.
pub fn invalid_samples() -> Vec<(&'static str, &'static str, CsvErrorKind)> {
    vec![
        ("blank", "  \n\t\n", CsvErrorKind::EmptyInput),
        (
            "mixed_depth",
            "\"\"A\"\",\"B\"\n",
            CsvErrorKind::UnresolvableEnclosureDepth,
        ),
        (
            "trailing_bare_delimiter",
            "\"Feld1\",\"Feld2\",\n",
            CsvErrorKind::UnresolvableEnclosureDepth,
        ),
        (
            "unterminated_quote",
            "\"a\",\"b\"\n\"c\",\"d\nstill open\n",
            CsvErrorKind::UnbalancedQuoting,
        ),
        (
            "ragged_rows",
            "\"a\",\"b\"\n\"c\"\n",
            CsvErrorKind::InconsistentFieldCount,
        ),
    ]
}

/// Lines that cannot be unwrapped at depth 1.
///
/// Each tuple contains (name, line, column).
pub fn depth_one_failures() -> Vec<(&'static str, &'static str, usize)> {
    vec![
        ("depth_two_line", "\"\"A\"\",\"\"B\"\",\"\"C\"\"", 0),
        ("stray_enclosure", "\"ok\",\"a\"b\"", 1),
        ("unterminated_last", "\"ok\",\"open", 1),
    ]
}
