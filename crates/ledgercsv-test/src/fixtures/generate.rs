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

//! Generators for large sources.

/// Build a semicolon separated export with a header and `rows` data rows.
///
/// Every field is wrapped at `depth`. For odd depths every tenth row carries
/// a purpose field spanning two physical lines, so the source has
/// `1 + rows + rows / 10` physical lines. Even-depth runs never leave a
/// quoted span open, so even depths stay one physical line per row.
pub fn bank_export(rows: usize, depth: usize) -> String {
    let q = "\"".repeat(depth);
    let mut out = String::with_capacity(rows * 64);
    out.push_str(&format!(
        "{q}Buchungstag{q};{q}Betrag{q};{q}Verwendungszweck{q}\n"
    ));
    for i in 0..rows {
        let purpose = if depth % 2 == 1 && i % 10 == 9 {
            format!("Sammelbuchung {i}\nTeil 2")
        } else {
            format!("Buchung {i}")
        };
        out.push_str(&format!(
            "{q}{:02}.05.2025{q};{q}{},{:02}{q};{q}{purpose}{q}\n",
            i % 28 + 1,
            i * 3,
            i % 100
        ));
    }
    out
}
