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

//! Pre-built bank export samples.

pub mod errors;
pub mod generate;

use ledgercsv_core::Dialect;

/// A sample export together with what a correct parse yields.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    pub text: &'static str,
    pub dialect: Dialect,
    /// Wrap depth every line uses (0 for unquoted exports).
    pub depth: usize,
    pub header: &'static [&'static str],
    /// Number of data rows.
    pub rows: usize,
}

/// All samples in this module.
pub fn all() -> Vec<Sample> {
    vec![
        simple_quoted(),
        datev_depth_two(),
        paypal_multiline(),
        trailing_delimiter(),
        tab_unquoted(),
        bracketed(),
    ]
}

/// Plain RFC 4180 style export.
pub fn simple_quoted() -> Sample {
    Sample {
        name: "simple_quoted",
        text: "\"Datum\",\"Betrag\",\"Text\"\n\
               \"01.05.2025\",\"12.50\",\"Kaffee, Milch\"\n\
               \"02.05.2025\",\"-3.00\",\"Say \"\"hi\"\"\"\n",
        dialect: Dialect::comma(),
        depth: 1,
        header: &["Datum", "Betrag", "Text"],
        rows: 2,
    }
}

/// Semicolon export whose exporter wrapped every field twice.
pub fn datev_depth_two() -> Sample {
    Sample {
        name: "datev_depth_two",
        text: "\"\"Umsatz\"\";\"\"Soll/Haben\"\";\"\"Buchungstext\"\";\"\"Belegfeld\"\"\n\
               \"\"1.250,00\"\";\"\"S\"\";\"\"Miete; Mai\"\";\"\"RE-1001\"\"\n\
               \"\"89,90\"\";\"\"H\"\";\"\"Erstattung \"\"Porto\"\"\"\";\"\"RE-1002\"\"\n\
               \"\"12,00\"\";\"\"S\"\";\"\"\"\";\"\"RE-1003\"\"\n",
        dialect: Dialect::semicolon(),
        depth: 2,
        header: &["Umsatz", "Soll/Haben", "Buchungstext", "Belegfeld"],
        rows: 3,
    }
}

/// Export with a purpose field spanning three physical lines.
pub fn paypal_multiline() -> Sample {
    Sample {
        name: "paypal_multiline",
        text: "\"Datum\",\"Name\",\"Betrag\",\"Verwendungszweck\"\n\
               \"01.05.2025\",\"PayPal Europe\",\"650,01\",\"Gutschrift\n\
               PAYPAL *SHOP\n\
               PAYPAL\"\n\
               \"02.05.2025\",\"Miete\",\"-900,00\",\"\"\n",
        dialect: Dialect::comma(),
        depth: 1,
        header: &["Datum", "Name", "Betrag", "Verwendungszweck"],
        rows: 2,
    }
}

/// Export that drops quoting on a trailing empty column.
pub fn trailing_delimiter() -> Sample {
    Sample {
        name: "trailing_delimiter",
        text: "\"Konto\",\"Name\",\n\
               \"DE01\",\"Feld1\",\n\
               \"DE02\",\"Feld2\",\n",
        dialect: Dialect::comma(),
        depth: 1,
        header: &["Konto", "Name", ""],
        rows: 2,
    }
}

/// Unquoted tab separated export.
pub fn tab_unquoted() -> Sample {
    Sample {
        name: "tab_unquoted",
        text: "Datum\tBetrag\n01.05.2025\t12,00\n\n02.05.2025\t-4,10\n",
        dialect: Dialect::tab(),
        depth: 0,
        header: &["Datum", "Betrag"],
        rows: 2,
    }
}

/// Export that wraps each record in brackets.
pub fn bracketed() -> Sample {
    Sample {
        name: "bracketed",
        text: "[\"Datum\",\"Betrag\"]\n[\"01.05.2025\",\"12,00\"]\n",
        dialect: Dialect::comma().with_outer('[', ']'),
        depth: 1,
        header: &["Datum", "Betrag"],
        rows: 1,
    }
}
