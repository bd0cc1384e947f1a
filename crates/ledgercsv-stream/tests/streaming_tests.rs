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

//! Integration tests for ledgercsv-stream

use ledgercsv_core::{CsvError, CsvErrorKind, DataLine, Dialect};
use ledgercsv_stream::{
    parse_file, parse_file_range, parse_str, process_file_batches, rows, LineReader,
    LogicalLineResolver, ParseOptions,
};
use ledgercsv_test::{bank_export, fixtures, temp_csv};
use std::io::Cursor;

fn headerless() -> ParseOptions {
    ParseOptions::builder().has_header(false).build()
}

fn values(row: &DataLine) -> Vec<&str> {
    row.values().collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("ledgercsv_stream=trace,ledgercsv_core=debug")
        .try_init();
}

// ==================== Scenario Tests ====================

#[test]
fn test_scenario_depth_one() {
    let opts = ParseOptions::builder().has_header(false).depth(1).build();
    let doc = parse_str("\"A\",\"B\",\"C\"", &opts).unwrap();
    assert_eq!(values(doc.row(0).unwrap()), vec!["A", "B", "C"]);
}

#[test]
fn test_scenario_depth_two_strict() {
    let input = "\"\"A\"\",\"\"B\"\",\"\"C\"\"";
    let opts = ParseOptions::builder()
        .has_header(false)
        .strict(true)
        .depth(2)
        .build();
    let doc = parse_str(input, &opts).unwrap();
    assert_eq!(values(doc.row(0).unwrap()), vec!["A", "B", "C"]);

    let opts = ParseOptions::builder()
        .has_header(false)
        .strict(true)
        .depth(1)
        .build();
    let err = parse_str(input, &opts).unwrap_err();
    assert_eq!(err.kind(), CsvErrorKind::FieldUnwrapFailure);
    assert_eq!(err.line(), Some(1));
}

#[test]
fn test_scenario_trailing_bare_delimiter() {
    let input = "\"Feld1\",\"Feld2\",";
    let doc = parse_str(input, &headerless()).unwrap();
    assert_eq!(values(doc.row(0).unwrap()), vec!["Feld1", "Feld2", ""]);

    let opts = ParseOptions::builder().has_header(false).strict(true).build();
    let err = parse_str(input, &opts).unwrap_err();
    assert_eq!(err.kind(), CsvErrorKind::UnresolvableEnclosureDepth);
}

#[test]
fn test_scenario_multiline_field() {
    let input = "\"650,01\",\"Gutschrift\nPAYPAL Europe S.a.r.l. PAYPAL\",\"\"\n";
    let doc = parse_str(input, &headerless()).unwrap();
    assert_eq!(doc.count_rows(), 1);

    let row = doc.row(0).unwrap();
    assert_eq!(row.get(0), Some("650,01"));
    assert_eq!(row.get(1), Some("Gutschrift\nPAYPAL Europe S.a.r.l. PAYPAL"));
    assert_eq!(row.line_number(), 2);
}

#[test]
fn test_scenario_inconsistent_row() {
    let input = "a,b,c\n1,2,3\n1,2,3,4\n";
    let doc = parse_str(input, &ParseOptions::default()).unwrap();
    assert!(!doc.is_consistent());

    let opts = ParseOptions::builder().strict_consistency(true).build();
    match parse_str(input, &opts).unwrap_err() {
        CsvError::InconsistentFieldCount { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {other:?}"),
    }
}

// ==================== Fixture Tests ====================

#[test]
fn test_all_fixtures_parse() {
    for sample in fixtures::all() {
        let opts = ParseOptions::builder().dialect(sample.dialect).build();
        let doc = parse_str(sample.text, &opts)
            .unwrap_or_else(|e| panic!("{} failed: {}", sample.name, e));

        let header: Vec<_> = doc.header().unwrap().values().collect();
        assert_eq!(header, sample.header, "{}", sample.name);
        assert_eq!(doc.count_rows(), sample.rows, "{}", sample.name);
        assert!(doc.is_consistent(), "{}", sample.name);
    }
}

#[test]
fn test_fixtures_with_forced_depth() {
    for sample in fixtures::all() {
        let opts = ParseOptions::builder()
            .dialect(sample.dialect)
            .depth(sample.depth)
            .build();
        let doc = parse_str(sample.text, &opts)
            .unwrap_or_else(|e| panic!("{} failed: {}", sample.name, e));
        assert_eq!(doc.count_rows(), sample.rows, "{}", sample.name);
    }
}

#[test]
fn test_datev_values() {
    let sample = fixtures::datev_depth_two();
    let opts = ParseOptions::builder().dialect(sample.dialect).build();
    let doc = parse_str(sample.text, &opts).unwrap();

    assert_eq!(doc.value(0, "Buchungstext"), Some("Miete; Mai"));
    assert_eq!(doc.value(1, "Buchungstext"), Some("Erstattung \"Porto\""));
    assert_eq!(doc.value(2, "Buchungstext"), Some(""));
    assert_eq!(doc.value(2, "Belegfeld"), Some("RE-1003"));
    assert_eq!(doc.delimiter(), ';');
}

#[test]
fn test_paypal_line_numbers() {
    let sample = fixtures::paypal_multiline();
    let doc = parse_str(sample.text, &ParseOptions::default()).unwrap();

    assert_eq!(doc.row(0).unwrap().line_number(), 4);
    assert_eq!(doc.row(1).unwrap().line_number(), 5);
    assert_eq!(
        doc.value(0, "Verwendungszweck"),
        Some("Gutschrift\nPAYPAL *SHOP\nPAYPAL")
    );
}

#[test]
fn test_invalid_samples_strict() {
    let opts = ParseOptions::builder()
        .has_header(false)
        .strict(true)
        .strict_consistency(true)
        .strict_validation(true)
        .build();

    for (name, text, kind) in fixtures::errors::invalid_samples() {
        let err = parse_str(text, &opts).unwrap_err();
        assert_eq!(err.kind(), kind, "{name}");
    }
}

#[test]
fn test_depth_one_failures_report_column() {
    let opts = ParseOptions::builder().has_header(false).depth(1).build();
    for (name, line, column) in fixtures::errors::depth_one_failures() {
        match parse_str(line, &opts).unwrap_err() {
            CsvError::FieldUnwrapFailure {
                line: at,
                column: col,
                ..
            } => {
                assert_eq!(at, 1, "{name}");
                assert_eq!(col, column, "{name}");
            }
            other => panic!("{name}: unexpected error {other:?}"),
        }
    }
}

// ==================== Resolver Tests ====================

#[test]
fn test_resolver_over_generated_export() {
    let text = bank_export(50, 1);
    let lines: Vec<_> = LogicalLineResolver::new(LineReader::new(Cursor::new(text)), '"')
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(lines.len(), 51);
    let joined: Vec<_> = lines.iter().filter(|l| l.physical_lines() > 1).collect();
    assert_eq!(joined.len(), 5);
    assert!(joined.iter().all(|l| l.is_complete()));
}

#[test]
fn test_truncated_file_is_flagged() {
    init_tracing();
    let text = "\"a\",\"b\"\n\"c\",\"never closed\nstill going\n";
    let lines: Vec<_> = LogicalLineResolver::new(LineReader::new(Cursor::new(text)), '"')
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].is_complete());
    assert!(!lines[1].is_complete());
    assert_eq!(lines[1].first_line(), 2);

    let doc = parse_str(text, &headerless()).unwrap();
    assert_eq!(doc.count_rows(), 2);
}

// ==================== File Tests ====================

#[test]
fn test_parse_file() {
    init_tracing();
    let file = temp_csv(&bank_export(40, 1)).unwrap();
    let opts = ParseOptions::builder().dialect(Dialect::semicolon()).build();
    let doc = parse_file(file.path(), &opts).unwrap();

    assert_eq!(doc.count_rows(), 40);
    assert!(doc.is_consistent());
    assert_eq!(doc.value(9, "Verwendungszweck"), Some("Sammelbuchung 9\nTeil 2"));
}

#[test]
fn test_parse_file_depth_three() {
    let file = temp_csv(&bank_export(15, 3)).unwrap();
    let opts = ParseOptions::builder()
        .dialect(Dialect::semicolon())
        .strict(true)
        .build();
    let doc = parse_file(file.path(), &opts).unwrap();

    assert_eq!(doc.count_rows(), 15);
    assert_eq!(doc.value(0, "Betrag"), Some("0,00"));
    assert_eq!(doc.value(9, "Verwendungszweck"), Some("Sammelbuchung 9\nTeil 2"));
}

#[test]
fn test_parse_file_max_lines() {
    let file = temp_csv(&bank_export(10, 2)).unwrap();
    let opts = ParseOptions::builder()
        .dialect(Dialect::semicolon())
        .max_lines(4)
        .build();
    let doc = parse_file(file.path(), &opts).unwrap();
    assert_eq!(doc.count_rows(), 3);
}

#[test]
fn test_parse_file_errors() {
    let opts = ParseOptions::default();

    let err = parse_file("/nonexistent/export.csv", &opts).unwrap_err();
    assert_eq!(err.kind(), CsvErrorKind::UnreadableSource);

    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path(), &opts).unwrap_err();
    assert_eq!(err.kind(), CsvErrorKind::UnreadableSource);

    let empty = temp_csv("").unwrap();
    let err = parse_file(empty.path(), &opts).unwrap_err();
    assert_eq!(err.kind(), CsvErrorKind::EmptyInput);
}

#[test]
fn test_invalid_utf8_is_io_error() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"a,b\n\xff\xfe,1\n").unwrap();
    let err = parse_file(file.path(), &ParseOptions::default()).unwrap_err();
    assert_eq!(err.kind(), CsvErrorKind::Io);
}

#[test]
fn test_parse_file_range() {
    // Row i of an even-depth export sits on physical line i + 2.
    let file = temp_csv(&bank_export(30, 2)).unwrap();
    let opts = ParseOptions::builder().dialect(Dialect::semicolon()).build();

    let doc = parse_file_range(file.path(), 5, 7, &opts).unwrap();
    assert_eq!(doc.header().unwrap().get(0), Some("Buchungstag"));
    let purposes: Vec<_> = doc.iter().map(|r| r.get(2).unwrap().to_string()).collect();
    assert_eq!(purposes, vec!["Buchung 3", "Buchung 4", "Buchung 5"]);
    assert_eq!(doc.row(0).unwrap().line_number(), 5);
}

#[test]
fn test_parse_file_range_skips_header() {
    let file = temp_csv(&bank_export(30, 2)).unwrap();
    let opts = ParseOptions::builder().dialect(Dialect::semicolon()).build();

    let doc = parse_file_range(file.path(), 1, 3, &opts).unwrap();
    assert_eq!(doc.count_rows(), 2);
    assert_eq!(doc.row(0).unwrap().line_number(), 2);

    let doc = parse_file_range(file.path(), 10, 9, &opts).unwrap();
    assert!(doc.has_header());
    assert!(doc.is_empty());
}

#[test]
fn test_parse_file_range_headerless() {
    let file = temp_csv("1\n2\n3\n4\n5\n").unwrap();
    let doc = parse_file_range(file.path(), 2, 4, &headerless()).unwrap();
    let rows: Vec<_> = doc.iter().map(|r| r.get(0).unwrap().to_string()).collect();
    assert_eq!(rows, vec!["2", "3", "4"]);
}

#[test]
fn test_parse_file_range_open_ended() {
    let file = temp_csv(&bank_export(12, 2)).unwrap();
    let opts = ParseOptions::builder().dialect(Dialect::semicolon()).build();

    let doc = parse_file_range(file.path(), 1, usize::MAX, &opts).unwrap();
    assert_eq!(doc.count_rows(), 12);
    assert_eq!(doc.row(0).unwrap().line_number(), 2);

    let doc = parse_file_range(file.path(), usize::MAX, usize::MAX, &opts).unwrap();
    assert!(doc.is_empty());
}

#[test]
fn test_parse_file_crlf_multiline_field() {
    let file = temp_csv("id,memo\r\n1,\"first\r\nsecond\"\r\n2,plain\r\n").unwrap();
    let doc = parse_file(file.path(), &ParseOptions::default()).unwrap();
    assert_eq!(doc.count_rows(), 2);
    assert_eq!(doc.value(0, "memo"), Some("first\r\nsecond"));
    assert_eq!(doc.row(0).unwrap().line_number(), 3);
    assert_eq!(doc.value(1, "memo"), Some("plain"));
}

// ==================== Lazy Iteration Tests ====================

#[test]
fn test_rows_from_file() {
    let file = temp_csv(&bank_export(12, 1)).unwrap();
    let opts = ParseOptions::builder().dialect(Dialect::semicolon()).build();
    let mut iter = rows(file.path(), &opts).unwrap();

    assert_eq!(iter.header().unwrap().len(), 3);
    let first = iter.next().unwrap().unwrap();
    assert_eq!(first.get(2), Some("Buchung 0"));
    assert_eq!(iter.count(), 11);
}

#[test]
fn test_process_file_batches() {
    init_tracing();
    let file = temp_csv(&bank_export(25, 1)).unwrap();
    let opts = ParseOptions::builder().dialect(Dialect::semicolon()).build();

    let mut sizes = Vec::new();
    let mut last_line = 0;
    let total = process_file_batches(file.path(), &opts, 7, |batch| {
        sizes.push(batch.len());
        for row in &batch {
            assert!(row.line_number() > last_line);
            last_line = row.line_number();
        }
        Ok::<_, CsvError>(())
    })
    .unwrap();

    assert_eq!(total, 25);
    assert_eq!(sizes, vec![7, 7, 7, 4]);
}

#[test]
fn test_process_file_batches_missing_file() {
    let result = process_file_batches(
        "/nonexistent/export.csv",
        &ParseOptions::default(),
        10,
        |_| Ok::<_, CsvError>(()),
    );
    assert_eq!(result.unwrap_err().kind(), CsvErrorKind::UnreadableSource);
}
