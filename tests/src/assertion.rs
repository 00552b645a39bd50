//! Row-set assertions for verifying pipeline output.

use trellis_core::Value;
use trellis_exec::{QueryResults, Row};

/// Build a row from (column, value) pairs, in order.
pub fn row(entries: &[(&str, Value)]) -> Row {
    let mut row = Row::new();
    for (name, value) in entries {
        row.set(*name, value.clone());
    }
    row
}

/// Assert that results match the expected rows, in order.
pub fn assert_rows_eq(results: &QueryResults, expected: &[Row]) {
    assert_eq!(
        results.len(),
        expected.len(),
        "row count mismatch: got {:?}",
        results.rows()
    );
    for (i, (actual, wanted)) in results.iter().zip(expected.iter()).enumerate() {
        assert_eq!(actual, wanted, "row {} mismatch", i);
    }
}

/// Assert that results match the expected rows, ignoring order.
pub fn assert_rows_unordered(results: &QueryResults, expected: &[Row]) {
    assert_eq!(
        results.len(),
        expected.len(),
        "row count mismatch: got {:?}",
        results.rows()
    );
    let mut actual: Vec<String> = results.iter().map(|r| format!("{:?}", r)).collect();
    let mut wanted: Vec<String> = expected.iter().map(|r| format!("{:?}", r)).collect();
    actual.sort();
    wanted.sort();
    assert_eq!(actual, wanted);
}

/// Collect a single column of the results.
pub fn column_values(results: &QueryResults, column: &str) -> Vec<Value> {
    results
        .iter()
        .map(|r| r.get(column).cloned().unwrap_or(Value::Null))
        .collect()
}
