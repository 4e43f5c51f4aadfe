use datamint_render::{Cell, EMPTY_TABLE_MESSAGE, MAX_TABLE_ROWS, TableView, export_csv, export_json};
use serde_json::{Value, json};

fn flat_records(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|index| json!({"id": index, "status": "ok"}))
            .collect(),
    )
}

#[test]
fn caps_rows_at_one_hundred() {
    let table = TableView::from_value(&flat_records(150));
    assert_eq!(table.rows.len(), MAX_TABLE_ROWS);
    assert_eq!(table.total, 150);
    assert!(table.is_truncated());
    assert_eq!(
        table.notice().as_deref(),
        Some("Showing first 100 of 150 records")
    );
}

#[test]
fn exactly_one_hundred_rows_has_no_notice() {
    let table = TableView::from_value(&flat_records(100));
    assert_eq!(table.rows.len(), 100);
    assert!(table.notice().is_none());
}

#[test]
fn lone_object_becomes_single_record() {
    let table = TableView::from_value(&json!({"sku": "A-1", "price": 9.5}));
    assert_eq!(table.columns, vec!["sku", "price"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][1].display(), "9.5");
}

#[test]
fn columns_are_union_in_first_seen_order() {
    let table = TableView::from_value(&json!([
        {"b": 1, "a": 2},
        {"c": 3, "a": 4},
        {"d": null}
    ]));
    assert_eq!(table.columns, vec!["b", "a", "c", "d"]);
    assert_eq!(table.rows[0][2], Cell::Empty);
    assert_eq!(table.rows[2][3].display(), "-");
}

#[test]
fn cell_rendering_by_kind() {
    let long = "x".repeat(60);
    let table = TableView::from_value(&json!([{
        "flag": true,
        "tags": ["a", "b"],
        "address": {"city": "Porto"},
        "note": long,
        "short": "fine"
    }]));
    let row = &table.rows[0];

    assert_eq!(row[0], Cell::Bool(true));
    assert_eq!(row[1].display(), "[\"a\",\"b\"]...");
    assert_eq!(row[2].display(), "{\"city\":\"Porto\"}...");
    assert_eq!(row[3].display(), format!("{}...", "x".repeat(50)));
    assert_eq!(row[3].full(), long);
    assert!(row[3].is_truncated());
    assert_eq!(row[4].display(), "fine");
    assert!(!row[4].is_truncated());
}

#[test]
fn compound_preview_is_cut_to_fifty_chars() {
    let big: Vec<u32> = (0..100).collect();
    let table = TableView::from_value(&json!([{"numbers": big}]));
    let display = table.rows[0][0].display();
    assert_eq!(display.chars().count(), 53);
    assert!(display.ends_with("..."));
}

#[test]
fn scalar_records_get_a_value_column() {
    let table = TableView::from_value(&json!([1, "two", null]));
    assert_eq!(table.columns, vec!["value"]);
    let cells: Vec<&str> = table.rows.iter().map(|row| row[0].display()).collect();
    assert_eq!(cells, vec!["1", "two", "-"]);
}

#[test]
fn empty_input_shows_placeholder() {
    for data in [json!([]), Value::Null] {
        let table = TableView::from_value(&data);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
        assert_eq!(table.notice().as_deref(), Some(EMPTY_TABLE_MESSAGE));
    }
}

#[test]
fn csv_export_covers_every_record() {
    let csv = export_csv(&flat_records(150)).expect("export csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 151);
    assert_eq!(lines[0], "id,status");
    assert_eq!(lines[150], "149,ok");
}

#[test]
fn csv_export_writes_full_values() {
    let csv = export_csv(&json!([
        {"name": "a, b", "meta": {"k": 1}, "gone": null}
    ]))
    .expect("export csv");
    assert_eq!(csv, "name,meta,gone\n\"a, b\",\"{\"\"k\"\":1}\",\n");
}

#[test]
fn json_export_is_pretty() {
    let exported = export_json(&json!({"a": [1]})).expect("export json");
    assert_eq!(exported, "{\n  \"a\": [\n    1\n  ]\n}");
}
