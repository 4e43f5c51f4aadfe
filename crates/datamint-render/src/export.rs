use serde_json::Value;

use crate::error::Result;
use crate::table::TableView;

/// Pretty-printed JSON of the result data.
pub fn export_json(data: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// CSV of every record, without the table view's row cap.
///
/// Null and missing cells are empty; arrays and objects are written as
/// compact JSON.
pub fn export_csv(data: &Value) -> Result<String> {
    let table = TableView::full(data);
    let mut writer = csv::Writer::from_writer(Vec::new());
    if !table.columns.is_empty() {
        writer.write_record(&table.columns)?;
    }
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.full()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
