use serde_json::Value;

/// Rows shown by the table view before the remainder is summarized.
pub const MAX_TABLE_ROWS: usize = 100;
/// Character limit for truncated cell previews.
pub const CELL_PREVIEW_CHARS: usize = 50;
/// Column synthesized when records carry no object keys.
pub const VALUE_COLUMN: &str = "value";
pub const EMPTY_TABLE_MESSAGE: &str = "No data to display";

/// A rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Null or missing value, shown as `-`.
    Empty,
    Bool(bool),
    Number(String),
    /// String value; `display` is cut to the preview limit, `full` is kept
    /// for inspection.
    Text { display: String, full: String },
    /// Array or object shown as a compact JSON preview.
    Compound { display: String, full: String },
}

impl Cell {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Cell::Empty,
            Some(Value::Bool(flag)) => Cell::Bool(*flag),
            Some(Value::Number(number)) => Cell::Number(number.to_string()),
            Some(Value::String(text)) => {
                let display = if text.chars().count() > CELL_PREVIEW_CHARS {
                    format!("{}...", truncate_chars(text, CELL_PREVIEW_CHARS))
                } else {
                    text.clone()
                };
                Cell::Text {
                    display,
                    full: text.clone(),
                }
            }
            Some(compound) => {
                let full = compound.to_string();
                Cell::Compound {
                    display: format!("{}...", truncate_chars(&full, CELL_PREVIEW_CHARS)),
                    full,
                }
            }
        }
    }

    /// Text shown in the table.
    pub fn display(&self) -> &str {
        match self {
            Cell::Empty => "-",
            Cell::Bool(true) => "true",
            Cell::Bool(false) => "false",
            Cell::Number(number) => number,
            Cell::Text { display, .. } | Cell::Compound { display, .. } => display,
        }
    }

    /// Untruncated text; empty for null or missing values.
    pub fn full(&self) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Text { full, .. } | Cell::Compound { full, .. } => full,
            other => other.display(),
        }
    }

    pub fn is_truncated(&self) -> bool {
        match self {
            Cell::Text { display, full } => display != full,
            Cell::Compound { .. } => true,
            _ => false,
        }
    }
}

/// Tabular projection of a result's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    /// At most [`MAX_TABLE_ROWS`] rows; the `#` column is implicit.
    pub rows: Vec<Vec<Cell>>,
    /// Number of records in the source data.
    pub total: usize,
}

impl TableView {
    pub fn from_value(data: &Value) -> Self {
        Self::build(data, Some(MAX_TABLE_ROWS))
    }

    /// Projection over every record, without the display cap.
    pub fn full(data: &Value) -> Self {
        Self::build(data, None)
    }

    fn build(data: &Value, limit: Option<usize>) -> Self {
        let records = records(data);
        let columns = columns(&records);
        let synthesized = columns.len() == 1 && columns[0] == VALUE_COLUMN && !has_keys(&records);
        let shown = limit.unwrap_or(records.len()).min(records.len());

        let rows = records[..shown]
            .iter()
            .map(|record| {
                if synthesized {
                    vec![Cell::from_value(Some(*record))]
                } else {
                    columns
                        .iter()
                        .map(|column| Cell::from_value(record.get(column.as_str())))
                        .collect()
                }
            })
            .collect();

        Self {
            columns,
            rows,
            total: records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn is_truncated(&self) -> bool {
        self.total > self.rows.len()
    }

    /// Summary line shown under a capped table.
    pub fn notice(&self) -> Option<String> {
        if self.is_empty() {
            Some(EMPTY_TABLE_MESSAGE.to_string())
        } else if self.is_truncated() {
            Some(format!(
                "Showing first {} of {} records",
                self.rows.len(),
                self.total
            ))
        } else {
            None
        }
    }
}

/// Normalize data to a record list: arrays as-is, anything else but null as
/// a single record.
pub fn records(data: &Value) -> Vec<&Value> {
    match data {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Union of top-level keys across records, in first-seen order.
pub fn columns(records: &[&Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !columns.iter().any(|existing| existing == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    if columns.is_empty() && !records.is_empty() {
        columns.push(VALUE_COLUMN.to_string());
    }
    columns
}

fn has_keys(records: &[&Value]) -> bool {
    records
        .iter()
        .any(|record| record.as_object().is_some_and(|map| !map.is_empty()))
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(60);
        assert_eq!(truncate_chars(&text, 50).chars().count(), 50);
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
