//! Plain-text renderings of results for non-interactive commands.

use datamint_core::{HealthReport, SchemaInfo};
use datamint_render::{EMPTY_TABLE_MESSAGE, ResultStats, TableView};

const MAX_COLUMN_WIDTH: usize = 40;

pub fn table_text(view: &TableView) -> String {
    if view.is_empty() {
        return format!("{EMPTY_TABLE_MESSAGE}\n");
    }

    let mut header = vec!["#".to_string()];
    header.extend(view.columns.iter().cloned());
    let body: Vec<Vec<String>> = view
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut cells = vec![(index + 1).to_string()];
            cells.extend(row.iter().map(|cell| cell.display().to_string()));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(1)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &body {
        push_row(&mut out, row, &widths);
    }
    if let Some(notice) = view.notice() {
        out.push_str(&notice);
        out.push('\n');
    }
    out
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let clipped: String = cell.chars().take(*width).collect();
            format!("{clipped:<width$}")
        })
        .collect();
    out.push_str(cells.join(" | ").trim_end());
    out.push('\n');
}

pub fn stats_text(stats: &ResultStats) -> String {
    let mut out = String::new();
    for section in stats.sections() {
        out.push_str(section.title);
        out.push('\n');
        for (label, value) in &section.rows {
            out.push_str(&format!("  {label:<22} {value}\n"));
        }
    }
    out
}

pub fn schemas_text(schemas: &[SchemaInfo]) -> String {
    if schemas.is_empty() {
        return "no schemas available\n".to_string();
    }
    let mut out = String::new();
    for schema in schemas {
        let domain = schema.domain.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "{:<20} {:<12} {} ({} fields)\n",
            schema.name,
            domain,
            schema.description,
            schema.fields.len()
        ));
    }
    out
}

pub fn health_text(report: &HealthReport) -> String {
    let mut out = format!(
        "status: {} (service: {})\n",
        report.status.as_str(),
        report.service_status
    );
    for (name, status) in &report.components {
        out.push_str(&format!("  {name:<20} {status}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use datamint_core::HealthStatus;
    use serde_json::json;

    #[test]
    fn table_text_aligns_columns() {
        let view = TableView::from_value(&json!([
            {"id": 1, "ok": true},
            {"id": 22, "ok": null}
        ]));
        assert_eq!(
            table_text(&view),
            "# | id | ok\n--+----+-----\n1 | 1  | true\n2 | 22 | -\n"
        );
    }

    #[test]
    fn empty_table_prints_placeholder() {
        let view = TableView::from_value(&json!([]));
        assert_eq!(table_text(&view), "No data to display\n");
    }

    #[test]
    fn health_lists_components() {
        let report = HealthReport {
            status: HealthStatus::Degraded,
            service_status: "starting".to_string(),
            components: [("llm".to_string(), "down".to_string())].into_iter().collect(),
        };
        assert_eq!(
            health_text(&report),
            "status: degraded (service: starting)\n  llm                  down\n"
        );
    }
}
