use chrono::{DateTime, Utc};

/// `test-data-<unix millis>.<ext>`
pub fn export_file_name(now: DateTime<Utc>, extension: &str) -> String {
    format!("test-data-{}.{extension}", now.timestamp_millis())
}

/// Keep the tail of `input` that fits the input box. Returns the visible text
/// and the cursor column.
pub fn clipped_input(input: &str, total_width: usize, prefix_len: usize) -> (String, u16) {
    let max_len = total_width.saturating_sub(prefix_len + 1);
    let len = input.chars().count();
    if len <= max_len {
        (input.to_string(), len as u16)
    } else {
        let visible: String = input.chars().skip(len - max_len).collect();
        (visible, max_len as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn export_names_carry_millis() {
        let now = Utc
            .timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("timestamp");
        assert_eq!(export_file_name(now, "csv"), "test-data-1700000000123.csv");
    }

    #[test]
    fn clipping_counts_characters() {
        assert_eq!(clipped_input("abc", 10, 2), ("abc".to_string(), 3));
        assert_eq!(clipped_input("ünïcödé", 6, 2), ("ödé".to_string(), 3));
    }
}
