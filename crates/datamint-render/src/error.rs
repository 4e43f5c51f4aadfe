use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export produced invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_io_failures_surface_as_csv_errors() {
        let err = RenderError::from(csv::Error::from(std::io::Error::other("disk gone")));
        assert!(matches!(err, RenderError::Csv(_)));
        assert!(err.to_string().starts_with("csv error: "), "{err}");
    }
}
