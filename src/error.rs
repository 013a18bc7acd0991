use thiserror::Error;

/// Everything that can stop a report render.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("Missing column '{field}' (accepted names: {})", .aliases.join(", "))]
    MissingColumn {
        field: &'static str,
        aliases: &'static [&'static str],
    },
    #[error("Unparseable date {value:?} on line {line}")]
    InvalidDate { line: u64, value: String },
    #[error("Unparseable rainfall value {value:?} on line {line}")]
    InvalidRainfall { line: u64, value: String },
    #[error("Dataset contains no rainfall observations")]
    EmptyDataset,
    #[error("Spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("Chart rendering failed: {0}")]
    Chart(String),
    #[error("Could not write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    /// Errors raised while reading and normalizing the input file.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            ReportError::Io(_)
                | ReportError::Csv(_)
                | ReportError::MissingColumn { .. }
                | ReportError::InvalidDate { .. }
                | ReportError::InvalidRainfall { .. }
                | ReportError::EmptyDataset
        )
    }
}

pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_lists_aliases() {
        let err = ReportError::MissingColumn {
            field: "rainfall",
            aliases: &["precipitation_mm", "precip"],
        };
        assert_eq!(
            err.to_string(),
            "Missing column 'rainfall' (accepted names: precipitation_mm, precip)"
        );
        assert!(err.is_load_failure());
    }

    #[test]
    fn output_errors_are_not_load_failures() {
        assert!(!ReportError::Chart("backend".into()).is_load_failure());
    }
}
