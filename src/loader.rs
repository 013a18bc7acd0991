use crate::error::{ReportError, ReportResult};
use crate::types::Observation;
use crate::util::{normalize_header, parse_date_safe, parse_f64_safe};
use chrono::Datelike;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// A logical field and the normalized header names that may carry it, in
/// order of preference.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: &'static str,
    pub aliases: &'static [&'static str],
}

pub const DATE_FIELD: FieldSpec = FieldSpec {
    field: "date",
    aliases: &["date"],
};

pub const RAINFALL_FIELD: FieldSpec = FieldSpec {
    field: "rainfall",
    aliases: &["precipitation_mm", "precip", "rainfall"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub rainfall: usize,
}

impl ColumnMap {
    /// Resolve logical fields against a header row. Extra columns are ignored.
    pub fn from_headers(headers: &StringRecord) -> ReportResult<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        Ok(ColumnMap {
            date: resolve(&normalized, DATE_FIELD)?,
            rainfall: resolve(&normalized, RAINFALL_FIELD)?,
        })
    }
}

fn resolve(headers: &[String], spec: FieldSpec) -> ReportResult<usize> {
    spec.aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
        .ok_or(ReportError::MissingColumn {
            field: spec.field,
            aliases: spec.aliases,
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub missing_rainfall: usize,
}

/// Load every observation from a CSV file. Any unreadable row or date fails
/// the whole load.
pub fn load_observations(path: &Path) -> ReportResult<(Vec<Observation>, LoadReport)> {
    let file = std::fs::File::open(path)?;
    let (data, report) = read_observations(file)?;
    info!(
        path = %path.display(),
        rows = report.total_rows,
        observations = data.len(),
        "loaded dataset"
    );
    Ok((data, report))
}

pub fn read_observations<R: Read>(input: R) -> ReportResult<(Vec<Observation>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(input);
    let columns = ColumnMap::from_headers(rdr.headers()?)?;
    debug!(?columns, "resolved columns");

    let mut report = LoadReport::default();
    let mut data: Vec<Observation> = Vec::new();

    for result in rdr.records() {
        let record = result?;
        report.total_rows += 1;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let raw_date = record.get(columns.date).unwrap_or("");
        let date = parse_date_safe(raw_date).ok_or_else(|| ReportError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;

        let raw_rain = record.get(columns.rainfall).unwrap_or("");
        let rainfall = match parse_f64_safe(raw_rain) {
            Ok(Some(v)) => v,
            // No measurement: the row still places its year and month in the
            // dataset but adds nothing to any sum.
            Ok(None) => {
                report.missing_rainfall += 1;
                0.0
            }
            Err(_) => {
                return Err(ReportError::InvalidRainfall {
                    line,
                    value: raw_rain.to_string(),
                })
            }
        };

        data.push(Observation {
            date,
            year: date.year(),
            month: date.month(),
            rainfall,
        });
    }

    if report.missing_rainfall > 0 {
        debug!(count = report.missing_rainfall, "rows without rainfall counted as zero");
    }
    Ok((data, report))
}
