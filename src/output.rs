use crate::config::{CHART_FILE_NAME, SUMMARY_FILE_NAME};
use crate::error::{ReportError, ReportResult};
use crate::types::{Insight, Metrics, ReportPayload, Severity, YearlyTableRow};
use crate::util::format_number;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

/// Where a rendered report goes. Methods are called in display order and
/// only after the whole report has been computed.
pub trait ReportSink {
    fn show_metrics(&mut self, metrics: &Metrics) -> ReportResult<()>;
    fn show_yearly_table(&mut self, rows: &[YearlyTableRow]) -> ReportResult<()>;
    fn show_insight(&mut self, insight: &Insight) -> ReportResult<()>;
    fn show_charts(&mut self, svg: &str) -> ReportResult<()>;
    fn offer_download(&mut self, file_name: &str, mime: &str, data: &[u8]) -> ReportResult<()>;
}

pub fn write_file(path: &Path, data: &[u8]) -> ReportResult<()> {
    std::fs::write(path, data).map_err(|source| ReportError::Output {
        path: path.display().to_string(),
        source,
    })
}

pub fn render_table<T>(rows: &[T]) -> String
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows.to_vec()).with(Style::markdown()).to_string()
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "[OK]",
        Severity::Warning => "[WARN]",
        Severity::Error => "[ALERT]",
    }
}

pub fn render_insight(insight: &Insight) -> String {
    format!(
        "{} {}: {}",
        severity_tag(insight.level.severity()),
        insight.level.headline(),
        insight.recommendation
    )
}

/// Prints the report to stdout and writes artifacts into `out_dir`.
pub struct ConsoleSink {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ConsoleSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        ConsoleSink {
            out_dir: out_dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn save(&mut self, file_name: &str, data: &[u8]) -> ReportResult<PathBuf> {
        let path = self.out_dir.join(file_name);
        write_file(&path, data)?;
        info!(path = %path.display(), bytes = data.len(), "wrote artifact");
        self.written.push(path.clone());
        Ok(path)
    }

    pub fn save_summary(&mut self, report: &ReportPayload) -> ReportResult<PathBuf> {
        let s = serde_json::to_string_pretty(report)?;
        let path = self.save(SUMMARY_FILE_NAME, s.as_bytes())?;
        println!("Summary written to {}\n", path.display());
        Ok(path)
    }
}

impl ReportSink for ConsoleSink {
    fn show_metrics(&mut self, metrics: &Metrics) -> ReportResult<()> {
        println!("1. General Statistics\n");
        println!(
            "Annual Average:          {} mm",
            format_number(metrics.annual_average, 1)
        );
        println!("Wettest Month:           {}", metrics.wettest_month);
        println!(
            "Peak Avg. Monthly Rain:  {} mm\n",
            format_number(metrics.peak_monthly_average, 1)
        );
        Ok(())
    }

    fn show_yearly_table(&mut self, rows: &[YearlyTableRow]) -> ReportResult<()> {
        println!("2. Yearly Trends (Deviation from Average)\n");
        println!("{}\n", render_table(rows));
        Ok(())
    }

    fn show_insight(&mut self, insight: &Insight) -> ReportResult<()> {
        println!("3. Agricultural Recommendations\n");
        println!("{}\n", render_insight(insight));
        Ok(())
    }

    fn show_charts(&mut self, svg: &str) -> ReportResult<()> {
        let path = self.save(CHART_FILE_NAME, svg.as_bytes())?;
        println!("4. Visualizations\n");
        println!("(Charts saved to {})\n", path.display());
        Ok(())
    }

    fn offer_download(&mut self, file_name: &str, mime: &str, data: &[u8]) -> ReportResult<()> {
        let path = self.save(file_name, data)?;
        println!("Full report ({}) saved to {}\n", mime, path.display());
        Ok(())
    }
}
