// Runtime configuration and fixed reporting policy.
//
// The CLI only chooses where data comes from and where artifacts land. The
// classification thresholds below are policy, not settings, and are kept as
// named constants so every stage reads the same values.
use clap::Parser;
use std::path::PathBuf;

/// Yearly totals further than this fraction from the multi-year average are
/// classified Wet or Dry.
pub const ANOMALY_BAND: f64 = 0.15;

/// A month counts as wet when its average rainfall is strictly above this (mm).
pub const WET_MONTH_THRESHOLD_MM: f64 = 100.0;

/// Minimum number of wet months for a Favorable insight.
pub const FAVORABLE_MIN_WET_MONTHS: usize = 5;

/// Minimum number of wet months for a Moderate insight.
pub const MODERATE_MIN_WET_MONTHS: usize = 3;

pub const DEFAULT_DATA_FILE: &str = "beijing_2018_2024_weather.csv";

pub const REPORT_FILE_NAME: &str = "bejin_rainfall_report.xlsx";
pub const REPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CHART_FILE_NAME: &str = "rainfall_charts.svg";
pub const SUMMARY_FILE_NAME: &str = "summary.json";

pub const SHEET_YEARLY: &str = "1_Yearly_Trends";
pub const SHEET_MONTHLY: &str = "2_Monthly_Seasonality";
pub const SHEET_INSIGHTS: &str = "3_Key_Insights";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rainfall_report",
    about = "Yearly and monthly rainfall trend report with spreadsheet export"
)]
pub struct Config {
    /// Daily weather observations (CSV with a date and a precipitation column)
    #[arg(long, env = "RAINFALL_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Directory that receives the spreadsheet, chart and optional summary
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Also write the computed payload as summary.json
    #[arg(long, default_value = "false")]
    pub summary_json: bool,

    /// Skip chart rendering
    #[arg(long, default_value = "false")]
    pub no_charts: bool,
}

impl Config {
    /// File name shown in load error messages.
    pub fn data_file_name(&self) -> String {
        self.data
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.data.display().to_string())
    }
}
