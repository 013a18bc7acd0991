use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tabled::Tabled;

/// One daily observation after column mapping and date coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub rainfall: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YearStatus {
    Wet,
    Normal,
    Dry,
}

impl YearStatus {
    /// Label used in the on-screen table.
    pub fn label(self) -> &'static str {
        match self {
            YearStatus::Wet => "Wet (Above Average)",
            YearStatus::Normal => "Normal",
            YearStatus::Dry => "Dry (Below Average)",
        }
    }
}

impl fmt::Display for YearStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySummary {
    pub year: i32,
    pub total_rainfall: f64,
    pub anomaly: f64,
    pub status: YearStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProfile {
    pub month_index: u32,
    pub average_rainfall: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InsightLevel {
    Favorable,
    Moderate,
    DryRisk,
}

/// How loudly the rendering sink should present an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl InsightLevel {
    pub fn headline(self) -> &'static str {
        match self {
            InsightLevel::Favorable => "Favorable Status",
            InsightLevel::Moderate => "Moderate Status",
            InsightLevel::DryRisk => "Dry Status",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            InsightLevel::Favorable => Severity::Success,
            InsightLevel::Moderate => Severity::Warning,
            InsightLevel::DryRisk => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub level: InsightLevel,
    pub wet_months: usize,
    pub recommendation: String,
}

/// Row of the on-screen yearly table.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct YearlyTableRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Rainfall (mm)")]
    #[tabled(rename = "Rainfall (mm)")]
    pub rainfall: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
}

/// Bar of the anomaly chart; `color` encodes the sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyBar {
    pub year: i32,
    pub anomaly: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalityPoint {
    pub month_index: u32,
    pub label: &'static str,
    pub average_rainfall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub anomaly_title: String,
    pub anomalies: Vec<AnomalyBar>,
    pub seasonality_title: String,
    pub seasonality: Vec<SeasonalityPoint>,
}

/// The three headline numbers shown above the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub annual_average: f64,
    pub wettest_month: &'static str,
    pub peak_monthly_average: f64,
}

/// Everything the display and export paths consume for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPayload {
    pub years_covered: usize,
    pub year_span: i32,
    pub multi_year_average: f64,
    pub wettest_month: u32,
    pub metrics: Metrics,
    pub yearly: Vec<YearlySummary>,
    pub yearly_table: Vec<YearlyTableRow>,
    pub monthly: Vec<MonthlyProfile>,
    pub insight: Insight,
    pub charts: ChartSeries,
}
