use crate::aggregate::Aggregates;
use crate::config::{FAVORABLE_MIN_WET_MONTHS, MODERATE_MIN_WET_MONTHS, WET_MONTH_THRESHOLD_MM};
use crate::types::{
    AnomalyBar, ChartSeries, Insight, InsightLevel, Metrics, MonthlyProfile, ReportPayload,
    SeasonalityPoint, YearlySummary, YearlyTableRow,
};
use crate::util::{format_fixed, month_abbr, month_name};

pub const POSITIVE_COLOR: &str = "#1f77b4";
pub const NEGATIVE_COLOR: &str = "#d62728";

const FAVORABLE_TEXT: &str = "Excellent Condition: Suitable for long-cycle crops like Rice, as the rainy season is extended.";
const MODERATE_TEXT: &str = "Moderate Condition: Suitable for fast-growing crops like Maize and Beans (Short cycle) due to average rainfall duration.";
const DRY_TEXT: &str = "CAUTION: Dry area. High drought risk requires planting drought-resistant crops (Cassava, Sorghum).";

pub fn generate_yearly_table(yearly: &[YearlySummary]) -> Vec<YearlyTableRow> {
    yearly
        .iter()
        .map(|y| YearlyTableRow {
            year: y.year,
            rainfall: format_fixed(y.total_rainfall, 2),
            status: y.status.label().to_string(),
        })
        .collect()
}

pub fn count_wet_months(monthly: &[MonthlyProfile]) -> usize {
    monthly
        .iter()
        .filter(|m| m.average_rainfall > WET_MONTH_THRESHOLD_MM)
        .count()
}

pub fn select_insight(monthly: &[MonthlyProfile]) -> Insight {
    let wet_months = count_wet_months(monthly);
    let (level, text) = if wet_months >= FAVORABLE_MIN_WET_MONTHS {
        (InsightLevel::Favorable, FAVORABLE_TEXT)
    } else if wet_months >= MODERATE_MIN_WET_MONTHS {
        (InsightLevel::Moderate, MODERATE_TEXT)
    } else {
        (InsightLevel::DryRisk, DRY_TEXT)
    };
    Insight {
        level,
        wet_months,
        recommendation: text.to_string(),
    }
}

pub fn generate_chart_series(agg: &Aggregates) -> ChartSeries {
    let anomalies = agg
        .yearly
        .iter()
        .map(|y| AnomalyBar {
            year: y.year,
            anomaly: y.anomaly,
            color: if y.anomaly >= 0.0 {
                POSITIVE_COLOR
            } else {
                NEGATIVE_COLOR
            },
        })
        .collect();
    let seasonality = agg
        .monthly
        .iter()
        .map(|m| SeasonalityPoint {
            month_index: m.month_index,
            label: month_abbr(m.month_index),
            average_rainfall: m.average_rainfall,
        })
        .collect();
    ChartSeries {
        anomaly_title: format!(
            "Yearly Rainfall Anomaly vs. {}-Year Average",
            agg.yearly.len()
        ),
        anomalies,
        seasonality_title: "Average Monthly Rainfall (Seasonality)".to_string(),
        seasonality,
    }
}

/// Bundle everything a render needs from one set of aggregates.
pub fn build_report(agg: &Aggregates) -> ReportPayload {
    ReportPayload {
        years_covered: agg.yearly.len(),
        year_span: agg.year_span,
        multi_year_average: agg.multi_year_average,
        wettest_month: agg.wettest_month,
        metrics: Metrics {
            annual_average: agg.multi_year_average,
            wettest_month: month_name(agg.wettest_month),
            peak_monthly_average: agg.peak_monthly_average(),
        },
        yearly: agg.yearly.clone(),
        yearly_table: generate_yearly_table(&agg.yearly),
        monthly: agg.monthly.clone(),
        insight: select_insight(&agg.monthly),
        charts: generate_chart_series(agg),
    }
}
