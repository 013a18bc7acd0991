use crate::config::ANOMALY_BAND;
use crate::error::{ReportError, ReportResult};
use crate::types::{MonthlyProfile, Observation, YearStatus, YearlySummary};
use crate::util::average;
use std::collections::BTreeMap;
use tracing::debug;

/// Derived statistics for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    /// Ascending by year.
    pub yearly: Vec<YearlySummary>,
    pub multi_year_average: f64,
    /// Always twelve entries, January first.
    pub monthly: Vec<MonthlyProfile>,
    pub monthly_totals: [f64; 12],
    pub year_span: i32,
    pub wettest_month: u32,
}

impl Aggregates {
    pub fn peak_monthly_average(&self) -> f64 {
        self.monthly
            .iter()
            .map(|m| m.average_rainfall)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Strict on both sides: an anomaly exactly on the band edge is Normal.
pub fn classify(anomaly: f64, multi_year_average: f64) -> YearStatus {
    let band = ANOMALY_BAND * multi_year_average;
    if anomaly > band {
        YearStatus::Wet
    } else if anomaly < -band {
        YearStatus::Dry
    } else {
        YearStatus::Normal
    }
}

pub fn yearly_totals(data: &[Observation]) -> BTreeMap<i32, f64> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for obs in data {
        *totals.entry(obs.year).or_insert(0.0) += obs.rainfall;
    }
    totals
}

/// Index 0 is January. Months without observations stay at zero.
pub fn monthly_totals(data: &[Observation]) -> [f64; 12] {
    let mut totals = [0.0; 12];
    for obs in data {
        totals[(obs.month - 1) as usize] += obs.rainfall;
    }
    totals
}

/// First month with the highest average; ties go to the earlier month.
pub fn wettest_month(monthly: &[MonthlyProfile]) -> u32 {
    let mut best: Option<&MonthlyProfile> = None;
    for m in monthly {
        match best {
            Some(b) if m.average_rainfall <= b.average_rainfall => {}
            _ => best = Some(m),
        }
    }
    best.map(|m| m.month_index).unwrap_or(1)
}

/// Compute yearly totals, anomalies, classifications and the monthly
/// profile. An empty dataset is rejected instead of producing NaNs.
pub fn aggregate(data: &[Observation]) -> ReportResult<Aggregates> {
    if data.is_empty() {
        return Err(ReportError::EmptyDataset);
    }

    let totals = yearly_totals(data);
    let multi_year_average = average(&totals.values().copied().collect::<Vec<_>>());

    let yearly: Vec<YearlySummary> = totals
        .iter()
        .map(|(&year, &total_rainfall)| {
            let anomaly = total_rainfall - multi_year_average;
            let status = classify(anomaly, multi_year_average);
            debug!(year, total_rainfall, anomaly, ?status, "classified year");
            YearlySummary {
                year,
                total_rainfall,
                anomaly,
                status,
            }
        })
        .collect();

    // Non-empty, so both ends exist.
    let min_year = yearly.first().map(|y| y.year).unwrap_or_default();
    let max_year = yearly.last().map(|y| y.year).unwrap_or_default();
    let year_span = max_year - min_year + 1;

    let monthly_totals = monthly_totals(data);
    let monthly: Vec<MonthlyProfile> = monthly_totals
        .iter()
        .enumerate()
        .map(|(idx, total)| MonthlyProfile {
            month_index: idx as u32 + 1,
            average_rainfall: total / year_span as f64,
        })
        .collect();
    let wettest_month = wettest_month(&monthly);

    Ok(Aggregates {
        yearly,
        multi_year_average,
        monthly,
        monthly_totals,
        year_span,
        wettest_month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Datelike, NaiveDate};

    fn obs(y: i32, m: u32, d: u32, rainfall: f64) -> Observation {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Observation {
            date,
            year: date.year(),
            month: date.month(),
            rainfall,
        }
    }

    fn sample() -> Vec<Observation> {
        vec![
            obs(2018, 1, 3, 10.0),
            obs(2018, 7, 14, 220.0),
            obs(2018, 7, 15, 35.5),
            obs(2019, 2, 1, 4.0),
            obs(2019, 8, 9, 90.0),
            obs(2020, 6, 1, 300.0),
            obs(2020, 12, 24, 1.5),
        ]
    }

    #[test]
    fn single_row_dataset() {
        let agg = aggregate(&[obs(2020, 6, 1, 50.0)]).unwrap();
        assert_eq!(agg.yearly.len(), 1);
        assert_eq!(agg.yearly[0].total_rainfall, 50.0);
        assert_eq!(agg.multi_year_average, 50.0);
        assert_eq!(agg.yearly[0].anomaly, 0.0);
        assert_eq!(agg.yearly[0].status, YearStatus::Normal);
        assert_eq!(agg.year_span, 1);
        assert_eq!(agg.monthly.len(), 12);
        assert_eq!(agg.monthly[5].average_rainfall, 50.0);
        assert!(agg
            .monthly
            .iter()
            .filter(|m| m.month_index != 6)
            .all(|m| m.average_rainfall == 0.0));
        assert_eq!(agg.wettest_month, 6);
    }

    #[test]
    fn yearly_grouping_partitions_rainfall() {
        let data = sample();
        let agg = aggregate(&data).unwrap();
        let total: f64 = data.iter().map(|o| o.rainfall).sum();
        let yearly_sum: f64 = agg.yearly.iter().map(|y| y.total_rainfall).sum();
        assert_relative_eq!(yearly_sum, total, epsilon = 1e-9);
        let years: Vec<i32> = agg.yearly.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2018, 2019, 2020]);
    }

    #[test]
    fn monthly_grouping_partitions_rainfall() {
        let data = sample();
        let agg = aggregate(&data).unwrap();
        let total: f64 = data.iter().map(|o| o.rainfall).sum();
        assert_relative_eq!(agg.monthly_totals.iter().sum::<f64>(), total, epsilon = 1e-9);
    }

    #[test]
    fn anomalies_are_deviations_from_mean() {
        let agg = aggregate(&sample()).unwrap();
        for y in &agg.yearly {
            assert_relative_eq!(y.anomaly, y.total_rainfall - agg.multi_year_average);
        }
        let sum: f64 = agg.yearly.iter().map(|y| y.anomaly).sum();
        assert_relative_eq!(sum, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn band_edges_classify_as_normal() {
        let edge = ANOMALY_BAND * 100.0;
        assert_eq!(classify(edge, 100.0), YearStatus::Normal);
        assert_eq!(classify(-edge, 100.0), YearStatus::Normal);
        assert_eq!(classify(15.01, 100.0), YearStatus::Wet);
        assert_eq!(classify(-15.01, 100.0), YearStatus::Dry);
        assert_eq!(classify(0.0, 100.0), YearStatus::Normal);
    }

    #[test]
    fn classification_per_year() {
        // Totals 100, 200, 300 -> mean 200, band 30.
        let data = vec![
            obs(2018, 3, 1, 100.0),
            obs(2019, 3, 1, 200.0),
            obs(2020, 3, 1, 300.0),
        ];
        let agg = aggregate(&data).unwrap();
        let statuses: Vec<YearStatus> = agg.yearly.iter().map(|y| y.status).collect();
        assert_eq!(
            statuses,
            vec![YearStatus::Dry, YearStatus::Normal, YearStatus::Wet]
        );
    }

    #[test]
    fn year_span_ignores_gaps() {
        // 2019 is absent but still counts toward the span.
        let data = vec![obs(2018, 5, 1, 30.0), obs(2020, 5, 1, 60.0)];
        let agg = aggregate(&data).unwrap();
        assert_eq!(agg.year_span, 3);
        assert_eq!(agg.yearly.len(), 2);
        assert_relative_eq!(agg.monthly[4].average_rainfall, 30.0);
        assert_relative_eq!(agg.multi_year_average, 45.0);
    }

    #[test]
    fn wettest_month_tie_goes_to_earliest() {
        let data = vec![
            obs(2020, 3, 1, 80.0),
            obs(2020, 9, 1, 80.0),
            obs(2020, 1, 1, 10.0),
        ];
        let agg = aggregate(&data).unwrap();
        assert_eq!(agg.wettest_month, 3);
        assert_eq!(agg.peak_monthly_average(), 80.0);
    }

    #[test]
    fn all_zero_rainfall_picks_january() {
        let agg = aggregate(&[obs(2020, 8, 1, 0.0)]).unwrap();
        assert_eq!(agg.wettest_month, 1);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(aggregate(&[]), Err(ReportError::EmptyDataset)));
    }
}
