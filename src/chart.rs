// Plotting sink: draws the anomaly bars and the seasonality profile as two
// stacked charts into a single SVG document held in memory.
use crate::error::{ReportError, ReportResult};
use crate::types::{AnomalyBar, ChartSeries, SeasonalityPoint};
use crate::util::month_abbr;
use plotters::coord::Shift;
use plotters::prelude::*;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 1000;

const SEASON_GREEN: RGBColor = RGBColor(0, 128, 0);

fn chart_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

fn hex_color(hex: &str) -> RGBColor {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };
    RGBColor(channel(1), channel(3), channel(5))
}

/// Pad a value range so flat or single-point series still get a visible axis.
fn padded(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span.abs() < f64::EPSILON {
        min.abs().max(1.0) * 0.1
    } else {
        span * 0.1
    };
    (min - pad, max + pad)
}

fn draw_anomalies<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    bars: &[AnomalyBar],
) -> ReportResult<()> {
    let first = bars.first().map(|b| b.year).unwrap_or(0);
    let last = bars.last().map(|b| b.year).unwrap_or(0);
    let (lo, hi) = bars
        .iter()
        .fold((0.0f64, 0.0f64), |(lo, hi), b| (lo.min(b.anomaly), hi.max(b.anomaly)));
    let (y_min, y_max) = padded(lo, hi);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first as f64 - 0.5..last as f64 + 0.5, y_min..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_label_formatter(&|x: &f64| format!("{:.0}", x))
        .y_desc("Deviation (mm)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(bars.iter().map(|b| {
            let x = b.year as f64;
            Rectangle::new(
                [(x - 0.4, b.anomaly.max(0.0)), (x + 0.4, b.anomaly.min(0.0))],
                hex_color(b.color).mix(0.8).filled(),
            )
        }))
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            [(first as f64 - 0.5, 0.0), (last as f64 + 0.5, 0.0)],
            BLACK.stroke_width(1),
        ))
        .map_err(chart_err)?;
    Ok(())
}

fn draw_seasonality<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    points: &[SeasonalityPoint],
) -> ReportResult<()> {
    let hi = points
        .iter()
        .map(|p| p.average_rainfall)
        .fold(0.0f64, f64::max);
    let (_, y_max) = padded(0.0, hi);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(1i32..12i32, 0.0..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|m: &i32| month_abbr(*m as u32).to_string())
        .y_desc("Precipitation (mm)")
        .draw()
        .map_err(chart_err)?;

    let series = || {
        points
            .iter()
            .map(|p| (p.month_index as i32, p.average_rainfall))
    };

    chart
        .draw_series(AreaSeries::new(series(), 0.0, SEASON_GREEN.mix(0.1)))
        .map_err(chart_err)?;
    chart
        .draw_series(LineSeries::new(series(), SEASON_GREEN.stroke_width(2)))
        .map_err(chart_err)?;
    chart
        .draw_series(series().map(|(x, y)| Circle::new((x, y), 4, SEASON_GREEN.filled())))
        .map_err(chart_err)?;
    Ok(())
}

/// Render both charts, anomaly on top, into an SVG string.
pub fn render_svg(series: &ChartSeries) -> ReportResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        let (upper, lower) = root.split_vertically(HEIGHT / 2);
        draw_anomalies(&upper, &series.anomaly_title, &series.anomalies)?;
        draw_seasonality(&lower, &series.seasonality_title, &series.seasonality)?;
        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}
