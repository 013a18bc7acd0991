// One render: load -> aggregate -> build report -> display.
//
// Everything is computed before the sink sees anything, so a failure at any
// stage leaves the display untouched.
use crate::aggregate::aggregate;
use crate::chart::render_svg;
use crate::config::{REPORT_FILE_NAME, REPORT_MIME_TYPE};
use crate::error::ReportResult;
use crate::loader::load_observations;
use crate::output::ReportSink;
use crate::reports::build_report;
use crate::types::ReportPayload;
use crate::util::{format_int, month_name};
use crate::workbook::build_workbook;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub charts: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { charts: true }
    }
}

pub fn render(
    path: &Path,
    sink: &mut dyn ReportSink,
    options: RenderOptions,
) -> ReportResult<ReportPayload> {
    let (data, load_report) = load_observations(path)?;
    let agg = aggregate(&data)?;
    info!(
        rows = %format_int(load_report.total_rows),
        years = agg.yearly.len(),
        year_span = agg.year_span,
        wettest = month_name(agg.wettest_month),
        "aggregated dataset"
    );

    let report = build_report(&agg);
    let svg = if options.charts {
        Some(render_svg(&report.charts)?)
    } else {
        None
    };
    let workbook = build_workbook(&report)?;

    sink.show_metrics(&report.metrics)?;
    sink.show_yearly_table(&report.yearly_table)?;
    sink.show_insight(&report.insight)?;
    if let Some(svg) = svg {
        sink.show_charts(&svg)?;
    }
    sink.offer_download(REPORT_FILE_NAME, REPORT_MIME_TYPE, &workbook)?;
    Ok(report)
}
