// Spreadsheet export. The workbook is assembled and serialized in memory;
// callers decide where (or whether) the bytes are written.
use crate::config::{SHEET_INSIGHTS, SHEET_MONTHLY, SHEET_YEARLY};
use crate::types::ReportPayload;
use crate::util::{format_fixed, month_name, strip_qualifier};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &bold)?;
        sheet.set_column_width(col as u16, (title.len() + 4) as f64)?;
    }
    Ok(())
}

fn write_yearly(sheet: &mut Worksheet, report: &ReportPayload) -> Result<(), XlsxError> {
    sheet.set_name(SHEET_YEARLY)?;
    write_header(sheet, &["Year", "Total Rainfall (mm)", "Status"])?;
    for (idx, row) in report.yearly_table.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_number(r, 0, row.year)?;
        sheet.write_string(r, 1, row.rainfall.as_str())?;
        sheet.write_string(r, 2, strip_qualifier(&row.status))?;
    }
    Ok(())
}

fn write_monthly(sheet: &mut Worksheet, report: &ReportPayload) -> Result<(), XlsxError> {
    sheet.set_name(SHEET_MONTHLY)?;
    write_header(sheet, &["Month Index", "Month Name", "Average Rainfall (mm)"])?;
    for (idx, m) in report.monthly.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_number(r, 0, m.month_index)?;
        sheet.write_string(r, 1, month_name(m.month_index))?;
        sheet.write_number(r, 2, m.average_rainfall)?;
    }
    Ok(())
}

fn write_insights(sheet: &mut Worksheet, report: &ReportPayload) -> Result<(), XlsxError> {
    sheet.set_name(SHEET_INSIGHTS)?;
    write_header(sheet, &["Metric", "Value"])?;
    let rows = [
        (
            format!("{}-Year Average Rainfall", report.years_covered),
            format!("{} mm", format_fixed(report.multi_year_average, 2)),
        ),
        (
            "Wettest Month".to_string(),
            month_name(report.wettest_month).to_string(),
        ),
        (
            "Main Recommendation".to_string(),
            report.insight.recommendation.clone(),
        ),
    ];
    for (idx, (metric, value)) in rows.into_iter().enumerate() {
        let r = idx as u32 + 1;
        sheet.write_string(r, 0, metric)?;
        sheet.write_string(r, 1, value)?;
    }
    sheet.set_column_width(1, 100)?;
    Ok(())
}

/// Build the three-sheet workbook and return it as an `.xlsx` blob.
pub fn build_workbook(report: &ReportPayload) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    write_yearly(workbook.add_worksheet(), report)?;
    write_monthly(workbook.add_worksheet(), report)?;
    write_insights(workbook.add_worksheet(), report)?;
    workbook.save_to_buffer()
}
