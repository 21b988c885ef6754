// Excel report export (xlsx only)
//
// One worksheet per check, in the order the checks ran. Row 0 carries the
// check description to the right of the table, row 1 the headers, and the
// flagged rows start at row 2.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use nameqa_audit::model::{AuditResult, CheckResult};

use crate::error::ReportError;

/// Row holding the check description.
const DESCRIPTION_ROW: u32 = 0;
/// Row holding the column headers.
const HEADER_ROW: u32 = 1;
/// First data row.
const FIRST_DATA_ROW: u32 = 2;
/// Extra columns the description spans after the first free column.
const DESCRIPTION_SPAN: u16 = 3;

const DESCRIPTION_FILL: u32 = 0xFFF2CC;
const DESCRIPTION_FONT: u32 = 0x7F6000;

/// Result of an Excel export operation
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of sheets written
    pub sheets_exported: usize,
    /// Total data rows written across all sheets
    pub rows_exported: usize,
}

impl ExportResult {
    /// Returns a summary message suitable for display
    pub fn summary(&self) -> String {
        format!(
            "{} sheet{}, {} row{}",
            self.sheets_exported,
            if self.sheets_exported == 1 { "" } else { "s" },
            self.rows_exported,
            if self.rows_exported == 1 { "" } else { "s" },
        )
    }
}

/// Write every check result of an audit to an XLSX workbook at `path`.
pub fn export(result: &AuditResult, path: &Path) -> Result<ExportResult, ReportError> {
    let mut export = ExportResult::default();

    let header_format = Format::new().set_bold();
    let description_format = description_format();

    let mut workbook = Workbook::new();
    for check in &result.checks {
        let worksheet = workbook.add_worksheet().set_name(&check.label)?;
        export.rows_exported += write_check(worksheet, check, &header_format, &description_format)?;
        export.sheets_exported += 1;
    }

    workbook.save(path)?;

    tracing::info!(
        path = %path.display(),
        sheets = export.sheets_exported,
        rows = export.rows_exported,
        "wrote XLSX report"
    );
    Ok(export)
}

fn description_format() -> Format {
    Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_background_color(Color::RGB(DESCRIPTION_FILL))
        .set_font_color(Color::RGB(DESCRIPTION_FONT))
}

/// Write one check's table and description. Returns the number of data rows.
fn write_check(
    worksheet: &mut Worksheet,
    check: &CheckResult,
    header_format: &Format,
    description_format: &Format,
) -> Result<usize, ReportError> {
    for (col, name) in check.columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(HEADER_ROW, col, name, header_format)?;
        worksheet.set_column_width(col, column_width(name))?;
    }

    let rows = check.rows.cell_rows();
    for (offset, cells) in rows.iter().enumerate() {
        let row = FIRST_DATA_ROW + offset as u32;
        for (col, value) in cells.iter().enumerate() {
            // blank cells stay empty rather than holding ""
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, *value)?;
            }
        }
    }

    let first = check.columns.len() as u16;
    worksheet.merge_range(
        DESCRIPTION_ROW,
        first,
        DESCRIPTION_ROW,
        first + DESCRIPTION_SPAN,
        &check.description,
        description_format,
    )?;
    for col in first..=first + DESCRIPTION_SPAN {
        worksheet.set_column_width(col, 24)?;
    }
    worksheet.set_row_height(DESCRIPTION_ROW, 60)?;

    // keep description and headers on screen while scrolling
    worksheet.set_freeze_panes(FIRST_DATA_ROW, 0)?;

    Ok(rows.len())
}

fn column_width(column: &str) -> f64 {
    if column.contains("url") || column.contains("website") {
        45.0
    } else if column == "forage_company_ids" {
        30.0
    } else {
        18.0
    }
}
