use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use super::{Border, CellStyle, CellValue, Report, SHEET_NAME};
use crate::error::RenderError;

fn format_for(style: &CellStyle) -> Format {
    let mut format = Format::new();

    if style.centered {
        format = format
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
    }
    if style.bold {
        format = format.set_bold();
    }
    if let Some(color) = style.font_color {
        format = format.set_font_color(Color::RGB(color.rgb()));
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(f64::from(size));
    }

    match style.border {
        Some(Border::Thin) => format.set_border(FormatBorder::Thin),
        Some(Border::BottomThin) => format.set_border_bottom(FormatBorder::Thin),
        None => format,
    }
}

fn write_sheet(report: &Report, sheet: &mut Worksheet) -> Result<(), RenderError> {
    sheet.set_name(SHEET_NAME)?;

    for (index, column) in (0u16..).zip(&report.columns) {
        sheet.set_column_width(index, f64::from(column.width))?;
    }

    for (&(row, column), cell) in &report.cells {
        let is_merge_anchor = report
            .merged
            .iter()
            .any(|range| range.row == row && range.first_column == column);
        if is_merge_anchor {
            continue;
        }

        let format = format_for(&cell.style);
        match &cell.value {
            CellValue::Text(text) => {
                sheet.write_string_with_format(row, column, text, &format)?;
            }
            CellValue::Number(number) => {
                let number = number
                    .to_f64()
                    .ok_or(RenderError::NumberOutOfRange(*number))?;
                sheet.write_number_with_format(row, column, number, &format)?;
            }
            CellValue::Blank => {
                sheet.write_blank(row, column, &format)?;
            }
        }
    }

    for range in &report.merged {
        let anchor = report.cell(range.row, range.first_column);
        let text = anchor.map(|cell| cell.value.render()).unwrap_or_default();
        let format = anchor.map(|cell| format_for(&cell.style)).unwrap_or_default();

        sheet.merge_range(
            range.row,
            range.first_column,
            range.row,
            range.last_column,
            &text,
            &format,
        )?;
    }

    Ok(())
}

pub fn to_workbook(report: &Report) -> Result<Workbook, RenderError> {
    let mut workbook = Workbook::new();
    write_sheet(report, workbook.add_worksheet())?;
    Ok(workbook)
}

pub fn to_bytes(report: &Report) -> Result<Vec<u8>, RenderError> {
    Ok(to_workbook(report)?.save_to_buffer()?)
}

/// Writes the report to `path`, replacing whatever was there.
pub fn save(report: &Report, path: &Path) -> Result<(), RenderError> {
    to_workbook(report)?.save(path)?;
    Ok(())
}
