use crate::error::Result;
use crate::handicap::HandicapTable;
use crate::scorepad::{ScorePad, ScorePadFormatter, ScorePadRow};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Excel limits sheet names to 31 characters and a few forbidden symbols
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '-',
            _ => c,
        })
        .collect();
    cleaned.chars().take(31).collect()
}

/// Write a score pad to an Excel file
pub fn write_score_pad_to_xlsx(
    pad: &ScorePad,
    formatter: &ScorePadFormatter,
    title: &str,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    write_score_pad_sheet(worksheet, pad, formatter, title)?;

    workbook.save(path)?;
    Ok(())
}

/// Write a score pad to a worksheet
fn write_score_pad_sheet(
    sheet: &mut Worksheet,
    pad: &ScorePad,
    formatter: &ScorePadFormatter,
    title: &str,
) -> Result<()> {
    sheet.set_name(sheet_name(title))?;

    // Set column widths
    sheet.set_column_width(0, 12)?; // End / label
    sheet.set_column_width(1, (pad.end_size * 4).max(10) as f64)?; // Arrows
    sheet.set_column_width(2, 6)?; // Hits
    sheet.set_column_width(3, 6)?; // Score
    sheet.set_column_width(4, 6)?; // Golds
    sheet.set_column_width(5, 8)?; // Running total

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin);

    for (col, header) in formatter.column_titles(pad).iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    let center_format = Format::new().set_align(FormatAlign::Center);
    let left_format = Format::new().set_align(FormatAlign::Left);
    let total_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_top(FormatBorder::Thin);

    let headers = pad.row_headers()?;
    for (row_idx, (header, row)) in headers.iter().zip(&pad.rows).enumerate() {
        let xl_row = (row_idx + 1) as u32;
        let cells = formatter.row_cells(header, row);
        let is_total = !matches!(row, ScorePadRow::End(_));
        let number_format = if is_total { &total_format } else { &center_format };

        sheet.write_string_with_format(xl_row, 0, &cells[0], number_format)?;
        sheet.write_string_with_format(xl_row, 1, &cells[1], &left_format)?;
        sheet.write_number_with_format(xl_row, 2, row.hits() as f64, number_format)?;
        sheet.write_number_with_format(xl_row, 3, row.score() as f64, number_format)?;
        sheet.write_number_with_format(xl_row, 4, row.golds() as f64, number_format)?;

        // Totals rows have no running total
        match row.running_total() {
            Some(total) => {
                sheet.write_number_with_format(xl_row, 5, total as f64, number_format)?;
            }
            None => {
                sheet.write_string_with_format(xl_row, 5, &cells[5], number_format)?;
            }
        }
    }

    Ok(())
}

/// Write handicap tables to an Excel file, one sheet per table
pub fn write_handicap_tables_to_xlsx(tables: &[HandicapTable], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    for table in tables {
        let worksheet = workbook.add_worksheet();
        write_handicap_sheet(worksheet, table)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_handicap_sheet(sheet: &mut Worksheet, table: &HandicapTable) -> Result<()> {
    sheet.set_name(sheet_name(&table.title()))?;

    sheet.set_column_width(0, 10)?; // Handicap
    sheet.set_column_width(1, 10)?; // Score

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin);
    let center_format = Format::new().set_align(FormatAlign::Center);

    sheet.write_string_with_format(0, 0, "Handicap", &header_format)?;
    sheet.write_string_with_format(0, 1, "Score", &header_format)?;

    for (row_idx, row) in table.rows.iter().enumerate() {
        let xl_row = (row_idx + 1) as u32;
        sheet.write_number_with_format(xl_row, 0, row.handicap as f64, &center_format)?;
        sheet.write_number_with_format(xl_row, 1, row.score as f64, &center_format)?;
    }

    Ok(())
}
