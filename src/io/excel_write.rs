use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::Result;
use crate::model::{COLUMNS, FieldValue, OutputRow};

/// Name of the single sheet in the exported workbook.
pub const SHEET_NAME: &str = "Sheet1";
/// File name offered for the exported workbook.
pub const EXPORT_FILE_NAME: &str = "produtos_wms.xlsx";

/// Serializes the rows into an in-memory `.xlsx` file: one sheet, a header row
/// with the column labels, and one row per [`OutputRow`]. No styling.
pub fn workbook_bytes(rows: &[OutputRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col_idx, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.cells().iter().enumerate() {
            write_cell(worksheet, (row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Writes serialized workbook bytes to `path`.
pub fn write_workbook(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)?;
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &FieldValue) -> Result<()> {
    match cell {
        FieldValue::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        FieldValue::Number(value) => match value.as_f64() {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            None => {
                worksheet.write_string(row, col, value.to_string())?;
            }
        },
        FieldValue::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
        FieldValue::Empty => {}
    }
    Ok(())
}
