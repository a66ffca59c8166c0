// Spreadsheet export via rust_xlsxwriter.
//
// Layout: A1 is blank, row 1 holds the filenames as column headers, column A
// holds them as row labels, and the body holds the numeric scores.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use crate::similarity::SimilarityReport;

pub fn render(report: &SimilarityReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let score_format = Format::new().set_num_format("0.00");

    for (col, name) in report.files.iter().enumerate() {
        sheet
            .write_string_with_format(0, (col + 1) as u16, name, &header_format)
            .context("Unable to write the header row")?;
    }

    for (row, scores) in report.matrix.rows().iter().enumerate() {
        let row_index = (row + 1) as u32;
        let label = report.files.get(row).map(String::as_str).unwrap_or("");
        sheet
            .write_string_with_format(row_index, 0, label, &header_format)
            .context("Unable to write a row label")?;

        for (col, &score) in scores.iter().enumerate() {
            sheet
                .write_number_with_format(row_index, (col + 1) as u16, score, &score_format)
                .context("Unable to write a similarity score")?;
        }
    }

    let widest = report.files.iter().map(|f| f.chars().count()).max().unwrap_or(0);
    sheet
        .set_column_width(0, (widest.max(8) + 2) as f64)
        .context("Unable to size the label column")?;

    workbook
        .save_to_buffer()
        .context("Unable to serialize the workbook")
}
