// PDF report export, drawn directly with lopdf.
//
// The report is a grid table on US-Letter pages: a grey header row of
// filenames, a first column of filenames, and the scores in between. Column
// width and font size shrink with the number of files; rows that overflow a
// page continue on the next one under a repeated header row.

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::header_row;
use crate::similarity::SimilarityReport;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 36.0;
const TITLE_SPACE: f32 = 40.0;
const MAX_FONT_SIZE: f32 = 10.0;
const MIN_FONT_SIZE: f32 = 4.0;
/// Rough Helvetica advance width as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.5;

/// Column and row geometry for one rendering.
struct TableLayout {
    col_width: f32,
    row_height: f32,
    font_size: f32,
    rows_per_page: usize,
}

impl TableLayout {
    fn new(columns: usize) -> Self {
        let usable_width = PAGE_WIDTH - 2.0 * MARGIN;
        let col_width = usable_width / columns.max(1) as f32;
        let font_size = (col_width / 7.0).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        let row_height = font_size * 2.0;

        let usable_height = PAGE_HEIGHT - 2.0 * MARGIN - TITLE_SPACE;
        // One row on every page is taken by the repeated header
        let rows_per_page = ((usable_height / row_height) as usize).saturating_sub(1).max(1);

        Self {
            col_width,
            row_height,
            font_size,
            rows_per_page,
        }
    }

    /// Characters that fit in a cell at this font size.
    fn max_chars(&self) -> usize {
        ((self.col_width - 4.0) / (self.font_size * AVG_CHAR_WIDTH)).max(1.0) as usize
    }
}

pub fn render(report: &SimilarityReport) -> Result<Vec<u8>> {
    let header = header_row(report, "File");
    let body: Vec<Vec<String>> = report
        .matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(i, scores)| {
            let label = report.files.get(i).cloned().unwrap_or_default();
            std::iter::once(label)
                .chain(scores.iter().map(|s| format!("{s:.2}")))
                .collect()
        })
        .collect();

    let layout = TableLayout::new(header.len());
    let title = format!(
        "Similarity Matrix ({} files), generated {}",
        report.files.len(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    );

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    // An empty report still gets one page with the header
    let chunks: Vec<&[Vec<String>]> = if body.is_empty() {
        vec![&body[..]]
    } else {
        body.chunks(layout.rows_per_page).collect()
    };

    let mut kids: Vec<Object> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let operations = page_operations(&title, &header, chunk, &layout);
        let content = Content { operations };
        let encoded = content.encode().context("Unable to encode page content")?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id: ObjectId = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .context("Unable to serialize the PDF report")?;
    Ok(buffer)
}

/// Draw the title, the header row and `rows` on one page.
fn page_operations(
    title: &str,
    header: &[String],
    rows: &[Vec<String>],
    layout: &TableLayout,
) -> Vec<Operation> {
    let mut ops = Vec::new();
    let table_top = PAGE_HEIGHT - MARGIN - TITLE_SPACE;
    let table_width = layout.col_width * header.len() as f32;
    let row_count = rows.len() + 1;

    push_text(&mut ops, title, MARGIN, PAGE_HEIGHT - MARGIN - 14.0, 12.0);

    // Header background
    ops.push(Operation::new("rg", vec![0.5.into(), 0.5.into(), 0.5.into()]));
    ops.push(Operation::new(
        "re",
        vec![
            MARGIN.into(),
            (table_top - layout.row_height).into(),
            table_width.into(),
            layout.row_height.into(),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("rg", vec![0.into(), 0.into(), 0.into()]));

    // Grid
    ops.push(Operation::new("RG", vec![0.into(), 0.into(), 0.into()]));
    ops.push(Operation::new("w", vec![0.5.into()]));
    for r in 0..row_count {
        let y = table_top - (r + 1) as f32 * layout.row_height;
        for c in 0..header.len() {
            let x = MARGIN + c as f32 * layout.col_width;
            ops.push(Operation::new(
                "re",
                vec![
                    x.into(),
                    y.into(),
                    layout.col_width.into(),
                    layout.row_height.into(),
                ],
            ));
        }
    }
    ops.push(Operation::new("S", vec![]));

    // Cell text, centered
    let max_chars = layout.max_chars();
    let all_rows = std::iter::once(header).chain(rows.iter().map(Vec::as_slice));
    for (r, row) in all_rows.enumerate() {
        let baseline =
            table_top - (r + 1) as f32 * layout.row_height + layout.row_height * 0.35;
        for (c, cell) in row.iter().enumerate() {
            let text = fit_to_width(cell, max_chars);
            let text_width = text.chars().count() as f32 * layout.font_size * AVG_CHAR_WIDTH;
            let x = MARGIN + c as f32 * layout.col_width + (layout.col_width - text_width) / 2.0;
            push_text(&mut ops, &text, x, baseline, layout.font_size);
        }
    }

    ops
}

fn push_text(ops: &mut Vec<Operation>, text: &str, x: f32, y: f32, size: f32) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_win_ansi(text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Truncate to `max_chars`, marking the cut with "..".
fn fit_to_width(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(2);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("..");
    truncated
}

/// Latin-1 subset of WinAnsiEncoding; anything else becomes '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7e | code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        })
        .collect()
}
