//! PDF report writer.
//!
//! A4 landscape table layout: column widths are allocated proportionally
//! to content, rows paginate at a fixed height, and the header row is
//! redrawn at the top of every page.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::table::ReportTable;
use crate::errors::{AppError, AppResult};

// A4 landscape, millimetres
const PAGE_WIDTH: f64 = 297.0;
const PAGE_HEIGHT: f64 = 210.0;
const MARGIN: f64 = 14.0;

const TITLE_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 9.0;
const ROW_HEIGHT: f64 = 7.0;
/// Narrowest a column may get, so short numeric columns stay readable
const MIN_COLUMN_WIDTH: f64 = 14.0;
/// Rough glyph width at body size, used to truncate overflowing cells
const CHAR_WIDTH: f64 = 1.9;

/// Render the table as PDF bytes.
pub fn render(table: &ReportTable) -> AppResult<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(&table.title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "table");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::internal(format!("PDF font load failed: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::internal(format!("PDF font load failed: {}", e)))?;

    let printable_width = PAGE_WIDTH - 2.0 * MARGIN;
    let widths = table.allocate_widths(printable_width, MIN_COLUMN_WIDTH);

    // First page carries the title block; subsequent pages only the header
    let first_page_rows =
        rows_fitting(PAGE_HEIGHT - 2.0 * MARGIN - 2.0 * ROW_HEIGHT - ROW_HEIGHT);
    let later_page_rows = rows_fitting(PAGE_HEIGHT - 2.0 * MARGIN - ROW_HEIGHT);

    let page_chunks = paginate(table.rows.len(), first_page_rows, later_page_rows);
    let total_pages = page_chunks.len().max(1);

    let mut row_cursor = 0usize;
    for (page_number, chunk_len) in page_chunks.iter().copied().enumerate() {
        let layer = if page_number == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "table");
            doc.get_page(page).get_layer(layer)
        };

        let mut y = PAGE_HEIGHT - MARGIN;

        if page_number == 0 {
            layer.use_text(table.title.clone(), TITLE_SIZE as f32, Mm(MARGIN as f32), Mm(y as f32), &bold);
            y -= 2.0 * ROW_HEIGHT;
        }

        draw_row(&layer, &bold, &widths, &header_cells(table), y);
        y -= ROW_HEIGHT;

        for row in &table.rows[row_cursor..row_cursor + chunk_len] {
            draw_row(&layer, &font, &widths, row, y);
            y -= ROW_HEIGHT;
        }
        row_cursor += chunk_len;

        layer.use_text(
            format!("Page {} of {}", page_number + 1, total_pages),
            BODY_SIZE as f32,
            Mm((PAGE_WIDTH - MARGIN - 25.0) as f32),
            Mm((MARGIN / 2.0) as f32),
            &font,
        );
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::internal(format!("PDF save failed: {}", e)))
}

fn header_cells(table: &ReportTable) -> Vec<String> {
    table.headers.iter().map(|h| h.to_string()).collect()
}

/// How many body rows fit into the given vertical space
fn rows_fitting(space: f64) -> usize {
    (space / ROW_HEIGHT).floor().max(1.0) as usize
}

/// Split `total` rows into per-page chunk lengths. An empty table still
/// produces one page carrying only the header.
fn paginate(total: usize, first_page: usize, later_pages: usize) -> Vec<usize> {
    if total == 0 {
        return vec![0];
    }

    let mut chunks = Vec::new();
    let mut remaining = total;

    let first = remaining.min(first_page);
    chunks.push(first);
    remaining -= first;

    while remaining > 0 {
        let chunk = remaining.min(later_pages);
        chunks.push(chunk);
        remaining -= chunk;
    }

    chunks
}

/// Draw one row of cells, truncating any cell that overflows its column
fn draw_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    widths: &[f64],
    cells: &[String],
    y: f64,
) {
    let mut x = MARGIN;
    for (i, cell) in cells.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
        let max_chars = ((width - 1.0) / CHAR_WIDTH).max(1.0) as usize;

        let text = if cell.len() > max_chars {
            let mut truncated: String = cell.chars().take(max_chars.saturating_sub(1)).collect();
            truncated.push('…');
            truncated
        } else {
            cell.clone()
        };

        layer.use_text(text, BODY_SIZE as f32, Mm(x as f32), Mm(y as f32), font);
        x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_fills_first_page_then_overflows() {
        assert_eq!(paginate(0, 20, 24), vec![0]);
        assert_eq!(paginate(10, 20, 24), vec![10]);
        assert_eq!(paginate(20, 20, 24), vec![20]);
        assert_eq!(paginate(50, 20, 24), vec![20, 24, 6]);
    }

    #[test]
    fn rows_fitting_never_zero() {
        assert_eq!(rows_fitting(3.0), 1);
        assert_eq!(rows_fitting(70.0), 10);
    }
}
