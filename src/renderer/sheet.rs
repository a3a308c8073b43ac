//! SVG kunkunshi sheet.
//!
//! Cells run top to bottom within a column and columns run right to
//! left, as in a printed kunkunshi score.  Each cell shows the glyph,
//! the western note name and a mark for the string it is played on.

use super::constants::*;
use super::svg_builder::{empty_svg, SvgBuilder};
use crate::model::TabPoint;

#[derive(Debug, Clone)]
pub struct SheetOptions {
    /// Title drawn above the columns
    pub title: Option<String>,
    /// Cells per column before wrapping to the next column (minimum 1)
    pub cells_per_column: usize,
    /// Cells below this confidence are tinted
    pub low_confidence: f64,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            title: None,
            cells_per_column: DEFAULT_CELLS_PER_COLUMN,
            low_confidence: 0.7,
        }
    }
}

/// Render tab points as a self-contained SVG string.
pub fn render_tab_to_svg(points: &[TabPoint], options: &SheetOptions) -> String {
    if points.is_empty() {
        return empty_svg("No notes to render");
    }

    let per_column = options.cells_per_column.max(1);
    let columns = points.len().div_ceil(per_column);
    let rows = per_column.min(points.len());

    let header = if options.title.is_some() { HEADER_HEIGHT } else { 0.0 };
    let width = 2.0 * PAGE_MARGIN + columns as f64 * CELL_WIDTH + (columns - 1) as f64 * COLUMN_GAP;
    let height = 2.0 * PAGE_MARGIN + header + rows as f64 * CELL_HEIGHT;
    let top = PAGE_MARGIN + header;

    let mut svg = SvgBuilder::new(width, height);
    svg.rect(0.0, 0.0, width, height, "white", "none", 0.0);

    if let Some(title) = &options.title {
        svg.text(width / 2.0, PAGE_MARGIN + TITLE_SIZE, title, TITLE_SIZE, "bold", HEADER_COLOR, "middle");
    }

    for (col, chunk) in points.chunks(per_column).enumerate() {
        // Column 0 is the rightmost.
        let x = width - PAGE_MARGIN - CELL_WIDTH - col as f64 * (CELL_WIDTH + COLUMN_GAP);
        let column_height = chunk.len() as f64 * CELL_HEIGHT;

        for (row, point) in chunk.iter().enumerate() {
            let y = top + row as f64 * CELL_HEIGHT;
            render_cell(&mut svg, point, x, y, options);
            if row > 0 {
                svg.line(x, y, x + CELL_WIDTH, y, RULE_COLOR, CELL_RULE_WIDTH);
            }
        }

        svg.rect(x, top, CELL_WIDTH, column_height, "none", BORDER_COLOR, COLUMN_BORDER_WIDTH);
    }

    svg.build()
}

fn render_cell(svg: &mut SvgBuilder, point: &TabPoint, x: f64, y: f64, options: &SheetOptions) {
    if point.confidence < options.low_confidence {
        svg.rect(x, y, CELL_WIDTH, CELL_HEIGHT, LOW_CONFIDENCE_FILL, "none", 0.0);
    }

    let baseline = y + CELL_HEIGHT / 2.0 + GLYPH_SIZE / 3.0;
    svg.text(x + CELL_WIDTH / 2.0 - 4.0, baseline, point.symbol.glyph(), GLYPH_SIZE, "normal", GLYPH_COLOR, "middle");
    svg.text(x + 3.0, y + STRING_MARK_SIZE + 2.0, point.register.kanji(), STRING_MARK_SIZE, "normal", STRING_MARK_COLOR, "start");
    svg.text(x + CELL_WIDTH - 3.0, y + CELL_HEIGHT - 4.0, &point.note_name, NOTE_NAME_SIZE, "normal", NOTE_NAME_COLOR, "end");
}
