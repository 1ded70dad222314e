//! Page layout for a board: title placement, grid geometry and per-cell text.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left corner,
//! y growing upwards. The layout is a pure function of its inputs so the PDF
//! writer only has to draw what it is given.

use tracing::debug;

use crate::board::{Board, BOARD_SIZE};
use crate::layout::fit::{block_height, fit_text, FitBox};
use crate::layout::font_metrics::{FontMetricTable, PageConfig};

/// A single line of text anchored at its left baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
}

/// One laid-out cell. `x`/`y` is the bottom-left corner of the cell square.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    pub row: usize,
    pub col: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font_size: u8,
    pub lines: Vec<PlacedLine>,
    pub degraded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub title: PlacedLine,
    pub title_font_size: f32,
    /// Bottom-left corner and edge length of the whole grid.
    pub grid_x: f32,
    pub grid_y: f32,
    pub grid_size: f32,
    pub cell_size: f32,
    /// Row-major, 25 entries.
    pub cells: Vec<CellLayout>,
}

/// Lays out `board` under `title` on one page.
pub fn layout_board(
    board: &Board,
    title: &str,
    config: &PageConfig,
    metrics: &FontMetricTable,
) -> BoardLayout {
    let width = config.page_width;
    let height = config.page_height;

    let title_width = metrics.text_width(title, config.title_font_size);
    let title_line = PlacedLine {
        text: title.to_string(),
        x: (width - title_width) / 2.0,
        baseline: height - config.title_offset,
    };

    let grid_size = (width - 2.0 * config.margin).min(height - 2.0 * config.margin);
    let cell_size = grid_size / BOARD_SIZE as f32;
    let grid_x = (width - grid_size) / 2.0;
    let grid_y = height - config.grid_top_offset - grid_size;

    let bounds = FitBox {
        max_width: cell_size - 2.0 * config.cell_padding,
        max_height: cell_size - 2.0 * config.cell_padding,
        max_font_size: config.max_font_size,
        min_font_size: config.min_font_size,
        line_spacing: config.line_spacing,
    };

    let cells = board
        .cells()
        .map(|(row, col, text)| {
            let x = grid_x + col as f32 * cell_size;
            // Row 0 is the top row; PDF y grows upwards.
            let y = grid_y + (BOARD_SIZE - 1 - row) as f32 * cell_size;
            layout_cell(row, col, x, y, cell_size, text, &bounds, config, metrics)
        })
        .collect();

    BoardLayout {
        page_width: width,
        page_height: height,
        title: title_line,
        title_font_size: config.title_font_size,
        grid_x,
        grid_y,
        grid_size,
        cell_size,
        cells,
    }
}

#[allow(clippy::too_many_arguments)]
fn layout_cell(
    row: usize,
    col: usize,
    x: f32,
    y: f32,
    cell_size: f32,
    text: &str,
    bounds: &FitBox,
    config: &PageConfig,
    metrics: &FontMetricTable,
) -> CellLayout {
    let fitted = fit_text(text, bounds, |s, size| metrics.text_width(s, size));
    if fitted.degraded {
        debug!(row, col, text, "Cell text set at minimum size without a height fit");
    }

    let font_size = f32::from(fitted.font_size);
    let advance = font_size + config.line_spacing;
    let text_height = block_height(fitted.lines.len(), font_size, config.line_spacing);

    // Start above the block and step down one advance before each line.
    let mut baseline = y + (cell_size + text_height) / 2.0;
    let lines = fitted
        .lines
        .into_iter()
        .map(|line| {
            baseline -= advance;
            let line_width = metrics.text_width(&line, font_size);
            PlacedLine {
                x: x + (cell_size - line_width) / 2.0,
                baseline,
                text: line,
            }
        })
        .collect();

    CellLayout {
        row,
        col,
        x,
        y,
        size: cell_size,
        font_size: fitted.font_size,
        lines,
        degraded: fitted.degraded,
    }
}
