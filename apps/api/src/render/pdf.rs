//! PDF emission for a laid-out board.
//!
//! Writes a single-page PDF with `pdf-writer`: a content stream that strokes
//! every cell border and shows every placed line, plus the base-14 font
//! dictionary. All geometry comes from `layout_board`; the only inputs that vary
//! between runs are the document-info timestamps.

use chrono::{Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::board::Board;
use crate::catalog::Theme;
use crate::layout::{
    encode_win_ansi, helvetica_bold, layout_board, BoardLayout, FontMetricTable, PageConfig,
};

pub const PDF_MIME: &str = "application/pdf";

const FONT_NAME: Name<'static> = Name(b"F1");
const BORDER_WIDTH: f32 = 1.0;
const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Renders `board` with `theme`'s title to PDF bytes.
pub fn render_board_pdf(board: &Board, theme: &Theme, config: &PageConfig) -> Vec<u8> {
    let metrics = helvetica_bold();
    let layout = layout_board(board, &theme.title, config, metrics);
    write_pdf(&layout, &theme.title, metrics)
}

fn write_pdf(layout: &BoardLayout, title: &str, metrics: &FontMetricTable) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let font_id = Ref::new(4);
    let content_id = Ref::new(5);
    let info_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, layout.page_width, layout.page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().fonts().pair(FONT_NAME, font_id);
    page.finish();

    pdf.type1_font(font_id)
        .base_font(Name(metrics.base_font.as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let content = build_content(layout);
    pdf.stream(content_id, &content);

    let now = Utc::now();
    let created = Date::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(0);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(PRODUCER))
        .creation_date(created);

    pdf.finish()
}

fn build_content(layout: &BoardLayout) -> Vec<u8> {
    let mut content = Content::new();

    show_line(
        &mut content,
        layout.title_font_size,
        layout.title.x,
        layout.title.baseline,
        &layout.title.text,
    );

    content.set_line_width(BORDER_WIDTH);
    for cell in &layout.cells {
        content.rect(cell.x, cell.y, cell.size, cell.size);
    }
    content.stroke();

    for cell in &layout.cells {
        let size = f32::from(cell.font_size);
        for line in &cell.lines {
            show_line(&mut content, size, line.x, line.baseline, &line.text);
        }
    }

    content.finish().to_vec()
}

fn show_line(content: &mut Content, font_size: f32, x: f32, baseline: f32, text: &str) {
    let encoded = encode_win_ansi(text);
    content
        .begin_text()
        .set_font(FONT_NAME, font_size)
        .next_line(x, baseline)
        .show(Str(&encoded))
        .end_text();
}
