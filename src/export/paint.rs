//! Canvas fallback: paints a [`PreviewDocument`] without html2canvas.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. Layout is fixed to the story
//! format and scaled from a 1080-wide reference, so a different export size
//! keeps the same proportions. The constants mirror the `.story-preview`
//! rules in `style/main.css`. All fallible `Canvas2D` calls propagate
//! `JsValue` errors; [`paint_document`] converts them once at the top.

use schedule::preview::{PreviewDocument, PreviewRow, PreviewSection};
use schedule::theme::Palette;
use schedule::StatusCode;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::export::ExportError;
use crate::export::pipeline::TargetSize;

/// Width the layout constants below are expressed in.
const REFERENCE_WIDTH: f64 = 1080.0;

const MARGIN: f64 = 96.0;
const HEADER_TOP: f64 = 150.0;
const DATE_TOP: f64 = 270.0;
const SECTIONS_TOP: f64 = 420.0;
const SECTION_HEADING_HEIGHT: f64 = 96.0;
const SECTION_GAP: f64 = 40.0;
const ROW_HEIGHT: f64 = 64.0;
const COMMENT_LINE_HEIGHT: f64 = 52.0;
const COMMENT_MAX_LINES: usize = 2;
const BRAND_BOTTOM_OFFSET: f64 = 80.0;

const FONT_FAMILY: &str = "'Helvetica Neue', Arial, sans-serif";

/// Paint `doc` onto a new canvas of `size`.
///
/// # Errors
///
/// Returns [`ExportError::Rasterize`] if the canvas or its 2D context cannot
/// be created or any drawing call fails.
pub fn paint_document(
    document: &Document,
    doc: &PreviewDocument,
    size: TargetSize,
) -> Result<HtmlCanvasElement, ExportError> {
    let rasterize_err = |e: JsValue| ExportError::Rasterize(format!("{e:?}"));

    let canvas = document
        .create_element("canvas")
        .map_err(rasterize_err)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ExportError::Rasterize("canvas element has the wrong type".into()))?;
    canvas.set_width(size.width);
    canvas.set_height(size.height);

    let ctx = canvas
        .get_context("2d")
        .map_err(rasterize_err)?
        .ok_or_else(|| ExportError::Rasterize("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ExportError::Rasterize("2d context has the wrong type".into()))?;

    draw(&ctx, doc, f64::from(size.width), f64::from(size.height)).map_err(rasterize_err)?;
    Ok(canvas)
}

/// Draw the whole story: background, header, sections, comment, brand.
fn draw(ctx: &CanvasRenderingContext2d, doc: &PreviewDocument, width: f64, height: f64) -> Result<(), JsValue> {
    let palette = doc.theme.palette();
    let scale = width / REFERENCE_WIDTH;

    ctx.save();
    ctx.scale(scale, scale)?;
    let height = height / scale;

    // Layer 1: background.
    ctx.set_fill_style_str(palette.background);
    ctx.fill_rect(0.0, 0.0, REFERENCE_WIDTH, height);

    // Layer 2: header.
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(palette.accent);
    ctx.set_font(&font(700, 56.0));
    ctx.fill_text("RESERVATION", REFERENCE_WIDTH / 2.0, HEADER_TOP)?;
    ctx.set_fill_style_str(palette.text);
    ctx.set_font(&font(700, 120.0));
    ctx.fill_text(&doc.date_label, REFERENCE_WIDTH / 2.0, DATE_TOP)?;

    // Layer 3: slot sections.
    let mut top = SECTIONS_TOP;
    for section in &doc.sections {
        top = draw_section(ctx, section, &palette, top)? + SECTION_GAP;
    }

    // Layer 4: comment and brand.
    let brand_y = height - BRAND_BOTTOM_OFFSET;
    draw_comment(ctx, &doc.comment, &palette, top, brand_y - COMMENT_LINE_HEIGHT)?;
    ctx.set_text_align("center");
    ctx.set_fill_style_str(palette.accent);
    ctx.set_font(&font(600, 40.0));
    ctx.fill_text(&doc.brand, REFERENCE_WIDTH / 2.0, brand_y)?;

    ctx.restore();
    Ok(())
}

/// Draw one period card and return the y just below it.
fn draw_section(
    ctx: &CanvasRenderingContext2d,
    section: &PreviewSection,
    palette: &Palette,
    top: f64,
) -> Result<f64, JsValue> {
    #[allow(clippy::cast_precision_loss)]
    let rows_height = section.rows.len() as f64 * ROW_HEIGHT;
    let card_height = SECTION_HEADING_HEIGHT + rows_height;

    ctx.set_fill_style_str(palette.card);
    ctx.fill_rect(MARGIN, top, REFERENCE_WIDTH - 2.0 * MARGIN, card_height);

    ctx.set_text_align("center");
    ctx.set_fill_style_str(palette.accent);
    ctx.set_font(&font(700, 48.0));
    ctx.fill_text(section.period.heading(), REFERENCE_WIDTH / 2.0, top + SECTION_HEADING_HEIGHT / 2.0)?;

    let mut y = top + SECTION_HEADING_HEIGHT + ROW_HEIGHT / 2.0;
    for row in &section.rows {
        draw_row(ctx, row, palette, y)?;
        y += ROW_HEIGHT;
    }
    Ok(top + card_height)
}

fn draw_row(ctx: &CanvasRenderingContext2d, row: &PreviewRow, palette: &Palette, y: f64) -> Result<(), JsValue> {
    let time_x = REFERENCE_WIDTH / 2.0 - 120.0;
    let glyph_x = REFERENCE_WIDTH / 2.0 + 120.0;

    ctx.set_text_align("center");
    ctx.set_fill_style_str(palette.text);
    ctx.set_font(&font(500, 44.0));
    ctx.fill_text(&row.time, time_x, y)?;

    ctx.set_fill_style_str(status_color(row.status, palette));
    ctx.set_font(&font(700, 48.0));
    ctx.fill_text(row.glyph, glyph_x, y)
}

/// Draw `comment` wrapped to the card width, at most
/// [`COMMENT_MAX_LINES`] lines between `top` and `bottom`.
fn draw_comment(
    ctx: &CanvasRenderingContext2d,
    comment: &str,
    palette: &Palette,
    top: f64,
    bottom: f64,
) -> Result<(), JsValue> {
    if comment.trim().is_empty() {
        return Ok(());
    }
    ctx.set_text_align("center");
    ctx.set_fill_style_str(palette.text);
    ctx.set_font(&font(400, 40.0));

    let max_width = REFERENCE_WIDTH - 2.0 * MARGIN;
    let lines = wrap(ctx, comment, max_width)?;
    let mut y = top + COMMENT_LINE_HEIGHT / 2.0;
    for line in lines.iter().take(COMMENT_MAX_LINES) {
        if y > bottom {
            break;
        }
        ctx.fill_text(line, REFERENCE_WIDTH / 2.0, y)?;
        y += COMMENT_LINE_HEIGHT;
    }
    Ok(())
}

/// Greedy per-character wrap; comments are often CJK without spaces.
fn wrap(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> Result<Vec<String>, JsValue> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for ch in paragraph.chars() {
            line.push(ch);
            if ctx.measure_text(&line)?.width() > max_width {
                line.pop();
                lines.push(std::mem::take(&mut line));
                line.push(ch);
            }
        }
        lines.push(line);
    }
    Ok(lines)
}

fn status_color(status: StatusCode, palette: &Palette) -> &'static str {
    match status {
        StatusCode::Open => palette.open,
        StatusCode::Closed => palette.closed,
        StatusCode::Maybe => palette.maybe,
    }
}

fn font(weight: u16, px: f64) -> String {
    format!("{weight} {px}px {FONT_FAMILY}")
}
