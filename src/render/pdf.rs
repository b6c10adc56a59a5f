// Direct drawing of display lists with printpdf

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::collections::HashMap;
use std::io::BufWriter;

use super::Renderer;
use crate::error::AppError;
use crate::layout::canvas::{DrawOp, Rgb};
use crate::layout::metrics::FontFace;
use crate::layout::PageCanvas;

/// Writes pages with the standard PDF fonts; nothing is embedded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl Renderer for PdfRenderer {
    fn render(&self, title: &str, pages: &[PageCanvas]) -> Result<Vec<u8>, AppError> {
        let Some(first) = pages.first() else {
            return Err(AppError::Render("document has no pages".into()));
        };

        let (doc, page1, layer1) =
            PdfDocument::new(title, Mm(first.width), Mm(first.height), "Layer 1");
        let fonts = load_fonts(&doc)?;

        let mut layer = doc.get_page(page1).get_layer(layer1);
        for (i, page) in pages.iter().enumerate() {
            if i > 0 {
                let (next_page, next_layer) =
                    doc.add_page(Mm(page.width), Mm(page.height), "Layer 1");
                layer = doc.get_page(next_page).get_layer(next_layer);
            }
            draw_page(&layer, &fonts, page)?;
        }

        let mut writer = BufWriter::new(Vec::new());
        doc.save(&mut writer)
            .map_err(|e| AppError::Render(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

fn builtin(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::Sans => BuiltinFont::Helvetica,
        FontFace::SansBold => BuiltinFont::HelveticaBold,
        FontFace::Serif => BuiltinFont::TimesRoman,
        FontFace::SerifBold => BuiltinFont::TimesBold,
        FontFace::SerifItalic => BuiltinFont::TimesItalic,
    }
}

fn load_fonts(doc: &PdfDocumentReference) -> Result<HashMap<FontFace, IndirectFontRef>, AppError> {
    FontFace::ALL
        .into_iter()
        .map(|face| {
            doc.add_builtin_font(builtin(face))
                .map(|font| (face, font))
                .map_err(|e| AppError::Render(e.to_string()))
        })
        .collect()
}

fn color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.components();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

fn draw_page(
    layer: &PdfLayerReference,
    fonts: &HashMap<FontFace, IndirectFontRef>,
    page: &PageCanvas,
) -> Result<(), AppError> {
    for op in &page.ops {
        match op {
            DrawOp::Rect { x, y, width, height, color: fill } => {
                layer.set_fill_color(color(*fill));
                fill_rect(layer, *x, *y, *width, *height);
            }
            DrawOp::Line { x1, y1, x2, y2, color: stroke, thickness } => {
                layer.set_outline_color(color(*stroke));
                layer.set_outline_thickness(*thickness);
                draw_line(layer, *x1, *y1, *x2, *y2);
            }
            DrawOp::Text { x, y, text, style } => {
                let font = fonts
                    .get(&style.face)
                    .ok_or_else(|| AppError::Render(format!("font {:?} not loaded", style.face)))?;
                layer.set_fill_color(color(style.color));
                layer.use_text(text.as_str(), style.size, Mm(*x), Mm(*y), font);
            }
        }
    }
    Ok(())
}

// ============================================================================
// Drawing Utilities
// ============================================================================

fn draw_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x2), Mm(y2)), false),
    ];
    let line = Line {
        points,
        is_closed: false,
    };
    layer.add_line(line);
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    let ring = vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y + height)), false),
        (Point::new(Mm(x), Mm(y + height)), false),
    ];
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}
