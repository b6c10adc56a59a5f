// The eight page builders of the wedding guide

use chrono::NaiveDate;

use super::canvas::{PageBuilder, PageCanvas, Rgb, TextStyle};
use super::metrics::{FontFace, FontMetrics, PT_TO_MM};
use super::template::GuideTemplate;
use super::GuideContext;
use crate::budget::{format_money, TAX_RATE};
use crate::model::{WineCategory, WineSelection};

/// Share of the font size taken by ascenders, used to place the first
/// baseline below the top of a block.
const ASCENT: f32 = 0.8;

fn pt(value: f32) -> f32 {
    value * PT_TO_MM
}

fn style(face: FontFace, size: f32, color: Rgb) -> TextStyle {
    TextStyle::new(face, size, color)
}

// ============================================================================
// Shared Pieces
// ============================================================================

fn new_page<'m>(t: &GuideTemplate, metrics: &'m dyn FontMetrics, background: Rgb) -> PageBuilder<'m> {
    let g = t.geometry;
    let mut page = PageBuilder::new(g.width, g.height, metrics);
    page.fill_rect(0.0, 0.0, g.width, g.height, background);
    page
}

fn gold_divider(page: &mut PageBuilder, t: &GuideTemplate, y: f32, width: f32) {
    let cx = t.geometry.center_x();
    page.line(cx - width / 2.0, y, cx + width / 2.0, y, t.palette.gold, 1.0);
}

/// Title, optional subtitle and divider. Returns the y where content starts.
fn section_header(page: &mut PageBuilder, t: &GuideTemplate, title: &str, subtitle: Option<&str>) -> f32 {
    let p = t.palette;
    let cx = t.geometry.center_x();

    let mut y = t.geometry.top() - pt(28.0) * ASCENT;
    page.text_centered(cx, y, title, style(FontFace::SerifBold, 28.0, p.burgundy));
    y -= pt(6.0);

    if let Some(subtitle) = subtitle {
        y -= pt(12.0);
        page.text_centered(cx, y, subtitle, style(FontFace::SerifItalic, 12.0, p.text_medium));
        y -= pt(20.0);
    } else {
        y -= pt(8.0);
    }

    gold_divider(page, t, y, pt(50.0));
    y - pt(25.0)
}

fn section_label(page: &mut PageBuilder, t: &GuideTemplate, y: f32, text: &str) -> f32 {
    let s = style(FontFace::SansBold, 11.0, t.palette.burgundy);
    page.text(t.geometry.margin, y - pt(11.0) * ASCENT, text, s);
    y - pt(11.0 + 10.0)
}

fn page_number(page: &mut PageBuilder, t: &GuideTemplate, number: u32) {
    page.text_centered(
        t.geometry.center_x(),
        pt(30.0),
        &number.to_string(),
        style(FontFace::Sans, 9.0, t.palette.text_light),
    );
}

/// Lowest y that content may reach without colliding with the page number.
fn content_floor() -> f32 {
    pt(30.0 + 9.0 + 6.0)
}

/// Warn when a block ends below the content floor. Returns whether it did.
fn check_overflow(page_name: &str, bottom: f32) -> bool {
    let overflowing = bottom < content_floor();
    if overflowing {
        tracing::warn!(page = page_name, bottom_mm = bottom, "content runs past the bottom of the page");
    }
    overflowing
}

/// ISO dates render as "June 14, 2025"; anything else is shown verbatim.
pub fn format_event_date(date: Option<&str>) -> Option<String> {
    let raw = date.map(str::trim).filter(|d| !d.is_empty())?;
    Some(match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    })
}

/// Content placed relative to the top-left corner of a box whose height
/// is only known once everything inside has been laid out.
struct Block {
    items: Vec<Placed>,
    cursor: f32,
}

enum Placed {
    Text {
        x: f32,
        baseline: f32,
        text: String,
        style: TextStyle,
    },
    Rect {
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
}

impl Block {
    fn new() -> Self {
        Block {
            items: Vec::new(),
            cursor: 0.0,
        }
    }

    fn gap(&mut self, dy: f32) {
        self.cursor += dy;
    }

    fn text_at(&mut self, x: f32, baseline: f32, text: impl Into<String>, style: TextStyle) {
        self.items.push(Placed::Text {
            x,
            baseline,
            text: text.into(),
            style,
        });
    }

    fn line(&mut self, x: f32, text: impl Into<String>, style: TextStyle, leading: f32) {
        let baseline = self.cursor + pt(style.size) * ASCENT;
        self.text_at(x, baseline, text, style);
        self.cursor += leading;
    }

    fn lines(&mut self, x: f32, lines: Vec<String>, style: TextStyle, leading: f32) {
        for line in lines {
            self.line(x, line, style, leading);
        }
    }

    fn rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Rgb) {
        self.items.push(Placed::Rect {
            x,
            top,
            width,
            height,
            color,
        });
    }

    fn height(&self) -> f32 {
        self.cursor
    }

    fn draw(self, page: &mut PageBuilder, left: f32, top: f32) {
        for item in self.items {
            match item {
                Placed::Text { x, baseline, text, style } => {
                    page.text(left + x, top - baseline, &text, style)
                }
                Placed::Rect { x, top: offset, width, height, color } => {
                    page.fill_rect(left + x, top - offset - height, width, height, color)
                }
            }
        }
    }
}

// ============================================================================
// Page 1: Cover
// ============================================================================

pub fn cover_page(ctx: &GuideContext, t: &GuideTemplate, metrics: &dyn FontMetrics) -> PageCanvas {
    let p = t.palette;
    let g = t.geometry;
    let cx = g.center_x();
    let mut page = new_page(t, metrics, p.burgundy);

    let mut y = 205.0;
    page.text_centered(cx, y, t.brand.name, style(FontFace::Sans, 10.0, p.gold));
    y -= pt(14.0);
    page.text_centered(cx, y, t.brand.tagline, style(FontFace::SerifItalic, 10.0, p.gold));

    let title = style(FontFace::Serif, 48.0, p.white);
    y -= pt(80.0 + 48.0);
    page.text_centered(cx, y, "Your Wedding", title);
    y -= pt(53.0);
    page.text_centered(cx, y, "Wine Guide", title);

    let subtitle_style = style(FontFace::SerifItalic, 16.0, p.white);
    let subtitle = format!("Prepared exclusively for {}", ctx.event.names());
    let subtitle_lines = page.wrap(&subtitle, subtitle_style, g.content_width());
    y -= pt(20.0 + 16.0);
    y = page.lines_centered(cx, y, &subtitle_lines, subtitle_style, pt(20.0));

    y -= pt(4.0);
    gold_divider(&mut page, t, y, pt(60.0));
    y -= pt(30.0 + 11.0);

    let details = style(FontFace::Sans, 11.0, p.white);
    let venue = ctx.event.venue.as_deref().unwrap_or("");
    for detail in [format_event_date(ctx.event.date.as_deref()).unwrap_or_default(), venue.to_string()] {
        if !detail.is_empty() {
            page.text_centered(cx, y, &detail, details);
            y -= pt(11.0 * 1.8);
        }
    }

    page.text_centered(cx, pt(50.0 + 13.0), t.brand.name, style(FontFace::Sans, 10.0, p.gold));
    page.text_centered(cx, pt(50.0), t.brand.tagline, style(FontFace::SerifItalic, 9.0, p.gold));

    page.finish()
}

// ============================================================================
// Page 2: Table of Contents
// ============================================================================

pub fn contents_page(_ctx: &GuideContext, t: &GuideTemplate, metrics: &dyn FontMetrics) -> PageCanvas {
    let p = t.palette;
    let cx = t.geometry.center_x();
    let mut page = new_page(t, metrics, p.cream);
    let mut y = section_header(&mut page, t, "What's Inside", None);

    let list_width = pt(400.0);
    let left = cx - list_width / 2.0;
    let right = cx + list_width / 2.0;
    let row_height = pt(12.0 + 13.0 + 12.0);

    for (i, entry) in t.contents.iter().enumerate() {
        let baseline = y - pt(12.0) - pt(13.0) * ASCENT;
        page.text(left, baseline, entry.title, style(FontFace::Sans, 13.0, p.text_dark));
        page.text_right(right, baseline, entry.pages, style(FontFace::Sans, 13.0, p.text_light));
        y -= row_height;
        if i + 1 < t.contents.len() {
            page.line(left, y, right, y, p.cream_dark, 0.75);
        }
    }

    let intro = style(FontFace::SerifItalic, 11.0, p.text_medium);
    let lines = page.wrap(t.contents_intro, intro, list_width - pt(80.0));
    page.lines_centered(cx, y - pt(60.0), &lines, intro, pt(11.0 * 1.7));

    page_number(&mut page, t, 2);
    page.finish()
}

// ============================================================================
// Page 3: Letter and Event Details
// ============================================================================

pub fn vision_page(ctx: &GuideContext, t: &GuideTemplate, metrics: &dyn FontMetrics) -> PageCanvas {
    let p = t.palette;
    let g = t.geometry;
    let mut page = new_page(t, metrics, p.cream);
    let top = section_header(&mut page, t, "Your Wine Vision", Some("Understanding Your Celebration"));

    let pad = pt(30.0);
    let text_width = g.content_width() - 2.0 * pad;
    let mut letter = Block::new();
    letter.gap(pad);

    let greeting = style(FontFace::SerifBold, 16.0, p.burgundy);
    let greeting_lines = page.wrap(&format!("{} -", ctx.event.names()), greeting, text_width);
    letter.lines(0.0, greeting_lines, greeting, pt(20.0));
    letter.gap(pt(15.0));

    let body = style(FontFace::Serif, 11.0, p.text_dark);
    let paragraphs: Vec<&str> = ctx
        .letter
        .split("\n\n")
        .map(str::trim)
        .filter(|para| !para.is_empty())
        .collect();
    for (i, para) in paragraphs.iter().enumerate() {
        if i > 0 {
            letter.gap(pt(12.0));
        }
        let lines = page.wrap(para, body, text_width);
        letter.lines(0.0, lines, body, pt(11.0 * 1.7));
    }

    letter.gap(pt(20.0));
    letter.line(0.0, "Best,", style(FontFace::Serif, 11.0, p.text_medium), pt(11.0 + 30.0));
    letter.line(0.0, t.brand.sommelier, style(FontFace::SerifItalic, 14.0, p.burgundy), pt(14.0));
    letter.gap(pad);

    let height = letter.height();
    page.fill_rect(g.margin, top - height, g.content_width(), height, p.white);
    letter.draw(&mut page, g.margin + pad, top);
    check_overflow("vision", top - height);

    let event = ctx.event;
    let venue = event
        .venue_type
        .as_deref()
        .filter(|v| !v.is_empty())
        .or(event.venue.as_deref().filter(|v| !v.is_empty()))
        .unwrap_or("Venue");
    let details = [
        ("GUEST COUNT", format!("{} Guests", event.guest_count())),
        ("RECEPTION", format!("{} Hours", event.reception_hours())),
        ("BAR STYLE", event.bar().label().to_string()),
        ("VENUE", venue.to_string()),
    ];

    let col_gap = pt(20.0);
    let col_width = (g.content_width() - col_gap) / 2.0;
    let grid_top = top - height - pt(25.0);
    let row_height = pt(8.0 + 4.0 + 12.0 + 20.0);
    let label = style(FontFace::Sans, 8.0, p.text_light);
    let value = style(FontFace::SansBold, 12.0, p.text_dark);
    let marker = pt(8.0);

    for (i, (name, text)) in details.iter().enumerate() {
        let x = g.margin + (i % 2) as f32 * (col_width + col_gap);
        let row_top = grid_top - (i / 2) as f32 * row_height;
        page.fill_rect(x, row_top - marker, marker, marker, p.gold);

        let text_x = x + marker + pt(10.0);
        let label_y = row_top - pt(8.0) * ASCENT;
        page.text(text_x, label_y, name, label);
        let lines = page.wrap(text, value, col_width - marker - pt(10.0));
        page.lines(text_x, label_y - pt(4.0 + 12.0), &lines, value, pt(14.0));
    }

    page_number(&mut page, t, 3);
    page.finish()
}

// ============================================================================
// Pages 4-5: Wine Selections
// ============================================================================

fn wine_card(page: &mut PageBuilder, t: &GuideTemplate, wine: &WineSelection, top: f32) -> f32 {
    let p = t.palette;
    let g = t.geometry;
    let pad = pt(16.0);
    let inner = g.content_width() - 2.0 * pad;
    let mut card = Block::new();
    card.gap(pad);

    // category badge
    let badge_style = style(FontFace::SansBold, 8.0, p.white);
    let badge = wine.category.label().to_uppercase();
    let badge_width = page.measure(&badge, badge_style) + pt(20.0);
    let badge_height = pt(4.0 + 8.0 + 4.0);
    card.rect(0.0, card.height(), badge_width, badge_height, p.burgundy);
    card.text_at(pt(10.0), card.height() + pt(4.0) + pt(8.0) * ASCENT, badge, badge_style);
    card.gap(badge_height + pt(8.0));

    let name = style(FontFace::SerifBold, 18.0, p.text_dark);
    card.lines(0.0, page.wrap(&wine.name, name, inner), name, pt(20.0));

    let region = style(FontFace::SerifItalic, 11.0, p.text_medium);
    card.lines(0.0, page.wrap(&wine.region, region, inner), region, pt(15.0));
    card.gap(pt(4.0));

    let bottle = style(FontFace::SansBold, 11.0, p.text_dark);
    let price = style(FontFace::Sans, 11.0, p.text_medium);
    let price_text = format!("~{}/bottle", format_money(wine.price));
    let bottle_width = page.measure(&wine.bottle, bottle);
    let spacing = pt(4.0);
    if bottle_width + spacing + page.measure(&price_text, price) <= inner {
        let baseline = card.height() + pt(11.0) * ASCENT;
        card.text_at(0.0, baseline, wine.bottle.clone(), bottle);
        let price_x = if wine.bottle.is_empty() { 0.0 } else { bottle_width + spacing };
        card.text_at(price_x, baseline, price_text, price);
        card.gap(pt(15.0));
    } else {
        card.lines(0.0, page.wrap(&wine.bottle, bottle, inner), bottle, pt(15.0));
        card.line(0.0, price_text, price, pt(15.0));
    }
    card.gap(pt(6.0));

    let narrative = style(FontFace::Serif, 10.0, p.text_medium);
    card.lines(0.0, page.wrap(&wine.narrative, narrative, inner), narrative, pt(14.0));
    card.gap(pt(8.0));

    // highlighted "why" box with a gold rule on the left
    let why_label = style(FontFace::SansBold, 9.0, p.burgundy);
    let why_text = style(FontFace::SerifItalic, 9.0, p.text_medium);
    let rule = pt(3.0);
    let box_pad = pt(10.0);
    let why_lines = page.wrap(&wine.why_perfect, why_text, inner - rule - 2.0 * box_pad);
    let box_height = pt(8.0 + 12.0) + why_lines.len() as f32 * pt(12.0) + pt(8.0);
    let box_top = card.height();
    card.rect(0.0, box_top, inner, box_height, p.highlight);
    card.rect(0.0, box_top, rule, box_height, p.gold);
    card.gap(pt(8.0));
    card.line(rule + box_pad, "Why this is perfect:", why_label, pt(12.0));
    card.lines(rule + box_pad, why_lines, why_text, pt(12.0));
    card.gap(box_top + box_height + pt(10.0) - card.height());

    card.line(0.0, "Tasting Notes", style(FontFace::SansBold, 10.0, p.text_dark), pt(14.0));
    tasting_notes(page, &mut card, t, &wine.tasting_notes, inner);
    card.gap(pad);

    let height = card.height();
    page.fill_rect(g.margin, top - height, g.content_width(), height, p.white);
    card.draw(page, g.margin + pad, top);
    top - height
}

/// Bulleted notes flow left to right, wrapping onto a new row when the
/// next note would not fit.
fn tasting_notes(page: &PageBuilder, card: &mut Block, t: &GuideTemplate, notes: &[String], width: f32) {
    let note = style(FontFace::Sans, 9.0, t.palette.text_medium);
    let bullet = pt(2.5);
    let indent = pt(8.0);
    let spacing = pt(16.0);
    let leading = pt(13.0);

    let mut x = 0.0;
    for text in notes.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let item_width = indent + page.measure(text, note);
        if x > 0.0 && x + item_width > width {
            card.gap(leading);
            x = 0.0;
        }
        let baseline = card.height() + pt(9.0) * ASCENT;
        card.rect(x, baseline - pt(9.0) * 0.35 - bullet / 2.0, bullet, bullet, t.palette.gold);
        card.text_at(x + indent, baseline, text, note);
        x += item_width + spacing;
    }
    if x > 0.0 {
        card.gap(leading);
    }
}

fn wine_selection_page(
    ctx: &GuideContext,
    t: &GuideTemplate,
    metrics: &dyn FontMetrics,
    subtitle: &str,
    categories: [WineCategory; 2],
    number: u32,
) -> PageCanvas {
    let mut page = new_page(t, metrics, t.palette.cream);
    let mut y = section_header(&mut page, t, "Our Selections for You", Some(subtitle));

    for category in categories {
        // a category the generator did not return leaves its slot empty
        if let Some(wine) = ctx.wines.get(category) {
            let bottom = wine_card(&mut page, t, wine, y);
            check_overflow("selections", bottom);
            y = bottom - pt(20.0);
        }
    }

    page_number(&mut page, t, number);
    page.finish()
}

pub fn selections_page(ctx: &GuideContext, t: &GuideTemplate, metrics: &dyn FontMetrics) -> PageCanvas {
    wine_selection_page(
        ctx,
        t,
        metrics,
        "Thoughtfully chosen to complement your celebration",
        [WineCategory::Sparkling, WineCategory::White],
        4,
    )
}

pub fn selections_continued_page(
    ctx: &GuideContext,
    t: &GuideTemplate,
    metrics: &dyn FontMetrics,
) -> PageCanvas {
    wine_selection_page(
        ctx,
        t,
        metrics,
        "Continued",
        [WineCategory::Red, WineCategory::Rose],
        5,
    )
}

// ============================================================================
// Page 6: Timeline
// ============================================================================

pub fn timeline_page(_ctx: &GuideContext, t: &GuideTemplate, metrics: &dyn FontMetrics) -> PageCanvas {
    let p = t.palette;
    let g = t.geometry;
    let mut page = new_page(t, metrics, p.cream);
    let mut y = section_header(&mut page, t, "Day-of Timeline", Some("A sommelier's guide to wine service"));

    let time_width = pt(90.0);
    let gap = pt(15.0);
    let desc_x = g.margin + time_width + gap;
    let desc_width = g.content_width() - time_width - gap;
    let padding = pt(15.0);

    let time = style(FontFace::SansBold, 10.0, p.burgundy);
    let title = style(FontFace::SansBold, 11.0, p.text_dark);
    let description = style(FontFace::Sans, 9.0, p.text_medium);

    for (i, step) in t.timeline.iter().enumerate() {
        let baseline = y - padding - pt(11.0) * ASCENT;
        page.text(g.margin, baseline, step.time, time);
        page.text(desc_x, baseline, step.title, title);

        let lines = page.wrap(step.description, description, desc_width);
        page.lines(desc_x, baseline - pt(4.0 + 11.0), &lines, description, pt(13.5));

        y -= padding + pt(11.0 + 4.0) + lines.len() as f32 * pt(13.5) + padding;
        if i + 1 < t.timeline.len() {
            page.line(g.margin, y, g.margin + g.content_width(), y, p.cream_dark, 0.75);
        }
    }

    page_number(&mut page, t, 6);
    page.finish()
}

// ============================================================================
// Page 7: Where to Buy & Alternatives
// ============================================================================

fn alternative_row(page: &mut PageBuilder, t: &GuideTemplate, wine: &WineSelection, top: f32) -> f32 {
    let p = t.palette;
    let g = t.geometry;
    let pad = pt(12.0);
    let gap = pt(10.0);
    let inner = g.content_width() - 2.0 * pad;

    let arrow = "->";
    let arrow_style = style(FontFace::Sans, 14.0, p.text_light);
    let arrow_width = page.measure(arrow, arrow_style);
    let column = (inner - arrow_width - 3.0 * gap) / 3.0;

    let mut original = Block::new();
    original.line(0.0, wine.category.label().to_uppercase(), style(FontFace::SansBold, 8.0, p.burgundy), pt(11.0));
    let bottle = style(FontFace::Sans, 10.0, p.text_dark);
    original.lines(0.0, page.wrap(&wine.bottle, bottle, column), bottle, pt(13.0));
    original.line(0.0, format!("~{}", format_money(wine.price)), style(FontFace::Sans, 9.0, p.text_light), pt(12.0));

    let option = style(FontFace::Sans, 9.0, p.text_dark);
    let option_price = style(FontFace::Sans, 8.0, p.text_light);
    let alternatives: Vec<Block> = wine
        .alternatives
        .iter()
        .take(2)
        .map(|alt| {
            let mut block = Block::new();
            block.lines(0.0, page.wrap(&alt.name, option, column), option, pt(12.0));
            block.line(0.0, format!("~{}", format_money(alt.price)), option_price, pt(11.0));
            block
        })
        .collect();

    let content_height = alternatives
        .iter()
        .map(Block::height)
        .fold(original.height().max(pt(14.0)), f32::max);
    let height = content_height + 2.0 * pad;
    page.fill_rect(g.margin, top - height, g.content_width(), height, p.white);

    let left = g.margin + pad;
    let content_top = top - pad;
    let centered = |block_height: f32| content_top - (content_height - block_height) / 2.0;

    let original_top = centered(original.height());
    original.draw(page, left, original_top);

    let arrow_x = left + column + gap;
    page.text(arrow_x, centered(pt(14.0)) - pt(14.0) * ASCENT, arrow, arrow_style);

    for (i, block) in alternatives.into_iter().enumerate() {
        let x = arrow_x + arrow_width + gap + i as f32 * (column + gap);
        let block_top = centered(block.height());
        block.draw(page, x, block_top);
    }

    top - height
}

pub fn where_to_buy_page(ctx: &GuideContext, t: &GuideTemplate, metrics: &dyn FontMetrics) -> PageCanvas {
    let p = t.palette;
    let g = t.geometry;
    let mut page = new_page(t, metrics, p.cream);
    let top = section_header(
        &mut page,
        t,
        "Where to Buy",
        Some("Plus alternatives if your first choice isn't available"),
    );
    let mut y = section_label(&mut page, t, top, "Online Retailers");

    let gap = pt(12.0);
    let column = (g.content_width() - gap) / 2.0;
    let card_pad = pt(12.0);
    let card_height = card_pad + pt(14.0 + 13.0 + 11.0) + card_pad;
    let name = style(FontFace::SansBold, 11.0, p.text_dark);
    let url = style(FontFace::Sans, 9.0, p.burgundy);
    let note = style(FontFace::Sans, 8.0, p.text_light);

    for (i, retailer) in t.retailers.iter().enumerate() {
        let x = g.margin + (i % 2) as f32 * (column + gap);
        let card_top = y - (i / 2) as f32 * (card_height + gap);
        page.fill_rect(x, card_top - card_height, column, card_height, p.white);

        let text_x = x + card_pad;
        let mut baseline = card_top - card_pad - pt(11.0) * ASCENT;
        page.text(text_x, baseline, retailer.name, name);
        baseline -= pt(14.0);
        page.text(text_x, baseline, retailer.url, url);
        baseline -= pt(13.0);
        page.text(text_x, baseline, retailer.note, note);
    }

    let rows = t.retailers.len().div_ceil(2) as f32;
    y -= rows * card_height + (rows - 1.0).max(0.0) * gap + pt(25.0);

    let heading = style(FontFace::SansBold, 12.0, p.burgundy);
    page.text(g.margin, y - pt(12.0) * ASCENT, "If You Can't Find Our First Choice", heading);
    y -= pt(12.0 + 12.0);

    for wine in ctx.wines.iter() {
        let bottom = alternative_row(&mut page, t, wine, y);
        check_overflow("where-to-buy", bottom);
        y = bottom - pt(10.0);
    }

    page_number(&mut page, t, 7);
    page.finish()
}

// ============================================================================
// Page 8: Quantities & Budget
// ============================================================================

fn draw_check(page: &mut PageBuilder, x: f32, baseline: f32, color: Rgb) {
    let size = pt(7.0);
    let mid_x = x + size * 0.35;
    page.line(x, baseline + size * 0.45, mid_x, baseline, color, 1.2);
    page.line(mid_x, baseline, x + size, baseline + size, color, 1.2);
}

pub fn budget_page(ctx: &GuideContext, t: &GuideTemplate, metrics: &dyn FontMetrics) -> PageCanvas {
    let p = t.palette;
    let g = t.geometry;
    let q = ctx.quantities;
    let budget = ctx.budget;
    let mut page = new_page(t, metrics, p.cream);
    let top = section_header(
        &mut page,
        t,
        "Quantities & Budget",
        Some("Everything you need to bring this vision to life"),
    );
    let mut y = section_label(&mut page, t, top, "Recommended Quantities");

    // quantity boxes
    let gap = pt(10.0);
    let box_width = (g.content_width() - 4.0 * gap) / 5.0;
    let box_height = pt(15.0 + 8.0 + 5.0 + 24.0 + 15.0);
    let boxes = [
        (WineCategory::Sparkling.label(), q.sparkling, false),
        (WineCategory::White.label(), q.white, false),
        (WineCategory::Red.label(), q.red, false),
        (WineCategory::Rose.label(), q.rose, false),
        ("Total", q.total, true),
    ];
    for (i, (name, count, is_total)) in boxes.iter().enumerate() {
        let x = g.margin + i as f32 * (box_width + gap);
        let (background, label_color, value_color) = if *is_total {
            (p.burgundy, p.cream_dark, p.white)
        } else {
            (p.white, p.text_light, p.burgundy)
        };
        page.fill_rect(x, y - box_height, box_width, box_height, background);

        let cx = x + box_width / 2.0;
        let label_y = y - pt(15.0) - pt(8.0) * ASCENT;
        page.text_centered(cx, label_y, &name.to_uppercase(), style(FontFace::Sans, 8.0, label_color));
        page.text_centered(
            cx,
            label_y - pt(5.0 + 24.0),
            &count.to_string(),
            style(FontFace::SansBold, 24.0, value_color),
        );
    }
    y -= box_height + pt(30.0);

    // itemised budget on the left, tips on the right
    let col_gap = pt(30.0);
    let column = (g.content_width() - col_gap) / 2.0;
    let left_x = g.margin;
    let right_x = g.margin + column + col_gap;

    let table_top = section_label(&mut page, t, y, "Event Budget");
    let table_pad = pt(20.0);
    let row_height = pt(8.0 + 11.0 + 8.0);
    let total_height = pt(12.0 + 11.0 + 12.0);
    let row = style(FontFace::Sans, 10.0, p.text_dark);
    let bold = style(FontFace::SansBold, 10.0, p.text_dark);
    let tax = style(FontFace::SerifItalic, 9.0, p.text_medium);
    let total = style(FontFace::SansBold, 11.0, p.white);

    let mut rows: Vec<(String, String, TextStyle)> = WineCategory::ALL
        .iter()
        .map(|c| {
            (
                format!("{} ({} x {})", c.label(), q.of(*c), format_money(budget.unit_prices.of(*c))),
                format_money(budget.subtotals.of(*c)),
                row,
            )
        })
        .collect();
    rows.push(("Subtotal".to_string(), format_money(budget.subtotal), bold));
    rows.push((
        format!("Sales Tax (est. {}%)", (TAX_RATE * 100.0).round()),
        format_money(budget.tax),
        tax,
    ));

    let table_height = table_pad + rows.len() as f32 * row_height + pt(10.0) + total_height;
    page.fill_rect(left_x, table_top - table_height, column, table_height, p.white);

    let inner_left = left_x + table_pad;
    let inner_right = left_x + column - table_pad;
    let mut row_top = table_top - table_pad;
    for (i, (label, amount, s)) in rows.iter().enumerate() {
        let baseline = row_top - pt(8.0) - pt(11.0) * ASCENT;
        page.text(inner_left, baseline, label, *s);
        page.text_right(inner_right, baseline, amount, *s);
        row_top -= row_height;
        // rule above the subtotal and between item rows
        if i + 1 < rows.len() {
            page.line(inner_left, row_top, inner_right, row_top, p.cream_dark, 0.75);
        }
    }

    let total_top = table_top - table_height + total_height;
    page.fill_rect(left_x, table_top - table_height, column, total_height, p.burgundy);
    let total_baseline = total_top - pt(12.0) - pt(11.0) * ASCENT;
    page.text(inner_left, total_baseline, "Estimated Total", total);
    page.text_right(inner_right, total_baseline, &format_money(budget.total), total);
    let left_bottom = table_top - table_height;

    // pro tips
    let tips_heading = style(FontFace::SansBold, 12.0, p.burgundy);
    let tip = style(FontFace::Sans, 9.0, p.text_medium);
    let mut tip_y = y - pt(25.0);
    page.text(right_x, tip_y - pt(12.0) * ASCENT, "Pro Tips", tips_heading);
    tip_y -= pt(12.0 + 12.0);
    let indent = pt(15.0);
    for text in t.pro_tips {
        let lines = page.wrap(text, tip, column - indent);
        let baseline = tip_y - pt(9.0) * ASCENT;
        draw_check(&mut page, right_x, baseline, p.gold);
        page.lines(right_x + indent, baseline, &lines, tip, pt(13.0));
        tip_y -= lines.len() as f32 * pt(13.0) + pt(8.0);
    }

    // closing footer
    let cx = g.center_x();
    let footer_y = left_bottom.min(tip_y) - pt(40.0);
    page.line(g.margin, footer_y, g.margin + g.content_width(), footer_y, p.cream_dark, 0.75);
    let mut baseline = footer_y - pt(20.0) - pt(10.0) * ASCENT;
    page.text_centered(cx, baseline, t.brand.spaced_name, style(FontFace::Sans, 10.0, p.burgundy));
    baseline -= pt(14.0);
    page.text_centered(cx, baseline, t.brand.consultation, style(FontFace::Sans, 8.0, p.text_light));
    baseline -= pt(12.0);
    page.text_centered(cx, baseline, t.brand.contact, style(FontFace::Sans, 8.0, p.text_medium));
    check_overflow("budget", baseline);

    page_number(&mut page, t, 8);
    page.finish()
}
