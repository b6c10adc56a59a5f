// Page Composer: builds the guide's eight pages as display lists

pub mod canvas;
pub mod metrics;
pub mod pages;
pub mod template;

pub use canvas::{DrawOp, PageBuilder, PageCanvas, Rgb, TextStyle};
pub use metrics::{FontFace, FontMetrics, StandardMetrics};
pub use template::GuideTemplate;

use crate::model::{BudgetSummary, EventRequest, QuantitySet, WineList};

/// Everything a page builder may read about one request.
#[derive(Debug, Clone, Copy)]
pub struct GuideContext<'a> {
    pub event: &'a EventRequest,
    pub letter: &'a str,
    pub wines: &'a WineList,
    pub quantities: QuantitySet,
    pub budget: BudgetSummary,
}

pub type PageFn = fn(&GuideContext<'_>, &GuideTemplate, &dyn FontMetrics) -> PageCanvas;

/// Page builders in document order.
pub const GUIDE_PAGES: [PageFn; 8] = [
    pages::cover_page,
    pages::contents_page,
    pages::vision_page,
    pages::selections_page,
    pages::selections_continued_page,
    pages::timeline_page,
    pages::where_to_buy_page,
    pages::budget_page,
];

pub fn compose_guide(
    ctx: &GuideContext<'_>,
    template: &GuideTemplate,
    metrics: &dyn FontMetrics,
) -> Vec<PageCanvas> {
    GUIDE_PAGES
        .iter()
        .map(|build| build(ctx, template, metrics))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::compute_budget;
    use crate::model::{WineCategory, WineSelection};
    use crate::quantities::compute_quantities;
    use serde_json::json;

    fn wine(category: &str, name: &str, price: f64) -> WineSelection {
        serde_json::from_value(json!({
            "category": category,
            "name": name,
            "region": "Somewhere, France",
            "bottle": format!("{} Bottle", name),
            "price": price,
            "narrative": "A bright and generous wine that suits a long summer evening.",
            "whyPerfect": "It lifts the room without overwhelming the food.",
            "tastingNotes": ["Green apple", "Brioche", "Citrus"],
            "alternatives": [{"name": "Backup One", "price": 18}, {"name": "Backup Two", "price": 21}]
        }))
        .unwrap()
    }

    fn event() -> EventRequest {
        serde_json::from_value(json!({
            "names": "Ana & Leo",
            "date": "2025-06-14",
            "venue": "Hillside Barn",
            "guests": 120,
            "hours": 6,
            "barType": "wine-focus",
            "includeRose": true
        }))
        .unwrap()
    }

    fn compose(wines: &WineList) -> Vec<PageCanvas> {
        let event = event();
        let quantities = compute_quantities(&event);
        let budget = compute_budget(&quantities, wines);
        let ctx = GuideContext {
            event: &event,
            letter: "First paragraph about your day.\n\nSecond paragraph with more detail.",
            wines,
            quantities,
            budget,
        };
        compose_guide(&ctx, &GuideTemplate::default(), &StandardMetrics)
    }

    fn full_list() -> WineList {
        WineList::from_selections(vec![
            wine("Sparkling", "Crémant de Loire", 19.0),
            wine("White", "Sancerre", 28.0),
            wine("Red", "Morgon", 24.0),
            wine("Rosé", "Tavel", 20.0),
        ])
    }

    #[test]
    fn test_eight_pages_in_order() {
        let pages = compose(&full_list());
        assert_eq!(pages.len(), 8);
        assert!(pages[0].contains_text("Prepared exclusively for Ana & Leo"));
        assert!(pages[0].contains_text("June 14, 2025"));
        assert!(pages[1].contains_text("What's Inside"));
        assert!(pages[2].contains_text("Ana & Leo -"));
        assert!(pages[2].contains_text("Second paragraph"));
        assert!(pages[2].contains_text("120 Guests"));
        assert!(pages[2].contains_text("Wine-Focused"));
        assert!(pages[3].contains_text("Crémant de Loire"));
        assert!(pages[3].contains_text("Sancerre"));
        assert!(pages[4].contains_text("Morgon"));
        assert!(pages[4].contains_text("Tavel"));
        assert!(pages[5].contains_text("Day-of Timeline"));
        assert!(pages[6].contains_text("Backup Two"));
        assert!(pages[7].contains_text("Estimated Total"));
    }

    #[test]
    fn test_page_numbers() {
        let pages = compose(&full_list());
        for (i, page) in pages.iter().enumerate().skip(1) {
            let number = (i + 1).to_string();
            assert!(page.texts().any(|t| t == number), "page {} missing its number", i + 1);
        }
    }

    #[test]
    fn test_missing_category_leaves_slot_empty() {
        let wines = WineList::from_selections(vec![
            wine("Sparkling", "Crémant de Loire", 19.0),
            wine("Red", "Morgon", 24.0),
        ]);
        let pages = compose(&wines);
        assert_eq!(pages.len(), 8);
        assert!(pages[3].contains_text("Crémant de Loire"));
        assert!(!pages[3].contains_text("WHITE"));
        assert!(!pages[4].contains_text("ROSÉ"));
        assert!(wines.get(WineCategory::White).is_none());
    }

    #[test]
    fn test_budget_rows_show_quantities_and_prices() {
        let pages = compose(&full_list());
        let event = event();
        let q = compute_quantities(&event);
        let row = format!("Red ({} x $24)", q.red);
        assert!(pages[7].contains_text(&row));
        assert!(pages[7].contains_text("Sales Tax (est. 10%)"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        assert_eq!(compose(&full_list()), compose(&full_list()));
    }

    #[test]
    fn test_everything_stays_on_the_page() {
        for page in compose(&full_list()) {
            for op in &page.ops {
                if let DrawOp::Text { x, y, .. } = op {
                    assert!(*x >= 0.0 && *x <= page.width, "x out of bounds: {}", x);
                    assert!(*y >= 0.0 && *y <= page.height, "y out of bounds: {}", y);
                }
            }
        }
    }
}
