// Guide assembly: generated content plus computed figures into pages

use crate::budget::compute_budget;
use crate::content::parse::into_wine_list;
use crate::error::AppError;
use crate::layout::{compose_guide, GuideContext, GuideTemplate, PageCanvas, StandardMetrics};
use crate::model::{guide_filename, BudgetSummary, EventRequest, GuideContent, QuantitySet};
use crate::quantities::compute_quantities;
use crate::render::Renderer;

/// A composed guide ready for rendering.
#[derive(Debug, Clone)]
pub struct Guide {
    pub title: String,
    pub filename: String,
    pub pages: Vec<PageCanvas>,
    pub quantities: QuantitySet,
    pub budget: BudgetSummary,
}

impl Guide {
    pub fn render(&self, renderer: &dyn Renderer) -> Result<Vec<u8>, AppError> {
        renderer.render(&self.title, &self.pages)
    }
}

/// The couple's names are the only field the guide cannot do without.
pub fn validate_event(event: &EventRequest) -> Result<(), AppError> {
    if event.names().trim().is_empty() {
        return Err(AppError::Validation("Names are required".into()));
    }
    Ok(())
}

/// Drop a trailing sign-off; the vision page prints its own. A sign-off is
/// the signer's name and/or a short closing line ending in a comma.
pub fn letter_body<'a>(letter: &'a str, signer: &str) -> &'a str {
    let mut body = letter.trim_end();
    if let Some(rest) = body.strip_suffix(signer) {
        if rest.is_empty() || rest.ends_with('\n') {
            body = rest.trim_end();
        }
    }

    let (rest, last_line) = match body.rfind('\n') {
        Some(i) => (&body[..i], &body[i + 1..]),
        None => ("", body),
    };
    let last_line = last_line.trim();
    if last_line.ends_with(',') && last_line.split_whitespace().count() <= MAX_CLOSING_WORDS {
        body = rest.trim_end();
    }
    body
}

/// "With warmest regards," is as long as a closing gets.
const MAX_CLOSING_WORDS: usize = 3;

pub fn assemble_guide(
    event: &EventRequest,
    content: GuideContent,
    template: &GuideTemplate,
    require_all_categories: bool,
) -> Result<Guide, AppError> {
    validate_event(event)?;
    let wines = into_wine_list(content.wines, require_all_categories)?;
    let quantities = compute_quantities(event);
    let budget = compute_budget(&quantities, &wines);

    let ctx = GuideContext {
        event,
        letter: letter_body(&content.personal_letter, template.brand.sommelier),
        wines: &wines,
        quantities,
        budget,
    };
    let pages = compose_guide(&ctx, template, &StandardMetrics);

    Ok(Guide {
        title: format!("{} Wine Guide", event.names()),
        filename: guide_filename(event.names()),
        pages,
        quantities,
        budget,
    })
}
