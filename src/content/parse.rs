// Cleaning and decoding generator responses

use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::model::{WineCategory, WineList, WineSelection};

/// Trim the reply and drop a surrounding markdown code fence.
pub fn clean_response(text: &str) -> &str {
    let mut content = text.trim();
    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }
    content.trim()
}

/// Decode a JSON object from generator text. When the cleaned text is not
/// valid JSON, the span from the first `{` to the last `}` is tried.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    let content = clean_response(text);
    if let Ok(value) = serde_json::from_str(content) {
        return Ok(value);
    }

    let span = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => return Err(AppError::Parse("Failed to parse AI response".into())),
    };
    serde_json::from_str(span).map_err(|e| {
        tracing::error!(error = %e, "generator response is not valid JSON");
        AppError::Parse("Failed to parse AI response".into())
    })
}

/// Key the generated wines by category. With `require_all`, a response
/// missing any of the four categories is rejected.
pub fn into_wine_list(selections: Vec<WineSelection>, require_all: bool) -> Result<WineList, AppError> {
    let wines = WineList::from_selections(selections);
    let missing = wines.missing();
    if require_all && !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|c| WineCategory::label(*c)).collect();
        return Err(AppError::Parse(format!(
            "AI response is missing wine categories: {}",
            names.join(", ")
        )));
    }
    if !missing.is_empty() {
        tracing::warn!(?missing, "rendering guide with empty wine slots");
    }
    Ok(wines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DishPairing, GuideContent};
    use serde_json::json;

    #[test]
    fn test_clean_response_strips_fences() {
        assert_eq!(clean_response("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(clean_response("```\n{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(clean_response("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_json_extracts_object_from_prose() {
        let text = "Here is your pairing:\n{\"intro\": \"Rich and smoky.\", \"wines\": []}\nEnjoy!";
        let pairing: DishPairing = parse_json(text).unwrap();
        assert_eq!(pairing.intro, "Rich and smoky.");
        assert!(pairing.wines.is_empty());
        assert!(pairing.tip.is_none());
    }

    #[test]
    fn test_parse_json_failure() {
        let err = parse_json::<DishPairing>("I'm sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(err.to_string(), "Failed to parse AI response");

        let err = parse_json::<DishPairing>("} backwards {").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    fn content(categories: &[&str]) -> Vec<WineSelection> {
        let wines: Vec<_> = categories
            .iter()
            .map(|c| json!({"category": c, "name": format!("{} wine", c), "price": 20}))
            .collect();
        let content: GuideContent =
            serde_json::from_value(json!({"personalLetter": "Hi", "wines": wines})).unwrap();
        content.wines
    }

    #[test]
    fn test_wine_list_requires_all_categories() {
        let err = into_wine_list(content(&["Sparkling", "White", "Red"]), true).unwrap_err();
        assert_eq!(err.to_string(), "AI response is missing wine categories: Rosé");

        let list = into_wine_list(content(&["Sparkling", "White", "Red", "Rose"]), true).unwrap();
        assert!(list.missing().is_empty());
    }

    #[test]
    fn test_unknown_category_entry_is_dropped() {
        let reply = json!({
            "personalLetter": "Hi",
            "wines": [
                {"category": "Sparkling", "name": "Cava", "price": 15},
                {"category": "White", "name": "Vermentino", "price": 18},
                {"category": "Dessert", "name": "Sauternes", "price": 40},
                {"category": "Red", "name": "Grenache", "price": 22},
                {"category": "Rosé", "name": "Tavel", "price": 17}
            ]
        })
        .to_string();
        let content: GuideContent = parse_json(&reply).unwrap();
        assert_eq!(content.wines.len(), 4);

        let list = into_wine_list(content.wines, true).unwrap();
        assert!(list.missing().is_empty());
        assert!(list.iter().all(|w| w.name != "Sauternes"));
    }

    #[test]
    fn test_wine_list_lenient_mode_keeps_partial_list() {
        let list = into_wine_list(content(&["Red"]), false).unwrap();
        assert_eq!(list.iter().count(), 1);
        assert_eq!(list.get(WineCategory::Red).unwrap().name, "Red wine");
    }
}
