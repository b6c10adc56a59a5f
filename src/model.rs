// Request and content data structures

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_GUESTS: u32 = 100;
pub const DEFAULT_HOURS: f64 = 5.0;

// ============================================================================
// Event Request
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarType {
    WineFocus,
    WineBeer,
    #[default]
    Mixed,
    ToastOnly,
}

impl BarType {
    pub fn label(self) -> &'static str {
        match self {
            BarType::WineFocus => "Wine-Focused",
            BarType::WineBeer => "Wine & Beer",
            BarType::Mixed => "Mixed Bar",
            BarType::ToastOnly => "Toast Only",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BarType::WineFocus => "wine-focus",
            BarType::WineBeer => "wine-beer",
            BarType::Mixed => "mixed",
            BarType::ToastOnly => "toast-only",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkingLevel {
    Light,
    #[default]
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedWhiteBalance {
    #[default]
    Balanced,
    MoreRed,
    MoreWhite,
    HeavyRed,
    HeavyWhite,
}

/// How sparkling wine is served. Unknown values fall into `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SparklingUsage {
    #[default]
    ToastOnly,
    ToastAndBar,
    #[serde(other)]
    Other,
}

/// Client-submitted event parameters.
///
/// Numeric and enum fields are parsed leniently: numbers may arrive as
/// strings, and anything unparseable is treated as absent so the
/// documented defaults apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[serde(default)]
    pub names: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub venue_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub guests: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::choice")]
    pub bar_type: Option<BarType>,
    #[serde(default, deserialize_with = "lenient::choice")]
    pub drinking_level: Option<DrinkingLevel>,
    #[serde(default, deserialize_with = "lenient::choice")]
    pub red_white_balance: Option<RedWhiteBalance>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub include_rose: bool,
    #[serde(default, deserialize_with = "lenient::choice")]
    pub sparkling_usage: Option<SparklingUsage>,
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EventRequest {
    pub fn names(&self) -> &str {
        self.names.as_deref().unwrap_or("")
    }

    pub fn guest_count(&self) -> u32 {
        self.guests.unwrap_or(DEFAULT_GUESTS)
    }

    /// Reception length; zero or negative durations use the default.
    pub fn reception_hours(&self) -> f64 {
        match self.hours {
            Some(h) if h > 0.0 => h,
            _ => DEFAULT_HOURS,
        }
    }

    pub fn bar(&self) -> BarType {
        self.bar_type.unwrap_or_default()
    }

    pub fn drinking(&self) -> DrinkingLevel {
        self.drinking_level.unwrap_or_default()
    }

    pub fn balance(&self) -> RedWhiteBalance {
        self.red_white_balance.unwrap_or_default()
    }

    pub fn sparkling(&self) -> SparklingUsage {
        self.sparkling_usage.unwrap_or_default()
    }
}

/// Replace every character outside `[a-zA-Z0-9]` with an underscore.
pub fn sanitize_names(names: &str) -> String {
    names
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn guide_filename(names: &str) -> String {
    format!("{}_Wine_Guide.pdf", sanitize_names(names))
}

// ============================================================================
// Wine Content
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WineCategory {
    Sparkling,
    White,
    Red,
    #[serde(rename = "Rosé", alias = "Rose", alias = "rosé", alias = "rose")]
    Rose,
}

impl WineCategory {
    pub const ALL: [WineCategory; 4] = [
        WineCategory::Sparkling,
        WineCategory::White,
        WineCategory::Red,
        WineCategory::Rose,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WineCategory::Sparkling => "Sparkling",
            WineCategory::White => "White",
            WineCategory::Red => "Red",
            WineCategory::Rose => "Rosé",
        }
    }
}

impl fmt::Display for WineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: f64,
}

/// One recommended wine as produced by the content generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineSelection {
    pub category: WineCategory,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub bottle: String,
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: f64,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub why_perfect: String,
    #[serde(default)]
    pub tasting_notes: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

/// Raw generator output for the wedding guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideContent {
    #[serde(default)]
    pub personal_letter: String,
    #[serde(default, deserialize_with = "lenient::wines")]
    pub wines: Vec<WineSelection>,
}

/// Wines keyed by category. The first selection seen for a category wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WineList {
    sparkling: Option<WineSelection>,
    white: Option<WineSelection>,
    red: Option<WineSelection>,
    rose: Option<WineSelection>,
}

impl WineList {
    pub fn from_selections(wines: impl IntoIterator<Item = WineSelection>) -> Self {
        let mut list = WineList::default();
        for wine in wines {
            let slot = list.slot_mut(wine.category);
            if slot.is_none() {
                *slot = Some(wine);
            }
        }
        list
    }

    fn slot_mut(&mut self, category: WineCategory) -> &mut Option<WineSelection> {
        match category {
            WineCategory::Sparkling => &mut self.sparkling,
            WineCategory::White => &mut self.white,
            WineCategory::Red => &mut self.red,
            WineCategory::Rose => &mut self.rose,
        }
    }

    pub fn get(&self, category: WineCategory) -> Option<&WineSelection> {
        match category {
            WineCategory::Sparkling => self.sparkling.as_ref(),
            WineCategory::White => self.white.as_ref(),
            WineCategory::Red => self.red.as_ref(),
            WineCategory::Rose => self.rose.as_ref(),
        }
    }

    pub fn price_of(&self, category: WineCategory) -> f64 {
        self.get(category).map(|w| w.price).unwrap_or(0.0)
    }

    pub fn missing(&self) -> Vec<WineCategory> {
        WineCategory::ALL
            .into_iter()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }

    /// Present wines in category order.
    pub fn iter(&self) -> impl Iterator<Item = &WineSelection> {
        WineCategory::ALL.into_iter().filter_map(move |c| self.get(c))
    }
}

// ============================================================================
// Quantities & Budget
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitySet {
    pub sparkling: u32,
    pub white: u32,
    pub red: u32,
    pub rose: u32,
    pub total: u32,
}

impl QuantitySet {
    pub fn of(&self, category: WineCategory) -> u32 {
        match category {
            WineCategory::Sparkling => self.sparkling,
            WineCategory::White => self.white,
            WineCategory::Red => self.red,
            WineCategory::Rose => self.rose,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmounts {
    pub sparkling: f64,
    pub white: f64,
    pub red: f64,
    pub rose: f64,
}

impl CategoryAmounts {
    pub fn of(&self, category: WineCategory) -> f64 {
        match category {
            WineCategory::Sparkling => self.sparkling,
            WineCategory::White => self.white,
            WineCategory::Red => self.red,
            WineCategory::Rose => self.rose,
        }
    }

    pub fn set(&mut self, category: WineCategory, value: f64) {
        match category {
            WineCategory::Sparkling => self.sparkling = value,
            WineCategory::White => self.white = value,
            WineCategory::Red => self.red = value,
            WineCategory::Rose => self.rose = value,
        }
    }

    pub fn sum(&self) -> f64 {
        self.sparkling + self.white + self.red + self.rose
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub unit_prices: CategoryAmounts,
    pub subtotals: CategoryAmounts,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

// ============================================================================
// Dish Pairing
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishPairingRequest {
    #[serde(default)]
    pub dish: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedWine {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub region: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub bottle: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub why: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishPairing {
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub wines: Vec<PairedWine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

// ============================================================================
// Lenient Field Parsing
// ============================================================================

mod lenient {
    use super::WineSelection;
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn as_number(value: &Value) -> Option<f64> {
        let n = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        n.is_finite().then_some(n)
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(as_number(&value))
    }

    /// Whole, non-negative count; fractional input is truncated.
    pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(as_number(&value)
            .filter(|n| *n >= 0.0 && *n <= u32::MAX as f64)
            .map(|n| n.trunc() as u32))
    }

    pub fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let parsed = match &value {
            Value::String(s) => s.trim().trim_start_matches(['~', '$']).parse::<f64>().ok(),
            other => as_number(other),
        };
        Ok(parsed.filter(|n| n.is_finite()).unwrap_or(0.0))
    }

    pub fn choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Bool(b) => b,
            Value::String(s) => !s.is_empty() && s != "false",
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            _ => false,
        })
    }

    /// Entries that do not decode as a wine, such as an unknown category,
    /// are dropped.
    pub fn wines<'de, D>(deserializer: D) -> Result<Vec<WineSelection>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        Ok(values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<WineSelection>(value) {
                Ok(wine) => Some(wine),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unrecognised wine entry");
                    None
                }
            })
            .collect())
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_names() {
        assert_eq!(sanitize_names("O'Brien & Smith"), "O_Brien___Smith");
        assert_eq!(guide_filename("Ana & Leo"), "Ana___Leo_Wine_Guide.pdf");
    }

    #[test]
    fn test_event_request_lenient_fields() {
        let event: EventRequest = serde_json::from_value(json!({
            "names": "Ana & Leo",
            "guests": "120",
            "hours": "six",
            "barType": "open-bar",
            "drinkingLevel": "heavy",
            "includeRose": true,
            "sparklingUsage": "welcome-drinks"
        }))
        .unwrap();

        assert_eq!(event.guest_count(), 120);
        assert_eq!(event.reception_hours(), DEFAULT_HOURS);
        assert_eq!(event.bar(), BarType::Mixed);
        assert_eq!(event.drinking(), DrinkingLevel::Heavy);
        assert!(event.include_rose);
        assert_eq!(event.sparkling(), SparklingUsage::Other);
    }

    #[test]
    fn test_event_request_defaults() {
        let event: EventRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(event.guest_count(), 100);
        assert_eq!(event.reception_hours(), 5.0);
        assert_eq!(event.balance(), RedWhiteBalance::Balanced);
        assert_eq!(event.sparkling(), SparklingUsage::ToastOnly);
        assert!(!event.include_rose);
    }

    #[test]
    fn test_zero_guests_is_kept() {
        let event: EventRequest = serde_json::from_value(json!({"guests": 0})).unwrap();
        assert_eq!(event.guest_count(), 0);
    }

    #[test]
    fn test_rose_category_accepts_both_spellings() {
        let accented: WineCategory = serde_json::from_value(json!("Rosé")).unwrap();
        let plain: WineCategory = serde_json::from_value(json!("Rose")).unwrap();
        assert_eq!(accented, WineCategory::Rose);
        assert_eq!(plain, WineCategory::Rose);
    }

    #[test]
    fn test_wine_price_from_string() {
        let wine: WineSelection = serde_json::from_value(json!({
            "category": "Red",
            "price": "~$24"
        }))
        .unwrap();
        assert_eq!(wine.price, 24.0);
        assert!(wine.tasting_notes.is_empty());
    }

    #[test]
    fn test_wine_list_first_selection_wins() {
        let first: WineSelection =
            serde_json::from_value(json!({"category": "White", "name": "Albariño"})).unwrap();
        let second: WineSelection =
            serde_json::from_value(json!({"category": "White", "name": "Chablis"})).unwrap();

        let list = WineList::from_selections(vec![first, second]);
        assert_eq!(list.get(WineCategory::White).unwrap().name, "Albariño");
        assert_eq!(
            list.missing(),
            vec![WineCategory::Sparkling, WineCategory::Red, WineCategory::Rose]
        );
        assert_eq!(list.price_of(WineCategory::Red), 0.0);
    }

    #[test]
    fn test_dish_pairing_tip_is_optional() {
        let pairing: DishPairing = serde_json::from_value(json!({
            "intro": "Spicy and rich.",
            "wines": [{"name": "Riesling", "type": "White", "region": "Mosel, Germany",
                       "bottle": "Dr. Loosen", "price": 14, "why": "Sweetness tames heat."}]
        }))
        .unwrap();
        assert_eq!(pairing.wines[0].price, "14");
        let out = serde_json::to_value(&pairing).unwrap();
        assert!(out.get("tip").is_none());
    }
}
