// Budget estimate from quantities and per-bottle prices

use crate::model::{BudgetSummary, CategoryAmounts, QuantitySet, WineCategory, WineList};

/// Estimated sales tax
pub const TAX_RATE: f64 = 0.10;

/// Multiply quantities by bottle prices and add estimated tax.
///
/// A category with no selected wine is priced at zero. Tax is rounded to
/// the whole currency unit, halves rounding up.
pub fn compute_budget(quantities: &QuantitySet, wines: &WineList) -> BudgetSummary {
    let mut unit_prices = CategoryAmounts::default();
    let mut subtotals = CategoryAmounts::default();

    for category in WineCategory::ALL {
        let price = wines.price_of(category);
        unit_prices.set(category, price);
        subtotals.set(category, quantities.of(category) as f64 * price);
    }

    let subtotal = subtotals.sum();
    let tax = round_half_up(subtotal * TAX_RATE);

    BudgetSummary {
        unit_prices,
        subtotals,
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Whole amounts print without decimals, anything else with cents.
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round();
    if cents % 100.0 == 0.0 {
        format!("${}", (cents / 100.0) as i64)
    } else {
        format!("${:.2}", cents / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WineSelection;
    use serde_json::json;

    fn wines(prices: &[(&str, f64)]) -> WineList {
        WineList::from_selections(prices.iter().map(|(category, price)| {
            serde_json::from_value::<WineSelection>(json!({
                "category": category,
                "price": price,
            }))
            .unwrap()
        }))
    }

    fn ones() -> QuantitySet {
        QuantitySet { sparkling: 1, white: 1, red: 1, rose: 1, total: 4 }
    }

    #[test]
    fn test_integer_clean_budget() {
        let list = wines(&[("Sparkling", 10.0), ("White", 10.0), ("Red", 10.0), ("Rosé", 10.0)]);
        let budget = compute_budget(&ones(), &list);
        assert_eq!(budget.subtotal, 40.0);
        assert_eq!(budget.tax, 4.0);
        assert_eq!(budget.total, 44.0);
    }

    #[test]
    fn test_scaling_prices_scales_totals() {
        let base = compute_budget(&ones(), &wines(&[("Sparkling", 10.0), ("White", 10.0), ("Red", 10.0), ("Rosé", 10.0)]));
        let scaled = compute_budget(&ones(), &wines(&[("Sparkling", 30.0), ("White", 30.0), ("Red", 30.0), ("Rosé", 30.0)]));
        assert_eq!(scaled.subtotal, base.subtotal * 3.0);
        assert_eq!(scaled.tax, base.tax * 3.0);
        assert_eq!(scaled.total, base.total * 3.0);
    }

    #[test]
    fn test_missing_category_costs_nothing() {
        let q = QuantitySet { sparkling: 13, white: 10, red: 10, rose: 4, total: 37 };
        let budget = compute_budget(&q, &wines(&[("Sparkling", 20.0), ("Red", 15.0)]));
        assert_eq!(budget.subtotals.white, 0.0);
        assert_eq!(budget.subtotals.rose, 0.0);
        assert_eq!(budget.subtotal, 13.0 * 20.0 + 10.0 * 15.0);
        assert_eq!(budget.tax, 41.0);
        assert_eq!(budget.unit_prices.sparkling, 20.0);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        let q = QuantitySet { sparkling: 0, white: 1, red: 0, rose: 0, total: 1 };
        // 25 * 0.10 = 2.5 -> 3
        let budget = compute_budget(&q, &wines(&[("White", 25.0)]));
        assert_eq!(budget.tax, 3.0);
        assert_eq!(budget.total, 28.0);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(44.0), "$44");
        assert_eq!(format_money(18.5), "$18.50");
        assert_eq!(format_money(0.0), "$0");
    }
}
