// Bottle quantity planning

use crate::model::{BarType, DrinkingLevel, EventRequest, QuantitySet, RedWhiteBalance, SparklingUsage};

/// Share of still wine diverted to rosé when requested
const ROSE_SHARE: f64 = 0.20;

/// Guests served per bottle for the toast
const TOAST_GUESTS_PER_BOTTLE: f64 = 8.0;

/// Guests served per bottle when sparkling is only a side pour
const SIDE_POUR_GUESTS_PER_BOTTLE: f64 = 15.0;

/// Share of guests drinking sparkling at the bar, and glasses per bottle
const BAR_SPARKLING_SHARE: f64 = 0.15;
const GLASSES_PER_BOTTLE: f64 = 5.0;

fn bottles_per_guest(bar: BarType) -> f64 {
    match bar {
        BarType::WineFocus => 0.50,
        BarType::WineBeer => 0.30,
        BarType::Mixed => 0.20,
        BarType::ToastOnly => 0.05,
    }
}

fn drinking_multiplier(level: DrinkingLevel) -> f64 {
    match level {
        DrinkingLevel::Light => 0.75,
        DrinkingLevel::Moderate => 1.0,
        DrinkingLevel::Heavy => 1.25,
    }
}

/// Step function over reception length; no interpolation between steps.
fn hours_multiplier(hours: f64) -> f64 {
    if hours <= 3.0 {
        0.75
    } else if hours <= 5.0 {
        1.0
    } else {
        1.15
    }
}

/// (red, white) shares of the still-wine pool
fn red_white_split(balance: RedWhiteBalance) -> (f64, f64) {
    match balance {
        RedWhiteBalance::Balanced => (0.50, 0.50),
        RedWhiteBalance::MoreRed => (0.60, 0.40),
        RedWhiteBalance::MoreWhite => (0.40, 0.60),
        RedWhiteBalance::HeavyRed => (0.75, 0.25),
        RedWhiteBalance::HeavyWhite => (0.25, 0.75),
    }
}

fn sparkling_bottles(guests: f64, usage: SparklingUsage) -> u32 {
    let toast = (guests / TOAST_GUESTS_PER_BOTTLE).ceil();
    let bottles = match usage {
        SparklingUsage::ToastOnly => toast,
        SparklingUsage::ToastAndBar => {
            toast + (guests * BAR_SPARKLING_SHARE / GLASSES_PER_BOTTLE).ceil()
        }
        SparklingUsage::Other => (guests / SIDE_POUR_GUESTS_PER_BOTTLE).ceil(),
    };
    bottles as u32
}

/// Compute bottle counts per category for an event.
///
/// Red and white shares are rounded up independently, so their sum may
/// exceed the still-wine pool by one bottle.
pub fn compute_quantities(event: &EventRequest) -> QuantitySet {
    let guests = event.guest_count() as f64;
    let hours = event.reception_hours();

    let mut still = (guests
        * bottles_per_guest(event.bar())
        * drinking_multiplier(event.drinking())
        * hours_multiplier(hours))
    .ceil() as u32;

    let sparkling = sparkling_bottles(guests, event.sparkling());

    let rose = if event.include_rose {
        let rose = (still as f64 * ROSE_SHARE).ceil() as u32;
        still -= rose;
        rose
    } else {
        0
    };

    let (red_pct, white_pct) = red_white_split(event.balance());
    let white = (still as f64 * white_pct).ceil() as u32;
    let red = (still as f64 * red_pct).ceil() as u32;

    QuantitySet {
        sparkling,
        white,
        red,
        rose,
        total: sparkling + white + red + rose,
    }
}
