// Fixed look and copy of the guide: palette, geometry, brand and
// the educational sections that do not depend on the event

use super::canvas::Rgb;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub burgundy: Rgb,
    pub gold: Rgb,
    pub cream: Rgb,
    pub cream_dark: Rgb,
    pub text_dark: Rgb,
    pub text_medium: Rgb,
    pub text_light: Rgb,
    pub white: Rgb,
    pub highlight: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            burgundy: Rgb::hex(0x722F37),
            gold: Rgb::hex(0xC9A962),
            cream: Rgb::hex(0xFAF8F5),
            cream_dark: Rgb::hex(0xEDE8E0),
            text_dark: Rgb::hex(0x2D2D2D),
            text_medium: Rgb::hex(0x5A5A5A),
            text_light: Rgb::hex(0x8A8A8A),
            white: Rgb::hex(0xFFFFFF),
            highlight: Rgb::hex(0xFFFBF5),
        }
    }
}

/// US Letter, in millimetres
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            width: 215.9,
            height: 279.4,
            margin: 15.24,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Brand {
    pub name: &'static str,
    pub tagline: &'static str,
    pub spaced_name: &'static str,
    pub consultation: &'static str,
    pub contact: &'static str,
    pub sommelier: &'static str,
}

impl Default for Brand {
    fn default() -> Self {
        Brand {
            name: "CellarSense.ai",
            tagline: "Designed by a WSET-Certified Sommelier",
            spaced_name: "C E L L A R S E N S E",
            consultation: "WSET-Certified Sommelier Consultation",
            contact: "Questions? hello@cellarsense.ai",
            sommelier: "Anthony",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TocEntry {
    pub title: &'static str,
    pub pages: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineStep {
    pub time: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retailer {
    pub name: &'static str,
    pub url: &'static str,
    pub note: &'static str,
}

pub const TABLE_OF_CONTENTS: [TocEntry; 5] = [
    TocEntry { title: "Your Wine Vision", pages: "3" },
    TocEntry { title: "Our Selections for You", pages: "4-5" },
    TocEntry { title: "Day-of Timeline", pages: "6" },
    TocEntry { title: "Where to Buy & Alternatives", pages: "7" },
    TocEntry { title: "Quantities & Budget", pages: "8" },
];

pub const TOC_INTRO: &str = "This guide was created specifically for your celebration, \
    taking into account your venue, guest count, personal preferences, and vision for the day.";

pub const TIMELINE: [TimelineStep; 6] = [
    TimelineStep {
        time: "3-4 hours before",
        title: "Chill the whites and rosé",
        description: "Place white wine and rosé in refrigeration. Aim for 45-50°F.",
    },
    TimelineStep {
        time: "2-3 hours before",
        title: "Chill the sparkling wine",
        description: "Champagne should be well-chilled to 40-45°F.",
    },
    TimelineStep {
        time: "1 hour before",
        title: "Set out the red wine",
        description: "Red wine should be served at \"cellar temperature\" (60-65°F).",
    },
    TimelineStep {
        time: "30 min before",
        title: "Open red wines to breathe",
        description: "Open 2-3 bottles of red wine to let them breathe.",
    },
    TimelineStep {
        time: "Toast time",
        title: "Pour sparkling for the toast",
        description: "Fill flutes two-thirds full. Pour slowly down the side.",
    },
    TimelineStep {
        time: "During dinner",
        title: "Keep wines at temperature",
        description: "Rotate white and rosé between ice buckets and service.",
    },
];

pub const RETAILERS: [Retailer; 4] = [
    Retailer {
        name: "Wine.com",
        url: "wine.com",
        note: "Wide selection, reliable shipping.",
    },
    Retailer {
        name: "Total Wine & More",
        url: "totalwine.com",
        note: "Great prices, in-store pickup.",
    },
    Retailer {
        name: "Vivino",
        url: "vivino.com",
        note: "Compare prices across retailers.",
    },
    Retailer {
        name: "K&L Wine Merchants",
        url: "klwines.com",
        note: "Excellent for premium wines.",
    },
];

pub const PRO_TIPS: [&str; 4] = [
    "Order 10-15% extra. Most retailers accept returns on unopened bottles.",
    "Ask about case discounts when ordering 12+ bottles.",
    "Plan for one bottle opener per 50 guests.",
    "Order wines 2-3 weeks ahead to ensure availability.",
];

/// Everything about the guide's appearance that is not derived from the
/// request. Shared read-only across requests.
#[derive(Debug, Clone)]
pub struct GuideTemplate {
    pub palette: Palette,
    pub geometry: PageGeometry,
    pub brand: Brand,
    pub contents: &'static [TocEntry],
    pub contents_intro: &'static str,
    pub timeline: &'static [TimelineStep],
    pub retailers: &'static [Retailer],
    pub pro_tips: &'static [&'static str],
}

impl Default for GuideTemplate {
    fn default() -> Self {
        GuideTemplate {
            palette: Palette::default(),
            geometry: PageGeometry::default(),
            brand: Brand::default(),
            contents: &TABLE_OF_CONTENTS,
            contents_intro: TOC_INTRO,
            timeline: &TIMELINE,
            retailers: &RETAILERS,
            pro_tips: &PRO_TIPS,
        }
    }
}
