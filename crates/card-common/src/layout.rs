//! Typed layout model for a stat card.
//!
//! A `LayoutConfig` is fully resolved: every field has a value, either taken
//! from the request or from the [`defaults`] table.

use serde::Serialize;
use std::fmt;

/// Number of label/value rows on every card.
pub const ROW_COUNT: usize = 4;

/// Default values for every layout field.
pub mod defaults {
    /// Canvas size used when the background reports a zero dimension.
    pub const CANVAS_WIDTH: f64 = 1530.0;
    pub const CANVAS_HEIGHT: f64 = 383.0;

    pub const LABEL_X: f64 = 300.0;
    pub const VALUE_X: f64 = 520.0;
    pub const BAR_Y: f64 = 90.0;
    pub const BAR_HEIGHT: f64 = 48.0;
    pub const BAR_GAP: f64 = 14.0;
    pub const LABEL_WIDTH: f64 = 190.0;
    pub const VALUE_WIDTH: f64 = 650.0;
    pub const RADIUS: f64 = 24.0;

    pub const LABEL_BG: &str = "#2b3360";
    pub const VALUE_BG: &str = "#000000";
    pub const LABEL_COLOR: &str = "#ffffff";
    pub const VALUE_COLOR: &str = "#ffffff";

    pub const FONT_FAMILY: &str = "Open Sans";
    pub const GENERIC_FAMILY: &str = "sans-serif";
    pub const LABEL_SIZE: f64 = 24.0;
    pub const VALUE_SIZE: f64 = 24.0;
    pub const LABEL_WEIGHT: f64 = 700.0;
    pub const VALUE_WEIGHT: f64 = 600.0;

    pub const LABELS: [&str; super::ROW_COUNT] = ["PLAYER", "FISH", "WEIGHT", "MUTATION"];
    pub const VALUES: [&str; super::ROW_COUNT] =
        ["Big Frostborn Sharks", "Shark Megalodon BIG", "WEIGHT", "MUTATION"];

    pub const CIRCLE_X: f64 = 40.0;
    pub const CIRCLE_Y: f64 = 95.0;
    pub const CIRCLE_SIZE: f64 = 180.0;
    pub const SQUARE_X: f64 = 1260.0;
    pub const SQUARE_Y: f64 = 95.0;
    pub const SQUARE_SIZE: f64 = 170.0;
    pub const STROKE_WIDTH: f64 = 4.0;

    pub const ORNAMENT_FILL: &str = "#333333";
    pub const ORNAMENT_STROKE: &str = "#111111";
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// One label/value pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
}

/// Geometry shared by all four rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    pub label_x: f64,
    pub value_x: f64,
    pub bar_y: f64,
    pub bar_height: f64,
    pub bar_gap: f64,
    pub label_width: f64,
    pub value_width: f64,
    pub radius: f64,
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            label_x: defaults::LABEL_X,
            value_x: defaults::VALUE_X,
            bar_y: defaults::BAR_Y,
            bar_height: defaults::BAR_HEIGHT,
            bar_gap: defaults::BAR_GAP,
            label_width: defaults::LABEL_WIDTH,
            value_width: defaults::VALUE_WIDTH,
            radius: defaults::RADIUS,
        }
    }
}

impl BarGeometry {
    /// Top edge of row `index`.
    pub fn row_y(&self, index: usize) -> f64 {
        self.bar_y + index as f64 * (self.bar_height + self.bar_gap)
    }

    pub fn label_rect(&self, index: usize) -> Rect {
        Rect::new(self.label_x, self.row_y(index), self.label_width, self.bar_height)
    }

    pub fn value_rect(&self, index: usize) -> Rect {
        Rect::new(self.value_x, self.row_y(index), self.value_width, self.bar_height)
    }
}

/// Fill and text colors for the bars, `#`-prefixed but unvalidated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarColors {
    pub label_bg: String,
    pub value_bg: String,
    pub label_text: String,
    pub value_text: String,
}

impl Default for BarColors {
    fn default() -> Self {
        Self {
            label_bg: defaults::LABEL_BG.to_string(),
            value_bg: defaults::VALUE_BG.to_string(),
            label_text: defaults::LABEL_COLOR.to_string(),
            value_text: defaults::VALUE_COLOR.to_string(),
        }
    }
}

/// Font selection for one text role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSpec {
    pub weight: f64,
    pub size: f64,
    /// Comma separated family chain, e.g. `Open Sans, sans-serif`.
    pub family: String,
}

impl FontSpec {
    /// Family names in preference order, with surrounding quotes stripped.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.family
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|f| !f.is_empty())
    }
}

impl fmt::Display for FontSpec {
    /// CSS font shorthand, e.g. `700 24px Open Sans, sans-serif`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px {}", self.weight, self.size, self.family)
    }
}

/// Circle or square decoration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ornament {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub fill: String,
    pub stroke: String,
}

impl Ornament {
    /// Bounding box of the shape; images are stretched to exactly this box.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    pub fn center(&self) -> (f64, f64) {
        self.bounds().center()
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

/// Fully resolved rendering configuration for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub rows: [Row; ROW_COUNT],
    pub bars: BarGeometry,
    pub colors: BarColors,
    pub label_font: FontSpec,
    pub value_font: FontSpec,
    pub circle: Ornament,
    pub square: Ornament,
    pub stroke_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let family = format!("{}, {}", defaults::FONT_FAMILY, defaults::GENERIC_FAMILY);
        Self {
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            rows: std::array::from_fn(|i| Row {
                label: defaults::LABELS[i].to_string(),
                value: defaults::VALUES[i].to_string(),
            }),
            bars: BarGeometry::default(),
            colors: BarColors::default(),
            label_font: FontSpec {
                weight: defaults::LABEL_WEIGHT,
                size: defaults::LABEL_SIZE,
                family: family.clone(),
            },
            value_font: FontSpec {
                weight: defaults::VALUE_WEIGHT,
                size: defaults::VALUE_SIZE,
                family,
            },
            circle: Ornament {
                x: defaults::CIRCLE_X,
                y: defaults::CIRCLE_Y,
                size: defaults::CIRCLE_SIZE,
                fill: defaults::ORNAMENT_FILL.to_string(),
                stroke: defaults::ORNAMENT_STROKE.to_string(),
            },
            square: Ornament {
                x: defaults::SQUARE_X,
                y: defaults::SQUARE_Y,
                size: defaults::SQUARE_SIZE,
                fill: defaults::ORNAMENT_FILL.to_string(),
                stroke: defaults::ORNAMENT_STROKE.to_string(),
            },
            stroke_width: defaults::STROKE_WIDTH,
        }
    }
}
