//! Query parameter resolution.
//!
//! Turns the untyped query map into a fully defaulted [`LayoutConfig`] in a
//! single pass. Every field has its own default; nothing downstream looks at
//! raw parameters again.

use std::collections::HashMap;

use card_common::layout::defaults;
use card_common::{
    normalize_hex, BarColors, BarGeometry, FontSpec, LayoutConfig, Ornament, Row, ROW_COUNT,
};

/// Label keys, one per row.
const LABEL_KEYS: [&str; ROW_COUNT] = ["l1", "l2", "l3", "l4"];

/// Value keys per row, with the semantic alias tried second.
const VALUE_KEYS: [(&str, &str); ROW_COUNT] = [
    ("v1", "player"),
    ("v2", "fish"),
    ("v3", "weight"),
    ("v4", "mutation"),
];

/// Raw request parameters as received.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    params: HashMap<String, String>,
}

/// Image sources named by a request. Empty strings mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSources {
    pub background: String,
    pub circle: String,
    pub square: String,
}

impl RenderRequest {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Non-empty value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Finite number for `key`, or `fallback`.
    pub fn number(&self, key: &str, fallback: f64) -> f64 {
        self.get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(fallback)
    }

    /// Verbatim string for `key`, or `fallback`.
    pub fn text(&self, key: &str, fallback: &str) -> String {
        self.get(key).unwrap_or(fallback).to_string()
    }

    /// `#`-prefixed color for `key`, or `fallback`. Not validated.
    pub fn color(&self, key: &str, fallback: &str) -> String {
        match self.get(key) {
            Some(raw) => normalize_hex(raw),
            None => fallback.to_string(),
        }
    }

    /// Font family chain, always ending in a generic family.
    pub fn font_family(&self) -> String {
        let raw = self.text("font", defaults::FONT_FAMILY);
        if raw.contains(',') || raw.contains(defaults::GENERIC_FAMILY) {
            raw
        } else {
            format!("{}, {}", raw, defaults::GENERIC_FAMILY)
        }
    }

    /// Only the exact value `1` asks for an attachment.
    pub fn download(&self) -> bool {
        self.params.get("download").map(String::as_str) == Some("1")
    }

    pub fn image_sources(&self) -> ImageSources {
        ImageSources {
            background: self.text("bg", ""),
            circle: self.text("circleUrl", ""),
            square: self.text("squareUrl", ""),
        }
    }

    /// Resolve the full layout for a background of `background` pixels.
    ///
    /// A zero background dimension falls back to the default canvas size.
    pub fn resolve_layout(&self, background: (u32, u32)) -> LayoutConfig {
        let (bg_width, bg_height) = background;
        let default_width = if bg_width > 0 {
            bg_width as f64
        } else {
            defaults::CANVAS_WIDTH
        };
        let default_height = if bg_height > 0 {
            bg_height as f64
        } else {
            defaults::CANVAS_HEIGHT
        };

        let family = self.font_family();

        LayoutConfig {
            width: self.number("w", default_width),
            height: self.number("h", default_height),
            rows: std::array::from_fn(|i| self.row(i)),
            bars: BarGeometry {
                label_x: self.number("labelX", defaults::LABEL_X),
                value_x: self.number("valueX", defaults::VALUE_X),
                bar_y: self.number("barY", defaults::BAR_Y),
                bar_height: self.number("barH", defaults::BAR_HEIGHT),
                bar_gap: self.number("barGap", defaults::BAR_GAP),
                label_width: self.number("labelW", defaults::LABEL_WIDTH),
                value_width: self.number("valueW", defaults::VALUE_WIDTH),
                radius: self.number("radius", defaults::RADIUS),
            },
            colors: BarColors {
                label_bg: self.color("labelBg", defaults::LABEL_BG),
                value_bg: self.color("valueBg", defaults::VALUE_BG),
                label_text: self.color("labelColor", defaults::LABEL_COLOR),
                value_text: self.color("valueColor", defaults::VALUE_COLOR),
            },
            label_font: FontSpec {
                weight: self.number("labelWeight", defaults::LABEL_WEIGHT),
                size: self.number("labelSize", defaults::LABEL_SIZE),
                family: family.clone(),
            },
            value_font: FontSpec {
                weight: self.number("valueWeight", defaults::VALUE_WEIGHT),
                size: self.number("valueSize", defaults::VALUE_SIZE),
                family,
            },
            circle: Ornament {
                x: self.number("circleX", defaults::CIRCLE_X),
                y: self.number("circleY", defaults::CIRCLE_Y),
                size: self.number("circleSize", defaults::CIRCLE_SIZE),
                fill: self.color("circleFill", defaults::ORNAMENT_FILL),
                stroke: self.color("circleStroke", defaults::ORNAMENT_STROKE),
            },
            square: Ornament {
                x: self.number("squareX", defaults::SQUARE_X),
                y: self.number("squareY", defaults::SQUARE_Y),
                size: self.number("squareSize", defaults::SQUARE_SIZE),
                fill: self.color("squareFill", defaults::ORNAMENT_FILL),
                stroke: self.color("squareStroke", defaults::ORNAMENT_STROKE),
            },
            stroke_width: self.number("strokeW", defaults::STROKE_WIDTH),
        }
    }

    fn row(&self, index: usize) -> Row {
        let (value_key, alias) = VALUE_KEYS[index];
        let aliased = self.text(alias, defaults::VALUES[index]);
        Row {
            label: self.text(LABEL_KEYS[index], defaults::LABELS[index]),
            value: self.text(value_key, &aliased),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
