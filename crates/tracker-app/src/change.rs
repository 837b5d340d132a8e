//! Day-over-day price movement and how it is shown.

use serde::Serialize;
use std::fmt;

/// Percentage movement from `open_price` to `current_price`.
///
/// `open_price` must be non-zero; callers check this before calling.
pub fn percent_change(open_price: f64, current_price: f64) -> f64 {
    ((current_price - open_price) / open_price) * 100.0
}

/// Display text plus style for a percentage change.
///
/// Positive moves get an explicit `+`; everything else, zero included, is styled as a loss.
///
/// ```rust
/// use tracker_app::change::{format_change, StyleTag};
///
/// assert_eq!(format_change(10.0), ("+10.0%".to_string(), StyleTag::Gain));
/// assert_eq!(format_change(-5.256), ("-5.26%".to_string(), StyleTag::Loss));
/// ```
pub fn format_change(percent: f64) -> (String, StyleTag) {
    if percent > 0.0 {
        (format!("+{}%", fmt_decimal(percent)), StyleTag::Gain)
    } else {
        (format!("{}%", fmt_decimal(percent)), StyleTag::Loss)
    }
}

/// Round to 2 places and print the shortest representation, always with a fractional part:
/// `153.0`, `-5.26`, `0.0`.
///
/// Rounding works on the exact binary value with ties to even, so `0.015` (stored just below
/// the tie) prints as `0.01` and `0.125` as `0.12`.
pub fn fmt_decimal(value: f64) -> String {
    let rounded: f64 = format!("{value:.2}").parse().unwrap_or(value);
    // `+ 0.0` folds -0.0 into 0.0
    format!("{:?}", rounded + 0.0)
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    Gain,
    Loss,
}

impl StyleTag {
    pub fn css_class(&self) -> &'static str {
        match self {
            StyleTag::Gain => "center-align text-success",
            StyleTag::Loss => "center-align text-danger",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Gain,
    Loss,
    Flat,
}

/// Movement between two consecutive closes.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ChangeResult {
    pub percent: f64,
    pub direction: Direction,
}

impl ChangeResult {
    /// `None` when `previous_close` is zero.
    pub fn new(previous_close: f64, last_close: f64) -> Option<Self> {
        if previous_close == 0.0 {
            return None;
        }

        let percent = percent_change(previous_close, last_close);
        let direction = if percent > 0.0 {
            Direction::Gain
        } else if percent < 0.0 {
            Direction::Loss
        } else {
            Direction::Flat
        };
        Some(Self { percent, direction })
    }

    pub fn display(&self) -> (String, StyleTag) {
        format_change(self.percent)
    }
}

impl fmt::Display for ChangeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display().0)
    }
}
