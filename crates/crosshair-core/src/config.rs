// File: crates/crosshair-core/src/config.rs
// Summary: Overlay options (axis mode, trigger policy, wrapper selector, line styles).
// Notes:
// - Options deserialize from the same camelCase JSON shape hosts already pass around.
// - Callbacks are not part of the options; see `notify::Hooks`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CrosshairError, Result};

/// Which indicator line(s) are shown and which axis the hit test considers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    X,
    Y,
    #[default]
    #[serde(alias = "both")]
    Full,
}

impl AxisMode {
    pub const fn shows_x(self) -> bool { matches!(self, AxisMode::X | AxisMode::Full) }
    pub const fn shows_y(self) -> bool { matches!(self, AxisMode::Y | AxisMode::Full) }
}

/// When hovered point data is reported as a `hovered` notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendDataOn {
    #[default]
    Hover,
    Click,
}

/// Parsed wrapper selector: `#id` or `.class`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WrapperSelector {
    Id(String),
    Class(String),
}

impl WrapperSelector {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || CrosshairError::InvalidSelector(raw.to_string());
        if let Some(id) = raw.strip_prefix('#') {
            if id.is_empty() { return Err(invalid()); }
            Ok(Self::Id(id.to_string()))
        } else if let Some(class) = raw.strip_prefix('.') {
            if class.is_empty() { return Err(invalid()); }
            Ok(Self::Class(class.to_string()))
        } else {
            Err(invalid())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Id(n) | Self::Class(n) => n,
        }
    }
}

impl fmt::Display for WrapperSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(n) => write!(f, "#{n}"),
            Self::Class(n) => write!(f, ".{n}"),
        }
    }
}

/// 8-bit RGBA color written as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }
}

impl FromStr for Rgba {
    type Err = CrosshairError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = |reason| CrosshairError::InvalidStyle { value: s.to_string(), reason };
        let hex = s.trim().strip_prefix('#').ok_or_else(|| bad("color must start with '#'"))?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(bad("expected #rrggbb or #rrggbbaa"));
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad("non-hex digit"));
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self { r: byte(0)?, g: byte(2)?, b: byte(4)?, a })
    }
}

impl TryFrom<String> for Rgba {
    type Error = CrosshairError;
    fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        if c.a == 255 {
            format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
    }
}

/// Line extent: absolute pixels or percent of the wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Extent {
    Px(f32),
    Percent(f32),
}

impl Extent {
    /// Resolve against the wrapper size along the same axis.
    pub fn resolve(self, available: f32) -> f32 {
        match self {
            Extent::Px(px) => px,
            Extent::Percent(p) => available * p / 100.0,
        }
    }
}

impl FromStr for Extent {
    type Err = CrosshairError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = |reason| CrosshairError::InvalidStyle { value: s.to_string(), reason };
        let number = |n: &str| -> Result<f32> {
            let v: f32 = n.trim().parse().map_err(|_| bad("not a number"))?;
            if !v.is_finite() || v < 0.0 {
                return Err(bad("extent must be finite and non-negative"));
            }
            Ok(v)
        };
        let t = s.trim();
        if let Some(n) = t.strip_suffix("px") {
            Ok(Extent::Px(number(n)?))
        } else if let Some(n) = t.strip_suffix('%') {
            Ok(Extent::Percent(number(n)?))
        } else {
            Err(bad("extent must end in 'px' or '%'"))
        }
    }
}

impl TryFrom<String> for Extent {
    type Error = CrosshairError;
    fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<Extent> for String {
    fn from(e: Extent) -> Self {
        match e {
            Extent::Px(v) => format!("{v}px"),
            Extent::Percent(v) => format!("{v}%"),
        }
    }
}

/// Inline style for one indicator line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub background_color: Rgba,
    pub width: Extent,
    pub height: Extent,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairStyles {
    pub x: LineStyle,
    pub y: LineStyle,
}

impl Default for CrosshairStyles {
    fn default() -> Self {
        let grey = Rgba::new(0xde, 0xde, 0xde, 255);
        Self {
            x: LineStyle { background_color: grey, width: Extent::Px(1.0), height: Extent::Percent(95.0) },
            y: LineStyle { background_color: grey, width: Extent::Percent(100.0), height: Extent::Px(1.0) },
        }
    }
}

/// Overlay configuration.
///
/// `click_to_freeze` and `send_data_on` are independent; the click handler
/// documents how they combine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairOptions {
    pub wrapper_selector: String,
    #[serde(default)]
    pub axis_mode: AxisMode,
    #[serde(default)]
    pub send_data_on: SendDataOn,
    #[serde(default)]
    pub click_to_freeze: bool,
    /// 1-based index of a point selected as soon as the chart is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<usize>,
    #[serde(default)]
    pub styles: CrosshairStyles,
}

impl CrosshairOptions {
    pub fn new(wrapper_selector: impl Into<String>) -> Self {
        Self {
            wrapper_selector: wrapper_selector.into(),
            axis_mode: AxisMode::default(),
            send_data_on: SendDataOn::default(),
            click_to_freeze: false,
            initial: None,
            styles: CrosshairStyles::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_axis_mode(mut self, mode: AxisMode) -> Self {
        self.axis_mode = mode;
        self
    }

    pub fn with_send_data_on(mut self, on: SendDataOn) -> Self {
        self.send_data_on = on;
        self
    }

    pub fn with_click_to_freeze(mut self, enabled: bool) -> Self {
        self.click_to_freeze = enabled;
        self
    }

    pub fn with_initial(mut self, initial: usize) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Validate everything that can fail at attach time.
    pub fn selector(&self) -> Result<WrapperSelector> {
        WrapperSelector::parse(&self.wrapper_selector)
    }
}
