//! Layout configuration as written in YAML.
//!
//! ```yaml
//! h_gap: dynamic          # or a pixel count
//! v_gap: 5
//! insets: 10              # or { top: 1, left: 2, bottom: 3, right: 4 }
//! ```
//!
//! Numbers are read as signed so negative values produce a field-named
//! error instead of a parse failure. Insets are checked by the layout
//! itself through [`insets_from_signed`].

use serde::{Deserialize, Serialize};
use unigrid_core::Insets;
use unigrid_layout::{insets_from_signed, HorizontalGap, UniformGridLayout};

use crate::error::ConfigError;

const DYNAMIC_KEYWORD: &str = "dynamic";

/// Horizontal gap: a pixel count or the `dynamic` keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GapSetting {
    /// Fixed gap in pixels
    Pixels(i64),
    /// `dynamic`
    Keyword(String),
}

impl Default for GapSetting {
    fn default() -> Self {
        Self::Keyword(DYNAMIC_KEYWORD.to_string())
    }
}

impl GapSetting {
    /// Validate into a gap policy.
    pub fn resolve(&self) -> Result<HorizontalGap, ConfigError> {
        match self {
            Self::Pixels(value) => pixels("h_gap", *value).map(HorizontalGap::Fixed),
            Self::Keyword(word) if word.eq_ignore_ascii_case(DYNAMIC_KEYWORD) => {
                Ok(HorizontalGap::Dynamic)
            }
            Self::Keyword(word) => Err(ConfigError::invalid(
                "h_gap",
                format!("expected a pixel count or `{DYNAMIC_KEYWORD}`, got `{word}`"),
            )),
        }
    }
}

impl From<HorizontalGap> for GapSetting {
    fn from(gap: HorizontalGap) -> Self {
        match gap {
            HorizontalGap::Fixed(px) => Self::Pixels(i64::from(px)),
            HorizontalGap::Dynamic => Self::default(),
        }
    }
}

/// Per-side insets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideInsets {
    /// Top inset
    #[serde(default)]
    pub top: i64,
    /// Left inset
    #[serde(default)]
    pub left: i64,
    /// Bottom inset
    #[serde(default)]
    pub bottom: i64,
    /// Right inset
    #[serde(default)]
    pub right: i64,
}

/// Insets: one value for every side, or a map of sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsetsSetting {
    /// Same inset on every side
    Uniform(i64),
    /// Individual sides, missing ones are zero
    Sides(SideInsets),
}

impl Default for InsetsSetting {
    fn default() -> Self {
        Self::Uniform(0)
    }
}

impl InsetsSetting {
    /// Validate into insets.
    ///
    /// Negative sides are rejected by the layout as
    /// [`LayoutError::Negative`](unigrid_layout::LayoutError::Negative).
    pub fn resolve(&self) -> Result<Insets, ConfigError> {
        let (top, left, bottom, right) = match *self {
            Self::Uniform(value) => (value, value, value, value),
            Self::Sides(sides) => (sides.top, sides.left, sides.bottom, sides.right),
        };
        Ok(insets_from_signed(
            signed("insets.top", top)?,
            signed("insets.left", left)?,
            signed("insets.bottom", bottom)?,
            signed("insets.right", right)?,
        )?)
    }
}

impl From<Insets> for InsetsSetting {
    fn from(insets: Insets) -> Self {
        if insets == Insets::uniform(insets.top) {
            Self::Uniform(i64::from(insets.top))
        } else {
            Self::Sides(SideInsets {
                top: i64::from(insets.top),
                left: i64::from(insets.left),
                bottom: i64::from(insets.bottom),
                right: i64::from(insets.right),
            })
        }
    }
}

/// Grid layout settings; missing keys take the layout defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayoutConfig {
    /// Horizontal gap
    #[serde(default)]
    pub h_gap: GapSetting,
    /// Vertical gap
    #[serde(default)]
    pub v_gap: i64,
    /// Insets
    #[serde(default)]
    pub insets: InsetsSetting,
}

impl GridLayoutConfig {
    /// Validate and build the layout.
    pub fn to_layout(&self) -> Result<UniformGridLayout, ConfigError> {
        Ok(UniformGridLayout::new()
            .with_h_gap(self.h_gap.resolve()?)
            .with_v_gap(pixels("v_gap", self.v_gap)?)
            .with_insets(self.insets.resolve()?))
    }

    /// Capture a layout's current settings.
    #[must_use]
    pub fn from_layout(layout: &UniformGridLayout) -> Self {
        Self {
            h_gap: layout.h_gap().into(),
            v_gap: i64::from(layout.v_gap()),
            insets: layout.insets().into(),
        }
    }
}

/// Check that `value` is a valid pixel count.
pub(crate) fn pixels(field: &str, value: i64) -> Result<u32, ConfigError> {
    if value < 0 {
        return Err(ConfigError::invalid(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    u32::try_from(value).map_err(|_| ConfigError::invalid(field, format!("{value} is too large")))
}

/// Narrow a YAML integer to the layout's signed range.
fn signed(field: &str, value: i64) -> Result<i32, ConfigError> {
    i32::try_from(value).map_err(|_| ConfigError::invalid(field, format!("{value} is out of range")))
}
