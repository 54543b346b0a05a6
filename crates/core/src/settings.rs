//! Computation settings for the band overlay.
//!
//! Settings are produced by the settings editor and consumed by the engine
//! as an immutable value per compute call. Parsing and validation helpers
//! live here so the editor boundary and the engine share one definition;
//! the engine itself never validates, it degrades per its contract.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Bar;

/// Price source projected from each bar before the rolling pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Source {
    Open,
    High,
    Low,
    Close,
    Hl2,
    Hlc3,
    Ohlc4,
}

impl Source {
    /// Resolve a selector name.
    ///
    /// Unknown names fall back to `Close` rather than failing, so a stale or
    /// malformed selector string from the editor degrades instead of
    /// crashing the caller.
    pub fn from_name(name: &str) -> Self {
        match name {
            "open" => Source::Open,
            "high" => Source::High,
            "low" => Source::Low,
            "close" => Source::Close,
            "hl2" => Source::Hl2,
            "hlc3" => Source::Hlc3,
            "ohlc4" => Source::Ohlc4,
            _ => Source::Close,
        }
    }

    /// The selector name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Source::Open => "open",
            Source::High => "high",
            Source::Low => "low",
            Source::Close => "close",
            Source::Hl2 => "hl2",
            Source::Hlc3 => "hlc3",
            Source::Ohlc4 => "ohlc4",
        }
    }

    /// Project a bar to the scalar this selector describes.
    #[inline]
    pub fn project(self, bar: &Bar) -> f64 {
        match self {
            Source::Open => bar.open,
            Source::High => bar.high,
            Source::Low => bar.low,
            Source::Close => bar.close,
            Source::Hl2 => bar.hl2(),
            Source::Hlc3 => bar.hlc3(),
            Source::Ohlc4 => bar.ohlc4(),
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::Close
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        Source::from_name(&name)
    }
}

/// Computation settings for one band overlay.
///
/// `length`, `source`, `stddev_multiplier`, and `offset` drive the
/// computation; `style` is carried alongside untouched for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandSettings {
    /// Rolling window length in bars.
    pub length: u32,
    /// Price source projected from each bar.
    pub source: Source,
    /// Multiplier applied to the standard deviation to form the band width.
    pub stddev_multiplier: f64,
    /// Shift applied to the output series in bars. Positive draws the
    /// series later, negative earlier.
    pub offset: i32,
    /// Visual attributes, inert with respect to computation.
    pub style: StyleSettings,
}

impl Default for BandSettings {
    fn default() -> Self {
        Self {
            length: 20,
            source: Source::Close,
            stddev_multiplier: 2.0,
            offset: 0,
            style: StyleSettings::default(),
        }
    }
}

impl BandSettings {
    /// Editor range for `length`.
    pub const LENGTH_MIN: u32 = 5;
    /// Editor range for `length`.
    pub const LENGTH_MAX: u32 = 50;
    /// Editor range for `stddev_multiplier`.
    pub const MULTIPLIER_MIN: f64 = 0.5;
    /// Editor range for `stddev_multiplier`.
    pub const MULTIPLIER_MAX: f64 = 5.0;
    /// Editor range for `offset`.
    pub const OFFSET_MIN: i32 = -20;
    /// Editor range for `offset`.
    pub const OFFSET_MAX: i32 = 20;

    /// Parse settings from an editor-produced JSON object.
    ///
    /// Missing fields take their defaults; an unknown `source` selector
    /// collapses to `close`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings for the editor.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check the engine's input contract.
    ///
    /// The engine does not call this: out-of-contract settings degrade to an
    /// all-undefined series instead of failing. The editor calls it to
    /// reject bad input before it reaches the chart.
    pub fn validate(&self) -> Result<()> {
        if self.length < 1 {
            return Err(Error::settings(format!(
                "length must be >= 1, got {}",
                self.length
            )));
        }
        if !self.stddev_multiplier.is_finite() || self.stddev_multiplier <= 0.0 {
            return Err(Error::settings(format!(
                "stddev_multiplier must be a positive finite number, got {}",
                self.stddev_multiplier
            )));
        }
        Ok(())
    }

    /// Clamp to the editor ranges.
    ///
    /// A UI affordance, not an engine invariant: the engine accepts values
    /// outside these ranges.
    pub fn clamped(&self) -> Self {
        let mut settings = self.clone();
        settings.length = settings.length.clamp(Self::LENGTH_MIN, Self::LENGTH_MAX);
        settings.stddev_multiplier = settings
            .stddev_multiplier
            .clamp(Self::MULTIPLIER_MIN, Self::MULTIPLIER_MAX);
        settings.offset = settings.offset.clamp(Self::OFFSET_MIN, Self::OFFSET_MAX);
        settings
    }
}

/// Visual attributes for the rendered overlay.
///
/// Pure passthrough data: the engine never reads these, and the overlay
/// session hands them to the renderer unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Basis (middle) line color.
    pub basis_color: String,
    /// Upper band line color.
    pub upper_color: String,
    /// Lower band line color.
    pub lower_color: String,
    /// Line width in pixels.
    pub line_width: u32,
    /// Whether to draw the basis line.
    pub show_basis: bool,
    /// Whether to draw the upper band.
    pub show_upper: bool,
    /// Whether to draw the lower band.
    pub show_lower: bool,
    /// Whether to fill the area between the bands.
    pub show_fill: bool,
    /// Fill opacity between the bands (0.0 to 1.0).
    pub fill_opacity: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            basis_color: "#FF6D00".to_string(),
            upper_color: "#2962FF".to_string(),
            lower_color: "#2962FF".to_string(),
            line_width: 1,
            show_basis: true,
            show_upper: true,
            show_lower: true,
            show_fill: true,
            fill_opacity: 0.05,
        }
    }
}
