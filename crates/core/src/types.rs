//! Core data types for the band overlay engine.

use serde::{Deserialize, Serialize};

/// Opaque ordering key for a bar.
///
/// The engine never parses, validates, or reorders timestamps; the value is
/// copied verbatim from each input bar into the output point at the same
/// index.
pub type Timestamp = String;

/// A single OHLCV bar.
///
/// Prices are finite and positive by producer contract; the engine does not
/// enforce this. Bars are immutable once constructed and never retained
/// beyond a single compute call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Opaque ordering key.
    pub timestamp: Timestamp,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume (>= 0).
    pub volume: f64,
}

impl Bar {
    /// Create a bar from its raw fields.
    pub fn new(
        timestamp: impl Into<Timestamp>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Midpoint of high and low.
    #[inline]
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Average of high, low, and close.
    #[inline]
    pub fn hlc3(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Average of all four prices.
    #[inline]
    pub fn ohlc4(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }
}

/// One sample of a computed band series.
///
/// `None` means "undefined at this index": either not enough window history
/// existed, or the offset shifted the value out of range. The renderer is
/// expected to skip undefined fields, not draw them as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPoint {
    /// Timestamp copied verbatim from the input bar at the same index.
    pub timestamp: Timestamp,
    /// Middle band (rolling mean of the projected source).
    pub basis: Option<f64>,
    /// Upper band.
    pub upper: Option<f64>,
    /// Lower band.
    pub lower: Option<f64>,
}

impl BandPoint {
    /// True when all three band fields are defined.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.basis.is_some() && self.upper.is_some() && self.lower.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_prices() {
        let bar = Bar::new("2024-01-02", 10.0, 12.0, 8.0, 11.0, 1000.0);

        assert_relative_eq!(bar.hl2(), 10.0);
        assert_relative_eq!(bar.hlc3(), 31.0 / 3.0);
        assert_relative_eq!(bar.ohlc4(), 10.25);
    }

    #[test]
    fn test_band_point_defined() {
        let full = BandPoint {
            timestamp: "t".to_string(),
            basis: Some(100.0),
            upper: Some(102.0),
            lower: Some(98.0),
        };
        assert!(full.is_defined());

        let warmup = BandPoint {
            timestamp: "t".to_string(),
            basis: None,
            upper: None,
            lower: None,
        };
        assert!(!warmup.is_defined());
    }
}
