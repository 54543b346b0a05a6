//! Band computation engine.
//!
//! Projects each bar through the configured source, runs the rolling mean
//! and population standard deviation, derives the upper and lower bands,
//! applies the configured offset, and assembles the output series aligned
//! index-for-index with the input bars.

use bands_core::{BandPoint, BandSettings, Bar};

use crate::rolling::{rolling_mean, rolling_population_std_dev};

/// Band computation engine.
///
/// Holds the settings for one overlay; `compute` is a pure function of the
/// input bars and retains nothing between calls, so one engine can serve
/// any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct BandEngine {
    settings: BandSettings,
}

impl BandEngine {
    /// Create an engine for the given settings.
    pub fn new(settings: BandSettings) -> Self {
        Self { settings }
    }

    /// The settings this engine computes with.
    pub fn settings(&self) -> &BandSettings {
        &self.settings
    }

    /// Compute the band series for an ordered bar sequence.
    ///
    /// The output has the same length as `bars`, and output index `i`
    /// carries the timestamp of input bar `i`. Indices without enough
    /// window history, or shifted out of range by the offset, have `None`
    /// band fields. Empty input yields an empty series; a zero window
    /// yields a series of all-`None` points.
    pub fn compute(&self, bars: &[Bar]) -> Vec<BandPoint> {
        let settings = &self.settings;
        let window = settings.length as usize;

        let projected: Vec<f64> = bars
            .iter()
            .map(|bar| settings.source.project(bar))
            .collect();

        let basis = rolling_mean(&projected, window);
        let dispersion = rolling_population_std_dev(&projected, window, &basis);

        let mut upper = vec![None; bars.len()];
        let mut lower = vec![None; bars.len()];
        for i in 0..bars.len() {
            if let (Some(mid), Some(dev)) = (basis[i], dispersion[i]) {
                let width = settings.stddev_multiplier * dev;
                upper[i] = Some(mid + width);
                lower[i] = Some(mid - width);
            }
        }

        let basis = shift_series(&basis, settings.offset);
        let upper = shift_series(&upper, settings.offset);
        let lower = shift_series(&lower, settings.offset);

        bars.iter()
            .enumerate()
            .map(|(i, bar)| BandPoint {
                timestamp: bar.timestamp.clone(),
                basis: basis[i],
                upper: upper[i],
                lower: lower[i],
            })
            .collect()
    }
}

/// Compute a band series in one call.
pub fn compute(bars: &[Bar], settings: &BandSettings) -> Vec<BandPoint> {
    BandEngine::new(settings.clone()).compute(bars)
}

/// Shift a series along the index axis.
///
/// The value at output index `i` is taken from `series[i - offset]` when
/// that index is in range; positions shifted out of range become `None`.
/// An offset of zero is the identity.
fn shift_series(series: &[Option<f64>], offset: i32) -> Vec<Option<f64>> {
    if offset == 0 {
        return series.to_vec();
    }

    let len = series.len();
    let mut out = vec![None; len];
    for (i, slot) in out.iter_mut().enumerate() {
        let src = i as i64 - offset as i64;
        if src >= 0 && (src as usize) < len {
            *slot = series[src as usize];
        }
    }
    out
}
