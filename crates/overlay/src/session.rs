//! Overlay session: the re-render contract.
//!
//! Tracks the current bar sequence and settings for one overlay and
//! recomputes the band series when either changes. Recomputation always
//! rebuilds the full series; there is no incremental update path.

use bands_core::{BandPoint, BandSettings, Bar, StyleSettings};
use bands_indicator::BandEngine;
use tracing::debug;

/// Receiver for freshly computed band series.
///
/// Implemented by the chart widget. `None` band fields mean "do not draw at
/// this index", never zero. The style value is the inert passthrough from
/// the settings, handed over unchanged.
pub trait BandRenderer {
    /// Draw the series with the given style.
    fn render(&mut self, series: &[BandPoint], style: &StyleSettings);
}

/// Tracks bars and settings for one overlay and recomputes on change.
///
/// Recomputation is keyed on bar-set identity (a revision bumped by
/// [`set_bars`](OverlaySession::set_bars)) and settings value, so redundant
/// updates do no work. The session owns no other state; the computation is
/// delegated to the pure [`BandEngine`].
pub struct OverlaySession {
    bars: Vec<Bar>,
    bars_rev: u64,
    settings: BandSettings,
    series: Vec<BandPoint>,
    /// Key (bar revision, settings) the current series was computed for.
    computed_for: Option<(u64, BandSettings)>,
}

impl OverlaySession {
    /// Create a session with no bars and the given settings.
    pub fn new(settings: BandSettings) -> Self {
        Self {
            bars: Vec::new(),
            bars_rev: 0,
            settings,
            series: Vec::new(),
            computed_for: None,
        }
    }

    /// Replace the bar sequence.
    ///
    /// A new bar vector always counts as a change. Change detection is by
    /// identity, not deep equality: the caller replaces the whole sequence,
    /// it does not edit bars in place.
    pub fn set_bars(&mut self, bars: Vec<Bar>) {
        self.bars = bars;
        self.bars_rev += 1;
    }

    /// Replace the settings.
    ///
    /// Setting a value equal to the current settings does not invalidate
    /// the computed series.
    pub fn set_settings(&mut self, settings: BandSettings) {
        self.settings = settings;
    }

    /// The current bar sequence.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// The current settings.
    pub fn settings(&self) -> &BandSettings {
        &self.settings
    }

    /// The current band series, recomputing first if bars or settings
    /// changed since the last computation.
    pub fn series(&mut self) -> &[BandPoint] {
        self.refresh();
        &self.series
    }

    /// Recompute the series if bars or settings changed.
    ///
    /// Returns `true` when a recomputation actually ran.
    pub fn refresh(&mut self) -> bool {
        if !self.is_stale() {
            return false;
        }

        debug!(
            bars = self.bars.len(),
            length = self.settings.length,
            source = self.settings.source.name(),
            "recomputing band series"
        );

        self.series = BandEngine::new(self.settings.clone()).compute(&self.bars);
        self.computed_for = Some((self.bars_rev, self.settings.clone()));
        true
    }

    /// Refresh and, when a recomputation ran, push the series to the
    /// renderer together with the style passthrough.
    ///
    /// Returns `true` when the renderer was invoked.
    pub fn sync(&mut self, renderer: &mut dyn BandRenderer) -> bool {
        let recomputed = self.refresh();
        if recomputed {
            renderer.render(&self.series, &self.settings.style);
        }
        recomputed
    }

    fn is_stale(&self) -> bool {
        match &self.computed_for {
            Some((rev, settings)) => *rev != self.bars_rev || *settings != self.settings,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renderer that records what it was asked to draw.
    struct RecordingRenderer {
        calls: usize,
        last_len: usize,
        last_style: Option<StyleSettings>,
    }

    impl RecordingRenderer {
        fn new() -> Self {
            Self {
                calls: 0,
                last_len: 0,
                last_style: None,
            }
        }
    }

    impl BandRenderer for RecordingRenderer {
        fn render(&mut self, series: &[BandPoint], style: &StyleSettings) {
            self.calls += 1;
            self.last_len = series.len();
            self.last_style = Some(style.clone());
        }
    }

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| Bar::new(format!("t{i}"), *close, *close, *close, *close, 10.0))
            .collect()
    }

    #[test]
    fn test_first_sync_renders_empty_series() {
        let mut session = OverlaySession::new(BandSettings::default());
        let mut renderer = RecordingRenderer::new();

        assert!(session.sync(&mut renderer));
        assert_eq!(renderer.calls, 1);
        assert_eq!(renderer.last_len, 0);
    }

    #[test]
    fn test_redundant_sync_does_not_rerender() {
        let mut session = OverlaySession::new(BandSettings::default());
        let mut renderer = RecordingRenderer::new();

        session.set_bars(bars_from_closes(&[1.0, 2.0, 3.0]));
        assert!(session.sync(&mut renderer));
        assert!(!session.sync(&mut renderer));
        assert!(!session.sync(&mut renderer));
        assert_eq!(renderer.calls, 1);
    }

    #[test]
    fn test_new_bars_trigger_recompute() {
        let mut session = OverlaySession::new(BandSettings::default());
        let mut renderer = RecordingRenderer::new();

        session.set_bars(bars_from_closes(&[1.0, 2.0]));
        session.sync(&mut renderer);

        session.set_bars(bars_from_closes(&[1.0, 2.0, 3.0]));
        assert!(session.sync(&mut renderer));
        assert_eq!(renderer.calls, 2);
        assert_eq!(renderer.last_len, 3);
    }

    #[test]
    fn test_equal_settings_value_is_a_noop() {
        let mut session = OverlaySession::new(BandSettings::default());
        let mut renderer = RecordingRenderer::new();

        session.set_bars(bars_from_closes(&[1.0, 2.0, 3.0]));
        session.sync(&mut renderer);

        session.set_settings(BandSettings::default());
        assert!(!session.sync(&mut renderer));
        assert_eq!(renderer.calls, 1);
    }

    #[test]
    fn test_changed_settings_trigger_recompute() {
        let mut session = OverlaySession::new(BandSettings::default());
        let mut renderer = RecordingRenderer::new();

        session.set_bars(bars_from_closes(&[1.0, 2.0, 3.0]));
        session.sync(&mut renderer);

        let mut settings = BandSettings::default();
        settings.length = 2;
        session.set_settings(settings);
        assert!(session.sync(&mut renderer));
        assert_eq!(renderer.calls, 2);
    }

    #[test]
    fn test_style_passthrough_reaches_renderer() {
        let mut settings = BandSettings::default();
        settings.style.basis_color = "#123456".to_string();
        settings.style.fill_opacity = 0.3;

        let mut session = OverlaySession::new(settings.clone());
        let mut renderer = RecordingRenderer::new();
        session.set_bars(bars_from_closes(&[1.0, 2.0, 3.0]));
        session.sync(&mut renderer);

        assert_eq!(renderer.last_style, Some(settings.style));
    }

    #[test]
    fn test_style_only_change_still_rerenders() {
        // A style edit changes the settings value, so the series is pushed
        // again even though the numbers are unchanged.
        let mut session = OverlaySession::new(BandSettings::default());
        let mut renderer = RecordingRenderer::new();

        session.set_bars(bars_from_closes(&[1.0, 2.0, 3.0]));
        session.sync(&mut renderer);

        let mut settings = BandSettings::default();
        settings.style.line_width = 3;
        session.set_settings(settings);
        assert!(session.sync(&mut renderer));
        assert_eq!(renderer.calls, 2);
    }

    #[test]
    fn test_series_accessor_refreshes_lazily() {
        let mut session = OverlaySession::new(BandSettings::default());
        session.set_bars(bars_from_closes(&[1.0; 25]));

        let series = session.series();
        assert_eq!(series.len(), 25);
        assert!(series[19].is_defined());
        assert!(!series[0].is_defined());
    }
}
