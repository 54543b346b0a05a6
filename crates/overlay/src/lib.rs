//! Chart synchronization for the band overlay engine.
//!
//! Keeps a computed band series in step with the current bars and settings:
//! whenever either input changes, the full series is recomputed and pushed
//! to the renderer. The computation itself lives in `bands-indicator`; this
//! crate only decides when to re-run it.

pub mod session;

pub use session::{BandRenderer, OverlaySession};
