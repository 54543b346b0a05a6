//! Band computation for the band overlay engine.
//!
//! This crate handles:
//! - Rolling mean and rolling population standard deviation over a flat
//!   numeric series
//! - Source projection, band derivation, and offset shifting over an
//!   ordered bar sequence
//!
//! Everything here is pure: no I/O, no retained state, no side effects.

pub mod engine;
pub mod rolling;

pub use engine::{compute, BandEngine};
pub use rolling::{rolling_mean, rolling_population_std_dev};
