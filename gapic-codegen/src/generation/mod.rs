//! Helpers writers share when turning composed units into text.
//!
//! - [`ImportCollector`] - Import tracking, deduplication and grouping

mod imports;

pub use imports::{ImportCollector, ImportGroup};
