//! Tick source adapters

mod interval;

pub use interval::IntervalTickSource;
