//! Run trace types
//!
//! A run is an ordered list of [`RoundRecord`]s plus the initial and final
//! snapshots. Records are built once per round and never mutated afterwards.

pub mod round;
pub mod trace;

pub use round::RoundRecord;
pub use trace::{DEFAULT_SCENARIO, ProducerAlignment, RunTrace, TimelineEntry};
