//! Bounded numeric state
//!
//! The state is a set of named numeric fields. Every field has a configured
//! `[lo, hi]` bound and the [`StateStore`] keeps each value inside it.
//!
//! ```text
//! StateStore ──snapshot()──▶ StateVector (immutable, one per round boundary)
//!     ▲
//!     └──apply(deltas, noise)── clamped, round += 1, appended to history
//! ```

pub mod bounds;
pub mod store;
pub mod vector;

pub use bounds::{BoundsTable, FieldBounds};
pub use store::StateStore;
pub use vector::StateVector;
