//! Run trace formatting

pub mod console;
pub mod formatter;
pub mod key_figure;
