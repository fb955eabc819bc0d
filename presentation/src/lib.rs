//! Presentation layer for roundtable
//!
//! This crate contains the CLI definition, run trace formatters and
//! progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::key_figure::{FigureKind, KeyFigure};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
