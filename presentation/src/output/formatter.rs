//! Output formatter trait

use crate::output::key_figure::KeyFigure;
use roundtable_domain::RunTrace;

/// Trait for formatting run traces
pub trait OutputFormatter {
    /// Every round in detail, followed by the key figures
    fn format(&self, trace: &RunTrace, figures: &[KeyFigure]) -> String;

    /// Format as JSON
    fn format_json(&self, trace: &RunTrace) -> Result<String, serde_json::Error>;

    /// Key figures, state changes and timeline only (concise output)
    fn format_summary(&self, trace: &RunTrace, figures: &[KeyFigure]) -> String;
}
