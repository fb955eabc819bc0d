//! Console output formatter for run traces

use crate::output::formatter::OutputFormatter;
use crate::output::key_figure::{FigureKind, KeyFigure};
use colored::Colorize;
use roundtable_domain::{RoundRecord, RunTrace, StateVector};

/// Formats run traces for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete run, round by round
    pub fn format(trace: &RunTrace, figures: &[KeyFigure]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Roundtable Simulation"));
        output.push('\n');
        output.push_str(&Self::run_line(trace));

        output.push_str(&Self::section_header("Initial State"));
        output.push_str(&Self::state_table(&trace.initial_state));

        for record in &trace.rounds {
            output.push_str(&Self::round_block(record));
        }

        output.push_str(&Self::section_header("Final State"));
        output.push_str(&Self::change_table(trace));

        output.push_str(&Self::key_figures_block(figures));
        output.push_str(&Self::alignment_block(trace));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(trace: &RunTrace) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(trace)
    }

    /// Format key figures, state changes and the timeline (concise output)
    pub fn format_summary(trace: &RunTrace, figures: &[KeyFigure]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Roundtable Summary ===".cyan().bold()
        ));
        output.push_str(&Self::run_line(trace));

        output.push_str(&Self::key_figures_block(figures));
        output.push_str(&Self::section_header("State Changes"));
        output.push_str(&Self::change_table(trace));

        if !trace.rounds.is_empty() {
            output.push_str(&Self::section_header("Timeline"));
            for entry in trace.timeline() {
                let lead = match (&entry.top_producer, &entry.action) {
                    (Some(producer), Some(action)) => format!("{producer}: {action}"),
                    _ => "no proposals".dimmed().to_string(),
                };
                let conflicts = if entry.conflicts > 0 {
                    format!("{} conflict(s)", entry.conflicts).yellow().to_string()
                } else {
                    "no conflicts".green().to_string()
                };
                output.push_str(&format!(
                    "  {:>3}  {:>5.1}%  {}  {}\n",
                    entry.round,
                    entry.consensus_confidence * 100.0,
                    conflicts,
                    lead
                ));
            }
        }

        output
    }

    fn run_line(trace: &RunTrace) -> String {
        format!(
            "{} {}\n{} {}   {} {:.1}%\n",
            "Scenario:".cyan().bold(),
            trace.scenario,
            "Rounds:".cyan().bold(),
            trace.n_rounds(),
            "Mean confidence:".cyan().bold(),
            trace.mean_confidence() * 100.0
        )
    }

    fn round_block(record: &RoundRecord) -> String {
        let mut output = Self::section_header(&format!("Round {}", record.round));

        for p in &record.proposals {
            output.push_str(&format!(
                "\n{}\n",
                format!("── {} (priority {}) ──", p.producer(), p.priority())
                    .yellow()
                    .bold()
            ));
            output.push_str(&format!(
                "  {} ({:.1}%)\n",
                p.action(),
                p.confidence() * 100.0
            ));
            let deltas: Vec<String> = p
                .deltas()
                .iter()
                .map(|(field, delta)| format!("{field} {}", Self::signed_pct(*delta)))
                .collect();
            output.push_str(&format!("  {}\n", deltas.join(", ").dimmed()));
        }

        let outcome = &record.outcome;
        output.push_str(&format!("\n{}\n", "Consensus:".green().bold()));
        output.push_str(&Self::indent(&outcome.summary, "  "));
        output.push('\n');

        if !outcome.final_deltas.is_empty() {
            let merged: Vec<String> = outcome
                .final_deltas
                .iter()
                .map(|(field, delta)| format!("{field} {}", Self::signed_pct(*delta)))
                .collect();
            output.push_str(&format!("  Merged: {}\n", merged.join(", ")));
        }
        if record.noise != 0.0 {
            output.push_str(&format!("  Noise: {:+.4}\n", record.noise));
        }

        output
    }

    fn state_table(state: &StateVector) -> String {
        state
            .fields()
            .map(|(field, value)| format!("  {:<18} {:>16.4}\n", field, value))
            .collect()
    }

    fn change_table(trace: &RunTrace) -> String {
        trace
            .initial_state
            .fields()
            .map(|(field, initial)| {
                let last = trace.final_state.get(field).unwrap_or(initial);
                let pct = trace.field_change_pct(field).unwrap_or(0.0);
                let change = Self::signed_pct(pct);
                let change = if pct > 0.0 {
                    change.green()
                } else if pct < 0.0 {
                    change.red()
                } else {
                    change.normal()
                };
                format!(
                    "  {:<18} {:>16.4} -> {:>16.4}  {}\n",
                    field, initial, last, change
                )
            })
            .collect()
    }

    fn key_figures_block(figures: &[KeyFigure]) -> String {
        if figures.is_empty() {
            return String::new();
        }

        let mut output = Self::section_header("Key Figures");
        for figure in figures {
            let value = figure.display_value();
            let value = match figure.kind {
                FigureKind::Change if figure.value > 0.0 => value.green(),
                FigureKind::Change if figure.value < 0.0 => value.red(),
                _ => value.normal(),
            };
            output.push_str(&format!("  {:<22} {:>16}\n", figure.label, value));
        }
        output
    }

    fn alignment_block(trace: &RunTrace) -> String {
        let alignment = trace.producer_alignment();
        if alignment.is_empty() {
            return String::new();
        }

        let mut output = Self::section_header("Producer Alignment");
        for a in alignment {
            output.push_str(&format!(
                "  {:<18} confidence {:>5.1}%  share {:>5.1}%  score {:.3}\n",
                a.producer,
                a.mean_confidence * 100.0,
                a.mean_vote_share * 100.0,
                a.score
            ));
        }
        output
    }

    fn signed_pct(value: f64) -> String {
        format!("{:+.2}%", value * 100.0)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, trace: &RunTrace, figures: &[KeyFigure]) -> String {
        Self::format(trace, figures)
    }

    fn format_json(&self, trace: &RunTrace) -> Result<String, serde_json::Error> {
        Self::format_json(trace)
    }

    fn format_summary(&self, trace: &RunTrace, figures: &[KeyFigure]) -> String {
        Self::format_summary(trace, figures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ConsensusResolver, NegotiationWeights, Proposal};

    fn trace() -> RunTrace {
        colored::control::set_override(false);

        let before = StateVector::from_values([("revenue", 100.0), ("cost", 50.0)]);
        let after = StateVector::from_values([("revenue", 110.0), ("cost", 50.0)]);
        let proposals = vec![
            Proposal::builder("Grower", "Push revenue")
                .delta("revenue", 0.1)
                .confidence(0.8)
                .build()
                .unwrap(),
        ];
        let outcome = ConsensusResolver::with_weights(NegotiationWeights::default())
            .resolve(&proposals);

        let record = RoundRecord {
            round: 1,
            proposals,
            outcome,
            state_before: before.clone(),
            state_after: after.clone(),
            noise: 0.0,
        };
        RunTrace::new("Test Scenario", before, after, vec![record])
    }

    fn figures() -> Vec<KeyFigure> {
        vec![
            KeyFigure::amount("Profit", 60.0),
            KeyFigure::percent("Profit margin", 0.5),
            KeyFigure::change("Risk change", -0.05),
        ]
    }

    #[test]
    fn test_format_full() {
        let output = ConsoleFormatter::format(&trace(), &figures());
        assert!(output.contains("Roundtable Simulation"));
        assert!(output.contains("Scenario: Test Scenario"));
        assert!(output.contains("Round 1"));
        assert!(output.contains("── Grower (priority 1) ──"));
        assert!(output.contains("revenue +10.00%"));
        assert!(output.contains("Consensus reached with confidence 80.0%."));
        assert!(output.contains("Producer Alignment"));
        assert!(output.contains("Key Figures"));
        assert!(!output.contains("Noise:"));
    }

    #[test]
    fn test_format_summary() {
        let output = ConsoleFormatter::format_summary(&trace(), &figures());
        assert!(output.contains("Key Figures"));
        assert!(output.contains("Profit margin"));
        assert!(output.contains("50.00%"));
        assert!(output.contains("-0.0500"));
        assert!(output.contains("State Changes"));
        assert!(output.contains("+10.00%"));
        assert!(output.contains("Grower: Push revenue"));
        assert!(output.contains("no conflicts"));
    }

    #[test]
    fn test_no_figures_no_section() {
        let output = ConsoleFormatter::format_summary(&trace(), &[]);
        assert!(!output.contains("Key Figures"));
    }

    #[test]
    fn test_format_json_round_trips() {
        let trace = trace();
        let json = ConsoleFormatter::format_json(&trace).unwrap();
        let parsed: RunTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trace);
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
