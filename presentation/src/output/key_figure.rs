//! Derived headline numbers shown alongside a run trace

/// How a [`KeyFigure`] value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    /// Plain amount with two decimals
    Amount,
    /// Fraction shown as a percentage
    Percent,
    /// Unitless ratio with four decimals
    Ratio,
    /// Signed change, colored by direction
    Change,
    /// Whole number
    Count,
}

/// A labelled number computed from a run, such as profit or ROI
///
/// The formatter does not know how these are derived; callers compute them
/// from the trace and pass them in.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFigure {
    pub label: String,
    pub value: f64,
    pub kind: FigureKind,
}

impl KeyFigure {
    pub fn new(label: impl Into<String>, value: f64, kind: FigureKind) -> Self {
        Self {
            label: label.into(),
            value,
            kind,
        }
    }

    pub fn amount(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, value, FigureKind::Amount)
    }

    pub fn percent(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, value, FigureKind::Percent)
    }

    pub fn ratio(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, value, FigureKind::Ratio)
    }

    pub fn change(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, value, FigureKind::Change)
    }

    pub fn count(label: impl Into<String>, value: usize) -> Self {
        Self::new(label, value as f64, FigureKind::Count)
    }

    /// Rendered value without color
    pub fn display_value(&self) -> String {
        match self.kind {
            FigureKind::Amount => format!("{:.2}", self.value),
            FigureKind::Percent => format!("{:.2}%", self.value * 100.0),
            FigureKind::Ratio => format!("{:.4}", self.value),
            FigureKind::Change => format!("{:+.4}", self.value),
            FigureKind::Count => format!("{:.0}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value_per_kind() {
        assert_eq!(KeyFigure::amount("Profit", 400000.0).display_value(), "400000.00");
        assert_eq!(KeyFigure::percent("Margin", 0.4).display_value(), "40.00%");
        assert_eq!(KeyFigure::ratio("Cost ratio", 0.6).display_value(), "0.6000");
        assert_eq!(KeyFigure::change("Risk change", -0.05).display_value(), "-0.0500");
        assert_eq!(KeyFigure::count("Rounds", 12).display_value(), "12");
    }
}
