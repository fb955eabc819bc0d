//! Pairwise conflict detection
//!
//! Two proposals conflict on a field when both propose it and their deltas
//! have strictly opposite signs. A zero delta never conflicts. The scan is
//! O(producers²), which is fine for the handful of producers in a run.

use super::proposal::Proposal;
use serde::{Deserialize, Serialize};

/// Default severity at or above which a pair is flagged
pub const DEFAULT_CONFLICT_THRESHOLD: f64 = 0.5;

/// Disagreement between two producers
///
/// The pair is unordered: `producer_a <= producer_b` lexicographically, so
/// the record for `(a, b)` equals the record for `(b, a)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub producer_a: String,
    pub producer_b: String,
    /// Conflicting fields in key order
    pub fields: Vec<String>,
    /// `conflicting fields / shared fields`
    pub severity: f64,
}

impl ConflictRecord {
    /// Compare two proposals over their shared fields
    ///
    /// Returns `None` when they share no field.
    pub fn between(a: &Proposal, b: &Proposal) -> Option<Self> {
        let mut shared = 0usize;
        let mut fields = Vec::new();

        for (field, da) in a.deltas() {
            let Some(db) = b.delta(field) else {
                continue;
            };
            shared += 1;
            if opposite_signs(*da, db) {
                fields.push(field.clone());
            }
        }

        if shared == 0 {
            return None;
        }

        let (producer_a, producer_b) = if a.producer() <= b.producer() {
            (a.producer(), b.producer())
        } else {
            (b.producer(), a.producer())
        };

        Some(Self {
            producer_a: producer_a.to_string(),
            producer_b: producer_b.to_string(),
            severity: fields.len() as f64 / shared as f64,
            fields,
        })
    }

    /// Whether the severity reaches the threshold
    pub fn is_flagged(&self, threshold: f64) -> bool {
        self.severity >= threshold
    }

    /// Check if a producer is one side of this conflict
    pub fn involves(&self, producer: &str) -> bool {
        self.producer_a == producer || self.producer_b == producer
    }
}

/// All flagged pairs in a batch, sorted by producer pair
pub fn detect_conflicts(proposals: &[Proposal], threshold: f64) -> Vec<ConflictRecord> {
    let mut conflicts = Vec::new();
    for (i, a) in proposals.iter().enumerate() {
        for b in &proposals[i + 1..] {
            if let Some(record) = ConflictRecord::between(a, b) {
                if record.is_flagged(threshold) {
                    conflicts.push(record);
                }
            }
        }
    }

    conflicts.sort_by(|x, y| {
        (&x.producer_a, &x.producer_b, &x.fields).cmp(&(&y.producer_a, &y.producer_b, &y.fields))
    });
    conflicts
}

fn opposite_signs(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}
