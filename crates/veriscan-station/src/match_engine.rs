//! N-way match decision.
//!
//! A session collects barcodes until it holds as many as the match count in
//! effect when its first barcode arrived. It then passes if every barcode
//! equals the first, and fails otherwise, naming the mismatching positions.
//!
//! # Invariants
//!
//! - A session holds fewer barcodes than its required count between calls.
//! - The required count is fixed for the lifetime of a session. A new count
//!   can only be committed from programming mode, and entering programming
//!   mode clears the session first.
//!
//! # Examples
//!
//! ```
//! use veriscan_core::{Barcode, MatchCount};
//! use veriscan_station::{MatchEngine, MatchOutcome, Verdict};
//!
//! let mut engine = MatchEngine::new();
//! let n = MatchCount::new(2).unwrap();
//!
//! assert_eq!(engine.submit(Barcode::from("ABC123"), n), MatchOutcome::Started);
//! match engine.submit(Barcode::from("XYZ999"), n) {
//!     MatchOutcome::Decided(decision) => {
//!         assert_eq!(decision.verdict, Verdict::Fail);
//!         assert_eq!(decision.mismatches, vec![2]);
//!     }
//!     other => panic!("expected a decision, got {other:?}"),
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use veriscan_core::{Barcode, MatchCount};

/// Result of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every barcode matched the first.
    Pass,
    /// At least one barcode differed from the first.
    Fail,
}

/// A completed session and its outcome, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDecision {
    pub verdict: Verdict,

    /// Number of barcodes the session required.
    pub required: MatchCount,

    /// The barcodes in scan order.
    pub barcodes: Vec<Barcode>,

    /// 1-based positions of barcodes that differ from the first.
    pub mismatches: Vec<usize>,

    /// Wall-clock time of the decision.
    pub decided_at: DateTime<Utc>,
}

impl MatchDecision {
    fn from_session(barcodes: Vec<Barcode>, required: MatchCount) -> Self {
        let mismatches = mismatch_positions(&barcodes);
        let verdict = if mismatches.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail
        };
        Self {
            verdict,
            required,
            barcodes,
            mismatches,
            decided_at: Utc::now(),
        }
    }

    /// Returns `true` if the session passed.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// 1-based positions of every barcode that differs from the first.
#[must_use]
pub fn mismatch_positions(barcodes: &[Barcode]) -> Vec<usize> {
    let Some(first) = barcodes.first() else {
        return Vec::new();
    };
    barcodes
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, barcode)| *barcode != first)
        .map(|(index, _)| index + 1)
        .collect()
}

/// What submitting one barcode did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The barcode opened a new session.
    Started,
    /// The barcode was added; more are needed.
    Pending { collected: usize, required: MatchCount },
    /// The barcode completed the session, which is now cleared.
    Decided(MatchDecision),
}

/// Session collector and decider.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    session: Vec<Barcode>,
    required: Option<MatchCount>,
    last_decision: Option<MatchDecision>,
}

impl MatchEngine {
    /// Create an engine with an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a barcode to the session.
    ///
    /// `current` is only consulted when the barcode opens a new session.
    pub fn submit(&mut self, barcode: Barcode, current: MatchCount) -> MatchOutcome {
        let required = *self.required.get_or_insert(current);
        self.session.push(barcode);

        if self.session.len() == 1 {
            return MatchOutcome::Started;
        }
        if self.session.len() < required.as_usize() {
            return MatchOutcome::Pending {
                collected: self.session.len(),
                required,
            };
        }

        let barcodes = std::mem::take(&mut self.session);
        self.required = None;
        let decision = MatchDecision::from_session(barcodes, required);
        self.last_decision = Some(decision.clone());
        MatchOutcome::Decided(decision)
    }

    /// Drop the in-progress session, returning how many barcodes it held.
    pub fn clear(&mut self) -> usize {
        self.required = None;
        let dropped = self.session.len();
        self.session.clear();
        dropped
    }

    /// Barcodes collected so far in the open session.
    pub fn session(&self) -> &[Barcode] {
        &self.session
    }

    /// Returns `true` if no session is open.
    pub fn is_idle(&self) -> bool {
        self.session.is_empty()
    }

    /// Required count of the open session, if any.
    pub fn required(&self) -> Option<MatchCount> {
        self.required
    }

    /// The most recent decision.
    pub fn last_decision(&self) -> Option<&MatchDecision> {
        self.last_decision.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn count(n: u8) -> MatchCount {
        MatchCount::new(n).unwrap()
    }

    fn submit_all(engine: &mut MatchEngine, barcodes: &[&str], n: u8) -> Vec<MatchOutcome> {
        barcodes
            .iter()
            .map(|b| engine.submit(Barcode::from(*b), count(n)))
            .collect()
    }

    #[test]
    fn test_two_identical_scans_pass() {
        let mut engine = MatchEngine::new();

        let outcomes = submit_all(&mut engine, &["ABC123", "ABC123"], 2);

        assert_eq!(outcomes[0], MatchOutcome::Started);
        match &outcomes[1] {
            MatchOutcome::Decided(decision) => {
                assert!(decision.is_pass());
                assert!(decision.mismatches.is_empty());
                assert_eq!(decision.barcodes.len(), 2);
            }
            other => panic!("expected decision, got {other:?}"),
        }
        assert!(engine.is_idle());
        assert_eq!(engine.required(), None);
    }

    #[test]
    fn test_second_scan_differs_fails_at_index_two() {
        let mut engine = MatchEngine::new();

        let outcomes = submit_all(&mut engine, &["ABC123", "XYZ999"], 2);

        match &outcomes[1] {
            MatchOutcome::Decided(decision) => {
                assert_eq!(decision.verdict, Verdict::Fail);
                assert_eq!(decision.mismatches, vec![2]);
            }
            other => panic!("expected decision, got {other:?}"),
        }
        assert!(engine.is_idle());
    }

    #[test]
    fn test_pending_until_required_count() {
        let mut engine = MatchEngine::new();

        let outcomes = submit_all(&mut engine, &["A", "A", "A"], 4);

        assert_eq!(outcomes[0], MatchOutcome::Started);
        assert_eq!(
            outcomes[1],
            MatchOutcome::Pending {
                collected: 2,
                required: count(4)
            }
        );
        assert_eq!(engine.session().len(), 3);
    }

    #[test]
    fn test_required_count_fixed_at_session_start() {
        let mut engine = MatchEngine::new();

        engine.submit(Barcode::from("A"), count(3));
        // A later, larger count does not stretch the open session
        engine.submit(Barcode::from("A"), count(8));
        let outcome = engine.submit(Barcode::from("A"), count(8));

        assert!(matches!(outcome, MatchOutcome::Decided(ref d) if d.required == count(3)));
    }

    #[test]
    fn test_clear_drops_session() {
        let mut engine = MatchEngine::new();
        submit_all(&mut engine, &["A", "B"], 5);

        assert_eq!(engine.clear(), 2);
        assert!(engine.is_idle());
        assert_eq!(engine.submit(Barcode::from("C"), count(2)), MatchOutcome::Started);
    }

    #[test]
    fn test_last_decision_is_retained() {
        let mut engine = MatchEngine::new();
        assert!(engine.last_decision().is_none());

        submit_all(&mut engine, &["Q", "Q"], 2);
        engine.submit(Barcode::from("R"), count(2));

        let last = engine.last_decision().unwrap();
        assert!(last.is_pass());
        assert_eq!(last.barcodes[0], "Q");
    }

    #[test]
    fn test_empty_barcodes_compare_like_any_other() {
        let mut engine = MatchEngine::new();

        let outcomes = submit_all(&mut engine, &["", ""], 2);
        assert!(matches!(outcomes[1], MatchOutcome::Decided(ref d) if d.is_pass()));

        let outcomes = submit_all(&mut engine, &["", "X"], 2);
        assert!(matches!(outcomes[1], MatchOutcome::Decided(ref d) if !d.is_pass()));
    }

    #[rstest]
    #[case(&["A", "A", "A"], &[])]
    #[case(&["A", "B", "A"], &[2])]
    #[case(&["A", "B", "C", "A", "D"], &[2, 3, 5])]
    #[case(&["A", "a"], &[2])]
    #[case(&[], &[])]
    fn test_mismatch_positions(#[case] barcodes: &[&str], #[case] expected: &[usize]) {
        let barcodes: Vec<Barcode> = barcodes.iter().map(|b| Barcode::from(*b)).collect();
        assert_eq!(mismatch_positions(&barcodes), expected);
    }

    #[test]
    fn test_decision_serialization() {
        let mut engine = MatchEngine::new();
        submit_all(&mut engine, &["1", "2"], 2);

        let decision = engine.last_decision().unwrap();
        let json = serde_json::to_value(decision).unwrap();

        assert_eq!(json["verdict"], "fail");
        assert_eq!(json["required"], 2);
        assert_eq!(json["mismatches"], serde_json::json!([2]));
    }
}
