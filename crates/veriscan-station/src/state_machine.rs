//! Scan/Programming mode state machine.
//!
//! Interprets each completed barcode against the control vocabulary and
//! tells the station what to do with it. The machine owns the mode and the
//! match configuration; it never touches the indicator, the store or the
//! session itself.
//!
//! # Transitions
//!
//! | Barcode | In Scan | In Programming |
//! |---------|---------|----------------|
//! | `__BEGINPROG__` | → Programming | → Programming (re-entry) |
//! | `__ENDPROG__` | ignored | commit, then → Scan |
//! | `__CANCEL__` | cancel | cancel |
//! | `__STOP__` | quit | quit |
//! | `__MATCH0N__` | scan data | stage N |
//! | anything else | scan data | ignored |
//!
//! A commit is two-phase: [`Directive::Commit`] asks the station to persist
//! the staged count, and only [`ModeStateMachine::complete_commit`] makes it
//! current and returns to Scan. A failed save leaves the machine in
//! Programming with the count still staged.
//!
//! # Examples
//!
//! ```
//! use veriscan_core::{Barcode, MatchCount, Mode};
//! use veriscan_station::{Directive, ModeStateMachine};
//!
//! let mut machine = ModeStateMachine::new(MatchCount::default());
//!
//! assert_eq!(machine.interpret(Barcode::from("__BEGINPROG__")), Directive::EnterProgramming);
//! machine.interpret(Barcode::from("__MATCH05__"));
//!
//! let five = MatchCount::new(5).unwrap();
//! assert_eq!(machine.interpret(Barcode::from("__ENDPROG__")), Directive::Commit(five));
//!
//! machine.complete_commit(five);
//! assert_eq!(machine.mode(), Mode::Scan);
//! assert_eq!(machine.config().current, five);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use veriscan_core::{Barcode, ControlToken, MatchCount, Mode};

/// Maximum number of mode transitions to keep in history.
const MAX_HISTORY_SIZE: usize = 100;

/// The live and staged match counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Count driving live sessions; mirrors the persisted value.
    pub current: MatchCount,

    /// Count staged during programming, committed by `__ENDPROG__`.
    pub working: MatchCount,
}

impl MatchConfig {
    /// Start with nothing staged.
    pub fn new(current: MatchCount) -> Self {
        Self {
            current,
            working: current,
        }
    }
}

/// What the station should do with a barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Mode is now Programming. Clear the session, show programming.
    EnterProgramming,

    /// Persist this count, then call [`ModeStateMachine::complete_commit`].
    Commit(MatchCount),

    /// Clear the session and turn indicators off. Mode unchanged.
    Cancel,

    /// Stop processing.
    Quit,

    /// A new count is staged; nothing persisted yet.
    Staged(MatchCount),

    /// Forward to the match engine.
    Scan(Barcode),

    /// Nothing to do.
    Ignored(Barcode),
}

/// A recorded mode change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,

    /// Control token that caused the change.
    pub trigger: ControlToken,

    /// Not serialized; set to the time of deserialization.
    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl ModeTransition {
    fn new(from: Mode, to: Mode, trigger: ControlToken) -> Self {
        Self {
            from,
            to,
            trigger,
            timestamp: Instant::now(),
        }
    }

    /// Time since the transition happened.
    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

/// Control barcode interpreter.
///
/// Owned by the station and only touched from its task.
#[derive(Debug, Clone)]
pub struct ModeStateMachine {
    mode: Mode,
    config: MatchConfig,
    history: VecDeque<ModeTransition>,
}

impl ModeStateMachine {
    /// Create a machine in Scan mode with `current` loaded from storage.
    pub fn new(current: MatchCount) -> Self {
        Self {
            mode: Mode::Scan,
            config: MatchConfig::new(current),
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Interpret one completed barcode.
    pub fn interpret(&mut self, barcode: Barcode) -> Directive {
        let Some(token) = ControlToken::parse(barcode.as_str()) else {
            return match self.mode {
                Mode::Scan => Directive::Scan(barcode),
                Mode::Programming => {
                    debug!("Ignoring {:?} while programming", barcode.as_str());
                    Directive::Ignored(barcode)
                }
            };
        };

        match (token, self.mode) {
            (ControlToken::BeginProgramming, from) => {
                if from.is_scan() {
                    self.config.working = self.config.current;
                }
                self.change_mode(Mode::Programming, token);
                Directive::EnterProgramming
            }
            (ControlToken::EndProgramming, Mode::Programming) => {
                Directive::Commit(self.config.working)
            }
            (ControlToken::EndProgramming, Mode::Scan) => {
                debug!("End of programming outside programming mode");
                Directive::Ignored(barcode)
            }
            (ControlToken::Cancel, _) => Directive::Cancel,
            (ControlToken::Quit, _) => Directive::Quit,
            (ControlToken::Match(count), Mode::Programming) => {
                info!("Staged match count {}", count);
                self.config.working = count;
                Directive::Staged(count)
            }
            // Match tokens are ordinary data outside programming
            (ControlToken::Match(_), Mode::Scan) => Directive::Scan(barcode),
        }
    }

    /// Make a persisted count current and return to Scan.
    pub fn complete_commit(&mut self, count: MatchCount) {
        self.config = MatchConfig::new(count);
        self.change_mode(Mode::Scan, ControlToken::EndProgramming);
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Live and staged match counts.
    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Recent mode transitions, oldest first.
    pub fn history(&self) -> &VecDeque<ModeTransition> {
        &self.history
    }

    fn change_mode(&mut self, to: Mode, trigger: ControlToken) {
        info!("Mode {} -> {} ({})", self.mode, to, trigger);
        let transition = ModeTransition::new(self.mode, to, trigger);
        self.mode = to;

        self.history.push_back(transition);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

impl Default for ModeStateMachine {
    fn default() -> Self {
        Self::new(MatchCount::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn count(n: u8) -> MatchCount {
        MatchCount::new(n).unwrap()
    }

    fn feed(machine: &mut ModeStateMachine, barcode: &str) -> Directive {
        machine.interpret(Barcode::from(barcode))
    }

    fn programming() -> ModeStateMachine {
        let mut machine = ModeStateMachine::default();
        feed(&mut machine, "__BEGINPROG__");
        machine
    }

    #[test]
    fn test_starts_in_scan() {
        let machine = ModeStateMachine::new(count(3));
        assert_eq!(machine.mode(), Mode::Scan);
        assert_eq!(machine.config(), MatchConfig::new(count(3)));
        assert!(machine.history().is_empty());
    }

    #[test]
    fn test_begin_programming_from_scan() {
        let mut machine = ModeStateMachine::default();

        assert_eq!(feed(&mut machine, "__BEGINPROG__"), Directive::EnterProgramming);
        assert_eq!(machine.mode(), Mode::Programming);

        let transition = machine.history().back().unwrap();
        assert_eq!(transition.from, Mode::Scan);
        assert_eq!(transition.to, Mode::Programming);
        assert_eq!(transition.trigger, ControlToken::BeginProgramming);
    }

    #[test]
    fn test_begin_programming_reentry_keeps_staged_count() {
        let mut machine = programming();
        feed(&mut machine, "__MATCH06__");

        assert_eq!(feed(&mut machine, "__BEGINPROG__"), Directive::EnterProgramming);
        assert_eq!(machine.mode(), Mode::Programming);
        assert_eq!(machine.config().working, count(6));
    }

    #[test]
    fn test_full_programming_flow() {
        let mut machine = programming();

        assert_eq!(feed(&mut machine, "__MATCH05__"), Directive::Staged(count(5)));
        assert_eq!(machine.config().current, count(2));

        assert_eq!(feed(&mut machine, "__ENDPROG__"), Directive::Commit(count(5)));
        assert_eq!(machine.mode(), Mode::Programming);

        machine.complete_commit(count(5));
        assert_eq!(machine.mode(), Mode::Scan);
        assert_eq!(machine.config(), MatchConfig::new(count(5)));
        assert_eq!(machine.history().len(), 2);
    }

    #[test]
    fn test_end_without_staging_commits_current() {
        let mut machine = ModeStateMachine::new(count(4));
        feed(&mut machine, "__BEGINPROG__");

        assert_eq!(feed(&mut machine, "__ENDPROG__"), Directive::Commit(count(4)));
    }

    #[test]
    fn test_end_programming_ignored_in_scan() {
        let mut machine = ModeStateMachine::default();

        assert!(matches!(feed(&mut machine, "__ENDPROG__"), Directive::Ignored(_)));
        assert_eq!(machine.mode(), Mode::Scan);
        assert!(machine.history().is_empty());
    }

    #[rstest]
    #[case(Mode::Scan)]
    #[case(Mode::Programming)]
    fn test_cancel_and_quit_keep_mode(#[case] mode: Mode) {
        let mut machine = if mode.is_programming() {
            programming()
        } else {
            ModeStateMachine::default()
        };

        assert_eq!(feed(&mut machine, "__CANCEL__"), Directive::Cancel);
        assert_eq!(machine.mode(), mode);
        assert_eq!(feed(&mut machine, "__STOP__"), Directive::Quit);
        assert_eq!(machine.mode(), mode);
    }

    #[test]
    fn test_match_token_in_scan_is_scan_data() {
        let mut machine = ModeStateMachine::default();

        assert_eq!(
            feed(&mut machine, "__MATCH07__"),
            Directive::Scan(Barcode::from("__MATCH07__"))
        );
        assert_eq!(machine.config().working, count(2));
    }

    #[test]
    fn test_ordinary_barcode_routing() {
        let mut machine = ModeStateMachine::default();
        assert_eq!(
            feed(&mut machine, "ABC123"),
            Directive::Scan(Barcode::from("ABC123"))
        );

        let mut machine = programming();
        assert_eq!(
            feed(&mut machine, "ABC123"),
            Directive::Ignored(Barcode::from("ABC123"))
        );
    }

    #[test]
    fn test_cancel_in_programming_keeps_staged_count() {
        let mut machine = programming();
        feed(&mut machine, "__MATCH03__");
        feed(&mut machine, "__CANCEL__");

        assert_eq!(feed(&mut machine, "__ENDPROG__"), Directive::Commit(count(3)));
    }

    #[test]
    fn test_history_size_limit() {
        let mut machine = ModeStateMachine::default();

        for _ in 0..(MAX_HISTORY_SIZE + 10) {
            feed(&mut machine, "__BEGINPROG__");
        }

        assert_eq!(machine.history().len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_transition_serialization() {
        let mut machine = ModeStateMachine::default();
        feed(&mut machine, "__BEGINPROG__");

        let transition = machine.history().back().unwrap();
        let json = serde_json::to_string(transition).unwrap();
        let back: ModeTransition = serde_json::from_str(&json).unwrap();

        assert_eq!(back.from, Mode::Scan);
        assert_eq!(back.to, Mode::Programming);
        assert_eq!(back.trigger, ControlToken::BeginProgramming);
    }
}
