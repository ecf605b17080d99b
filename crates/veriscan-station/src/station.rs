//! Station loop driver.
//!
//! [`Station`] owns every piece of mutable run state (decoder, line buffer,
//! mode machine, match session, counters) and wires it to the three
//! collaborators: an [`EventSource`], an [`IndicatorSink`] and a
//! [`ConfigStore`]. Each raw event is fully processed, including any
//! indicator pulse or blink, before the next one is read.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
use veriscan_core::{Barcode, MatchCount, Mode, RawKeyEvent};
use veriscan_hardware::{EventSource, IndicatorColor, IndicatorCommand, IndicatorSink};
use veriscan_storage::ConfigStore;

use crate::accumulator::BarcodeAccumulator;
use crate::config::StationConfig;
use crate::decoder::{KeyEventDecoder, ModifierState};
use crate::error::StationError;
use crate::match_engine::{MatchDecision, MatchEngine, MatchOutcome, Verdict};
use crate::state_machine::{Directive, MatchConfig, ModeStateMachine, ModeTransition};

/// Whether the loop should keep reading events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The quit token was read.
    Stop,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Completed lines processed, control barcodes included.
    pub barcodes: u64,
    pub passes: u64,
    pub fails: u64,
    /// Successful programming commits.
    pub commits: u64,
    /// Barcodes with no effect in the mode they arrived in.
    pub ignored: u64,
}

/// A verified-read station.
///
/// # Examples
///
/// ```
/// use veriscan_core::scan_keystrokes;
/// use veriscan_hardware::{NullIndicator, mock::MockScanner};
/// use veriscan_station::{Flow, Station, StationConfig};
/// use veriscan_storage::MemoryConfigStore;
///
/// #[tokio::main]
/// async fn main() {
///     let (scanner, _handle) = MockScanner::new();
///     let mut station = Station::start(
///         scanner,
///         NullIndicator,
///         MemoryConfigStore::new(),
///         StationConfig::default(),
///     )
///     .await;
///
///     for code in ["ABC123", "ABC123"] {
///         for event in scan_keystrokes(code) {
///             assert_eq!(station.process_event(event.into()).await, Flow::Continue);
///         }
///     }
///
///     assert_eq!(station.summary().passes, 1);
///     assert!(station.session().is_empty());
/// }
/// ```
#[derive(Debug)]
pub struct Station<S, I, C> {
    source: S,
    indicator: I,
    store: C,
    config: StationConfig,
    decoder: KeyEventDecoder,
    accumulator: BarcodeAccumulator,
    machine: ModeStateMachine,
    engine: MatchEngine,
    summary: RunSummary,
}

impl<S, I, C> Station<S, I, C>
where
    S: EventSource,
    I: IndicatorSink,
    C: ConfigStore,
{
    /// Create a station, loading the match count from `store`.
    ///
    /// The count is read once here and afterwards only changed by a
    /// successful commit. A store that cannot be read yields the default.
    pub async fn start(source: S, indicator: I, store: C, config: StationConfig) -> Self {
        let current = match store.load().await {
            Ok(count) => count,
            Err(e) => {
                warn!("Failed to load match count, using default: {}", e);
                MatchCount::default()
            }
        };
        info!("Station ready, match count {}", current);

        Self {
            source,
            indicator,
            store,
            config,
            decoder: KeyEventDecoder::new(),
            accumulator: BarcodeAccumulator::new(),
            machine: ModeStateMachine::new(current),
            engine: MatchEngine::new(),
            summary: RunSummary::default(),
        }
    }

    /// Process events until the quit token.
    ///
    /// # Errors
    ///
    /// Returns an error if the event source fails or disconnects. Nothing
    /// that happens while processing an event ends the run.
    pub async fn run(&mut self) -> Result<RunSummary, StationError> {
        match self.source.get_info().await {
            Ok(info) => info!("Reading from {} ({})", info.name, info.model),
            Err(e) => debug!("Event source info unavailable: {}", e),
        }

        loop {
            let raw = self.source.next_event().await?;
            if self.process_event(raw).await == Flow::Stop {
                break;
            }
        }

        info!(
            "Run finished: {} barcodes, {} passed, {} failed, {} commits",
            self.summary.barcodes, self.summary.passes, self.summary.fails, self.summary.commits
        );
        Ok(self.summary)
    }

    /// Process one raw event.
    ///
    /// Never fails; malformed and unrecognized events are skipped.
    pub async fn process_event(&mut self, raw: RawKeyEvent) -> Flow {
        trace!(
            "Event type={} code={} value={}",
            raw.event_type, raw.code, raw.value
        );

        let Some(decoded) = self.decoder.decode_raw(&raw) else {
            return Flow::Continue;
        };
        let Some(barcode) = self.accumulator.feed(decoded) else {
            return Flow::Continue;
        };

        self.decoder.reset();
        self.process_barcode(barcode).await
    }

    /// Process one completed barcode, as if it had just been scanned.
    pub async fn process_barcode(&mut self, barcode: Barcode) -> Flow {
        if barcode.is_empty() && !self.config.forward_empty_barcodes {
            debug!("Dropping empty line");
            return Flow::Continue;
        }

        self.summary.barcodes += 1;
        debug!("Read {:?} in {} mode", barcode.as_str(), self.machine.mode());

        match self.machine.interpret(barcode) {
            Directive::EnterProgramming => {
                self.drop_session("entering programming");
                self.signal(IndicatorCommand::AllOff).await;
                self.signal(IndicatorCommand::On {
                    color: IndicatorColor::Red,
                })
                .await;
            }
            Directive::Commit(count) => self.commit(count).await,
            Directive::Cancel => {
                self.drop_session("cancel");
                self.signal(IndicatorCommand::AllOff).await;
            }
            Directive::Quit => {
                info!("Quit requested");
                return Flow::Stop;
            }
            Directive::Staged(_) => {}
            Directive::Scan(barcode) => self.scan(barcode).await,
            Directive::Ignored(_) => self.summary.ignored += 1,
        }

        Flow::Continue
    }

    async fn commit(&mut self, count: MatchCount) {
        if let Err(e) = self.store.save(count).await {
            warn!("Failed to save match count {}: {}", count, e);
            self.signal(IndicatorCommand::Pulse {
                color: IndicatorColor::Red,
                duration: self.config.pulse_duration,
            })
            .await;
            return;
        }

        self.machine.complete_commit(count);
        self.engine.clear();
        self.summary.commits += 1;
        info!("Match count set to {}", count);

        self.signal(IndicatorCommand::AllOff).await;
        self.signal(IndicatorCommand::Blink {
            color: IndicatorColor::Green,
            times: count.get(),
        })
        .await;
    }

    async fn scan(&mut self, barcode: Barcode) {
        let current = self.machine.config().current;

        match self.engine.submit(barcode, current) {
            MatchOutcome::Started => {
                debug!("Session started, {} scans required", current);
                self.signal(IndicatorCommand::On {
                    color: IndicatorColor::Yellow,
                })
                .await;
            }
            MatchOutcome::Pending {
                collected,
                required,
            } => debug!("Session has {}/{} scans", collected, required),
            MatchOutcome::Decided(decision) => self.decide(&decision).await,
        }
    }

    async fn decide(&mut self, decision: &MatchDecision) {
        self.signal(IndicatorCommand::Off {
            color: IndicatorColor::Yellow,
        })
        .await;

        let color = match decision.verdict {
            Verdict::Pass => {
                self.summary.passes += 1;
                info!("PASS: {} matching scans", decision.required);
                IndicatorColor::Green
            }
            Verdict::Fail => {
                self.summary.fails += 1;
                info!("FAIL: mismatch at {:?}", decision.mismatches);
                IndicatorColor::Red
            }
        };

        self.signal(IndicatorCommand::Pulse {
            color,
            duration: self.config.pulse_duration,
        })
        .await;
    }

    fn drop_session(&mut self, reason: &str) {
        let dropped = self.engine.clear();
        if dropped > 0 {
            debug!("Dropped session of {} scans ({})", dropped, reason);
        }
    }

    /// Drive the indicator. Failures are logged and otherwise ignored.
    async fn signal(&mut self, command: IndicatorCommand) {
        let result = match command {
            IndicatorCommand::Pulse { color, duration } => {
                self.indicator.pulse(color, duration).await
            }
            IndicatorCommand::On { color } => self.indicator.set_on(color).await,
            IndicatorCommand::Off { color } => self.indicator.set_off(color).await,
            IndicatorCommand::Blink { color, times } => self.indicator.blink(color, times).await,
            IndicatorCommand::AllOff => self.indicator.all_off().await,
        };

        if let Err(e) = result {
            warn!("Indicator failed to {}: {}", command, e);
        }
    }
}

impl<S, I, C> Station<S, I, C> {
    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    /// Live and staged match counts.
    pub fn match_config(&self) -> MatchConfig {
        self.machine.config()
    }

    /// Match count driving live sessions.
    pub fn current(&self) -> MatchCount {
        self.machine.config().current
    }

    /// Match count staged in programming.
    pub fn working(&self) -> MatchCount {
        self.machine.config().working
    }

    /// Barcodes in the open session.
    pub fn session(&self) -> &[Barcode] {
        self.engine.session()
    }

    /// Characters of the line being scanned.
    pub fn pending_line(&self) -> &str {
        self.accumulator.pending()
    }

    /// The most recent pass/fail decision.
    pub fn last_decision(&self) -> Option<&MatchDecision> {
        self.engine.last_decision()
    }

    /// Modifier keys currently in effect.
    pub fn modifiers(&self) -> ModifierState {
        self.decoder.modifiers()
    }

    /// Recent mode transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ModeTransition> {
        self.machine.history().iter()
    }

    /// Counters so far.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Station settings.
    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// The configuration store.
    pub fn store(&self) -> &C {
        &self.store
    }
}
