//! Verified-read station core.
//!
//! Turns the raw key events of a keyboard-emulating barcode scanner into
//! pass/fail decisions: a session passes when the configured number of
//! consecutive scans are identical. Operators change that number by
//! scanning control barcodes.
//!
//! The pipeline, leaves first:
//!
//! - [`KeyEventDecoder`] - key events to characters and line terminators
//! - [`BarcodeAccumulator`] - characters to completed barcodes
//! - [`ModeStateMachine`] - control barcode interpretation (Scan/Programming)
//! - [`MatchEngine`] - N-way session collection and decision
//! - [`Station`] - owns all of the above and drives the collaborators
//!
//! # Example
//!
//! ```no_run
//! use tokio::io::BufReader;
//! use veriscan_hardware::{LineEventSource, LoggingIndicator};
//! use veriscan_station::{Station, StationConfig};
//! use veriscan_storage::{FileConfigStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = LineEventSource::new(BufReader::new(tokio::io::stdin()));
//! let store = FileConfigStore::new(StoreConfig::default());
//!
//! let mut station =
//!     Station::start(source, LoggingIndicator::new(), store, StationConfig::default()).await;
//! let summary = station.run().await?;
//! println!("{} passed, {} failed", summary.passes, summary.fails);
//! # Ok(())
//! # }
//! ```

pub mod accumulator;
pub mod config;
pub mod decoder;
pub mod error;
pub mod match_engine;
pub mod state_machine;
pub mod station;

pub use accumulator::BarcodeAccumulator;
pub use config::StationConfig;
pub use decoder::{Decoded, KeyEventDecoder, ModifierState};
pub use error::StationError;
pub use match_engine::{MatchDecision, MatchEngine, MatchOutcome, Verdict, mismatch_positions};
pub use state_machine::{Directive, MatchConfig, ModeStateMachine, ModeTransition};
pub use station::{Flow, RunSummary, Station};
