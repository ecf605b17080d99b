//! Common test utilities for station integration tests.
//!
//! [`Harness`] wires a station to a mock scanner, a mock indicator and an
//! in-memory store, and keeps the handles so tests can drive input and
//! inspect every side effect.

#![allow(dead_code)]

use std::time::Duration;

use veriscan_core::{MatchCount, scan_keystrokes};
use veriscan_hardware::IndicatorCommand;
use veriscan_hardware::mock::{MockIndicator, MockIndicatorHandle, MockScanner, MockScannerHandle};
use veriscan_station::{Flow, Station, StationConfig};
use veriscan_storage::MemoryConfigStore;

pub type MockStation = Station<MockScanner, MockIndicator, MemoryConfigStore>;

/// Pulse duration used by harness stations, so assertions can name it.
pub const PULSE: Duration = Duration::from_millis(1000);

pub struct Harness {
    pub station: MockStation,
    pub scanner: MockScannerHandle,
    pub indicator: MockIndicatorHandle,
    pub store: MemoryConfigStore,
}

impl Harness {
    /// Station with `current` already persisted.
    pub async fn with_count(current: u8) -> Self {
        Self::with_config(current, StationConfig::new().pulse_duration(PULSE)).await
    }

    pub async fn with_config(current: u8, config: StationConfig) -> Self {
        let (scanner, scanner_handle) = MockScanner::new();
        let (indicator, indicator_handle) = MockIndicator::new();
        let store = MemoryConfigStore::with_count(count(current));

        let station = Station::start(scanner, indicator, store.clone(), config).await;

        Self {
            station,
            scanner: scanner_handle,
            indicator: indicator_handle,
            store,
        }
    }

    /// Feed a full scan through `process_event`, returning the last flow.
    pub async fn scan(&mut self, barcode: &str) -> Flow {
        let mut flow = Flow::Continue;
        for event in scan_keystrokes(barcode) {
            flow = self.station.process_event(event.into()).await;
        }
        flow
    }

    /// Feed several scans in order.
    pub async fn scan_all(&mut self, barcodes: &[&str]) {
        for barcode in barcodes {
            self.scan(barcode).await;
        }
    }

    /// Indicator commands since the last call.
    pub fn take_commands(&self) -> Vec<IndicatorCommand> {
        self.indicator.take_commands()
    }
}

pub fn count(n: u8) -> MatchCount {
    MatchCount::new(n).unwrap()
}
