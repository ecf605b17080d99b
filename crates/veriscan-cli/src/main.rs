//! Verified-read station.
//!
//! Reads scans as lines on stdin (one barcode per line, as a wedge scanner
//! piped through a terminal would deliver them), or straight from the
//! scanner's input device node with `--device`. Drives the indicator and
//! persists the match count.
//!
//! Usage:
//!     veriscan --store /var/lib/veriscan/current_match_mode.txt --indicator logging
//!     veriscan --device /dev/input/event2

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{BufReader, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use veriscan_core::RawKeyEvent;
use veriscan_core::constants::{DEFAULT_BLINK_INTERVAL_MS, DEFAULT_PULSE_MS, DEFAULT_STORE_FILE};
use veriscan_hardware::{
    AnyIndicator, DeviceInfo, EventSource, HardwareError, IndicatorKind, LineEventSource,
};
use veriscan_station::{RunSummary, Station, StationConfig};
use veriscan_storage::{FileConfigStore, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "veriscan", version, about = "N-way verified barcode read station")]
struct Args {
    /// File holding the persisted match mode token
    #[arg(long, env = "VERISCAN_STORE", default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,

    /// Read the scanner from this input device (e.g. /dev/input/event2)
    /// instead of stdin
    #[arg(long, env = "VERISCAN_DEVICE")]
    device: Option<PathBuf>,

    /// Indicator to drive: logging or none
    #[arg(long, default_value = "logging")]
    indicator: IndicatorKind,

    /// Pass/fail pulse length in milliseconds
    #[arg(long, default_value_t = DEFAULT_PULSE_MS)]
    pulse_ms: u64,

    /// Blink half-period in milliseconds
    #[arg(long, default_value_t = DEFAULT_BLINK_INTERVAL_MS)]
    blink_ms: u64,

    /// Drop empty lines instead of treating them as scans
    #[arg(long)]
    skip_empty: bool,

    /// Print the run summary as JSON on exit
    #[arg(long)]
    summary_json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "veriscan=debug"
    } else {
        "veriscan=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting veriscan {}", veriscan_core::VERSION);
    tracing::info!("  Store: {}", args.store.display());
    tracing::info!("  Indicator: {:?}", args.indicator);

    let source = ScanSource::open(args.device.as_deref())?;
    let info = source.get_info().await?;
    tracing::info!("  Scanner: {} ({})", info.name, info.path.as_deref().unwrap_or("-"));

    let indicator =
        AnyIndicator::with_blink_interval(args.indicator, Duration::from_millis(args.blink_ms));
    let store = FileConfigStore::new(StoreConfig::new(&args.store));
    let config = StationConfig::new()
        .pulse_duration(Duration::from_millis(args.pulse_ms))
        .forward_empty_barcodes(!args.skip_empty);

    let mut station = Station::start(source, indicator, store, config).await;

    let summary = match station.run().await {
        Ok(summary) => summary,
        Err(e) if e.is_disconnect() => {
            tracing::info!("Scanner closed: {}", e);
            station.summary()
        }
        Err(e) => return Err(e).context("station stopped"),
    };

    if args.summary_json {
        print_summary(&summary)?;
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to encode run summary")?;
    println!("{json}");
    Ok(())
}

/// Where scans come from.
enum ScanSource {
    Stdin(LineEventSource<BufReader<Stdin>>),
    #[cfg(feature = "evdev")]
    Device(veriscan_hardware::EvdevEventSource),
}

impl ScanSource {
    fn open(device: Option<&std::path::Path>) -> anyhow::Result<Self> {
        let Some(path) = device else {
            return Ok(Self::Stdin(LineEventSource::with_name(
                BufReader::new(tokio::io::stdin()),
                "stdin",
            )));
        };

        #[cfg(feature = "evdev")]
        {
            let source = veriscan_hardware::EvdevEventSource::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Self::Device(source))
        }

        #[cfg(not(feature = "evdev"))]
        {
            Err(HardwareError::unsupported(format!(
                "reading {} (built without the evdev feature)",
                path.display()
            ))
            .into())
        }
    }
}

impl EventSource for ScanSource {
    async fn next_event(&mut self) -> Result<RawKeyEvent, HardwareError> {
        match self {
            Self::Stdin(source) => source.next_event().await,
            #[cfg(feature = "evdev")]
            Self::Device(source) => source.next_event().await,
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo, HardwareError> {
        match self {
            Self::Stdin(source) => source.get_info().await,
            #[cfg(feature = "evdev")]
            Self::Device(source) => source.get_info().await,
        }
    }
}
