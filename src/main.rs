//! # CRSF Link
//!
//! Monitor a CRSF serial link to an ExpressLRS transmitter module.
//!
//! This application opens the configured serial port, logs RC channel sets
//! and device parameter entries as they arrive, and optionally pings the
//! configured device so it announces itself.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crsf_link::config::{Config, LoggingConfig};
use crsf_link::crsf::decoder::decode_rc_channels_frame;
use crsf_link::crsf::parameter::ParameterEntry;
use crsf_link::crsf::protocol::{frame_type, CrsfFrame};
use crsf_link::serial::CrsfSession;

/// Configuration file used when none is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the CRSF link monitor
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load configuration (first argument, or `config/default.toml`)
///    - Set up logging, to stdout or a daily rolling file
///    - Open the serial port and start a session
///
/// 2. **Monitoring**
///    - Log every received frame
///    - Ping the configured device if `ping_on_connect` is set
///
/// 3. **Shutdown**
///    - On Ctrl+C, or when the device goes away
///    - Close the session and log deframer counters
///
/// # Errors
///
/// Returns error if:
/// - Configuration cannot be loaded or is invalid
/// - Serial port cannot be opened
/// - The link ended with a transport fault
///
/// # Examples
///
/// ```bash
/// cargo run --release -- config/default.toml
/// ```
///
/// Expected output:
/// ```text
/// INFO crsf_link: CRSF Link v0.1.0 starting...
/// INFO crsf_link::serial: Opened /dev/ttyACM0 at 115200 baud
/// INFO crsf_link: Parameter 1 'Packet Rate' (TextSelection), 5 chunks remaining
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    // Keep the guard alive so buffered file output is flushed on exit
    let _log_guard = init_logging(&config.logging)?;

    info!("CRSF Link v{} starting...", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", config);

    let session = CrsfSession::open(&config)?;
    session.register(Arc::new(log_frame));

    if config.link.ping_on_connect {
        if let Err(e) = session.ping().await {
            warn!("Failed to ping device 0x{:02X}: {}", config.link.device_address, e);
        }
    }

    info!("Press Ctrl+C to exit");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = session.reader_stopped() => {
            warn!("Link reader stopped, shutting down...");
        }
    }

    let stats = session.close().await?;
    info!(
        "Received {} frames ({} CRC errors, {} bytes discarded)",
        stats.frames, stats.crc_errors, stats.discarded_bytes
    );

    Ok(())
}

/// Install the tracing subscriber
///
/// `RUST_LOG` overrides the configured level.
fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let Some(file) = &config.file else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return Ok(None);
    };

    let path = Path::new(file);
    let Some(file_name) = path.file_name() else {
        bail!("Log file path '{}' has no file name", file);
    };
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = tracing_appender::rolling::daily(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}

fn log_frame(frame: &CrsfFrame) {
    match frame.frame_type {
        frame_type::PARAMETER_SETTINGS_ENTRY | frame_type::DEVICE_INFO => {
            info!("{}", describe_frame(frame))
        }
        _ => debug!("{}", describe_frame(frame)),
    }
}

/// One-line human readable summary of a frame
fn describe_frame(frame: &CrsfFrame) -> String {
    match frame.frame_type {
        frame_type::RC_CHANNELS_PACKED => match decode_rc_channels_frame(frame) {
            Ok(channels) => format!("RC channels {:?}", channels),
            Err(e) => format!("Bad RC channels frame: {}", e),
        },
        frame_type::PARAMETER_SETTINGS_ENTRY => match ParameterEntry::from_frame(frame) {
            Ok(entry) => format!(
                "Parameter {} '{}' ({:?}), {} chunks remaining",
                entry.field_index,
                entry.record.name,
                entry.record.kind(),
                entry.chunks_remaining
            ),
            Err(e) => format!("Bad parameter entry: {}", e),
        },
        frame_type::DEVICE_INFO => {
            let end = frame.payload.iter().position(|&b| b == 0).unwrap_or(frame.payload.len());
            format!(
                "Device 0x{:02X} is '{}'",
                frame.origin,
                String::from_utf8_lossy(&frame.payload[..end])
            )
        }
        other => format!(
            "Frame type 0x{:02X} from 0x{:02X} to 0x{:02X} ({} bytes)",
            other,
            frame.origin,
            frame.destination,
            frame.payload.len()
        ),
    }
}
