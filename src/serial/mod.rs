//! # Serial Link Session
//!
//! Runs the CRSF engine over a byte stream.
//!
//! This module handles:
//! - Opening a serial port with CRSF settings (8N1, configured baud rate)
//! - A reader task that deframes incoming bytes and dispatches frames
//! - An exclusive writer path for outbound frames
//! - Orderly shutdown of both directions
//!
//! A session owns all link state. Nothing survives a disconnect: the carry-over
//! buffer is dropped with the reader task, and a new session starts empty.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{Config, LinkConfig, SerialConfig};
use crate::crsf::deframer::{Deframer, DeframerStats};
use crate::crsf::dispatcher::{FrameDispatcher, FrameHandler, Subscription};
use crate::crsf::encoder::{
    device_ping_frame, encode_frame, parameter_read_frame, parameter_write_frame,
};
use crate::crsf::parameter::ParameterValue;
use crate::crsf::protocol::CrsfFrame;
use crate::error::{CrsfError, Result};

/// Read chunk size used when none is configured
pub const DEFAULT_READ_BUFFER_SIZE: usize = 256;

/// Open a serial port with CRSF settings
///
/// # Errors
///
/// Returns [`CrsfError::Serial`] if the port cannot be opened.
pub fn open_serial_port(config: &SerialConfig) -> Result<tokio_serial::SerialStream> {
    use tokio_serial::SerialPortBuilderExt;

    let port = tokio_serial::new(&config.port, config.baud_rate)
        .data_bits(tokio_serial::DataBits::Eight)
        .parity(tokio_serial::Parity::None)
        .stop_bits(tokio_serial::StopBits::One)
        .flow_control(tokio_serial::FlowControl::None)
        .open_native_async()
        .map_err(|e| CrsfError::Serial(format!("Failed to open {}: {}", config.port, e)))?;

    Ok(port)
}

/// One open CRSF link
///
/// Frames read from the stream are delivered, in stream order, to handlers
/// registered on the session's [`FrameDispatcher`].
pub struct CrsfSession<T> {
    link: LinkConfig,
    dispatcher: Arc<FrameDispatcher>,
    writer: Mutex<Option<WriteHalf<T>>>,
    reader: Mutex<Option<JoinHandle<Result<DeframerStats>>>>,
    shutdown: watch::Sender<bool>,
    running: watch::Receiver<bool>,
}

impl<T> std::fmt::Debug for CrsfSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrsfSession")
            .field("link", &self.link)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl CrsfSession<tokio_serial::SerialStream> {
    /// Open the configured serial port and start a session on it
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use crsf_link::config::Config;
    /// use crsf_link::serial::CrsfSession;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let config = Config::load("config/default.toml")?;
    ///     let session = CrsfSession::open(&config)?;
    ///     session.ping().await?;
    ///     session.close().await?;
    ///     Ok(())
    /// }
    /// ```
    pub fn open(config: &Config) -> Result<Self> {
        let port = open_serial_port(&config.serial)?;
        info!(
            "Opened {} at {} baud",
            config.serial.port, config.serial.baud_rate
        );
        Ok(Self::with_buffer_size(
            port,
            config.link.clone(),
            config.serial.read_buffer_size,
        ))
    }
}

impl<T> CrsfSession<T>
where
    T: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Start a session over any byte stream
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(stream: T, link: LinkConfig) -> Self {
        Self::with_buffer_size(stream, link, DEFAULT_READ_BUFFER_SIZE)
    }

    /// Start a session reading at most `read_buffer_size` bytes per read
    pub fn with_buffer_size(stream: T, link: LinkConfig, read_buffer_size: usize) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        let dispatcher = Arc::new(FrameDispatcher::new());
        let (shutdown, shutdown_rx) = watch::channel(false);
        let (running_tx, running) = watch::channel(true);

        let task_dispatcher = Arc::clone(&dispatcher);
        let reader = tokio::spawn(async move {
            // Dropped on return, panic or abort alike
            let _running = RunningFlag(running_tx);
            read_loop(read_half, task_dispatcher, shutdown_rx, read_buffer_size.max(1)).await
        });

        debug!("CRSF session started");

        Self {
            link,
            dispatcher,
            writer: Mutex::new(Some(write_half)),
            reader: Mutex::new(Some(reader)),
            shutdown,
            running,
        }
    }

    /// Handler registry of this session
    pub fn dispatcher(&self) -> &Arc<FrameDispatcher> {
        &self.dispatcher
    }

    pub fn register(&self, handler: Arc<dyn FrameHandler>) -> Subscription {
        self.dispatcher.register(handler)
    }

    pub fn unregister(&self, subscription: Subscription) -> bool {
        self.dispatcher.unregister(subscription)
    }

    /// Addresses used by the request helpers
    pub fn link(&self) -> &LinkConfig {
        &self.link
    }

    /// Encode and write one frame
    ///
    /// Holds exclusive write access until the frame is flushed.
    ///
    /// # Errors
    ///
    /// Returns [`CrsfError::ConnectionClosed`] after [`close`](Self::close),
    /// or the transport error if the write fails.
    pub async fn send_frame(&self, frame: &CrsfFrame) -> Result<()> {
        let bytes = encode_frame(frame)?;

        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(CrsfError::ConnectionClosed)?;

        writer.write_all(&bytes).await?;
        writer.flush().await?;

        debug!(
            "Sent CRSF frame type 0x{:02X} ({} bytes)",
            frame.frame_type,
            bytes.len()
        );
        Ok(())
    }

    /// Ping the configured device
    pub async fn ping(&self) -> Result<()> {
        let frame = device_ping_frame(self.link.device_address, self.link.origin_address);
        self.send_frame(&frame).await
    }

    /// Request one chunk of a parameter entry from the configured device
    pub async fn read_parameter(&self, field_index: u8, chunk_index: u8) -> Result<()> {
        let frame = parameter_read_frame(
            self.link.device_address,
            self.link.origin_address,
            field_index,
            chunk_index,
        );
        self.send_frame(&frame).await
    }

    /// Write a new parameter value to the configured device
    pub async fn write_parameter(&self, field_index: u8, value: &ParameterValue) -> Result<()> {
        let frame = parameter_write_frame(
            self.link.device_address,
            self.link.origin_address,
            field_index,
            value,
        )?;
        self.send_frame(&frame).await
    }

    /// Whether the reader task is still running
    pub fn is_reading(&self) -> bool {
        *self.running.borrow()
    }

    /// Wait until the reader task stops (peer closed, transport fault or close)
    pub async fn reader_stopped(&self) {
        let mut running = self.running.clone();
        while *running.borrow_and_update() {
            if running.changed().await.is_err() {
                break;
            }
        }
    }

    /// Stop reading, release the writer and shut the stream down
    ///
    /// A pending read is cancelled immediately and any partial frame is
    /// discarded. Waits for an in-flight write to finish before closing the
    /// output side. Calling `close` again is a no-op returning default stats.
    ///
    /// # Errors
    ///
    /// Returns the transport error that ended the reader task, if any, or
    /// [`CrsfError::Io`] if the task panicked. The writer is released either way.
    pub async fn close(&self) -> Result<DeframerStats> {
        let _ = self.shutdown.send(true);

        let handle = self.reader.lock().await.take();
        let joined = match handle {
            Some(handle) => Some(handle.await),
            None => None,
        };

        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Err(e) = writer.shutdown().await {
                debug!("Writer shutdown failed: {}", e);
            }
        }

        info!("CRSF session closed");

        match joined {
            Some(Ok(result)) => result,
            Some(Err(e)) => {
                warn!("Reader task failed: {}", e);
                Err(std::io::Error::other(e).into())
            }
            None => Ok(DeframerStats::default()),
        }
    }
}

/// Clears the session's running flag when the reader task ends
struct RunningFlag(watch::Sender<bool>);

impl Drop for RunningFlag {
    fn drop(&mut self) {
        let _ = self.0.send(false);
    }
}

async fn read_loop<R>(
    mut reader: ReadHalf<R>,
    dispatcher: Arc<FrameDispatcher>,
    mut shutdown: watch::Receiver<bool>,
    read_buffer_size: usize,
) -> Result<DeframerStats>
where
    R: AsyncRead,
{
    let mut deframer = Deframer::new();
    let mut chunk = vec![0u8; read_buffer_size];

    loop {
        let read = tokio::select! {
            biased;
            _ = shutdown.changed() => {
                debug!("Reader stopping, {} buffered bytes dropped", deframer.pending());
                break;
            }
            read = reader.read(&mut chunk) => read,
        };

        let n = match read {
            Ok(0) => {
                info!("Stream closed by peer");
                break;
            }
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Read failed: {}", e);
                return Err(e.into());
            }
        };

        for result in deframer.feed(&chunk[..n]) {
            match result {
                Ok(frame) => dispatcher.dispatch(&frame),
                Err(e) => debug!("Undecodable frame: {}", e),
            }
        }
    }

    Ok(deframer.stats())
}
