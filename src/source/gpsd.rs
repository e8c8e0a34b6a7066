//! gpsd session over a byte stream.
//!
//! gpsd speaks newline-delimited JSON. The session drives a tokio
//! current-thread runtime with `block_on`, so callers see plain blocking
//! calls and nothing runs in the background.
//!
//! Every read is bounded in time. A line that arrives in pieces is collected
//! across calls, so a daemon that stalls mid-line cannot hold the caller
//! past its wait.

use std::time::Duration;

use serde::Serialize;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::TcpStream;
use tokio::runtime::{Builder, Runtime};

use super::{FixSource, Report, Transport};
use crate::error::Error;

/// Longest line accepted from gpsd. Real reports are a few kilobytes.
const MAX_LINE_LENGTH: usize = 64 * 1024;

/// How long `read_next` waits for a line that `wait_ready` has not buffered.
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Body of a `?WATCH=` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Watch {
    pub enable: bool,
    pub json: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl Watch {
    /// Stream JSON reports, optionally from a single receiver.
    pub fn json(device: Option<String>) -> Self {
        Self {
            enable: true,
            json: true,
            device,
        }
    }

    /// The command line as sent to gpsd.
    pub fn command(&self) -> Result<String, Error> {
        let body = serde_json::to_string(self)
            .map_err(|e| Error::TransportFailure(format!("encoding WATCH: {}", e)))?;
        Ok(format!("?WATCH={};\n", body))
    }
}

/// An open session with gpsd.
///
/// Generic over the stream so tests can substitute an in-memory one.
#[derive(Debug)]
pub struct GpsdSession<S = TcpStream> {
    // Dropped before the runtime that drives it.
    reader: BufReader<S>,
    runtime: Runtime,
    // The line being assembled, kept across waits that time out.
    line: Vec<u8>,
    at_eof: bool,
    description: String,
}

impl GpsdSession<TcpStream> {
    /// Connect to gpsd at the given source.
    pub fn open(source: &FixSource) -> Result<Self, Error> {
        let address = source.address();
        let runtime = build_runtime().map_err(|e| Error::ConnectionFailure(e.to_string()))?;

        tracing::debug!("Connecting to {}...", address);
        let stream = runtime
            .block_on(TcpStream::connect((source.server.as_str(), source.port)))
            .map_err(|e| Error::ConnectionFailure(format!("{}: {}", address, e)))?;
        tracing::info!("Connected to gpsd at {}", address);

        Ok(Self::from_parts(runtime, stream, &address))
    }
}

impl<S> GpsdSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already connected stream.
    pub fn from_stream(stream: S, description: &str) -> Result<Self, Error> {
        let runtime = build_runtime().map_err(|e| Error::ConnectionFailure(e.to_string()))?;
        Ok(Self::from_parts(runtime, stream, description))
    }

    fn from_parts(runtime: Runtime, stream: S, description: &str) -> Self {
        Self {
            reader: BufReader::new(stream),
            runtime,
            line: Vec::new(),
            at_eof: false,
            description: format!("gpsd: {}", description),
        }
    }

    /// Returns a human-readable description of the session.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Ask gpsd to start streaming reports.
    pub fn subscribe(&mut self, watch: &Watch) -> Result<(), Error> {
        let command = watch.command()?;
        tracing::debug!("Sending {}", command.trim_end());

        let Self { reader, runtime, .. } = self;
        runtime.block_on(async {
            let stream = reader.get_mut();
            stream.write_all(command.as_bytes()).await?;
            stream.flush().await
        })?;
        Ok(())
    }

    /// Buffer one complete line, waiting at most `timeout`.
    ///
    /// Returns `false` when the line is still incomplete as time runs out;
    /// the bytes read so far stay buffered. End of stream counts as
    /// complete and is reported by `read_next`.
    fn fill_line(&mut self, timeout: Duration) -> Result<bool, Error> {
        if self.at_eof || self.line.ends_with(b"\n") {
            return Ok(true);
        }
        if self.line.len() > MAX_LINE_LENGTH {
            return Err(line_too_long());
        }

        let Self {
            reader,
            runtime,
            line,
            at_eof,
            ..
        } = self;
        let room = (MAX_LINE_LENGTH + 1 - line.len()) as u64;
        let read = runtime.block_on(async {
            let mut limited = (&mut *reader).take(room);
            tokio::time::timeout(timeout, limited.read_until(b'\n', line)).await
        });

        match read {
            Err(_elapsed) => Ok(false),
            Ok(Err(e)) => Err(e.into()),
            Ok(Ok(_)) if line.ends_with(b"\n") => Ok(true),
            Ok(Ok(_)) if line.len() > MAX_LINE_LENGTH => Err(line_too_long()),
            Ok(Ok(_)) => {
                *at_eof = true;
                Ok(true)
            }
        }
    }
}

impl<S> Transport for GpsdSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn wait_ready(&mut self, timeout: Duration) -> Result<bool, Error> {
        self.fill_line(timeout)
    }

    fn read_next(&mut self) -> Result<Report, Error> {
        if !self.fill_line(READ_TIMEOUT)? {
            return Err(Error::TransportFailure("incomplete line from gpsd".to_string()));
        }

        let line = std::mem::take(&mut self.line);
        if !line.ends_with(b"\n") {
            return Err(Error::TransportFailure("connection closed by gpsd".to_string()));
        }

        serde_json::from_slice(&line)
            .map_err(|e| Error::TransportFailure(format!("Parse error: {}", e)))
    }

    fn close(self) {
        tracing::debug!("Closing {}", self.description);
        let Self {
            mut reader,
            runtime,
            ..
        } = self;
        if let Err(e) = runtime.block_on(reader.get_mut().shutdown()) {
            tracing::debug!("Shutdown failed: {}", e);
        }
    }
}

fn line_too_long() -> Error {
    Error::TransportFailure(format!("line longer than {} bytes", MAX_LINE_LENGTH))
}

fn build_runtime() -> std::io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}
