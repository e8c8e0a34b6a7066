//! Session transport for talking to gpsd.
//!
//! The poll loop only sees the [`Transport`] trait, so it can be driven by
//! the real TCP session or by a scripted transport in tests.

mod fix_source;
mod gpsd;
mod report;

pub use fix_source::{FixSource, DEFAULT_GPSD_PORT, DEFAULT_SERVER};
pub use gpsd::{GpsdSession, Watch};
pub use report::{ErrorReport, Report, SkyReport, SkySatellite, VersionReport};

use std::time::Duration;

use crate::error::Error;

/// A source of decoded gpsd reports.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use gpssnmp::{FixSource, GpsdSession, Transport, Watch};
///
/// # fn main() -> Result<(), gpssnmp::Error> {
/// let source = FixSource::default();
/// let mut session = GpsdSession::open(&source)?;
/// session.subscribe(&Watch::json(source.device.clone()))?;
/// if session.wait_ready(Duration::from_secs(5))? {
///     println!("got {}", session.read_next()?.class());
/// }
/// session.close();
/// # Ok(())
/// # }
/// ```
pub trait Transport {
    /// Block for at most `timeout` until a report can be read.
    ///
    /// Returns `false` when nothing arrived in time.
    fn wait_ready(&mut self, timeout: Duration) -> Result<bool, Error>;

    /// Read and decode the next report.
    fn read_next(&mut self) -> Result<Report, Error>;

    /// Release the session.
    fn close(self)
    where
        Self: Sized;
}
