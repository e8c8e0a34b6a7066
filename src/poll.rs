//! Waiting for a satellite report.
//!
//! The loop keeps asking the transport for data until a SKY report with
//! satellites arrives or the deadline passes. Elapsed time is measured on
//! the wall clock as a magnitude, so a clock stepped backwards during the
//! poll neither hides nor fakes a timeout.

use std::time::{Duration, SystemTime};

use crate::data::duration::format_duration;
use crate::data::SatelliteReport;
use crate::error::Error;
use crate::source::{Report, Transport};

/// Overall time allowed for a satellite report to arrive.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// Longest single wait on the transport.
pub const DEFAULT_WAIT_SLICE: Duration = Duration::from_secs(5);

/// Timing for one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub deadline: Duration,
    pub wait_slice: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            deadline: DEFAULT_DEADLINE,
            wait_slice: DEFAULT_WAIT_SLICE,
        }
    }
}

/// Source of wall-clock time.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

/// The system's real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> SystemTime,
{
    fn now(&self) -> SystemTime {
        self()
    }
}

/// Time between two readings, whichever way the clock moved.
pub fn elapsed_magnitude(start: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(start).unwrap_or_else(|e| e.duration())
}

/// Poll `transport` until a satellite report arrives.
///
/// Fails with [`Error::Timeout`] once more than `options.deadline` has
/// elapsed, and with the transport's error as soon as a read fails. No
/// single wait runs past the time left before the deadline.
pub fn poll_satellites<T, C>(
    transport: &mut T,
    clock: &C,
    options: &PollOptions,
) -> Result<SatelliteReport, Error>
where
    T: Transport,
    C: Clock,
{
    let start = clock.now();
    let mut elapsed = Duration::ZERO;

    loop {
        let slice = options.wait_slice.min(options.deadline.saturating_sub(elapsed));
        if transport.wait_ready(slice)? {
            match transport.read_next()? {
                Report::Sky(sky) => {
                    if let Some(report) = sky.into_satellite_report() {
                        tracing::debug!(
                            visible = report.satellites_visible,
                            used = report.satellites_used,
                            "Got satellite report"
                        );
                        return Ok(report);
                    }
                    tracing::trace!("SKY report without satellites");
                }
                Report::Version(version) => {
                    tracing::info!("gpsd release {}", version.release);
                }
                Report::Error(error) => {
                    tracing::warn!("gpsd error: {}", error.message);
                }
                other => tracing::trace!("Skipping {} report", other.class()),
            }
        }

        elapsed = elapsed_magnitude(start, clock.now());
        if elapsed > options.deadline {
            tracing::debug!("No satellite report after {}", format_duration(elapsed));
            return Err(Error::Timeout);
        }
    }
}
