//! One complete query: poll, aggregate, resolve.

use crate::data::MetricSet;
use crate::error::Error;
use crate::oid;
use crate::poll::{poll_satellites, Clock, PollOptions, SystemClock};
use crate::source::{FixSource, GpsdSession, Transport, Watch};

/// Run one query over an already subscribed transport.
///
/// The transport is closed before the result is inspected, whatever the
/// outcome of the poll.
pub fn query<T, C>(
    mut transport: T,
    clock: &C,
    requested: &str,
    options: &PollOptions,
) -> Result<String, Error>
where
    T: Transport,
    C: Clock,
{
    let polled = poll_satellites(&mut transport, clock, options);
    transport.close();

    let metrics = MetricSet::from_report(&polled?);
    tracing::debug!(?metrics, "Aggregated satellite metrics");

    oid::resolve(requested, &metrics)
}

/// Connect to gpsd, run one query and disconnect.
pub fn query_gpsd(
    source: &FixSource,
    requested: &str,
    options: &PollOptions,
) -> Result<String, Error> {
    let mut session = GpsdSession::open(source)?;
    if let Err(e) = session.subscribe(&Watch::json(source.device.clone())) {
        session.close();
        return Err(e);
    }
    query(session, &SystemClock, requested, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid::{OID_SNR_AVG, OID_USED, OID_VISIBLE};
    use crate::source::{Report, SkyReport, SkySatellite};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, SystemTime};

    /// Yields one report forever and records whether it was closed.
    struct FixedTransport {
        report: Report,
        closed: Rc<Cell<bool>>,
    }

    impl Transport for FixedTransport {
        fn wait_ready(&mut self, _timeout: Duration) -> Result<bool, Error> {
            Ok(true)
        }

        fn read_next(&mut self) -> Result<Report, Error> {
            Ok(self.report.clone())
        }

        fn close(self) {
            self.closed.set(true);
        }
    }

    fn transport(report: Report) -> (FixedTransport, Rc<Cell<bool>>) {
        let closed = Rc::new(Cell::new(false));
        (
            FixedTransport {
                report,
                closed: closed.clone(),
            },
            closed,
        )
    }

    fn ticking_clock() -> impl Fn() -> SystemTime {
        let ticks = Cell::new(0u64);
        move || {
            ticks.set(ticks.get() + 1);
            SystemTime::UNIX_EPOCH + Duration::from_secs(ticks.get())
        }
    }

    fn sky(visible: u32, used: u32, satellites: &[(bool, f64)]) -> Report {
        Report::Sky(SkyReport {
            n_sat: Some(visible),
            u_sat: Some(used),
            satellites: Some(
                satellites
                    .iter()
                    .map(|&(used, ss)| SkySatellite {
                        used,
                        ss: Some(ss),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        })
    }

    #[test]
    fn test_snr_average_scenario() {
        let report = sky(
            5,
            4,
            &[(true, 20.0), (true, 25.0), (true, 15.0), (true, 40.0), (false, 0.0)],
        );
        let (t, closed) = transport(report);

        let line = query(t, &ticking_clock(), OID_SNR_AVG, &PollOptions::default()).unwrap();
        assert_eq!(line, ".1.3.6.1.2.1.25.1.33 = gauge: 25.000000");
        assert!(closed.get());
    }

    #[test]
    fn test_no_used_satellites_scenario() {
        let report = sky(3, 0, &[(false, 30.0), (false, 22.0), (false, 0.0)]);

        let (t, _) = transport(report.clone());
        let line = query(t, &ticking_clock(), OID_USED, &PollOptions::default()).unwrap();
        assert_eq!(line, ".1.3.6.1.2.1.25.1.32 = gauge: 0");

        let (t, _) = transport(report.clone());
        let line = query(t, &ticking_clock(), OID_SNR_AVG, &PollOptions::default()).unwrap();
        assert_eq!(line, ".1.3.6.1.2.1.25.1.33 = gauge: 0.000000");

        let (t, _) = transport(report);
        let line = query(t, &ticking_clock(), OID_VISIBLE, &PollOptions::default()).unwrap();
        assert_eq!(line, ".1.3.6.1.2.1.25.1.31 = gauge: 3");
    }

    #[test]
    fn test_unknown_oid_still_closes() {
        let (t, closed) = transport(sky(1, 1, &[(true, 30.0)]));

        let unknown = ".1.3.6.1.2.1.25.1.99";
        let result = query(t, &ticking_clock(), unknown, &PollOptions::default());
        assert!(matches!(result, Err(Error::UnknownIdentifier(ref s)) if s == unknown));
        assert!(closed.get());
    }

    #[test]
    fn test_timeout_closes_transport() {
        let (t, closed) = transport(Report::Other);

        let result = query(t, &ticking_clock(), OID_USED, &PollOptions::default());
        assert!(matches!(result, Err(Error::Timeout)));
        assert!(closed.get());
    }
}
