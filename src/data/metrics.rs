//! Satellite metric aggregation.
//!
//! This module turns one satellite report into the three gauges the tool
//! can print: satellites visible, satellites used, and the average signal
//! to noise ratio over the satellites in the fix.

/// SNR readings at or below this value are "no reading" placeholders.
pub const SNR_FLOOR: f64 = 1.0;

/// A single tracked satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteRecord {
    /// Whether the satellite contributed to the position fix.
    pub used: bool,
    /// Signal to noise ratio; 0.0 when not measured.
    pub signal_to_noise: f64,
}

/// One sky view, as received from the daemon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SatelliteReport {
    pub satellites_used: u32,
    pub satellites_visible: u32,
    pub satellites: Vec<SatelliteRecord>,
}

/// Gauges derived from a [`SatelliteReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricSet {
    pub visible: u32,
    pub used: u32,
    pub average_snr: f64,
}

impl MetricSet {
    /// Compute the gauges for a report.
    ///
    /// The SNR sum covers used satellites with a real reading, but it is
    /// divided by the report's own used count, not by the number of
    /// satellites that passed the floor.
    pub fn from_report(report: &SatelliteReport) -> Self {
        let snr_total: f64 = report
            .satellites
            .iter()
            .filter(|s| s.used && s.signal_to_noise > SNR_FLOOR)
            .map(|s| s.signal_to_noise)
            .sum();

        let average_snr = if report.satellites_used > 0 {
            snr_total / f64::from(report.satellites_used)
        } else {
            0.0
        };

        Self {
            visible: report.satellites_visible,
            used: report.satellites_used,
            average_snr,
        }
    }
}
