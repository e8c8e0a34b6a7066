//! OID lookup and gauge formatting.
//!
//! SNMP agents call this tool with one of three fixed OIDs and parse the
//! `<oid> = gauge: <value>` line it prints. The OID strings are part of
//! that contract and must not change.

use std::fmt;

use crate::data::MetricSet;
use crate::error::Error;

pub const OID_VISIBLE: &str = ".1.3.6.1.2.1.25.1.31";
pub const OID_USED: &str = ".1.3.6.1.2.1.25.1.32";
pub const OID_SNR_AVG: &str = ".1.3.6.1.2.1.25.1.33";

/// Which gauge of a [`MetricSet`] an OID selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricId {
    Visible,
    Used,
    SnrAverage,
}

/// Every known OID and the gauge it selects.
pub const OID_TABLE: &[(&str, MetricId)] = &[
    (OID_VISIBLE, MetricId::Visible),
    (OID_USED, MetricId::Used),
    (OID_SNR_AVG, MetricId::SnrAverage),
];

impl MetricId {
    /// Look up the gauge for an OID.
    pub fn from_oid(oid: &str) -> Option<Self> {
        OID_TABLE
            .iter()
            .find(|(known, _)| *known == oid)
            .map(|(_, id)| *id)
    }

    /// The OID this gauge is published under.
    pub fn oid(&self) -> &'static str {
        match self {
            MetricId::Visible => OID_VISIBLE,
            MetricId::Used => OID_USED,
            MetricId::SnrAverage => OID_SNR_AVG,
        }
    }
}

/// A gauge value, keeping integer and float gauges apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gauge {
    Integer(u32),
    Float(f64),
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gauge::Integer(v) => write!(f, "{}", v),
            Gauge::Float(v) => write!(f, "{:.6}", v),
        }
    }
}

impl MetricSet {
    /// Read one gauge out of the set.
    pub fn gauge(&self, id: MetricId) -> Gauge {
        match id {
            MetricId::Visible => Gauge::Integer(self.visible),
            MetricId::Used => Gauge::Integer(self.used),
            MetricId::SnrAverage => Gauge::Float(self.average_snr),
        }
    }
}

/// Resolve an OID against the metrics and format the output line.
///
/// The returned string has no trailing newline.
pub fn resolve(oid: &str, metrics: &MetricSet) -> Result<String, Error> {
    let id = MetricId::from_oid(oid).ok_or_else(|| Error::UnknownIdentifier(oid.to_string()))?;
    Ok(format!("{} = gauge: {}", id.oid(), metrics.gauge(id)))
}
