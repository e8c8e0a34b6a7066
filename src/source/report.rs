//! Report objects decoded from gpsd's JSON stream.
//!
//! gpsd writes one JSON object per line, each tagged with a `class`
//! member. Only the classes this tool acts on are modelled in detail;
//! everything else decodes to [`Report::Other`].

use serde::Deserialize;

use crate::data::{SatelliteRecord, SatelliteReport};

/// A single decoded line from the gpsd stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "class")]
pub enum Report {
    /// Sent by gpsd as soon as a client connects.
    #[serde(rename = "VERSION")]
    Version(VersionReport),

    /// Sky view: satellites in view and which ones are in the fix.
    #[serde(rename = "SKY")]
    Sky(SkyReport),

    /// gpsd rejected something we sent.
    #[serde(rename = "ERROR")]
    Error(ErrorReport),

    /// TPV, DEVICES, WATCH and every other class.
    #[serde(other)]
    Other,
}

impl Report {
    /// Short class name, for logging.
    pub fn class(&self) -> &'static str {
        match self {
            Report::Version(_) => "VERSION",
            Report::Sky(_) => "SKY",
            Report::Error(_) => "ERROR",
            Report::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VersionReport {
    pub release: String,
    #[serde(default)]
    pub rev: Option<String>,
    #[serde(default)]
    pub proto_major: Option<u32>,
    #[serde(default)]
    pub proto_minor: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorReport {
    pub message: String,
}

/// The SKY report as gpsd sends it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SkyReport {
    /// Receiver this report came from.
    #[serde(default)]
    pub device: Option<String>,

    /// Number of satellites in view. Older gpsd releases omit it.
    #[serde(rename = "nSat", default)]
    pub n_sat: Option<u32>,

    /// Number of satellites used in the fix. Older gpsd releases omit it.
    #[serde(rename = "uSat", default)]
    pub u_sat: Option<u32>,

    /// Per-satellite details. Absent on SKY reports that only carry DOPs.
    #[serde(default)]
    pub satellites: Option<Vec<SkySatellite>>,
}

/// One entry of a SKY report's `satellites` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SkySatellite {
    #[serde(rename = "PRN", default)]
    pub prn: Option<i32>,
    #[serde(default)]
    pub el: Option<f64>,
    #[serde(default)]
    pub az: Option<f64>,
    /// Signal to noise ratio in dBHz. Missing when not measured.
    #[serde(default)]
    pub ss: Option<f64>,
    #[serde(default)]
    pub used: bool,
}

impl SkyReport {
    /// Convert into a satellite report, if this SKY carries satellites.
    ///
    /// `nSat`/`uSat` are taken verbatim when present. Otherwise they are
    /// counted from the satellite list.
    pub fn into_satellite_report(self) -> Option<SatelliteReport> {
        let satellites = self.satellites?;

        let satellites_visible = self.n_sat.unwrap_or(satellites.len() as u32);
        let satellites_used = self
            .u_sat
            .unwrap_or_else(|| satellites.iter().filter(|s| s.used).count() as u32);

        let satellites = satellites
            .into_iter()
            .map(|s| SatelliteRecord {
                used: s.used,
                signal_to_noise: s.ss.unwrap_or(0.0),
            })
            .collect();

        Some(SatelliteReport {
            satellites_used,
            satellites_visible,
            satellites,
        })
    }
}
