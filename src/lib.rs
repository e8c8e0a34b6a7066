//! # gpssnmp
//!
//! Poll a running gpsd once and report a satellite gauge in the format
//! expected by SNMP `pass`/`extend` scripts.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           query                              │
//! │  ┌─────────┐    ┌──────────┐    ┌───────────┐    ┌────────┐  │
//! │  │  poll   │───▶│   data   │───▶│    oid    │───▶│ stdout │  │
//! │  │ (wait)  │    │(aggregate)    │ (resolve) │    │        │  │
//! │  └────┬────┘    └──────────┘    └───────────┘    └────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── GpsdSession (TCP, JSON WATCH stream)         │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the [`Transport`] trait, gpsd report types and the TCP session
//! - **[`poll`]**: waits for a SKY report carrying satellites, bounded by a deadline
//! - **[`data`]**: satellite report model and [`MetricSet`] aggregation
//! - **[`oid`]**: the fixed OID table and `<oid> = gauge: <value>` formatting
//!
//! ## Usage
//!
//! ```bash
//! $ gpssnmp -g .1.3.6.1.2.1.25.1.33
//! .1.3.6.1.2.1.25.1.33 = gauge: 22.250000
//! ```
//!
//! ### As a library
//!
//! ```
//! use gpssnmp::{oid, MetricSet, SatelliteRecord, SatelliteReport};
//!
//! let report = SatelliteReport {
//!     satellites_used: 2,
//!     satellites_visible: 3,
//!     satellites: vec![
//!         SatelliteRecord { used: true, signal_to_noise: 30.0 },
//!         SatelliteRecord { used: true, signal_to_noise: 20.0 },
//!         SatelliteRecord { used: false, signal_to_noise: 15.0 },
//!     ],
//! };
//! let metrics = MetricSet::from_report(&report);
//! assert_eq!(
//!     oid::resolve(oid::OID_SNR_AVG, &metrics).unwrap(),
//!     ".1.3.6.1.2.1.25.1.33 = gauge: 25.000000"
//! );
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod oid;
pub mod poll;
pub mod query;
pub mod source;

// Re-export main types for convenience
pub use config::Settings;
pub use data::{MetricSet, SatelliteRecord, SatelliteReport};
pub use error::Error;
pub use oid::{Gauge, MetricId};
pub use poll::{poll_satellites, Clock, PollOptions, SystemClock};
pub use query::{query, query_gpsd};
pub use source::{FixSource, GpsdSession, Report, Transport, Watch};
