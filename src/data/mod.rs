//! Data models and processing for satellite reports.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "10s", "500ms")
//! - [`metrics`]: Satellite report model and gauge aggregation ([`MetricSet`])
//!
//! ## Data Flow
//!
//! ```text
//! SKY report (raw JSON)
//!        │
//!        ▼
//! SkyReport::into_satellite_report()
//!        │
//!        ▼
//! MetricSet::from_report()
//! ```

pub mod duration;
pub mod metrics;

pub use metrics::{MetricSet, SatelliteRecord, SatelliteReport, SNR_FLOOR};
