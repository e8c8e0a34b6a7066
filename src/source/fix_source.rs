//! Parsing of the `server[:port[:device]]` source argument.

use std::str::FromStr;

use crate::error::Error;

pub const DEFAULT_SERVER: &str = "localhost";
pub const DEFAULT_GPSD_PORT: u16 = 2947;

/// Where to find gpsd, and optionally which receiver to watch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixSource {
    pub server: String,
    pub port: u16,
    pub device: Option<String>,
}

impl Default for FixSource {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            port: DEFAULT_GPSD_PORT,
            device: None,
        }
    }
}

impl FixSource {
    /// Parse `server[:port[:device]]`, filling empty parts from `defaults`.
    ///
    /// IPv6 literals go in brackets: `[::1]:2947:/dev/ttyUSB0`.
    pub fn parse_with_defaults(spec: &str, defaults: &FixSource) -> Result<Self, Error> {
        let invalid = || Error::InvalidSource(spec.to_string());

        let (server, rest) = if let Some(bracketed) = spec.strip_prefix('[') {
            let (server, rest) = bracketed.split_once(']').ok_or_else(invalid)?;
            match rest {
                "" => (server, None),
                _ => (server, Some(rest.strip_prefix(':').ok_or_else(invalid)?)),
            }
        } else {
            match spec.split_once(':') {
                Some((server, rest)) => (server, Some(rest)),
                None => (spec, None),
            }
        };

        let (port, device) = match rest {
            Some(rest) => match rest.split_once(':') {
                Some((port, device)) => (port, device),
                None => (rest, ""),
            },
            None => ("", ""),
        };

        let server = match server {
            "" => defaults.server.clone(),
            s => s.to_string(),
        };
        let port = match port {
            "" => defaults.port,
            p => p.parse().map_err(|_| invalid())?,
        };
        let device = match device {
            "" => defaults.device.clone(),
            d => Some(d.to_string()),
        };

        Ok(Self {
            server,
            port,
            device,
        })
    }

    /// `host:port` form suitable for connecting.
    pub fn address(&self) -> String {
        if self.server.contains(':') {
            format!("[{}]:{}", self.server, self.port)
        } else {
            format!("{}:{}", self.server, self.port)
        }
    }
}

impl FromStr for FixSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_defaults(s, &FixSource::default())
    }
}
