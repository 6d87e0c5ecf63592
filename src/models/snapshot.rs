// Snapshot of host metrics; optional fields carry the reason they are missing

use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Why a metric could not be read. Each reason renders as a fixed placeholder on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SentinelReason {
    #[error("temperature file not found")]
    NoFile,
    #[error("temperature file does not hold a millidegree integer")]
    Malformed,
    #[error("temperature file could not be read")]
    ReadFailed,
    #[error("no IPv4 address on primary or fallback interface")]
    NoAddress,
}

impl SentinelReason {
    pub fn sentinel(self) -> &'static str {
        match self {
            SentinelReason::NoFile => "NoFile",
            SentinelReason::Malformed => "Err",
            SentinelReason::ReadFailed => "ReadErr",
            SentinelReason::NoAddress => "N/A",
        }
    }
}

/// Degrees Celsius, displayed with one decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius(pub f64);

impl Celsius {
    pub fn from_millidegrees(milli: u64) -> Self {
        Celsius(milli as f64 / 1000.0)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub cpu_percent: f64,
    pub mem_used_mb: f64,
    pub mem_total_mb: f64,
    pub disk_percent: f64,
    pub temperature: Result<Celsius, SentinelReason>,
    pub ip_address: Result<Ipv4Addr, SentinelReason>,
}

impl Snapshot {
    pub fn temperature_text(&self) -> String {
        match self.temperature {
            Ok(c) => c.to_string(),
            Err(reason) => reason.sentinel().to_string(),
        }
    }

    pub fn ip_text(&self) -> String {
        match self.ip_address {
            Ok(addr) => addr.to_string(),
            Err(reason) => reason.sentinel().to_string(),
        }
    }
}
