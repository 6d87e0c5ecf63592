// Linux-specific sources: SoC temperature pseudo-file, interface address lookup.

use crate::models::{Celsius, SentinelReason};
use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use sysinfo::Networks;

/// Read a millidegree-Celsius pseudo-file (e.g. armbianmonitor's soctemp).
pub fn read_temperature(path: &Path) -> Result<Celsius, SentinelReason> {
    match std::fs::read(path) {
        Ok(raw) => parse_millidegrees(&raw),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SentinelReason::NoFile),
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                operation = "read_temperature",
                "temperature read failed"
            );
            Err(SentinelReason::ReadFailed)
        }
    }
}

/// Only a bare run of ASCII digits (surrounding whitespace allowed) is accepted.
/// Content that is not text at all counts as a read failure, not a bad number.
pub fn parse_millidegrees(raw: &[u8]) -> Result<Celsius, SentinelReason> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| SentinelReason::ReadFailed)?
        .trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SentinelReason::Malformed);
    }
    text.parse::<u64>()
        .map(Celsius::from_millidegrees)
        .map_err(|_| SentinelReason::Malformed)
}

/// First IPv4 address currently assigned to the named interface.
pub(super) fn interface_ipv4(networks: &Networks, name: &str) -> Option<Ipv4Addr> {
    networks
        .list()
        .get(name)?
        .ip_networks()
        .iter()
        .find_map(|n| match n.addr {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
}

/// Try `primary`, then `fallback`; `NoAddress` when neither resolves.
pub fn resolve_ipv4<F>(primary: &str, fallback: &str, mut lookup: F) -> Result<Ipv4Addr, SentinelReason>
where
    F: FnMut(&str) -> Option<Ipv4Addr>,
{
    lookup(primary)
        .or_else(|| lookup(fallback))
        .ok_or(SentinelReason::NoAddress)
}
