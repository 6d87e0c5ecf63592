// Host metrics via sysinfo plus Linux pseudo-files

mod linux;

pub use linux::{parse_millidegrees, read_temperature, resolve_ipv4};

use crate::config::SourcesConfig;
use crate::models::{SentinelReason, Snapshot};
use std::net::Ipv4Addr;
use sysinfo::{Disks, Networks, System};
use tracing::instrument;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Anything the render loop can pull a snapshot from.
pub trait MetricsSource {
    fn snapshot(&mut self) -> Snapshot;
}

pub struct MetricsReader {
    sys: System,
    disks: Disks,
    networks: Networks,
    sources: SourcesConfig,
}

impl MetricsReader {
    pub fn new(sources: SourcesConfig) -> Self {
        let mut sys = System::new();
        // Baseline so the first sample reports usage since startup instead of blocking.
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        Self {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            sources,
        }
    }

    /// Never fails: temperature and address degrade to a sentinel reason individually.
    #[instrument(skip(self), fields(repo = "metrics", operation = "read_snapshot"))]
    pub fn read_snapshot(&mut self) -> Snapshot {
        let cpu_percent = self.cpu_percent();
        let (mem_used_mb, mem_total_mb) = self.memory_mb();
        let disk_percent = self.disk_percent();
        let temperature = read_temperature(&self.sources.temperature_path);
        let ip_address = self.ip_address();

        Snapshot {
            cpu_percent,
            mem_used_mb,
            mem_total_mb,
            disk_percent,
            temperature,
            ip_address,
        }
    }

    fn cpu_percent(&mut self) -> f64 {
        self.sys.refresh_cpu_usage();
        (self.sys.global_cpu_usage() as f64).clamp(0.0, 100.0)
    }

    fn memory_mb(&mut self) -> (f64, f64) {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let used = total.saturating_sub(self.sys.available_memory());
        (used as f64 / BYTES_PER_MB, total as f64 / BYTES_PER_MB)
    }

    fn disk_percent(&mut self) -> f64 {
        self.disks.refresh(true);
        let mount = self.sources.disk_mount.as_path();
        match self.disks.list().iter().find(|d| d.mount_point() == mount) {
            Some(d) => usage_percent(d.total_space(), d.available_space()),
            None => {
                tracing::warn!(
                    mount = %mount.display(),
                    operation = "disk_percent",
                    "mount point not listed"
                );
                0.0
            }
        }
    }

    fn ip_address(&mut self) -> Result<Ipv4Addr, SentinelReason> {
        self.networks.refresh(true);
        let networks = &self.networks;
        resolve_ipv4(
            &self.sources.primary_interface,
            &self.sources.fallback_interface,
            |name| linux::interface_ipv4(networks, name),
        )
    }
}

impl MetricsSource for MetricsReader {
    fn snapshot(&mut self) -> Snapshot {
        self.read_snapshot()
    }
}

fn usage_percent(total: u64, available: u64) -> f64 {
    if total > 0 {
        let used = total.saturating_sub(available);
        (used as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
