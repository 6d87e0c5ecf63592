// Four text lines composed from a snapshot; line 4 depends on the rotation page

use super::Snapshot;

pub const LINE_COUNT: usize = 4;

/// Which metric the rotating fourth line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Disk,
    Ip,
}

impl Page {
    pub fn toggled(self) -> Self {
        match self {
            Page::Disk => Page::Ip,
            Page::Ip => Page::Disk,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    lines: [String; LINE_COUNT],
}

impl Frame {
    pub fn compose(snapshot: &Snapshot, page: Page) -> Self {
        let rotating = match page {
            Page::Disk => format!("DSK: {:.1}%", snapshot.disk_percent),
            Page::Ip => format!("IP: {}", snapshot.ip_text()),
        };
        Self {
            lines: [
                format!("CPU: {:.1}%", snapshot.cpu_percent),
                format!(
                    "RAM: {:.0}/{:.0}MB",
                    snapshot.mem_used_mb, snapshot.mem_total_mb
                ),
                format!("TMP: {}", snapshot.temperature_text()),
                rotating,
            ],
        }
    }

    pub fn lines(&self) -> &[String; LINE_COUNT] {
        &self.lines
    }
}
