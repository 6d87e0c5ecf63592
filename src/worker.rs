// Render loop: sample + draw on a fixed interval, rotate the fourth line on an independent timer.
// Runs inline on the caller's task; sampling and drawing are strictly sequential.

use crate::config::TimingConfig;
use crate::display::{Panel, PanelError, Renderer};
use crate::metrics_repo::MetricsSource;
use crate::models::{Frame, Page};
use std::future::Future;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval};
use tracing::instrument;

/// Rate limit for panel write failures (a disconnected bus would fail every tick).
const PANEL_WARN_INTERVAL: Duration = Duration::from_secs(60);

/// Which page the fourth line shows and when it last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    last_rotation: Instant,
    page: Page,
}

impl Rotation {
    pub fn new(now: Instant) -> Self {
        Self {
            last_rotation: now,
            page: Page::default(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn last_rotation(&self) -> Instant {
        self.last_rotation
    }

    /// Flips the page once if `period` has elapsed since the last flip, however long ago that was.
    pub fn advance(self, now: Instant, period: Duration) -> Self {
        if now.saturating_duration_since(self.last_rotation) >= period {
            Self {
                last_rotation: now,
                page: self.page.toggled(),
            }
        } else {
            self
        }
    }
}

/// Loop timing.
#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    pub update_interval: Duration,
    pub rotation_interval: Duration,
}

impl From<&TimingConfig> for WorkerConfig {
    fn from(timing: &TimingConfig) -> Self {
        Self {
            update_interval: timing.update_interval(),
            rotation_interval: timing.rotation_interval(),
        }
    }
}

/// Metrics source, panel and renderer, all borrowed from the caller for the loop's lifetime.
pub struct WorkerDeps<'a, S, P> {
    pub source: &'a mut S,
    pub panel: &'a mut P,
    pub renderer: &'a Renderer,
}

/// One iteration: advance rotation, sample, compose, draw and flush.
pub fn step<S, P>(
    rotation: Rotation,
    now: Instant,
    rotation_interval: Duration,
    deps: &mut WorkerDeps<'_, S, P>,
) -> (Rotation, Result<(), PanelError>)
where
    S: MetricsSource,
    P: Panel,
{
    let rotation = rotation.advance(now, rotation_interval);
    let snapshot = deps.source.snapshot();
    if let Err(reason) = snapshot.temperature {
        tracing::debug!(reason = %reason, "temperature unavailable");
    }
    if let Err(reason) = snapshot.ip_address {
        tracing::debug!(reason = %reason, "address unavailable");
    }
    let frame = Frame::compose(&snapshot, rotation.page());
    let result = deps.panel.show(&frame, deps.renderer);
    (rotation, result)
}

/// Runs until `shutdown` resolves. The first frame is drawn immediately.
#[instrument(
    skip_all,
    fields(
        update_interval_ms = config.update_interval.as_millis() as u64,
        rotation_interval_ms = config.rotation_interval.as_millis() as u64
    )
)]
pub async fn run<S, P, F>(mut deps: WorkerDeps<'_, S, P>, config: WorkerConfig, shutdown: F)
where
    S: MetricsSource,
    P: Panel,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut tick = interval(config.update_interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut rotation = Rotation::new(Instant::now());
    let mut last_panel_warn: Option<Instant> = None;
    let mut frames_shown: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::info!(frames_shown, "Received shutdown signal");
                break;
            }
            _ = tick.tick() => {
                let now = Instant::now();
                let previous_page = rotation.page();
                let (next, result) = step(rotation, now, config.rotation_interval, &mut deps);
                if next.page() != previous_page {
                    tracing::debug!(page = ?next.page(), "Rotated fourth line");
                }
                rotation = next;

                match result {
                    Ok(()) => frames_shown += 1,
                    Err(e) => {
                        let should_warn = last_panel_warn
                            .is_none_or(|t| now.saturating_duration_since(t) >= PANEL_WARN_INTERVAL);
                        if should_warn {
                            tracing::warn!(
                                error = %e,
                                operation = "show_frame",
                                "display update failed; retrying next tick"
                            );
                            last_panel_warn = Some(now);
                        }
                    }
                }
            }
        }
    }
}
