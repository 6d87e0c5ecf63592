use anyhow::Result;
use oledstats::display::{BlankOnDrop, OledPanel, Renderer, TextFont};
use oledstats::metrics_repo::MetricsReader;
use oledstats::worker::{self, WorkerConfig, WorkerDeps};
use oledstats::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting {}",
        env!("CARGO_PKG_NAME")
    );

    let app_config = config::AppConfig::load()?;
    let font = TextFont::load(app_config.font.path.as_deref(), app_config.font.size_px);
    if font.is_bitmap() {
        tracing::info!(size_px = font.pixel_height(), "Using built-in bitmap font");
    }
    let renderer = Renderer::new(font);

    let panel = match OledPanel::open(&app_config.display) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "Error initializing OLED");
            tracing::error!("Check the wiring and I2C address, and ensure I2C is enabled");
            return Ok(());
        }
    };
    // Blanked when dropped, on every path out of main from here on.
    let mut panel = BlankOnDrop::new(panel);
    let mut metrics = MetricsReader::new(app_config.sources.clone());

    tracing::info!("Starting stats display loop. Press Ctrl+C to exit.");
    worker::run(
        WorkerDeps {
            source: &mut metrics,
            panel: &mut *panel,
            renderer: &renderer,
        },
        WorkerConfig::from(&app_config.timing),
        shutdown_signal(),
    )
    .await;

    drop(panel);
    tracing::info!("Exiting stats display");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
