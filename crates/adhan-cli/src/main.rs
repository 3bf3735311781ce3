use std::sync::Arc;
use std::time::Duration;

use adhan_cli::client::{AladhanClient, ScheduleSource};
use adhan_cli::config::{FetchConfig, MonitorConfig};
use adhan_cli::monitor::spawn_monitor;
use adhan_cli::notify::{AlertSink, DesktopNotifier};
use adhan_cli::repl::run_repl;
use adhan_core::{next_prayer, Clock};
use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adhan", version, about = "Prayer times monitor with desktop alerts")]
struct Cli {
    /// Schedule service endpoint (timingsByCity shaped).
    #[arg(long, default_value = "http://api.aladhan.com/v1/timingsByCity")]
    api_url: String,

    /// City to fetch prayer times for.
    #[arg(long, default_value = "Boynton Beach")]
    city: String,

    /// Country the city is in.
    #[arg(long, default_value = "United States")]
    country: String,

    /// Calculation method id (3 = Muslim World League).
    #[arg(long, default_value_t = 3)]
    method: u8,

    /// Seconds between monitor cycles.
    #[arg(long, default_value_t = 60)]
    poll_interval_secs: u64,

    /// Seconds to wait before retrying a failed fetch.
    #[arg(long, default_value_t = 60)]
    retry_delay_secs: u64,

    /// Skip the startup notification and the initial fetch announcement.
    #[arg(long)]
    no_startup_notice: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let fetch = FetchConfig {
        api_url: cli.api_url,
        city: cli.city,
        country: cli.country,
        method: cli.method,
    };
    let cadence = MonitorConfig {
        poll_interval: Duration::from_secs(cli.poll_interval_secs),
        retry_delay: Duration::from_secs(cli.retry_delay_secs),
    };

    let source: Arc<dyn ScheduleSource> = Arc::new(AladhanClient::new(fetch));
    let sink: Arc<dyn AlertSink> = Arc::new(DesktopNotifier::new("adhan"));

    if !cli.no_startup_notice {
        startup_notice(source.as_ref(), sink.as_ref()).await;
    }

    let (stop_tx, stop_rx) = watch::channel(false);
    let _monitor = spawn_monitor(source.clone(), sink, cadence, stop_rx);

    run_repl(source.as_ref()).await?;

    // Quit exits the process; in-flight monitor work is abandoned with
    // the runtime.
    let _ = stop_tx.send(true);
    Ok(())
}

/// Announces the app and the first upcoming prayer before monitoring
/// starts.
async fn startup_notice(source: &dyn ScheduleSource, sink: &dyn AlertSink) {
    if let Err(e) = sink.notify("Adhan", "Adhan app is active!").await {
        warn!("failed to show notification: {e:?}");
    }

    // Give the desktop shell a moment before the next notification.
    tokio::time::sleep(Duration::from_secs(3)).await;

    match source.fetch().await {
        Ok(schedule) => {
            let next = next_prayer(Clock::now_local(), &schedule);
            let message = format!("Next Prayer is : {} at: {}", next.prayer.name(), next.time);
            if let Err(e) = sink.notify("Adhan", &message).await {
                warn!("failed to show notification: {e:?}");
            }
        }
        Err(e) => warn!("failed to fetch prayer times: {e}"),
    }
}
