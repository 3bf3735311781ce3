//! The perpetual fetch/select/alert loop.

use std::sync::Arc;

use adhan_core::{next_prayer, Clock, Prayer};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::client::ScheduleSource;
use crate::config::MonitorConfig;
use crate::notify::AlertSink;

/// Title of the exact-match notification.
pub const ALERT_TITLE: &str = "Prayer Time";

/// What one pass of the loop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The fetch failed; the driver backs off for the retry delay.
    FetchFailed,
    /// A next prayer was selected; nothing is due this minute.
    Idle,
    /// The clock landed exactly on the next prayer's minute and the
    /// alert fired.
    Matched,
}

/// One fetch/select/alert pass.
///
/// `now` is read twice: once to select against, and once more for the
/// due check. The fetch and the scan consume real time, so the minute
/// can roll over in between; the second read is what makes the alert
/// reachable at all, since selection only ever returns events strictly
/// later than its own read.
pub async fn monitor_cycle<F>(
    source: &dyn ScheduleSource,
    sink: &dyn AlertSink,
    now: F,
) -> CycleOutcome
where
    F: Fn() -> Clock,
{
    let schedule = match source.fetch().await {
        Ok(schedule) => schedule,
        Err(e) => {
            warn!("failed to fetch prayer times: {e}");
            return CycleOutcome::FetchFailed;
        }
    };

    let next = next_prayer(now(), &schedule);
    println!("Next prayer: {}, Time: {}", next.prayer.name(), next.time);
    if next.wrapped {
        debug!("all of today's events have passed; next is tomorrow's first");
    }

    if now() == next.time {
        fire_alert(sink, next.prayer).await;
        return CycleOutcome::Matched;
    }
    CycleOutcome::Idle
}

/// Sends the exact-match notification. Delivery failures are logged and
/// swallowed; alerts are best effort.
pub async fn fire_alert(sink: &dyn AlertSink, prayer: Prayer) {
    let message = format!("It's time for {} prayer.", prayer.name());
    if let Err(e) = sink.notify(ALERT_TITLE, &message).await {
        warn!("failed to show notification: {e:?}");
    }
}

/// Drives [`monitor_cycle`] until the shutdown signal flips, pausing
/// `poll_interval` after a cycle that fetched and `retry_delay` after
/// one that did not. Fetch failures never terminate the loop.
pub async fn run_monitor(
    source: Arc<dyn ScheduleSource>,
    sink: Arc<dyn AlertSink>,
    config: MonitorConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("prayer monitor running");
    loop {
        if *shutdown.borrow() {
            break;
        }
        let outcome = monitor_cycle(source.as_ref(), sink.as_ref(), Clock::now_local).await;
        let delay = match outcome {
            CycleOutcome::FetchFailed => config.retry_delay,
            CycleOutcome::Idle | CycleOutcome::Matched => config.poll_interval,
        };
        tokio::select! {
            _ = sleep(delay) => {}
            res = shutdown.changed() => {
                // A dropped sender stops the loop like a signal would.
                if res.is_err() {
                    break;
                }
            }
        }
    }
    info!("prayer monitor stopped");
}

/// Spawns the monitor as a background task.
pub fn spawn_monitor(
    source: Arc<dyn ScheduleSource>,
    sink: Arc<dyn AlertSink>,
    config: MonitorConfig,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(run_monitor(source, sink, config, shutdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchError;
    use crate::notify::MemorySink;
    use adhan_core::wire::WireError;
    use adhan_core::Schedule;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::timeout;

    fn hm(hour: u16, minute: u16) -> Clock {
        Clock::from_hm(hour, minute).unwrap()
    }

    fn demo_schedule() -> Schedule {
        Schedule {
            fajr: hm(5, 30),
            sunrise: hm(6, 45),
            dhuhr: hm(12, 15),
            asr: hm(15, 40),
            maghrib: hm(18, 20),
            isha: hm(19, 45),
            sunset: hm(18, 20),
            imsak: hm(5, 20),
            midnight: hm(0, 2),
        }
    }

    /// Yields a canned schedule, failing the first `fail_first` fetches.
    struct ScriptedSource {
        schedule: Schedule,
        fail_first: usize,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(schedule: Schedule, fail_first: usize) -> Self {
            ScriptedSource {
                schedule,
                fail_first,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScheduleSource for ScriptedSource {
        async fn fetch(&self) -> Result<Schedule, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                Err(FetchError::Wire(WireError::Status {
                    code: 503,
                    status: "Service Unavailable".into(),
                }))
            } else {
                Ok(self.schedule)
            }
        }
    }

    struct FailingSink;

    #[async_trait]
    impl AlertSink for FailingSink {
        async fn notify(&self, _title: &str, _message: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("no desktop session"))
        }
    }

    #[tokio::test]
    async fn alert_fires_when_the_minute_arrives() {
        let source = ScriptedSource::new(demo_schedule(), 0);
        let sink = MemorySink::new();
        // Selection reads 12:14 and picks Dhuhr; by the due check the
        // minute has rolled over to 12:15.
        let reads = [hm(12, 14), hm(12, 15)];
        let at = AtomicUsize::new(0);

        let outcome =
            monitor_cycle(&source, &sink, || reads[at.fetch_add(1, Ordering::SeqCst)]).await;

        assert_eq!(outcome, CycleOutcome::Matched);
        assert_eq!(
            sink.sent(),
            vec![(
                "Prayer Time".to_owned(),
                "It's time for Dhuhr prayer.".to_owned()
            )]
        );
    }

    #[tokio::test]
    async fn no_alert_when_nothing_is_due() {
        let source = ScriptedSource::new(demo_schedule(), 0);
        let sink = MemorySink::new();

        let outcome = monitor_cycle(&source, &sink, || hm(7, 0)).await;

        assert_eq!(outcome, CycleOutcome::Idle);
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn passed_event_does_not_fire_at_its_own_minute() {
        let source = ScriptedSource::new(demo_schedule(), 0);
        let sink = MemorySink::new();

        // Both reads sit exactly on Maghrib; Isha is selected and
        // nothing is due.
        let outcome = monitor_cycle(&source, &sink, || hm(18, 20)).await;

        assert_eq!(outcome, CycleOutcome::Idle);
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_is_reported_not_fatal() {
        let source = ScriptedSource::new(demo_schedule(), usize::MAX);
        let sink = MemorySink::new();

        let outcome = monitor_cycle(&source, &sink, || hm(7, 0)).await;

        assert_eq!(outcome, CycleOutcome::FetchFailed);
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn sink_failure_is_swallowed() {
        let source = ScriptedSource::new(demo_schedule(), 0);
        let reads = [hm(12, 14), hm(12, 15)];
        let at = AtomicUsize::new(0);

        let outcome =
            monitor_cycle(&source, &FailingSink, || reads[at.fetch_add(1, Ordering::SeqCst)])
                .await;

        assert_eq!(outcome, CycleOutcome::Matched);
    }

    #[tokio::test]
    async fn loop_survives_a_failing_fetch() {
        let source = Arc::new(ScriptedSource::new(demo_schedule(), 1));
        let sink = Arc::new(MemorySink::new());
        let config = MonitorConfig {
            poll_interval: Duration::from_millis(5),
            retry_delay: Duration::from_millis(5),
        };
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = spawn_monitor(source.clone(), sink, config, stop_rx);

        timeout(Duration::from_secs(2), async {
            while source.calls() < 3 {
                sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("loop should keep cycling after one failed fetch");

        let _ = stop_tx.send(true);
        timeout(Duration::from_secs(2), handle)
            .await
            .expect("monitor should stop after the signal")
            .unwrap();
    }

    #[tokio::test]
    async fn monitor_stops_when_signalled_before_start() {
        let source = Arc::new(ScriptedSource::new(demo_schedule(), 0));
        let sink = Arc::new(MemorySink::new());
        let (stop_tx, stop_rx) = watch::channel(true);

        let run = run_monitor(source.clone(), sink, MonitorConfig::default(), stop_rx);
        timeout(Duration::from_secs(1), run)
            .await
            .expect("monitor should return without running a cycle");

        assert_eq!(source.calls(), 0);
        drop(stop_tx);
    }
}
