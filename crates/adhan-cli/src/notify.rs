//! Desktop alert delivery.

use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Best-effort notification sink. Callers log failures and move on;
/// nothing here is ever fatal.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Shows `message` under `title`.
    async fn notify(&self, title: &str, message: &str) -> Result<()>;
}

/// Shells out to the platform notifier: `osascript` on macOS,
/// `notify-send` everywhere else.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    /// `app_name` groups the notifications in the desktop shell.
    pub fn new(app_name: impl Into<String>) -> Self {
        DesktopNotifier {
            app_name: app_name.into(),
        }
    }
}

#[async_trait]
impl AlertSink for DesktopNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        let output = if cfg!(target_os = "macos") {
            let script = format!(
                "display notification {} with title {}",
                applescript_str(message),
                applescript_str(title)
            );
            Command::new("osascript")
                .args(["-e", script.as_str()])
                .output()
                .await
        } else {
            Command::new("notify-send")
                .arg("--app-name")
                .arg(&self.app_name)
                .arg(title)
                .arg(message)
                .output()
                .await
        }
        .context("running the desktop notifier")?;

        if !output.status.success() {
            return Err(anyhow!(
                "desktop notifier exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        debug!("notified: {title}: {message}");
        Ok(())
    }
}

/// Quotes a string as an AppleScript literal.
fn applescript_str(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// In-memory sink for tests. Records alerts instead of showing them.
#[derive(Default)]
pub struct MemorySink {
    sent: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every (title, message) pair notified so far, in order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for MemorySink {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_owned(), message.to_owned()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.notify("Adhan", "Adhan app is active!").await.unwrap();
        sink.notify("Prayer Time", "It's time for Fajr prayer.")
            .await
            .unwrap();
        assert_eq!(
            sink.sent(),
            vec![
                ("Adhan".to_owned(), "Adhan app is active!".to_owned()),
                (
                    "Prayer Time".to_owned(),
                    "It's time for Fajr prayer.".to_owned()
                ),
            ]
        );
    }

    #[test]
    fn applescript_strings_are_quoted() {
        assert_eq!(applescript_str("plain"), r#""plain""#);
        assert_eq!(applescript_str(r#"say "now""#), r#""say \"now\"""#);
        assert_eq!(applescript_str(r"a\b"), r#""a\\b""#);
    }
}
