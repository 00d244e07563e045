use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::ProbeOracle;
use crate::model::ProbeVerdict;

static DEFAULT_YTDLP_PATH: &str = "yt-dlp";
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(60);

static YTDLP_AVAILABLE: LazyLock<bool> = LazyLock::new(|| {
    std::process::Command::new(DEFAULT_YTDLP_PATH)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
});

/// Probe oracle backed by the yt-dlp binary in simulate mode.
///
/// A probe runs `yt-dlp --simulate` against the URL: extraction happens,
/// the transfer does not. Exit 0 means yt-dlp found a playable stream.
#[derive(Debug, Clone)]
pub struct YtDlpOracle {
    binary_path: String,
    probe_timeout: Duration,
    extra_args: Vec<String>,
}

impl YtDlpOracle {
    /// Whether the default `yt-dlp` binary answers `--version`. Checked
    /// once per process.
    pub fn is_available() -> bool {
        *YTDLP_AVAILABLE
    }

    pub fn new() -> Self {
        let binary_path =
            std::env::var("YTDLP_PATH").unwrap_or_else(|_| DEFAULT_YTDLP_PATH.to_string());
        Self {
            binary_path,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            extra_args: Vec::new(),
        }
    }

    pub fn with_binary_path(path: impl Into<String>) -> Self {
        Self {
            binary_path: path.into(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            extra_args: Vec::new(),
        }
    }

    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn binary_path_ref(&self) -> &str {
        &self.binary_path
    }

    fn build_probe_command(&self, url: &str) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.arg("--simulate")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--no-progress")
            .args(&self.extra_args)
            .arg("--")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for YtDlpOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeOracle for YtDlpOracle {
    async fn probe(&self, url: &str) -> ProbeVerdict {
        debug!(url, "probing url with yt-dlp");
        let mut cmd = self.build_probe_command(url);

        let output = match tokio::time::timeout(self.probe_timeout, cmd.output()).await {
            Err(_) => {
                warn!(url, timeout_secs = self.probe_timeout.as_secs(), "yt-dlp probe timed out");
                return ProbeVerdict::Failed {
                    error: format!("probe timed out after {}s", self.probe_timeout.as_secs()),
                };
            }
            Ok(Err(e)) => {
                warn!(url, error = %e, "failed to spawn yt-dlp");
                return ProbeVerdict::Failed {
                    error: format!("failed to spawn yt-dlp: {e}"),
                };
            }
            Ok(Ok(output)) => output,
        };

        if output.status.success() {
            debug!(url, "yt-dlp probe succeeded");
            return ProbeVerdict::Downloadable;
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(url, stderr = %stderr, "yt-dlp probe rejected url");
        classify_probe_failure(&stderr)
    }
}

/// Split "yt-dlp looked and said no" from "yt-dlp itself broke". Network
/// faults mean the verification was inconclusive, not that the URL is bad.
fn classify_probe_failure(stderr: &str) -> ProbeVerdict {
    if stderr.is_empty() {
        return ProbeVerdict::NotDownloadable { reason: None };
    }
    let detail = first_error_line(stderr);
    let lower = detail.to_lowercase();
    let transport_fault = lower.contains("timed out")
        || lower.contains("connection")
        || lower.contains("temporary failure")
        || lower.contains("unable to download webpage")
        || lower.contains("name or service not known");
    if transport_fault {
        ProbeVerdict::Failed { error: detail }
    } else {
        ProbeVerdict::NotDownloadable {
            reason: Some(detail),
        }
    }
}

fn first_error_line(stderr: &str) -> String {
    stderr
        .lines()
        .find_map(|line| {
            let line = line.trim();
            line.strip_prefix("ERROR:").map(|rest| rest.trim().to_string())
        })
        .unwrap_or_else(|| stderr.lines().next().unwrap_or_default().trim().to_string())
}
