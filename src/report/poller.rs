//! Report status poll loop

use super::api::ReportSource;
use super::types::ReportInfo;
use crate::config::PollSettings;
use crate::error::{Error, Result};
use crate::types::ReportStatus;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Timing and ceiling of the poll loop
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    /// Wait before the first check
    pub initial_delay: Duration,
    /// Base interval, multiplied before each wait between checks
    pub interval: Duration,
    /// Interval growth factor
    pub multiplier: f64,
    /// Maximum number of status checks
    pub max_checks: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from(&PollSettings::default())
    }
}

impl From<&PollSettings> for PollPolicy {
    fn from(settings: &PollSettings) -> Self {
        Self {
            initial_delay: Duration::from_secs(settings.initial_delay_secs),
            interval: Duration::from_secs(settings.interval_secs),
            multiplier: settings.multiplier,
            max_checks: settings.max_checks,
        }
    }
}

impl PollPolicy {
    /// Grow an interval by the multiplier, truncated to whole seconds
    pub fn next_interval(&self, current: Duration) -> Duration {
        Duration::from_secs((current.as_secs() as f64 * self.multiplier) as u64)
    }
}

/// Something that can wait
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock sleeper backed by tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Successful end of polling
#[derive(Debug, Clone)]
pub struct PollOutcome {
    /// Report info from the final (COMPLETED) check
    pub info: ReportInfo,
    /// Number of status checks made
    pub checks: u32,
}

/// Drives the status checks for one report
pub struct ReportPoller<'a> {
    source: &'a dyn ReportSource,
    sleeper: &'a dyn Sleeper,
    policy: PollPolicy,
}

impl<'a> ReportPoller<'a> {
    /// Create a poller
    pub fn new(source: &'a dyn ReportSource, sleeper: &'a dyn Sleeper, policy: PollPolicy) -> Self {
        Self {
            source,
            sleeper,
            policy,
        }
    }

    /// Poll until COMPLETED, or fail on QUEUED, FAILED or the check ceiling
    pub async fn wait_for_completion(&self, report_id: &str, report_name: &str) -> Result<PollOutcome> {
        info!(
            "Waiting {} seconds before first status check...",
            self.policy.initial_delay.as_secs()
        );
        self.sleeper.sleep(self.policy.initial_delay).await;

        let mut interval = self.policy.interval;
        let mut check: u32 = 1;

        loop {
            let info = self.source.report_info(report_id).await?;
            let status = info
                .status()
                .cloned()
                .ok_or_else(|| Error::missing_field("data.node.result.status"))?;

            info!(check, %status, "Status check #{check}: {status}");

            match status {
                ReportStatus::Completed => return Ok(PollOutcome { info, checks: check }),
                ReportStatus::Queued => {
                    return Err(Error::ReportQueued {
                        name: report_name.to_string(),
                    })
                }
                ReportStatus::Failed => {
                    return Err(Error::ReportFailed {
                        name: report_name.to_string(),
                    })
                }
                ReportStatus::Running | ReportStatus::Other(_) => {}
            }

            if check >= self.policy.max_checks {
                return Err(Error::PollTimeout { checks: check });
            }

            check += 1;
            interval = self.policy.next_interval(interval);
            info!("Next status check in {} seconds...", interval.as_secs());
            self.sleeper.sleep(interval).await;
        }
    }
}
