//! Build job: the Build tab's export animation.
//!
//! There is no compiler behind it: progress climbs 5% every 100 ms, holds at
//! 100% for half a second, then reports success and resets.

use log::info;

pub const STEP_PERCENT: u8 = 5;
pub const STEP_MS: f64 = 100.0;
pub const SETTLE_MS: f64 = 500.0;
pub const SUCCESS_MESSAGE: &str = "Build Succeeded: ForgeGame.apk exported to /build/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    None,
    Progress(u8),
    Succeeded(&'static str),
}

#[derive(Debug, Default)]
pub struct BuildJob {
    started_ms: Option<f64>,
    progress: u8,
}

impl BuildJob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_ms.is_some()
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Start a build. Ignored while one is already running.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.is_running() {
            return false;
        }
        self.started_ms = Some(now_ms);
        self.progress = 0;
        info!("build started");
        true
    }

    /// Advance the animation to `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> BuildEvent {
        let Some(started) = self.started_ms else {
            return BuildEvent::None;
        };
        let elapsed = (now_ms - started).max(0.0);
        let steps = (elapsed / STEP_MS).floor() as u64;
        let progress = (steps * STEP_PERCENT as u64).min(100) as u8;

        let full_at = STEP_MS * (100 / STEP_PERCENT) as f64;
        if progress >= 100 && elapsed >= full_at + SETTLE_MS {
            self.started_ms = None;
            self.progress = 0;
            info!("{SUCCESS_MESSAGE}");
            return BuildEvent::Succeeded(SUCCESS_MESSAGE);
        }

        if progress != self.progress {
            self.progress = progress;
            BuildEvent::Progress(progress)
        } else {
            BuildEvent::None
        }
    }
}
