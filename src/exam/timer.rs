//! Mock-exam countdown timer
//!
//! An explicit state machine: Idle → Running → Expired, with reset() as the
//! only way back to Idle. The repeating one-second tick is a stored deadline
//! polled from the event loop, so ticks can never interleave with other
//! state mutations. A tick that arrives late still decrements by exactly 1;
//! the countdown may lag wall clock under load but never skips below zero.

use std::time::{Duration, Instant};

use tracing::debug;

/// Timer lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Expired,
}

/// Countdown controller for the mock exam
#[derive(Debug, Clone)]
pub struct TimerController {
    duration_seconds: u32,
    remaining_seconds: u32,
    state: TimerState,
    /// Pending tick deadline; None means no tick is scheduled
    next_tick: Option<Instant>,
}

const TICK_INTERVAL: Duration = Duration::from_secs(1);

impl TimerController {
    /// A fresh Idle timer with the full duration remaining
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            state: TimerState::Idle,
            next_tick: None,
        }
    }

    /// Start the countdown; a no-op returning false unless Idle
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state != TimerState::Idle {
            debug!("ignoring start() while {:?}", self.state);
            return false;
        }
        self.state = TimerState::Running;
        self.next_tick = Some(now + TICK_INTERVAL);
        true
    }

    /// Drive the tick schedule from the event loop
    ///
    /// Fires at most one tick per call; the next deadline is re-armed from
    /// `now`, not from the missed deadline, so there is no catch-up.
    pub fn poll(&mut self, now: Instant) {
        let Some(deadline) = self.next_tick else { return };
        if now >= deadline {
            self.on_tick();
            if self.state == TimerState::Running {
                self.next_tick = Some(now + TICK_INTERVAL);
            }
        }
    }

    /// One tick: decrement with clamp at zero, expire when it is reached
    ///
    /// A tick delivered outside Running (raced with a reset) is ignored.
    pub(crate) fn on_tick(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.next_tick = None;
            self.state = TimerState::Expired;
        }
    }

    /// Cancel any pending tick and return to Idle with the full duration
    ///
    /// The schedule is cleared before returning, so no tick can fire after
    /// this call.
    pub fn reset(&mut self) {
        self.next_tick = None;
        self.remaining_seconds = self.duration_seconds;
        self.state = TimerState::Idle;
    }

    /// Seconds left on the clock
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Configured full duration
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    /// Current lifecycle state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Remaining time as `mm:ss`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_seconds / 60, self.remaining_seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn running(duration: u32) -> TimerController {
        let mut timer = TimerController::new(duration);
        assert!(timer.start(Instant::now()));
        timer
    }

    #[test]
    fn starts_idle_with_full_duration() {
        let timer = TimerController::new(3600);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 3600);
    }

    #[test]
    fn ticks_decrement_monotonically_and_clamp_at_zero() {
        let mut timer = running(3600);

        for _ in 0..3601 {
            timer.on_tick();
        }

        assert_eq!(timer.remaining_seconds(), 0);
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[test]
    fn expires_exactly_on_the_last_tick() {
        let mut timer = running(3);
        timer.on_tick();
        timer.on_tick();
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 1);

        timer.on_tick();
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining_seconds(), 0);

        // Further ticks are stale and change nothing
        timer.on_tick();
        assert_eq!(timer.remaining_seconds(), 0);
        assert_eq!(timer.state(), TimerState::Expired);
    }

    #[test]
    fn double_start_is_rejected() {
        let now = Instant::now();
        let mut timer = TimerController::new(60);

        assert!(timer.start(now));
        assert!(!timer.start(now));
        assert_eq!(timer.state(), TimerState::Running);

        timer.on_tick();
        assert!(!timer.start(now));
        assert_eq!(timer.remaining_seconds(), 59);
    }

    #[test]
    fn start_after_expiry_is_rejected_until_reset() {
        let mut timer = running(1);
        timer.on_tick();
        assert_eq!(timer.state(), TimerState::Expired);
        assert!(!timer.start(Instant::now()));

        timer.reset();
        assert!(timer.start(Instant::now()));
    }

    #[test]
    fn reset_restores_idle_and_full_duration() {
        let mut timer = running(3600);
        timer.on_tick();
        timer.on_tick();

        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 3600);

        // The schedule was cancelled: polling cannot tick an Idle timer
        timer.poll(Instant::now() + Duration::from_secs(10));
        assert_eq!(timer.remaining_seconds(), 3600);
    }

    #[test]
    fn stale_tick_outside_running_is_ignored() {
        let mut timer = TimerController::new(60);
        timer.on_tick();
        assert_eq!(timer.remaining_seconds(), 60);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn poll_fires_only_when_a_second_has_elapsed() {
        let now = Instant::now();
        let mut timer = TimerController::new(60);
        timer.start(now);

        timer.poll(now + Duration::from_millis(400));
        assert_eq!(timer.remaining_seconds(), 60);

        timer.poll(now + Duration::from_millis(1100));
        assert_eq!(timer.remaining_seconds(), 59);
    }

    #[test]
    fn late_poll_decrements_once_without_catch_up() {
        let now = Instant::now();
        let mut timer = TimerController::new(60);
        timer.start(now);

        // Five seconds late: still a single decrement
        timer.poll(now + Duration::from_secs(5));
        assert_eq!(timer.remaining_seconds(), 59);

        // Next deadline was re-armed from the late delivery
        timer.poll(now + Duration::from_secs(5) + Duration::from_millis(500));
        assert_eq!(timer.remaining_seconds(), 59);
        timer.poll(now + Duration::from_secs(6) + Duration::from_millis(100));
        assert_eq!(timer.remaining_seconds(), 58);
    }

    #[test]
    fn display_formats_minutes_and_seconds() {
        let mut timer = TimerController::new(3600);
        assert_eq!(timer.display(), "60:00");

        timer.start(Instant::now());
        timer.on_tick();
        assert_eq!(timer.display(), "59:59");

        let mut short = TimerController::new(65);
        short.start(Instant::now());
        for _ in 0..60 {
            short.on_tick();
        }
        assert_eq!(short.display(), "00:05");
    }
}
