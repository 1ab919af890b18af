//! Timers with explicit cancellation.
//!
//! Two shapes are used. [`Debouncer`] wraps a host timer (browser
//! `setTimeout` through `gloo-timers`) and coalesces bursts of calls into one.
//! [`IdleTimer`] is a deadline polled from the animation frame, used where the
//! firing must mutate state the frame loop already holds.

use gloo_timers::callback::Timeout;

/// Something that can run a callback after a delay.
///
/// Dropping the returned handle must cancel the callback if it has not run.
pub trait TimerHost {
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout`-backed host. Dropping a [`Timeout`] clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl TimerHost for BrowserTimers {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}

/// Runs only the last of a burst of calls, `delay_ms` after that call.
pub struct Debouncer<H: TimerHost> {
    host: H,
    delay_ms: u32,
    pending: Option<H::Handle>,
}

impl<H: TimerHost> Debouncer<H> {
    pub fn new(host: H, delay_ms: u32) -> Self {
        Self {
            host,
            delay_ms,
            pending: None,
        }
    }

    pub fn call(&mut self, callback: impl FnOnce() + 'static) {
        // Cancel the previous timer before arming the new one.
        self.pending = None;
        self.pending = Some(self.host.schedule(self.delay_ms, Box::new(callback)));
    }
}

/// A restartable one-shot deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleTimer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl IdleTimer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Arm the timer, replacing any pending deadline.
    pub fn restart(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// Returns true exactly once per arming, on the first poll at or past
    /// the deadline.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::manual::ManualTimers;
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn resize_burst_refreshes_once_after_last_event() {
        let timers = ManualTimers::default();
        let mut debouncer = Debouncer::new(timers.clone(), 250);
        let refreshes = Rc::new(Cell::new(0u32));
        let fired_at = Rc::new(Cell::new(0u32));

        for t in [0, 50, 100, 150, 200] {
            timers.advance_to(t);
            let refreshes = refreshes.clone();
            let fired_at = fired_at.clone();
            let clock = timers.clone();
            debouncer.call(move || {
                refreshes.set(refreshes.get() + 1);
                fired_at.set(clock.now());
            });
        }
        assert_eq!(timers.pending(), 1);

        timers.advance_to(449);
        assert_eq!(refreshes.get(), 0);
        timers.advance_to(450);
        assert_eq!(refreshes.get(), 1);
        assert_eq!(fired_at.get(), 450);
        timers.advance_to(5000);
        assert_eq!(refreshes.get(), 1);
    }

    #[test]
    fn separate_bursts_each_refresh() {
        let timers = ManualTimers::default();
        let mut debouncer = Debouncer::new(timers.clone(), 250);
        let refreshes = Rc::new(Cell::new(0u32));

        for t in [0, 1000] {
            timers.advance_to(t);
            let refreshes = refreshes.clone();
            debouncer.call(move || refreshes.set(refreshes.get() + 1));
            timers.advance_to(t + 300);
        }
        assert_eq!(refreshes.get(), 2);
    }

    #[test]
    fn dropping_debouncer_drops_pending_call() {
        let timers = ManualTimers::default();
        let mut debouncer = Debouncer::new(timers.clone(), 250);
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        debouncer.call(move || flag.set(true));
        drop(debouncer);
        timers.advance_to(1000);
        assert!(!fired.get());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn idle_timer_fires_once_per_arming() {
        let mut idle = IdleTimer::new(150.0);
        assert!(!idle.poll(0.0));
        idle.restart(0.0);
        assert!(!idle.poll(149.0));
        assert!(idle.poll(150.0));
        assert!(!idle.poll(400.0));
    }

    #[test]
    fn idle_restart_supersedes_previous_deadline() {
        let mut idle = IdleTimer::new(150.0);
        idle.restart(0.0);
        idle.restart(100.0);
        assert!(!idle.poll(150.0));
        assert!(idle.poll(250.0));
    }
}
