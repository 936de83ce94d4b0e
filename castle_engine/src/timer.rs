//! Deferred restart after the player runs out of life points.
//!
//! The countdown runs on its own thread and only ever sends one
//! [`SessionEvent::RestartDue`], tagged with the generation it was scheduled
//! under. Cancelling wakes the thread early and moves to a new generation, so an
//! event that was already sent is recognised as stale by [`RestartTimer::is_current`].

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::info;

/// Events delivered to the session loop from outside the command flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    RestartDue(u64),
}

struct Pending {
    cancel: Sender<()>,
    handle: JoinHandle<()>,
}

/// A cancellable one-shot timer.
#[derive(Default)]
pub struct RestartTimer {
    pending: Option<Pending>,
    generation: u64,
}

impl RestartTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the countdown. Does nothing if one is already running, so a defeat
    /// reported twice still restarts once. Returns whether a countdown was started.
    pub fn schedule(&mut self, delay: Duration, events: Sender<SessionEvent>) -> bool {
        if self.is_pending() {
            return false;
        }
        self.generation += 1;
        let generation = self.generation;
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = cancelled.recv_timeout(delay) {
                let _ = events.send(SessionEvent::RestartDue(generation));
            }
        });
        info!("restart #{generation} scheduled in {}s", delay.as_secs());
        self.pending = Some(Pending { cancel, handle });
        true
    }

    /// Stop a running countdown and void any event it already sent.
    /// Returns whether a countdown was still on record.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        let Some(Pending { cancel, handle }) = self.pending.take() else {
            return false;
        };
        let _ = cancel.send(());
        let _ = handle.join();
        info!("pending restart cancelled");
        true
    }

    /// True while a countdown is running and has not fired.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.handle.is_finished())
    }

    /// True if an event from `generation` was neither cancelled nor superseded.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Forget a countdown that has already fired.
    pub fn clear_fired(&mut self) {
        if self.pending.as_ref().is_some_and(|p| p.handle.is_finished()) {
            self.pending = None;
        }
    }
}

impl Drop for RestartTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_the_delay() {
        let (tx, rx) = mpsc::channel();
        let mut timer = RestartTimer::new();
        assert!(timer.schedule(Duration::from_millis(20), tx.clone()));
        assert!(!timer.schedule(Duration::from_millis(20), tx));
        let Ok(SessionEvent::RestartDue(generation)) = rx.recv_timeout(Duration::from_secs(5)) else {
            panic!("timer never fired");
        };
        assert!(timer.is_current(generation));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn cancel_after_firing_voids_the_sent_event() {
        let (tx, rx) = mpsc::channel();
        let mut timer = RestartTimer::new();
        timer.schedule(Duration::from_millis(10), tx);
        let Ok(SessionEvent::RestartDue(generation)) = rx.recv_timeout(Duration::from_secs(5)) else {
            panic!("timer never fired");
        };
        assert!(timer.cancel());
        assert!(!timer.is_current(generation));
    }

    #[test]
    fn cancelled_timer_stays_silent() {
        let (tx, rx) = mpsc::channel();
        let mut timer = RestartTimer::new();
        timer.schedule(Duration::from_millis(200), tx);
        assert!(timer.cancel());
        assert!(!timer.is_pending());
        assert!(rx.recv_timeout(Duration::from_millis(400)).is_err());
        assert!(!timer.cancel());
    }
}
