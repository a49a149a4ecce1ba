//! Tick scheduling.
//!
//! The host owns the frame clock and calls into the session once per frame.
//! [`TickScheduler`] decides whether a frame belongs to a running loop, and
//! guarantees that at most one loop (audio or pointer) is scheduled at a time.

use log::debug;

/// The two mutually exclusive tick loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    Audio,
    Pointer,
}

/// Tracks which loop, if any, is scheduled.
#[derive(Debug, Default)]
pub struct TickScheduler {
    active: Option<LoopKind>,
    generation: u64,
    ticks: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind`, cancelling any other loop first.
    ///
    /// Returns the loop that was cancelled. Starting the running loop again is a no-op.
    pub fn start(&mut self, kind: LoopKind) -> Option<LoopKind> {
        if self.active == Some(kind) {
            return None;
        }
        let cancelled = self.stop();
        self.active = Some(kind);
        self.generation += 1;
        debug!("Started {:?} loop", kind);
        cancelled
    }

    /// Cancel the running loop. Stopping an idle scheduler does nothing.
    pub fn stop(&mut self) -> Option<LoopKind> {
        let cancelled = self.active.take();
        if let Some(kind) = cancelled {
            debug!("Stopped {:?} loop after {} ticks", kind, self.ticks);
            self.ticks = 0;
        }
        cancelled
    }

    pub fn active(&self) -> Option<LoopKind> {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Incremented on every successful start; lets a host drop frames queued
    /// for a loop that has since been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticks run since the current loop started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick of `kind` if it is the scheduled loop.
    ///
    /// The tick runs to completion; returns whether it ran.
    pub fn run<F: FnOnce()>(&mut self, kind: LoopKind, tick: F) -> bool {
        if self.active != Some(kind) {
            return false;
        }
        tick();
        self.ticks += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_cancels_other_loop() {
        let mut scheduler = TickScheduler::new();
        assert_eq!(scheduler.start(LoopKind::Audio), None);
        assert_eq!(scheduler.start(LoopKind::Pointer), Some(LoopKind::Audio));
        assert_eq!(scheduler.active(), Some(LoopKind::Pointer));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = TickScheduler::new();
        assert_eq!(scheduler.stop(), None);
        scheduler.start(LoopKind::Audio);
        assert_eq!(scheduler.stop(), Some(LoopKind::Audio));
        assert_eq!(scheduler.stop(), None);
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_run_only_active_loop() {
        let mut scheduler = TickScheduler::new();
        let mut count = 0;
        assert!(!scheduler.run(LoopKind::Audio, || count += 1));

        scheduler.start(LoopKind::Audio);
        assert!(scheduler.run(LoopKind::Audio, || count += 1));
        assert!(!scheduler.run(LoopKind::Pointer, || count += 1));
        assert_eq!(count, 1);
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn test_generation_bumps_on_restart() {
        let mut scheduler = TickScheduler::new();
        scheduler.start(LoopKind::Pointer);
        let first = scheduler.generation();
        scheduler.start(LoopKind::Pointer);
        assert_eq!(scheduler.generation(), first);
        scheduler.stop();
        scheduler.start(LoopKind::Pointer);
        assert_eq!(scheduler.generation(), first + 1);
    }
}
