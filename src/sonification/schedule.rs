// src/sonification/schedule.rs
use super::{Chord, SonificationConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Shared cancellation flag. Clones observe the same flag, so cancelling
/// any clone cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A chord placed at an absolute offset from the start of playback.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub offset: Duration,
    pub duration: Duration,
    pub chord: Chord,
    token: CancellationToken,
}

impl ScheduledTask {
    /// End of the task, relative to the start of playback.
    pub fn end(&self) -> Duration {
        self.offset + self.duration
    }

    /// `false` once the owning schedule was cancelled.
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Whether the chord is sounding at `elapsed`.
    pub fn is_sounding(&self, elapsed: Duration) -> bool {
        self.is_live() && self.offset <= elapsed && elapsed < self.end()
    }
}

/// Timeline of chords sharing one [`CancellationToken`].
///
/// Tasks are registered once and never re-entered; the only way to stop
/// them is [`PlaybackSchedule::cancel`], which invalidates all of them.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSchedule {
    tasks: Vec<ScheduledTask>,
    token: CancellationToken,
}

impl PlaybackSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays `chords` out back to back, `note_duration` each with `gap`
    /// between them, starting at offset zero.
    pub fn sequence<I>(chords: I, config: &SonificationConfig) -> Self
    where
        I: IntoIterator<Item = Chord>,
    {
        let mut schedule = Self::new();
        let step = config.note_duration + config.gap;
        let mut offset = Duration::ZERO;
        for chord in chords {
            schedule.push(offset, config.note_duration, chord);
            offset += step;
        }
        schedule
    }

    /// Adds a task at an absolute `offset`.
    pub fn push(&mut self, offset: Duration, duration: Duration, chord: Chord) {
        self.tasks.push(ScheduledTask { offset, duration, chord, token: self.token.clone() });
    }

    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// A handle that cancels this schedule from elsewhere.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Invalidates every task at once.
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            debug!(tasks = self.tasks.len(), "playback schedule cancelled");
        }
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels and releases the schedule.
    pub fn dispose(self) {
        self.cancel();
    }

    /// Tasks sounding at `elapsed`; empty once cancelled.
    pub fn sounding_at(&self, elapsed: Duration) -> Vec<&ScheduledTask> {
        self.tasks.iter().filter(|t| t.is_sounding(elapsed)).collect()
    }

    /// Offset at which the last task ends.
    pub fn total_duration(&self) -> Duration {
        self.tasks.iter().map(ScheduledTask::end).max().unwrap_or(Duration::ZERO)
    }
}
