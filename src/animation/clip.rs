use crate::errors::{MarionetteError, Result};
use crate::utils::time::{Instant, elapsed_secs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    #[default]
    Once,
    Loop,
}

impl From<bool> for LoopMode {
    fn from(looping: bool) -> Self {
        if looping { LoopMode::Loop } else { LoopMode::Once }
    }
}

/// Playback state of one embedded clip.
///
/// ```text
///   play()          step()               step(), elapsed >= duration, Once
/// Stopped ──► Pending ──► Playing{started_at} ─────────────────────────► Finished
///    ▲           │              │  ▲                                        │
///    └── stop() ─┴──── stop() ──┘  └── step(), elapsed >= duration, Loop    │
///    Finished ──► Pending on play()  ◄────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipState {
    Stopped,
    /// Play requested; the start time is latched on the next step.
    Pending,
    Playing { started_at: Instant },
    Finished,
}

/// Outcome of a single [`EmbeddedAnimationTrack::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipStep {
    /// Nothing to evaluate.
    Idle,
    /// Evaluate the clip at this offset (seconds).
    Apply(f32),
    /// The clip ran to its end. Evaluate at this final offset (seconds); the
    /// track is now [`ClipState::Finished`].
    Finished(f32),
}

impl ClipStep {
    /// The offset to hand the animator, if any.
    #[must_use]
    pub fn offset(&self) -> Option<f32> {
        match *self {
            ClipStep::Idle => None,
            ClipStep::Apply(t) | ClipStep::Finished(t) => Some(t),
        }
    }
}

/// Wall-clock playback of one clip embedded in the asset.
#[derive(Debug, Clone)]
pub struct EmbeddedAnimationTrack {
    index: usize,
    duration: f32,
    loop_mode: LoopMode,
    state: ClipState,
}

impl EmbeddedAnimationTrack {
    #[must_use]
    pub fn new(index: usize, duration: f32) -> Self {
        Self {
            index,
            duration,
            loop_mode: LoopMode::Once,
            state: ClipState::Stopped,
        }
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Clip length in seconds.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> ClipState {
        self.state
    }

    /// Pending or playing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, ClipState::Pending | ClipState::Playing { .. })
    }

    /// Requests playback from the start of the clip.
    ///
    /// A clip that has already started must be stopped first; the request is
    /// rejected with [`MarionetteError::AlreadyPlaying`] and the running
    /// playback is left untouched. A request while still pending only updates
    /// the loop mode.
    pub fn play(&mut self, loop_mode: LoopMode) -> Result<()> {
        if let ClipState::Playing { .. } = self.state {
            return Err(MarionetteError::AlreadyPlaying(self.index));
        }
        self.loop_mode = loop_mode;
        self.state = ClipState::Pending;
        Ok(())
    }

    pub fn stop(&mut self) {
        self.state = ClipState::Stopped;
    }

    pub fn step(&mut self, now: Instant) -> ClipStep {
        match self.state {
            ClipState::Stopped | ClipState::Finished => ClipStep::Idle,
            ClipState::Pending => {
                self.state = ClipState::Playing { started_at: now };
                ClipStep::Apply(0.0)
            }
            ClipState::Playing { started_at } => {
                let elapsed = elapsed_secs(started_at, now) as f32;
                if elapsed < self.duration {
                    return ClipStep::Apply(elapsed);
                }

                match self.loop_mode {
                    LoopMode::Loop => {
                        self.state = ClipState::Playing { started_at: now };
                        ClipStep::Apply(0.0)
                    }
                    LoopMode::Once => {
                        self.state = ClipState::Finished;
                        ClipStep::Finished(elapsed)
                    }
                }
            }
        }
    }
}
