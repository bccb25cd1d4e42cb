use crate::errors::{MarionetteError, Result};
use crate::utils::time::{Instant, elapsed_ms};

/// Per-frame morph target weights, laid out frame after frame.
///
/// The caller hands the buffer over once; it is never copied. Dimensions are
/// checked up front so [`frame`](Self::frame) can never read past the end.
#[derive(Debug, Clone)]
pub struct MorphWeightBuffer {
    data: Vec<f32>,
    weight_count: usize,
    frame_count: usize,
}

impl MorphWeightBuffer {
    pub fn new(data: Vec<f32>, weight_count: usize, frame_count: usize) -> Result<Self> {
        if weight_count == 0 || frame_count == 0 {
            return Err(MarionetteError::InvalidAnimationData(format!(
                "empty animation: {weight_count} weights x {frame_count} frames"
            )));
        }

        let required = weight_count.checked_mul(frame_count).ok_or_else(|| {
            MarionetteError::InvalidAnimationData(format!(
                "{weight_count} weights x {frame_count} frames overflows"
            ))
        })?;

        if required > data.len() {
            return Err(MarionetteError::InvalidAnimationData(format!(
                "{weight_count} weights x {frame_count} frames needs {required} values, buffer holds {}",
                data.len()
            )));
        }

        Ok(Self {
            data,
            weight_count,
            frame_count,
        })
    }

    #[inline]
    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.weight_count
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Weights of frame `index`, `weight_count` values long.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        if index >= self.frame_count {
            return None;
        }
        let start = index * self.weight_count;
        self.data.get(start..start + self.weight_count)
    }

    /// Hands the buffer back to the caller.
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }
}

/// Outcome of a single [`MorphAnimationTrack::step`].
#[derive(Debug, PartialEq)]
pub enum MorphStep<'a> {
    /// A new frame is due; push `weights` to the renderables.
    Apply { frame: usize, weights: &'a [f32] },
    /// Still showing the frame applied last time.
    Unchanged,
    /// Playback ran past the last frame. Nothing should be applied and the
    /// track should be dropped.
    Finished { last_frame: usize, elapsed_ms: f64 },
}

#[derive(Debug, Clone, Copy)]
struct Progress {
    frame: usize,
    started_at: Instant,
}

/// Fixed-rate playback of a [`MorphWeightBuffer`].
///
/// The frame shown is derived from wall time, not from the number of ticks,
/// so a slow tick skips frames instead of slowing the animation down.
#[derive(Debug, Clone)]
pub struct MorphAnimationTrack {
    buffer: MorphWeightBuffer,
    frame_length_ms: f64,
    // None until the first step
    progress: Option<Progress>,
}

impl MorphAnimationTrack {
    pub fn new(buffer: MorphWeightBuffer, frame_length_ms: f32) -> Result<Self> {
        if !frame_length_ms.is_finite() || frame_length_ms <= 0.0 {
            return Err(MarionetteError::InvalidAnimationData(format!(
                "frame length must be a positive number of milliseconds, got {frame_length_ms}"
            )));
        }

        Ok(Self {
            buffer,
            frame_length_ms: f64::from(frame_length_ms),
            progress: None,
        })
    }

    /// Validates the raw data and builds a track in one go.
    pub fn start(
        data: Vec<f32>,
        weight_count: usize,
        frame_count: usize,
        frame_length_ms: f32,
    ) -> Result<Self> {
        let buffer = MorphWeightBuffer::new(data, weight_count, frame_count)?;
        Self::new(buffer, frame_length_ms)
    }

    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &MorphWeightBuffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub fn frame_length_ms(&self) -> f64 {
        self.frame_length_ms
    }

    /// Index of the frame applied last, `None` before the first step.
    #[must_use]
    pub fn current_frame(&self) -> Option<usize> {
        self.progress.map(|p| p.frame)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<Instant> {
        self.progress.map(|p| p.started_at)
    }

    /// Total playback length in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.buffer.frame_count() as f64 * self.frame_length_ms
    }

    pub fn step(&mut self, now: Instant) -> MorphStep<'_> {
        let Some(progress) = self.progress else {
            self.progress = Some(Progress {
                frame: 0,
                started_at: now,
            });
            return self.apply(0);
        };

        let elapsed = elapsed_ms(progress.started_at, now);
        let frame = (elapsed / self.frame_length_ms).floor() as usize;

        if frame >= self.buffer.frame_count() {
            return MorphStep::Finished {
                last_frame: progress.frame,
                elapsed_ms: elapsed,
            };
        }

        if frame == progress.frame {
            return MorphStep::Unchanged;
        }

        self.progress = Some(Progress { frame, ..progress });
        self.apply(frame)
    }

    fn apply(&self, frame: usize) -> MorphStep<'_> {
        match self.buffer.frame(frame) {
            Some(weights) => MorphStep::Apply { frame, weights },
            // frame < frame_count is checked by the caller
            None => MorphStep::Unchanged,
        }
    }
}
