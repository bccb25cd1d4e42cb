use smallvec::SmallVec;

use crate::animation::animator::Animator;
use crate::animation::clip::{ClipState, ClipStep, EmbeddedAnimationTrack, LoopMode};
use crate::animation::morph::{MorphAnimationTrack, MorphStep};
use crate::engine::{Entity, RenderableManager};
use crate::errors::{MarionetteError, Result};
use crate::utils::time::Instant;

/// Completion signal raised during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// The morph track ran past its last frame and was released.
    MorphFinished { last_frame: usize, elapsed_ms: f64 },
    /// A non-looping clip reached its end.
    ClipFinished { index: usize },
}

pub type AnimationEvents = SmallVec<[AnimationEvent; 4]>;

/// Drives every animation of one asset.
///
/// Holds at most one morph track and one playback track per embedded clip.
/// Morph weights and bone matrices are disjoint renderer state, so the two
/// kinds run side by side and their relative order within a tick is free.
#[derive(Debug, Clone, Default)]
pub struct AnimationController {
    morph: Option<MorphAnimationTrack>,
    clips: Vec<EmbeddedAnimationTrack>,
}

impl AnimationController {
    /// One clip track per clip the animator exposes, in clip-index order.
    pub fn new<A: Animator + ?Sized>(animator: &A) -> Self {
        let clips: Vec<_> = (0..animator.animation_count())
            .map(|i| EmbeddedAnimationTrack::new(i, animator.animation_duration(i)))
            .collect();
        log::debug!("Created playback tracks for {} embedded animations", clips.len());
        Self { morph: None, clips }
    }

    // ========================================================================
    // Morph animation
    // ========================================================================

    /// Replaces the running morph animation, if any.
    pub fn set_morph_track(&mut self, track: MorphAnimationTrack) {
        if self.morph.is_some() {
            log::debug!("Replacing in-flight morph animation");
        }
        self.morph = Some(track);
    }

    /// Validates `data` and starts playing it on the next tick.
    ///
    /// On error the running morph animation (if any) is left alone.
    pub fn animate_weights(
        &mut self,
        data: Vec<f32>,
        weight_count: usize,
        frame_count: usize,
        frame_length_ms: f32,
    ) -> Result<()> {
        log::info!(
            "Making morph animation buffer with {weight_count} weights across {frame_count} frames and frame length {frame_length_ms} ms"
        );
        let track = MorphAnimationTrack::start(data, weight_count, frame_count, frame_length_ms)?;
        self.set_morph_track(track);
        Ok(())
    }

    /// Drops the running morph animation without applying anything further.
    pub fn clear_morph_track(&mut self) -> Option<MorphAnimationTrack> {
        self.morph.take()
    }

    #[must_use]
    pub fn morph_track(&self) -> Option<&MorphAnimationTrack> {
        self.morph.as_ref()
    }

    #[must_use]
    pub fn is_morph_active(&self) -> bool {
        self.morph.is_some()
    }

    // ========================================================================
    // Embedded clips
    // ========================================================================

    #[must_use]
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    #[must_use]
    pub fn clip(&self, index: usize) -> Option<&EmbeddedAnimationTrack> {
        self.clips.get(index)
    }

    #[must_use]
    pub fn clip_state(&self, index: usize) -> Option<ClipState> {
        self.clips.get(index).map(EmbeddedAnimationTrack::state)
    }

    pub fn clips(&self) -> impl Iterator<Item = &EmbeddedAnimationTrack> {
        self.clips.iter()
    }

    fn clip_mut(&mut self, index: usize) -> Result<&mut EmbeddedAnimationTrack> {
        let count = self.clips.len();
        self.clips
            .get_mut(index)
            .ok_or(MarionetteError::ClipIndexOutOfRange { index, count })
    }

    pub fn play(&mut self, index: usize, loop_mode: LoopMode) -> Result<()> {
        self.clip_mut(index)?.play(loop_mode)?;
        log::info!("Starting animation at index {index} ({loop_mode:?})");
        Ok(())
    }

    pub fn stop(&mut self, index: usize) -> Result<()> {
        self.clip_mut(index)?.stop();
        Ok(())
    }

    pub fn stop_all(&mut self) {
        for clip in &mut self.clips {
            clip.stop();
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances every track to `now` and pushes the results.
    ///
    /// Morph weights go to each of `entities` through `renderables`; clip
    /// offsets go to `animator`, followed by exactly one bone matrix update.
    pub fn tick<A, R>(
        &mut self,
        now: Instant,
        animator: &mut A,
        renderables: &R,
        entities: &[Entity],
    ) -> AnimationEvents
    where
        A: Animator + ?Sized,
        R: RenderableManager + ?Sized,
    {
        let mut events = AnimationEvents::new();

        if let Some(event) = self.step_morph(now, renderables, entities) {
            events.push(event);
        }

        for clip in &mut self.clips {
            let step = clip.step(now);
            if let Some(offset) = step.offset() {
                animator.apply_animation(clip.index(), offset);
            }
            if let ClipStep::Finished(offset) = step {
                log::info!("Animation {} finished at {offset:.3}s", clip.index());
                events.push(AnimationEvent::ClipFinished { index: clip.index() });
            }
        }

        animator.update_bone_matrices();

        events
    }

    fn step_morph<R>(
        &mut self,
        now: Instant,
        renderables: &R,
        entities: &[Entity],
    ) -> Option<AnimationEvent>
    where
        R: RenderableManager + ?Sized,
    {
        let track = self.morph.as_mut()?;
        let frame_count = track.buffer().frame_count();
        let frame_length_ms = track.frame_length_ms();

        let event = match track.step(now) {
            MorphStep::Apply { frame, weights } => {
                log::trace!("Rendering frame {frame} (of a total {frame_count})");
                for &entity in entities {
                    renderables.set_morph_weights(entity, weights);
                }
                None
            }
            MorphStep::Unchanged => None,
            MorphStep::Finished {
                last_frame,
                elapsed_ms,
            } => {
                log::info!(
                    "Morph animation completed in {elapsed_ms:.1} ms ({frame_count} frames at framerate {:.1}), final frame was {last_frame}",
                    1000.0 / frame_length_ms
                );
                Some(AnimationEvent::MorphFinished {
                    last_frame,
                    elapsed_ms,
                })
            }
        };

        if event.is_some() {
            self.morph = None;
        }
        event
    }
}
