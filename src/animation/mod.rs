//! Animation Module
//!
//! Two independent kinds of animation run on every asset:
//!
//! - [`MorphAnimationTrack`]: externally supplied morph target weights,
//!   one frame per fixed time slice
//! - [`EmbeddedAnimationTrack`]: playback state of a clip authored in the
//!   asset, evaluated through the asset's [`Animator`]
//!
//! [`AnimationController`] owns both and advances them once per tick.

pub mod animator;
pub mod clip;
pub mod controller;
pub mod morph;

pub use animator::Animator;
pub use clip::{ClipState, ClipStep, EmbeddedAnimationTrack, LoopMode};
pub use controller::{AnimationController, AnimationEvent, AnimationEvents};
pub use morph::{MorphAnimationTrack, MorphStep, MorphWeightBuffer};
