//! Marionette
//!
//! Per-asset runtime for animated 3D assets: drives morph target and embedded
//! clip animation every frame, owns the asset's dynamically loaded texture and
//! composes its root transform. The renderer, the asset loader and the
//! platform storage are reached through the traits in [`engine`], [`assets`]
//! and [`animation::Animator`].
//!
//! ```rust,ignore
//! use marionette::{AssetInstance, AssetSettings, SystemClock, AnimationClock};
//!
//! let mut asset = AssetInstance::new(scene_asset, engine, loader, AssetSettings::default());
//! asset.play_animation(0, true)?;
//! asset.load_texture("textures/skin.png")?;
//!
//! // once per display refresh
//! let events = asset.update_animations(SystemClock.now());
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod engine;
pub mod errors;
pub mod interop;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{
    AnimationController, AnimationEvent, Animator, ClipState, EmbeddedAnimationTrack, LoopMode,
    MorphAnimationTrack, MorphWeightBuffer,
};
pub use assets::{Aabb, ResourceBuffer, ResourceId, ResourceLoader, SceneAsset};
pub use engine::{Engine, Entity, MaterialInstance, TextureId};
pub use errors::{MarionetteError, Result};
pub use interop::{Double4x4, Projection};
pub use resources::{PixelBuffer, TextureBinding, TextureDescriptor};
pub use scene::{AssetHandle, AssetInstance, AssetRegistry, TransformState};
pub use settings::{AssetSettings, ColorSpace, TextureSettings};
pub use utils::time::{AnimationClock, ManualClock, SystemClock};
