use std::fmt;
use std::sync::Arc;

use glam::Mat4;

use crate::animation::{AnimationController, AnimationEvents, LoopMode};
use crate::assets::{ResourceLoader, SceneAsset};
use crate::engine::{Engine, Entity, TextureId};
use crate::errors::Result;
use crate::resources::TextureBinding;
use crate::scene::transform::{TransformState, unit_cube_transform};
use crate::settings::AssetSettings;
use crate::utils::time::Instant;

/// Runtime state of one loaded asset.
///
/// Wires the asset's animations, its dynamic texture and its root transform
/// to the shared engine services. Every operation runs on the thread that
/// drives the per-frame tick.
///
/// # Lifecycle
///
/// 1. Create with [`AssetInstance::new`] once the asset is instantiated
/// 2. Route play/stop/texture/transform requests to it between ticks
/// 3. Call [`update_animations`](Self::update_animations) once per frame
/// 4. Drop it to release the dynamic texture
pub struct AssetInstance {
    asset: Box<dyn SceneAsset>,
    engine: Arc<dyn Engine>,
    loader: Arc<dyn ResourceLoader>,

    // Snapshot of the asset's entities, the targets of morph weights.
    entities: Vec<Entity>,

    animation: AnimationController,
    texture: TextureBinding,
    transform: TransformState,
}

impl AssetInstance {
    #[must_use]
    pub fn new(
        asset: Box<dyn SceneAsset>,
        engine: Arc<dyn Engine>,
        loader: Arc<dyn ResourceLoader>,
        settings: AssetSettings,
    ) -> Self {
        let entities = asset.entities().to_vec();
        let animation = AnimationController::new(asset.animator());
        let texture = TextureBinding::new(Arc::clone(&engine), settings.texture);

        Self {
            asset,
            engine,
            loader,
            entities,
            animation,
            texture,
            transform: TransformState::new(),
        }
    }

    #[must_use]
    pub fn asset(&self) -> &dyn SceneAsset {
        self.asset.as_ref()
    }

    #[must_use]
    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    #[must_use]
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Pushes one set of morph weights to every entity right away.
    pub fn apply_weights(&self, weights: &[f32]) {
        for &entity in &self.entities {
            self.engine.set_morph_weights(entity, weights);
        }
    }

    /// Plays `frame_count` frames of `weight_count` morph weights, one frame
    /// every `frame_length_ms`, replacing any morph animation in flight.
    pub fn animate_weights(
        &mut self,
        data: Vec<f32>,
        weight_count: usize,
        frame_count: usize,
        frame_length_ms: f32,
    ) -> Result<()> {
        self.animation
            .animate_weights(data, weight_count, frame_count, frame_length_ms)
            .inspect_err(|e| log::warn!("Rejected morph animation: {e}"))
    }

    pub fn play_animation(&mut self, index: usize, looping: bool) -> Result<()> {
        log::debug!("Playing animation at index {index}");
        self.animation
            .play(index, LoopMode::from(looping))
            .inspect_err(|e| {
                if e.is_advisory() {
                    log::info!("{e}");
                } else {
                    log::warn!("Cannot play animation: {e}");
                }
            })
    }

    pub fn stop_animation(&mut self, index: usize) -> Result<()> {
        self.animation
            .stop(index)
            .inspect_err(|e| log::warn!("Cannot stop animation: {e}"))
    }

    /// Per-frame update: advances morph and clip playback to `now`.
    pub fn update_animations(&mut self, now: Instant) -> AnimationEvents {
        self.animation.tick(
            now,
            self.asset.animator_mut(),
            self.engine.as_ref(),
            &self.entities,
        )
    }

    #[must_use]
    pub fn animation_names(&self) -> Vec<String> {
        let animator = self.asset.animator();
        let names: Vec<String> = (0..animator.animation_count())
            .map(|i| animator.animation_name(i).to_owned())
            .collect();
        log::debug!("Found {} animations in asset", names.len());
        names
    }

    /// Morph target names of the first entity called `mesh_name`. Empty if no
    /// entity has that name.
    #[must_use]
    pub fn morph_target_names(&self, mesh_name: &str) -> Vec<String> {
        log::debug!("Retrieving morph target names for mesh {mesh_name}");
        self.entities
            .iter()
            .copied()
            .find(|&e| self.engine.entity_name(e).as_deref() == Some(mesh_name))
            .map(|e| self.asset.morph_target_names(e))
            .unwrap_or_default()
    }

    // ========================================================================
    // Texture
    // ========================================================================

    /// Replaces the asset's dynamic texture with the image at `uri`.
    ///
    /// The previous texture is released even if this load fails.
    pub fn load_texture(&mut self, uri: &str) -> Result<TextureId> {
        self.texture
            .load(uri, &self.loader, self.asset.material_instances())
            .inspect_err(|e| log::warn!("Texture load failed, asset left untextured: {e}"))
    }

    #[must_use]
    pub fn texture(&self) -> Option<TextureId> {
        self.texture.current()
    }

    pub fn release_texture(&mut self) -> bool {
        self.texture.release()
    }

    // ========================================================================
    // Transform
    // ========================================================================

    pub fn set_scale(&mut self, scale: f32) {
        let model = self.transform.set_scale(scale);
        self.push_transform(model);
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        log::debug!("Setting position to {x} {y} {z}");
        let model = self.transform.set_position(x, y, z);
        self.push_transform(model);
    }

    pub fn set_rotation(&mut self, radians: f32, x: f32, y: f32, z: f32) -> Result<()> {
        log::debug!("Rotating {radians} radians around axis {x} {y} {z}");
        let model = self.transform.set_rotation(radians, x, y, z)?;
        self.push_transform(model);
        Ok(())
    }

    /// Scales and recentres the asset so it fits the [-1, 1] cube.
    ///
    /// Bypasses the position/rotation/scale components; the next mutator call
    /// overwrites it.
    pub fn transform_to_unit_cube(&mut self) -> Mat4 {
        log::debug!("Transforming asset to unit cube");
        let model = unit_cube_transform(&self.asset.bounding_box());
        self.push_transform(model);
        model
    }

    fn push_transform(&self, model: Mat4) {
        self.engine.set_transform(self.asset.root(), model);
    }

    // ========================================================================
    // Pass-through queries
    // ========================================================================

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[must_use]
    pub fn camera_entities(&self) -> &[Entity] {
        self.asset.camera_entities()
    }

    #[must_use]
    pub fn light_entities(&self) -> &[Entity] {
        self.asset.light_entities()
    }
}

impl fmt::Debug for AssetInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetInstance")
            .field("entities", &self.entities.len())
            .field("animation", &self.animation)
            .field("texture", &self.texture)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}
