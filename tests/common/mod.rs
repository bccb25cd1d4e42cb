//! Recording test doubles for the engine, the platform loader and the asset.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat4, Vec3};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use parking_lot::Mutex;

use marionette::animation::Animator;
use marionette::assets::{Aabb, ResourceBuffer, ResourceId, ResourceLoader, SceneAsset};
use marionette::engine::{
    Entity, MaterialInstance, MaterialManager, NameManager, RenderableManager, TextureFactory,
    TextureId, TransformManager,
};
use marionette::errors::{MarionetteError, Result};
use marionette::resources::{PixelBuffer, PixelFormat, TextureDescriptor};
use marionette::settings::SamplerSettings;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Engine
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    MorphWeights {
        entity: Entity,
        weights: Vec<f32>,
    },
    ParameterInt {
        material: MaterialInstance,
        name: String,
        value: i32,
    },
    ParameterTexture {
        material: MaterialInstance,
        name: String,
        texture: TextureId,
    },
    Transform {
        entity: Entity,
        matrix: Mat4,
    },
    CreateTexture(TextureDescriptor),
    SetImage {
        texture: TextureId,
        level: u32,
        format: PixelFormat,
        len: usize,
    },
    GenerateMipmaps(TextureId),
    DestroyTexture(TextureId),
}

/// Records every call. With `defer_uploads` the pixel buffers are held until
/// [`complete_uploads`](Self::complete_uploads), like an asynchronous upload.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    names: HashMap<Entity, String>,
    next_texture: AtomicU64,
    defer_uploads: bool,
    in_flight: Mutex<Vec<PixelBuffer>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(names: &[(Entity, &str)]) -> Self {
        Self {
            names: names.iter().map(|(e, n)| (*e, (*n).to_owned())).collect(),
            ..Self::default()
        }
    }

    pub fn deferring_uploads() -> Self {
        Self {
            defer_uploads: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn morph_calls(&self) -> Vec<(Entity, Vec<f32>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::MorphWeights { entity, weights } => Some((entity, weights)),
                _ => None,
            })
            .collect()
    }

    pub fn transforms(&self) -> Vec<(Entity, Mat4)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::Transform { entity, matrix } => Some((entity, matrix)),
                _ => None,
            })
            .collect()
    }

    pub fn created_textures(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, EngineCall::CreateTexture(_)))
            .count()
    }

    pub fn destroyed_textures(&self) -> Vec<TextureId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::DestroyTexture(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn live_textures(&self) -> usize {
        self.created_textures() - self.destroyed_textures().len()
    }

    /// Finishes every deferred upload, dropping its pixel buffer.
    pub fn complete_uploads(&self) {
        self.in_flight.lock().clear();
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }
}

impl RenderableManager for RecordingEngine {
    fn set_morph_weights(&self, entity: Entity, weights: &[f32]) {
        self.record(EngineCall::MorphWeights {
            entity,
            weights: weights.to_vec(),
        });
    }
}

impl MaterialManager for RecordingEngine {
    fn set_parameter_int(&self, material: MaterialInstance, name: &str, value: i32) {
        self.record(EngineCall::ParameterInt {
            material,
            name: name.to_owned(),
            value,
        });
    }

    fn set_parameter_texture(
        &self,
        material: MaterialInstance,
        name: &str,
        texture: TextureId,
        _sampler: &SamplerSettings,
    ) {
        self.record(EngineCall::ParameterTexture {
            material,
            name: name.to_owned(),
            texture,
        });
    }
}

impl TransformManager for RecordingEngine {
    fn set_transform(&self, entity: Entity, transform: Mat4) {
        self.record(EngineCall::Transform {
            entity,
            matrix: transform,
        });
    }
}

impl TextureFactory for RecordingEngine {
    fn create_texture(&self, descriptor: &TextureDescriptor) -> TextureId {
        self.record(EngineCall::CreateTexture(*descriptor));
        TextureId(self.next_texture.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn set_image(&self, texture: TextureId, level: u32, buffer: PixelBuffer) {
        self.record(EngineCall::SetImage {
            texture,
            level,
            format: buffer.format(),
            len: buffer.data().len(),
        });
        if self.defer_uploads {
            self.in_flight.lock().push(buffer);
        } else {
            buffer.release();
        }
    }

    fn generate_mipmaps(&self, texture: TextureId) {
        self.record(EngineCall::GenerateMipmaps(texture));
    }

    fn destroy_texture(&self, texture: TextureId) {
        self.record(EngineCall::DestroyTexture(texture));
    }
}

impl NameManager for RecordingEngine {
    fn entity_name(&self, entity: Entity) -> Option<String> {
        self.names.get(&entity).cloned()
    }
}

// ============================================================================
// Resource loader
// ============================================================================

#[derive(Default)]
pub struct RecordingLoader {
    files: HashMap<String, Vec<u8>>,
    next_id: AtomicU64,
    fetched: Mutex<Vec<(String, ResourceId)>>,
    released: Mutex<Vec<ResourceId>>,
}

impl RecordingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, uri: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(uri.to_owned(), bytes);
        self
    }

    pub fn fetched(&self) -> Vec<(String, ResourceId)> {
        self.fetched.lock().clone()
    }

    pub fn released(&self) -> Vec<ResourceId> {
        self.released.lock().clone()
    }
}

impl ResourceLoader for RecordingLoader {
    fn fetch(&self, uri: &str) -> Result<ResourceBuffer> {
        let data = self
            .files
            .get(uri)
            .cloned()
            .ok_or_else(|| MarionetteError::MissingAsset(uri.to_owned()))?;
        let id = ResourceId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.fetched.lock().push((uri.to_owned(), id));
        Ok(ResourceBuffer { data, id })
    }

    fn release(&self, id: ResourceId) {
        self.released.lock().push(id);
    }
}

// ============================================================================
// Asset & animator
// ============================================================================

#[derive(Debug, Default)]
pub struct AnimatorLog {
    pub applied: Vec<(usize, f32)>,
    pub bone_updates: usize,
}

pub struct MockAnimator {
    clips: Vec<(String, f32)>,
    log: Arc<Mutex<AnimatorLog>>,
}

impl MockAnimator {
    pub fn new(clips: &[(&str, f32)]) -> Self {
        Self {
            clips: clips.iter().map(|(n, d)| ((*n).to_owned(), *d)).collect(),
            log: Arc::default(),
        }
    }

    pub fn log(&self) -> Arc<Mutex<AnimatorLog>> {
        Arc::clone(&self.log)
    }

    pub fn applied(&self) -> Vec<(usize, f32)> {
        self.log.lock().applied.clone()
    }

    pub fn bone_updates(&self) -> usize {
        self.log.lock().bone_updates
    }

    pub fn clear(&self) {
        let mut log = self.log.lock();
        log.applied.clear();
        log.bone_updates = 0;
    }
}

impl Animator for MockAnimator {
    fn animation_count(&self) -> usize {
        self.clips.len()
    }

    fn animation_duration(&self, index: usize) -> f32 {
        self.clips[index].1
    }

    fn animation_name(&self, index: usize) -> &str {
        &self.clips[index].0
    }

    fn apply_animation(&mut self, index: usize, time: f32) {
        self.log.lock().applied.push((index, time));
    }

    fn update_bone_matrices(&mut self) {
        self.log.lock().bone_updates += 1;
    }
}

pub struct MockAsset {
    pub entities: Vec<Entity>,
    pub root: Entity,
    pub materials: Vec<MaterialInstance>,
    pub animator: MockAnimator,
    pub bounds: Aabb,
    pub morph_targets: HashMap<Entity, Vec<String>>,
    pub cameras: Vec<Entity>,
    pub lights: Vec<Entity>,
}

impl MockAsset {
    /// Three entities (root 1, meshes 2 and 3), one material, the given clips.
    pub fn new(clips: &[(&str, f32)]) -> Self {
        Self {
            entities: vec![Entity(1), Entity(2), Entity(3)],
            root: Entity(1),
            materials: vec![MaterialInstance(10)],
            animator: MockAnimator::new(clips),
            bounds: Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
            morph_targets: HashMap::new(),
            cameras: Vec::new(),
            lights: Vec::new(),
        }
    }
}

impl SceneAsset for MockAsset {
    fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn root(&self) -> Entity {
        self.root
    }

    fn material_instances(&self) -> &[MaterialInstance] {
        &self.materials
    }

    fn animator(&self) -> &dyn Animator {
        &self.animator
    }

    fn animator_mut(&mut self) -> &mut dyn Animator {
        &mut self.animator
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    fn morph_target_names(&self, entity: Entity) -> Vec<String> {
        self.morph_targets.get(&entity).cloned().unwrap_or_default()
    }

    fn camera_entities(&self) -> &[Entity] {
        &self.cameras
    }

    fn light_entities(&self) -> &[Entity] {
        &self.lights
    }
}

// ============================================================================
// Images
// ============================================================================

pub fn png_rgb(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([255, 128, 0]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}

pub fn png_rgba(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}
