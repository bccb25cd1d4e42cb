//! Engine Service Interfaces
//!
//! The renderer itself is an external collaborator. This module describes the
//! narrow slice of it the per-asset runtime talks to:
//!
//! - [`RenderableManager`]: morph weights per renderable entity
//! - [`MaterialManager`]: material parameters (texture + sampler, integers)
//! - [`TransformManager`]: the root entity's model matrix
//! - [`TextureFactory`]: GPU texture creation, upload and destruction
//! - [`NameManager`]: entity names, used to find meshes by name
//!
//! [`Engine`] bundles them. Implementations are shared across every asset of
//! a session, so all methods take `&self`; an engine that needs mutation
//! behind the handle is expected to synchronise internally.
//!
//! ```rust,ignore
//! let engine: Arc<dyn Engine> = Arc::new(MyRendererBridge::new(device));
//! let asset = AssetInstance::new(scene_asset, engine.clone(), loader, AssetSettings::default());
//! ```

use glam::Mat4;

use crate::resources::texture::{PixelBuffer, TextureDescriptor};
use crate::settings::SamplerSettings;

/// Opaque entity id issued by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub u32);

/// Opaque material instance id issued by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialInstance(pub u32);

/// Opaque GPU texture id issued by [`TextureFactory::create_texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

pub trait RenderableManager {
    /// Replaces the morph target weights of `entity`. Entities without
    /// renderable data ignore the call.
    fn set_morph_weights(&self, entity: Entity, weights: &[f32]);
}

pub trait MaterialManager {
    fn set_parameter_int(&self, material: MaterialInstance, name: &str, value: i32);

    fn set_parameter_texture(
        &self,
        material: MaterialInstance,
        name: &str,
        texture: TextureId,
        sampler: &SamplerSettings,
    );
}

pub trait TransformManager {
    fn set_transform(&self, entity: Entity, transform: Mat4);
}

pub trait TextureFactory {
    fn create_texture(&self, descriptor: &TextureDescriptor) -> TextureId;

    /// Uploads `buffer` into mip `level`. The upload may complete later on a
    /// renderer thread; the engine drops (or releases) the buffer once the
    /// pixels are no longer needed.
    fn set_image(&self, texture: TextureId, level: u32, buffer: PixelBuffer);

    fn generate_mipmaps(&self, texture: TextureId);

    fn destroy_texture(&self, texture: TextureId);
}

pub trait NameManager {
    fn entity_name(&self, entity: Entity) -> Option<String>;
}

/// Every renderer service the per-asset runtime needs.
pub trait Engine:
    RenderableManager + MaterialManager + TransformManager + TextureFactory + NameManager + Send + Sync
{
}

impl<T> Engine for T where
    T: RenderableManager
        + MaterialManager
        + TransformManager
        + TextureFactory
        + NameManager
        + Send
        + Sync
{
}
