//! Asset Interfaces
//!
//! Assets are parsed and instantiated by the renderer's loader; this crate only
//! sees the result through [`SceneAsset`]. Raw bytes for textures come from a
//! platform [`ResourceLoader`](io::ResourceLoader).

pub mod io;

use glam::Vec3;

use crate::animation::Animator;
use crate::engine::{Entity, MaterialInstance};

pub use io::{FetchedResource, ResourceBuffer, ResourceId, ResourceLoader};

/// Axis-aligned bounding box in asset space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    #[must_use]
    pub fn half_extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// A loaded, instantiated asset: its entity hierarchy, materials and clips.
pub trait SceneAsset {
    /// Every entity of the asset, renderable or not.
    fn entities(&self) -> &[Entity];

    fn root(&self) -> Entity;

    fn material_instances(&self) -> &[MaterialInstance];

    fn animator(&self) -> &dyn Animator;

    fn animator_mut(&mut self) -> &mut dyn Animator;

    fn bounding_box(&self) -> Aabb;

    /// Morph target names of `entity`, in weight order.
    fn morph_target_names(&self, entity: Entity) -> Vec<String>;

    fn camera_entities(&self) -> &[Entity] {
        &[]
    }

    fn light_entities(&self) -> &[Entity] {
        &[]
    }
}
