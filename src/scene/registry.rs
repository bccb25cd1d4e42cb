use slotmap::{SlotMap, new_key_type};

use crate::animation::AnimationEvent;
use crate::errors::{MarionetteError, Result};
use crate::scene::instance::AssetInstance;
use crate::utils::time::Instant;

new_key_type! {
    pub struct AssetHandle;
}

/// Every live asset of a session, keyed by handle.
///
/// Handles stay unique after removal, so a caller holding a handle to an
/// unloaded asset gets [`MarionetteError::MissingAsset`] instead of someone
/// else's asset.
#[derive(Default)]
pub struct AssetRegistry {
    assets: SlotMap<AssetHandle, AssetInstance>,
}

impl AssetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, asset: AssetInstance) -> AssetHandle {
        self.assets.insert(asset)
    }

    /// Unloads the asset; its dynamic texture is released with it.
    pub fn remove(&mut self, handle: AssetHandle) -> Result<AssetInstance> {
        self.assets.remove(handle).ok_or_else(|| missing(handle))
    }

    pub fn get(&self, handle: AssetHandle) -> Result<&AssetInstance> {
        self.assets.get(handle).ok_or_else(|| missing(handle))
    }

    pub fn get_mut(&mut self, handle: AssetHandle) -> Result<&mut AssetInstance> {
        self.assets.get_mut(handle).ok_or_else(|| missing(handle))
    }

    #[must_use]
    pub fn contains(&self, handle: AssetHandle) -> bool {
        self.assets.contains_key(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = AssetHandle> + '_ {
        self.assets.keys()
    }

    /// Advances every asset to `now` and collects the completion events.
    pub fn tick_all(&mut self, now: Instant) -> Vec<(AssetHandle, AnimationEvent)> {
        let mut events = Vec::new();
        for (handle, asset) in &mut self.assets {
            events.extend(asset.update_animations(now).into_iter().map(|e| (handle, e)));
        }
        events
    }
}

fn missing(handle: AssetHandle) -> MarionetteError {
    log::warn!("No asset for handle {handle:?}, ignoring call");
    MarionetteError::MissingAsset(format!("{handle:?}"))
}
