//! Per-asset scene runtime
//!
//! - [`AssetInstance`]: animation, texture and transform state of one asset
//! - [`AssetRegistry`]: handle-keyed collection of asset instances
//! - [`TransformState`]: root transform composition

pub mod instance;
pub mod registry;
pub mod transform;

pub use instance::AssetInstance;
pub use registry::{AssetHandle, AssetRegistry};
pub use transform::{TransformState, unit_cube_transform};
