//! GPU-facing resources: decoded images and the per-asset texture binding.

pub mod image;
pub mod texture;

pub use self::image::{LinearImage, decode_linear};
pub use texture::{
    OwnedTexture, PixelBuffer, PixelFormat, TextureBinding, TextureDescriptor, TextureFormat,
};
