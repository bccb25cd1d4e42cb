use std::fmt;
use std::sync::Arc;

use crate::assets::{FetchedResource, ResourceLoader};
use crate::engine::{Engine, MaterialInstance, TextureId};
use crate::errors::{MarionetteError, Result};
use crate::resources::image::{LinearImage, decode_linear};
use crate::settings::TextureSettings;

// ============================================================================
// Texture description
// ============================================================================

/// GPU-side storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Rgb16F,
    Rgba16F,
}

/// Layout of the pixels handed to [`TextureFactory::set_image`](crate::engine::TextureFactory::set_image).
/// Components are always `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    #[must_use]
    pub fn channels(self) -> u32 {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub format: TextureFormat,
}

impl TextureDescriptor {
    /// A 2D texture sized to `image`, with a full mip chain.
    #[must_use]
    pub fn for_image(image: &LinearImage) -> Self {
        let format = if image.channels() == 4 {
            TextureFormat::Rgba16F
        } else {
            TextureFormat::Rgb16F
        };
        Self {
            width: image.width(),
            height: image.height(),
            mip_levels: image.mip_level_count(),
            format,
        }
    }
}

// ============================================================================
// Pixel buffer
// ============================================================================

type ReleaseCallback = Box<dyn FnOnce() + Send>;

/// Pixel data in flight to the GPU.
///
/// The engine may consume the buffer asynchronously. Whatever happens to it,
/// the release callback runs exactly once: when [`release`](Self::release) is
/// called or when the buffer is dropped, whichever comes first.
pub struct PixelBuffer {
    data: Vec<f32>,
    format: PixelFormat,
    width: u32,
    height: u32,
    on_release: Option<ReleaseCallback>,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(data: Vec<f32>, format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            data,
            format,
            width,
            height,
            on_release: None,
        }
    }

    #[must_use]
    pub fn with_release_callback(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(callback));
        self
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.data.as_slice())
    }

    /// Signals that the engine is done with the pixels.
    pub fn release(mut self) {
        self.fire_release();
    }

    fn fire_release(&mut self) {
        if let Some(callback) = self.on_release.take() {
            callback();
        }
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.data.len())
            .field("pending_release", &self.on_release.is_some())
            .finish()
    }
}

impl Drop for PixelBuffer {
    fn drop(&mut self) {
        self.fire_release();
    }
}

// ============================================================================
// Owned texture
// ============================================================================

/// A GPU texture destroyed when dropped.
pub struct OwnedTexture {
    id: TextureId,
    engine: Arc<dyn Engine>,
}

impl OwnedTexture {
    #[must_use]
    pub fn new(id: TextureId, engine: Arc<dyn Engine>) -> Self {
        Self { id, engine }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> TextureId {
        self.id
    }
}

impl fmt::Debug for OwnedTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedTexture").field(&self.id).finish()
    }
}

impl Drop for OwnedTexture {
    fn drop(&mut self) {
        log::debug!("Destroying texture {:?}", self.id);
        self.engine.destroy_texture(self.id);
    }
}

// ============================================================================
// Texture binding
// ============================================================================

/// The single dynamically loaded texture of an asset.
///
/// Loading always releases the previous texture first. A failed load leaves
/// the asset untextured; the old texture is not restored.
pub struct TextureBinding {
    engine: Arc<dyn Engine>,
    settings: TextureSettings,
    current: Option<OwnedTexture>,
}

impl TextureBinding {
    #[must_use]
    pub fn new(engine: Arc<dyn Engine>, settings: TextureSettings) -> Self {
        Self {
            engine,
            settings,
            current: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &TextureSettings {
        &self.settings
    }

    /// The live texture, if any.
    #[must_use]
    pub fn current(&self) -> Option<TextureId> {
        self.current.as_ref().map(OwnedTexture::id)
    }

    /// Destroys the live texture. Returns whether there was one.
    pub fn release(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Fetches `uri`, decodes it and binds it to the configured material
    /// parameter, replacing the previous texture.
    pub fn load(
        &mut self,
        uri: &str,
        loader: &Arc<dyn ResourceLoader>,
        materials: &[MaterialInstance],
    ) -> Result<TextureId> {
        log::info!("Loading texture at {uri}");

        self.release();

        let resource = FetchedResource::fetch(Arc::clone(loader), uri).map_err(|e| match e {
            MarionetteError::ImageDecodeError(_) => e,
            other => MarionetteError::ImageDecodeError(format!("failed to fetch {uri}: {other}")),
        })?;

        let image = match decode_linear(resource.bytes(), self.settings.color_space) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Invalid image {uri}: {e}");
                return Err(e);
            }
        };

        let material_index = self.settings.material_instance;
        let Some(&material) = materials.get(material_index) else {
            log::warn!(
                "Cannot bind {uri}: material instance count is {}",
                materials.len()
            );
            return Err(MarionetteError::MissingMaterial(material_index));
        };

        let descriptor = TextureDescriptor::for_image(&image);
        let texture = OwnedTexture::new(self.engine.create_texture(&descriptor), Arc::clone(&self.engine));
        let id = texture.id();

        let format = if image.channels() == 4 {
            PixelFormat::Rgba
        } else {
            PixelFormat::Rgb
        };
        let (width, height) = (image.width(), image.height());

        // The fetched bytes live until the engine lets go of the pixels.
        let buffer = PixelBuffer::new(image.into_pixels(), format, width, height)
            .with_release_callback(move || drop(resource));
        self.engine.set_image(id, 0, buffer);

        if self.settings.generate_mipmaps && descriptor.mip_levels > 1 {
            self.engine.generate_mipmaps(id);
        }

        if let Some(index_parameter) = &self.settings.index_parameter {
            self.engine.set_parameter_int(material, index_parameter, 0);
        }
        self.engine.set_parameter_texture(
            material,
            &self.settings.color_parameter,
            id,
            &self.settings.sampler,
        );

        log::debug!(
            "Bound {width}x{height} {:?} texture {id:?} ({} mip levels)",
            descriptor.format,
            descriptor.mip_levels
        );

        self.current = Some(texture);
        Ok(id)
    }
}

impl fmt::Debug for TextureBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureBinding")
            .field("settings", &self.settings)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
