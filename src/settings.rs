//! Asset Runtime Settings
//!
//! Configuration consumed when an [`AssetInstance`](crate::scene::AssetInstance)
//! is created. Every field has a default matching what a glTF-style material
//! expects, so most callers never touch it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use marionette::settings::{AssetSettings, ColorSpace};
//!
//! // Defaults: material instance 0, `baseColorMap`, sRGB source, mipmaps on
//! let settings = AssetSettings::default();
//!
//! // Data textures (normal maps, masks) are already linear
//! let mut settings = AssetSettings::default();
//! settings.texture.color_space = ColorSpace::Linear;
//!
//! // Or from JSON shipped with the app
//! let settings = AssetSettings::from_json_str(r#"{ "texture": { "generate_mipmaps": false } }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Result;

// ---------------------------------------------------------------------------
// ColorSpace
// ---------------------------------------------------------------------------

/// Encoding of the source image's colour channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Colour channels are sRGB encoded and get linearised on decode.
    #[default]
    Srgb,
    /// Colour channels are used as-is.
    Linear,
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    ClampToEdge,
    #[default]
    Repeat,
    MirroredRepeat,
}

/// Sampler configuration handed to the material along with the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
    pub mipmap_filter: FilterMode,
    // 1 = off
    pub anisotropy: u16,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Linear,
            anisotropy: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// TextureSettings
// ---------------------------------------------------------------------------

/// How a dynamically loaded texture is decoded and bound.
///
/// | Field               | Default            |
/// |---------------------|--------------------|
/// | `material_instance` | `0`                |
/// | `color_parameter`   | `"baseColorMap"`   |
/// | `index_parameter`   | `"baseColorIndex"` |
/// | `color_space`       | `Srgb`             |
/// | `generate_mipmaps`  | `true`             |
/// | `sampler`           | linear / repeat    |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    pub material_instance: usize,
    pub color_parameter: String,
    /// Integer parameter set to 0 alongside the texture (UV set selector).
    /// `None` skips it.
    pub index_parameter: Option<String>,
    pub color_space: ColorSpace,
    pub generate_mipmaps: bool,
    pub sampler: SamplerSettings,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            material_instance: 0,
            color_parameter: "baseColorMap".to_owned(),
            index_parameter: Some("baseColorIndex".to_owned()),
            color_space: ColorSpace::Srgb,
            generate_mipmaps: true,
            sampler: SamplerSettings::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    pub texture: TextureSettings,
}

impl AssetSettings {
    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
