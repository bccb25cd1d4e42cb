//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`MarionetteError`] covers every failure mode of the
//! per-asset runtime:
//! - Malformed morph animation data
//! - Clip playback requests on clips that do not exist or are already running
//! - Texture fetch and decode failures
//! - Operations on assets that were unloaded
//!
//! None of these are fatal. Callers are expected to log and continue.
//!
//! ```rust,ignore
//! use marionette::errors::{MarionetteError, Result};
//!
//! fn play_intro(asset: &mut AssetInstance) -> Result<()> {
//!     asset.play_animation(0, false)
//! }
//! ```

use thiserror::Error;

/// The main error type for the animation and texture-binding runtime.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarionetteError {
    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// Morph animation dimensions do not describe the supplied buffer.
    #[error("Invalid animation data: {0}")]
    InvalidAnimationData(String),

    /// Play or stop requested on a clip the asset does not contain.
    #[error("Clip index out of range: {index} (clip count: {count})")]
    ClipIndexOutOfRange {
        /// The requested clip index
        index: usize,
        /// Number of clips embedded in the asset
        count: usize,
    },

    /// Play requested on a clip that is already running. Advisory only.
    #[error("Animation {0} is already playing, stop it first")]
    AlreadyPlaying(usize),

    // ========================================================================
    // Texture Errors
    // ========================================================================
    /// Fetched bytes could not be turned into an image (or could not be fetched).
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// The asset has no material instance to bind a texture to.
    #[error("Asset has no material instance at index {0}")]
    MissingMaterial(usize),

    // ========================================================================
    // Asset & Transform Errors
    // ========================================================================
    /// The asset handle does not refer to a loaded asset.
    #[error("Asset not found: {0}")]
    MissingAsset(String),

    /// Rotation requested around a zero-length axis.
    #[error("Invalid rotation axis: ({0}, {1}, {2})")]
    InvalidRotationAxis(f32, f32, f32),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Settings could not be parsed.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl MarionetteError {
    /// Whether the error only reports a redundant request.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        matches!(self, MarionetteError::AlreadyPlaying(_))
    }
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<image::ImageError> for MarionetteError {
    fn from(err: image::ImageError) -> Self {
        MarionetteError::ImageDecodeError(err.to_string())
    }
}

impl From<serde_json::Error> for MarionetteError {
    fn from(err: serde_json::Error) -> Self {
        MarionetteError::InvalidSettings(err.to_string())
    }
}

/// Alias for `Result<T, MarionetteError>`.
pub type Result<T> = std::result::Result<T, MarionetteError>;
