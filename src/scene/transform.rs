use glam::{Mat4, Vec3};

use crate::assets::Aabb;
use crate::errors::{MarionetteError, Result};

/// Placement of an asset's root entity.
///
/// Position, rotation and a uniform scale are kept as separate components.
/// Every mutator recomputes the model matrix right away; there is no dirty
/// flag and no deferred update.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    position: Mat4,
    rotation: Mat4,
    scale: f32,

    model: Mat4,
}

impl TransformState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            scale: 1.0,
            model: Mat4::IDENTITY,
        }
    }

    /// `position * rotation * scale`.
    #[inline]
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position.w_axis.truncate()
    }

    #[inline]
    #[must_use]
    pub fn rotation_matrix(&self) -> Mat4 {
        self.rotation
    }

    pub fn set_scale(&mut self, scale: f32) -> Mat4 {
        self.scale = scale;
        self.recompute()
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) -> Mat4 {
        self.position = Mat4::from_translation(Vec3::new(x, y, z));
        self.recompute()
    }

    /// Rotation of `radians` around the axis `(x, y, z)`. The axis does not
    /// need to be normalised but must not be zero.
    pub fn set_rotation(&mut self, radians: f32, x: f32, y: f32, z: f32) -> Result<Mat4> {
        let axis = Vec3::new(x, y, z)
            .try_normalize()
            .ok_or(MarionetteError::InvalidRotationAxis(x, y, z))?;
        self.rotation = Mat4::from_axis_angle(axis, radians);
        Ok(self.recompute())
    }

    fn recompute(&mut self) -> Mat4 {
        self.model = self.position * self.rotation * Mat4::from_scale(Vec3::splat(self.scale));
        self.model
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform fitting `bounds` into the cube [-1, 1]³ centred at the origin.
///
/// The largest side ends up 2 units long. A box with no extent is only
/// recentred.
#[must_use]
pub fn unit_cube_transform(bounds: &Aabb) -> Mat4 {
    let center = bounds.center();
    let max_extent = bounds.half_extent().max_element() * 2.0;
    let recenter = Mat4::from_translation(-center);

    if max_extent <= f32::EPSILON || !max_extent.is_finite() {
        return recenter;
    }

    Mat4::from_scale(Vec3::splat(2.0 / max_extent)) * recenter
}
