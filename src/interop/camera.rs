use glam::DMat4;

use crate::engine::Entity;
use crate::interop::matrix::Double4x4;

/// Projection kind as sent by the foreign caller.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    Perspective = 0,
    Orthographic = 1,
}

/// Projection kind understood by the engine camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineProjection {
    Perspective,
    Ortho,
}

impl From<Projection> for EngineProjection {
    fn from(projection: Projection) -> Self {
        match projection {
            Projection::Perspective => EngineProjection::Perspective,
            Projection::Orthographic => EngineProjection::Ortho,
        }
    }
}

impl TryFrom<u32> for Projection {
    type Error = u32;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Projection::Perspective),
            1 => Ok(Projection::Orthographic),
            other => Err(other),
        }
    }
}

/// Engine camera, double precision throughout.
pub trait Camera {
    fn set_projection(
        &self,
        projection: EngineProjection,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    );

    fn set_custom_projection(&self, projection: DMat4, near: f64, far: f64);

    fn model_matrix(&self) -> DMat4;

    fn view_matrix(&self) -> DMat4;

    fn entity(&self) -> Entity;

    /// Focal length in metres.
    fn focal_length(&self) -> f64;

    fn near(&self) -> f64;

    fn culling_far(&self) -> f64;
}

// ============================================================================
// Boundary helpers
// ============================================================================

pub fn set_projection<C: Camera + ?Sized>(
    camera: &C,
    projection: Projection,
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    near: f64,
    far: f64,
) {
    camera.set_projection(projection.into(), left, right, bottom, top, near, far);
}

pub fn set_custom_projection<C: Camera + ?Sized>(
    camera: &C,
    projection: Double4x4,
    near: f64,
    far: f64,
) {
    camera.set_custom_projection(projection.into(), near, far);
}

#[must_use]
pub fn model_matrix<C: Camera + ?Sized>(camera: &C) -> Double4x4 {
    camera.model_matrix().into()
}

#[must_use]
pub fn view_matrix<C: Camera + ?Sized>(camera: &C) -> Double4x4 {
    camera.view_matrix().into()
}

/// Focal length in millimetres.
#[must_use]
pub fn focal_length_mm<C: Camera + ?Sized>(camera: &C) -> f64 {
    camera.focal_length() * 1000.0
}
