//! Foreign-call boundary types
//!
//! Values crossing the boundary use double precision; the engine side of the
//! asset runtime uses `f32`. Conversions here are pure.

pub mod camera;
pub mod matrix;

pub use camera::{Camera, EngineProjection, Projection};
pub use matrix::Double4x4;
