use bytemuck::{Pod, Zeroable};
use glam::{DMat4, DVec4, Mat4};

/// 4×4 double precision matrix exchanged across the foreign-call boundary.
///
/// Stored as four columns of four elements; `colN[r]` is row `r` of column
/// `N`, the same element order as the engine's native matrices, so converting
/// is a plain element copy (plus a precision cast for `Mat4`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Double4x4 {
    pub col1: [f64; 4],
    pub col2: [f64; 4],
    pub col3: [f64; 4],
    pub col4: [f64; 4],
}

impl Double4x4 {
    pub const IDENTITY: Self = Self {
        col1: [1.0, 0.0, 0.0, 0.0],
        col2: [0.0, 1.0, 0.0, 0.0],
        col3: [0.0, 0.0, 1.0, 0.0],
        col4: [0.0, 0.0, 0.0, 1.0],
    };

    /// Column-major flat view, `col1` first.
    #[must_use]
    pub fn to_cols_array(&self) -> [f64; 16] {
        bytemuck::cast(*self)
    }

    #[must_use]
    pub fn from_cols_array(values: &[f64; 16]) -> Self {
        bytemuck::cast(*values)
    }
}

impl Default for Double4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<DMat4> for Double4x4 {
    fn from(m: DMat4) -> Self {
        Self {
            col1: m.x_axis.to_array(),
            col2: m.y_axis.to_array(),
            col3: m.z_axis.to_array(),
            col4: m.w_axis.to_array(),
        }
    }
}

impl From<Double4x4> for DMat4 {
    fn from(m: Double4x4) -> Self {
        DMat4::from_cols(
            DVec4::from_array(m.col1),
            DVec4::from_array(m.col2),
            DVec4::from_array(m.col3),
            DVec4::from_array(m.col4),
        )
    }
}

impl From<Mat4> for Double4x4 {
    fn from(m: Mat4) -> Self {
        Self::from(m.as_dmat4())
    }
}

/// Narrows to single precision. Values outside `f32` range become infinite.
impl From<Double4x4> for Mat4 {
    fn from(m: Double4x4) -> Self {
        DMat4::from(m).as_mat4()
    }
}
