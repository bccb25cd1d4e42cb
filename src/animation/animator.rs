/// Evaluates the clips embedded in an asset.
///
/// Owned by the asset; the runtime only drives it. Offsets are clip-local
/// seconds. [`update_bone_matrices`](Animator::update_bone_matrices) is
/// called once per tick after every clip has been evaluated.
pub trait Animator {
    fn animation_count(&self) -> usize;

    /// Length of clip `index` in seconds.
    fn animation_duration(&self, index: usize) -> f32;

    fn animation_name(&self, index: usize) -> &str;

    fn apply_animation(&mut self, index: usize, time: f32);

    fn update_bone_matrices(&mut self);
}
