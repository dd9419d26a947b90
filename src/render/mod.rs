mod buffers;
mod context;
mod pipeline;
mod scene;

pub use buffers::{CellInstance, SceneBuffers, SceneUniforms};
pub use context::GpuContext;
pub use pipeline::CellPipeline;
pub use scene::SceneRenderer;

use glam::{Vec2, Vec3};

use crate::sim::CellIndex;

/// Operations the animation core needs from a renderer. The grid owns the
/// cells; implementations only mirror them visually.
pub trait Renderer {
    /// Push a cell's world position for the next draw.
    fn set_position(&mut self, index: CellIndex, position: Vec3);

    /// Push a cell's uniform scale for the next draw.
    fn set_scale(&mut self, index: CellIndex, scale: f32);

    /// Switch a cell's visual emphasis on or off.
    fn set_highlight(&mut self, index: CellIndex, on: bool);

    /// Resolve a screen-space point to the nearest cell under it, if any.
    fn hit_test(&self, screen: Vec2) -> Option<CellIndex>;
}
