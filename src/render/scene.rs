use std::sync::Arc;

use glam::{Mat3, Mat4, Vec2, Vec3};
use winit::window::Window;

use crate::camera::{ray_sphere, Camera};
use crate::config::CELL_RADIUS;
use crate::render::buffers::{CellInstance, SceneBuffers, SceneUniforms};
use crate::render::context::GpuContext;
use crate::render::pipeline::CellPipeline;
use crate::render::Renderer;
use crate::sim::CellIndex;

/// wgpu-backed implementation of [`Renderer`].
///
/// Keeps a CPU mirror of the per-cell instance data; the frame driver
/// pushes positions and scales through the trait, then `draw` uploads the
/// whole array and renders it. The same mirror serves the hit-test, so
/// picking always sees exactly what is on screen.
pub struct SceneRenderer {
    gpu: GpuContext,
    buffers: SceneBuffers,
    pipeline: CellPipeline,
    camera: Camera,
    instances: Vec<CellInstance>,
    side: usize,
    spin: f32,
}

impl SceneRenderer {
    /// Build the full GPU stack for a `side` x `side` grid. Any failure
    /// here is a fatal startup precondition.
    pub fn new(window: Arc<Window>, side: usize) -> Self {
        let gpu = pollster::block_on(GpuContext::new(window));
        let cell_count = side * side;
        let buffers = SceneBuffers::new(&gpu.device, cell_count);
        let pipeline = CellPipeline::new(&gpu.device, gpu.format());
        let aspect = gpu.config.width as f32 / gpu.config.height.max(1) as f32;
        let camera = Camera::for_grid(side, aspect);

        Self {
            gpu,
            buffers,
            pipeline,
            camera,
            instances: vec![bytemuck::Zeroable::zeroed(); cell_count],
            side,
            spin: 0.0,
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        self.camera.aspect = self.gpu.config.width as f32 / self.gpu.config.height.max(1) as f32;
    }

    /// Current rotation of the whole grid about +Y, advanced by the frame
    /// driver.
    pub fn set_spin(&mut self, angle: f32) {
        self.spin = angle;
    }

    /// Upload this frame's instances and uniforms and present.
    pub fn draw(&mut self) {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface and skip this frame
                self.gpu
                    .surface
                    .configure(&self.gpu.device, &self.gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let forward = (self.camera.target - self.camera.eye).normalize();
        let right = forward.cross(self.camera.up).normalize();
        let up = right.cross(forward);
        let uniforms = SceneUniforms::new(
            self.camera.view_proj(),
            Mat4::from_rotation_y(self.spin),
            right,
            up,
        );
        self.buffers.write_uniforms(&self.gpu.queue, &uniforms);
        self.buffers.write_instances(&self.gpu.queue, &self.instances);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = self.pipeline.create_bind_group(
            &self.gpu.device,
            &self.buffers.uniform_buffer,
            &self.buffers.instance_buffer,
        );
        self.pipeline.draw(
            &mut encoder,
            &view,
            &self.gpu.depth_view,
            &bind_group,
            self.buffers.cell_count,
        );

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn flat(&self, index: CellIndex) -> Option<usize> {
        (index.x < self.side && index.z < self.side).then(|| index.z * self.side + index.x)
    }
}

impl Renderer for SceneRenderer {
    fn set_position(&mut self, index: CellIndex, position: Vec3) {
        if let Some(i) = self.flat(index) {
            self.instances[i].position = position.to_array();
        }
    }

    fn set_scale(&mut self, index: CellIndex, scale: f32) {
        if let Some(i) = self.flat(index) {
            self.instances[i].scale = scale;
        }
    }

    fn set_highlight(&mut self, index: CellIndex, on: bool) {
        if let Some(i) = self.flat(index) {
            self.instances[i].highlight = if on { 1.0 } else { 0.0 };
        }
    }

    fn hit_test(&self, screen: Vec2) -> Option<CellIndex> {
        let (origin, dir) = self.camera.ray_from_screen(
            screen,
            self.gpu.config.width as f32,
            self.gpu.config.height as f32,
        );
        // Instances are stored unrotated; bring the ray into grid space
        // instead of rotating every cell.
        let inv_spin = Mat3::from_rotation_y(-self.spin);
        let origin = inv_spin * origin;
        let dir = (inv_spin * dir).normalize();

        let mut best: Option<(usize, f32)> = None;
        for (i, cell) in self.instances.iter().enumerate() {
            let radius = CELL_RADIUS * cell.scale;
            if radius <= 0.0 {
                continue;
            }
            if let Some(t) = ray_sphere(origin, dir, Vec3::from_array(cell.position), radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }

        best.map(|(i, _)| CellIndex::new(i % self.side, i / self.side))
    }
}
