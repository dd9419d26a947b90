use glam::Mat4;
use wgpu::{Buffer, BufferUsages, Device, Queue};

/// Per-cell instance data read by the vertex shader (32 bytes).
///
/// WGSL sees this as two vec4s: (position.xyz, scale) and
/// (highlight, 0, 0, 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CellInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub highlight: f32,
    pub _padding: [f32; 3],
}

/// Frame-constant shader inputs (160 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
}

impl SceneUniforms {
    pub fn new(view_proj: Mat4, model: Mat4, camera_right: glam::Vec3, camera_up: glam::Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_right: camera_right.extend(0.0).to_array(),
            camera_up: camera_up.extend(0.0).to_array(),
        }
    }
}

/// Instance storage buffer plus the scene uniform buffer, both rewritten
/// every frame.
pub struct SceneBuffers {
    pub instance_buffer: Buffer,
    pub uniform_buffer: Buffer,
    pub cell_count: u32,
}

impl SceneBuffers {
    pub fn new(device: &Device, cell_count: usize) -> Self {
        let instance_size = (cell_count * std::mem::size_of::<CellInstance>()) as u64;

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cell-instance-buffer"),
            size: instance_size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene-uniform-buffer"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            instance_buffer,
            uniform_buffer,
            cell_count: cell_count as u32,
        }
    }

    /// Upload the full instance array for this frame.
    pub fn write_instances(&self, queue: &Queue, instances: &[CellInstance]) {
        assert_eq!(
            instances.len() as u32,
            self.cell_count,
            "Instance count mismatch"
        );
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
    }

    /// Upload the frame's uniforms.
    pub fn write_uniforms(&self, queue: &Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_size() {
        assert_eq!(std::mem::size_of::<CellInstance>(), 32);
    }

    #[test]
    fn test_uniforms_size_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 160);
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    }
}
