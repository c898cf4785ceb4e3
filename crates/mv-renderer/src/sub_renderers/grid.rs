//! Ground grid renderer

use wgpu::util::DeviceExt;

use crate::config::GridConfig;
use crate::pipeline::{DrawMode, PipelineConfig, UniformLayouts};
use crate::uniforms::MaterialUniform;
use crate::vertex::PositionVertex;

/// Grid renderer
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    camera_bind_group: wgpu::BindGroup,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
    size: f32,
    cells: u32,
}

impl GridRenderer {
    /// Creates a new grid renderer.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layouts: &UniformLayouts,
        camera_buffer: &wgpu::Buffer,
        config: &GridConfig,
    ) -> Self {
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Material Buffer"),
            contents: bytemuck::cast_slice(&[Self::material(config)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let pipeline = PipelineConfig::new(
            "Grid",
            include_str!("../shaders/grid.wgsl"),
            format,
            PositionVertex::layout(),
        )
        .with_mode(DrawMode::Lines)
        .build(device, layouts);

        let (vertex_buffer, vertex_count) = create_grid_buffer(device, config.size, config.cells);

        Self {
            pipeline,
            vertex_buffer,
            vertex_count,
            camera_bind_group: layouts.bind_camera(device, camera_buffer, "Grid"),
            material_bind_group: layouts.bind_material(device, &material_buffer, "Grid"),
            material_buffer,
            size: config.size,
            cells: config.cells,
        }
    }

    fn material(config: &GridConfig) -> MaterialUniform {
        MaterialUniform::new(config.color, config.alpha, [0.0; 3])
    }

    /// Renders the grid.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.vertex_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.material_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }

    /// Apply grid settings, rebuilding the geometry only when it changed.
    pub fn apply_config(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, config: &GridConfig) {
        if config.size != self.size || config.cells != self.cells {
            self.rebuild(device, config.size, config.cells);
        }
        queue.write_buffer(
            &self.material_buffer,
            0,
            bytemuck::cast_slice(&[Self::material(config)]),
        );
    }

    /// Rebuild grid with new parameters
    pub fn rebuild(&mut self, device: &wgpu::Device, size: f32, cells: u32) {
        tracing::debug!("Rebuilding grid: size {}, {} cells", size, cells);
        let (vertex_buffer, vertex_count) = create_grid_buffer(device, size, cells);
        self.vertex_buffer = vertex_buffer;
        self.vertex_count = vertex_count;
        self.size = size;
        self.cells = cells;
    }

    /// Number of line endpoints currently uploaded.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// Generate grid line vertices
fn generate_grid_vertices(size: f32, cells: u32) -> Vec<PositionVertex> {
    mv_core::generate_grid_lines(size, cells)
        .into_iter()
        .map(|position| PositionVertex { position })
        .collect()
}

fn create_grid_buffer(device: &wgpu::Device, size: f32, cells: u32) -> (wgpu::Buffer, u32) {
    let vertices = generate_grid_vertices(size, cells);
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Grid Vertex Buffer"),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    (buffer, vertices.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_vertices_follow_cells() {
        let vertices = generate_grid_vertices(20.0, 50);
        assert_eq!(vertices.len(), 200);
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
    }
}
