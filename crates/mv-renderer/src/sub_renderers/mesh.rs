//! Mesh renderer: shaded triangles or wireframe edges

use mv_core::TriMesh;
use wgpu::util::DeviceExt;

use crate::config::ShadingConfig;
use crate::pipeline::{DrawMode, PipelineConfig, UniformLayouts};
use crate::uniforms::MaterialUniform;
use crate::vertex::MeshVertex;

/// GPU mesh data
pub struct MeshData {
    /// Vertex buffer with positions and normals.
    pub vertex_buffer: wgpu::Buffer,
    /// Triangle index buffer.
    pub index_buffer: wgpu::Buffer,
    /// Number of triangle indices.
    pub index_count: u32,
    /// Edge index buffer (line list).
    pub edge_buffer: wgpu::Buffer,
    /// Number of edge indices.
    pub edge_count: u32,
}

impl MeshData {
    /// Upload a mesh to the GPU.
    pub fn from_mesh(device: &wgpu::Device, mesh: &TriMesh) -> Self {
        let vertices = MeshVertex::from_mesh(mesh);
        let edges = edge_indices(mesh);

        tracing::debug!(
            "Creating MeshData: {} vertices, {} indices, {} edge indices",
            vertices.len(),
            mesh.indices().len(),
            edges.len()
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Edge Buffer"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices().len() as u32,
            edge_buffer,
            edge_count: edges.len() as u32,
        }
    }
}

/// Flatten unique edges into a line-list index buffer.
fn edge_indices(mesh: &TriMesh) -> Vec<u32> {
    mesh.edges().into_iter().flatten().collect()
}

/// Mesh renderer
pub struct MeshRenderer {
    solid_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
}

impl MeshRenderer {
    /// Creates a new mesh renderer.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layouts: &UniformLayouts,
        camera_buffer: &wgpu::Buffer,
        config: &ShadingConfig,
    ) -> Self {
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Material Buffer"),
            contents: bytemuck::cast_slice(&[Self::material(config)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let shader = include_str!("../shaders/mesh.wgsl");
        let solid_pipeline = PipelineConfig::new("Mesh", shader, format, MeshVertex::layout())
            .build(device, layouts);
        // Same shader over the edge index buffer
        let wireframe_pipeline =
            PipelineConfig::new("Mesh Wireframe", shader, format, MeshVertex::layout())
                .with_mode(DrawMode::Lines)
                .build(device, layouts);

        Self {
            solid_pipeline,
            wireframe_pipeline,
            camera_bind_group: layouts.bind_camera(device, camera_buffer, "Mesh"),
            material_bind_group: layouts.bind_material(device, &material_buffer, "Mesh"),
            material_buffer,
        }
    }

    fn material(config: &ShadingConfig) -> MaterialUniform {
        MaterialUniform::new(config.mesh_color, config.alpha, config.light)
    }

    /// Upload new shading parameters.
    pub fn apply_config(&self, queue: &wgpu::Queue, config: &ShadingConfig) {
        queue.write_buffer(
            &self.material_buffer,
            0,
            bytemuck::cast_slice(&[Self::material(config)]),
        );
    }

    /// Render mesh triangles, or its edges when `wireframe` is set.
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        mesh: &'a MeshData,
        wireframe: bool,
    ) {
        let (pipeline, buffer, count) = if wireframe {
            (&self.wireframe_pipeline, &mesh.edge_buffer, mesh.edge_count)
        } else {
            (&self.solid_pipeline, &mesh.index_buffer, mesh.index_count)
        };
        if count == 0 {
            return;
        }

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.material_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_indices_are_line_pairs() {
        let mesh = TriMesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap();
        let edges = edge_indices(&mesh);
        assert_eq!(edges.len(), 10);
        assert_eq!(&edges[..6], &[0, 1, 1, 2, 0, 2]);
    }
}
