//! Pipeline builder utilities
//!
//! Every pipeline reads the camera uniform from group 0 and a material
//! uniform from group 1, draws into the MSAA color target with alpha
//! blending and tests against the Depth32 buffer.

use crate::constants::viewport::{DEPTH_FORMAT, SAMPLE_COUNT};

/// Bind group layouts shared by all viewer pipelines.
pub struct UniformLayouts {
    /// Group 0: model-view-projection matrix
    pub camera: wgpu::BindGroupLayout,
    /// Group 1: color, opacity and light
    pub material: wgpu::BindGroupLayout,
}

impl UniformLayouts {
    /// Create both layouts.
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            camera: uniform_layout(device, "Camera"),
            material: uniform_layout(device, "Material"),
        }
    }

    /// Bind `buffer` as the camera uniform.
    pub fn bind_camera(
        &self,
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
        label: &str,
    ) -> wgpu::BindGroup {
        bind_uniform(device, &self.camera, buffer, &format!("{label} Camera"))
    }

    /// Bind `buffer` as the material uniform.
    pub fn bind_material(
        &self,
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
        label: &str,
    ) -> wgpu::BindGroup {
        bind_uniform(device, &self.material, buffer, &format!("{label} Material"))
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} Bind Group Layout")),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn bind_uniform(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Bind Group")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

/// How a pipeline assembles its vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Filled triangles with back faces culled
    Solid,
    /// Line list, no culling
    Lines,
}

impl DrawMode {
    fn primitive(self) -> wgpu::PrimitiveState {
        let (topology, cull_mode) = match self {
            DrawMode::Solid => (wgpu::PrimitiveTopology::TriangleList, Some(wgpu::Face::Back)),
            DrawMode::Lines => (wgpu::PrimitiveTopology::LineList, None),
        };
        wgpu::PrimitiveState {
            topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        }
    }
}

/// Configuration for creating a viewer render pipeline.
pub struct PipelineConfig<'a> {
    /// Pipeline label for debugging
    pub label: &'a str,
    /// WGSL source with `vs_main` and `fs_main` entry points
    pub shader_source: &'a str,
    /// Output texture format
    pub format: wgpu::TextureFormat,
    /// Layout of the single vertex buffer
    pub vertex_layout: wgpu::VertexBufferLayout<'a>,
    /// Primitive assembly
    pub mode: DrawMode,
}

impl<'a> PipelineConfig<'a> {
    /// Solid triangles reading `vertex_layout`.
    pub fn new(
        label: &'a str,
        shader_source: &'a str,
        format: wgpu::TextureFormat,
        vertex_layout: wgpu::VertexBufferLayout<'a>,
    ) -> Self {
        Self {
            label,
            shader_source,
            format,
            vertex_layout,
            mode: DrawMode::Solid,
        }
    }

    /// Set the draw mode.
    pub fn with_mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build the render pipeline.
    pub fn build(self, device: &wgpu::Device, layouts: &UniformLayouts) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} Shader", self.label)),
            source: wgpu::ShaderSource::Wgsl(self.shader_source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", self.label)),
            bind_group_layouts: &[&layouts.camera, &layouts.material],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", self.label)),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[self.vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: self.mode.primitive(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: SAMPLE_COUNT,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_modes() {
        let solid = DrawMode::Solid.primitive();
        assert_eq!(solid.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(solid.cull_mode, Some(wgpu::Face::Back));

        let lines = DrawMode::Lines.primitive();
        assert_eq!(lines.topology, wgpu::PrimitiveTopology::LineList);
        assert_eq!(lines.cull_mode, None);
    }
}
