//! Main renderer combining the grid and mesh sub-renderers

use glam::Mat4;
use mv_core::TriMesh;
use wgpu::util::DeviceExt;

use crate::config::RendererConfig;
use crate::constants::viewport::{DEPTH_FORMAT, SAMPLE_COUNT};
use crate::pipeline::UniformLayouts;
use crate::sub_renderers::{GridRenderer, MeshData, MeshRenderer};
use crate::uniforms::CameraUniform;

/// Depth buffer and optional multisampled color buffer of one size.
struct RenderTargets {
    #[allow(dead_code)]
    depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
    msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
}

impl RenderTargets {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let attachment = |label: &str, format: wgpu::TextureFormat| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size,
                mip_level_count: 1,
                sample_count: SAMPLE_COUNT,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
        };

        let depth = attachment("Depth Texture", DEPTH_FORMAT);
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());
        let msaa = (SAMPLE_COUNT > 1).then(|| {
            let texture = attachment("MSAA Color Texture", format);
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            (texture, view)
        });

        Self {
            depth,
            depth_view,
            msaa,
        }
    }

    /// Color attachment drawing into `output`, resolving from MSAA if enabled.
    fn color_attachment<'a>(
        &'a self,
        output: &'a wgpu::TextureView,
        clear: wgpu::Color,
    ) -> wgpu::RenderPassColorAttachment<'a> {
        let (view, resolve_target) = match &self.msaa {
            Some((_, msaa_view)) => (msaa_view, Some(output)),
            None => (output, None),
        };
        wgpu::RenderPassColorAttachment {
            view,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        }
    }
}

/// Main renderer
pub struct Renderer {
    camera_buffer: wgpu::Buffer,
    targets: RenderTargets,
    grid_renderer: GridRenderer,
    mesh_renderer: MeshRenderer,
    mesh: Option<MeshData>,
    config: RendererConfig,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Create a renderer drawing into textures of `format`.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layouts = UniformLayouts::new(device);
        let grid_renderer =
            GridRenderer::new(device, format, &layouts, &camera_buffer, &config.grid);
        let mesh_renderer =
            MeshRenderer::new(device, format, &layouts, &camera_buffer, &config.shading);

        tracing::debug!(
            "Renderer created: {:?}, {}x{}, {}x MSAA",
            format,
            width,
            height,
            SAMPLE_COUNT
        );

        Self {
            camera_buffer,
            targets: RenderTargets::new(device, format, width, height),
            grid_renderer,
            mesh_renderer,
            mesh: None,
            config: config.clone(),
            format,
            width,
            height,
        }
    }

    /// Recreate the depth and MSAA targets for a new size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.targets = RenderTargets::new(device, self.format, width, height);
    }

    /// Output texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Settings currently in effect.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Replace the displayed mesh.
    pub fn set_mesh(&mut self, device: &wgpu::Device, mesh: &TriMesh) {
        tracing::info!(
            "Uploading mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        self.mesh = Some(MeshData::from_mesh(device, mesh));
    }

    /// Remove the displayed mesh.
    pub fn clear_mesh(&mut self) {
        self.mesh = None;
    }

    /// Apply new settings to the sub-renderers.
    pub fn apply_config(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &RendererConfig,
    ) {
        if *config == self.config {
            return;
        }
        self.grid_renderer.apply_config(device, queue, &config.grid);
        self.mesh_renderer.apply_config(queue, &config.shading);
        self.config = config.clone();
    }

    fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.config.viewport.background_color.map(f64::from);
        wgpu::Color { r, g, b, a }
    }

    /// Render the scene with the given model-view-projection matrix.
    ///
    /// Without a mesh only the background is cleared.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
        mvp: Mat4,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(mvp)]),
        );

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Viewer Render Pass"),
            color_attachments: &[Some(
                self.targets.color_attachment(view, self.clear_color()),
            )],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let Some(mesh) = &self.mesh else {
            return;
        };

        self.mesh_renderer
            .render(&mut render_pass, mesh, self.config.shading.wireframe);

        if self.config.grid.enabled {
            self.grid_renderer.render(&mut render_pass);
        }
    }
}
