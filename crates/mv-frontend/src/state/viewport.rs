//! Viewport rendering state

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;

use mv_core::{BoundingBox, TriMesh, ViewState};
use mv_renderer::{CameraConfig, Renderer, RendererConfig};

/// Render texture for viewport
struct RenderTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Viewport rendering state
pub struct ViewportState {
    pub renderer: Renderer,
    pub view: ViewState,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    bounds: Option<BoundingBox>,
    render_texture: Option<RenderTexture>,
}

pub type SharedViewportState = Arc<Mutex<ViewportState>>;

impl ViewportState {
    /// Create a new viewport state
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        config: &RendererConfig,
    ) -> Self {
        let renderer = Renderer::new(&device, format, 800, 600, config);
        let mut view = ViewState::new(800.0, 600.0);
        if view.fov_degrees() != config.camera.fov_degrees {
            view.set_fov_degrees(config.camera.fov_degrees);
        }
        Self {
            renderer,
            view,
            device,
            queue,
            bounds: None,
            render_texture: None,
        }
    }

    /// Ensure the render texture matches the requested size
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        let width = width.max(1);
        let height = height.max(1);

        if let Some(rt) = &self.render_texture
            && rt.width == width
            && rt.height == height
        {
            return rt.egui_texture_id;
        }

        if let Some(old) = self.render_texture.take() {
            egui_renderer.free_texture(&old.egui_texture_id);
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Viewport Render Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.renderer.format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let egui_texture_id =
            egui_renderer.register_native_texture(&self.device, &view, wgpu::FilterMode::Linear);

        self.renderer.resize(&self.device, width, height);
        self.view.set_viewport_size(width as f32, height as f32);

        tracing::debug!("Viewport texture resized to {}x{}", width, height);

        self.render_texture = Some(RenderTexture {
            texture,
            view,
            egui_texture_id,
            width,
            height,
        });
        egui_texture_id
    }

    /// Render the scene to the texture
    pub fn render(&mut self) {
        let Some(ref rt) = self.render_texture else {
            return;
        };

        let mvp = self.view.mvp(rt.width as f32, rt.height as f32);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &rt.view, &self.queue, mvp);

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Show a mesh and frame it
    pub fn set_mesh(&mut self, mesh: &TriMesh) {
        self.renderer.set_mesh(&self.device, mesh);
        let bounds = mesh.bounding_box();
        self.view.fit(&bounds);
        self.bounds = Some(bounds);
    }

    /// Remove the mesh and reset the framing
    pub fn clear_mesh(&mut self) {
        self.renderer.clear_mesh();
        self.view.clear();
        self.bounds = None;
    }

    /// Frame the current mesh again, dropping rotation and pan
    pub fn fit_view(&mut self) {
        match &self.bounds {
            Some(bounds) => self.view.fit(bounds),
            None => self.view.clear(),
        }
    }

    pub fn reset_rotation(&mut self) {
        self.view.arcball_mut().reset();
    }

    /// Apply edited settings to the renderer and camera
    pub fn apply_config(&mut self, config: &RendererConfig) {
        let device = self.device.clone();
        let queue = self.queue.clone();
        self.renderer.apply_config(&device, &queue, config);
        if self.view.fov_degrees() != config.camera.fov_degrees {
            self.view.set_fov_degrees(config.camera.fov_degrees);
        }
    }

    /// Apply one frame of pointer input, returning whether the camera moved
    pub fn apply_gesture(&mut self, gesture: &ViewportGesture) -> bool {
        gesture.apply(&mut self.view, &self.renderer.config().camera)
    }
}

/// Pointer input gathered from one frame of the viewport, in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportGesture {
    /// Arcball anchor, where the left button went down
    pub rotate_start: Option<Vec2>,
    pub rotate_to: Option<Vec2>,
    pub rotate_end: bool,
    pub pan: Vec2,
    /// Scroll in points; positive moves closer
    pub scroll: f32,
}

impl ViewportGesture {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, view: &mut ViewState, camera: &CameraConfig) -> bool {
        let mut moved = false;
        if let Some(start) = self.rotate_start {
            view.arcball_mut().on_press(start);
        }
        if let Some(pos) = self.rotate_to {
            view.arcball_mut().on_drag(pos);
            moved = true;
        }
        if self.rotate_end {
            view.arcball_mut().on_release();
        }
        if self.pan != Vec2::ZERO {
            view.pan(self.pan, camera.pan_sensitivity);
            moved = true;
        }
        if self.scroll != 0.0 {
            view.zoom(-self.scroll * camera.zoom_sensitivity);
            moved = true;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mv_core::ArcBallController;

    #[test]
    fn test_rotation_anchors_at_press_origin() {
        let mut view = ViewState::new(200.0, 200.0);
        let gesture = ViewportGesture {
            rotate_start: Some(Vec2::new(100.0, 100.0)),
            rotate_to: Some(Vec2::new(150.0, 100.0)),
            ..Default::default()
        };
        assert!(gesture.apply(&mut view, &CameraConfig::default()));

        let mut expected = ArcBallController::new(200.0, 200.0);
        expected.on_press(Vec2::new(100.0, 100.0));
        expected.on_drag(Vec2::new(150.0, 100.0));
        assert_eq!(view.arcball().rotation(), expected.rotation());
        assert_ne!(view.arcball().rotation(), glam::Quat::IDENTITY);
    }

    #[test]
    fn test_pan_and_scroll_move_the_camera() {
        let camera = CameraConfig::default();
        let mut view = ViewState::new(200.0, 200.0);
        let distance = view.distance();

        let gesture = ViewportGesture {
            pan: Vec2::new(10.0, 0.0),
            scroll: 50.0,
            ..Default::default()
        };
        assert!(gesture.apply(&mut view, &camera));
        assert!(view.pan_offset().x > 0.0);
        assert!(view.distance() < distance);
    }

    #[test]
    fn test_empty_gesture_leaves_view_alone() {
        let mut view = ViewState::new(200.0, 200.0);
        let gesture = ViewportGesture::default();
        assert!(gesture.is_empty());
        assert!(!gesture.apply(&mut view, &CameraConfig::default()));
        assert_eq!(view.pan_offset(), Vec2::ZERO);
        assert_eq!(view.arcball().rotation(), glam::Quat::IDENTITY);
    }

    #[test]
    fn test_release_ends_rotation() {
        let mut view = ViewState::new(200.0, 200.0);
        let press = ViewportGesture {
            rotate_start: Some(Vec2::new(100.0, 100.0)),
            ..Default::default()
        };
        press.apply(&mut view, &CameraConfig::default());
        assert!(view.arcball().is_dragging());

        let release = ViewportGesture {
            rotate_end: true,
            ..Default::default()
        };
        assert!(!release.apply(&mut view, &CameraConfig::default()));
        assert!(!view.arcball().is_dragging());
    }
}
