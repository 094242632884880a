use std::sync::Arc;

use tracing::trace;
use winit::window::Window;

use crate::{
    config::CameraConfig,
    geometry::{frustum_scale, mat4_mul, perspective},
    DisplayRequest, Drawer,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub frustum_scale: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Projection {
    pub fn new(camera: &CameraConfig) -> Self {
        Self {
            frustum_scale: frustum_scale(camera.fov_degrees),
            z_near: camera.z_near,
            z_far: camera.z_far,
        }
    }

    /// `None` while the window has no area, e.g. when minimized.
    pub fn camera_to_clip(&self, width: u32, height: u32) -> Option<[[f32; 4]; 4]> {
        if width == 0 || height == 0 {
            return None;
        }
        let aspect = width as f32 / height as f32;
        Some(perspective(self.frustum_scale, aspect, self.z_near, self.z_far))
    }
}

/// Stands in for the GPU: resolves the final clip-space transform of each
/// frame, traces it, and shows the scene caption in the window title.
pub struct Presenter {
    window: Arc<Window>,
    title: String,
    projection: Projection,
    caption: String,
}

impl Presenter {
    pub fn new(window: Arc<Window>, title: &str, projection: Projection) -> Self {
        Self {
            window,
            title: title.to_owned(),
            projection,
            caption: String::new(),
        }
    }
}

impl Drawer for Presenter {
    fn draw(&mut self, request: &DisplayRequest) {
        let size = self.window.inner_size();
        if let Some(camera_to_clip) = self.projection.camera_to_clip(size.width, size.height) {
            let model_to_camera = request.model_to_camera.to_homogeneous();
            let model_to_clip = mat4_mul(camera_to_clip, model_to_camera);
            trace!(?model_to_camera, ?model_to_clip, base_color = ?request.base_color, "frame");
        }
        if self.caption != request.caption {
            self.caption = request.caption.to_owned();
            self.window
                .set_title(&format!("{} - {}", self.title, self.caption));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projection_follows_the_window_aspect() {
        let projection = Projection::new(&CameraConfig::default());
        let square = projection.camera_to_clip(500, 500).unwrap();
        let wide = projection.camera_to_clip(1000, 500).unwrap();
        assert_relative_eq!(square[1][1], projection.frustum_scale);
        assert_relative_eq!(square[0][0], projection.frustum_scale);
        assert_relative_eq!(wide[0][0], projection.frustum_scale / 2.0);
        assert!(projection.camera_to_clip(0, 500).is_none());
    }

    #[test]
    fn default_camera_depth_terms() {
        let projection = Projection::new(&CameraConfig::default());
        let m = projection.camera_to_clip(500, 500).unwrap();
        let (near, far) = (1.0f32, 600.0f32);
        assert_relative_eq!(m[1][1], 1.0 / 10.0f32.to_radians().tan(), epsilon = 1e-4);
        assert_relative_eq!(m[2][2], (far + near) / (near - far), epsilon = 1e-6);
        assert_eq!(m[2][3], -1.0);
        assert_relative_eq!(m[3][2], (2.0 * far * near) / (near - far), epsilon = 1e-6);
        assert_eq!(m[3][3], 0.0);
    }
}
