//! Perspective camera shared by the renderer and the intersection query.
//!
//! The camera is a plain value: the front-end owns it, updates `aspect` on
//! resize, and hands a reference to the frame loop every tick.

use crate::constants::{camera_eye, CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::ray::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Eye looking at `target` through a right-handed perspective frustum.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    pub fn with_aspect(width: u32, height: u32) -> Self {
        let mut camera = Self::default();
        camera.set_viewport(width, height);
        camera
    }

    /// Perspective frustum for the current aspect and field of view.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World to eye space, looking from `eye` toward `target`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Follow a window resize. Zero-sized windows (minimised) keep the old aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Pick ray through a pointer position in normalized device coordinates.
    ///
    /// `ndc` is expected in \[-1, 1\] on both axes with +Y up. The ray starts at
    /// the eye and passes through the unprojected far-plane point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p_far: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, (p_far - self.eye).normalize_or_zero())
    }
}
