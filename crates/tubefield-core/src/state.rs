//! Camera, orbit and clock state advanced by the render loop.
//!
//! Nothing here touches the browser; the web renderer only turns a
//! [`Camera`] into view/projection matrices for the particle pass.

use glam::{Mat4, Vec3};

use crate::constants::{CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR};

/// Simple right-handed camera description with perspective projection.
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

impl Camera {
    /// Default perspective camera for a `width` x `height` surface.
    ///
    /// Returns `None` while either side is zero so callers defer instead of
    /// building a projection from a zero or infinite aspect ratio.
    pub fn for_surface(width: u32, height: u32, eye: Vec3, target: Vec3) -> Option<Self> {
        let aspect = aspect_ratio(width, height)?;
        Some(Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        })
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / height as f32)
}

/// Orbit angle of the moving camera rig.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraState {
    pub orbit_angle: f64,
}

impl CameraState {
    /// Advance by `rate` radians, only while playback is active.
    pub fn advance(&mut self, rate: f64, is_playing: bool) {
        if is_playing {
            self.orbit_angle = (self.orbit_angle + rate) % std::f64::consts::TAU;
        }
    }
}

/// Monotonic render-time accumulator advanced by a fixed step per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderClock {
    elapsed: f64,
    step: f64,
    ticks: u64,
}

impl RenderClock {
    pub fn new(step: f64) -> Self {
        Self {
            elapsed: 0.0,
            step,
            ticks: 0,
        }
    }

    pub fn advance(&mut self) -> f64 {
        self.elapsed += self.step;
        self.ticks += 1;
        self.elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
