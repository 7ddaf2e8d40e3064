//! Per-frame color and camera derivation.

use glam::Vec3;

use crate::state::CameraState;

/// How the particle material color changes over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorPolicy {
    /// Hue flips between two values twice a second; lightness pulses.
    Phased {
        base_hue: f32,
        hue_step: f32,
        saturation: f32,
        base_lightness: f32,
        lightness_swing: f32,
    },
    /// Hue follows the average spectrum amplitude.
    SpectrumHue {
        base_hue: f32,
        hue_span: f32,
        saturation: f32,
        base_lightness: f32,
        lightness_swing: f32,
    },
}

impl ColorPolicy {
    /// RGB color for this frame.
    pub fn color(&self, elapsed: f64, average_amplitude: f32) -> [f32; 3] {
        match *self {
            ColorPolicy::Phased {
                base_hue,
                hue_step,
                saturation,
                base_lightness,
                lightness_swing,
            } => {
                let phase = ((elapsed * 2.0).floor() % 2.0) as f32;
                let lightness = base_lightness + (elapsed * 4.0).sin().abs() as f32 * lightness_swing;
                hsl_to_rgb(base_hue + phase * hue_step, saturation, lightness)
            }
            ColorPolicy::SpectrumHue {
                base_hue,
                hue_span,
                saturation,
                base_lightness,
                lightness_swing,
            } => {
                let amp = if average_amplitude.is_finite() {
                    average_amplitude.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lightness = base_lightness + (elapsed * 2.0).sin().abs() as f32 * lightness_swing;
                hsl_to_rgb(base_hue + amp * hue_span, saturation, lightness)
            }
        }
    }
}

/// Where the camera sits and how the field is turned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraRig {
    /// Static camera; the field sways about Y by up to `sway` radians.
    Fixed { eye: Vec3, target: Vec3, sway: f32 },
    /// Camera circles the origin while playing and looks `lead` radians ahead.
    Orbit {
        radius: f32,
        height: f32,
        rate: f64,
        lead: f64,
    },
}

/// Camera placement plus field yaw for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub field_yaw: f32,
}

impl CameraRig {
    /// Orbit step per tick (0 for the fixed rig).
    pub fn orbit_rate(&self) -> f64 {
        match *self {
            CameraRig::Orbit { rate, .. } => rate,
            CameraRig::Fixed { .. } => 0.0,
        }
    }

    pub fn pose(&self, elapsed: f64, state: &CameraState) -> CameraPose {
        match *self {
            CameraRig::Fixed { eye, target, sway } => CameraPose {
                eye,
                target,
                field_yaw: (elapsed * 0.5).sin() as f32 * sway,
            },
            CameraRig::Orbit {
                radius,
                height,
                lead,
                ..
            } => {
                let a = state.orbit_angle;
                let ahead = a + lead;
                let inner = radius * 0.5;
                CameraPose {
                    eye: Vec3::new(a.cos() as f32 * radius, height, a.sin() as f32 * radius),
                    target: Vec3::new(ahead.cos() as f32 * inner, 0.0, ahead.sin() as f32 * inner),
                    field_yaw: 0.0,
                }
            }
        }
    }
}

/// HSL (all components in [0, 1], hue wrapping) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;
    [
        hue_channel(q, p, h + 1.0 / 3.0),
        hue_channel(q, p, h),
        hue_channel(q, p, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
