use glam::Vec3;
use std::str::FromStr;

use crate::constants::*;
use crate::field::Layout;
use crate::height::HeightStrategy;
use crate::look::{CameraRig, ColorPolicy};
use crate::VizError;

/// What the visualization does while the video is paused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PausePolicy {
    /// Hold the render clock, noise and orbit; the last frame keeps drawing.
    Freeze,
    /// Keep the render clock running (only the spectrum and orbit hold).
    Continue,
}

/// Everything needed to build one visualization session.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub particle_count: usize,
    pub layout: Layout,
    pub strategy: HeightStrategy,
    pub spectrum_len: usize,
    pub render_step_sec: f64,
    pub spectrum_interval_ms: u32,
    pub pause_policy: PausePolicy,
    pub color: ColorPolicy,
    pub camera: CameraRig,
    pub noise_len: usize,
    pub noise_refresh_probability: f64,
    /// Fixed seed for the noise table; `None` seeds from entropy.
    pub noise_seed: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Preset::Oscilloscope.config()
    }
}

impl VisualizerConfig {
    pub fn validate(&self) -> Result<(), VizError> {
        if self.particle_count == 0 {
            return Err(VizError::InvalidConfig("particle count must be > 0".into()));
        }
        if self.spectrum_len == 0 {
            return Err(VizError::InvalidConfig("spectrum length must be > 0".into()));
        }
        if !(self.render_step_sec.is_finite() && self.render_step_sec > 0.0) {
            return Err(VizError::InvalidConfig(format!(
                "render step must be positive, got {}",
                self.render_step_sec
            )));
        }
        if self.spectrum_interval_ms == 0 {
            return Err(VizError::InvalidConfig("spectrum interval must be > 0 ms".into()));
        }
        if !(0.0..=1.0).contains(&self.noise_refresh_probability) {
            return Err(VizError::InvalidConfig(format!(
                "noise refresh probability out of range: {}",
                self.noise_refresh_probability
            )));
        }
        self.layout.validate()?;
        self.strategy.validate()
    }
}

/// Named, complete configurations offered by the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    /// Oscilloscope-style waves over a flat grid.
    #[default]
    Oscilloscope,
    /// Concentric ripples over a flat grid.
    Ripple,
    /// Grid heights driven by the pseudo-spectrum.
    Spectrum,
    /// Spiral driven by the pseudo-spectrum, with an orbiting camera.
    Spiral,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Oscilloscope,
        Preset::Ripple,
        Preset::Spectrum,
        Preset::Spiral,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Oscilloscope => "oscilloscope",
            Preset::Ripple => "ripple",
            Preset::Spectrum => "spectrum",
            Preset::Spiral => "spiral",
        }
    }

    pub fn config(&self) -> VisualizerConfig {
        let grid = Layout::Grid {
            extent: GRID_EXTENT,
        };
        let fixed = CameraRig::Fixed {
            eye: Vec3::from(FIXED_EYE),
            target: Vec3::ZERO,
            sway: FIELD_SWAY,
        };
        let phased = ColorPolicy::Phased {
            base_hue: BASE_HUE,
            hue_step: HUE_STEP,
            saturation: SATURATION,
            base_lightness: BASE_LIGHTNESS,
            lightness_swing: LIGHTNESS_SWING,
        };
        let spectrum_hue = ColorPolicy::SpectrumHue {
            base_hue: BASE_HUE,
            hue_span: SPECTRUM_HUE_SPAN,
            saturation: SATURATION,
            base_lightness: BASE_LIGHTNESS,
            lightness_swing: LIGHTNESS_SWING,
        };
        let (layout, strategy, color, camera) = match self {
            Preset::Oscilloscope => (
                grid,
                HeightStrategy::AnalyticWave {
                    volatility: VOLATILITY,
                },
                phased,
                fixed,
            ),
            Preset::Ripple => (
                grid,
                HeightStrategy::RadialWave {
                    speed: RADIAL_SPEED,
                },
                phased,
                fixed,
            ),
            Preset::Spectrum => (
                grid,
                HeightStrategy::SpectrumDriven {
                    extent: GRID_EXTENT,
                    gain: SPECTRUM_GAIN,
                    ripple: GRID_RIPPLE,
                },
                spectrum_hue,
                fixed,
            ),
            Preset::Spiral => (
                Layout::Spiral {
                    loops: SPIRAL_LOOPS,
                    max_radius: SPIRAL_MAX_RADIUS,
                },
                HeightStrategy::SpiralSpectrum {
                    gain: SPECTRUM_GAIN,
                    ripple: SPIRAL_RIPPLE,
                },
                spectrum_hue,
                CameraRig::Orbit {
                    radius: ORBIT_RADIUS,
                    height: ORBIT_HEIGHT,
                    rate: ORBIT_RATE,
                    lead: ORBIT_LEAD,
                },
            ),
        };
        VisualizerConfig {
            particle_count: PARTICLE_COUNT,
            layout,
            strategy,
            spectrum_len: SPECTRUM_LEN,
            render_step_sec: RENDER_STEP_SEC,
            spectrum_interval_ms: SPECTRUM_INTERVAL_MS,
            pause_policy: PausePolicy::Freeze,
            color,
            camera,
            noise_len: NOISE_TABLE_LEN,
            noise_refresh_probability: NOISE_REFRESH_PROBABILITY,
            noise_seed: None,
        }
    }
}

impl FromStr for Preset {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VizError::InvalidConfig(format!("unknown preset '{s}'")))
    }
}
