//! Per-particle height functions.
//!
//! Every strategy is a pure function of `(x, z, elapsed, spectrum, noise)`;
//! the only randomness lives in [`NoiseTable`], which is refreshed by the
//! render loop between frames and never touches particle positions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::spectrum::PseudoSpectrum;
use crate::VizError;

/// How a particle's height is derived each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeightStrategy {
    /// Triangle + square + saw + flickering noise, all driven by elapsed time.
    AnalyticWave { volatility: f32 },
    /// Concentric and planar sinusoids drifting at `speed`.
    RadialWave { speed: f32 },
    /// Grid coordinates pick spectrum samples; `extent` must match the grid.
    SpectrumDriven { extent: f32, gain: f32, ripple: f32 },
    /// Polar angle picks a spectrum sample; for spiral layouts.
    SpiralSpectrum { gain: f32, ripple: f32 },
}

impl HeightStrategy {
    pub fn validate(&self) -> Result<(), VizError> {
        let finite = |v: f32| v.is_finite();
        let ok = match *self {
            HeightStrategy::AnalyticWave { volatility } => finite(volatility),
            HeightStrategy::RadialWave { speed } => finite(speed),
            HeightStrategy::SpectrumDriven {
                extent,
                gain,
                ripple,
            } => finite(extent) && extent > 0.0 && finite(gain) && finite(ripple),
            HeightStrategy::SpiralSpectrum { gain, ripple } => finite(gain) && finite(ripple),
        };
        if ok {
            Ok(())
        } else {
            Err(VizError::InvalidConfig(format!(
                "non-finite height parameters: {self:?}"
            )))
        }
    }

    /// Whether this strategy reads the noise table.
    pub fn uses_noise(&self) -> bool {
        matches!(self, HeightStrategy::AnalyticWave { .. })
    }

    pub fn height_at(
        &self,
        x: f32,
        z: f32,
        elapsed: f64,
        spectrum: &PseudoSpectrum,
        noise: &NoiseTable,
    ) -> f32 {
        let (xf, zf, t) = (x as f64, z as f64, elapsed);
        match *self {
            HeightStrategy::AnalyticWave { volatility } => {
                let n = noise.at(x, z) as f64;
                let tri = (xf * 0.5 + t * 2.0).sin().asin() / FRAC_PI_2;
                let square = sign((zf * 0.3 + t * 1.5).sin());
                let saw = (xf + t) % 2.0 - 1.0;
                (tri * volatility as f64 * (t * 0.5).sin().abs()
                    + square * 0.3 * (t * 0.7).cos().abs()
                    + saw * 0.4 * (t * 0.9).sin().abs()
                    + n * 0.8 * (t * 2.0).sin().abs()) as f32
            }
            HeightStrategy::RadialWave { speed } => {
                let phase = t * speed as f64;
                let d = (xf * xf + zf * zf).sqrt();
                ((d * 0.5 - phase).sin() * 0.8
                    + (xf * 0.3 + phase * 0.7).sin() * 0.4
                    + (zf * 0.3 - phase * 0.5).cos() * 0.4
                    + (d * 1.2 + phase * 1.3).sin() * 0.2) as f32
            }
            HeightStrategy::SpectrumDriven { extent, gain, .. } => {
                let k = spectrum.len();
                let sx = index_for_coord(x, extent, k).map_or(0.0, |i| spectrum.sample(i));
                let sz = index_for_coord(z, extent, k).map_or(0.0, |i| spectrum.sample(i));
                let wave = grid_wave(xf, zf, t);
                let audio = (0.6 * sx as f64 + 0.4 * sz as f64) * gain as f64 * (0.5 + 0.5 * wave);
                audio as f32 + self.ripple_at(x, z, elapsed)
            }
            HeightStrategy::SpiralSpectrum { gain, .. } => {
                let angle = zf.atan2(xf);
                let s = index_for_angle(angle, spectrum.len()).map_or(0.0, |i| spectrum.sample(i));
                let audio = s as f64 * gain as f64 * (0.75 + 0.25 * (angle * 3.0 + t).sin());
                audio as f32 + self.ripple_at(x, z, elapsed)
            }
        }
    }

    /// The time-only term of the spectrum variants (0 for the others).
    pub fn ripple_at(&self, x: f32, z: f32, elapsed: f64) -> f32 {
        let (xf, zf) = (x as f64, z as f64);
        match *self {
            HeightStrategy::SpectrumDriven { ripple, .. } => {
                (ripple as f64 * grid_wave(xf, zf, elapsed)) as f32
            }
            HeightStrategy::SpiralSpectrum { ripple, .. } => {
                let r = (xf * xf + zf * zf).sqrt();
                (ripple as f64 * (r * 2.0 - elapsed * 2.0).sin()) as f32
            }
            _ => 0.0,
        }
    }
}

#[inline]
fn grid_wave(x: f64, z: f64, t: f64) -> f64 {
    (t * 0.5 + x * 0.2 + z * 0.2).sin()
}

/// Sign with `sign(0) == 0`.
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Spectrum index for a grid coordinate in `[-extent/2, extent/2]`.
///
/// Coordinates outside the extent clamp to the first/last sample and NaN maps
/// to 0. Returns `None` only for an empty spectrum.
pub fn index_for_coord(coord: f32, extent: f32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let normalized = ((coord as f64 + extent as f64 / 2.0) / extent as f64).clamp(0.0, 1.0);
    Some(scale_to_index(normalized, len))
}

/// Spectrum index for a polar angle in radians (any range).
pub fn index_for_angle(angle: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let normalized = (angle / TAU).rem_euclid(1.0);
    Some(scale_to_index(normalized, len))
}

#[inline]
fn scale_to_index(normalized: f64, len: usize) -> usize {
    // `as usize` saturates and maps NaN to 0
    let idx = (normalized * (len - 1) as f64).floor() as usize;
    idx.min(len - 1)
}

/// Small table of random values in `[-1, 1)` used to roughen the analytic wave.
#[derive(Clone, Debug)]
pub struct NoiseTable {
    values: Vec<f32>,
    rng: StdRng,
    refresh_probability: f64,
}

impl NoiseTable {
    /// Table seeded from OS entropy.
    pub fn from_entropy(len: usize, refresh_probability: f64) -> Self {
        Self::with_rng(len, refresh_probability, StdRng::from_entropy())
    }

    /// Reproducible table for tests and recordings.
    pub fn seeded(len: usize, refresh_probability: f64, seed: u64) -> Self {
        Self::with_rng(len, refresh_probability, StdRng::seed_from_u64(seed))
    }

    /// Table with fixed values that never refreshes.
    pub fn frozen(values: Vec<f32>) -> Self {
        Self {
            values,
            rng: StdRng::seed_from_u64(0),
            refresh_probability: 0.0,
        }
    }

    fn with_rng(len: usize, refresh_probability: f64, mut rng: StdRng) -> Self {
        let values = (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Self {
            values,
            rng,
            refresh_probability: refresh_probability.clamp(0.0, 1.0),
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Noise for a particle; 0 when the table is empty.
    #[inline]
    pub fn at(&self, x: f32, z: f32) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let key = (x * 2.0 + z * 2.0).abs().floor();
        // NaN/inf saturate to 0/usize::MAX before the modulo
        let idx = (key as usize) % self.values.len();
        self.values[idx]
    }

    /// Roll the per-frame refresh; returns whether the table changed.
    pub fn maybe_refresh(&mut self) -> bool {
        if self.refresh_probability <= 0.0 || !self.rng.gen_bool(self.refresh_probability) {
            return false;
        }
        for v in &mut self.values {
            *v = self.rng.gen_range(-1.0..1.0);
        }
        true
    }

    pub(crate) fn release(&mut self) {
        self.values = Vec::new();
    }
}
