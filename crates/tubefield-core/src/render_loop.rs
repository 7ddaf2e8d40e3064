use glam::Vec3;

use crate::config::{PausePolicy, VisualizerConfig};
use crate::field::ParticleField;
use crate::height::{HeightStrategy, NoiseTable};
use crate::look::{CameraRig, ColorPolicy};
use crate::playback::PlaybackSnapshot;
use crate::spectrum::{PseudoSpectrum, SignalGenerator};
use crate::state::{CameraState, RenderClock};
use crate::VizError;

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct FrameView<'a> {
    pub positions: &'a [Vec3],
    pub color: [f32; 3],
    pub field_yaw: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub elapsed: f64,
}

/// Per-frame orchestration over the owned field, spectrum and camera state.
pub struct RenderLoop {
    field: ParticleField,
    generator: SignalGenerator,
    strategy: HeightStrategy,
    noise: NoiseTable,
    clock: RenderClock,
    orbit: CameraState,
    color: ColorPolicy,
    camera: CameraRig,
    pause_policy: PausePolicy,
    playing: bool,
}

impl RenderLoop {
    pub fn new(config: &VisualizerConfig) -> Result<Self, VizError> {
        config.validate()?;
        let field = ParticleField::initialize(config.particle_count, &config.layout)?;
        let noise_len = if config.strategy.uses_noise() {
            config.noise_len
        } else {
            0
        };
        let noise = match config.noise_seed {
            Some(seed) => NoiseTable::seeded(noise_len, config.noise_refresh_probability, seed),
            None => NoiseTable::from_entropy(noise_len, config.noise_refresh_probability),
        };
        Ok(Self::with_parts(config, field, noise))
    }

    /// Build with an explicit noise table (tests inject a frozen one).
    pub fn with_noise(config: &VisualizerConfig, noise: NoiseTable) -> Result<Self, VizError> {
        config.validate()?;
        let field = ParticleField::initialize(config.particle_count, &config.layout)?;
        Ok(Self::with_parts(config, field, noise))
    }

    fn with_parts(config: &VisualizerConfig, field: ParticleField, noise: NoiseTable) -> Self {
        Self {
            field,
            generator: SignalGenerator::new(config.spectrum_len),
            strategy: config.strategy,
            noise,
            clock: RenderClock::new(config.render_step_sec),
            orbit: CameraState::default(),
            color: config.color,
            camera: config.camera,
            pause_policy: config.pause_policy,
            playing: false,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn spectrum(&self) -> &PseudoSpectrum {
        self.generator.spectrum()
    }

    pub fn clock(&self) -> &RenderClock {
        &self.clock
    }

    pub fn orbit(&self) -> &CameraState {
        &self.orbit
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Feed a fresh snapshot to the generator; returns whether it rewrote
    /// the spectrum (paused snapshots freeze it).
    pub fn update_spectrum(&mut self, snapshot: &PlaybackSnapshot) -> bool {
        self.playing = snapshot.is_playing;
        self.generator.update(snapshot)
    }

    /// One render tick: clock, heights, camera and color.
    pub fn advance(&mut self) -> FrameView<'_> {
        let frozen = !self.playing && self.pause_policy == PausePolicy::Freeze;
        if !frozen {
            self.clock.advance();
            if self.strategy.uses_noise() {
                self.noise.maybe_refresh();
            }
        }
        let elapsed = self.clock.elapsed();

        let strategy = self.strategy;
        let spectrum = self.generator.spectrum();
        let noise = &self.noise;
        self.field
            .apply_heights(|x, z| strategy.height_at(x, z, elapsed, spectrum, noise));

        self.orbit.advance(self.camera.orbit_rate(), self.playing);
        let pose = self.camera.pose(elapsed, &self.orbit);
        let color = self.color.color(elapsed, spectrum.average());

        FrameView {
            positions: self.field.positions(),
            color,
            field_yaw: pose.field_yaw,
            eye: pose.eye,
            target: pose.target,
            elapsed,
        }
    }

    /// Drop the particle, spectrum and noise buffers.
    pub fn release(&mut self) {
        self.field.release();
        self.generator.release();
        self.noise.release();
    }
}
