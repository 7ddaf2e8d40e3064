//! Lifecycle of one mounted visualization: `Idle -> Running -> Stopped`.

use crate::config::VisualizerConfig;
use crate::playback::{PlaybackController, PlaybackSource};
use crate::render_loop::{FrameView, RenderLoop};
use crate::schedule::{HostScheduler, Timers};
use crate::VizError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Instrumentation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub spectrum_updates: u64,
    pub failed_reads: u64,
}

pub struct Session<S: HostScheduler, P: PlaybackSource> {
    state: LoopState,
    render: RenderLoop,
    timers: Timers,
    scheduler: S,
    controller: PlaybackController<P>,
    spectrum_interval_ms: u32,
    stats: SessionStats,
    failure_streak: u64,
}

impl<S: HostScheduler, P: PlaybackSource> Session<S, P> {
    pub fn new(
        config: &VisualizerConfig,
        scheduler: S,
        controller: PlaybackController<P>,
    ) -> Result<Self, VizError> {
        Ok(Self::with_render_loop(
            RenderLoop::new(config)?,
            config.spectrum_interval_ms,
            scheduler,
            controller,
        ))
    }

    pub fn with_render_loop(
        render: RenderLoop,
        spectrum_interval_ms: u32,
        scheduler: S,
        controller: PlaybackController<P>,
    ) -> Self {
        Self {
            state: LoopState::Idle,
            render,
            timers: Timers::default(),
            scheduler,
            controller,
            spectrum_interval_ms,
            stats: SessionStats::default(),
            failure_streak: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn controller(&self) -> &PlaybackController<P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<P> {
        &mut self.controller
    }

    /// Arm the spectrum interval and the first frame.
    pub fn start(&mut self) -> Result<(), VizError> {
        if self.state != LoopState::Idle {
            return Err(VizError::InvalidTransition {
                from: self.state,
                to: LoopState::Running,
            });
        }
        let armed = self
            .timers
            .arm_interval(&mut self.scheduler, self.spectrum_interval_ms)
            .and_then(|()| self.timers.arm_frame(&mut self.scheduler));
        if let Err(e) = armed {
            self.timers.cancel_all(&mut self.scheduler);
            return Err(e);
        }
        self.state = LoopState::Running;
        log::info!(
            "[session] running: {} particles, spectrum every {} ms",
            self.render.field().len(),
            self.spectrum_interval_ms
        );
        Ok(())
    }

    /// Render-tick callback. `None` once the session is not running.
    pub fn on_frame(&mut self) -> Option<FrameView<'_>> {
        if self.state != LoopState::Running {
            return None;
        }
        self.timers.frame_fired();
        if let Err(e) = self.timers.arm_frame(&mut self.scheduler) {
            log::error!("[session] could not schedule next frame: {e}");
        }
        self.stats.frames += 1;
        Some(self.render.advance())
    }

    /// Spectrum-tick callback. Read failures keep the previous spectrum.
    pub fn on_spectrum_tick(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        match self.controller.snapshot() {
            Ok(snapshot) => {
                if self.failure_streak > 0 {
                    log::info!(
                        "[session] player readable again after {} failed reads",
                        self.failure_streak
                    );
                    self.failure_streak = 0;
                }
                if self.render.update_spectrum(&snapshot) {
                    self.stats.spectrum_updates += 1;
                }
            }
            Err(e) => {
                self.stats.failed_reads += 1;
                self.failure_streak += 1;
                if self.failure_streak == 1 {
                    log::warn!("[session] playback read failed, keeping spectrum: {e}");
                } else {
                    log::debug!("[session] playback read failed ({}): {e}", self.failure_streak);
                }
            }
        }
    }

    /// Cancel callbacks, release buffers, detach the widget. Idempotent.
    pub fn unmount(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.timers.cancel_all(&mut self.scheduler);
        self.render.release();
        self.controller.detach();
        log::info!(
            "[session] stopped after {} frames, {} spectrum updates",
            self.stats.frames,
            self.stats.spectrum_updates
        );
        self.state = LoopState::Stopped;
    }
}
