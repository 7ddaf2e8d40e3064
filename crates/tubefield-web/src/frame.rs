use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use tubefield_core::{
    PlaybackController, PlayerOptions, Preset, Session, SessionStats, VideoId, VizError,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::constants::{FPS_LOG_INTERVAL_SEC, PLAYER_CONTAINER_ID, VIZ_CONTAINER_ID};
use crate::dom;
use crate::guard::DetachGuard;
use crate::player::{self, YouTubePlayer};
use crate::render::GpuState;
use crate::schedule::{BrowserScheduler, CallbackSlots};

pub type WebSession = Session<BrowserScheduler, YouTubePlayer>;

/// GPU lifecycle; creation waits until the canvas has a drawable area.
pub enum GpuSlot {
    Pending,
    Initializing,
    Ready(GpuState),
    Failed,
    Released,
}

pub struct FrameContext {
    pub session: WebSession,
    pub gpu: Rc<RefCell<GpuSlot>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_log: Instant,
    pub frames_since_log: u32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let Some(view) = self.session.on_frame() else {
            return;
        };
        let particle_count = view.positions.len();
        {
            let mut slot = self.gpu.borrow_mut();
            match &mut *slot {
                GpuSlot::Ready(g) => {
                    g.resize_if_needed(self.canvas.width(), self.canvas.height());
                    match g.render(&view) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            log::warn!("[gpu] surface lost; reconfiguring");
                            g.reconfigure();
                        }
                        Err(e) => log::error!("render error: {:?}", e),
                    }
                }
                GpuSlot::Pending => {
                    if dom::sync_canvas_backing_size(&self.canvas) {
                        *slot = GpuSlot::Initializing;
                        init_gpu(self.gpu.clone(), self.canvas.clone(), particle_count);
                    }
                }
                GpuSlot::Initializing | GpuSlot::Failed | GpuSlot::Released => {}
            }
        }

        self.frames_since_log += 1;
        let since = self.last_log.elapsed().as_secs_f64();
        if since >= FPS_LOG_INTERVAL_SEC {
            let stats = self.session.stats();
            log::info!(
                "[frame] {:.1} fps, {} frames, {} spectrum updates, {} failed reads",
                self.frames_since_log as f64 / since,
                stats.frames,
                stats.spectrum_updates,
                stats.failed_reads
            );
            self.frames_since_log = 0;
            self.last_log = Instant::now();
        }
    }

    pub fn spectrum_tick(&mut self) {
        self.session.on_spectrum_tick();
    }
}

fn init_gpu(slot: Rc<RefCell<GpuSlot>>, canvas: web::HtmlCanvasElement, particle_count: usize) {
    spawn_local(async move {
        let result = GpuState::new(&canvas, particle_count).await;
        let mut slot = slot.borrow_mut();
        let waiting = matches!(*slot, GpuSlot::Initializing);
        match result {
            Ok(gpu) if waiting => *slot = GpuSlot::Ready(gpu),
            Ok(mut gpu) => {
                // unmounted while the adapter was being requested
                gpu.release();
            }
            Err(e) if waiting => {
                log::error!("WebGPU init error: {:?}", e);
                *slot = GpuSlot::Failed;
            }
            Err(e) => log::debug!("[gpu] init finished after unmount: {:?}", e),
        }
    });
}

/// Handle to one running visualization. Owns the player, the session and
/// every browser callback; dropping it unmounts.
pub struct MountedVisualizer {
    ctx: Rc<RefCell<FrameContext>>,
    slots: CallbackSlots,
    resize: Option<Closure<dyn FnMut()>>,
    preset: Preset,
    unmounted: bool,
}

impl MountedVisualizer {
    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn stats(&self) -> SessionStats {
        self.ctx.borrow().session.stats()
    }

    pub fn play(&self) -> Result<(), VizError> {
        self.ctx.borrow_mut().session.controller_mut().play()
    }

    pub fn pause(&self) -> Result<(), VizError> {
        self.ctx.borrow_mut().session.controller_mut().pause()
    }

    pub fn restart(&self) -> Result<(), VizError> {
        self.ctx.borrow_mut().session.controller_mut().restart()
    }

    /// Swap the video shown by this session's player.
    pub fn load(&self, video_id: &VideoId) -> Result<(), VizError> {
        self.ctx.borrow_mut().session.controller_mut().load(video_id)
    }

    /// Cancel callbacks, destroy the player, free GPU buffers and remove the
    /// canvas. Idempotent.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        let mut ctx = self.ctx.borrow_mut();
        ctx.session.unmount();
        self.slots.clear();
        let previous = std::mem::replace(&mut *ctx.gpu.borrow_mut(), GpuSlot::Released);
        if let GpuSlot::Ready(mut gpu) = previous {
            gpu.release();
        }
        if let (Some(resize), Some(w)) = (self.resize.take(), web::window()) {
            let _ = w
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
        }
        ctx.canvas.remove();
        log::info!("[mount] unmounted {} visualizer", self.preset.name());
    }
}

impl Drop for MountedVisualizer {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Build and start a visualization for `video_id` inside `#viz-container`.
pub async fn mount(
    document: &web::Document,
    video_id: &VideoId,
    preset: Preset,
    options: &PlayerOptions,
) -> anyhow::Result<MountedVisualizer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let container = document
        .get_element_by_id(VIZ_CONTAINER_ID)
        .ok_or_else(|| VizError::MissingMountPoint(VIZ_CONTAINER_ID.into()))?;
    let config = preset.config();
    config.validate()?;

    player::ensure_api(document).await?;
    let player = YouTubePlayer::create(document, PLAYER_CONTAINER_ID, video_id, options)?;

    let canvas =
        dom::create_canvas(document, &container).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    dom::sync_canvas_backing_size(&canvas);

    let attached = DetachGuard::<web::Element>::new(canvas.clone().into());

    let slots = CallbackSlots::default();
    let scheduler = BrowserScheduler::new(window.clone(), slots.clone());
    let session = Session::new(&config, scheduler, PlaybackController::new(player))?;
    let ctx = Rc::new(RefCell::new(FrameContext {
        session,
        gpu: Rc::new(RefCell::new(GpuSlot::Pending)),
        canvas: canvas.clone(),
        last_log: Instant::now(),
        frames_since_log: 0,
    }));

    let frame_ctx = ctx.clone();
    let frame = Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
    }) as Box<dyn FnMut()>);
    let tick_ctx = ctx.clone();
    let tick = Closure::wrap(Box::new(move || {
        tick_ctx.borrow_mut().spectrum_tick();
    }) as Box<dyn FnMut()>);
    slots.install(frame, tick);

    let canvas_resize = canvas.clone();
    let resize = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Err(e) =
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
    {
        log::warn!("[mount] resize listener not installed: {:?}", e);
    }

    let mut mounted = MountedVisualizer {
        ctx,
        slots,
        resize: Some(resize),
        preset,
        unmounted: false,
    };
    attached.disarm();
    let started = mounted.ctx.borrow_mut().session.start();
    if let Err(e) = started {
        mounted.unmount();
        return Err(e.into());
    }
    debug_assert!(mounted.slots.is_installed());
    log::info!("[mount] {} visualizer for {video_id}", preset.name());
    Ok(mounted)
}
