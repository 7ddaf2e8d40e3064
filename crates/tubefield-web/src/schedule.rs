//! `HostScheduler` on top of `requestAnimationFrame` and `setInterval`.

use std::cell::RefCell;
use std::rc::Rc;

use tubefield_core::{CallbackId, HostScheduler, VizError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// The two callbacks a mounted visualizer hands to the browser.
///
/// Both closures capture the frame context, which in turn owns the scheduler
/// holding these slots; [`CallbackSlots::clear`] breaks that cycle on unmount.
#[derive(Clone, Default)]
pub struct CallbackSlots {
    frame: CallbackSlot,
    tick: CallbackSlot,
}

impl CallbackSlots {
    pub fn install(&self, frame: Closure<dyn FnMut()>, tick: Closure<dyn FnMut()>) {
        *self.frame.borrow_mut() = Some(frame);
        *self.tick.borrow_mut() = Some(tick);
    }

    pub fn is_installed(&self) -> bool {
        self.frame.borrow().is_some() && self.tick.borrow().is_some()
    }

    /// Drop both closures. Only call once their callbacks are cancelled.
    pub fn clear(&self) {
        self.frame.borrow_mut().take();
        self.tick.borrow_mut().take();
    }
}

pub struct BrowserScheduler {
    window: web::Window,
    slots: CallbackSlots,
}

impl BrowserScheduler {
    pub fn new(window: web::Window, slots: CallbackSlots) -> Self {
        Self { window, slots }
    }
}

fn missing(which: &str) -> VizError {
    VizError::Scheduler(format!("{which} callback not installed"))
}

impl HostScheduler for BrowserScheduler {
    fn request_frame(&mut self) -> Result<CallbackId, VizError> {
        let slot = self.slots.frame.borrow();
        let cb = slot.as_ref().ok_or_else(|| missing("frame"))?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| VizError::Scheduler(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, id: CallbackId) {
        if let Err(e) = self.window.cancel_animation_frame(id) {
            log::warn!("[schedule] cancelAnimationFrame({id}) failed: {:?}", e);
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> Result<CallbackId, VizError> {
        let slot = self.slots.tick.borrow();
        let cb = slot.as_ref().ok_or_else(|| missing("spectrum"))?;
        let timeout = i32::try_from(period_ms)
            .map_err(|_| VizError::Scheduler(format!("interval too long: {period_ms} ms")))?;
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|e| VizError::Scheduler(format!("{:?}", e)))
    }

    fn cancel_interval(&mut self, id: CallbackId) {
        self.window.clear_interval_with_handle(id);
    }
}
