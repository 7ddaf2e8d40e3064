use crate::VizError;

/// Handle returned by the host for a pending callback.
pub type CallbackId = i32;

/// Host event-loop timers: one per-frame callback and one periodic callback.
///
/// In the browser these are `requestAnimationFrame` and `setInterval`; the
/// host serializes both callbacks on a single thread.
pub trait HostScheduler {
    fn request_frame(&mut self) -> Result<CallbackId, VizError>;
    fn cancel_frame(&mut self, id: CallbackId);
    fn start_interval(&mut self, period_ms: u32) -> Result<CallbackId, VizError>;
    fn cancel_interval(&mut self, id: CallbackId);
}

/// Ids of the callbacks currently armed for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    frame: Option<CallbackId>,
    interval: Option<CallbackId>,
}

impl Timers {
    pub fn frame(&self) -> Option<CallbackId> {
        self.frame
    }

    pub fn interval(&self) -> Option<CallbackId> {
        self.interval
    }

    pub fn is_idle(&self) -> bool {
        self.frame.is_none() && self.interval.is_none()
    }

    pub fn arm_interval<S: HostScheduler>(
        &mut self,
        scheduler: &mut S,
        period_ms: u32,
    ) -> Result<(), VizError> {
        if self.interval.is_none() {
            self.interval = Some(scheduler.start_interval(period_ms)?);
        }
        Ok(())
    }

    /// The pending frame callback is running; its id is spent.
    pub fn frame_fired(&mut self) {
        self.frame = None;
    }

    pub fn arm_frame<S: HostScheduler>(&mut self, scheduler: &mut S) -> Result<(), VizError> {
        if self.frame.is_none() {
            self.frame = Some(scheduler.request_frame()?);
        }
        Ok(())
    }

    /// Cancel whatever is still pending.
    pub fn cancel_all<S: HostScheduler>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.frame.take() {
            scheduler.cancel_frame(id);
        }
        if let Some(id) = self.interval.take() {
            scheduler.cancel_interval(id);
        }
    }
}
