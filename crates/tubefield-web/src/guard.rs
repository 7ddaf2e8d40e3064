// Undo for nodes attached while a mount or player is still being built.

pub trait Detach {
    fn detach(&self);
}

#[cfg(target_arch = "wasm32")]
impl Detach for web_sys::Element {
    fn detach(&self) {
        self.remove();
    }
}

/// Detaches `node` on drop unless [`DetachGuard::disarm`] was called, so
/// every early `?` return after attaching leaves the page as it was.
pub struct DetachGuard<T: Detach> {
    node: T,
    armed: bool,
}

impl<T: Detach> DetachGuard<T> {
    pub fn new(node: T) -> Self {
        Self { node, armed: true }
    }

    /// Construction succeeded; the node now belongs to its owner.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T: Detach> Drop for DetachGuard<T> {
    fn drop(&mut self) {
        if self.armed {
            self.node.detach();
        }
    }
}
