// Host-side tests for the attach/detach guard used while mounting.

#![allow(dead_code)]
mod guard {
    include!("../src/guard.rs");
}

use std::cell::Cell;
use std::rc::Rc;

use guard::{Detach, DetachGuard};

#[derive(Clone, Default)]
struct FakeNode {
    detached: Rc<Cell<u32>>,
}

impl Detach for FakeNode {
    fn detach(&self) {
        self.detached.set(self.detached.get() + 1);
    }
}

fn build(node: &FakeNode, fail_at: Option<u32>) -> Result<(), String> {
    let guard = DetachGuard::new(node.clone());
    for step in 0..3 {
        if fail_at == Some(step) {
            return Err(format!("step {step} failed"));
        }
    }
    guard.disarm();
    Ok(())
}

#[test]
fn failed_build_detaches_node_on_every_error_path() {
    for step in 0..3 {
        let node = FakeNode::default();
        assert!(build(&node, Some(step)).is_err());
        assert_eq!(node.detached.get(), 1, "node left attached after step {step}");
    }
}

#[test]
fn successful_build_keeps_node() {
    let node = FakeNode::default();
    assert!(build(&node, None).is_ok());
    assert_eq!(node.detached.get(), 0);
}
