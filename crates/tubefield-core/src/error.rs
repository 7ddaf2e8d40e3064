//! Error type shared by the core and the web front-end.

use thiserror::Error;

use crate::session::LoopState;

/// Everything that can go wrong while mounting or driving a visualization.
///
/// Only construction-time errors reach the user; per-frame and per-tick
/// errors are logged by the caller and swallowed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum VizError {
    /// The pasted URL is not a supported YouTube URL.
    #[error("Invalid YouTube URL")]
    NoVideoId,
    /// The player widget has not signalled readiness yet.
    #[error("video player is not ready")]
    PlayerNotReady,
    /// The player answered, but with nothing usable (e.g. NaN time).
    #[error("video player returned no {0}")]
    NoPlaybackData(&'static str),
    /// The controller was detached from its widget during teardown.
    #[error("video player has been detached")]
    PlayerDetached,
    /// A call into the widget threw.
    #[error("video player error: {0}")]
    Player(String),
    #[error("missing mount point #{0}")]
    MissingMountPoint(String),
    #[error("invalid visualizer config: {0}")]
    InvalidConfig(String),
    #[error("render loop cannot go from {from:?} to {to:?}")]
    InvalidTransition { from: LoopState, to: LoopState },
    #[error("failed to schedule callback: {0}")]
    Scheduler(String),
}
