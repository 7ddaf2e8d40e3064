//! Thin adapter between an embedded video widget and the signal generator.

use crate::constants::MAX_WIDGET_VOLUME;
use crate::video::VideoId;
use crate::VizError;

/// Player states as reported by the YouTube IFrame API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Unknown(i32),
}

impl PlayerState {
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => PlayerState::Unstarted,
            0 => PlayerState::Ended,
            1 => PlayerState::Playing,
            2 => PlayerState::Paused,
            3 => PlayerState::Buffering,
            5 => PlayerState::Cued,
            other => PlayerState::Unknown(other),
        }
    }
}

/// Control surface of the external video widget.
///
/// Getters may fail with [`VizError::PlayerNotReady`] until the widget has
/// signalled readiness.
pub trait PlaybackSource {
    fn load(&mut self, video_id: &VideoId) -> Result<(), VizError>;
    fn play(&mut self) -> Result<(), VizError>;
    fn pause(&mut self) -> Result<(), VizError>;
    fn seek_to(&mut self, seconds: f64) -> Result<(), VizError>;
    /// Playback position in seconds.
    fn current_time(&self) -> Result<f64, VizError>;
    /// Volume on the widget's 0..=100 scale.
    fn volume(&self) -> Result<f64, VizError>;
    fn is_muted(&self) -> Result<bool, VizError> {
        Ok(false)
    }
    fn state(&self) -> Result<PlayerState, VizError>;
    fn destroy(&mut self);
}

/// Point-in-time reading of the widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSnapshot {
    pub current_time_seconds: f64,
    pub volume_fraction: f32,
    pub is_playing: bool,
}

/// Owns one widget handle for the lifetime of a mounted session.
pub struct PlaybackController<P: PlaybackSource> {
    source: Option<P>,
}

impl<P: PlaybackSource> PlaybackController<P> {
    pub fn new(source: P) -> Self {
        Self {
            source: Some(source),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    fn attached(&self) -> Result<&P, VizError> {
        self.source.as_ref().ok_or(VizError::PlayerDetached)
    }

    fn attached_mut(&mut self) -> Result<&mut P, VizError> {
        self.source.as_mut().ok_or(VizError::PlayerDetached)
    }

    /// Read time, volume and state in one go.
    pub fn snapshot(&self) -> Result<PlaybackSnapshot, VizError> {
        let source = self.attached()?;
        let time = source.current_time()?;
        if !time.is_finite() || time < 0.0 {
            return Err(VizError::NoPlaybackData("current time"));
        }
        let volume = source.volume()?;
        if !volume.is_finite() {
            return Err(VizError::NoPlaybackData("volume"));
        }
        let volume_fraction = if source.is_muted()? {
            0.0
        } else {
            (volume / MAX_WIDGET_VOLUME).clamp(0.0, 1.0) as f32
        };
        let state = source.state()?;
        Ok(PlaybackSnapshot {
            current_time_seconds: time,
            volume_fraction,
            is_playing: state == PlayerState::Playing,
        })
    }

    pub fn play(&mut self) -> Result<(), VizError> {
        self.attached_mut()?.play()
    }

    pub fn pause(&mut self) -> Result<(), VizError> {
        self.attached_mut()?.pause()
    }

    /// Jump back to the start and play.
    pub fn restart(&mut self) -> Result<(), VizError> {
        let source = self.attached_mut()?;
        source.seek_to(0.0)?;
        source.play()
    }

    pub fn load(&mut self, video_id: &VideoId) -> Result<(), VizError> {
        self.attached_mut()?.load(video_id)
    }

    /// Destroy the widget; later calls fail with `PlayerDetached`.
    pub fn detach(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.destroy();
        }
    }
}

/// Construction options forwarded to the widget as `playerVars`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerOptions {
    pub autoplay: bool,
    pub controls: bool,
    pub modest_branding: bool,
    pub enable_js_api: bool,
    pub plays_inline: bool,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            controls: true,
            modest_branding: true,
            enable_js_api: true,
            plays_inline: true,
        }
    }
}

impl PlayerOptions {
    pub fn player_vars(&self) -> [(&'static str, u8); 5] {
        [
            ("autoplay", self.autoplay as u8),
            ("controls", self.controls as u8),
            ("modestbranding", self.modest_branding as u8),
            ("enablejsapi", self.enable_js_api as u8),
            ("playsinline", self.plays_inline as u8),
        ]
    }
}
