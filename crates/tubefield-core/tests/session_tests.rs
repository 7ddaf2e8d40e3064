// Host-side tests for the session lifecycle, driven by fake host timers and
// a scripted player.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use tubefield_core::*;

#[derive(Default)]
struct FakeScheduler {
    next_id: CallbackId,
    frames: RefCell<BTreeSet<CallbackId>>,
    intervals: BTreeSet<CallbackId>,
    refuse: bool,
}

impl FakeScheduler {
    fn pending(&self) -> usize {
        self.frames.borrow().len() + self.intervals.len()
    }

    /// The host runs every pending frame callback.
    fn fire_frames(&self) {
        self.frames.borrow_mut().clear();
    }

    fn issue(&mut self) -> Result<CallbackId, VizError> {
        if self.refuse {
            return Err(VizError::Scheduler("refused".into()));
        }
        self.next_id += 1;
        Ok(self.next_id)
    }
}

impl HostScheduler for FakeScheduler {
    fn request_frame(&mut self) -> Result<CallbackId, VizError> {
        let id = self.issue()?;
        self.frames.borrow_mut().insert(id);
        Ok(id)
    }

    fn cancel_frame(&mut self, id: CallbackId) {
        self.frames.borrow_mut().remove(&id);
    }

    fn start_interval(&mut self, _period_ms: u32) -> Result<CallbackId, VizError> {
        let id = self.issue()?;
        self.intervals.insert(id);
        Ok(id)
    }

    fn cancel_interval(&mut self, id: CallbackId) {
        self.intervals.remove(&id);
    }
}

#[derive(Debug)]
struct PlayerScript {
    ready: bool,
    time: f64,
    volume: f64,
    muted: bool,
    state: PlayerState,
    calls: Vec<String>,
    destroyed: bool,
}

impl Default for PlayerScript {
    fn default() -> Self {
        Self {
            ready: true,
            time: 10.0,
            volume: 100.0,
            muted: false,
            state: PlayerState::Playing,
            calls: Vec::new(),
            destroyed: false,
        }
    }
}

#[derive(Clone, Default)]
struct FakePlayer(Rc<RefCell<PlayerScript>>);

impl FakePlayer {
    fn check(&self) -> Result<(), VizError> {
        if self.0.borrow().ready {
            Ok(())
        } else {
            Err(VizError::PlayerNotReady)
        }
    }

    fn record(&self, call: String) -> Result<(), VizError> {
        self.check()?;
        self.0.borrow_mut().calls.push(call);
        Ok(())
    }
}

impl PlaybackSource for FakePlayer {
    fn load(&mut self, video_id: &VideoId) -> Result<(), VizError> {
        self.record(format!("load {video_id}"))
    }

    fn play(&mut self) -> Result<(), VizError> {
        self.record("play".into())?;
        self.0.borrow_mut().state = PlayerState::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), VizError> {
        self.record("pause".into())?;
        self.0.borrow_mut().state = PlayerState::Paused;
        Ok(())
    }

    fn seek_to(&mut self, seconds: f64) -> Result<(), VizError> {
        self.record(format!("seek {seconds}"))?;
        self.0.borrow_mut().time = seconds;
        Ok(())
    }

    fn current_time(&self) -> Result<f64, VizError> {
        self.check()?;
        Ok(self.0.borrow().time)
    }

    fn volume(&self) -> Result<f64, VizError> {
        self.check()?;
        Ok(self.0.borrow().volume)
    }

    fn is_muted(&self) -> Result<bool, VizError> {
        self.check()?;
        Ok(self.0.borrow().muted)
    }

    fn state(&self) -> Result<PlayerState, VizError> {
        self.check()?;
        Ok(self.0.borrow().state)
    }

    fn destroy(&mut self) {
        self.0.borrow_mut().destroyed = true;
    }
}

fn small_config(preset: Preset) -> VisualizerConfig {
    VisualizerConfig {
        particle_count: 400,
        noise_seed: Some(5),
        ..preset.config()
    }
}

fn frame(session: &mut Session<FakeScheduler, FakePlayer>) -> Option<FrameView<'_>> {
    session.scheduler().fire_frames();
    session.on_frame()
}

fn session(preset: Preset) -> (Session<FakeScheduler, FakePlayer>, FakePlayer) {
    let player = FakePlayer::default();
    let session = Session::new(
        &small_config(preset),
        FakeScheduler::default(),
        PlaybackController::new(player.clone()),
    )
    .unwrap();
    (session, player)
}

#[test]
fn start_arms_one_frame_and_one_interval() {
    let (mut session, _player) = session(Preset::Spectrum);
    assert_eq!(session.state(), LoopState::Idle);
    assert!(session.timers().is_idle());
    session.start().unwrap();
    assert_eq!(session.state(), LoopState::Running);
    assert_eq!(session.scheduler().frames.borrow().len(), 1);
    assert_eq!(session.scheduler().intervals.len(), 1);
    assert!(session.timers().frame().is_some());
    assert!(session.timers().interval().is_some());
}

#[test]
fn start_twice_is_an_invalid_transition() {
    let (mut session, _player) = session(Preset::Ripple);
    session.start().unwrap();
    assert_eq!(
        session.start(),
        Err(VizError::InvalidTransition {
            from: LoopState::Running,
            to: LoopState::Running,
        })
    );
    session.unmount();
    assert!(matches!(
        session.start(),
        Err(VizError::InvalidTransition {
            from: LoopState::Stopped,
            ..
        })
    ));
}

#[test]
fn refused_scheduling_leaves_nothing_armed() {
    let player = FakePlayer::default();
    let mut session = Session::new(
        &small_config(Preset::Oscilloscope),
        FakeScheduler {
            refuse: true,
            ..FakeScheduler::default()
        },
        PlaybackController::new(player),
    )
    .unwrap();
    assert!(matches!(session.start(), Err(VizError::Scheduler(_))));
    assert_eq!(session.state(), LoopState::Idle);
    assert!(session.timers().is_idle());
    assert_eq!(session.scheduler().pending(), 0);
}

#[test]
fn each_frame_rearms_exactly_one_frame() {
    let (mut session, _player) = session(Preset::Oscilloscope);
    session.start().unwrap();
    session.on_spectrum_tick();
    for _ in 0..5 {
        let view = frame(&mut session).unwrap();
        assert_eq!(view.positions.len(), 400);
    }
    assert_eq!(session.stats().frames, 5);
    // ids: interval 1, first frame 2, re-armed frames 3..=7
    assert_eq!(session.timers().frame(), Some(7));
    assert_eq!(
        session.scheduler().frames.borrow().iter().copied().collect::<Vec<_>>(),
        vec![7]
    );
}

#[test]
fn spectrum_ticks_follow_playback() {
    let (mut session, player) = session(Preset::Spectrum);
    session.start().unwrap();
    session.on_spectrum_tick();
    assert_eq!(session.stats().spectrum_updates, 1);
    let mut expected = vec![0.0; 128];
    fill_spectrum(&mut expected, 10.0, 1.0);
    assert_eq!(session.render_loop().spectrum().as_slice(), &expected[..]);

    player.0.borrow_mut().muted = true;
    player.0.borrow_mut().time = 11.0;
    session.on_spectrum_tick();
    assert!(session
        .render_loop()
        .spectrum()
        .as_slice()
        .iter()
        .all(|&s| s == 0.0));
}

#[test]
fn unready_player_keeps_previous_spectrum() {
    let (mut session, player) = session(Preset::Spectrum);
    session.start().unwrap();
    session.on_spectrum_tick();
    let kept = session.render_loop().spectrum().clone();

    player.0.borrow_mut().ready = false;
    player.0.borrow_mut().time = 30.0;
    for _ in 0..3 {
        session.on_spectrum_tick();
    }
    assert_eq!(session.render_loop().spectrum(), &kept);
    assert_eq!(session.stats().failed_reads, 3);

    player.0.borrow_mut().ready = true;
    session.on_spectrum_tick();
    assert_ne!(session.render_loop().spectrum(), &kept);
    assert_eq!(session.stats().spectrum_updates, 2);
}

#[test]
fn nan_time_is_treated_as_missing_data() {
    let (session, player) = session(Preset::Spectrum);
    player.0.borrow_mut().time = f64::NAN;
    assert_eq!(
        session.controller().snapshot(),
        Err(VizError::NoPlaybackData("current time"))
    );
    player.0.borrow_mut().time = 3.0;
    player.0.borrow_mut().volume = 250.0;
    let snapshot = session.controller().snapshot().unwrap();
    assert_eq!(snapshot.volume_fraction, 1.0);
    assert!(snapshot.is_playing);
}

#[test]
fn pause_freezes_the_picture() {
    let (mut session, player) = session(Preset::Oscilloscope);
    session.start().unwrap();
    session.on_spectrum_tick();
    frame(&mut session);
    session.controller_mut().pause().unwrap();
    session.on_spectrum_tick();
    assert!(!session.render_loop().is_playing());

    let (elapsed, positions) = {
        let view = frame(&mut session).unwrap();
        (view.elapsed, view.positions.to_vec())
    };
    for _ in 0..10 {
        let view = frame(&mut session).unwrap();
        assert_eq!(view.elapsed, elapsed);
        assert_eq!(view.positions, &positions[..]);
    }

    session.controller_mut().play().unwrap();
    session.on_spectrum_tick();
    let view = frame(&mut session).unwrap();
    assert!(view.elapsed > elapsed);
    assert_eq!(player.0.borrow().calls, vec!["pause", "play"]);
}

#[test]
fn continue_policy_keeps_the_clock_running() {
    let player = FakePlayer::default();
    player.0.borrow_mut().state = PlayerState::Paused;
    let config = VisualizerConfig {
        pause_policy: PausePolicy::Continue,
        ..small_config(Preset::Ripple)
    };
    let mut session = Session::new(
        &config,
        FakeScheduler::default(),
        PlaybackController::new(player),
    )
    .unwrap();
    session.start().unwrap();
    session.on_spectrum_tick();
    let first = frame(&mut session).unwrap().elapsed;
    let second = frame(&mut session).unwrap().elapsed;
    assert!(second > first);
    assert_eq!(session.render_loop().orbit().orbit_angle, 0.0);
}

#[test]
fn restart_seeks_to_zero_then_plays() {
    let (mut session, player) = session(Preset::Spiral);
    session.controller_mut().restart().unwrap();
    session
        .controller_mut()
        .load(&VideoId::parse("abc123").unwrap())
        .unwrap();
    assert_eq!(player.0.borrow().calls, vec!["seek 0", "play", "load abc123"]);
    assert_eq!(player.0.borrow().time, 0.0);
}

#[test]
fn unmount_cancels_everything_and_detaches() {
    let (mut session, player) = session(Preset::Spiral);
    session.start().unwrap();
    session.on_spectrum_tick();
    frame(&mut session);
    session.unmount();

    assert_eq!(session.state(), LoopState::Stopped);
    assert_eq!(session.scheduler().pending(), 0);
    assert!(session.timers().is_idle());
    assert!(player.0.borrow().destroyed);
    assert!(!session.controller().is_attached());
    assert!(session.render_loop().field().is_empty());
    assert!(session.render_loop().spectrum().is_empty());

    // late callbacks from the host are no-ops
    let stats = session.stats();
    assert!(session.on_frame().is_none());
    session.on_spectrum_tick();
    assert_eq!(session.stats(), stats);
    assert_eq!(session.controller_mut().play(), Err(VizError::PlayerDetached));

    session.unmount();
    assert_eq!(session.state(), LoopState::Stopped);
}

#[test]
fn unmount_from_idle_is_allowed() {
    let (mut session, player) = session(Preset::Ripple);
    session.unmount();
    assert_eq!(session.state(), LoopState::Stopped);
    assert!(player.0.borrow().destroyed);
    assert_eq!(session.scheduler().pending(), 0);
}

#[test]
fn orbit_advances_only_while_playing() {
    let (mut session, player) = session(Preset::Spiral);
    session.start().unwrap();
    player.0.borrow_mut().state = PlayerState::Buffering;
    session.on_spectrum_tick();
    frame(&mut session);
    assert_eq!(session.render_loop().orbit().orbit_angle, 0.0);
    player.0.borrow_mut().state = PlayerState::Playing;
    session.on_spectrum_tick();
    frame(&mut session);
    assert!(session.render_loop().orbit().orbit_angle > 0.0);
}
