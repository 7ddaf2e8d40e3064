//! YouTube IFrame player binding.
//!
//! The API script is injected once per page; each mounted visualizer owns
//! its own [`YouTubePlayer`] handle and waits for `YT.Player` by polling, so
//! nothing is registered on the global `onYouTubeIframeAPIReady` hook.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use tubefield_core::{PlaybackSource, PlayerOptions, PlayerState, VideoId, VizError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::{
    PLAYER_API_MAX_POLLS, PLAYER_API_POLL_MS, PLAYER_API_SCRIPT_ID, PLAYER_API_URL, PLAYER_HEIGHT,
    PLAYER_WIDTH,
};
use crate::guard::DetachGuard;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    type YtPlayer;

    #[wasm_bindgen(constructor, js_namespace = YT, js_class = "Player", catch)]
    fn new(host: &web::Element, options: &Object) -> Result<YtPlayer, JsValue>;

    #[wasm_bindgen(method, js_name = playVideo, catch)]
    fn play_video(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = pauseVideo, catch)]
    fn pause_video(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = seekTo, catch)]
    fn seek_to(this: &YtPlayer, seconds: f64, allow_seek_ahead: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = loadVideoById, catch)]
    fn load_video_by_id(this: &YtPlayer, video_id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getCurrentTime, catch)]
    fn get_current_time(this: &YtPlayer) -> Result<f64, JsValue>;

    #[wasm_bindgen(method, js_name = getVolume, catch)]
    fn get_volume(this: &YtPlayer) -> Result<f64, JsValue>;

    #[wasm_bindgen(method, js_name = isMuted, catch)]
    fn is_muted(this: &YtPlayer) -> Result<bool, JsValue>;

    #[wasm_bindgen(method, js_name = getPlayerState, catch)]
    fn get_player_state(this: &YtPlayer) -> Result<i32, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn destroy(this: &YtPlayer) -> Result<(), JsValue>;
}

#[inline]
fn js_error(e: JsValue) -> VizError {
    VizError::Player(format!("{:?}", e))
}

/// Whether `YT.Player` is defined yet.
fn api_loaded() -> bool {
    let global = js_sys::global();
    Reflect::get(&global, &JsValue::from_str("YT"))
        .ok()
        .filter(|yt| yt.is_object())
        .and_then(|yt| Reflect::get(&yt, &JsValue::from_str("Player")).ok())
        .map(|p| p.is_function())
        .unwrap_or(false)
}

async fn sleep_ms(ms: i32) -> Result<(), VizError> {
    let window = web::window().ok_or_else(|| VizError::Scheduler("no window".into()))?;
    let mut scheduled = Ok(0);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    scheduled.map_err(|e| VizError::Scheduler(format!("{:?}", e)))?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| VizError::Scheduler(format!("{:?}", e)))
}

/// Inject the IFrame API script (once) and wait until `YT.Player` exists.
pub async fn ensure_api(document: &web::Document) -> Result<(), VizError> {
    if api_loaded() {
        return Ok(());
    }
    if document.get_element_by_id(PLAYER_API_SCRIPT_ID).is_none() {
        let script = document.create_element("script").map_err(js_error)?;
        script.set_id(PLAYER_API_SCRIPT_ID);
        script.set_attribute("src", PLAYER_API_URL).map_err(js_error)?;
        let body = document
            .body()
            .ok_or_else(|| VizError::MissingMountPoint("body".into()))?;
        body.append_child(&script).map_err(js_error)?;
        log::info!("[player] injected {PLAYER_API_URL}");
    }
    for _ in 0..PLAYER_API_MAX_POLLS {
        if api_loaded() {
            return Ok(());
        }
        sleep_ms(PLAYER_API_POLL_MS).await?;
    }
    Err(VizError::Player(format!(
        "IFrame API did not load after {} ms",
        PLAYER_API_POLL_MS as u32 * PLAYER_API_MAX_POLLS
    )))
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), VizError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

/// One embedded player; destroyed by [`PlaybackSource::destroy`] or on drop.
pub struct YouTubePlayer {
    player: YtPlayer,
    host: web::Element,
    ready: Rc<Cell<bool>>,
    _on_ready: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
    destroyed: bool,
}

impl YouTubePlayer {
    /// Embed a player for `video_id` in a fresh element under `#container_id`.
    ///
    /// The API must already be loaded (see [`ensure_api`]).
    pub fn create(
        document: &web::Document,
        container_id: &str,
        video_id: &VideoId,
        options: &PlayerOptions,
    ) -> Result<Self, VizError> {
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| VizError::MissingMountPoint(container_id.to_owned()))?;

        let ready = Rc::new(Cell::new(false));
        let ready_flag = ready.clone();
        let on_ready = Closure::wrap(Box::new(move |_ev: JsValue| {
            ready_flag.set(true);
            log::info!("[player] ready");
        }) as Box<dyn FnMut(JsValue)>);
        let on_error = Closure::wrap(Box::new(move |ev: JsValue| {
            let code = Reflect::get(&ev, &JsValue::from_str("data"))
                .ok()
                .and_then(|d| d.as_f64());
            log::warn!("[player] widget error {:?}", code);
        }) as Box<dyn FnMut(JsValue)>);

        let vars = Object::new();
        for (key, value) in options.player_vars() {
            set(&vars, key, &JsValue::from(value))?;
        }
        let events = Object::new();
        set(&events, "onReady", on_ready.as_ref())?;
        set(&events, "onError", on_error.as_ref())?;
        let opts = Object::new();
        set(&opts, "videoId", &JsValue::from_str(video_id.as_str()))?;
        set(&opts, "width", &JsValue::from_str(PLAYER_WIDTH))?;
        set(&opts, "height", &JsValue::from_str(PLAYER_HEIGHT))?;
        set(&opts, "playerVars", &vars)?;
        set(&opts, "events", &events)?;

        // the widget replaces its host element with an iframe
        let host = document.create_element("div").map_err(js_error)?;
        container.append_child(&host).map_err(js_error)?;
        let attached = DetachGuard::new(host.clone());
        let player = YtPlayer::new(&host, &opts).map_err(js_error)?;
        attached.disarm();
        log::info!("[player] created for {video_id}");
        Ok(Self {
            player,
            host,
            ready,
            _on_ready: on_ready,
            _on_error: on_error,
            destroyed: false,
        })
    }

    fn ready_player(&self) -> Result<&YtPlayer, VizError> {
        if self.destroyed {
            Err(VizError::PlayerDetached)
        } else if self.ready.get() {
            Ok(&self.player)
        } else {
            Err(VizError::PlayerNotReady)
        }
    }
}

impl PlaybackSource for YouTubePlayer {
    fn load(&mut self, video_id: &VideoId) -> Result<(), VizError> {
        self.ready_player()?
            .load_video_by_id(video_id.as_str())
            .map_err(js_error)
    }

    fn play(&mut self) -> Result<(), VizError> {
        self.ready_player()?.play_video().map_err(js_error)
    }

    fn pause(&mut self) -> Result<(), VizError> {
        self.ready_player()?.pause_video().map_err(js_error)
    }

    fn seek_to(&mut self, seconds: f64) -> Result<(), VizError> {
        self.ready_player()?.seek_to(seconds, true).map_err(js_error)
    }

    fn current_time(&self) -> Result<f64, VizError> {
        self.ready_player()?.get_current_time().map_err(js_error)
    }

    fn volume(&self) -> Result<f64, VizError> {
        self.ready_player()?.get_volume().map_err(js_error)
    }

    fn is_muted(&self) -> Result<bool, VizError> {
        self.ready_player()?.is_muted().map_err(js_error)
    }

    fn state(&self) -> Result<PlayerState, VizError> {
        self.ready_player()?
            .get_player_state()
            .map(PlayerState::from_code)
            .map_err(js_error)
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.ready.set(false);
        if let Err(e) = self.player.destroy() {
            log::warn!("[player] destroy failed: {:?}", e);
        }
        self.host.remove();
    }
}

impl Drop for YouTubePlayer {
    fn drop(&mut self) {
        self.destroy();
    }
}
