//! Page wiring: form submit, preset select, transport buttons, teardown.

use std::cell::RefCell;
use std::rc::Rc;

use tubefield_core::{extract_video_id, PlayerOptions, Preset, VideoId, VizError};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::banner;
use crate::constants::{
    FORM_ID, PAUSE_BUTTON_ID, PLAY_BUTTON_ID, PRESET_SELECT_ID, RESTART_BUTTON_ID, URL_INPUT_ID,
};
use crate::dom;
use crate::frame::{self, MountedVisualizer};

/// At most one mounted visualizer; `generation` discards mounts that finish
/// after a newer submit.
#[derive(Default)]
struct ShellState {
    mounted: Option<MountedVisualizer>,
    generation: u64,
}

type Shared = Rc<RefCell<ShellState>>;

pub fn wire(document: &web::Document) -> Result<(), VizError> {
    let state: Shared = Rc::default();

    let doc = document.clone();
    let st = state.clone();
    if !dom::add_submit_listener(document, FORM_ID, move || on_submit(&doc, &st)) {
        return Err(VizError::MissingMountPoint(FORM_ID.into()));
    }

    let st = state.clone();
    dom::add_click_listener(document, PLAY_BUTTON_ID, move || {
        with_mounted(&st, "play", MountedVisualizer::play)
    });
    let st = state.clone();
    dom::add_click_listener(document, PAUSE_BUTTON_ID, move || {
        with_mounted(&st, "pause", MountedVisualizer::pause)
    });
    let st = state.clone();
    dom::add_click_listener(document, RESTART_BUTTON_ID, move || {
        with_mounted(&st, "restart", MountedVisualizer::restart)
    });

    dom::add_window_listener("pagehide", move || {
        let mut st = state.borrow_mut();
        st.generation += 1;
        if let Some(mut mounted) = st.mounted.take() {
            let stats = mounted.stats();
            log::info!(
                "[shell] pagehide after {} frames ({} failed reads)",
                stats.frames,
                stats.failed_reads
            );
            mounted.unmount();
        }
    });

    log::info!("[shell] wired #{FORM_ID}");
    Ok(())
}

fn with_mounted(
    state: &Shared,
    action: &str,
    op: impl FnOnce(&MountedVisualizer) -> Result<(), VizError>,
) {
    let st = state.borrow();
    match st.mounted.as_ref() {
        Some(mounted) => {
            if let Err(e) = op(mounted) {
                log::warn!("[shell] {action} failed: {e}");
            }
        }
        None => log::debug!("[shell] {action} ignored; nothing mounted"),
    }
}

fn read_preset(document: &web::Document) -> Preset {
    match dom::select_value(document, PRESET_SELECT_ID) {
        Some(name) => name.parse().unwrap_or_else(|e| {
            log::warn!("[shell] {e}; using {}", Preset::default().name());
            Preset::default()
        }),
        None => Preset::default(),
    }
}

fn on_submit(document: &web::Document, state: &Shared) {
    if !banner::is_hidden(document) {
        banner::clear(document);
    }
    let url = dom::input_value(document, URL_INPUT_ID).unwrap_or_default();
    let video_id = match extract_video_id(&url) {
        Ok(id) => id,
        Err(e) => {
            log::info!("[shell] rejected url {url:?}");
            banner::show(document, &e.to_string());
            return;
        }
    };
    let preset = read_preset(document);

    if try_load_in_place(state, &video_id, preset) {
        return;
    }

    let generation = {
        let mut st = state.borrow_mut();
        st.generation += 1;
        if let Some(mut old) = st.mounted.take() {
            old.unmount();
        }
        st.generation
    };

    let document = document.clone();
    let state = state.clone();
    spawn_local(async move {
        let result = frame::mount(&document, &video_id, preset, &PlayerOptions::default()).await;
        let mut st = state.borrow_mut();
        let current = st.generation == generation;
        match result {
            Ok(mounted) if current => st.mounted = Some(mounted),
            Ok(mut stale) => {
                log::info!("[shell] discarding stale mount #{generation}");
                stale.unmount();
            }
            Err(e) if current => {
                log::error!("mount error: {:?}", e);
                banner::show(&document, &e.to_string());
            }
            Err(e) => log::debug!("[shell] stale mount #{generation} failed: {:?}", e),
        }
    });
}

/// Reuse the mounted session when the preset is unchanged.
fn try_load_in_place(state: &Shared, video_id: &VideoId, preset: Preset) -> bool {
    let st = state.borrow();
    let Some(mounted) = st.mounted.as_ref().filter(|m| m.preset() == preset) else {
        return false;
    };
    match mounted.load(video_id) {
        Ok(()) => {
            log::info!("[shell] loaded {video_id} into running {} session", preset.name());
            true
        }
        Err(e) => {
            log::warn!("[shell] in-place load failed ({e}); remounting");
            false
        }
    }
}
