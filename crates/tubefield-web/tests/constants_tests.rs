// Host-side tests for the web constants.
// The web crate is wasm-only, so the pure module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct_and_selector_safe() {
    let ids = [
        FORM_ID,
        URL_INPUT_ID,
        PRESET_SELECT_ID,
        ERROR_BANNER_ID,
        PLAY_BUTTON_ID,
        PAUSE_BUTTON_ID,
        RESTART_BUTTON_ID,
        VIZ_CONTAINER_ID,
        PLAYER_CONTAINER_ID,
        PLAYER_API_SCRIPT_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(
            a.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'),
            "id {a:?} needs escaping"
        );
        for b in &ids[i + 1..] {
            assert_ne!(a, b, "duplicate element id");
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn sprite_and_polling_tuning_is_sane() {
    assert!(POINT_SIZE > 0.0 && POINT_SIZE < 1.0);
    assert!(POINT_OPACITY > 0.0 && POINT_OPACITY <= 1.0);
    assert!(CLEAR_RGB.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!(PLAYER_API_POLL_MS > 0);
    assert!(PLAYER_API_MAX_POLLS > 0);
    // give the API script at least a few seconds on slow connections
    assert!(PLAYER_API_POLL_MS as u32 * PLAYER_API_MAX_POLLS >= 5_000);
    assert!(FPS_LOG_INTERVAL_SEC > 0.0);
}

#[test]
fn player_api_is_fetched_over_https() {
    assert!(PLAYER_API_URL.starts_with("https://www.youtube.com/"));
}
