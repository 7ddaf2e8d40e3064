#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod banner;
mod constants;
mod dom;
mod frame;
mod guard;
mod player;
mod render;
mod schedule;
mod shell;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tubefield-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    shell::wire(&document).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
