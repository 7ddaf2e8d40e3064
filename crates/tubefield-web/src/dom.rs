use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::debug!("[dom] no #{element_id}; click handler not installed");
    }
}

/// Submit handler with the browser's default navigation suppressed.
pub fn add_submit_listener(
    document: &web::Document,
    form_id: &str,
    mut handler: impl FnMut() + 'static,
) -> bool {
    let Some(el) = document.get_element_by_id(form_id) else {
        return false;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
        handler();
    }) as Box<dyn FnMut(web::Event)>);
    let _ = el.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
    closure.forget();
    true
}

/// Window listener whose closure lives for the rest of the page.
pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(w) = web::window() {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = w.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn input_value(document: &web::Document, element_id: &str) -> Option<String> {
    document
        .get_element_by_id(element_id)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()
        .map(|input| input.value())
}

pub fn select_value(document: &web::Document, element_id: &str) -> Option<String> {
    document
        .get_element_by_id(element_id)?
        .dyn_into::<web::HtmlSelectElement>()
        .ok()
        .map(|select| select.value())
}

/// Full-size canvas appended to `parent`.
pub fn create_canvas(
    document: &web::Document,
    parent: &web::Element,
) -> Result<web::HtmlCanvasElement, JsValue> {
    let canvas: web::HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_attribute("style", "width:100%;height:100%;display:block")?;
    parent.append_child(&canvas)?;
    Ok(canvas)
}

/// Match the canvas backing store to its CSS size * devicePixelRatio.
///
/// A collapsed (zero-area) canvas is left untouched; returns whether the
/// canvas currently has a drawable area.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> bool {
    let Some(w) = web::window() else {
        return false;
    };
    let dpr = w.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    if w_px == 0 || h_px == 0 {
        return false;
    }
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    true
}
