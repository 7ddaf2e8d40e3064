use web_sys as web;

use crate::constants::ERROR_BANNER_ID;

#[inline]
pub fn show(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(ERROR_BANNER_ID) {
        el.set_text_content(Some(message));
        let _ = el.set_attribute("style", "");
    } else {
        log::warn!("[banner] {message}");
    }
}

#[inline]
pub fn clear(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(ERROR_BANNER_ID) {
        el.set_text_content(None);
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(ERROR_BANNER_ID)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(true)
}
