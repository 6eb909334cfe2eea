use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn input_element(document: &web::Document, element_id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

pub fn set_input_value(document: &web::Document, element_id: &str, value: &str) {
    if let Some(input) = input_element(document, element_id) {
        input.set_value(value);
    }
}

pub fn set_disabled(document: &web::Document, element_id: &str, disabled: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = if disabled {
            el.set_attribute("disabled", "")
        } else {
            el.remove_attribute("disabled")
        };
    }
}

pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Call `handler` with the parsed value whenever a range/number input changes.
pub fn add_value_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(f64) + 'static,
) {
    let Some(input) = input_element(document, element_id) else {
        log::warn!("[dom] missing #{element_id}");
        return;
    };
    let source = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        let value = source.value_as_number();
        if value.is_finite() {
            handler(value);
        }
    }) as Box<dyn FnMut()>);
    let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
