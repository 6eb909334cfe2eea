use std::cell::RefCell;
use std::rc::Rc;

use trails_core::{LoadError, Session, TokenRecord, VisualizeRequest, VisualizeResponse};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const DEFAULT_API_URL: &str = "http://localhost:7860";
const VISUALIZE_PATH: &str = "/api/visualize";

#[inline]
fn js_err(e: JsValue) -> LoadError {
    LoadError::Request(format!("{e:?}"))
}

/// POST `request` to the visualize endpoint and decode the token list.
pub async fn fetch_tokens(
    base_url: &str,
    request: &VisualizeRequest,
) -> Result<Vec<TokenRecord>, LoadError> {
    let body = serde_json::to_string(request)?;
    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_mode(web::RequestMode::Cors);
    init.set_body(&JsValue::from_str(&body));

    let url = format!("{}{}", base_url.trim_end_matches('/'), VISUALIZE_PATH);
    let req = web::Request::new_with_str_and_init(&url, &init).map_err(js_err)?;
    req.headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let window = web::window().ok_or_else(|| LoadError::Request("no window".into()))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_request(&req))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        return Err(LoadError::Status(resp.status()));
    }
    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| LoadError::Request("response body is not text".into()))?;
    Ok(VisualizeResponse::from_json(&text)?.tokens)
}

/// Start a load for `text` on `session`. Rejected input is reported on the
/// session and sends nothing.
pub fn submit(session: Rc<RefCell<Session>>, base_url: String, text: &str) {
    let begun = session.borrow_mut().begin_load(text);
    let Ok((ticket, request)) = begun else {
        return;
    };
    spawn_local(async move {
        let result = fetch_tokens(&base_url, &request).await;
        session.borrow_mut().finish_load(ticket, result);
    });
}
