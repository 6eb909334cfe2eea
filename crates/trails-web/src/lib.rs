#![cfg(target_arch = "wasm32")]
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use trails_core::{camera_position_vec3, Camera, Session};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod api;
mod dom;
mod events;
mod frame;
mod keys;
mod orbit;
mod render;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("trails-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let ctx2d: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the backing store at CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
        resize_closure.forget();
    }

    let api_url = canvas
        .get_attribute("data-api-url")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| api::DEFAULT_API_URL.to_string());
    log::info!("[init] api at {api_url}");

    let session = Rc::new(RefCell::new(Session::default()));
    let orbit = Rc::new(RefCell::new(orbit::Orbit::looking_at(
        camera_position_vec3(),
        Vec3::ZERO,
    )));

    events::wire_global_keydown(session.clone());
    events::wire_orbit_handlers(&canvas, orbit.clone());
    events::wire_controls(&document, session.clone(), api_url);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        orbit,
        document,
        canvas,
        ctx2d,
        camera: Camera::default(),
        last_instant: Instant::now(),
        events: Vec::new(),
        panel: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
