use crate::orbit::Orbit;
use crate::render::CanvasRenderer;
use crate::ui::{self, PanelSnapshot};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use trails_core::{Camera, PlaybackEvent, Session};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// A hidden tab delivers one huge delta on return; replay at most this much.
const MAX_FRAME_DT: Duration = Duration::from_millis(250);

pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub orbit: Rc<RefCell<Orbit>>,

    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub ctx2d: web::CanvasRenderingContext2d,

    pub camera: Camera,
    pub last_instant: Instant,
    pub events: Vec<PlaybackEvent>,
    pub panel: Option<PanelSnapshot>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(MAX_FRAME_DT);
        self.last_instant = now;

        self.events.clear();
        self.session.borrow_mut().tick(dt, &mut self.events);
        for ev in &self.events {
            match ev {
                PlaybackEvent::StepAdvanced { step } => log::debug!("[frame] step {step}"),
                PlaybackEvent::Finished => log::info!("[frame] playback finished"),
                _ => {}
            }
        }

        let session = self.session.borrow();
        let snap = PanelSnapshot::of(&session);
        if self.panel.as_ref() != Some(&snap) {
            ui::sync_panel(&self.document, &session, &snap);
            self.panel = Some(snap);
        }

        let viewport = Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32);
        self.camera.aspect = viewport.x / viewport.y.max(1.0);
        self.camera.eye = self.orbit.borrow().eye();
        self.camera.target = self.orbit.borrow().target;

        let mut renderer = CanvasRenderer::new(
            &self.ctx2d,
            &self.camera,
            viewport,
            session.scene.text_offset_y,
        );
        renderer.clear();
        renderer.draw_backdrop();
        session.compose().submit(&mut renderer);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    let tick = tick.borrow();
    if let Some(cb) = tick.as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame error: {:?}", e);
        }
    }
}
