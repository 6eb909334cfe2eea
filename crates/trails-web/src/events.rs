use crate::api;
use crate::dom;
use crate::keys::{self, ControlAction};
use crate::orbit::{DragState, Orbit};
use crate::ui;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use trails_core::Session;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn apply_action(session: &mut Session, action: ControlAction) {
    log::debug!("[controls] {action:?}");
    match action {
        ControlAction::TogglePlay => session.toggle_play(),
        ControlAction::SeekBy(delta) => {
            let engine = session.engine();
            let target = keys::seek_target(engine.step(), delta, engine.total_steps());
            session.seek(target);
        }
        ControlAction::SpeedBy(delta) => {
            let speed = session.engine().speed();
            session.set_speed(speed + delta);
        }
        ControlAction::Reset => session.reset(),
        ControlAction::FontSizeBy(delta) => {
            let size = session.scene.font_size;
            session.scene.set_font_size(size + delta);
        }
    }
}

fn typing_into_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| keys::is_text_entry_tag(&el.tag_name()))
        .unwrap_or(false)
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, session: &Rc<RefCell<Session>>) {
    if typing_into_field(ev) {
        return;
    }
    let Some(action) = keys::action_for_key(&ev.key()) else {
        return;
    };
    if !session.borrow().has_data() {
        return;
    }
    apply_action(&mut session.borrow_mut(), action);
    ev.prevent_default();
}

pub fn wire_global_keydown(session: Rc<RefCell<Session>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &session);
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Drag to orbit, wheel to zoom.
pub fn wire_orbit_handlers(canvas: &web::HtmlCanvasElement, orbit: Rc<RefCell<Orbit>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    // pointerdown
    {
        let drag_d = drag.clone();
        let canvas_d = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            drag_d.borrow_mut().begin(client_pos(&ev));
            let _ = canvas_d.set_pointer_capture(ev.pointer_id());
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let drag_m = drag.clone();
        let orbit_m = orbit.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if let Some(delta) = drag_m.borrow_mut().move_to(client_pos(&ev)) {
                orbit_m.borrow_mut().drag(delta);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup / pointercancel
    {
        let drag_u = drag;
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            drag_u.borrow_mut().end();
        }) as Box<dyn FnMut(_)>);
        for name in ["pointerup", "pointercancel"] {
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // wheel
    {
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            orbit.borrow_mut().zoom(ev.delta_y() as f32);
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Buttons and sliders of the controller panel.
pub fn wire_controls(document: &web::Document, session: Rc<RefCell<Session>>, api_url: String) {
    {
        let session = session.clone();
        let doc = document.clone();
        dom::add_click_listener(document, ui::SUBMIT_ID, move || {
            let text = dom::input_element(&doc, ui::INPUT_ID)
                .map(|input| input.value())
                .unwrap_or_default();
            api::submit(session.clone(), api_url.clone(), &text);
        });
    }
    {
        let session = session.clone();
        dom::add_click_listener(document, ui::PLAY_ID, move || {
            apply_action(&mut session.borrow_mut(), ControlAction::TogglePlay);
        });
    }
    {
        let session = session.clone();
        dom::add_click_listener(document, ui::RESET_ID, move || {
            apply_action(&mut session.borrow_mut(), ControlAction::Reset);
        });
    }
    {
        let session = session.clone();
        dom::add_value_listener(document, ui::STEP_SLIDER_ID, move |v| {
            session.borrow_mut().seek(v.max(0.0) as usize);
        });
    }
    {
        let session = session.clone();
        dom::add_value_listener(document, ui::SPEED_SLIDER_ID, move |v| {
            session.borrow_mut().set_speed(v as f32);
        });
    }
    dom::add_value_listener(document, ui::FONT_SLIDER_ID, move |v| {
        session.borrow_mut().scene.set_font_size(v as f32);
    });
}
