use crate::constants::WHEEL_LINE_HEIGHT_PX;
use crate::dom;
use farmbot_core::{InteractionOutcome, SceneContext};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything a scene's pointer closures share.
#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: Rc<RefCell<SceneContext>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_blur(&w);
}

fn reflect(w: &InputWiring, outcome: &InteractionOutcome) {
    dom::set_cursor(&w.canvas, outcome.cursor.css());
    if let Some((assembly, visible)) = &outcome.toggled {
        log::debug!("[input] {} -> {}", assembly, if *visible { "shown" } else { "hidden" });
    }
}

// Moves are listened for on the window so leaving the canvas clears hover.
fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let outcome = w
            .ctx
            .borrow_mut()
            .pointer_move(ev.client_x() as f32, ev.client_y() as f32);
        reflect(&w, &outcome);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let outcome = w
            .ctx
            .borrow_mut()
            .pointer_down(ev.client_x() as f32, ev.client_y() as f32);
        reflect(&w, &outcome);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

// Release is global: letting go anywhere ends a press.
fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let outcome = w
            .ctx
            .borrow_mut()
            .pointer_up(ev.client_x() as f32, ev.client_y() as f32);
        reflect(&w, &outcome);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let mut ctx = w.ctx.borrow_mut();
        if ctx.orbit.is_none() {
            return;
        }
        let delta = match ev.delta_mode() {
            web::WheelEvent::DOM_DELTA_LINE => ev.delta_y() as f32 * WHEEL_LINE_HEIGHT_PX,
            _ => ev.delta_y() as f32,
        };
        ctx.wheel(delta);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

// Focus loss and pointercancel abandon any press without completing a click.
fn wire_blur(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let outcome = w.ctx.borrow_mut().cancel();
        reflect(&w, &outcome);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        _ = wnd
            .add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
