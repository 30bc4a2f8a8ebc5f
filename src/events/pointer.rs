use starfield_core::{normalize_event_timestamp, InputEvent, Starfield};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Mouse, pen and touch listeners. Each one only queues an event; the frame
/// loop applies them before the next physics step.
pub fn wire_input_handlers(window: &web::Window, starfield: Rc<RefCell<Starfield>>) {
    wire_mousedown(window, starfield.clone());
    wire_pointermove(window, starfield.clone());
    wire_touch(window, "touchstart", true, starfield.clone());
    wire_touch(window, "touchmove", false, starfield);
}

/// Event time on the `performance.now()` clock.
fn event_time_ms(ev: &web::Event) -> f64 {
    let perf = web::window().and_then(|w| w.performance());
    let now = perf.as_ref().map(|p| p.now()).unwrap_or(0.0);
    let origin = perf.as_ref().map(|p| p.time_origin());
    normalize_event_timestamp(ev.time_stamp(), now, origin)
}

fn queue(starfield: &Rc<RefCell<Starfield>>, x: i32, y: i32, ev: &web::Event, gesture_start: bool) {
    starfield.borrow_mut().push_input(InputEvent::Pointer {
        x: x as f32,
        y: y as f32,
        time_ms: event_time_ms(ev),
        gesture_start,
    });
}

fn wire_mousedown(window: &web::Window, starfield: Rc<RefCell<Starfield>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        queue(&starfield, ev.client_x(), ev.client_y(), &ev, true);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(window: &web::Window, starfield: Rc<RefCell<Starfield>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // Touch moves arrive through the touch listeners
        if ev.pointer_type() == "touch" {
            return;
        }
        queue(&starfield, ev.client_x(), ev.client_y(), &ev, false);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_touch(window: &web::Window, event: &str, gesture_start: bool, starfield: Rc<RefCell<Starfield>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some(touch) = ev.touches().get(0) {
            queue(&starfield, touch.client_x(), touch.client_y(), &ev, gesture_start);
        }
    }) as Box<dyn FnMut(_)>);

    // Passive so scrolling stays smooth
    let options = web::AddEventListenerOptions::new();
    options.set_passive(true);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}
