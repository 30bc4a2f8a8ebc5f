use starfield_core::{command_for_key, InputEvent, KeyCommand, Starfield};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Held-down repeats and IME composition never reach the starfield.
#[inline]
pub fn command_for_event(ev: &web::KeyboardEvent) -> Option<KeyCommand> {
    if ev.repeat() || ev.is_composing() {
        return None;
    }
    command_for_key(&ev.key())
}

pub fn wire_global_keydown(starfield: Rc<RefCell<Starfield>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if let Some(cmd) = command_for_event(&ev) {
                    log::debug!("[keys] {} -> {:?}", ev.key(), cmd);
                    starfield.borrow_mut().push_input(InputEvent::Key(cmd));
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
