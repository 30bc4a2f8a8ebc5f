use crate::canvas::CanvasSurface;
use crate::constants::*;
use crate::debug::DebugReadouts;
use crate::dom;
use crate::storage::LocalStorage;
use instant::Instant;
use starfield_core::{Clock, InstantClock, Starfield};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub starfield: Rc<RefCell<Starfield>>,
    pub surface: CanvasSurface,
    pub canvas: web::HtmlCanvasElement,
    pub store: LocalStorage,
    pub debug: DebugReadouts,
    pub clock: InstantClock,

    pub last_instant: Option<Instant>,
    pub bootstrapped: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        if !self.bootstrapped && !self.bootstrap() {
            return;
        }

        let now = Instant::now();
        let elapsed_ms = match self.last_instant {
            Some(last) => {
                let ms = (now - last).as_secs_f64() * 1000.0;
                if ms < FRAME_THROTTLE_MS {
                    return;
                }
                ms
            }
            None => FIRST_FRAME_MS,
        };
        self.last_instant = Some(now);

        let mut starfield = self.starfield.borrow_mut();
        starfield.tick(elapsed_ms as f32, &mut self.surface);
        self.debug.update(self.clock.now_ms(), &starfield);
    }

    // Mobile browsers can report a zero-sized viewport for a few frames
    // after load; hold off creating stars until the canvas is usable.
    fn bootstrap(&mut self) -> bool {
        let (w, h) = dom::sync_canvas_to_viewport(&self.canvas);
        let mut starfield = self.starfield.borrow_mut();
        starfield.resize(w, h);
        if !starfield.scale().is_usable() {
            return false;
        }
        let origin = starfield.restore_or_create(&self.store);
        log::info!("[frame] starfield running at {}x{} ({:?})", w, h, origin);
        self.bootstrapped = true;
        true
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
