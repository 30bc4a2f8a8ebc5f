#![cfg(target_arch = "wasm32")]
use starfield_core::{InstantClock, Starfield};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod canvas;
mod constants;
mod debug;
mod dom;
mod events;
mod frame;
mod storage;

use constants::CANVAS_ID;
use storage::LocalStorage;

thread_local! {
    // Only set once a canvas and 2D context were found; every exported
    // entry point is a no-op while this is empty.
    static STARFIELD: RefCell<Option<Rc<RefCell<Starfield>>>> = const { RefCell::new(None) };
}

fn with_starfield<R>(f: impl FnOnce(&mut Starfield) -> R) -> Option<R> {
    let handle = STARFIELD.with(|slot| slot.borrow().clone())?;
    let mut starfield = handle.try_borrow_mut().ok()?;
    Some(f(&mut starfield))
}

fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement, starfield: Rc<RefCell<Starfield>>) {
    let canvas_resize = canvas.clone();
    dom::add_window_listener(window, "resize", move || {
        let (w, h) = dom::sync_canvas_to_viewport(&canvas_resize);
        starfield.borrow_mut().resize(w, h);
    });
}

fn wire_pagehide(window: &web::Window, starfield: Rc<RefCell<Starfield>>) {
    let mut store = LocalStorage::open();
    dom::add_window_listener(window, "pagehide", move || {
        starfield.borrow().persist(&mut store);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starfield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::warn!("starfield disabled: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let surface = canvas::CanvasSurface::new(canvas::context_2d(&canvas)?)?;

    let starfield = Rc::new(RefCell::new(Starfield::new(rand::random())));
    STARFIELD.with(|slot| *slot.borrow_mut() = Some(starfield.clone()));

    wire_canvas_resize(&window, &canvas, starfield.clone());
    wire_pagehide(&window, starfield.clone());
    events::wire_input_handlers(&window, starfield.clone());
    events::wire_global_keydown(starfield.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        starfield,
        surface,
        canvas,
        store: LocalStorage::open(),
        debug: debug::DebugReadouts::find(&document),
        clock: InstantClock::new(),
        last_instant: None,
        bootstrapped: false,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Stop or resume motion. Frames keep rendering while frozen.
#[wasm_bindgen]
pub fn set_starfield_frozen(frozen: bool) {
    with_starfield(|s| s.set_frozen(frozen));
}

/// Update one interaction setting by its UI name. Returns `false` for
/// unknown names, non-finite values, or when the starfield is disabled.
#[wasm_bindgen]
pub fn set_starfield_setting(name: &str, value: f64) -> bool {
    with_starfield(|s| s.set_setting(name, value as f32)).unwrap_or(false)
}

/// Persist the current stars and interaction state now.
#[wasm_bindgen]
pub fn save_starfield() -> bool {
    with_starfield(|s| s.persist(&mut LocalStorage::open())).unwrap_or(false)
}

#[wasm_bindgen]
pub fn reset_starfield() {
    with_starfield(|s| {
        if s.scale().is_usable() {
            s.reset();
        }
    });
}
