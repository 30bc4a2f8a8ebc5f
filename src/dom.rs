use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Viewport size in CSS pixels; zero while the browser has no layout yet.
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (read(window.inner_width()) as f32, read(window.inner_height()) as f32)
}

/// Match the canvas backing store to the viewport and return the new size.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let Some(window) = web::window() else {
        return (0.0, 0.0);
    };
    let (w, h) = viewport_size(&window);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    (w, h)
}

/// Attach a no-argument listener to the window for the page lifetime.
pub fn add_window_listener(window: &web::Window, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
