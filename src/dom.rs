use farmbot_core::ViewportRect;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn canvas_by_id(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// Keep the canvas backing store at css size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// The canvas' bounding rect in client coordinates, the space pointer
/// events report in.
pub fn viewport_rect(canvas: &web::HtmlCanvasElement) -> ViewportRect {
    let rect = canvas.get_bounding_client_rect();
    ViewportRect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// `navigator.gpu` is present. Adapter and device requests can still fail later.
pub fn webgpu_available(window: &web::Window) -> bool {
    let navigator = window.navigator();
    js_sys::Reflect::get(&navigator, &wasm_bindgen::JsValue::from_str("gpu"))
        .map(|gpu| !gpu.is_undefined() && !gpu.is_null())
        .unwrap_or(false)
}

/// Append the static "WebGPU unavailable" message to `container_id`.
pub fn show_fallback(document: &web::Document, container_id: &str, message: &str, class: &str) {
    let Some(container) = document.get_element_by_id(container_id) else {
        log::warn!("[dom] missing #{}", container_id);
        return;
    };
    match document.create_element("p") {
        Ok(p) => {
            p.set_class_name(class);
            p.set_text_content(Some(message));
            _ = container.append_child(&p);
        }
        Err(e) => log::error!("[dom] fallback element: {:?}", e),
    }
}

pub fn set_cursor(canvas: &web::HtmlCanvasElement, css: &str) {
    _ = canvas.style().set_property("cursor", css);
}
