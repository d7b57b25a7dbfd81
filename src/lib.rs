#![cfg(target_arch = "wasm32")]
use farmbot_core::{compose, SceneConfig, SceneContext};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod labels;
mod render;
mod startup;
mod timer;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, ctx: &Rc<RefCell<SceneContext>>) {
    dom::sync_canvas_backing_size(canvas);
    ctx.borrow_mut().set_viewport(dom::viewport_rect(canvas));
    let canvas_resize = canvas.clone();
    let ctx_resize = ctx.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        ctx_resize
            .borrow_mut()
            .set_viewport(dom::viewport_rect(&canvas_resize));
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn start_indicators(ctx: &Rc<RefCell<SceneContext>>) -> Vec<timer::IntervalHandle> {
    let periods: Vec<u32> = ctx.borrow().indicators.iter().map(|i| i.period_ms).collect();
    periods
        .into_iter()
        .enumerate()
        .filter_map(|(index, period_ms)| {
            let ctx = ctx.clone();
            match timer::IntervalHandle::start(period_ms, move || {
                ctx.borrow_mut().step_indicator(index);
            }) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::error!("[blink] indicator {} not started: {:?}", index, e);
                    None
                }
            }
        })
        .collect()
}

/// Blink timers run until the page is hidden for unload.
fn wire_timer_teardown(timers: Vec<timer::IntervalHandle>) {
    let timers = RefCell::new(timers);
    let closure = Closure::wrap(Box::new(move || {
        for handle in timers.borrow_mut().drain(..) {
            handle.cancel();
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Compose one scene, bring up its GPU surface and wire everything that
/// drives it. `Ok(false)` means WebGPU could not be initialized.
async fn mount(
    document: &web::Document,
    canvas: web::HtmlCanvasElement,
    config: SceneConfig,
) -> anyhow::Result<bool> {
    let ctx = Rc::new(RefCell::new(compose(&config)?));
    wire_canvas_resize(&canvas, &ctx);

    let Some(gpu) = frame::init_gpu(&canvas).await else {
        return Ok(false);
    };

    wire_timer_teardown(start_indicators(&ctx));
    assets::resolve_all(&ctx);
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        ctx: ctx.clone(),
    });
    let labels = labels::LabelOverlay::new(document, &ctx.borrow().labels);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        ctx,
        canvas,
        gpu,
        labels,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    log::info!("[mount] {} running", config.name);
    Ok(true)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("farmbot-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    if !dom::webgpu_available(&window) {
        log::warn!("[gpu] navigator.gpu missing");
        dom::show_fallback(&document, CONTAINER_ID, WEBGPU_MISSING_MESSAGE, FALLBACK_CLASS);
        return Ok(());
    }

    if !render::adapter_available().await {
        log::warn!("[gpu] no adapter");
        dom::show_fallback(&document, CONTAINER_ID, WEBGPU_MISSING_MESSAGE, FALLBACK_CLASS);
        return Ok(());
    }

    let scenes: [(&str, fn() -> SceneConfig); 2] = [
        (CONTROLS_CANVAS_ID, SceneConfig::control_box),
        (GARDEN_CANVAS_ID, SceneConfig::garden_bed),
    ];
    let mut mounted = 0;
    for (id, preset) in scenes {
        let Some(canvas) = dom::canvas_by_id(&document, id) else {
            continue;
        };
        match mount(&document, canvas, preset()).await {
            Ok(true) => mounted += 1,
            Ok(false) => match startup::on_gpu_failure(mounted) {
                startup::GpuFailure::ShowFallback => {
                    dom::show_fallback(
                        &document,
                        CONTAINER_ID,
                        WEBGPU_MISSING_MESSAGE,
                        FALLBACK_CLASS,
                    );
                    return Ok(());
                }
                startup::GpuFailure::SkipScene => {
                    log::error!("[mount] #{} skipped, GPU setup failed", id)
                }
            },
            Err(e) => log::error!("[mount] #{}: {:?}", id, e),
        }
    }
    if mounted == 0 {
        log::warn!(
            "[mount] no scene started (expected #{} or #{})",
            CONTROLS_CANVAS_ID,
            GARDEN_CANVAS_ID
        );
    }
    Ok(())
}
