use farmbot_core::SceneContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Kick off one fetch per pending asset. Each success attaches the asset's
/// proxy nodes whenever it lands; a failure leaves the slot empty.
pub fn resolve_all(ctx: &Rc<RefCell<SceneContext>>) {
    let pending = ctx.borrow().assets.pending();
    for (name, url) in pending {
        let ctx = ctx.clone();
        spawn_local(async move {
            match fetch_ok(&url).await {
                Ok(()) => {
                    let mut c = ctx.borrow_mut();
                    if let Err(e) = c.attach_asset(&name) {
                        log::error!("[asset] {}: {}", name, e);
                    }
                }
                Err(e) => log::warn!("[asset] {} not loaded from {}: {:?}", name, url, e),
            }
        });
    }
}

async fn fetch_ok(url: &str) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    Ok(())
}
