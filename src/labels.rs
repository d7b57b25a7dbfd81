use crate::constants::{LABEL_CLASS, LABEL_SMALL_CLASS};
use farmbot_core::{Label, ViewportRect};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One fixed-position DOM element per scene label, moved every frame.
pub struct LabelOverlay {
    elements: Vec<Option<web::HtmlElement>>,
    shown: Vec<bool>,
}

impl LabelOverlay {
    pub fn new(document: &web::Document, labels: &[Label]) -> Self {
        let body = document.body();
        let elements: Vec<Option<web::HtmlElement>> = labels
            .iter()
            .map(|label| {
                let el = document
                    .create_element("div")
                    .ok()?
                    .dyn_into::<web::HtmlElement>()
                    .ok()?;
                el.set_class_name(if label.small {
                    LABEL_SMALL_CLASS
                } else {
                    LABEL_CLASS
                });
                el.set_text_content(Some(&label.text));
                let style = el.style();
                _ = style.set_property("position", "fixed");
                _ = style.set_property("pointer-events", "none");
                _ = style.set_property("transform", "translate(-50%, -50%)");
                _ = style.set_property("display", "none");
                if let Some(b) = &body {
                    _ = b.append_child(&el);
                }
                Some(el)
            })
            .collect();
        let missing = elements.iter().filter(|e| e.is_none()).count();
        if missing > 0 {
            log::warn!("[labels] {} label elements could not be created", missing);
        }
        let shown = vec![false; elements.len()];
        Self { elements, shown }
    }

    /// Apply canvas-relative positions; `None` hides the label.
    pub fn update(&mut self, viewport: &ViewportRect, positions: &[Option<Vec2>]) {
        for ((el, shown), pos) in self
            .elements
            .iter()
            .zip(self.shown.iter_mut())
            .zip(positions)
        {
            let Some(el) = el else { continue };
            let style = el.style();
            match pos {
                Some(p) => {
                    _ = style.set_property("left", &format!("{:.1}px", viewport.left + p.x));
                    _ = style.set_property("top", &format!("{:.1}px", viewport.top + p.y));
                    if !*shown {
                        _ = style.set_property("display", "block");
                        *shown = true;
                    }
                }
                None if *shown => {
                    _ = style.set_property("display", "none");
                    *shown = false;
                }
                None => {}
            }
        }
    }
}
