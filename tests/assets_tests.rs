// Host-side tests for attach-when-ready asset slots.

use farmbot_core::constants::{rgb, HOVER_COLOR};
use farmbot_core::{compose, SceneConfig, SceneContext, SceneError};
use std::collections::BTreeSet;

fn garden_bed() -> SceneContext {
    compose(&SceneConfig::garden_bed()).unwrap()
}

fn node_names(ctx: &SceneContext) -> BTreeSet<String> {
    ctx.scene
        .drawables()
        .iter()
        .map(|d| ctx.scene.get(d.node).unwrap().name.clone())
        .collect()
}

#[test]
fn all_assets_start_pending() {
    let ctx = garden_bed();
    let pending: Vec<String> = ctx.assets.pending().into_iter().map(|(n, _)| n).collect();
    assert_eq!(
        pending,
        ["gantry-column-left", "gantry-column-right", "gantry-main-beam"]
    );
    assert!(ctx.scene.find("gantry-main-beam").is_none());
}

#[test]
fn attaching_twice_is_idempotent() {
    let mut ctx = garden_bed();
    let before = ctx.scene.len();
    assert!(ctx.attach_asset("gantry-main-beam").unwrap());
    assert_eq!(ctx.scene.len(), before + 1);
    assert!(!ctx.attach_asset("gantry-main-beam").unwrap());
    assert_eq!(ctx.scene.len(), before + 1);
    assert!(ctx.assets.is_attached("gantry-main-beam"));
    assert_eq!(ctx.assets.pending().len(), 2);
}

#[test]
fn unknown_asset_is_an_error() {
    let mut ctx = garden_bed();
    let err = ctx.attach_asset("no-such-model").unwrap_err();
    assert!(matches!(err, SceneError::UnknownAsset(ref n) if n == "no-such-model"));
}

#[test]
fn completion_order_does_not_matter() {
    let names = ["gantry-column-left", "gantry-column-right", "gantry-main-beam"];
    let mut forward = garden_bed();
    for n in names {
        forward.attach_asset(n).unwrap();
    }
    let mut backward = garden_bed();
    for n in names.iter().rev() {
        backward.attach_asset(n).unwrap();
    }
    assert_eq!(node_names(&forward), node_names(&backward));
}

#[test]
fn missing_asset_leaves_the_rest_working() {
    let mut ctx = garden_bed();
    ctx.attach_asset("gantry-column-left").unwrap();
    // The beam never arrives.
    assert!(ctx.scene.find("gantry-column-left").is_some());
    assert!(ctx.scene.find("gantry-main-beam").is_none());
    let t = ctx.layers.find("toggle-control").unwrap();
    ctx.interaction.pointer_down(Some(t), &mut ctx.scene, &ctx.layers);
    let out = ctx
        .interaction
        .pointer_up(Some(t), &mut ctx.scene, &ctx.layers, &mut ctx.assemblies);
    assert_eq!(out.toggled, Some(("farmbot".to_string(), false)));
}

#[test]
fn late_asset_follows_hidden_assembly() {
    let mut ctx = garden_bed();
    let t = ctx.layers.find("toggle-control").unwrap();
    ctx.interaction.pointer_down(Some(t), &mut ctx.scene, &ctx.layers);
    ctx.interaction
        .pointer_up(Some(t), &mut ctx.scene, &ctx.layers, &mut ctx.assemblies);
    assert_eq!(ctx.assemblies.is_visible("farmbot"), Some(false));

    ctx.attach_asset("gantry-main-beam").unwrap();
    let beam = ctx.scene.find("gantry-main-beam").unwrap();
    assert!(!ctx.scene.is_visible(beam));
    assert!(!node_names(&ctx).contains("gantry-main-beam"));
}

#[test]
fn attaching_leaves_interaction_state_alone() {
    let mut ctx = compose(&SceneConfig::control_box()).unwrap();
    let b1 = ctx.layers.find("button-1").unwrap();
    let object = ctx.layers.object(b1).unwrap().clone();
    let cap = object.highlight.unwrap().part;

    ctx.interaction.pointer_down(Some(b1), &mut ctx.scene, &ctx.layers);
    let held = ctx.scene.offset(object.root).unwrap();
    assert_eq!(ctx.scene.color(cap), Some(rgb(HOVER_COLOR)));

    assert!(ctx.attach_asset("push-button").unwrap());
    assert!(ctx.attach_asset("electronics-box").unwrap());
    assert_eq!(ctx.scene.offset(object.root), Some(held));
    assert_eq!(ctx.scene.color(cap), Some(rgb(HOVER_COLOR)));
    assert_eq!(ctx.interaction.pressed(), Some(b1));
}

#[test]
fn push_button_bases_fill_every_slot() {
    let mut ctx = compose(&SceneConfig::control_box()).unwrap();
    ctx.attach_asset("push-button").unwrap();
    for i in 1..=5 {
        assert!(ctx.scene.find(&format!("button-{i}-base")).is_some());
    }
}
