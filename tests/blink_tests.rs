// Host-side tests for the periodic unlock indicator.

use farmbot_core::constants::{rgb, BLINK_PERIOD_MS, HOVER_COLOR};
use farmbot_core::{compose, SceneConfig, SceneContext};

fn control_box() -> SceneContext {
    compose(&SceneConfig::control_box()).unwrap()
}

fn ring_color(ctx: &SceneContext) -> glam::Vec4 {
    ctx.scene.color(ctx.indicators[0].part).unwrap()
}

#[test]
fn indicator_targets_unlock_ring() {
    let ctx = control_box();
    assert_eq!(ctx.indicators.len(), 1);
    let ind = &ctx.indicators[0];
    assert_eq!(ind.period_ms, BLINK_PERIOD_MS);
    assert_eq!(ctx.scene.get(ind.part).unwrap().name, "button-2-color");
}

#[test]
fn starts_off_and_alternates_each_fire() {
    let mut ctx = control_box();
    assert!(!ctx.indicators[0].is_on());
    assert_eq!(ring_color(&ctx), rgb(0xffdd66));

    assert!(ctx.step_indicator(0));
    assert!(ctx.indicators[0].is_on());
    assert_eq!(ring_color(&ctx), rgb(0xffff00));

    assert!(ctx.step_indicator(0));
    assert_eq!(ring_color(&ctx), rgb(0xffdd66));
}

#[test]
fn phase_follows_wall_clock() {
    let ctx = control_box();
    let ind = &ctx.indicators[0];
    assert!(!ind.is_on_at(0));
    assert!(!ind.is_on_at(999));
    assert!(ind.is_on_at(1000));
    assert!(ind.is_on_at(1999));
    assert!(!ind.is_on_at(2000));
}

#[test]
fn phase_matches_stepping() {
    let mut ctx = control_box();
    for k in 1..=7u64 {
        ctx.step_indicator(0);
        assert_eq!(
            ctx.indicators[0].is_on(),
            ctx.indicators[0].is_on_at(k * u64::from(BLINK_PERIOD_MS))
        );
    }
}

#[test]
fn unknown_indicator_is_ignored() {
    let mut ctx = control_box();
    assert!(!ctx.step_indicator(99));
    assert_eq!(ring_color(&ctx), rgb(0xffdd66));
}

#[test]
fn blinking_is_independent_of_pointer_state() {
    let mut ctx = control_box();
    let b2 = ctx.layers.find("button-2").unwrap();
    let cap = ctx.layers.object(b2).unwrap().highlight.unwrap().part;

    ctx.interaction.pointer_move(Some(b2), &mut ctx.scene, &ctx.layers);
    ctx.step_indicator(0);
    assert_eq!(ring_color(&ctx), rgb(0xffff00));
    assert_eq!(ctx.scene.color(cap), Some(rgb(HOVER_COLOR)));

    ctx.interaction.pointer_down(Some(b2), &mut ctx.scene, &ctx.layers);
    ctx.step_indicator(0);
    assert_eq!(ring_color(&ctx), rgb(0xffdd66));

    ctx.cancel();
    ctx.step_indicator(0);
    assert_eq!(ring_color(&ctx), rgb(0xffff00));
    assert_eq!(ctx.scene.color(cap), Some(rgb(0xd4d4d4)));
}
