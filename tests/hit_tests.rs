// Host-side tests for layer-restricted hit testing.

use farmbot_core::constants::rgb;
use farmbot_core::{
    hit_test, Highlight, InteractiveObject, LayerRegistry, Node, ObjectKind, Ray, Scene, Shape,
    Transform,
};
use glam::{Quat, Vec3, Vec4};
use smallvec::smallvec;
use std::f32::consts::FRAC_PI_2;

struct Fixture {
    scene: Scene,
    layers: LayerRegistry,
    button: farmbot_core::ObjectId,
    backdrop: farmbot_core::NodeId,
}

/// One two-part button at the origin facing +Z, with a large decoration
/// plane between it and a camera on the +Z axis.
fn fixture() -> Fixture {
    let mut scene = Scene::new();
    let root = scene.add(Node::group("button-1"), None);
    let upright = Quat::from_rotation_x(FRAC_PI_2);
    let cap = scene.add(
        Node::mesh(
            "button-1-center",
            Shape::Cylinder {
                radius: 6.75,
                height: 1.0,
            },
            rgb(0xd4d4d4),
        )
        .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 2.1)).with_rotation(upright)),
        Some(root),
    );
    let ring = scene.add(
        Node::mesh(
            "button-1-color",
            Shape::Cylinder {
                radius: 9.0,
                height: 1.0,
            },
            rgb(0xef6666),
        )
        .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 2.0)).with_rotation(upright)),
        Some(root),
    );
    let backdrop = scene.add(
        Node::mesh(
            "backdrop",
            Shape::Plane {
                width: 500.0,
                height: 500.0,
            },
            Vec4::ONE,
        )
        .at(Vec3::new(0.0, 0.0, 50.0)),
        None,
    );
    let mut layers = LayerRegistry::new();
    layers.add_layer("buttons").unwrap();
    let button = layers
        .register(InteractiveObject {
            name: "button-1".into(),
            layer: "buttons".into(),
            kind: ObjectKind::Button,
            root,
            parts: smallvec![cap, ring],
            highlight: Some(Highlight {
                part: cap,
                base: rgb(0xd4d4d4),
                hover: rgb(0xefefef),
            }),
        })
        .unwrap();
    Fixture {
        scene,
        layers,
        button,
        backdrop,
    }
}

fn down_the_z_axis(x: f32, y: f32) -> Ray {
    Ray::new(Vec3::new(x, y, 100.0), Vec3::NEG_Z)
}

#[test]
fn ray_through_button_resolves_to_logical_object() {
    let f = fixture();
    let (id, hit) = f.layers.pick(&f.scene, &down_the_z_axis(0.0, 0.0), "buttons").unwrap();
    assert_eq!(id, f.button);
    // The cap (top at z = 2.6) is struck before the ring (top at z = 2.5).
    assert!((hit.distance - 97.4).abs() < 1e-3);
    assert_eq!(f.scene.get(hit.node).unwrap().name, "button-1-center");
}

#[test]
fn ring_outside_cap_still_resolves_to_button() {
    let f = fixture();
    let (id, hit) = f.layers.pick(&f.scene, &down_the_z_axis(8.0, 0.0), "buttons").unwrap();
    assert_eq!(id, f.button);
    assert_eq!(f.scene.get(hit.node).unwrap().name, "button-1-color");
}

#[test]
fn decoration_in_front_does_not_shadow_the_layer() {
    let f = fixture();
    // The backdrop is hit first by an unrestricted query...
    let all = hit_test(&f.scene, &down_the_z_axis(0.0, 0.0), &[f.backdrop]);
    assert_eq!(all.len(), 1);
    // ...but is not a candidate of the buttons layer.
    assert!(f.layers.pick(&f.scene, &down_the_z_axis(0.0, 0.0), "buttons").is_some());
}

#[test]
fn miss_returns_none() {
    let f = fixture();
    assert!(f.layers.pick(&f.scene, &down_the_z_axis(20.0, 20.0), "buttons").is_none());
}

#[test]
fn unknown_layer_has_no_candidates() {
    let f = fixture();
    assert!(f.layers.candidates("nope", &f.scene).is_empty());
    assert!(f.layers.pick(&f.scene, &down_the_z_axis(0.0, 0.0), "nope").is_none());
}

#[test]
fn hidden_parts_are_not_hit() {
    let mut f = fixture();
    let root = f.layers.object(f.button).unwrap().root;
    f.scene.set_visible(root, false);
    assert!(f.layers.pick(&f.scene, &down_the_z_axis(0.0, 0.0), "buttons").is_none());
}

#[test]
fn removed_parts_are_skipped() {
    let mut f = fixture();
    let cap = f.scene.find("button-1-center").unwrap();
    assert!(f.scene.remove(cap));
    assert_eq!(f.layers.candidates("buttons", &f.scene).len(), 1);
    let (id, hit) = f.layers.pick(&f.scene, &down_the_z_axis(0.0, 0.0), "buttons").unwrap();
    assert_eq!(id, f.button);
    assert_eq!(f.scene.get(hit.node).unwrap().name, "button-1-color");
}

#[test]
fn hits_are_sorted_nearest_first() {
    let f = fixture();
    let parts = f.layers.object(f.button).unwrap().parts.clone();
    let hits = hit_test(&f.scene, &down_the_z_axis(0.0, 0.0), &parts);
    assert_eq!(hits.len(), 2);
    assert!(hits[0].distance <= hits[1].distance);
}

#[test]
fn zero_direction_ray_hits_nothing() {
    let f = fixture();
    let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
    let parts = f.layers.object(f.button).unwrap().parts.clone();
    assert!(hit_test(&f.scene, &ray, &parts).is_empty());
}

#[test]
fn a_part_can_belong_to_only_one_object() {
    let mut f = fixture();
    let cap = f.scene.find("button-1-center").unwrap();
    let root = f.scene.add(Node::group("button-2"), None);
    let err = f
        .layers
        .register(InteractiveObject {
            name: "button-2".into(),
            layer: "buttons".into(),
            kind: ObjectKind::Button,
            root,
            parts: smallvec![cap],
            highlight: None,
        })
        .unwrap_err();
    assert!(matches!(err, farmbot_core::SceneError::PartOwned { .. }));
}

#[test]
fn unowned_nearest_hit_is_background() {
    let mut f = fixture();
    let cap = f.scene.find("button-1-center").unwrap();
    // A shaped child of a part is searched but belongs to no object.
    f.scene.add(
        Node::mesh("sticker", Shape::Sphere { radius: 1.0 }, Vec4::ONE).at(Vec3::new(0.0, 5.0, 0.0)),
        Some(cap),
    );
    let parts = f.layers.object(f.button).unwrap().parts.clone();
    let hits = hit_test(&f.scene, &down_the_z_axis(0.0, 0.0), &parts);
    assert_eq!(f.scene.get(hits[0].node).unwrap().name, "sticker");
    assert!(f.layers.pick(&f.scene, &down_the_z_axis(0.0, 0.0), "buttons").is_none());
}
