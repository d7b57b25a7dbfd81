//! Parameterized scene descriptions.
//!
//! One `SceneConfig` value describes everything a scene variant needs
//! (camera, lighting, decoration, controls and their layers, blinkers,
//! toggleable assemblies, asynchronously resolved assets, labels). Both
//! shipped scenes are built from presets by the same composition routine.

use crate::constants::{rgb, rgba, BLINK_PERIOD_MS, HOVER_COLOR};
use crate::layers::ObjectKind;
use crate::scene::{Node, Shape, Transform};
use glam::{Quat, Vec2, Vec3, Vec4};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_8};

#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub eye: Vec3,
    pub target: Vec3,
    /// Drag to orbit, wheel to zoom.
    pub orbit: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct FogConfig {
    pub color: Vec4,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
    /// Continuous drift applied by the frame driver, world units per second.
    pub drift_per_sec: Vec3,
    /// Ambient term, color already scaled by its intensity.
    pub ambient: Vec4,
}

#[derive(Clone, Debug)]
pub struct GroupSpec {
    pub name: String,
    pub transform: Transform,
    pub parent: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NodeSpec {
    pub name: String,
    pub shape: Shape,
    pub color: Vec4,
    pub transform: Transform,
    pub parent: Option<String>,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>, shape: Shape, color: Vec4, at: Vec3) -> Self {
        Self {
            name: name.into(),
            shape,
            color,
            transform: Transform::from_translation(at),
            parent: None,
        }
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn under(mut self, group: impl Into<String>) -> Self {
        self.parent = Some(group.into());
        self
    }

    pub fn to_node(&self) -> Node {
        Node::mesh(self.name.clone(), self.shape, self.color).with_transform(self.transform)
    }
}

#[derive(Clone, Debug)]
pub struct ControlSpec {
    pub name: String,
    pub layer: String,
    pub kind: ObjectKind,
    /// Group the control's root is inserted under.
    pub parent: Option<String>,
    /// Parts are positioned relative to the control root.
    pub parts: Vec<NodeSpec>,
    /// Index into `parts` and the color it takes while hovered.
    pub highlight: Option<(usize, Vec4)>,
}

#[derive(Clone, Debug)]
pub struct IndicatorSpec {
    pub name: String,
    pub control: String,
    pub part: usize,
    pub off: Vec4,
    pub on: Vec4,
    pub period_ms: u32,
}

#[derive(Clone, Debug)]
pub struct AssemblySpec {
    pub name: String,
    pub group: String,
    pub visible: bool,
}

/// Where one resolved asset instance goes.
#[derive(Clone, Debug)]
pub struct Placement {
    pub name: String,
    pub transform: Transform,
    pub parent: Option<String>,
}

/// An externally loaded model. Only its availability is tracked here; it is
/// drawn as `proxy` at each placement once the resolver reports it loaded.
#[derive(Clone, Debug)]
pub struct AssetSpec {
    pub name: String,
    pub url: String,
    pub proxy: Shape,
    pub color: Vec4,
    pub placements: Vec<Placement>,
}

impl AssetSpec {
    pub fn proxy_node(&self, placement: &Placement) -> Node {
        Node::mesh(placement.name.clone(), self.proxy, self.color).with_transform(placement.transform)
    }
}

#[derive(Clone, Debug)]
pub struct LabelSpec {
    pub text: String,
    pub anchor: Vec3,
    /// Group whose visibility the label follows.
    pub owner: Option<String>,
    pub small: bool,
}

impl LabelSpec {
    pub fn new(text: impl Into<String>, anchor: Vec3) -> Self {
        Self {
            text: text.into(),
            anchor,
            owner: None,
            small: false,
        }
    }
}

/// Randomly placed spheres (plants, weeds) on a rectangle centred at the origin.
#[derive(Clone, Debug)]
pub struct ScatterSpec {
    pub prefix: String,
    pub count: usize,
    pub radius: (f32, f32),
    pub area: Vec2,
    pub z: f32,
    pub color: Vec4,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub name: String,
    pub camera: CameraConfig,
    pub background: Vec4,
    pub fog: Option<FogConfig>,
    pub light: PointLight,
    pub groups: Vec<GroupSpec>,
    pub decorations: Vec<NodeSpec>,
    pub scatter: Vec<ScatterSpec>,
    /// Hit-testable layers, each tested on its own.
    pub layers: Vec<String>,
    pub controls: Vec<ControlSpec>,
    pub indicators: Vec<IndicatorSpec>,
    pub assemblies: Vec<AssemblySpec>,
    pub assets: Vec<AssetSpec>,
    pub labels: Vec<LabelSpec>,
    /// Offset added to a button root while pressed.
    pub press_offset: Vec3,
    pub seed: u64,
}

// Control box layout
const BUTTON_ROW_Y: f32 = 20.0;
const BUTTON_CAP_RADIUS: f32 = 6.75;
const BUTTON_RING_RADIUS: f32 = 9.0;
const BUTTON_CAP_COLOR: u32 = 0xd4d4d4;
// The base sits below the pressed ring so a held button stays visible.
const BUTTON_BASE_HEIGHT: f32 = 1.0;
const BUTTON_BASE_Z: f32 = -2.0;

// Garden bed dimensions (metres)
const X_AXIS_LENGTH: f32 = 2.8;
const Y_AXIS_LENGTH: f32 = 1.3;
const BED_HEIGHT: f32 = 0.3;
const GRID_STEP: f32 = 0.1;

fn group(name: &str, parent: Option<&str>) -> GroupSpec {
    GroupSpec {
        name: name.to_string(),
        transform: Transform::IDENTITY,
        parent: parent.map(str::to_string),
    }
}

fn push_button(name: &str, x: f32, ring_color: u32) -> ControlSpec {
    // Cylinders are built along +Y; stand them up to face the camera.
    let upright = Quat::from_rotation_x(FRAC_PI_2);
    ControlSpec {
        name: name.to_string(),
        layer: "buttons".to_string(),
        kind: ObjectKind::Button,
        parent: Some("all-buttons".to_string()),
        parts: vec![
            NodeSpec::new(
                format!("{name}-center"),
                Shape::Cylinder {
                    radius: BUTTON_CAP_RADIUS,
                    height: 1.0,
                },
                rgb(BUTTON_CAP_COLOR),
                Vec3::new(x, BUTTON_ROW_Y, 2.1),
            )
            .rotated(upright),
            NodeSpec::new(
                format!("{name}-color"),
                Shape::Cylinder {
                    radius: BUTTON_RING_RADIUS,
                    height: 1.0,
                },
                rgb(ring_color),
                Vec3::new(x, BUTTON_ROW_Y, 2.0),
            )
            .rotated(upright),
        ],
        highlight: Some((0, rgb(HOVER_COLOR))),
    }
}

/// Inclusive steps of `step` from `-len / 2` to `len / 2`.
fn grid_steps(len: f32, step: f32) -> impl Iterator<Item = f32> {
    let n = (len / step + 1e-3).floor() as i32;
    (0..=n).map(move |k| -len / 2.0 + k as f32 * step)
}

impl SceneConfig {
    /// The electronics enclosure with its row of push-buttons.
    pub fn control_box() -> Self {
        let upright = Quat::from_rotation_x(FRAC_PI_2);
        let base_xs = [60.0, 30.0, 0.0, -30.0, -60.0];
        let mut labels = vec![
            LabelSpec::new("E-Stop", Vec3::new(60.0, 35.0, 10.0)),
            LabelSpec::new("Unlock", Vec3::new(30.0, 35.0, 10.0)),
        ];
        for l in &mut labels {
            l.owner = Some("all-buttons".to_string());
        }
        Self {
            name: "control-box".to_string(),
            camera: CameraConfig {
                fovy_degrees: 40.0,
                eye: Vec3::new(0.0, -100.0, 165.0),
                target: Vec3::new(0.0, -13.0, 0.0),
                orbit: false,
            },
            background: rgb(0xf4f4f4),
            fog: Some(FogConfig {
                color: rgb(0xf4f4f4),
                near: 225.0,
                far: 425.0,
            }),
            light: PointLight {
                position: Vec3::new(0.0, 0.0, 200.0),
                intensity: 1.0,
                drift_per_sec: Vec3::ZERO,
                ambient: rgb(0x404040) * 0.5,
            },
            groups: vec![group("all-buttons", None)],
            decorations: Vec::new(),
            scatter: Vec::new(),
            layers: vec!["buttons".to_string()],
            controls: vec![
                push_button("button-1", 60.0, 0xef6666),
                push_button("button-2", 30.0, 0xffdd66),
            ],
            indicators: vec![IndicatorSpec {
                name: "unlock-blink".to_string(),
                control: "button-2".to_string(),
                part: 1,
                off: rgb(0xffdd66),
                on: rgb(0xffff00),
                period_ms: BLINK_PERIOD_MS,
            }],
            assemblies: Vec::new(),
            assets: vec![
                AssetSpec {
                    name: "electronics-box".to_string(),
                    url: "/electronics-box.gltf".to_string(),
                    proxy: Shape::Box {
                        size: Vec3::new(170.0, 110.0, 260.0),
                    },
                    color: rgb(0x5a5a5a),
                    placements: vec![Placement {
                        name: "electronics-box".to_string(),
                        transform: Transform::from_translation(Vec3::new(0.0, 25.0, -130.0)),
                        parent: None,
                    }],
                },
                AssetSpec {
                    name: "push-button".to_string(),
                    url: "/push-button.gltf".to_string(),
                    proxy: Shape::Cylinder {
                        radius: 11.0,
                        height: BUTTON_BASE_HEIGHT,
                    },
                    color: rgb(0x2b2b2b),
                    placements: base_xs
                        .iter()
                        .enumerate()
                        .map(|(i, x)| Placement {
                            name: format!("button-{}-base", i + 1),
                            transform: Transform::from_translation(Vec3::new(
                                *x,
                                BUTTON_ROW_Y,
                                BUTTON_BASE_Z,
                            ))
                            .with_rotation(upright),
                            parent: None,
                        })
                        .collect(),
                },
            ],
            labels,
            press_offset: Vec3::new(0.0, 0.0, -crate::constants::PRESS_DEPTH),
            seed: 0,
        }
    }

    /// The raised bed with plants, weeds, a coordinate grid and the gantry.
    pub fn garden_bed() -> Self {
        let mut decorations = vec![
            NodeSpec::new(
                "ground",
                Shape::Plane {
                    width: 10.0,
                    height: 10.0,
                },
                rgb(0xf4f4f4),
                Vec3::new(0.0, 0.0, -BED_HEIGHT),
            ),
            NodeSpec::new(
                "bed",
                Shape::Box {
                    size: Vec3::new(X_AXIS_LENGTH + 0.1, Y_AXIS_LENGTH + 0.1, BED_HEIGHT),
                },
                rgb(0xc39f7a),
                Vec3::new(0.0, 0.0, -BED_HEIGHT / 2.0),
            ),
            NodeSpec::new(
                "soil",
                Shape::Box {
                    size: Vec3::new(X_AXIS_LENGTH, Y_AXIS_LENGTH, BED_HEIGHT + 0.01),
                },
                rgb(0x8e5e31),
                Vec3::new(0.0, 0.0, -BED_HEIGHT / 2.0),
            ),
            // Stand-in for the bed photo; image textures are not loaded.
            NodeSpec::new(
                "garden-photo",
                Shape::Plane {
                    width: 0.6,
                    height: 0.8,
                },
                rgb(0x7d8c5c),
                Vec3::new(0.0, 0.0, 0.02),
            ),
            NodeSpec::new(
                "led-strip",
                Shape::Box {
                    size: Vec3::new(0.02, 1.5, 0.005),
                },
                rgb(0xffffee),
                Vec3::new(-1.1775, 0.0, 0.56),
            )
            .under("farmbot-layer"),
        ];
        let mut labels = Vec::new();
        let line_color = rgb(0x434343);
        for y in grid_steps(Y_AXIS_LENGTH, GRID_STEP) {
            decorations.push(
                NodeSpec::new(
                    format!("grid-x-{:.0}", y * 1000.0),
                    Shape::Box {
                        size: Vec3::new(X_AXIS_LENGTH, 0.003, 0.002),
                    },
                    line_color,
                    Vec3::new(0.0, y, 0.01),
                )
                .under("grid"),
            );
            let mut l = LabelSpec::new(
                format!("{:.0}", y * 1000.0),
                Vec3::new(-X_AXIS_LENGTH / 2.0 - 0.05, y, 0.02),
            );
            l.small = true;
            labels.push(l);
        }
        for x in grid_steps(X_AXIS_LENGTH, GRID_STEP) {
            decorations.push(
                NodeSpec::new(
                    format!("grid-y-{:.0}", x * 1000.0),
                    Shape::Box {
                        size: Vec3::new(0.003, Y_AXIS_LENGTH, 0.002),
                    },
                    line_color,
                    Vec3::new(x, 0.0, 0.01),
                )
                .under("grid"),
            );
            let mut l = LabelSpec::new(
                format!("{:.0}", x * 1000.0),
                Vec3::new(x, -Y_AXIS_LENGTH / 2.0 - 0.05, 0.02),
            );
            l.small = true;
            labels.push(l);
        }
        let panel_at = Vec3::new(0.0, -Y_AXIS_LENGTH / 1.8, 0.2);
        labels.push(LabelSpec::new("FarmBot 3D Demo (click to toggle)", panel_at));

        let gantry = |name: &str, size: Vec3, at: Vec3| AssetSpec {
            name: name.to_string(),
            url: format!("/{name}.gltf"),
            proxy: Shape::Box { size },
            color: rgb(0xd8d8d8),
            placements: vec![Placement {
                name: name.to_string(),
                transform: Transform::from_translation(at),
                parent: Some("farmbot-layer".to_string()),
            }],
        };

        Self {
            name: "garden-bed".to_string(),
            camera: CameraConfig {
                fovy_degrees: 50.0,
                eye: Vec3::new(0.0, 0.0, 2.75),
                target: Vec3::ZERO,
                orbit: true,
            },
            background: rgb(0xffffff),
            fog: None,
            light: PointLight {
                position: Vec3::new(-4.0, 3.0, 4.0),
                intensity: 1.25,
                // The "sun" creeps along +X by 0.05 per frame at 60 fps.
                drift_per_sec: Vec3::new(3.0, 0.0, 0.0),
                ambient: rgb(0x404040),
            },
            groups: vec![group("grid", None), group("farmbot-layer", None)],
            decorations,
            scatter: vec![
                ScatterSpec {
                    prefix: "plant".to_string(),
                    count: 150,
                    radius: (0.03, 0.1),
                    area: Vec2::new(X_AXIS_LENGTH, Y_AXIS_LENGTH),
                    z: 0.0,
                    color: rgba(0x66aa44, 0.8),
                },
                ScatterSpec {
                    prefix: "weed".to_string(),
                    count: 150,
                    radius: (0.01, 0.05),
                    area: Vec2::new(X_AXIS_LENGTH, Y_AXIS_LENGTH),
                    z: 0.0,
                    color: rgba(0xee6666, 0.8),
                },
            ],
            layers: vec!["toggle-control".to_string()],
            controls: vec![ControlSpec {
                name: "toggle-control".to_string(),
                layer: "toggle-control".to_string(),
                kind: ObjectKind::Trigger {
                    assembly: "farmbot".to_string(),
                },
                parent: None,
                parts: vec![NodeSpec::new(
                    "toggle-panel",
                    Shape::Plane {
                        width: 1.2,
                        height: 0.3,
                    },
                    rgba(0x222222, 0.5),
                    panel_at,
                )
                .rotated(Quat::from_rotation_x(FRAC_PI_8))],
                highlight: Some((0, rgba(0x222222, 0.8))),
            }],
            indicators: Vec::new(),
            assemblies: vec![AssemblySpec {
                name: "farmbot".to_string(),
                group: "farmbot-layer".to_string(),
                visible: true,
            }],
            assets: vec![
                gantry(
                    "gantry-column-left",
                    Vec3::new(0.08, 0.05, 0.6),
                    Vec3::new(-1.2, -Y_AXIS_LENGTH / 2.0 - 0.05, 0.36),
                ),
                gantry(
                    "gantry-column-right",
                    Vec3::new(0.08, 0.05, 0.6),
                    Vec3::new(-1.2, Y_AXIS_LENGTH / 2.0 + 0.05, 0.36),
                ),
                gantry(
                    "gantry-main-beam",
                    Vec3::new(0.08, 1.5, 0.1),
                    Vec3::new(-1.1775, 0.0, 0.66),
                ),
            ],
            labels,
            press_offset: Vec3::ZERO,
            seed: 0x5eed_f00d,
        }
    }
}
