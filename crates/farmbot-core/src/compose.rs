//! Builds a [`SceneContext`] from a [`SceneConfig`].

use crate::assembly::Assemblies;
use crate::assets::AssetSlots;
use crate::camera::{Camera, OrbitControls};
use crate::config::SceneConfig;
use crate::context::SceneContext;
use crate::error::SceneError;
use crate::indicator::PeriodicIndicator;
use crate::interaction::Interaction;
use crate::label::Label;
use crate::layers::{Highlight, InteractiveObject, LayerRegistry};
use crate::scene::{Node, NodeId, Scene, Shape};
use crate::viewport::ViewportRect;
use fnv::FnvHashMap;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

fn lookup(groups: &FnvHashMap<String, NodeId>, name: &Option<String>) -> Result<Option<NodeId>, SceneError> {
    match name {
        Some(g) => groups
            .get(g)
            .copied()
            .map(Some)
            .ok_or_else(|| SceneError::UnknownGroup(g.clone())),
        None => Ok(None),
    }
}

/// Compose the scene graph, layers, blinkers, assemblies and asset slots
/// described by `config`. Assets start pending; nothing is fetched here.
pub fn compose(config: &SceneConfig) -> Result<SceneContext, SceneError> {
    let mut scene = Scene::new();
    let mut groups: FnvHashMap<String, NodeId> = FnvHashMap::default();

    for g in &config.groups {
        let parent = lookup(&groups, &g.parent)?;
        let id = scene.add(Node::group(g.name.clone()).with_transform(g.transform), parent);
        groups.insert(g.name.clone(), id);
    }

    for d in &config.decorations {
        let parent = lookup(&groups, &d.parent)?;
        scene.add(d.to_node(), parent);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    for s in &config.scatter {
        for i in 0..s.count {
            let radius = rng.gen_range(s.radius.0..=s.radius.1);
            let x = rng.gen::<f32>() * s.area.x - s.area.x / 2.0;
            let y = rng.gen::<f32>() * s.area.y - s.area.y / 2.0;
            scene.add(
                Node::mesh(format!("{}-{}", s.prefix, i), Shape::Sphere { radius }, s.color)
                    .at(Vec3::new(x, y, s.z)),
                None,
            );
        }
    }

    let mut layers = LayerRegistry::new();
    for name in &config.layers {
        layers.add_layer(name.clone())?;
    }

    for c in &config.controls {
        let parent = lookup(&groups, &c.parent)?;
        let root = scene.add(Node::group(c.name.clone()), parent);
        let parts: SmallVec<[NodeId; 4]> = c
            .parts
            .iter()
            .map(|p| scene.add(p.to_node(), Some(root)))
            .collect();
        let highlight = match c.highlight {
            Some((index, hover)) => {
                let part = *parts.get(index).ok_or_else(|| SceneError::UnknownPart {
                    object: c.name.clone(),
                    index,
                })?;
                Some(Highlight {
                    part,
                    base: c.parts[index].color,
                    hover,
                })
            }
            None => None,
        };
        layers.register(InteractiveObject {
            name: c.name.clone(),
            layer: c.layer.clone(),
            kind: c.kind.clone(),
            root,
            parts,
            highlight,
        })?;
    }

    let mut indicators = Vec::with_capacity(config.indicators.len());
    for spec in &config.indicators {
        let object = layers
            .find(&spec.control)
            .and_then(|id| layers.object(id))
            .ok_or_else(|| SceneError::UnknownPart {
                object: spec.control.clone(),
                index: spec.part,
            })?;
        let part = *object.parts.get(spec.part).ok_or_else(|| SceneError::UnknownPart {
            object: spec.control.clone(),
            index: spec.part,
        })?;
        let indicator =
            PeriodicIndicator::new(spec.name.clone(), part, spec.off, spec.on, spec.period_ms);
        indicator.apply(&mut scene);
        indicators.push(indicator);
    }

    let mut assemblies = Assemblies::new();
    for a in &config.assemblies {
        let group = *groups
            .get(&a.group)
            .ok_or_else(|| SceneError::UnknownGroup(a.group.clone()))?;
        assemblies.add(a.name.clone(), group, &mut scene, a.visible);
    }
    for (_, o) in layers.objects() {
        if let crate::layers::ObjectKind::Trigger { assembly } = &o.kind {
            if assemblies.get(assembly).is_none() {
                return Err(SceneError::UnknownAssembly(assembly.clone()));
            }
        }
    }

    for a in &config.assets {
        for p in &a.placements {
            lookup(&groups, &p.parent)?;
        }
    }
    let assets = AssetSlots::new(&config.assets);

    let labels = config
        .labels
        .iter()
        .map(|l| {
            Ok(Label {
                text: l.text.clone(),
                anchor: l.anchor,
                owner: lookup(&groups, &l.owner)?,
                small: l.small,
            })
        })
        .collect::<Result<Vec<_>, SceneError>>()?;

    let camera = Camera::new(config.camera.fovy_degrees, config.camera.eye, config.camera.target);
    let orbit = config.camera.orbit.then(|| OrbitControls::from_camera(&camera));

    log::info!(
        "[compose] {} nodes={} objects={} assets={}",
        config.name,
        scene.len(),
        layers.objects().count(),
        config.assets.len()
    );

    Ok(SceneContext {
        name: config.name.clone(),
        scene,
        camera,
        orbit,
        viewport: ViewportRect::default(),
        layers,
        pick_layers: config.layers.clone(),
        interaction: Interaction::new(config.press_offset),
        assemblies,
        indicators,
        assets,
        groups,
        labels,
        light: config.light,
        background: config.background,
        fog: config.fog,
        drag_from: None,
    })
}
