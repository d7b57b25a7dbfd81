//! Named groups of interactive objects and the part → object membership map.

use crate::error::SceneError;
use crate::picking::{hit_test, Hit, Ray};
use crate::scene::{NodeId, Scene};
use fnv::FnvHashMap;
use glam::Vec4;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    /// Highlights on hover, sinks while pressed.
    Button,
    /// Highlights on hover; a completed click flips the named assembly.
    Trigger { assembly: String },
}

/// Which part recolors on hover. `base` is what gets restored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    pub part: NodeId,
    pub base: Vec4,
    pub hover: Vec4,
}

/// A logical control: one identity, possibly several renderable parts.
#[derive(Clone, Debug)]
pub struct InteractiveObject {
    pub name: String,
    pub layer: String,
    pub kind: ObjectKind,
    /// Node whose offset moves when the object is pressed.
    pub root: NodeId,
    pub parts: SmallVec<[NodeId; 4]>,
    pub highlight: Option<Highlight>,
}

#[derive(Clone, Debug)]
pub struct Layer {
    pub name: String,
    members: Vec<ObjectId>,
}

impl Layer {
    pub fn members(&self) -> &[ObjectId] {
        &self.members
    }
}

#[derive(Default, Debug)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    objects: Vec<InteractiveObject>,
    owners: FnvHashMap<NodeId, ObjectId>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_layer(&mut self, name: impl Into<String>) -> Result<(), SceneError> {
        let name = name.into();
        if self.layer(&name).is_some() {
            return Err(SceneError::DuplicateLayer(name));
        }
        self.layers.push(Layer {
            name,
            members: Vec::new(),
        });
        Ok(())
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Add an object to its layer and claim its parts. Each part may belong
    /// to exactly one object.
    pub fn register(&mut self, object: InteractiveObject) -> Result<ObjectId, SceneError> {
        if object.parts.is_empty() {
            return Err(SceneError::EmptyObject(object.name));
        }
        if self.find(&object.name).is_some() {
            return Err(SceneError::DuplicateObject(object.name));
        }
        for part in &object.parts {
            if let Some(owner) = self.owners.get(part) {
                return Err(SceneError::PartOwned {
                    node: *part,
                    owner: self.objects[owner.0].name.clone(),
                });
            }
        }
        let id = ObjectId(self.objects.len());
        let layer = self
            .layers
            .iter_mut()
            .find(|l| l.name == object.layer)
            .ok_or_else(|| SceneError::UnknownLayer(object.layer.clone()))?;
        layer.members.push(id);
        for part in &object.parts {
            self.owners.insert(*part, id);
        }
        self.objects.push(object);
        Ok(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&InteractiveObject> {
        self.objects.get(id.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &InteractiveObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    /// Logical object owning the struck part, if any.
    #[inline]
    pub fn resolve(&self, part: NodeId) -> Option<ObjectId> {
        self.owners.get(&part).copied()
    }

    /// Parts of a layer's members currently present in the scene, in
    /// registration order. Absent parts are skipped.
    pub fn candidates(&self, layer: &str, scene: &Scene) -> Vec<NodeId> {
        let Some(layer) = self.layer(layer) else {
            return Vec::new();
        };
        layer
            .members
            .iter()
            .filter_map(|m| self.objects.get(m.0))
            .flat_map(|o| o.parts.iter().copied())
            .filter(|p| scene.contains(*p))
            .collect()
    }

    /// Hit-test one layer and resolve the nearest hit. A nearest hit on a
    /// part with no owner counts as background.
    pub fn pick(&self, scene: &Scene, ray: &Ray, layer: &str) -> Option<(ObjectId, Hit)> {
        let candidates = self.candidates(layer, scene);
        if candidates.is_empty() {
            return None;
        }
        let hits = hit_test(scene, ray, &candidates);
        let nearest = hits.first()?;
        self.resolve(nearest.node).map(|id| (id, *nearest))
    }
}
