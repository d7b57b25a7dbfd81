use crate::scene::{NodeId, Scene};

/// A group of nodes shown or hidden as one, flipped by a trigger's click.
#[derive(Clone, Debug)]
pub struct ToggleableAssembly {
    pub name: String,
    pub group: NodeId,
    visible: bool,
}

impl ToggleableAssembly {
    pub fn visible(&self) -> bool {
        self.visible
    }
}

#[derive(Default, Debug)]
pub struct Assemblies {
    items: Vec<ToggleableAssembly>,
}

impl Assemblies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, group: NodeId, scene: &mut Scene, visible: bool) {
        scene.set_visible(group, visible);
        self.items.push(ToggleableAssembly {
            name: name.into(),
            group,
            visible,
        });
    }

    pub fn get(&self, name: &str) -> Option<&ToggleableAssembly> {
        self.items.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToggleableAssembly> {
        self.items.iter()
    }

    pub fn is_visible(&self, name: &str) -> Option<bool> {
        self.get(name).map(|a| a.visible)
    }

    /// Flip visibility and return the new value. Not debounced: two clicks
    /// in quick succession flip twice.
    pub fn toggle(&mut self, name: &str, scene: &mut Scene) -> Option<bool> {
        let a = self.items.iter_mut().find(|a| a.name == name)?;
        a.visible = !a.visible;
        scene.set_visible(a.group, a.visible);
        log::info!("[toggle] {} visible={}", a.name, a.visible);
        Some(a.visible)
    }
}
