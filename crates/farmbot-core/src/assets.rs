//! Attach-when-ready bookkeeping for asynchronously resolved assets.
//!
//! Completions arrive in any order, at most once each, or never. Attaching is
//! keyed by asset name and idempotent, and it only ever adds nodes, so a late
//! arrival can not disturb state set up by earlier ones.

use crate::config::AssetSpec;
use crate::error::SceneError;
use crate::scene::{NodeId, Scene};
use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub enum SlotState {
    Pending,
    Attached(SmallVec<[NodeId; 4]>),
}

#[derive(Clone, Debug)]
pub struct AssetSlot {
    pub spec: AssetSpec,
    pub state: SlotState,
}

#[derive(Default, Debug)]
pub struct AssetSlots {
    slots: Vec<AssetSlot>,
}

impl AssetSlots {
    pub fn new(specs: &[AssetSpec]) -> Self {
        Self {
            slots: specs
                .iter()
                .cloned()
                .map(|spec| AssetSlot {
                    spec,
                    state: SlotState::Pending,
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetSlot> {
        self.slots.iter()
    }

    /// `(name, url)` of every asset still waiting for its load.
    pub fn pending(&self) -> Vec<(String, String)> {
        self.slots
            .iter()
            .filter(|s| s.state == SlotState::Pending)
            .map(|s| (s.spec.name.clone(), s.spec.url.clone()))
            .collect()
    }

    pub fn is_attached(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.spec.name == name && matches!(s.state, SlotState::Attached(_)))
    }

    /// Insert every placement of `name`. Returns `Ok(false)` when the asset was
    /// already attached. Placements whose parent group is unknown land at the root.
    pub fn attach(
        &mut self,
        name: &str,
        scene: &mut Scene,
        groups: &FnvHashMap<String, NodeId>,
    ) -> Result<bool, SceneError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.spec.name == name)
            .ok_or_else(|| SceneError::UnknownAsset(name.to_string()))?;
        if matches!(slot.state, SlotState::Attached(_)) {
            log::debug!("[asset] {} already attached", name);
            return Ok(false);
        }
        let mut nodes = SmallVec::new();
        for placement in &slot.spec.placements {
            let parent = placement.parent.as_ref().and_then(|g| groups.get(g)).copied();
            nodes.push(scene.add(slot.spec.proxy_node(placement), parent));
        }
        log::info!("[asset] {} attached ({} placements)", name, nodes.len());
        slot.state = SlotState::Attached(nodes);
        Ok(true)
    }
}
