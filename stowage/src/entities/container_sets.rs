use std::collections::BTreeMap;
use std::fmt::Display;

use itertools::Itertools;
use log::debug;
use ndarray::{Array3, Array4, ArrayView3, Axis, concatenate};
use rayon::prelude::*;

use crate::entities::{Action, Instance, Item, Layout, LayoutSnapshot, PlacedItem};
use crate::error::{PackError, Result};
use crate::geometry::Rotation;
use crate::mask::{FeasibilityMask, MaskBudget, scan_container};
use crate::util::assertions::container_sets_is_consistent;
use crate::util::{EngineConfig, reorder};

/// Identity of one physical container: the container type plus how many times that type
/// has been (re)opened. Successive instances of the same type get increasing `use_count`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementName {
    pub container_id: usize,
    /// Starts at 1
    pub use_count: usize,
}

impl Display for PlacementName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}({})", self.container_id, self.use_count)
    }
}

/// Dynamic state of a packing episode over a set of containers.
///
/// Holds the pending box sequence, one [`Layout`] per container type, the boxes packed so far
/// grouped per physical container instance, and a cached spatial summary of all containers.
/// Every step consists of [`ContainerSets::valid_mask`], an externally chosen [`Action`] and
/// [`ContainerSets::drop_item`]; [`ContainerSets::replace_containers`] swaps a container for a fresh one.
#[derive(Clone, Debug)]
pub struct ContainerSets {
    instance: Instance,
    config: EngineConfig,
    pending: Vec<Item>,
    layouts: Vec<Layout>,
    combined_hwv_map: Array3<f32>,
    use_counts: Vec<usize>,
    placements: BTreeMap<PlacementName, Vec<PlacedItem>>,
    packed: Vec<PlacedItem>,
    skipped: Vec<Item>,
    current_item_id: usize,
    suitable_container_id: Option<usize>,
}

impl ContainerSets {
    pub fn new(instance: Instance, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let layouts = init_layouts(&instance, &config);
        let combined_hwv_map = combine_hwv_maps(&layouts);
        let n_containers = instance.containers.len();

        Ok(ContainerSets {
            pending: instance.items.clone(),
            instance,
            config,
            layouts,
            combined_hwv_map,
            use_counts: vec![1; n_containers],
            placements: BTreeMap::new(),
            packed: vec![],
            skipped: vec![],
            current_item_id: 0,
            suitable_container_id: None,
        })
    }

    /// Returns every field to its episode-start value.
    pub fn reset(&mut self) {
        self.pending = self.instance.items.clone();
        self.layouts = init_layouts(&self.instance, &self.config);
        self.combined_hwv_map = combine_hwv_maps(&self.layouts);
        self.use_counts.fill(1);
        self.placements.clear();
        self.packed.clear();
        self.skipped.clear();
        self.current_item_id = 0;
        self.suitable_container_id = None;
    }

    /// Builds the feasibility mask of `item` over the containers in `use_containers` and the given rotations.
    ///
    /// Containers are pruned as a whole when the box cannot fit them in any orientation or their
    /// remaining weight or volume is insufficient. Scanning stops once either the global or the
    /// per-container budget of set bits is reached.
    pub fn valid_mask(
        &self,
        item: &Item,
        use_containers: &[usize],
        rotations: &[Rotation],
    ) -> Result<FeasibilityMask> {
        let containers = use_containers.iter().copied().unique().collect_vec();
        if let Some(&cid) = containers.iter().find(|&&cid| cid >= self.layouts.len()) {
            return Err(PackError::out_of_range("container", cid, self.layouts.len()));
        }
        let rotations = rotations
            .iter()
            .unique()
            .map(|r| match self.instance.rotation_index(*r) {
                Some(idx) => Ok((idx, *r)),
                None => Err(PackError::InvalidRotation(r.code())),
            })
            .collect::<Result<Vec<_>>>()?;

        let n_rotations = self.instance.rotations.len();
        let budget = MaskBudget::new(self.config.mask_budget, self.config.container_budget);
        let scan = |cid: usize| {
            let outcome = scan_container(&self.layouts[cid], item, &rotations, n_rotations, &budget);
            (cid, outcome)
        };
        let outcomes = match self.config.parallel {
            true => containers.par_iter().map(|cid| scan(*cid)).collect::<Vec<_>>(),
            false => containers.iter().map(|cid| scan(*cid)).collect::<Vec<_>>(),
        };

        let (gx, gy) = self.instance.grid.shape();
        let mut bits = Array4::<u8>::zeros((self.layouts.len(), n_rotations, gx, gy));
        let mut exhausted = None;
        for (cid, outcome) in outcomes {
            bits.index_axis_mut(Axis(0), cid).assign(&outcome.bits);
            exhausted = exhausted.or(outcome.exhausted);
        }

        let mut mask = FeasibilityMask::new(bits, self.instance.rotations.clone());
        if let Some(limit) = exhausted {
            mask.mark_truncated(limit);
        }
        Ok(mask)
    }

    /// Feasibility mask of the current box over all containers and allowed rotations
    pub fn current_mask(&self) -> Result<Option<FeasibilityMask>> {
        match self.current_item() {
            None => Ok(None),
            Some(item) => {
                let all_containers = (0..self.layouts.len()).collect_vec();
                self.valid_mask(item, &all_containers, &self.instance.rotations)
                    .map(Some)
            }
        }
    }

    /// Places `item` according to `action`.
    ///
    /// Returns the packed box with its placement metadata, or `None` when the placement turned out
    /// to be infeasible. In the latter case nothing is modified and the box is not consumed.
    pub fn drop_item(&mut self, item: &Item, action: Action) -> Result<Option<PlacedItem>> {
        let cid = action.container_id;
        let layout = self
            .layouts
            .get_mut(cid)
            .ok_or_else(|| PackError::out_of_range("container", cid, self.instance.containers.len()))?;

        let Some((x, y, z)) = layout.drop_item(item, action.rotation, (action.x, action.y)) else {
            return Ok(None);
        };

        let container_size = layout.container.dims;
        let placement = self.current_placement(cid);
        let placed = PlacedItem {
            item: item.clone(),
            rotation: action.rotation,
            dims: item.oriented(action.rotation),
            // stored z is relative to the floor of this container
            position: (x, y, z - (self.instance.grid.max_z - container_size.dz)),
            container_id: cid,
            placement,
            container_name: self.placement_label(&placement),
            container_size,
        };

        debug!(
            "[CS] dropping box {} ({}) in {} at {:?}",
            item.name, placed.dims, placed.container_name, placed.position
        );

        self.placements
            .entry(placement)
            .or_default()
            .push(placed.clone());
        self.packed.push(placed.clone());
        self.current_item_id += 1;

        debug_assert!(container_sets_is_consistent(self));

        Ok(Some(placed))
    }

    /// Swaps the container for a fresh, empty instance of the same type.
    ///
    /// The reuse counter of the container is only incremented if its current physical instance
    /// holds at least one box, so the next instance gets a distinct [`PlacementName`].
    pub fn replace_containers(&mut self, container_id: usize) -> Result<()> {
        if container_id >= self.layouts.len() {
            return Err(PackError::out_of_range(
                "container",
                container_id,
                self.layouts.len(),
            ));
        }
        let current = self.current_placement(container_id);
        if self.placements.get(&current).is_some_and(|b| !b.is_empty()) {
            self.use_counts[container_id] += 1;
        }
        debug!(
            "[CS] replacing {} ({:.1}% utilised), next instance: {}",
            self.placement_label(&current),
            self.layouts[container_id].utilization() * 100.0,
            self.placement_label(&self.current_placement(container_id))
        );
        self.layouts[container_id].reset();
        self.suitable_container_id = Some(container_id);

        debug_assert!(container_sets_is_consistent(self));
        Ok(())
    }

    /// Moves the pending box at `replace_id` in front of the one at `current_id`.
    /// See [`reorder`] for the exact semantics.
    pub fn reorder_pending(&mut self, current_id: usize, replace_id: usize) -> Result<()> {
        self.pending = reorder(self.pending.clone(), current_id, replace_id)?;
        debug!(
            "[CS] moved box {} ahead of box {}",
            self.pending[current_id.min(self.pending.len() - 2)].name,
            self.pending[current_id.min(self.pending.len() - 2) + 1].name
        );
        Ok(())
    }

    /// Gives up on the current box, moving it to the skipped list.
    pub fn skip_item(&mut self) -> Option<Item> {
        let item = self.pending.get(self.current_item_id)?.clone();
        debug!("[CS] skipping box {}", item.name);
        self.skipped.push(item.clone());
        self.current_item_id += 1;
        Some(item)
    }

    /// Recomputes the cached spatial summary of all containers.
    pub fn update_combined_hwv_map(&mut self) {
        self.combined_hwv_map = combine_hwv_maps(&self.layouts);
    }

    /// Freshly computed spatial summary of all containers, shape `(3 * n_containers, max_x, max_y)`
    pub fn all_containers_hwv_map(&self) -> Array3<f32> {
        combine_hwv_maps(&self.layouts)
    }

    /// The cached spatial summary, as of the last [`ContainerSets::update_combined_hwv_map`]
    pub fn combined_hwv_map(&self) -> &Array3<f32> {
        &self.combined_hwv_map
    }

    /// The physical container instance currently backing `container_id`
    pub fn current_placement(&self, container_id: usize) -> PlacementName {
        PlacementName {
            container_id,
            use_count: self.use_counts[container_id],
        }
    }

    /// `<type-name>(<use-count>)`
    pub fn placement_label(&self, placement: &PlacementName) -> String {
        format!(
            "{}({})",
            self.instance.containers[placement.container_id].name, placement.use_count
        )
    }

    /// Creates a snapshot of the complete dynamic state.
    pub fn save(&self) -> CSSnapshot {
        CSSnapshot {
            layout_snapshots: self.layouts.iter().map(|l| l.save()).collect(),
            pending: self.pending.clone(),
            use_counts: self.use_counts.clone(),
            placements: self.placements.clone(),
            packed: self.packed.clone(),
            skipped: self.skipped.clone(),
            current_item_id: self.current_item_id,
            suitable_container_id: self.suitable_container_id,
        }
    }

    /// Restores the dynamic state to a snapshot taken from this episode.
    pub fn restore(&mut self, snapshot: &CSSnapshot) {
        assert_eq!(self.layouts.len(), snapshot.layout_snapshots.len());
        self.layouts
            .iter_mut()
            .zip(snapshot.layout_snapshots.iter())
            .for_each(|(l, ls)| l.restore(ls));
        self.pending = snapshot.pending.clone();
        self.use_counts = snapshot.use_counts.clone();
        self.placements = snapshot.placements.clone();
        self.packed = snapshot.packed.clone();
        self.skipped = snapshot.skipped.clone();
        self.current_item_id = snapshot.current_item_id;
        self.suitable_container_id = snapshot.suitable_container_id;
        self.update_combined_hwv_map();

        debug_assert!(container_sets_is_consistent(self));
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn num_containers(&self) -> usize {
        self.layouts.len()
    }

    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn layout(&self, container_id: usize) -> Result<&Layout> {
        self.layouts
            .get(container_id)
            .ok_or_else(|| PackError::out_of_range("container", container_id, self.layouts.len()))
    }

    /// The box sequence, in its current (possibly reordered) order
    pub fn pending(&self) -> &[Item] {
        &self.pending
    }

    /// Index into [`ContainerSets::pending`] of the next box to place
    pub fn current_item_id(&self) -> usize {
        self.current_item_id
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.pending.get(self.current_item_id)
    }

    pub fn is_finished(&self) -> bool {
        self.current_item_id >= self.pending.len()
    }

    /// All packed boxes, in packing order
    pub fn packed(&self) -> &[PlacedItem] {
        &self.packed
    }

    pub fn skipped(&self) -> &[Item] {
        &self.skipped
    }

    /// Packed boxes, grouped per physical container instance
    pub fn placements(&self) -> &BTreeMap<PlacementName, Vec<PlacedItem>> {
        &self.placements
    }

    pub fn use_count(&self, container_id: usize) -> usize {
        self.use_counts[container_id]
    }

    /// The container most recently replaced
    pub fn suitable_container_id(&self) -> Option<usize> {
        self.suitable_container_id
    }

    /// Volume of all packed boxes over the volume of all physical containers used
    pub fn utilization(&self) -> f32 {
        let used_volume: u64 = self
            .placements
            .keys()
            .map(|p| self.instance.containers[p.container_id].volume())
            .sum();
        let packed_volume: u64 = self.packed.iter().map(|pi| pi.dims.volume()).sum();
        match used_volume {
            0 => 0.0,
            _ => packed_volume as f32 / used_volume as f32,
        }
    }
}

/// Complete dynamic state of a [`ContainerSets`], see [`ContainerSets::save`].
#[derive(Clone, Debug)]
pub struct CSSnapshot {
    pub layout_snapshots: Vec<LayoutSnapshot>,
    pub pending: Vec<Item>,
    pub use_counts: Vec<usize>,
    pub placements: BTreeMap<PlacementName, Vec<PlacedItem>>,
    pub packed: Vec<PlacedItem>,
    pub skipped: Vec<Item>,
    pub current_item_id: usize,
    pub suitable_container_id: Option<usize>,
}

fn init_layouts(instance: &Instance, config: &EngineConfig) -> Vec<Layout> {
    instance
        .containers
        .iter()
        .map(|c| Layout::new(c.clone(), instance.grid, config.min_support))
        .collect()
}

fn combine_hwv_maps(layouts: &[Layout]) -> Array3<f32> {
    let maps = layouts.iter().map(|l| l.hwv_map()).collect_vec();
    let views = maps.iter().map(|m| m.view()).collect::<Vec<ArrayView3<f32>>>();
    concatenate(Axis(0), &views).expect("all layouts share the canonical grid")
}
