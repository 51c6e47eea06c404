use ndarray::{Array2, Array3, s};

use crate::entities::{Container, Item};
use crate::geometry::{Dims, Rotation};
use crate::util::GridConfig;
use crate::util::assertions;

/// Occupancy state of one physical container.
///
/// The [`Layout`] keeps a height field over the canonical grid together with the remaining
/// volume and weight budget. Heights are measured from the container's own floor.
/// Cells outside of the container's footprint permanently hold the container height,
/// so they read as full and never qualify as support.
#[derive(Clone, Debug)]
pub struct Layout {
    /// The container type this layout is an instance of
    pub container: Container,
    grid: GridConfig,
    min_support: f32,
    height_map: Array2<u32>,
    free_volume: u64,
    free_weight: f32,
    n_placed: usize,
}

impl Layout {
    pub fn new(container: Container, grid: GridConfig, min_support: f32) -> Self {
        assert!(grid.contains(&container), "container exceeds the grid");
        let mut layout = Layout {
            height_map: Array2::zeros(grid.shape()),
            free_volume: container.volume(),
            free_weight: container.max_weight,
            container,
            grid,
            min_support,
            n_placed: 0,
        };
        layout.reset();
        layout
    }

    /// Empties the container: zero heights inside the footprint, full volume and weight budget.
    pub fn reset(&mut self) {
        let Dims { dx, dy, dz } = self.container.dims;
        self.height_map.fill(dz);
        self.height_map
            .slice_mut(s![..dx as usize, ..dy as usize])
            .fill(0);
        self.free_volume = self.container.volume();
        self.free_weight = self.container.max_weight;
        self.n_placed = 0;

        debug_assert!(assertions::layout_is_consistent(self));
    }

    /// Checks whether `item`, in the given orientation, can be placed with its footprint origin at `pos`.
    /// Returns the height its base would rest on, or `None` if the placement is infeasible.
    pub fn check_placement(&self, item: &Item, rotation: Rotation, pos: (u32, u32)) -> Option<u32> {
        self.check_oriented(item.oriented(rotation), item.wt, pos)
    }

    pub(crate) fn check_oriented(&self, d: Dims, wt: f32, (x, y): (u32, u32)) -> Option<u32> {
        let c = self.container.dims;
        if x as u64 + d.dx as u64 > c.dx as u64 || y as u64 + d.dy as u64 > c.dy as u64 {
            return None;
        }
        if self.free_weight < wt || self.free_volume < d.volume() {
            return None;
        }

        let support = self.support_height(d, (x, y));
        if support + d.dz > c.dz {
            return None;
        }

        let footprint = self.footprint(d, (x, y));
        let n_supported = footprint.iter().filter(|h| **h == support).count();
        let required = self.min_support as f64 * d.base_area() as f64;
        match (n_supported as f64) >= required {
            true => Some(support),
            false => None,
        }
    }

    /// Places `item` after re-validating the placement. On success, the position of the item is
    /// returned with z expressed in the canonical frame (container top aligned with `max_z`).
    /// The layout is left untouched when the placement is infeasible.
    pub fn drop_item(
        &mut self,
        item: &Item,
        rotation: Rotation,
        pos: (u32, u32),
    ) -> Option<(u32, u32, u32)> {
        let d = item.oriented(rotation);
        let support = self.check_oriented(d, item.wt, pos)?;
        let (x, y) = (pos.0 as usize, pos.1 as usize);

        self.height_map
            .slice_mut(s![x..x + d.dx as usize, y..y + d.dy as usize])
            .fill(support + d.dz);
        self.free_volume -= d.volume();
        self.free_weight -= item.wt;
        self.n_placed += 1;

        debug_assert!(assertions::layout_is_consistent(self));

        Some((pos.0, pos.1, self.floor_offset() + support))
    }

    /// Highest point under the footprint of a box with extents `d` at `pos`
    pub fn support_height(&self, d: Dims, pos: (u32, u32)) -> u32 {
        self.footprint(d, pos).iter().copied().max().unwrap_or(0)
    }

    fn footprint(&self, d: Dims, (x, y): (u32, u32)) -> ndarray::ArrayView2<'_, u32> {
        let (x, y) = (x as usize, y as usize);
        self.height_map
            .slice(s![x..x + d.dx as usize, y..y + d.dy as usize])
    }

    /// Three channel spatial summary on the canonical grid, shape `(3, max_x, max_y)`:
    /// height in the canonical frame, free weight and free volume, each normalised to `[0, 1]`.
    /// Cells outside the footprint read as full height with no free capacity.
    pub fn hwv_map(&self) -> Array3<f32> {
        let (gx, gy) = self.grid.shape();
        let mut map = Array3::<f32>::zeros((3, gx, gy));
        let c = self.container.dims;
        let max_z = self.grid.max_z as f32;
        let floor = self.floor_offset() as f32;
        let free_wt = self.free_weight / self.grid.max_w;
        let free_vol = self.free_volume as f32 / self.container.volume() as f32;

        for ((x, y), h) in self.height_map.indexed_iter() {
            match x < c.dx as usize && y < c.dy as usize {
                true => {
                    map[[0, x, y]] = (floor + *h as f32) / max_z;
                    map[[1, x, y]] = free_wt;
                    map[[2, x, y]] = free_vol;
                }
                false => map[[0, x, y]] = 1.0,
            }
        }
        map
    }

    /// Distance between the canonical grid floor and the floor of this container
    pub fn floor_offset(&self) -> u32 {
        self.grid.max_z - self.container.dims.dz
    }

    /// Coordinates at or beyond these bounds (x, y) lie outside the container's footprint
    pub fn valid_extent(&self) -> (u32, u32) {
        (self.container.dims.dx, self.container.dims.dy)
    }

    pub fn height_map(&self) -> &Array2<u32> {
        &self.height_map
    }

    pub fn free_volume(&self) -> u64 {
        self.free_volume
    }

    pub fn free_weight(&self) -> f32 {
        self.free_weight
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn min_support(&self) -> f32 {
        self.min_support
    }

    /// Number of boxes placed since the last reset
    pub fn n_placed(&self) -> usize {
        self.n_placed
    }

    pub fn is_empty(&self) -> bool {
        self.n_placed == 0
    }

    /// Fraction of the container volume occupied by boxes
    pub fn utilization(&self) -> f32 {
        1.0 - self.free_volume as f32 / self.container.volume() as f32
    }

    /// Saves the current occupancy to be potentially restored to later.
    pub fn save(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            container_id: self.container.id,
            height_map: self.height_map.clone(),
            free_volume: self.free_volume,
            free_weight: self.free_weight,
            n_placed: self.n_placed,
        }
    }

    /// Restores the occupancy to a previous state.
    pub fn restore(&mut self, snapshot: &LayoutSnapshot) {
        assert_eq!(self.container.id, snapshot.container_id);
        assert_eq!(self.height_map.dim(), snapshot.height_map.dim());

        self.height_map.assign(&snapshot.height_map);
        self.free_volume = snapshot.free_volume;
        self.free_weight = snapshot.free_weight;
        self.n_placed = snapshot.n_placed;

        debug_assert!(assertions::snapshot_matches_layout(self, snapshot));
    }
}

/// Immutable copy of the occupancy of a [`Layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSnapshot {
    pub container_id: usize,
    pub height_map: Array2<u32>,
    pub free_volume: u64,
    pub free_weight: f32,
    pub n_placed: usize,
}
