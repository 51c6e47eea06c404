use std::sync::atomic::{AtomicUsize, Ordering};

use log::trace;
use ndarray::Array3;

use crate::entities::{Item, Layout};
use crate::geometry::Rotation;

/// Search budget shared by all container scans of one mask construction.
/// The global counter is only ever incremented through [`MaskBudget::try_reserve`],
/// which keeps it a hard limit even when containers are scanned concurrently.
pub(crate) struct MaskBudget {
    global: AtomicUsize,
    global_limit: usize,
    container_limit: usize,
}

impl MaskBudget {
    pub fn new(global_limit: usize, container_limit: usize) -> Self {
        MaskBudget {
            global: AtomicUsize::new(0),
            global_limit,
            container_limit,
        }
    }

    fn global_exhausted(&self) -> bool {
        self.global.load(Ordering::Relaxed) >= self.global_limit
    }

    fn try_reserve(&self) -> bool {
        self.global
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                (n < self.global_limit).then_some(n + 1)
            })
            .is_ok()
    }
}

/// Result of scanning a single container, shape `(n_rotations, max_x, max_y)`
pub(crate) struct ScanOutcome {
    pub bits: Array3<u8>,
    pub n_set: usize,
    /// The budget that stopped the scan early, if any
    pub exhausted: Option<usize>,
}

/// Enumerates all feasible footprint origins of `item` in `layout` for the given rotations.
/// `rotations` pairs every rotation with its index along the rotation axis of the mask.
/// Only reads the layout, so distinct containers can be scanned concurrently.
pub(crate) fn scan_container(
    layout: &Layout,
    item: &Item,
    rotations: &[(usize, Rotation)],
    n_rotations: usize,
    budget: &MaskBudget,
) -> ScanOutcome {
    let (gx, gy) = layout.grid().shape();
    let mut outcome = ScanOutcome {
        bits: Array3::zeros((n_rotations, gx, gy)),
        n_set: 0,
        exhausted: None,
    };

    let c = layout.container.dims;
    //fast necessary conditions, no rotation can fit if these fail
    if !item.dims.fits_within_any_orientation(&c)
        || layout.free_weight() < item.wt
        || layout.free_volume() < item.volume()
    {
        return outcome;
    }

    let (valid_x, valid_y) = layout.valid_extent();

    'rotations: for &(r_idx, rotation) in rotations {
        let d = rotation.apply(item.dims);
        if !d.fits_within(&c) {
            continue;
        }
        for y in 0..=(c.dy - d.dy) {
            if y >= valid_y {
                break;
            }
            for x in 0..=(c.dx - d.dx) {
                if x >= valid_x {
                    break;
                }
                if budget.global_exhausted() {
                    outcome.exhausted = Some(budget.global_limit);
                    break 'rotations;
                }
                if outcome.n_set >= budget.container_limit {
                    outcome.exhausted = Some(budget.container_limit);
                    break 'rotations;
                }
                if layout.check_oriented(d, item.wt, (x, y)).is_some() {
                    if !budget.try_reserve() {
                        outcome.exhausted = Some(budget.global_limit);
                        break 'rotations;
                    }
                    outcome.bits[[r_idx, x as usize, y as usize]] = 1;
                    outcome.n_set += 1;
                }
            }
        }
    }

    if let Some(limit) = outcome.exhausted {
        trace!(
            "[MASK] budget of {limit} exhausted scanning container {} for box {} ({} bits set)",
            layout.container.id, item.name, outcome.n_set
        );
    }

    outcome
}
