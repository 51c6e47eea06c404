//! Feasibility masks: which `(container, rotation, x, y)` placements are legal for a box.

mod scan;

use ndarray::{Array4, Axis, s};

use crate::entities::Action;
use crate::error::{PackError, Result};
use crate::geometry::Rotation;

pub(crate) use scan::{MaskBudget, scan_container};

/// Binary tensor of shape `(n_containers, n_rotations, max_x, max_y)`.
/// A bit is set when placing the box in that container, under that rotation,
/// with its footprint origin at `(x, y)`, is feasible.
///
/// Construction is bounded by a search budget, so a mask can under-report feasible
/// placements once the budget saturates (see [`FeasibilityMask::truncated`]). It never over-reports.
#[derive(Clone, Debug, PartialEq)]
pub struct FeasibilityMask {
    bits: Array4<u8>,
    rotations: Vec<Rotation>,
    exhausted_budget: Option<usize>,
}

impl FeasibilityMask {
    pub(crate) fn new(bits: Array4<u8>, rotations: Vec<Rotation>) -> Self {
        debug_assert_eq!(bits.len_of(Axis(1)), rotations.len());
        FeasibilityMask {
            bits,
            rotations,
            exhausted_budget: None,
        }
    }

    pub(crate) fn mark_truncated(&mut self, limit: usize) {
        self.exhausted_budget = Some(limit);
    }

    /// `(n_containers, n_rotations, max_x, max_y)`
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        self.bits.dim()
    }

    pub fn bits(&self) -> &Array4<u8> {
        &self.bits
    }

    pub fn into_bits(self) -> Array4<u8> {
        self.bits
    }

    /// The rotation belonging to each index of the rotation axis
    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    pub fn is_set(&self, container_id: usize, rotation_idx: usize, x: u32, y: u32) -> bool {
        self.bits
            .get((container_id, rotation_idx, x as usize, y as usize))
            .is_some_and(|b| *b == 1)
    }

    /// Total number of feasible placements found
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b == 1).count()
    }

    /// Number of feasible placements found in one container
    pub fn count_container(&self, container_id: usize) -> usize {
        self.bits
            .slice(s![container_id, .., .., ..])
            .iter()
            .filter(|b| **b == 1)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|b| *b == 0)
    }

    /// True if scanning stopped early because a budget was exhausted
    pub fn truncated(&self) -> bool {
        self.exhausted_budget.is_some()
    }

    /// Fails with [`PackError::BudgetExceeded`] if the mask might be incomplete.
    pub fn ensure_complete(&self) -> Result<()> {
        match self.exhausted_budget {
            Some(limit) => Err(PackError::BudgetExceeded { limit }),
            None => Ok(()),
        }
    }

    /// All feasible placements, in `(container, rotation, x, y)` order
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.bits
            .indexed_iter()
            .filter(|(_, b)| **b == 1)
            .map(|((c, r, x, y), _)| Action {
                container_id: c,
                rotation: self.rotations[r],
                x: x as u32,
                y: y as u32,
            })
    }

    /// Row-major flattening, as consumed by a policy network
    pub fn flatten(&self) -> Vec<u8> {
        self.bits.iter().copied().collect()
    }
}
