use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use thousands::Separable;

use stowage::Result;
use stowage::entities::{ContainerSets, Instance, Item};
use stowage::io::export::export;
use stowage::io::ext_repr::ExtSolution;
use stowage::mask::FeasibilityMask;

use crate::EPOCH;
use crate::config::DblfConfig;
use crate::opt::search::{deepest_bottom_left, replacement_candidate};

/// Deepest-Bottom-Left-Fill (DBLF) driver.
/// Places the boxes in sequence, each at the deepest feasible position the engine reports.
pub struct DblfOptimizer {
    pub cs: ContainerSets,
    pub config: DblfConfig,
    /// Number of feasibility masks built
    pub mask_counter: usize,
    /// Total number of feasible placements enumerated over all masks
    pub bit_counter: usize,
}

impl DblfOptimizer {
    pub fn new(instance: Instance, config: DblfConfig) -> Result<Self> {
        let cs = ContainerSets::new(instance, config.engine)?;
        Ok(Self {
            cs,
            config,
            mask_counter: 0,
            bit_counter: 0,
        })
    }

    pub fn solve(&mut self) -> Result<ExtSolution> {
        let start = Instant::now();
        let n_items = self.cs.pending().len();
        //set once a container was replaced for the current box, to avoid replacing in circles
        let mut replaced = false;

        while let Some(item) = self.cs.current_item().cloned() {
            let mask = self.mask(&item)?;

            if let Some(action) = deepest_bottom_left(&self.cs, &item, &mask) {
                match self.cs.drop_item(&item, action)? {
                    Some(pi) => info!(
                        "[DBLF] placing box {}/{} ({}) in {} at {:?}",
                        self.cs.packed().len(),
                        n_items,
                        item.name,
                        pi.container_name,
                        pi.position
                    ),
                    None => {
                        warn!("[DBLF] placement {action} of box {} was rejected", item.name);
                        self.cs.skip_item();
                    }
                }
                replaced = false;
                continue;
            }

            let current = self.cs.current_item_id();
            if let Some(later) = self.lookahead(current)? {
                debug!(
                    "[DBLF] box {} fits nowhere, moving box {} ahead",
                    item.name,
                    self.cs.pending()[later].name
                );
                self.cs.reorder_pending(current, later)?;
                continue;
            }

            match (replaced, replacement_candidate(&self.cs, &item)) {
                (false, Some(cid)) => {
                    info!(
                        "[DBLF] closing {} ({:.3}% utilized)",
                        self.cs.placement_label(&self.cs.current_placement(cid)),
                        self.cs.layouts()[cid].utilization() * 100.0
                    );
                    self.cs.replace_containers(cid)?;
                    replaced = true;
                }
                _ => {
                    warn!(
                        "[DBLF] box {} ({}) does not fit any container, skipping",
                        item.name, item.dims
                    );
                    self.cs.skip_item();
                    replaced = false;
                }
            }
        }

        self.cs.update_combined_hwv_map();

        info!(
            "[DBLF] optimization finished in {:.3}ms ({} masks, {} feasible placements)",
            start.elapsed().as_secs_f64() * 1000.0,
            self.mask_counter.separate_with_commas(),
            self.bit_counter.separate_with_commas()
        );
        info!(
            "[DBLF] packed {}/{} boxes in {} containers with a utilization of {:.3}%",
            self.cs.packed().len(),
            n_items,
            self.cs.placements().len(),
            self.cs.utilization() * 100.0
        );

        Ok(export(&self.cs, *EPOCH))
    }

    /// Index of the first of the next `lookahead` pending boxes that can be placed somewhere
    fn lookahead(&mut self, current: usize) -> Result<Option<usize>> {
        let candidates = self
            .cs
            .pending()
            .iter()
            .enumerate()
            .skip(current + 1)
            .take(self.config.lookahead)
            .map(|(idx, item)| (idx, item.clone()))
            .collect_vec();

        for (idx, item) in candidates {
            if !self.mask(&item)?.is_empty() {
                return Ok(Some(idx));
            }
        }
        Ok(None)
    }

    fn mask(&mut self, item: &Item) -> Result<FeasibilityMask> {
        let containers = (0..self.cs.num_containers()).collect_vec();
        let mask = self
            .cs
            .valid_mask(item, &containers, &self.cs.instance().rotations)?;
        self.mask_counter += 1;
        self.bit_counter += mask.count();
        Ok(mask)
    }
}
