use std::time::Instant;

use crate::entities::{ContainerSets, Instance, PlacedItem};
use crate::io::ext_repr::{
    ExtContainer, ExtGrid, ExtInstance, ExtItem, ExtPlacedItem, ExtPlacement, ExtSolution,
};

/// Exports the current state of an episode out of the library
pub fn export(cs: &ContainerSets, epoch: Instant) -> ExtSolution {
    let placements = cs
        .placements()
        .iter()
        .map(|(name, packed)| {
            let container = cs.instance().container(name.container_id);
            let volume: u64 = packed.iter().map(|pi| pi.dims.volume()).sum();
            ExtPlacement {
                name: cs.placement_label(name),
                container_id: name.container_id,
                use_count: name.use_count,
                placed_items: packed.iter().map(export_placed_item).collect(),
                utilization: volume as f32 / container.volume() as f32,
                weight: packed.iter().map(|pi| pi.item.wt).sum(),
            }
        })
        .collect::<Vec<_>>();

    ExtSolution {
        n_containers_used: placements.len(),
        placements,
        skipped: cs.skipped().iter().map(|i| i.name.clone()).collect(),
        utilization: cs.utilization(),
        run_time_sec: epoch.elapsed().as_secs_f64(),
    }
}

pub fn export_placed_item(pi: &PlacedItem) -> ExtPlacedItem {
    ExtPlacedItem {
        item_id: pi.item_id(),
        name: pi.item.name.clone(),
        rotation: pi.rotation.code(),
        dims: (pi.dims.dx, pi.dims.dy, pi.dims.dz),
        position: pi.position,
    }
}

/// Converts an instance back to its external representation
pub fn export_instance(instance: &Instance) -> ExtInstance {
    ExtInstance {
        name: instance.name.clone(),
        containers: instance
            .containers
            .iter()
            .map(|c| ExtContainer {
                name: c.name.clone(),
                dx: c.dims.dx,
                dy: c.dims.dy,
                dz: c.dims.dz,
                max_weight: c.max_weight,
            })
            .collect(),
        items: instance
            .items
            .iter()
            .map(|i| ExtItem {
                name: i.name.clone(),
                dx: i.dims.dx,
                dy: i.dims.dy,
                dz: i.dims.dz,
                wt: i.wt,
            })
            .collect(),
        rotations: Some(instance.rotations.iter().map(|r| r.code()).collect()),
        grid: Some(ExtGrid {
            max_x: instance.grid.max_x,
            max_y: instance.grid.max_y,
            max_z: instance.grid.max_z,
            max_w: instance.grid.max_w,
        }),
    }
}
