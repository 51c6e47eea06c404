use log::error;
use ndarray::s;

use crate::entities::{Container, ContainerSets, Item, Layout, LayoutSnapshot};

//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks

pub fn instance_ids_correct(items: &[Item], containers: &[Container]) -> bool {
    items.iter().enumerate().all(|(i, item)| item.id == i)
        && containers.iter().enumerate().all(|(i, c)| c.id == i)
}

pub fn layout_is_consistent(layout: &Layout) -> bool {
    let c = &layout.container;
    let (dx, dy, dz) = (c.dims.dx as usize, c.dims.dy as usize, c.dims.dz);
    let hm = layout.height_map();

    if hm.iter().any(|h| *h > dz) {
        error!("height field of container {} exceeds its height", c.id);
        return false;
    }

    let padding_intact = hm
        .indexed_iter()
        .filter(|((x, y), _)| *x >= dx || *y >= dy)
        .all(|(_, h)| *h == dz);
    if !padding_intact {
        error!("padding of container {} was modified", c.id);
        return false;
    }

    if layout.free_volume() > c.volume() || layout.free_weight() > c.max_weight {
        error!(
            "budget of container {} exceeds its capacity: vol {}/{}, wt {}/{}",
            c.id,
            layout.free_volume(),
            c.volume(),
            layout.free_weight(),
            c.max_weight
        );
        return false;
    }

    // every placed unit of volume sits below the height field
    let column_volume: u64 = hm.slice(s![..dx, ..dy]).iter().map(|h| *h as u64).sum();
    let placed_volume = c.volume() - layout.free_volume();
    if column_volume < placed_volume {
        error!(
            "height field of container {} accounts for {column_volume} units, {placed_volume} placed",
            c.id
        );
        return false;
    }

    true
}

pub fn snapshot_matches_layout(layout: &Layout, snapshot: &LayoutSnapshot) -> bool {
    layout.container.id == snapshot.container_id
        && layout.height_map() == snapshot.height_map
        && layout.free_volume() == snapshot.free_volume
        && layout.free_weight() == snapshot.free_weight
        && layout.n_placed() == snapshot.n_placed
}

pub fn container_sets_is_consistent(cs: &ContainerSets) -> bool {
    let bucketed: usize = cs.placements().values().map(|b| b.len()).sum();
    assert_eq!(bucketed, cs.packed().len());
    assert_eq!(
        cs.current_item_id(),
        cs.packed().len() + cs.skipped().len()
    );

    for (name, bucket) in cs.placements() {
        assert!(!bucket.is_empty(), "{name} was registered without boxes");
        assert!(name.use_count <= cs.use_count(name.container_id));
        assert!(bucket.iter().all(|pi| pi.placement == *name));
    }

    cs.layouts().iter().all(layout_is_consistent)
}
