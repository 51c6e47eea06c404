use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::warn;

use crate::entities::{Container, Instance, Item};
use crate::geometry::{Dims, Rotation};
use crate::io::ext_repr::{ExtContainer, ExtInstance, ExtItem};
use crate::util::GridConfig;

/// Imports an instance into the library
pub fn import(ext_instance: &ExtInstance) -> Result<Instance> {
    ensure!(
        !ext_instance.containers.is_empty(),
        "instance {} defines no containers",
        ext_instance.name
    );

    let containers = ext_instance
        .containers
        .iter()
        .enumerate()
        .map(|(id, ext_c)| import_container(id, ext_c))
        .collect::<Result<Vec<Container>>>()?;

    let items = ext_instance
        .items
        .iter()
        .enumerate()
        .map(|(id, ext_i)| import_item(id, ext_i))
        .collect::<Result<Vec<Item>>>()?;

    if !items.iter().map(|i| &i.name).all_unique() {
        warn!(
            "instance {} contains boxes with duplicate names",
            ext_instance.name
        );
    }

    let rotations = match &ext_instance.rotations {
        None => Rotation::ALL.to_vec(),
        Some(codes) => {
            ensure!(!codes.is_empty(), "empty rotation set");
            codes
                .iter()
                .unique()
                .map(|c| Rotation::try_from(*c))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let grid = ext_instance.grid.map(|g| GridConfig {
        max_x: g.max_x,
        max_y: g.max_y,
        max_z: g.max_z,
        max_w: g.max_w,
    });

    let instance = Instance::new(&ext_instance.name, items, containers, rotations, grid)?;

    for item in instance.items.iter() {
        if !instance.fits_any_container(item) {
            warn!(
                "box {} ({}, wt {}) does not fit any container",
                item.name, item.dims, item.wt
            );
        }
    }

    Ok(instance)
}

pub fn import_item(id: usize, ext_item: &ExtItem) -> Result<Item> {
    let dims = Dims::try_new(ext_item.dx, ext_item.dy, ext_item.dz)
        .with_context(|| format!("box {}", ext_item.name))?;
    Ok(Item::new(id, &ext_item.name, dims, ext_item.wt)?)
}

pub fn import_container(id: usize, ext_container: &ExtContainer) -> Result<Container> {
    let dims = Dims::try_new(ext_container.dx, ext_container.dy, ext_container.dz)
        .with_context(|| format!("container {}", ext_container.name))?;
    Ok(Container::new(
        id,
        &ext_container.name,
        dims,
        ext_container.max_weight,
    )?)
}
