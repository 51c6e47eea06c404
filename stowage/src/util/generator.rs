use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Uniform};

use crate::entities::Item;
use crate::error::{PackError, Result};
use crate::geometry::Dims;

/// Generates a synthetic box sequence of `n_items` boxes that exactly tiles `container`.
///
/// The largest splittable box is repeatedly cut in two along a random axis at a random offset.
/// Fewer boxes are returned if every box has been reduced to a single unit cube.
/// Weights are drawn uniformly from `weight_range` and the sequence is shuffled.
pub fn generate_items(
    container: Dims,
    n_items: usize,
    weight_range: (f32, f32),
    rng: &mut impl Rng,
) -> Result<Vec<Item>> {
    let (w_min, w_max) = weight_range;
    if !(w_min >= 0.0 && w_min <= w_max && w_max.is_finite()) {
        return Err(PackError::InvalidGeometry(format!(
            "invalid weight range: ({w_min}, {w_max})"
        )));
    }
    let weight_distr = Uniform::new_inclusive(w_min, w_max)
        .map_err(|e| PackError::InvalidGeometry(format!("weight range: {e}")))?;

    let mut boxes = vec![container];
    while boxes.len() < n_items {
        let Some(idx) = boxes
            .iter()
            .positions(|b| b.volume() > 1)
            .max_by_key(|&i| boxes[i].volume())
        else {
            break;
        };
        let target = boxes.swap_remove(idx);
        let (a, b) = split(target, rng);
        boxes.push(a);
        boxes.push(b);
    }

    boxes.shuffle(rng);

    boxes
        .into_iter()
        .enumerate()
        .map(|(id, dims)| Item::new(id, format!("box_{id}"), dims, weight_distr.sample(rng)))
        .collect()
}

/// Cuts `d` in two along a random axis with an extent of at least 2
fn split(d: Dims, rng: &mut impl Rng) -> (Dims, Dims) {
    let extents = [d.dx, d.dy, d.dz];
    let axes = (0..3).filter(|a| extents[*a] > 1).collect_vec();
    let axis = axes[rng.random_range(0..axes.len())];
    let cut = rng.random_range(1..extents[axis]);

    match axis {
        0 => (Dims::new(cut, d.dy, d.dz), Dims::new(d.dx - cut, d.dy, d.dz)),
        1 => (Dims::new(d.dx, cut, d.dz), Dims::new(d.dx, d.dy - cut, d.dz)),
        _ => (Dims::new(d.dx, d.dy, cut), Dims::new(d.dx, d.dy, d.dz - cut)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn generated_boxes_tile_the_container() {
        let container = Dims::new(10, 8, 6);
        let mut rng = SmallRng::seed_from_u64(0);
        let items = generate_items(container, 25, (1.0, 5.0), &mut rng).unwrap();

        assert_eq!(items.len(), 25);
        assert_eq!(
            items.iter().map(|i| i.volume()).sum::<u64>(),
            container.volume()
        );
        assert!(items.iter().all(|i| i.dims.fits_within(&container)));
        assert!(items.iter().all(|i| (1.0..=5.0).contains(&i.wt)));
        assert!(items.iter().enumerate().all(|(id, i)| i.id == id));
    }

    #[test]
    fn generation_stops_at_unit_cubes() {
        let mut rng = SmallRng::seed_from_u64(1);
        let items = generate_items(Dims::new(2, 2, 1), 10, (0.0, 0.0), &mut rng).unwrap();
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn invalid_weight_range_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(2);
        assert!(generate_items(Dims::new(2, 2, 2), 3, (5.0, 1.0), &mut rng).is_err());
    }
}
