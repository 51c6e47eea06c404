#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::Path;

    use rand::SeedableRng;
    use rand::prelude::SmallRng;
    use test_case::test_case;

    use dblf::config::{DblfConfig, SyntheticConfig};
    use dblf::io;
    use dblf::opt::dblf_optimizer::DblfOptimizer;
    use stowage::geometry::Rotation;
    use stowage::io::ext_repr::{ExtContainer, ExtInstance, ExtItem, ExtSolution};
    use stowage::io::import::import;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn solve(ext_instance: &ExtInstance, config: DblfConfig) -> ExtSolution {
        let instance = import(ext_instance).unwrap();
        let mut optimizer = DblfOptimizer::new(instance, config).unwrap();
        optimizer.solve().unwrap()
    }

    /// Checks every packed box against its container with an independent voxel model
    fn assert_solution_is_sound(ext_instance: &ExtInstance, solution: &ExtSolution) {
        let n_packed = solution.placements.iter().map(|p| p.placed_items.len()).sum::<usize>();
        assert_eq!(n_packed + solution.skipped.len(), ext_instance.items.len());
        assert_eq!(solution.n_containers_used, solution.placements.len());

        let mut seen = HashSet::new();
        for placement in solution.placements.iter() {
            let c = &ext_instance.containers[placement.container_id];
            let mut voxels = HashSet::new();
            let mut weight = 0.0;
            for pi in placement.placed_items.iter() {
                assert!(seen.insert(pi.item_id), "box {} packed twice", pi.name);
                let item = &ext_instance.items[pi.item_id];
                let rotation = Rotation::try_from(pi.rotation).unwrap();
                let mut sorted = [pi.dims.0, pi.dims.1, pi.dims.2];
                let mut expected = [item.dx, item.dy, item.dz];
                sorted.sort();
                expected.sort();
                assert_eq!(sorted, expected, "{} is not a rotation of {}", rotation, item.name);

                let (x, y, z) = pi.position;
                let (dx, dy, dz) = pi.dims;
                assert!(x + dx <= c.dx && y + dy <= c.dy && z + dz <= c.dz);
                for vx in x..x + dx {
                    for vy in y..y + dy {
                        if z > 0 {
                            // strict support: the cell just below is occupied
                            assert!(voxels.contains(&(vx, vy, z - 1)), "{} floats", pi.name);
                        }
                        for vz in z..z + dz {
                            assert!(voxels.insert((vx, vy, vz)), "{} overlaps", pi.name);
                        }
                    }
                }
                weight += item.wt;
            }
            assert!(weight <= c.max_weight + 1e-3);
            let utilization = voxels.len() as f32 / (c.dx * c.dy * c.dz) as f32;
            assert!((utilization - placement.utilization).abs() < 1e-5);
        }
    }

    #[test_case("../assets/uniform_cubes.json"; "uniform_cubes")]
    #[test_case("../assets/warehouse.json"; "warehouse")]
    #[test_case("../assets/upright_mixed.json"; "upright_mixed")]
    fn test_instance(instance_path: &str) {
        init_logger();
        let ext_instance = io::read_json_instance(Path::new(instance_path)).unwrap();
        let solution = solve(&ext_instance, DblfConfig::default());
        assert_solution_is_sound(&ext_instance, &solution);
    }

    #[test_case(false; "sequential")]
    #[test_case(true; "parallel")]
    fn cubes_fill_containers_completely(parallel: bool) {
        let ext_instance = io::read_json_instance(Path::new("../assets/uniform_cubes.json")).unwrap();
        let mut config = DblfConfig::default();
        config.engine.parallel = parallel;
        let solution = solve(&ext_instance, config);

        let sizes = solution
            .placements
            .iter()
            .map(|p| (p.name.as_str(), p.placed_items.len()))
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![("Cube(1)", 27), ("Cube(2)", 3)]);
        assert_eq!(solution.placements[0].utilization, 1.0);
        assert!(solution.skipped.is_empty());
    }

    #[test]
    fn oversized_boxes_are_skipped() {
        let ext_instance = io::read_json_instance(Path::new("../assets/warehouse.json")).unwrap();
        let solution = solve(&ext_instance, DblfConfig::default());
        assert!(solution.skipped.contains(&"mast".to_string()));

        // only the pallet carries the engine block
        let engine_block = solution
            .placements
            .iter()
            .find(|p| p.placed_items.iter().any(|pi| pi.name == "engine_block"))
            .unwrap();
        assert_eq!(engine_block.container_id, 0);
    }

    fn item(name: &str, dz: u32) -> ExtItem {
        ExtItem {
            name: name.to_string(),
            dx: 4,
            dy: 4,
            dz,
            wt: 1.0,
        }
    }

    fn single_box_instance(items: Vec<ExtItem>) -> ExtInstance {
        ExtInstance {
            name: "slabs".to_string(),
            containers: vec![ExtContainer {
                name: "Box".to_string(),
                dx: 4,
                dy: 4,
                dz: 4,
                max_weight: 100.0,
            }],
            items,
            rotations: Some(vec![0]),
            grid: None,
        }
    }

    #[test_case(5, vec![vec!["a", "c"], vec!["b"]]; "lookahead pulls the thin slab forward")]
    #[test_case(0, vec![vec!["a"], vec!["b", "c"]]; "without lookahead the slab waits for a fresh container")]
    fn lookahead_reorders_pending_boxes(lookahead: usize, expected: Vec<Vec<&str>>) {
        let ext_instance = single_box_instance(vec![item("a", 3), item("b", 3), item("c", 1)]);
        let config = DblfConfig {
            lookahead,
            ..DblfConfig::default()
        };
        let solution = solve(&ext_instance, config);

        let contents = solution
            .placements
            .iter()
            .map(|p| p.placed_items.iter().map(|pi| pi.name.as_str()).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(contents, expected);
        assert_solution_is_sound(&ext_instance, &solution);
    }

    #[test]
    fn synthetic_instance_is_packed_soundly() {
        let synthetic = SyntheticConfig {
            container: (8, 6, 5),
            max_weight: 500.0,
            n_items: 20,
            weight_range: (1.0, 3.0),
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let ext_instance = io::generate_instance(&synthetic, &mut rng).unwrap();
        assert_eq!(ext_instance.items.len(), 20);

        let solution = solve(&ext_instance, DblfConfig::default());
        assert!(solution.skipped.is_empty());
        assert_solution_is_sound(&ext_instance, &solution);
    }
}
