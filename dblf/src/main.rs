use std::fs;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use rand::SeedableRng;
use rand::prelude::SmallRng;

use dblf::config::DblfConfig;
use dblf::io::cli::Cli;
use dblf::io::output::DblfOutput;
use dblf::opt::dblf_optimizer::DblfOptimizer;
use dblf::{EPOCH, io};
use stowage::io::import::import;
use stowage::io::svg::placement_to_svg;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: DblfConfig = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            DblfConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    config.engine.validate()?;

    info!("Successfully parsed DblfConfig: {config:?}");

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let (ext_instance, input_stem) = match &args.input_file {
        Some(input_file) => {
            let stem = input_file
                .file_stem()
                .and_then(|s| s.to_str())
                .context("input file has no valid name")?;
            (io::read_json_instance(input_file)?, stem.to_owned())
        }
        None => {
            warn!("[MAIN] No input file provided, generating a synthetic instance");
            let mut rng = match config.prng_seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            };
            let ext_instance = io::generate_instance(&config.synthetic, &mut rng)?;
            let stem = ext_instance.name.clone();
            (ext_instance, stem)
        }
    };

    let instance = import(&ext_instance)?;
    info!(
        "[MAIN] instance {} loaded: {} boxes, {} container types",
        instance.name,
        instance.items.len(),
        instance.containers.len()
    );

    let mut optimizer = DblfOptimizer::new(instance, config)?;
    let solution = optimizer.solve()?;

    {
        let output = DblfOutput {
            instance: ext_instance,
            solution,
            config,
        };
        let solution_path = args.solution_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, &solution_path)?;
    }

    if config.svg_output {
        let cs = &optimizer.cs;
        for placement in cs.placements().keys() {
            if let Some(svg) = placement_to_svg(cs, placement) {
                let svg_path = args.solution_folder.join(format!(
                    "sol_{input_stem}_{}.svg",
                    cs.placement_label(placement)
                ));
                io::write_svg(&svg, &svg_path)?;
            }
        }
    }

    info!(
        "[MAIN] finished after {:.3}s",
        EPOCH.elapsed().as_secs_f64()
    );

    Ok(())
}
