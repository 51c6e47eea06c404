use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use log::{LevelFilter, info};
use rand::Rng;
use serde::Serialize;
use svg::Document;

use stowage::entities::{Container, Instance};
use stowage::geometry::{Dims, Rotation};
use stowage::io::export::export_instance;
use stowage::io::ext_repr::ExtInstance;
use stowage::util::generator::generate_items;

use crate::EPOCH;
use crate::config::SyntheticConfig;

pub mod cli;
pub mod output;

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    info!("[EPOCH]: {}", jiff::Timestamp::now());
    Ok(())
}

pub fn read_json_instance(path: &Path) -> Result<ExtInstance> {
    let file = File::open(path)
        .with_context(|| format!("could not open instance file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("could not parse instance file: {}", path.display()))
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open solution file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, json)
        .with_context(|| format!("could not write solution file: {}", path.display()))?;

    info!("solution written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .with_context(|| format!("could not write svg file: {}", path.display()))?;
    info!("svg written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

/// Generates an instance with a single container type and a box sequence that tiles it
pub fn generate_instance(config: &SyntheticConfig, rng: &mut impl Rng) -> Result<ExtInstance> {
    let (dx, dy, dz) = config.container;
    let dims = Dims::try_new(dx, dy, dz).context("synthetic container")?;
    let container = Container::new(0, "synthetic", dims, config.max_weight)?;
    let items = generate_items(dims, config.n_items, config.weight_range, rng)?;
    let instance = Instance::new(
        format!("synthetic_{dx}x{dy}x{dz}_{}", items.len()),
        items,
        vec![container],
        Rotation::ALL.to_vec(),
        None,
    )?;
    Ok(export_instance(&instance))
}
