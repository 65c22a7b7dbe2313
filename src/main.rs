mod cli;
mod watchers;

use std::error::Error;
use std::path::Path;

use clap::Parser;
use isostitch_runtime::{ChunkMap, MeshPipeline};
use isostitch_world::{IsostitchConfig, load_config_from_path};

use crate::cli::Cli;

fn load(cli: &Cli) -> Result<IsostitchConfig, Box<dyn Error>> {
    let base = match cli.config.as_deref() {
        Some(path) => load_config_from_path(path)?,
        None => IsostitchConfig::default(),
    };
    let cfg = cli.apply_overrides(base);
    cfg.map.validate()?;
    Ok(cfg)
}

fn generate(cfg: &IsostitchConfig) -> Result<(), Box<dyn Error>> {
    let field = cfg.field.build();
    let mut map = ChunkMap::new(&cfg.map)?;
    let pipeline = MeshPipeline::from_config(&cfg.map)?;
    let [sx, sy, sz] = cfg.map.map_size;
    log::info!(
        "map {}x{}x{} res={} iso={} field={} threads={}",
        sx,
        sy,
        sz,
        cfg.map.resolution,
        cfg.map.iso_level,
        cfg.field.name(),
        pipeline.threads()
    );
    let meshes = pipeline.run(&mut map, &*field)?;
    for mesh in &meshes.chunks {
        log::debug!(
            "chunk ({},{},{}) tris={} interior={} seam={} skipped={}",
            mesh.coord.cx,
            mesh.coord.cy,
            mesh.coord.cz,
            mesh.triangle_count(),
            mesh.stats.interior_cubes,
            mesh.stats.seam_cubes,
            mesh.stats.seam_cubes_skipped
        );
    }
    let empty = meshes.chunks.iter().filter(|c| c.is_empty()).count();
    log::info!(
        "total tris={} chunks={} (empty {}) sample={}ms march={}ms",
        meshes.triangle_count(),
        meshes.chunks.len(),
        empty,
        meshes.t_sample_ms,
        meshes.t_march_ms
    );
    Ok(())
}

fn watch_loop(cli: &Cli, path: &Path) -> Result<(), Box<dyn Error>> {
    let (_watcher, rx) = watchers::watch_file(path)?;
    log::info!("watching {} for changes", path.display());
    while watchers::wait_for_change(&rx) {
        log::info!("config changed; regenerating");
        // A broken edit keeps the loop alive until the next save.
        match load(cli) {
            Ok(cfg) => {
                if let Err(e) = generate(&cfg) {
                    log::error!("generation failed: {}", e);
                }
            }
            Err(e) => log::error!("config reload failed: {}", e),
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let cfg = load(&cli)?;
    if cli.print_config {
        print!("{}", toml::to_string(&cfg)?);
        return Ok(());
    }
    generate(&cfg)?;

    if cli.watch {
        if let Some(path) = cli.config.as_deref() {
            watch_loop(&cli, path)?;
        }
    }
    Ok(())
}
