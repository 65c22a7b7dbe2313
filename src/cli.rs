use std::path::PathBuf;

use clap::Parser;
use isostitch_world::IsostitchConfig;

/// Seamless chunked marching cubes over a density field.
#[derive(Debug, Parser)]
#[command(name = "isostitch", version, about)]
pub struct Cli {
    /// TOML file with `[map]` and `[field]` sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Voxels per chunk edge
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Isovalue separating inside from outside
    #[arg(long)]
    pub iso_level: Option<f32>,

    /// Chunk count along x, y, z
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"])]
    pub size: Option<Vec<u32>>,

    /// Seed for noise-backed fields
    #[arg(long)]
    pub seed: Option<i32>,

    /// Worker threads (0 = all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Regenerate whenever the config file changes
    #[arg(long, requires = "config")]
    pub watch: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Per-chunk logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Applies command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, mut cfg: IsostitchConfig) -> IsostitchConfig {
        if let Some(r) = self.resolution {
            cfg.map.resolution = r;
        }
        if let Some(iso) = self.iso_level {
            cfg.map.iso_level = iso;
        }
        if let Some(&[x, y, z]) = self.size.as_deref() {
            cfg.map.map_size = [x, y, z];
        }
        if let Some(seed) = self.seed {
            cfg.field = cfg.field.with_seed(seed);
        }
        if let Some(t) = self.threads {
            cfg.map.threads = t;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_loaded_values() {
        let cli = Cli::parse_from([
            "isostitch",
            "--resolution",
            "4",
            "--size",
            "3",
            "1",
            "2",
            "--seed",
            "99",
            "--iso-level",
            "0.25",
        ]);
        let cfg = cli.apply_overrides(IsostitchConfig::default());
        assert_eq!(cfg.map.resolution, 4);
        assert_eq!(cfg.map.map_size, [3, 1, 2]);
        assert_eq!(cfg.map.iso_level, 0.25);
        assert_eq!(
            cfg.field,
            isostitch_world::FieldConfig::PerlinProduct { seed: 99 }
        );
    }

    #[test]
    fn watch_needs_a_config_file() {
        assert!(Cli::try_parse_from(["isostitch", "--watch"]).is_err());
    }
}
