//! Run settings merged from the optional TOML file and the command line.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use idle_tower_core::ArenaConfig;
use idle_tower_rendering_macroquad::DEFAULT_MANIFEST_PATH;
use idle_tower_simulation::{LoopOptions, DEFAULT_MAX_TICKS_PER_ADVANCE};
use serde::Deserialize;

/// Map loaded when neither the file nor the command line names one.
const DEFAULT_MAP_PATH: &str = "assets/maps/map01.txt";
/// Ticks simulated by a headless run without `--ticks`.
const DEFAULT_HEADLESS_TICKS: u64 = 600;

/// Command-line arguments accepted by the `idle-tower` binary.
#[derive(Debug, Parser)]
#[command(name = "idle-tower")]
#[command(about = "Stationary tower defence against endless enemies")]
pub(crate) struct Args {
    /// TOML file holding `[arena]` and `[run]` tables.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Seed for enemy spawn placement; random when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Run without a window against synthetic time.
    #[arg(long)]
    pub(crate) headless: bool,
    /// Number of ticks a headless run simulates.
    #[arg(long, value_name = "N")]
    pub(crate) ticks: Option<u64>,
    /// Maximum ticks run per frame to catch up after a stall.
    #[arg(long, value_name = "N")]
    pub(crate) catch_up: Option<u32>,
    /// Draw the simulation rate in the window.
    #[arg(long)]
    pub(crate) show_fps: bool,
    /// Skip loading sprite textures.
    #[arg(long)]
    pub(crate) no_sprites: bool,
    /// Tile map to draw behind the arena.
    #[arg(long, value_name = "PATH")]
    pub(crate) map: Option<PathBuf>,
    /// Sprite manifest listing the textures to load.
    #[arg(long, value_name = "PATH")]
    pub(crate) manifest: Option<PathBuf>,
    /// Synchronise frames with the display; the platform default applies when omitted.
    #[arg(long, value_name = "BOOL")]
    pub(crate) vsync: Option<bool>,
}

/// Shape of the optional settings file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileSettings {
    pub(crate) arena: ArenaConfig,
    pub(crate) run: RunSection,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunSection {
    pub(crate) seed: Option<u64>,
    pub(crate) ticks: Option<u64>,
    pub(crate) catch_up: Option<u32>,
    pub(crate) show_fps: Option<bool>,
    pub(crate) sprites: Option<bool>,
    pub(crate) map: Option<PathBuf>,
    pub(crate) manifest: Option<PathBuf>,
    pub(crate) vsync: Option<bool>,
}

impl FileSettings {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }
}

/// Fully resolved options for a single run.
#[derive(Debug, PartialEq)]
pub(crate) struct RunSettings {
    pub(crate) arena: ArenaConfig,
    pub(crate) loop_options: LoopOptions,
    pub(crate) seed: Option<u64>,
    pub(crate) headless: bool,
    pub(crate) ticks: u64,
    pub(crate) show_fps: bool,
    pub(crate) sprites: bool,
    pub(crate) map: PathBuf,
    pub(crate) manifest: PathBuf,
    pub(crate) vsync: Option<bool>,
}

impl RunSettings {
    /// Reads the settings file named by `args`, if any, and applies the flags on top.
    pub(crate) fn resolve(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        let settings = Self::merge(file, args);
        settings
            .arena
            .validate()
            .context("invalid arena configuration")?;
        Ok(settings)
    }

    /// Flags win over file values, which win over defaults.
    pub(crate) fn merge(file: FileSettings, args: Args) -> Self {
        let FileSettings { arena, run } = file;
        let max_ticks_per_advance = args
            .catch_up
            .or(run.catch_up)
            .unwrap_or(DEFAULT_MAX_TICKS_PER_ADVANCE);

        Self {
            arena,
            loop_options: LoopOptions {
                max_ticks_per_advance,
            },
            seed: args.seed.or(run.seed),
            headless: args.headless,
            ticks: args.ticks.or(run.ticks).unwrap_or(DEFAULT_HEADLESS_TICKS),
            show_fps: args.show_fps || run.show_fps.unwrap_or(false),
            sprites: !args.no_sprites && run.sprites.unwrap_or(true),
            map: args
                .map
                .or(run.map)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MAP_PATH)),
            manifest: args
                .manifest
                .or(run.manifest)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_PATH)),
            vsync: args.vsync.or(run.vsync),
        }
    }
}
