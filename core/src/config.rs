//! Arena dimensions and timing fixed at process start.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Static description of the arena and the simulation rate.
///
/// Values mirror a 21×21 grid of 16-pixel tiles drawn at twice their
/// original size and simulated at 60 ticks per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Number of tile columns spanning the screen.
    pub columns: u32,
    /// Number of tile rows spanning the screen.
    pub rows: u32,
    /// Edge length of a tile before scaling, in pixels.
    pub original_tile_size: u32,
    /// Integer upscale applied to tiles and enemy hitboxes.
    pub scale: u32,
    /// Target number of simulation ticks per second.
    pub tick_rate: u32,
    /// Delay between two enemy spawns, in milliseconds.
    pub enemy_spawn_interval_ms: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            columns: 21,
            rows: 21,
            original_tile_size: 16,
            scale: 2,
            tick_rate: 60,
            enemy_spawn_interval_ms: 1_000,
        }
    }
}

impl ArenaConfig {
    /// Rejects configurations that would yield an empty arena or a stalled clock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyArena {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.original_tile_size == 0 || self.scale == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        let fits = self
            .original_tile_size
            .checked_mul(self.scale)
            .and_then(|tile| {
                let width = self.columns.checked_mul(tile)?;
                let height = self.rows.checked_mul(tile)?;
                let cells = self.columns.checked_mul(self.rows)?;
                Some((width, height, cells))
            })
            .is_some();
        if !fits {
            return Err(ConfigError::ArenaTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Edge length of a tile on screen, in pixels.
    ///
    /// Sizes are only guaranteed to fit in `u32` once [`Self::validate`] passes.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.original_tile_size * self.scale
    }

    /// Width of the arena in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.columns * self.tile_size()
    }

    /// Height of the arena in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.rows * self.tile_size()
    }

    /// Wall-clock duration of a single tick.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// Wall-clock delay between two enemy spawns.
    #[must_use]
    pub const fn enemy_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.enemy_spawn_interval_ms)
    }
}

/// Reasons an [`ArenaConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid has no columns or no rows.
    #[error("arena must have at least one column and one row (got {columns}x{rows})")]
    EmptyArena {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Tiles would be zero pixels wide.
    #[error("tile size and scale must be positive")]
    ZeroTileSize,
    /// The simulation would never tick.
    #[error("tick rate must be positive")]
    ZeroTickRate,
    /// Pixel or tile counts do not fit in `u32`.
    #[error("arena of {columns}x{rows} tiles is too large")]
    ArenaTooLarge {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arena_matches_reference_screen() {
        let arena = ArenaConfig::default();
        assert_eq!(arena.tile_size(), 32);
        assert_eq!(arena.width(), 672);
        assert_eq!(arena.height(), 672);
        assert!(arena.validate().is_ok());
    }

    #[test]
    fn tick_duration_divides_one_second() {
        let arena = ArenaConfig {
            tick_rate: 50,
            ..ArenaConfig::default()
        };
        assert_eq!(arena.tick_duration(), Duration::from_millis(20));
    }

    #[test]
    fn validation_rejects_degenerate_values() {
        let empty = ArenaConfig {
            columns: 0,
            ..ArenaConfig::default()
        };
        assert_eq!(
            empty.validate(),
            Err(ConfigError::EmptyArena {
                columns: 0,
                rows: 21
            })
        );

        let frozen = ArenaConfig {
            tick_rate: 0,
            ..ArenaConfig::default()
        };
        assert_eq!(frozen.validate(), Err(ConfigError::ZeroTickRate));

        let flat = ArenaConfig {
            scale: 0,
            ..ArenaConfig::default()
        };
        assert_eq!(flat.validate(), Err(ConfigError::ZeroTileSize));
    }

    #[test]
    fn validation_rejects_arenas_overflowing_pixel_sizes() {
        let wide = ArenaConfig {
            columns: 200_000_000,
            ..ArenaConfig::default()
        };
        assert_eq!(
            wide.validate(),
            Err(ConfigError::ArenaTooLarge {
                columns: 200_000_000,
                rows: 21
            })
        );

        let huge_tiles = ArenaConfig {
            original_tile_size: u32::MAX,
            ..ArenaConfig::default()
        };
        assert!(matches!(
            huge_tiles.validate(),
            Err(ConfigError::ArenaTooLarge { .. })
        ));

        let many_cells = ArenaConfig {
            columns: 70_000,
            rows: 70_000,
            original_tile_size: 1,
            scale: 1,
            ..ArenaConfig::default()
        };
        assert!(matches!(
            many_cells.validate(),
            Err(ConfigError::ArenaTooLarge { .. })
        ));

        let largest = ArenaConfig {
            columns: u32::MAX / 32,
            rows: 1,
            ..ArenaConfig::default()
        };
        assert!(largest.validate().is_ok());
        assert_eq!(largest.width(), (u32::MAX / 32) * 32);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let arena: ArenaConfig = toml::from_str("columns = 11\nrows = 11\n").expect("valid toml");
        assert_eq!(arena.columns, 11);
        assert_eq!(arena.tick_rate, 60);
        assert_eq!(arena.width(), 352);
    }
}
