#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for emitting enemy spawn commands.
//!
//! Spawns are driven by wall-clock time, independently of the fixed-timestep
//! update. Randomness is injected by the caller so replays stay reproducible.

use std::time::Duration;

use idle_tower_core::{ArenaConfig, Command, Position};
use rand::Rng;

/// Distance kept between a fresh enemy and the screen edge it enters from.
const SPAWN_MARGIN: f32 = 8.0;

/// Screen edge an enemy enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Above the visible area.
    Top,
    /// Right of the visible area.
    Right,
    /// Below the visible area.
    Bottom,
    /// Left of the visible area.
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence.
    #[must_use]
    pub const fn new(spawn_interval: Duration) -> Self {
        Self { spawn_interval }
    }
}

/// System that emits one spawn command each time the spawn interval elapses.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    accumulator: Duration,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Accumulates `elapsed` wall time and emits at most one spawn.
    ///
    /// The timer restarts from zero after a spawn, so a long stall yields a
    /// single enemy instead of a backlog.
    pub fn handle<R>(
        &mut self,
        elapsed: Duration,
        arena: &ArenaConfig,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        if self.spawn_interval.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        if self.accumulator < self.spawn_interval {
            return;
        }

        self.accumulator = Duration::ZERO;
        Self::spawn_now(arena, rng, out);
    }

    /// Emits a spawn command immediately, without touching the timer.
    pub fn spawn_now<R>(arena: &ArenaConfig, rng: &mut R, out: &mut Vec<Command>)
    where
        R: Rng + ?Sized,
    {
        let (_, position) = edge_spawn_position(arena, rng);
        out.push(Command::SpawnEnemy { position });
    }

    /// Wall time accumulated toward the next spawn.
    #[must_use]
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }
}

/// Picks a uniformly random edge and a position just beyond it.
///
/// The coordinate along the edge is a whole pixel drawn uniformly from the
/// screen extent; the coordinate across it lies strictly outside the screen.
pub fn edge_spawn_position<R>(arena: &ArenaConfig, rng: &mut R) -> (Edge, Position)
where
    R: Rng + ?Sized,
{
    let width = arena.width();
    let height = arena.height();
    let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];

    let position = match edge {
        Edge::Top => Position::new(random_along(width, rng), -SPAWN_MARGIN),
        Edge::Right => Position::new(width as f32 + SPAWN_MARGIN, random_along(height, rng)),
        Edge::Bottom => Position::new(random_along(width, rng), height as f32 + SPAWN_MARGIN),
        Edge::Left => Position::new(-SPAWN_MARGIN, random_along(height, rng)),
    };

    (edge, position)
}

fn random_along<R>(extent: u32, rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    if extent == 0 {
        return 0.0;
    }
    rng.gen_range(0..extent) as f32
}
