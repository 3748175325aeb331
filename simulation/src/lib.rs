#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep loop that drives the Idle Tower world.
//!
//! [`Simulation::advance`] is fed elapsed wall time (or synthetic time in
//! headless runs and tests) and decides how many ticks to run, when to spawn
//! and when the game is over. Side effects leave the simulation as [`Event`]
//! values for adapters to act on.

mod fps;
mod latch;

use std::time::Duration;

use idle_tower_core::{ArenaConfig, Command, Event, MusicTrack};
use idle_tower_system_spawning::{Config as SpawningConfig, Spawning};
use idle_tower_system_targeting::Targeting;
use idle_tower_world::{self as world, query, World};
use rand::Rng;

use crate::fps::FpsWindow;
pub use crate::latch::GameOverLatch;

/// Default number of ticks a single advance may run to catch up after a stall.
pub const DEFAULT_MAX_TICKS_PER_ADVANCE: u32 = 5;

/// Tunables for the fixed-timestep loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopOptions {
    /// Upper bound on ticks run by one [`Simulation::advance`] call.
    ///
    /// A value of `1` lets simulated time drift behind wall time under load;
    /// larger values drain the backlog up to the cap. Backlog beyond the cap
    /// is discarded.
    pub max_ticks_per_advance: u32,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_ticks_per_advance: DEFAULT_MAX_TICKS_PER_ADVANCE,
        }
    }
}

/// Summary of what a single [`Simulation::advance`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Number of world ticks executed.
    pub ticks_run: u32,
    /// Number of enemies spawned by the spawn timer.
    pub enemies_spawned: u32,
    /// Ticks per second, published when the one-second window closed.
    pub fps_published: Option<u32>,
    /// Whether this call flipped the game-over latch.
    pub game_over_triggered: bool,
}

/// Owns the world together with the systems and timers that drive it.
#[derive(Debug)]
pub struct Simulation<R> {
    world: World,
    targeting: Targeting,
    spawning: Spawning,
    rng: R,
    options: LoopOptions,
    tick_duration: Duration,
    backlog: Duration,
    fps: FpsWindow,
    latch: GameOverLatch,
    commands: Vec<Command>,
}

impl<R> Simulation<R>
where
    R: Rng,
{
    /// Starts a fresh game: requests the background music and spawns the
    /// first enemy immediately.
    pub fn new(arena: ArenaConfig, options: LoopOptions, rng: R, out_events: &mut Vec<Event>) -> Self {
        let mut simulation = Self::from_world(World::new(arena), options, rng);
        out_events.push(Event::MusicRequested {
            track: MusicTrack::GameLoop,
        });

        let arena = query::arena(&simulation.world).clone();
        Spawning::spawn_now(&arena, &mut simulation.rng, &mut simulation.commands);
        simulation.flush_commands(out_events);
        simulation
    }

    /// Wraps an existing world without emitting any start-up effects.
    pub fn from_world(world: World, options: LoopOptions, rng: R) -> Self {
        let arena = query::arena(&world);
        let tick_duration = arena.tick_duration();
        let spawning = Spawning::new(SpawningConfig::new(arena.enemy_spawn_interval()));
        Self {
            world,
            targeting: Targeting::new(),
            spawning,
            rng,
            options,
            tick_duration,
            backlog: Duration::ZERO,
            fps: FpsWindow::default(),
            latch: GameOverLatch::new(),
            commands: Vec::new(),
        }
    }

    /// Feeds `elapsed` wall time into the loop.
    ///
    /// Runs every owed tick up to [`LoopOptions::max_ticks_per_advance`],
    /// then lets the spawn timer fire at most once. Does nothing once the
    /// game is over.
    pub fn advance(&mut self, elapsed: Duration, out_events: &mut Vec<Event>) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        if self.latch.is_set() {
            return report;
        }

        self.backlog = self.backlog.saturating_add(elapsed);
        let cap = self.options.max_ticks_per_advance.max(1);
        while self.backlog >= self.tick_duration && report.ticks_run < cap {
            self.backlog -= self.tick_duration;
            report.ticks_run += 1;
            if self.tick(out_events) {
                report.game_over_triggered = true;
                break;
            }
        }
        self.backlog = self.backlog.min(self.tick_duration * cap);

        report.fps_published = self.fps.record(elapsed, report.ticks_run);
        if let Some(fps) = report.fps_published {
            tracing::debug!(fps, "fps window closed");
        }

        if !self.latch.is_set() {
            let before = self.commands.len();
            let arena = query::arena(&self.world).clone();
            self.spawning
                .handle(elapsed, &arena, &mut self.rng, &mut self.commands);
            report.enemies_spawned = (self.commands.len() - before) as u32;
            self.flush_commands(out_events);
        }

        report
    }

    /// Runs exactly one world tick, returning whether it ended the game.
    ///
    /// The player aims and shoots first, then bullets and enemies are
    /// stepped by the world.
    pub fn tick(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.latch.is_set() {
            return false;
        }
        if !query::player_alive(&self.world) {
            return self.trigger_game_over(out_events);
        }

        let shooter = query::player(&self.world).position;
        let enemies = query::enemy_view(&self.world);
        self.targeting.handle(shooter, &enemies, &mut self.commands);
        self.commands.push(Command::Tick);
        self.flush_commands(out_events);

        if query::player_alive(&self.world) {
            return false;
        }
        self.trigger_game_over(out_events)
    }

    /// Flips the game-over latch, returning `true` only the first time.
    pub fn trigger_game_over(&mut self, out_events: &mut Vec<Event>) -> bool {
        self.latch.trigger(out_events)
    }

    /// Read-only access to the simulated world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Reports whether the game-over latch is set.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.latch.is_set()
    }

    /// Ticks counted during the last complete one-second window.
    #[must_use]
    pub fn current_fps(&self) -> u32 {
        self.fps.current()
    }

    /// Wall time owed to the world but not yet simulated.
    #[must_use]
    pub fn backlog(&self) -> Duration {
        self.backlog
    }

    fn flush_commands(&mut self, out_events: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, out_events);
        }
    }
}
