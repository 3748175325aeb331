//! Window-less runs driven by synthetic time.

use std::fmt;

use idle_tower_rendering::audio::{self, AudioSink};
use idle_tower_simulation::Simulation;
use idle_tower_world::query;
use rand::Rng;

/// Outcome printed at the end of a headless run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct HeadlessSummary {
    pub(crate) ticks_run: u64,
    pub(crate) enemies_alive: usize,
    pub(crate) player_health: f32,
    pub(crate) game_over: bool,
}

impl fmt::Display for HeadlessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks={} enemies={} player_health={} game_over={}",
            self.ticks_run, self.enemies_alive, self.player_health, self.game_over
        )
    }
}

/// Advances the simulation one tick duration at a time until `ticks` ticks
/// have run or the game is over.
pub(crate) fn run<R, S>(simulation: &mut Simulation<R>, ticks: u64, sink: &mut S) -> HeadlessSummary
where
    R: Rng,
    S: AudioSink + ?Sized,
{
    let step = query::arena(simulation.world()).tick_duration();
    let mut events = Vec::new();
    let mut ticks_run = 0_u64;

    while ticks_run < ticks && !simulation.is_game_over() {
        events.clear();
        let report = simulation.advance(step, &mut events);
        audio::dispatch(&events, sink);
        ticks_run += u64::from(report.ticks_run);
        if report.ticks_run == 0 && !report.game_over_triggered {
            break;
        }
    }

    let world = simulation.world();
    HeadlessSummary {
        ticks_run,
        enemies_alive: query::enemy_count(world),
        player_health: query::player(world).health,
        game_over: simulation.is_game_over(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idle_tower_core::ArenaConfig;
    use idle_tower_rendering::audio::LoggingAudioSink;
    use idle_tower_simulation::LoopOptions;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn simulation(seed: u64) -> Simulation<ChaCha8Rng> {
        let mut events = Vec::new();
        Simulation::new(
            ArenaConfig::default(),
            LoopOptions::default(),
            ChaCha8Rng::seed_from_u64(seed),
            &mut events,
        )
    }

    #[test]
    fn runs_the_requested_number_of_ticks() {
        let mut simulation = simulation(4);
        let mut sink = LoggingAudioSink::new();
        let summary = run(&mut simulation, 120, &mut sink);

        assert_eq!(summary.ticks_run, 120);
        assert!(!summary.game_over);
        assert_eq!(summary.player_health, 10.0);
        assert!(summary.enemies_alive >= 1);
    }

    #[test]
    fn same_seed_replays_identically() {
        let mut sink = LoggingAudioSink::new();
        let first = run(&mut simulation(21), 900, &mut sink);
        let second = run(&mut simulation(21), 900, &mut sink);
        assert_eq!(first, second);
    }

    #[test]
    fn summary_is_a_single_line() {
        let summary = HeadlessSummary {
            ticks_run: 60,
            enemies_alive: 2,
            player_health: 9.0,
            game_over: false,
        };
        assert_eq!(
            summary.to_string(),
            "ticks=60 enemies=2 player_health=9 game_over=false"
        );
    }
}
