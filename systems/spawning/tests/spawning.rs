use std::time::Duration;

use idle_tower_core::{ArenaConfig, Command};
use idle_tower_system_spawning::{edge_spawn_position, Config, Edge, Spawning};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arena() -> ArenaConfig {
    ArenaConfig {
        columns: 11,
        rows: 11,
        ..ArenaConfig::default()
    }
}

#[test]
fn spawn_positions_lie_just_outside_the_screen() {
    let arena = arena();
    let width = arena.width() as f32;
    let height = arena.height() as f32;
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..10_000 {
        let (edge, position) = edge_spawn_position(&arena, &mut rng);
        let (x, y) = (position.x(), position.y());
        let x_inside = (0.0..width).contains(&x);
        let y_inside = (0.0..height).contains(&y);

        assert!(
            x_inside != y_inside,
            "exactly one axis must be on screen: {edge:?} at ({x}, {y})"
        );
        assert_eq!(x.fract(), 0.0);
        assert_eq!(y.fract(), 0.0);

        match edge {
            Edge::Top => assert_eq!(y, -8.0),
            Edge::Bottom => assert_eq!(y, height + 8.0),
            Edge::Left => assert_eq!(x, -8.0),
            Edge::Right => assert_eq!(x, width + 8.0),
        }
    }
}

#[test]
fn spawn_fires_once_per_interval() {
    let arena = arena();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut spawning = Spawning::new(Config::new(Duration::from_millis(1000)));
    let mut commands = Vec::new();

    for _ in 0..59 {
        spawning.handle(Duration::from_millis(16), &arena, &mut rng, &mut commands);
    }
    assert!(commands.is_empty(), "944ms is short of the interval");

    spawning.handle(Duration::from_millis(60), &arena, &mut rng, &mut commands);
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], Command::SpawnEnemy { .. }));
    assert_eq!(spawning.accumulated(), Duration::ZERO);
}

#[test]
fn long_stall_does_not_build_a_backlog() {
    let arena = arena();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut spawning = Spawning::new(Config::new(Duration::from_millis(1000)));
    let mut commands = Vec::new();

    spawning.handle(Duration::from_secs(10), &arena, &mut rng, &mut commands);
    assert_eq!(commands.len(), 1, "stall yields a single spawn");

    spawning.handle(Duration::from_millis(500), &arena, &mut rng, &mut commands);
    assert_eq!(commands.len(), 1, "timer restarted from zero");
}

#[test]
fn seeded_rngs_replay_identical_spawns() {
    let arena = arena();
    let mut first = ChaCha8Rng::seed_from_u64(42);
    let mut second = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..32 {
        assert_eq!(
            edge_spawn_position(&arena, &mut first),
            edge_spawn_position(&arena, &mut second)
        );
    }
}
