use idle_tower_core::{ArenaConfig, Command, EnemyId, Event, Position};
use idle_tower_system_targeting::Targeting;
use idle_tower_world::{self as world, query, World};

#[test]
fn targets_follow_the_world_enemy_set() {
    let arena = ArenaConfig {
        columns: 11,
        rows: 11,
        ..ArenaConfig::default()
    };
    let mut world = World::new(arena);
    let mut events = Vec::new();
    for position in [Position::new(0.0, -8.0), Position::new(160.0, 80.0)] {
        world::apply(&mut world, Command::SpawnEnemy { position }, &mut events);
    }

    let targeting = Targeting::new();
    let shooter = query::player(&world).position;
    let mut commands = Vec::new();
    targeting.handle(shooter, &query::enemy_view(&world), &mut commands);
    assert_eq!(
        commands,
        vec![Command::FireAt {
            enemy: EnemyId::new(1)
        }]
    );

    let mut fired = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut fired);
    }
    assert!(matches!(
        fired.as_slice(),
        [Event::BulletFired { target, .. }] if *target == EnemyId::new(1)
    ));
}
