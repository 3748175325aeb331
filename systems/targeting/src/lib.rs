#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks the enemy the player should shoot at.

use idle_tower_core::{Command, EnemyId, EnemySnapshot, EnemyView, Position};

/// Targeting system that emits a firing request for the nearest enemy.
#[derive(Debug, Default)]
pub struct Targeting;

impl Targeting {
    /// Creates a new targeting system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `Command::FireAt` for the enemy nearest to `shooter`, if any.
    ///
    /// Whether the shot is actually taken is decided by the world.
    pub fn handle(&self, shooter: Position, enemies: &EnemyView, out: &mut Vec<Command>) {
        if enemies.is_empty() {
            return;
        }

        if let Some(enemy) = find_nearest_enemy(shooter, enemies.iter()) {
            out.push(Command::FireAt { enemy });
        }
    }
}

/// Linear scan for the living enemy closest to `origin`.
///
/// Distances compare with a strict `<`, so ties keep the earliest candidate
/// in iteration order.
pub fn find_nearest_enemy<'a, I>(origin: Position, enemies: I) -> Option<EnemyId>
where
    I: IntoIterator<Item = &'a EnemySnapshot>,
{
    let mut best: Option<(EnemyId, f32)> = None;

    for enemy in enemies {
        if !enemy.is_alive() {
            continue;
        }

        let distance = origin.distance_to(enemy.position);
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((enemy.id, distance)),
        }
    }

    best.map(|(id, _)| id)
}
