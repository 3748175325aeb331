//! Enemies that walk toward the player and attack on contact.

use idle_tower_core::{ArenaConfig, Cooldown, EnemyId, Event, Hitbox, Position, SoundEffect};

use crate::entity::EntityState;

const ENEMY_HEALTH: f32 = 4.0;
const ENEMY_SPEED: f32 = 2.0;
const ENEMY_DAMAGE: f32 = 1.0;
const ENEMY_ATTACK_SPEED: f32 = 1.0;
/// Hitbox edge before scaling.
const ENEMY_HITBOX_EDGE: f32 = 8.0;

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) state: EntityState,
    /// Cleared once the enemy touches the player, so it stops pushing into it.
    pub(crate) moving: bool,
    /// Edge length of the sprite the hitbox is centred in.
    tile_size: f32,
}

impl Enemy {
    pub(crate) fn spawn(id: EnemyId, position: Position, arena: &ArenaConfig) -> Self {
        let edge = ENEMY_HITBOX_EDGE * arena.scale as f32;
        let mut enemy = Self {
            id,
            state: EntityState {
                position,
                width: edge,
                height: edge,
                speed: ENEMY_SPEED,
                health: ENEMY_HEALTH,
                damage: ENEMY_DAMAGE,
                cooldown: Cooldown::from_attack_speed(ENEMY_ATTACK_SPEED, arena.tick_rate),
                hitbox: Hitbox::default(),
            },
            moving: true,
            tile_size: arena.tile_size() as f32,
        };
        enemy.refresh_hitbox();
        enemy
    }

    /// Centre of the enemy's sprite, used as the aim point for bullets.
    pub(crate) fn center(&self) -> Position {
        let half = self.tile_size / 2.0;
        self.state.position.offset(half, half)
    }

    fn refresh_hitbox(&mut self) {
        let inset = self.tile_size / 2.0;
        let origin = self.state.position.offset(
            inset - self.state.width / 2.0,
            inset - self.state.height / 2.0,
        );
        self.state.hitbox = Hitbox::at(origin, self.state.width, self.state.height);
    }
}

/// Advances an enemy by one tick against the player.
///
/// Dead enemies are frozen until reaped. The attack counter advances every
/// tick the enemy is alive, including the tick it attacked.
pub(crate) fn step(enemy: &mut Enemy, player: &mut EntityState, out_events: &mut Vec<Event>) {
    if !enemy.state.is_alive() {
        return;
    }

    if enemy.moving {
        enemy.state.position = enemy
            .state
            .position
            .step_toward(player.position, enemy.state.speed);
    }
    enemy.refresh_hitbox();

    if enemy.state.hitbox.intersects(&player.hitbox) {
        enemy.moving = false;
        attack(enemy, player, out_events);
    }

    enemy.state.cooldown.advance();
}

fn attack(enemy: &mut Enemy, player: &mut EntityState, out_events: &mut Vec<Event>) {
    if !enemy.state.cooldown.ready() {
        return;
    }

    let was_alive = player.is_alive();
    player.take_damage(enemy.state.damage);
    enemy.state.cooldown.reset();

    tracing::info!(enemy = enemy.id.get(), health = player.health, "player hit");
    out_events.push(Event::PlayerDamaged {
        enemy: enemy.id,
        remaining_health: player.health,
    });

    if player.is_alive() {
        out_events.push(Event::SoundRequested {
            sound: SoundEffect::EnemyAttack,
        });
    } else if was_alive {
        out_events.push(Event::PlayerDied);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(position: Position) -> EntityState {
        EntityState {
            position,
            width: 32.0,
            height: 32.0,
            speed: 0.0,
            health: 10.0,
            damage: 2.0,
            cooldown: Cooldown::from_attack_speed(1.0, 60),
            hitbox: Hitbox::at(position, 32.0, 32.0),
        }
    }

    #[test]
    fn spawn_uses_reference_stats() {
        let enemy = Enemy::spawn(EnemyId::new(0), Position::new(0.0, -8.0), &ArenaConfig::default());
        assert!((enemy.state.health - 4.0).abs() < f32::EPSILON);
        assert!((enemy.state.speed - 2.0).abs() < f32::EPSILON);
        assert_eq!(enemy.state.cooldown.cooldown(), 60);
        assert!(enemy.state.cooldown.ready());
        assert!(enemy.moving);
        assert_eq!(enemy.state.hitbox, Hitbox::new(8, 0, 16, 16));
        assert_eq!(enemy.center(), Position::new(16.0, 8.0));
    }

    #[test]
    fn enemy_walks_toward_player_and_stops_on_contact() {
        let mut player = player_at(Position::new(100.0, 0.0));
        let mut enemy = Enemy::spawn(EnemyId::new(0), Position::new(0.0, 0.0), &ArenaConfig::default());
        let mut events = Vec::new();

        step(&mut enemy, &mut player, &mut events);
        assert_eq!(enemy.state.position, Position::new(2.0, 0.0));
        assert!(enemy.moving);

        let mut ticks = 1;
        while enemy.moving {
            step(&mut enemy, &mut player, &mut events);
            ticks += 1;
            assert!(ticks < 100, "enemy never reached the player");
        }

        let resting = enemy.state.position;
        step(&mut enemy, &mut player, &mut events);
        assert_eq!(enemy.state.position, resting);
        assert!(enemy.state.hitbox.intersects(&player.hitbox));
    }

    #[test]
    fn contact_attacks_respect_cooldown() {
        let mut player = player_at(Position::new(10.0, 0.0));
        let mut enemy = Enemy::spawn(EnemyId::new(4), Position::new(0.0, 0.0), &ArenaConfig::default());
        let mut events = Vec::new();

        step(&mut enemy, &mut player, &mut events);
        assert!((player.health - 9.0).abs() < f32::EPSILON);
        assert_eq!(enemy.state.cooldown.counter(), 1);
        assert_eq!(
            events,
            vec![
                Event::PlayerDamaged {
                    enemy: EnemyId::new(4),
                    remaining_health: 9.0,
                },
                Event::SoundRequested {
                    sound: SoundEffect::EnemyAttack,
                },
            ]
        );

        let mut attack_ticks = vec![0];
        for tick in 1..200 {
            let before = player.health;
            step(&mut enemy, &mut player, &mut events);
            if player.health < before {
                attack_ticks.push(tick);
            }
        }
        assert_eq!(attack_ticks, vec![0, 60, 120, 180]);
    }

    #[test]
    fn killing_blow_reports_death_without_sound() {
        let mut player = player_at(Position::new(10.0, 0.0));
        player.health = 1.0;
        let mut enemy = Enemy::spawn(EnemyId::new(0), Position::new(0.0, 0.0), &ArenaConfig::default());
        let mut events = Vec::new();

        step(&mut enemy, &mut player, &mut events);

        assert!(!player.is_alive());
        assert!(events.contains(&Event::PlayerDied));
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::SoundRequested { .. })));
    }

    #[test]
    fn dead_enemies_are_frozen() {
        let mut player = player_at(Position::new(200.0, 200.0));
        let mut enemy = Enemy::spawn(EnemyId::new(0), Position::new(0.0, 0.0), &ArenaConfig::default());
        enemy.state.health = 0.0;
        let mut events = Vec::new();

        step(&mut enemy, &mut player, &mut events);

        assert_eq!(enemy.state.position, Position::new(0.0, 0.0));
        assert_eq!(enemy.state.cooldown.counter(), 60);
        assert!(events.is_empty());
    }
}
