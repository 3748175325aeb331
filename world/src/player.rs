//! Stationary shooter at the centre of the arena.

use idle_tower_core::{ArenaConfig, BulletId, Cooldown, EnemyId, Event, Hitbox, Position};

use crate::{
    bullet::{self, Bullet},
    enemy::Enemy,
    entity::EntityState,
};

const PLAYER_HEALTH: f32 = 10.0;
const PLAYER_DAMAGE: f32 = 2.0;
const PLAYER_ATTACK_SPEED: f32 = 1.0;
const PLAYER_ATTACK_RADIUS: f32 = 100.0;

#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) state: EntityState,
    pub(crate) attack_radius: f32,
    /// In-flight bullets in creation order.
    pub(crate) bullets: Vec<Bullet>,
}

impl Player {
    /// Places the player on the centre tile of the arena.
    pub(crate) fn spawn(arena: &ArenaConfig) -> Self {
        let tile = arena.tile_size() as f32;
        let position = Position::new(
            (arena.width() / 2) as f32 - tile / 2.0,
            (arena.height() / 2) as f32 - tile / 2.0,
        );
        Self {
            state: EntityState {
                position,
                width: tile,
                height: tile,
                speed: 0.0,
                health: PLAYER_HEALTH,
                damage: PLAYER_DAMAGE,
                cooldown: Cooldown::from_attack_speed(PLAYER_ATTACK_SPEED, arena.tick_rate),
                hitbox: Hitbox::at(position, tile, tile),
            },
            attack_radius: PLAYER_ATTACK_RADIUS,
            bullets: Vec::new(),
        }
    }

    /// Centre of the player's sprite, where bullets are launched from.
    pub(crate) fn center(&self) -> Position {
        self.state
            .position
            .offset(self.state.width / 2.0, self.state.height / 2.0)
    }

    pub(crate) fn is_within_attack_radius(&self, enemy: &Enemy) -> bool {
        self.state.position.distance_to(enemy.state.position) <= self.attack_radius
    }

    /// Minimum number of hits still required to kill an enemy with `health`.
    pub(crate) fn bullets_needed(&self, health: f32) -> usize {
        if self.state.damage <= 0.0 || health <= 0.0 {
            return 0;
        }
        (health / self.state.damage).ceil() as usize
    }

    fn bullets_in_flight_at(&self, enemy: EnemyId) -> usize {
        self.bullets
            .iter()
            .filter(|bullet| !bullet.removed && bullet.target_enemy == enemy)
            .count()
    }
}

/// Attempts to fire at `enemy`, returning whether a bullet was created.
///
/// Passing the cooldown and radius gates always consumes the cooldown, even
/// when enough bullets are already in flight to finish the enemy off.
pub(crate) fn shoot(player: &mut Player, enemy: &Enemy, bullet_id: BulletId) -> bool {
    if !player.state.cooldown.ready() || !player.is_within_attack_radius(enemy) {
        return false;
    }

    let needed = player.bullets_needed(enemy.state.health);
    let fired = player.bullets_in_flight_at(enemy.id) < needed;
    if fired {
        let bullet = Bullet::new(bullet_id, player.center(), enemy.id, enemy.center());
        player.bullets.push(bullet);
    }
    player.state.cooldown.reset();
    fired
}

/// Steps every bullet, reaps the spent ones and charges the cooldown.
pub(crate) fn update(player: &mut Player, enemies: &mut [Enemy], out_events: &mut Vec<Event>) {
    if !player.state.is_alive() {
        return;
    }

    let shooter = player.state.hitbox;
    let damage = player.state.damage;
    player.bullets.retain_mut(|bullet| {
        bullet::step(bullet, &shooter, damage, enemies, out_events);
        if bullet.removed {
            tracing::debug!(bullet = bullet.id.get(), "bullet removed");
            out_events.push(Event::BulletReaped { bullet: bullet.id });
            false
        } else {
            true
        }
    });

    player.state.cooldown.advance();
}
