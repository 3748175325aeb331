//! Homing projectiles fired by the player.

use idle_tower_core::{BulletId, EnemyId, Event, Hitbox, Position};

use crate::enemy::Enemy;

const BULLET_SIZE: f32 = 2.0;
const BULLET_SPEED: f32 = 5.0;

/// Projectile travelling toward the point its target occupied when fired.
#[derive(Clone, Debug)]
pub(crate) struct Bullet {
    pub(crate) id: BulletId,
    /// Enemy the bullet damages on contact.
    pub(crate) target_enemy: EnemyId,
    /// Fixed aim point captured at firing time.
    pub(crate) target: Position,
    pub(crate) position: Position,
    pub(crate) hitbox: Hitbox,
    pub(crate) visible: bool,
    pub(crate) removed: bool,
}

impl Bullet {
    pub(crate) fn new(id: BulletId, origin: Position, target_enemy: EnemyId, target: Position) -> Self {
        Self {
            id,
            target_enemy,
            target,
            position: origin,
            hitbox: Hitbox::at(origin, BULLET_SIZE, BULLET_SIZE),
            visible: false,
            removed: false,
        }
    }

    /// Reports whether the bullet left the `[0, width] × [0, height]` area.
    pub(crate) fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        let (x, y) = (self.position.x(), self.position.y());
        x < 0.0 || x > width || y < 0.0 || y > height
    }
}

/// Advances a bullet by one tick and resolves contact with its target.
///
/// The visibility hint is derived from the hitbox before moving, matching the
/// frame that is about to be drawn. A target that no longer exists counts as
/// already dead: the bullet is discarded without dealing damage.
pub(crate) fn step(
    bullet: &mut Bullet,
    shooter: &Hitbox,
    damage: f32,
    enemies: &mut [Enemy],
    out_events: &mut Vec<Event>,
) {
    if bullet.removed {
        return;
    }

    bullet.visible = !bullet.hitbox.intersects(shooter);
    bullet.position = bullet.position.step_toward(bullet.target, BULLET_SPEED);
    bullet.hitbox = Hitbox::at(bullet.position, BULLET_SIZE, BULLET_SIZE);

    let Some(enemy) = enemies
        .iter_mut()
        .find(|enemy| enemy.id == bullet.target_enemy)
    else {
        tracing::debug!(bullet = bullet.id.get(), "target vanished, discarding bullet");
        bullet.removed = true;
        return;
    };

    if bullet.hitbox.intersects(&enemy.state.hitbox) {
        enemy.state.take_damage(damage);
        bullet.removed = true;
        tracing::debug!(
            bullet = bullet.id.get(),
            enemy = enemy.id.get(),
            health = enemy.state.health,
            "bullet hit"
        );
        out_events.push(Event::BulletHit {
            bullet: bullet.id,
            enemy: enemy.id,
            remaining_health: enemy.state.health,
        });
    }
}
