//! State shared by every combatant in the arena.

use idle_tower_core::{Cooldown, Hitbox, Position};

/// Plain data common to the player and enemies.
#[derive(Clone, Debug)]
pub(crate) struct EntityState {
    /// Top-left corner of the entity's sprite.
    pub(crate) position: Position,
    /// Hitbox width in pixels.
    pub(crate) width: f32,
    /// Hitbox height in pixels.
    pub(crate) height: f32,
    /// Distance covered per tick while moving.
    pub(crate) speed: f32,
    /// Remaining health; zero or below means dead.
    pub(crate) health: f32,
    /// Health removed from the target per successful attack.
    pub(crate) damage: f32,
    /// Attack gating expressed in ticks.
    pub(crate) cooldown: Cooldown,
    /// Collision rectangle, refreshed after every move.
    pub(crate) hitbox: Hitbox,
}

impl EntityState {
    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub(crate) fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_at_zero_counts_as_dead() {
        let mut state = EntityState {
            position: Position::default(),
            width: 1.0,
            height: 1.0,
            speed: 0.0,
            health: 4.0,
            damage: 0.0,
            cooldown: Cooldown::from_attack_speed(1.0, 60),
            hitbox: Hitbox::default(),
        };
        assert!(state.is_alive());
        state.take_damage(2.0);
        assert!(state.is_alive());
        state.take_damage(2.0);
        assert!(!state.is_alive());
    }
}
