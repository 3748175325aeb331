#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Idle Tower.

mod bullet;
mod enemy;
mod entity;
mod player;

use idle_tower_core::{ArenaConfig, BulletId, Command, EnemyId, Event, WELCOME_BANNER};

use crate::{enemy::Enemy, player::Player};

/// Represents the authoritative Idle Tower world state.
///
/// The world owns the player (which in turn owns its bullets) and the active
/// enemy set. It never performs side effects; sounds and deaths leave the
/// world as [`Event`] values.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    arena: ArenaConfig,
    player: Player,
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
    next_bullet_id: BulletId,
    tick_index: u64,
}

impl World {
    /// Creates a new world with the player placed on the arena's centre tile.
    #[must_use]
    pub fn new(arena: ArenaConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            player: Player::spawn(&arena),
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            next_bullet_id: BulletId::new(0),
            tick_index: 0,
            arena,
        }
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = id.next();
        id
    }

    fn fire_at(&mut self, target: EnemyId, out_events: &mut Vec<Event>) {
        if !self.player.state.is_alive() {
            return;
        }

        let Some(enemy) = self.enemies.iter().find(|enemy| enemy.id == target) else {
            return;
        };

        let bullet = self.next_bullet_id;
        if player::shoot(&mut self.player, enemy, bullet) {
            self.next_bullet_id = bullet.next();
            tracing::debug!(bullet = bullet.get(), enemy = target.get(), "bullet fired");
            out_events.push(Event::BulletFired { bullet, target });
        }
    }

    fn update_enemies(&mut self, out_events: &mut Vec<Event>) {
        let player = &mut self.player.state;
        self.enemies.retain_mut(|enemy| {
            enemy::step(enemy, player, out_events);
            if enemy.state.is_alive() {
                return true;
            }
            tracing::info!(enemy = enemy.id.get(), "enemy removed");
            out_events.push(Event::EnemyReaped { enemy: enemy.id });
            false
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            player::update(&mut world.player, &mut world.enemies, out_events);
            world.update_enemies(out_events);
        }
        Command::SpawnEnemy { position } => {
            let id = world.allocate_enemy_id();
            world.enemies.push(Enemy::spawn(id, position, &world.arena));
            tracing::info!(
                enemy = id.get(),
                x = position.x(),
                y = position.y(),
                "enemy spawned"
            );
            out_events.push(Event::EnemySpawned {
                enemy: id,
                position,
            });
        }
        Command::FireAt { enemy } => world.fire_at(enemy, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use idle_tower_core::{
        ArenaConfig, BulletId, EnemyId, EnemySnapshot, EnemyView, Hitbox, Position,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the arena configuration.
    #[must_use]
    pub fn arena(world: &World) -> &ArenaConfig {
        &world.arena
    }

    /// Number of ticks applied since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let state = &world.player.state;
        PlayerSnapshot {
            position: state.position,
            width: state.width,
            height: state.height,
            hitbox: state.hitbox,
            health: state.health,
            damage: state.damage,
            attack_radius: world.player.attack_radius,
            cooldown_counter: state.cooldown.counter(),
            cooldown: state.cooldown.cooldown(),
        }
    }

    /// Reports whether the player is still alive.
    #[must_use]
    pub fn player_alive(world: &World) -> bool {
        world.player.state.is_alive()
    }

    /// Captures a read-only view of the enemies inhabiting the arena.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.state.position,
                    hitbox: enemy.state.hitbox,
                    health: enemy.state.health,
                    moving: enemy.moving,
                })
                .collect(),
        )
    }

    /// Number of enemies currently in the active set.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures the player's in-flight bullets in creation order.
    #[must_use]
    pub fn bullets(world: &World) -> Vec<BulletSnapshot> {
        let width = world.arena.width() as f32;
        let height = world.arena.height() as f32;
        world
            .player
            .bullets
            .iter()
            .map(|bullet| BulletSnapshot {
                id: bullet.id,
                target_enemy: bullet.target_enemy,
                target: bullet.target,
                position: bullet.position,
                hitbox: bullet.hitbox,
                visible: bullet.visible,
                out_of_bounds: bullet.is_out_of_bounds(width, height),
            })
            .collect()
    }

    /// Immutable representation of the player used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Top-left corner of the player's sprite.
        pub position: Position,
        /// Sprite width in pixels.
        pub width: f32,
        /// Sprite height in pixels.
        pub height: f32,
        /// Current collision rectangle.
        pub hitbox: Hitbox,
        /// Remaining health.
        pub health: f32,
        /// Damage dealt per bullet.
        pub damage: f32,
        /// Maximum distance at which enemies are engaged.
        pub attack_radius: f32,
        /// Ticks elapsed since the last shot.
        pub cooldown_counter: u32,
        /// Ticks required between shots.
        pub cooldown: u32,
    }

    /// Immutable representation of a single bullet used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct BulletSnapshot {
        /// Identifier allocated to the bullet.
        pub id: BulletId,
        /// Enemy the bullet was fired at.
        pub target_enemy: EnemyId,
        /// Fixed aim point captured when the bullet was fired.
        pub target: Position,
        /// Current position of the bullet.
        pub position: Position,
        /// Current collision rectangle.
        pub hitbox: Hitbox,
        /// Whether the bullet should be drawn this frame.
        pub visible: bool,
        /// Whether the bullet left the arena bounds.
        pub out_of_bounds: bool,
    }
}
