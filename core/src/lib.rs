#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Idle Tower engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems inspect immutable
//! [`EnemyView`] snapshots and respond with [`Command`] values, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values describing what happened. Side effects such as sound
//! playback are never performed by the world itself; they travel outward as
//! events for adapters to act upon.

mod config;

use serde::{Deserialize, Serialize};

pub use config::{ArenaConfig, ConfigError};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Idle Tower";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the world by exactly one simulation tick.
    Tick,
    /// Requests that a new enemy enter the arena at the provided position.
    SpawnEnemy {
        /// Top-left corner of the enemy's sprite in world pixels.
        position: Position,
    },
    /// Requests that the player attempt to shoot at the provided enemy.
    ///
    /// The world decides whether the shot is taken: cooldown, attack radius
    /// and the bullets-needed throttle all gate the request.
    FireAt {
        /// Enemy the player should aim at.
        enemy: EnemyId,
    },
}

/// Events broadcast by the world and the simulation loop.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that an enemy was placed into the arena.
    EnemySpawned {
        /// Identifier allocated to the enemy.
        enemy: EnemyId,
        /// Position the enemy occupies after spawning.
        position: Position,
    },
    /// Reports that a dead enemy was removed from the active set.
    EnemyReaped {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
    },
    /// Confirms that the player fired a bullet.
    BulletFired {
        /// Identifier allocated to the bullet.
        bullet: BulletId,
        /// Enemy the bullet was fired at.
        target: EnemyId,
    },
    /// Reports that a bullet connected with its target.
    BulletHit {
        /// Identifier of the bullet that connected.
        bullet: BulletId,
        /// Enemy that received the damage.
        enemy: EnemyId,
        /// Enemy health after the damage was applied.
        remaining_health: f32,
    },
    /// Reports that a bullet was removed from the player's collection.
    BulletReaped {
        /// Identifier of the removed bullet.
        bullet: BulletId,
    },
    /// Reports that an enemy landed an attack on the player.
    PlayerDamaged {
        /// Enemy responsible for the attack.
        enemy: EnemyId,
        /// Player health after the attack.
        remaining_health: f32,
    },
    /// Reports that the player's health dropped to zero or below.
    PlayerDied,
    /// Signals the one-way transition into the game-over state.
    GameOver,
    /// Requests playback of a one-shot sound effect.
    SoundRequested {
        /// Effect that should be played.
        sound: SoundEffect,
    },
    /// Requests that a background track starts looping.
    MusicRequested {
        /// Track that should be played.
        track: MusicTrack,
    },
    /// Requests that the background track stops.
    MusicStopRequested,
}

/// One-shot sound effects requested by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Played when an enemy hits a player that survives the blow.
    EnemyAttack,
    /// Played once when the game ends.
    Death,
}

impl SoundEffect {
    /// Asset path of the clip, relative to the asset root.
    #[must_use]
    pub const fn asset_path(self) -> &'static str {
        match self {
            Self::EnemyAttack => "music/soundEffects/enemyAttack.wav",
            Self::Death => "music/soundEffects/dead.wav",
        }
    }

    /// Gain applied to the clip, in decibels.
    #[must_use]
    pub const fn volume_db(self) -> f32 {
        match self {
            Self::EnemyAttack => 0.0,
            Self::Death => -10.0,
        }
    }
}

/// Looping background tracks requested by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    /// Track played while the game is running.
    GameLoop,
}

impl MusicTrack {
    /// Asset path of the track, relative to the asset root.
    #[must_use]
    pub const fn asset_path(self) -> &'static str {
        match self {
            Self::GameLoop => "music/gameloop/stranger-things.wav",
        }
    }

    /// Gain applied to the track, in decibels.
    #[must_use]
    pub const fn volume_db(self) -> f32 {
        match self {
            Self::GameLoop => -10.0,
        }
    }
}

/// Unique identifier assigned to an enemy.
///
/// Identifiers are allocated monotonically and never reused, so a handle held
/// after its enemy was reaped simply fails to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u64);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Identifier allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Unique identifier assigned to a bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BulletId(u64);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Identifier allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Continuous position in world pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns the position shifted by the provided offsets.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Moves toward `target` by at most `speed` along the unit direction.
    ///
    /// A zero distance leaves the position untouched. When the target is
    /// closer than `speed` the position lands exactly on it, so repeated
    /// steps settle instead of oscillating around the target.
    #[must_use]
    pub fn step_toward(self, target: Position, speed: f32) -> Self {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance <= 0.0 {
            return self;
        }

        if distance <= speed {
            return target;
        }

        Self::new(
            self.x + dx / distance * speed,
            self.y + dy / distance * speed,
        )
    }
}

/// Axis-aligned rectangle in whole pixels used for collision tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hitbox {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Hitbox {
    /// Creates a new hitbox from integer pixel coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a hitbox anchored at a continuous position.
    ///
    /// Coordinates and dimensions are truncated toward zero.
    #[must_use]
    pub fn at(origin: Position, width: f32, height: f32) -> Self {
        Self::new(
            origin.x() as i32,
            origin.y() as i32,
            width as i32,
            height as i32,
        )
    }

    /// Left edge of the rectangle.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge of the rectangle.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Width of the rectangle.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the rectangle.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether two hitboxes overlap. See [`intersects`].
    #[must_use]
    pub fn intersects(&self, other: &Hitbox) -> bool {
        intersects(self, other)
    }
}

/// Axis-aligned overlap test.
///
/// Edges are open: rectangles that merely touch do not intersect, and a
/// rectangle with a non-positive extent intersects nothing.
#[must_use]
pub fn intersects(a: &Hitbox, b: &Hitbox) -> bool {
    if a.width <= 0 || a.height <= 0 || b.width <= 0 || b.height <= 0 {
        return false;
    }

    let a_right = i64::from(a.x) + i64::from(a.width);
    let a_bottom = i64::from(a.y) + i64::from(a.height);
    let b_right = i64::from(b.x) + i64::from(b.width);
    let b_bottom = i64::from(b.y) + i64::from(b.height);

    i64::from(a.x) < b_right
        && i64::from(b.x) < a_right
        && i64::from(a.y) < b_bottom
        && i64::from(b.y) < a_bottom
}

/// Cooldown/counter pair gating attacks.
///
/// An attack is eligible when `counter >= cooldown`. Attacking resets the
/// counter to zero, and the counter grows by one every tick without a cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    cooldown: u32,
    counter: u32,
}

impl Cooldown {
    /// Creates a cooldown of `attack_speed × tick_rate` ticks, already charged.
    #[must_use]
    pub fn from_attack_speed(attack_speed: f32, tick_rate: u32) -> Self {
        let ticks = (attack_speed * tick_rate as f32).max(0.0) as u32;
        Self {
            cooldown: ticks,
            counter: ticks,
        }
    }

    /// Number of ticks required between attacks.
    #[must_use]
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Ticks elapsed since the last attack.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Reports whether an attack may be performed this tick.
    #[must_use]
    pub const fn ready(&self) -> bool {
        self.counter >= self.cooldown
    }

    /// Marks an attack as performed.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Records the passage of a single tick.
    pub fn advance(&mut self) {
        self.counter = self.counter.saturating_add(1);
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Top-left corner of the enemy's sprite.
    pub position: Position,
    /// Current collision rectangle.
    pub hitbox: Hitbox,
    /// Remaining health; the enemy is alive while this is positive.
    pub health: f32,
    /// Whether the enemy is still walking toward the player.
    pub moving: bool,
}

impl EnemySnapshot {
    /// Reports whether the enemy is alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Read-only snapshot describing all enemies within the arena.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    ///
    /// Snapshots are ordered by identifier, which matches spawn order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_rectangles_never_intersect() {
        let a = Hitbox::new(0, 0, 10, 10);
        let b = Hitbox::new(20, 20, 10, 10);
        assert!(!intersects(&a, &b));
        assert!(!intersects(&b, &a));
    }

    #[test]
    fn identical_rectangles_intersect() {
        let a = Hitbox::new(3, -4, 7, 9);
        assert!(intersects(&a, &a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Hitbox::new(0, 0, 10, 10);
        let right = Hitbox::new(10, 0, 10, 10);
        let below = Hitbox::new(0, 10, 10, 10);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(a.intersects(&Hitbox::new(9, 9, 10, 10)));
    }

    #[test]
    fn intersection_is_symmetric() {
        let boxes = [
            Hitbox::new(0, 0, 10, 10),
            Hitbox::new(5, 5, 2, 2),
            Hitbox::new(-3, 8, 4, 4),
            Hitbox::new(9, -1, 1, 30),
            Hitbox::new(12, 12, 0, 5),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(intersects(a, b), intersects(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn empty_rectangles_intersect_nothing() {
        let empty = Hitbox::new(1, 1, 0, 4);
        assert!(!empty.intersects(&Hitbox::new(0, 0, 10, 10)));
        assert!(!empty.intersects(&empty));
    }

    #[test]
    fn hitbox_truncates_toward_zero() {
        let hitbox = Hitbox::at(Position::new(-7.5, 3.9), 2.0, 2.0);
        assert_eq!(hitbox, Hitbox::new(-7, 3, 2, 2));
    }

    #[test]
    fn step_toward_guards_zero_distance() {
        let here = Position::new(4.0, 4.0);
        assert_eq!(here.step_toward(here, 5.0), here);
    }

    #[test]
    fn step_toward_moves_by_speed_along_direction() {
        let moved = Position::new(0.0, 0.0).step_toward(Position::new(30.0, 40.0), 5.0);
        assert!((moved.x() - 3.0).abs() < 1e-5);
        assert!((moved.y() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn step_toward_settles_on_close_target() {
        let target = Position::new(2.0, 0.0);
        let moved = Position::new(0.0, 0.0).step_toward(target, 5.0);
        assert_eq!(moved, target);
        assert_eq!(moved.step_toward(target, 5.0), target);
    }

    #[test]
    fn cooldown_starts_ready_and_counts_without_clamp() {
        let mut cooldown = Cooldown::from_attack_speed(1.0, 60);
        assert_eq!(cooldown.cooldown(), 60);
        assert!(cooldown.ready());

        cooldown.reset();
        assert!(!cooldown.ready());
        for _ in 0..59 {
            cooldown.advance();
        }
        assert!(!cooldown.ready());
        cooldown.advance();
        assert!(cooldown.ready());

        for _ in 0..500 {
            cooldown.advance();
        }
        assert_eq!(cooldown.counter(), 560);
    }

    #[test]
    fn identifiers_keep_counting_past_u32() {
        let enemy = EnemyId::new(u64::from(u32::MAX));
        assert_eq!(enemy.next().get(), u64::from(u32::MAX) + 1);
        assert_ne!(enemy.next(), EnemyId::new(0));

        let bullet = BulletId::new(u64::from(u32::MAX));
        assert!(bullet.next() > bullet);
    }

    #[test]
    fn enemy_view_orders_by_identifier() {
        let snapshot = |id| EnemySnapshot {
            id: EnemyId::new(id),
            position: Position::default(),
            hitbox: Hitbox::default(),
            health: 1.0,
            moving: true,
        };
        let view = EnemyView::from_snapshots(vec![snapshot(3), snapshot(1), snapshot(2)]);
        let ids: Vec<u64> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn sound_effects_carry_reference_volumes() {
        assert!((SoundEffect::EnemyAttack.volume_db() - 0.0).abs() < f32::EPSILON);
        assert!((SoundEffect::Death.volume_db() + 10.0).abs() < f32::EPSILON);
        assert!((MusicTrack::GameLoop.volume_db() + 10.0).abs() < f32::EPSILON);
    }
}
