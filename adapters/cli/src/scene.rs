//! Copies world state into the owned scene handed to the renderer.

use std::{fs, path::Path};

use glam::Vec2;
use idle_tower_core::{ArenaConfig, Position};
use idle_tower_rendering::{
    tiles::{TileId, TileMap},
    BulletPresentation, EnemyPresentation, PlayerPresentation, RectPresentation, Scene,
    TileGridPresentation,
};
use idle_tower_simulation::Simulation;
use idle_tower_world::{query, World};
use rand::Rng;

/// Loads the background map, falling back to a uniform floor on any error.
pub(crate) fn load_tiles(path: &Path, arena: &ArenaConfig) -> TileGridPresentation {
    let map = match fs::read_to_string(path) {
        Ok(text) => TileMap::parse(&text, arena.rows, arena.columns).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "tile map rejected, using plain floor");
            TileMap::filled(arena.rows, arena.columns, TileId::default())
        }),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "tile map unreadable, using plain floor");
            TileMap::filled(arena.rows, arena.columns, TileId::default())
        }
    };
    TileGridPresentation::from_layout(&map, arena.tile_size() as f32)
}

/// Rebuilds every dynamic part of `scene`; the tile grid is left untouched.
pub(crate) fn refresh<R>(scene: &mut Scene, simulation: &Simulation<R>)
where
    R: Rng,
{
    let world = simulation.world();
    scene.game_over = simulation.is_game_over();
    scene.fps = Some(simulation.current_fps()).filter(|fps| *fps > 0);
    scene.player = player(world);
    scene.bullets = bullets(world);
    scene.enemies = enemies(world);
}

fn vec(position: Position) -> Vec2 {
    Vec2::new(position.x(), position.y())
}

fn player(world: &World) -> PlayerPresentation {
    let player = query::player(world);
    PlayerPresentation {
        sprite: RectPresentation::new(
            vec(player.position),
            Vec2::new(player.width, player.height),
        ),
        hitbox: RectPresentation::from_hitbox(player.hitbox),
        attack_radius: player.attack_radius,
    }
}

fn bullets(world: &World) -> Vec<BulletPresentation> {
    query::bullets(world)
        .into_iter()
        .map(|bullet| BulletPresentation {
            position: vec(bullet.position),
            hitbox: RectPresentation::from_hitbox(bullet.hitbox),
            visible: bullet.visible,
        })
        .collect()
}

fn enemies(world: &World) -> Vec<EnemyPresentation> {
    let tile = query::arena(world).tile_size() as f32;
    query::enemy_view(world)
        .iter()
        .map(|enemy| EnemyPresentation {
            sprite: RectPresentation::new(vec(enemy.position), Vec2::splat(tile)),
            hitbox: RectPresentation::from_hitbox(enemy.hitbox),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use idle_tower_core::Command;
    use idle_tower_simulation::LoopOptions;
    use idle_tower_world as world;
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
    fn scene_mirrors_world_state() {
        let mut world = World::new(arena());
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                position: Position::new(160.0, 100.0),
            },
            &mut events,
        );
        let simulation =
            Simulation::from_world(world, LoopOptions::default(), ChaCha8Rng::seed_from_u64(0));

        let mut scene = Scene::default();
        refresh(&mut scene, &simulation);

        assert_eq!(scene.player.sprite.origin, Vec2::new(160.0, 160.0));
        assert_eq!(scene.player.sprite.size, Vec2::splat(32.0));
        assert_eq!(scene.player.attack_radius, 100.0);
        assert_eq!(scene.enemies.len(), 1);
        assert_eq!(scene.enemies[0].sprite.origin, Vec2::new(160.0, 100.0));
        assert_eq!(scene.enemies[0].hitbox.origin, Vec2::new(168.0, 108.0));
        assert_eq!(scene.enemies[0].hitbox.size, Vec2::splat(16.0));
        assert!(scene.bullets.is_empty());
        assert_eq!(scene.fps, None);
        assert!(!scene.game_over);
    }

    #[test]
    fn missing_map_falls_back_to_plain_floor() {
        let tiles = load_tiles(Path::new("does/not/exist.txt"), &arena());
        assert_eq!(tiles.rows, 11);
        assert_eq!(tiles.columns, 11);
        assert_eq!(tiles.tile_size, 32.0);
        assert!(tiles.tiles.iter().all(|tile| *tile == TileId::default()));
    }
}
