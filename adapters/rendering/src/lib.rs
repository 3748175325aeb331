#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Idle Tower adapters.
//!
//! Backends never see the world. Adapters copy what they need into an owned
//! [`Scene`] after every simulation advance and the backend draws only that
//! snapshot through a [`RenderSurface`].

pub mod audio;
pub mod tiles;

use anyhow::Result as AnyResult;
use glam::Vec2;
use idle_tower_core::Hitbox;
use std::time::Duration;

use crate::tiles::{TileId, TileLayout};

/// Text shown once the game is over.
pub const GAME_OVER_TEXT: &str = "Game Over";

/// Font size used for the game-over banner.
pub const GAME_OVER_FONT_SIZE: f32 = 40.0;

/// Edge length of the square drawn for a visible bullet.
pub const BULLET_DRAW_SIZE: f32 = 2.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::from_rgb_u8(255, 255, 0);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Image a backend is asked to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    /// The stationary shooter.
    Player,
    /// A walking enemy.
    Enemy,
    /// A background tile.
    Tile(TileId),
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectPresentation {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl RectPresentation {
    /// Creates a rectangle from its corner and extent.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Converts an integer collision rectangle into screen space.
    #[must_use]
    pub fn from_hitbox(hitbox: Hitbox) -> Self {
        Self {
            origin: Vec2::new(hitbox.x() as f32, hitbox.y() as f32),
            size: Vec2::new(hitbox.width() as f32, hitbox.height() as f32),
        }
    }
}

/// Background tiles laid out row by row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileGridPresentation {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Edge length of a tile on screen.
    pub tile_size: f32,
    /// Row-major tile identifiers, `columns * rows` entries.
    pub tiles: Vec<TileId>,
}

impl TileGridPresentation {
    /// Copies the tiles of `layout` into an owned grid.
    #[must_use]
    pub fn from_layout<L>(layout: &L, tile_size: f32) -> Self
    where
        L: TileLayout + ?Sized,
    {
        let rows = layout.rows();
        let columns = layout.columns();
        let mut tiles = Vec::with_capacity((rows as usize) * (columns as usize));
        for row in 0..rows {
            for column in 0..columns {
                tiles.push(layout.tile_at(row, column));
            }
        }
        Self {
            columns,
            rows,
            tile_size,
            tiles,
        }
    }
}

/// Snapshot of the player used for drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerPresentation {
    /// Sprite rectangle.
    pub sprite: RectPresentation,
    /// Collision rectangle, outlined in yellow.
    pub hitbox: RectPresentation,
    /// Radius of the engagement circle centred on the sprite.
    pub attack_radius: f32,
}

impl PlayerPresentation {
    /// Centre of the player's sprite.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.sprite.origin + self.sprite.size / 2.0
    }
}

/// Snapshot of a bullet used for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletPresentation {
    /// Current bullet position.
    pub position: Vec2,
    /// Collision rectangle, outlined in yellow.
    pub hitbox: RectPresentation,
    /// Whether the bullet body is drawn this frame.
    pub visible: bool,
}

/// Snapshot of an enemy used for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Sprite rectangle.
    pub sprite: RectPresentation,
    /// Collision rectangle, outlined in red.
    pub hitbox: RectPresentation,
}

/// Owned description of a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Background tiles.
    pub tiles: TileGridPresentation,
    /// The player.
    pub player: PlayerPresentation,
    /// In-flight bullets.
    pub bullets: Vec<BulletPresentation>,
    /// Active enemies.
    pub enemies: Vec<EnemyPresentation>,
    /// Ticks per second from the last complete window, if known.
    pub fps: Option<u32>,
    /// Whether the game-over banner replaces the playfield.
    pub game_over: bool,
}

impl Scene {
    /// Issues the draw calls for this frame in back-to-front order.
    pub fn draw<S>(&self, surface: &mut S)
    where
        S: RenderSurface + ?Sized,
    {
        if self.game_over {
            surface.draw_text_centered(GAME_OVER_TEXT, GAME_OVER_FONT_SIZE, Color::RED);
            return;
        }

        self.draw_tiles(surface);

        let player = &self.player;
        surface.draw_sprite(
            SpriteKind::Player,
            player.sprite.origin,
            player.sprite.size,
        );

        for bullet in &self.bullets {
            if bullet.visible {
                surface.fill_rect(
                    bullet.position,
                    Vec2::splat(BULLET_DRAW_SIZE),
                    Color::WHITE,
                );
            }
            surface.draw_rect(bullet.hitbox.origin, bullet.hitbox.size, Color::YELLOW);
        }

        surface.draw_circle_outline(player.center(), player.attack_radius, Color::WHITE);
        surface.draw_rect(player.hitbox.origin, player.hitbox.size, Color::YELLOW);

        for enemy in &self.enemies {
            surface.draw_sprite(SpriteKind::Enemy, enemy.sprite.origin, enemy.sprite.size);
            surface.draw_rect(enemy.hitbox.origin, enemy.hitbox.size, Color::RED);
        }
    }

    fn draw_tiles<S>(&self, surface: &mut S)
    where
        S: RenderSurface + ?Sized,
    {
        let grid = &self.tiles;
        if grid.columns == 0 {
            return;
        }
        let size = Vec2::splat(grid.tile_size);
        for (index, tile) in grid.tiles.iter().enumerate() {
            let index = index as u32;
            let origin = Vec2::new(
                (index % grid.columns) as f32 * grid.tile_size,
                (index / grid.columns) as f32 * grid.tile_size,
            );
            surface.draw_sprite(SpriteKind::Tile(*tile), origin, size);
        }
    }
}

/// Drawing primitives a backend exposes to [`Scene::draw`].
pub trait RenderSurface {
    /// Draws the image for `kind` stretched over the rectangle.
    fn draw_sprite(&mut self, kind: SpriteKind, origin: Vec2, size: Vec2);

    /// Outlines a rectangle.
    fn draw_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Fills a rectangle.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Outlines a circle.
    fn draw_circle_outline(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draws text centred on the screen.
    fn draw_text_centered(&mut self, text: &str, font_size: f32, color: Color);
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Window size in pixels.
    pub window_size: Vec2,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, window_size: Vec2, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            window_size,
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Idle Tower scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the wall time elapsed
    /// since the previous frame and rebuilds the scene before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static;
}
