#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Idle Tower.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature; sound requests are handled by the adapter's
//! [`AudioSink`](idle_tower_rendering::audio::AudioSink) instead.

mod sprites;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use glam::Vec2;
use idle_tower_rendering::{Color, Presentation, RenderSurface, RenderingBackend, Scene, SpriteKind};
use macroquad::input::{is_key_pressed, KeyCode};

use self::sprites::SpriteAtlas;

/// Sprite manifest read when no other path is configured.
pub const DEFAULT_MANIFEST_PATH: &str = "assets/manifest.toml";

const OUTLINE_THICKNESS: f32 = 1.0;
const FPS_FONT_SIZE: f32 = 20.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    load_sprites: bool,
    manifest_path: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            load_sprites: true,
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the simulation rate is drawn in the top-left corner.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether the backend should attempt to load sprite assets.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }

    /// Overrides the location of the sprite manifest.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            load_sprites,
            manifest_path,
        } = self;

        let Presentation {
            window_title,
            window_size,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.x as i32,
            window_height: window_size.y as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let atlas = if load_sprites {
                SpriteAtlas::load(&manifest_path)
            } else {
                SpriteAtlas::default()
            };
            let background = to_macroquad_color(clear_color);

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, &mut scene);

                macroquad::window::clear_background(background);
                let mut surface = MacroquadSurface {
                    atlas: &atlas,
                    screen_size: Vec2::new(
                        macroquad::window::screen_width(),
                        macroquad::window::screen_height(),
                    ),
                };
                scene.draw(&mut surface);

                if show_fps {
                    if let Some(fps) = scene.fps {
                        let _ = macroquad::text::draw_text(
                            &format!("FPS: {fps}"),
                            8.0,
                            FPS_FONT_SIZE,
                            FPS_FONT_SIZE,
                            macroquad::color::WHITE,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Immediate-mode drawing onto the current macroquad frame.
struct MacroquadSurface<'a> {
    atlas: &'a SpriteAtlas,
    screen_size: Vec2,
}

impl RenderSurface for MacroquadSurface<'_> {
    fn draw_sprite(&mut self, kind: SpriteKind, origin: Vec2, size: Vec2) {
        self.atlas.draw(kind, origin, size);
    }

    fn draw_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        macroquad::shapes::draw_rectangle_lines(
            origin.x,
            origin.y,
            size.x,
            size.y,
            OUTLINE_THICKNESS,
            to_macroquad_color(color),
        );
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            size.x,
            size.y,
            to_macroquad_color(color),
        );
    }

    fn draw_circle_outline(&mut self, center: Vec2, radius: f32, color: Color) {
        macroquad::shapes::draw_circle_lines(
            center.x,
            center.y,
            radius,
            OUTLINE_THICKNESS,
            to_macroquad_color(color),
        );
    }

    fn draw_text_centered(&mut self, text: &str, font_size: f32, color: Color) {
        let dimensions = macroquad::text::measure_text(text, None, font_size as u16, 1.0);
        let origin = centered_text_origin(
            self.screen_size,
            Vec2::new(dimensions.width, dimensions.height),
        );
        let _ = macroquad::text::draw_text(
            text,
            origin.x,
            origin.y,
            font_size,
            to_macroquad_color(color),
        );
    }
}

/// Baseline origin that centres a block of `text_size` on the screen.
fn centered_text_origin(screen_size: Vec2, text_size: Vec2) -> Vec2 {
    (screen_size - text_size) / 2.0
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_convert_channel_for_channel() {
        let converted = to_macroquad_color(Color::YELLOW);
        assert_eq!(converted.r, 1.0);
        assert_eq!(converted.g, 1.0);
        assert_eq!(converted.b, 0.0);
        assert_eq!(converted.a, 1.0);
    }

    #[test]
    fn text_is_centred_on_the_screen() {
        let origin = centered_text_origin(Vec2::new(672.0, 672.0), Vec2::new(200.0, 40.0));
        assert_eq!(origin, Vec2::new(236.0, 316.0));
    }

    #[test]
    fn builder_overrides_defaults() {
        let backend = MacroquadBackend::new()
            .with_vsync(false)
            .with_show_fps(true)
            .with_sprite_loading(false)
            .with_manifest_path("custom/manifest.toml");
        assert_eq!(backend.swap_interval, Some(0));
        assert!(backend.show_fps);
        assert!(!backend.load_sprites);
        assert_eq!(backend.manifest_path, PathBuf::from("custom/manifest.toml"));
    }
}
