#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Idle Tower experience.

mod headless;
mod scene;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use idle_tower_rendering::{
    audio::{self, AudioSink, LoggingAudioSink},
    Color, Presentation, RenderingBackend, Scene,
};
use idle_tower_rendering_macroquad::MacroquadBackend;
use idle_tower_simulation::Simulation;
use idle_tower_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::filter::EnvFilter;

use crate::settings::{Args, RunSettings};

/// Entry point for the Idle Tower command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let settings = RunSettings::resolve(Args::parse())?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, headless = settings.headless, "starting idle tower");

    let mut events = Vec::new();
    let mut simulation = Simulation::new(
        settings.arena.clone(),
        settings.loop_options,
        ChaCha8Rng::seed_from_u64(seed),
        &mut events,
    );
    let mut sink = LoggingAudioSink::new();
    audio::dispatch(&events, &mut sink);

    if settings.headless {
        let summary = headless::run(&mut simulation, settings.ticks, &mut sink);
        println!("{summary}");
        return Ok(());
    }

    run_windowed(simulation, sink, &settings)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_windowed<S>(
    mut simulation: Simulation<ChaCha8Rng>,
    mut sink: S,
    settings: &RunSettings,
) -> Result<()>
where
    S: AudioSink + 'static,
{
    let world = simulation.world();
    let arena = query::arena(world);
    let mut initial = Scene {
        tiles: scene::load_tiles(&settings.map, arena),
        ..Scene::default()
    };
    scene::refresh(&mut initial, &simulation);

    let presentation = Presentation::new(
        query::welcome_banner(world),
        Vec2::new(arena.width() as f32, arena.height() as f32),
        Color::BLACK,
        initial,
    );
    let mut backend = MacroquadBackend::new()
        .with_show_fps(settings.show_fps)
        .with_sprite_loading(settings.sprites)
        .with_manifest_path(settings.manifest.clone());
    if let Some(vsync) = settings.vsync {
        backend = backend.with_vsync(vsync);
    }

    let mut events = Vec::new();
    backend
        .run(presentation, move |elapsed, scene| {
            events.clear();
            let _ = simulation.advance(elapsed, &mut events);
            audio::dispatch(&events, &mut sink);
            scene::refresh(scene, &simulation);
        })
        .context("rendering backend failed")
}
