use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use idle_tower_rendering::{tiles::TileId, SpriteKind};
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;
const ALL_SPRITE_SLOTS: [SpriteSlot; 3] = [SpriteSlot::Player, SpriteSlot::Enemy, SpriteSlot::Tile];

/// Images listed in the sprite manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum SpriteSlot {
    Player,
    Enemy,
    /// Background tile drawn for tile id 0.
    Tile,
}

impl SpriteSlot {
    fn for_kind(kind: SpriteKind) -> Option<Self> {
        match kind {
            SpriteKind::Player => Some(Self::Player),
            SpriteKind::Enemy => Some(Self::Enemy),
            SpriteKind::Tile(tile) if tile == TileId::default() => Some(Self::Tile),
            SpriteKind::Tile(_) => None,
        }
    }
}

/// Cache of textures loaded from the sprite manifest.
///
/// Sprites that fail to load are left out; drawing them is a no-op.
#[derive(Debug, Default)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteSlot, Texture2D>,
}

impl SpriteAtlas {
    /// Loads the manifest at `path`, logging and skipping anything missing.
    pub(crate) fn load(path: &Path) -> Self {
        match Self::from_manifest_with_loader(path, default_loader) {
            Ok(atlas) => atlas,
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), "sprites disabled");
                Self::default()
            }
        }
    }

    /// Draws the sprite for `kind` stretched over the rectangle, if loaded.
    pub(crate) fn draw(&self, kind: SpriteKind, origin: Vec2, size: Vec2) {
        let Some(texture) = SpriteSlot::for_kind(kind).and_then(|slot| self.texture(slot)) else {
            return;
        };

        let params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(size.x, size.y)),
            ..DrawTextureParams::default()
        };
        texture::draw_texture_ex(texture, origin.x, origin.y, WHITE, params);
    }

    fn texture(&self, slot: SpriteSlot) -> Option<Texture2D> {
        self.textures.get(&slot).copied()
    }

    fn from_manifest_with_loader(
        path: &Path,
        mut loader: impl FnMut(SpriteSlot, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read sprite manifest at {}", path.display()))?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Ok(Self::from_entries(entries, &mut loader))
    }

    fn from_entries(
        entries: Vec<(SpriteSlot, PathBuf)>,
        loader: &mut impl FnMut(SpriteSlot, &Path) -> Result<Texture2D>,
    ) -> Self {
        let mut textures = HashMap::with_capacity(entries.len());
        for (slot, path) in entries {
            match loader(slot, &path) {
                Ok(texture) => {
                    let _ = textures.insert(slot, texture);
                }
                Err(error) => tracing::warn!(
                    sprite = ?slot,
                    path = %path.display(),
                    error = %format!("{error:#}"),
                    "sprite not loaded"
                ),
            }
        }
        Self { textures }
    }
}

fn default_loader(_slot: SpriteSlot, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    sprites: HashMap<String, String>,
}

/// Resolves manifest entries in slot order. Slots absent from the manifest
/// are skipped.
fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(SpriteSlot, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, relative_path) in manifest.sprites {
        let slot = parse_sprite_slot(&name)?;
        let _ = resolved.insert(slot, base_path.join(relative_path));
    }

    Ok(ALL_SPRITE_SLOTS
        .into_iter()
        .filter_map(|slot| resolved.remove(&slot).map(|path| (slot, path)))
        .collect())
}

fn parse_sprite_slot(name: &str) -> Result<SpriteSlot> {
    match name {
        "player" => Ok(SpriteSlot::Player),
        "enemy" => Ok(SpriteSlot::Enemy),
        "tile" => Ok(SpriteSlot::Tile),
        _ => bail!("unknown sprite key `{name}` in manifest"),
    }
}
