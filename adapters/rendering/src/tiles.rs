//! Background tile layout and its plain-text map format.
//!
//! A map file holds one line per tile row with whitespace-separated tile
//! numbers. Rows and columns beyond the arena are ignored.

use thiserror::Error;

/// Identifier of a background tile image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric value of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Source of the tile drawn in each grid cell.
pub trait TileLayout {
    /// Tile at the given cell.
    fn tile_at(&self, row: u32, column: u32) -> TileId;

    /// Number of tile rows.
    fn rows(&self) -> u32;

    /// Number of tile columns.
    fn columns(&self) -> u32;
}

/// Row-major grid of tile identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    rows: u32,
    columns: u32,
    tiles: Vec<TileId>,
}

impl TileMap {
    /// Creates a map with every cell set to `tile`.
    #[must_use]
    pub fn filled(rows: u32, columns: u32, tile: TileId) -> Self {
        Self {
            rows,
            columns,
            tiles: vec![tile; (rows as usize) * (columns as usize)],
        }
    }

    /// Parses `rows` lines of `columns` tile numbers from `text`.
    pub fn parse(text: &str, rows: u32, columns: u32) -> Result<Self, TileMapError> {
        let mut tiles = Vec::with_capacity((rows as usize) * (columns as usize));
        let mut lines = text.lines();

        for row in 0..rows {
            let line = lines.next().ok_or(TileMapError::MissingRow { row })?;
            let mut tokens = line.split_whitespace();
            for column in 0..columns {
                let token = tokens
                    .next()
                    .ok_or(TileMapError::MissingColumn { row, column })?;
                let value = token.parse::<u32>().map_err(|_| TileMapError::InvalidTile {
                    row,
                    column,
                    token: token.to_owned(),
                })?;
                tiles.push(TileId::new(value));
            }
        }

        Ok(Self {
            rows,
            columns,
            tiles,
        })
    }
}

impl TileLayout for TileMap {
    fn tile_at(&self, row: u32, column: u32) -> TileId {
        if row >= self.rows || column >= self.columns {
            return TileId::default();
        }
        let index = (row as usize) * (self.columns as usize) + column as usize;
        self.tiles.get(index).copied().unwrap_or_default()
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn columns(&self) -> u32 {
        self.columns
    }
}

/// Reasons a tile map fails to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TileMapError {
    /// The text ended before all rows were read.
    #[error("map ends before row {row}")]
    MissingRow {
        /// Zero-based row that was missing.
        row: u32,
    },
    /// A row holds fewer numbers than the arena has columns.
    #[error("row {row} ends before column {column}")]
    MissingColumn {
        /// Zero-based row being read.
        row: u32,
        /// Zero-based column that was missing.
        column: u32,
    },
    /// A cell is not a non-negative integer.
    #[error("invalid tile {token:?} at row {row}, column {column}")]
    InvalidTile {
        /// Zero-based row being read.
        row: u32,
        /// Zero-based column being read.
        column: u32,
        /// Offending text.
        token: String,
    },
}
