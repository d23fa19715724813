#![forbid(unsafe_code)]

//! Catalog: the static content records and the sparse grid layout.
//!
//! All of this is read-only configuration. The engine never mutates it;
//! the only runtime check is index validity of the grid matrix against
//! the tile collection (an out-of-range index is a configuration error
//! surfaced by [`Catalog::validate`], not defended against per-frame).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One showcased work, referenced from the grid by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Display title.
    pub title: String,
    /// Longer description shown in the overlay.
    pub description: String,
    /// Category label ("Image fixe", "Séquence", ...).
    pub category: String,
    /// Field label ("Cinématique", "Documentaire", ...).
    pub field: String,
    /// Production date label.
    pub date: String,
    /// Reference to the tile image asset.
    pub image: String,
    /// Route of the detail page.
    pub route: String,
}

/// One profile in the hover-preview list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Display name.
    pub name: String,
    /// Reference to the preview image asset.
    pub preview_image: String,
    /// Route of the detail page.
    pub route: String,
    /// Short biography; may be empty.
    #[serde(default)]
    pub bio: String,
}

/// Which horizontal edge a tile reveals from. Consumed only by the
/// reveal-direction visual, never by the state machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealOrigin {
    /// Reveal from the left edge.
    Left,
    /// Reveal from the right edge.
    Right,
}

impl RevealOrigin {
    /// Fallback when the origin table is exhausted: alternate by position.
    #[inline]
    #[must_use]
    pub fn alternating(position: usize) -> Self {
        if position % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

// ---------------------------------------------------------------------------
// Grid matrix
// ---------------------------------------------------------------------------

/// Sparse row/column matrix of tile indices. `None` is an empty slot
/// that still reserves column width. The same tile may recur.
pub type GridMatrix = Vec<Vec<Option<usize>>>;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Error produced by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A grid slot references a tile index outside the tile collection.
    #[error("grid slot ({row}, {col}) references tile {index}, but only {tile_count} tiles exist")]
    TileIndexOutOfRange {
        /// Row of the offending slot.
        row: usize,
        /// Column of the offending slot.
        col: usize,
        /// The out-of-range index.
        index: usize,
        /// Number of tiles in the collection.
        tile_count: usize,
    },
    /// Grid rows must all have the same number of slots.
    #[error("grid row {row} has {len} slots, expected {expected}")]
    RaggedRow {
        /// The offending row.
        row: usize,
        /// Its slot count.
        len: usize,
        /// Slot count of the first row.
        expected: usize,
    },
}

/// The full read-only content configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Showcased works.
    pub tiles: Vec<TileRecord>,
    /// Profiles for the hover-preview list.
    pub profiles: Vec<ProfileRecord>,
    /// Sparse grid of tile indices.
    pub grid: GridMatrix,
    /// Reveal directions indexed by column position.
    pub origins: Vec<RevealOrigin>,
}

impl Catalog {
    /// Check matrix shape and index validity.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let expected = self.grid.first().map_or(0, Vec::len);
        for (row, slots) in self.grid.iter().enumerate() {
            if slots.len() != expected {
                return Err(CatalogError::RaggedRow {
                    row,
                    len: slots.len(),
                    expected,
                });
            }
            for (col, slot) in slots.iter().enumerate() {
                if let Some(index) = *slot
                    && index >= self.tiles.len()
                {
                    return Err(CatalogError::TileIndexOutOfRange {
                        row,
                        col,
                        index,
                        tile_count: self.tiles.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of columns in the grid.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// Reveal origin for a column, falling back to alternation when the
    /// origin table is exhausted.
    #[must_use]
    pub fn origin_for(&self, col: usize) -> RevealOrigin {
        self.origins
            .get(col)
            .copied()
            .unwrap_or_else(|| RevealOrigin::alternating(col))
    }
}

impl Default for Catalog {
    /// The shipped showcase content.
    fn default() -> Self {
        let tile = |title: &str, description: &str, category: &str, field: &str, date: &str, image: &str| {
            TileRecord {
                title: title.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                field: field.to_string(),
                date: date.to_string(),
                image: image.to_string(),
                route: "/film".to_string(),
            }
        };

        use RevealOrigin::{Left, Right};

        Self {
            tiles: vec![
                tile(
                    "Éclat Doré",
                    "Chaleur, or et l'éclat acéré des dents captés dans une confession à demi-éclairée.",
                    "Image fixe",
                    "Cinématique",
                    "2025",
                    "/work/work-1.jpg",
                ),
                tile(
                    "Élan Blanc",
                    "Mouvement enfoui dans la neige. Un corps pressé contre la vitesse, avalé par le silence glacial.",
                    "Séquence",
                    "Documentaire",
                    "2023",
                    "/work/work-2.jpg",
                ),
                tile(
                    "Peau de Cuivre",
                    "Sueur, ombre et la texture de l'intimité sculptée par une lumière implacable.",
                    "Portrait",
                    "Expérimental",
                    "2024",
                    "/work/work-3.jpg",
                ),
                tile(
                    "Jeunesse Statique",
                    "Éclat noir et blanc. Deux silhouettes en défi, regards aiguisés à travers l'objectif.",
                    "Éditorial",
                    "Brutaliste",
                    "2022",
                    "/work/work-4.jpg",
                ),
            ],
            profiles: vec![ProfileRecord {
                name: "Samuel Godin".to_string(),
                preview_image: "/directors/samuel-foret.jpg".to_string(),
                route: "/film".to_string(),
                bio: "Réalisateur et directeur artistique basé à Clermont-Ferrand. Passionné par \
                      l'image et le mouvement, Samuel explore les frontières entre documentaire et \
                      fiction, capturant l'essence brute des moments qui définissent notre époque."
                    .to_string(),
            }],
            grid: vec![
                vec![Some(0), None, Some(1), None],
                vec![None, Some(2), None, None],
                vec![Some(3), None, None, Some(0)],
                vec![None, Some(1), Some(2), None],
                vec![Some(3), None, None, Some(0)],
                vec![None, None, Some(1), None],
                vec![None, Some(2), None, Some(3)],
                vec![Some(0), None, Some(1), None],
                vec![None, Some(2), None, None],
                vec![Some(3), None, None, Some(0)],
            ],
            origins: vec![
                Right, Left, Left, Right, Left, Left, Right, Left, Left, Left, Left, Left, Right,
                Left, Left, Right, Left,
            ],
        }
    }
}
