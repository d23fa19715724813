#![forbid(unsafe_code)]

//! Grid layout builder: materializes the sparse matrix into stage nodes
//! and row geometry.
//!
//! This is a pure construction pass with no animation state. It runs once
//! per full (re)build: for every matrix row it allocates a row node and a
//! tile node per populated slot, resolves the tile's reveal origin from
//! the origin table (alternating fallback past the table end), records
//! the click route to the tile record, and computes the row's document
//! rectangle from the viewport-derived metrics. Empty slots reserve
//! column width through the geometry alone; they get no node and no
//! click route.

use ahash::AHashMap;
use tracing::debug;
use vitrine_core::catalog::{Catalog, RevealOrigin};
use vitrine_core::geometry::{Rect, Viewport};

use crate::stage::{NodeId, Stage};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Geometry knobs for the grid section.
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    /// Document offset of the grid section's top edge, as a multiple of
    /// the viewport height (the hero section above it).
    pub section_top_vh: f32,
    /// Row height as a fraction of viewport width.
    pub row_height_vw: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            section_top_vh: 1.0,
            row_height_vw: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Built layout
// ---------------------------------------------------------------------------

/// One populated slot in a built row.
#[derive(Debug, Clone, Copy)]
pub struct TileSlot {
    /// The tile's stage node.
    pub node: NodeId,
    /// Index into the catalog's tile collection.
    pub tile_index: usize,
    /// Column position within the row.
    pub col: usize,
    /// Resolved reveal direction.
    pub origin: RevealOrigin,
}

/// One built grid row.
#[derive(Debug, Clone)]
pub struct BuiltRow {
    /// The row container's stage node (pin target).
    pub node: NodeId,
    /// Document rectangle of the row.
    pub rect: Rect,
    /// Populated slots, in column order.
    pub tiles: Vec<TileSlot>,
}

/// The materialized grid.
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    /// Rows in display order. Rows with no tiles are still present (they
    /// occupy scroll space) but are skipped by the animator.
    pub rows: Vec<BuiltRow>,
    /// Document rectangle of the whole grid section.
    pub section: Rect,
    /// Click routes: tile node to tile record index.
    routes: AHashMap<NodeId, usize>,
}

impl GridLayout {
    /// Build the grid from the catalog against the current viewport.
    ///
    /// An empty matrix yields an empty layout with a degenerate section
    /// rect; callers treat that as "section absent" and bind nothing.
    #[must_use]
    pub fn build(
        catalog: &Catalog,
        config: GridConfig,
        viewport: Viewport,
        stage: &mut Stage,
    ) -> Self {
        let section_top = config.section_top_vh * viewport.height;
        let row_height = config.row_height_vw * viewport.width;

        let mut rows = Vec::with_capacity(catalog.grid.len());
        let mut routes = AHashMap::new();

        for (row_index, slots) in catalog.grid.iter().enumerate() {
            let rect = Rect::new(
                0.0,
                section_top + row_index as f32 * row_height,
                viewport.width,
                row_height,
            );
            let node = stage.alloc();

            let mut tiles = Vec::new();
            for (col, slot) in slots.iter().enumerate() {
                let Some(tile_index) = *slot else {
                    // Empty slot: reserves its column width, nothing to bind.
                    continue;
                };
                let tile_node = stage.alloc();
                stage.set_image(tile_node, catalog.tiles[tile_index].image.clone());
                routes.insert(tile_node, tile_index);
                tiles.push(TileSlot {
                    node: tile_node,
                    tile_index,
                    col,
                    origin: catalog.origin_for(col),
                });
            }

            debug!(
                row = row_index,
                tiles = tiles.len(),
                top = rect.top(),
                "grid row built"
            );
            rows.push(BuiltRow { node, rect, tiles });
        }

        let section = rows
            .iter()
            .map(|r| r.rect)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();

        Self {
            rows,
            section,
            routes,
        }
    }

    /// Tile record index for a clicked tile node.
    #[must_use]
    pub fn route_for(&self, node: NodeId) -> Option<usize> {
        self.routes.get(&node).copied()
    }

    /// All tile nodes, in row then column order.
    pub fn tile_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rows.iter().flat_map(|r| r.tiles.iter().map(|t| t.node))
    }

    /// Release every node this layout allocated.
    pub fn release(&mut self, stage: &mut Stage) {
        for row in self.rows.drain(..) {
            for tile in &row.tiles {
                stage.release(tile.node);
            }
            stage.release(row.node);
        }
        self.routes.clear();
        self.section = Rect::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(1400.0, 900.0);

    fn build_default() -> (GridLayout, Stage) {
        let mut stage = Stage::new();
        let layout = GridLayout::build(&Catalog::default(), GridConfig::default(), VP, &mut stage);
        (layout, stage)
    }

    #[test]
    fn builds_one_row_per_matrix_row() {
        let (layout, _) = build_default();
        assert_eq!(layout.rows.len(), 10);
    }

    #[test]
    fn empty_slots_emit_no_nodes() {
        let (layout, _) = build_default();
        // Matrix row 1 is [None, Some(2), None, None]: one tile.
        assert_eq!(layout.rows[1].tiles.len(), 1);
        assert_eq!(layout.rows[1].tiles[0].col, 1);
        assert_eq!(layout.rows[1].tiles[0].tile_index, 2);
    }

    #[test]
    fn rows_stack_below_section_top() {
        let (layout, _) = build_default();
        let row_height = 0.3 * VP.width;
        assert_eq!(layout.rows[0].rect.top(), VP.height);
        assert_eq!(layout.rows[1].rect.top(), VP.height + row_height);
        assert_eq!(layout.rows[0].rect.height, row_height);
    }

    #[test]
    fn section_covers_all_rows() {
        let (layout, _) = build_default();
        assert_eq!(layout.section.top(), layout.rows[0].rect.top());
        assert_eq!(layout.section.bottom(), layout.rows[9].rect.bottom());
    }

    #[test]
    fn origins_resolve_from_table() {
        let (layout, _) = build_default();
        // Row 0: tiles at columns 0 and 2; table says right, left.
        assert_eq!(layout.rows[0].tiles[0].origin, RevealOrigin::Right);
        assert_eq!(layout.rows[0].tiles[1].origin, RevealOrigin::Left);
    }

    #[test]
    fn click_routes_map_nodes_to_tiles() {
        let (layout, _) = build_default();
        for row in &layout.rows {
            for tile in &row.tiles {
                assert_eq!(layout.route_for(tile.node), Some(tile.tile_index));
            }
        }
    }

    #[test]
    fn tiles_carry_their_image_ref() {
        let (layout, stage) = build_default();
        let first = &layout.rows[0].tiles[0];
        assert_eq!(stage.image(first.node), Some("/work/work-1.jpg"));
    }

    #[test]
    fn release_frees_every_node() {
        let (mut layout, mut stage) = build_default();
        let some_tile = layout.rows[0].tiles[0].node;
        assert!(!stage.is_empty());
        layout.release(&mut stage);
        assert!(stage.is_empty());
        assert!(layout.rows.is_empty());
        assert_eq!(layout.route_for(some_tile), None);
    }

    #[test]
    fn empty_matrix_yields_empty_layout() {
        let mut stage = Stage::new();
        let catalog = Catalog {
            grid: Vec::new(),
            ..Catalog::default()
        };
        let layout = GridLayout::build(&catalog, GridConfig::default(), VP, &mut stage);
        assert!(layout.rows.is_empty());
        assert_eq!(layout.section, Rect::default());
    }
}
