//! Grid cell index over edge envelopes.
//!
//! Candidate edge pairs between two operands are pruned by envelope
//! overlap before any exact intersection math runs. The index maps each
//! edge's envelope to the grid cells it touches; a query scans the cells
//! of the probe envelope and returns the edges registered there.
//!
//! Cells may return an edge more than once across a multi-cell query, so
//! results are deduplicated; the candidate set is always a superset of
//! the edges whose envelopes overlap the probe.

use crate::geometry::{Edge, RelateGeometry};
use geo_types::Rect;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Configuration for grid granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Grid cell edge length. `None` sizes cells from the indexed
    /// envelope and edge count.
    pub cell_size: Option<f64>,

    /// Upper bound on grid resolution per axis.
    pub max_cells_per_axis: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            cell_size: None,
            max_cells_per_axis: 1024,
        }
    }
}

/// Uniform grid over edge envelopes.
#[derive(Debug, Clone)]
pub(crate) struct EdgeIndex {
    min_x: f64,
    min_y: f64,
    cell_size: f64,
    nx: i64,
    ny: i64,
    cells: FxHashMap<(i64, i64), Vec<u32>>,
}

impl EdgeIndex {
    /// Build an index over all edges of a decomposed operand.
    pub(crate) fn build(geom: &RelateGeometry, config: &IndexConfig) -> EdgeIndex {
        let env = geom
            .env
            .unwrap_or_else(|| Rect::new((0.0, 0.0), (0.0, 0.0)));
        let count = geom.edges.len().max(1);
        let width = env.width();
        let height = env.height();

        let cell_size = config.cell_size.unwrap_or_else(|| {
            let area = width * height;
            let by_area = if area > 0.0 {
                (area / count as f64).sqrt()
            } else {
                0.0
            };
            let by_extent = width.max(height) / count as f64;
            let size = by_area.max(by_extent);
            if size > 0.0 {
                size
            } else {
                1.0
            }
        });
        let max_axis = config.max_cells_per_axis.max(1) as f64;
        let cell_size = cell_size.max(width / max_axis).max(height / max_axis);

        let nx = ((width / cell_size).ceil() as i64).max(1);
        let ny = ((height / cell_size).ceil() as i64).max(1);

        let mut index = EdgeIndex {
            min_x: env.min().x,
            min_y: env.min().y,
            cell_size,
            nx,
            ny,
            cells: FxHashMap::default(),
        };
        for (i, edge) in geom.edges.iter().enumerate() {
            index.insert(i as u32, edge);
        }
        tracing::trace!(
            edges = geom.edges.len(),
            cells = index.cells.len(),
            cell_size,
            "built edge cell index"
        );
        index
    }

    fn cell_range(&self, env: &Rect<f64>) -> (i64, i64, i64, i64) {
        let x0 = (((env.min().x - self.min_x) / self.cell_size).floor() as i64).clamp(0, self.nx - 1);
        let x1 = (((env.max().x - self.min_x) / self.cell_size).floor() as i64).clamp(0, self.nx - 1);
        let y0 = (((env.min().y - self.min_y) / self.cell_size).floor() as i64).clamp(0, self.ny - 1);
        let y1 = (((env.max().y - self.min_y) / self.cell_size).floor() as i64).clamp(0, self.ny - 1);
        (x0, x1, y0, y1)
    }

    fn insert(&mut self, id: u32, edge: &Edge) {
        let (x0, x1, y0, y1) = self.cell_range(&edge.env());
        for x in x0..=x1 {
            for y in y0..=y1 {
                self.cells.entry((x, y)).or_default().push(id);
            }
        }
    }

    /// Candidate edge ids whose envelopes may overlap the probe.
    pub(crate) fn query(&self, probe: &Rect<f64>) -> Vec<u32> {
        let (x0, x1, y0, y1) = self.cell_range(probe);
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                if let Some(ids) = self.cells.get(&(x, y)) {
                    for &id in ids {
                        if seen.insert(id) {
                            out.push(id);
                        }
                    }
                }
            }
        }
        out
    }

    /// Number of occupied grid cells.
    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
