//! Prepared geometries: cache one operand's topology for repeated
//! queries.
//!
//! [`PreparedGeometry`] owns the decomposed structure and edge cell
//! index of one geometry A, built once by [`prepare`]. Each query
//! against a new B reuses the cache, so the per-query cost is dominated
//! by spatial lookups against B instead of re-deriving A's topology.
//!
//! The handle is immutable after construction: queries never mutate it,
//! so it is safe to share across threads (`Send + Sync`) for concurrent
//! queries against different B inputs. Results are identical to the
//! one-shot entry points for every predicate.

use crate::edge_index::{EdgeIndex, IndexConfig};
use crate::error::{RelateError, Result};
use crate::geometry::RelateGeometry;
use crate::matrix::{Dimension, IntersectionMatrix, Location};
use crate::predicate::TopologyPredicate;
use crate::relate::evaluate_decomposed;
use geo_types::{Coord, Geometry, Rect};
use serde::{Deserialize, Serialize};

/// Statistics from preparing a geometry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BuildStats {
    /// Point elements.
    pub points: usize,
    /// Polyline elements.
    pub lines: usize,
    /// Area boundary rings.
    pub rings: usize,
    /// Segments in the edge arena.
    pub edges: usize,
    /// Occupied cells in the edge index.
    pub index_cells: usize,
}

/// A geometry wrapped with its precomputed topological structure.
pub struct PreparedGeometry {
    geom: RelateGeometry,
    index: EdgeIndex,
    stats: BuildStats,
}

/// Prepare a geometry with default index granularity.
pub fn prepare(g: &Geometry<f64>) -> Result<PreparedGeometry> {
    prepare_with_config(g, &IndexConfig::default())
}

/// Prepare a geometry with explicit index granularity.
pub fn prepare_with_config(g: &Geometry<f64>, config: &IndexConfig) -> Result<PreparedGeometry> {
    let geom = RelateGeometry::build(g)?;
    let index = EdgeIndex::build(&geom, config);
    let stats = BuildStats {
        points: geom.points.len(),
        lines: geom.lines.len(),
        rings: geom.rings.len(),
        edges: geom.edges.len(),
        index_cells: index.cell_count(),
    };
    tracing::debug!(
        points = stats.points,
        lines = stats.lines,
        rings = stats.rings,
        edges = stats.edges,
        index_cells = stats.index_cells,
        "prepared geometry"
    );
    Ok(PreparedGeometry { geom, index, stats })
}

impl PreparedGeometry {
    /// Build statistics for the cached structure.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Envelope of the prepared geometry, if non-empty.
    pub fn envelope(&self) -> Option<Rect<f64>> {
        self.geom.env
    }

    /// Topological dimension of the prepared geometry.
    pub fn dimension(&self) -> Dimension {
        self.geom.dimension()
    }

    /// Run a predicate against B using the cached structure.
    pub fn evaluate(&self, b: &Geometry<f64>, pred: &mut TopologyPredicate) -> Result<()> {
        let gb = RelateGeometry::build(b)?;
        evaluate_decomposed(&self.geom, Some(&self.index), &gb, pred);
        Ok(())
    }

    fn eval_named(&self, b: &Geometry<f64>, mut pred: TopologyPredicate) -> Result<bool> {
        self.evaluate(b, &mut pred)?;
        Ok(pred.verdict().unwrap_or(false))
    }

    /// Full DE-9IM matrix against B.
    pub fn relate(&self, b: &Geometry<f64>) -> Result<IntersectionMatrix> {
        let mut pred = TopologyPredicate::matrix();
        self.evaluate(b, &mut pred)?;
        Ok(pred.into_matrix())
    }

    /// Arbitrary DE-9IM pattern against B.
    pub fn relate_pattern(&self, b: &Geometry<f64>, pattern: &str) -> Result<bool> {
        let mut pred = TopologyPredicate::matches(pattern)?;
        self.evaluate(b, &mut pred)?;
        Ok(pred.verdict().unwrap_or(false))
    }

    /// The prepared geometry intersects B.
    pub fn intersects(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::intersects())
    }

    /// The prepared geometry is disjoint from B.
    pub fn disjoint(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::disjoint())
    }

    /// The prepared geometry contains B.
    pub fn contains(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::contains())
    }

    /// The prepared geometry lies within B.
    pub fn within(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::within())
    }

    /// The prepared geometry covers B.
    pub fn covers(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::covers())
    }

    /// The prepared geometry is covered by B.
    pub fn covered_by(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::covered_by())
    }

    /// The prepared geometry crosses B.
    pub fn crosses(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::crosses())
    }

    /// The prepared geometry touches B.
    pub fn touches(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::touches())
    }

    /// The prepared geometry overlaps B.
    pub fn overlaps(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::overlaps())
    }

    /// The prepared geometry topologically equals B.
    pub fn equals_topo(&self, b: &Geometry<f64>) -> Result<bool> {
        self.eval_named(b, TopologyPredicate::equals_topo())
    }

    /// Locate a coordinate relative to the prepared geometry.
    pub fn locate(&self, coord: Coord<f64>) -> Result<Location> {
        if !(coord.x.is_finite() && coord.y.is_finite()) {
            return Err(RelateError::NonFiniteCoordinate {
                x: coord.x,
                y: coord.y,
            });
        }
        Ok(self.geom.locate(coord))
    }
}
