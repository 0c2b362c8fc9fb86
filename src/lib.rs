//! Exact DE-9IM topological relationship evaluation for planar
//! geometries.
//!
//! This crate answers the classical computational-geometry question:
//! given two geometries (points, lines, polygons, or heterogeneous
//! collections of them, as `geo_types::Geometry<f64>`), what is their
//! topological relationship? The answer comes either as the full
//! dimensionally-extended nine-intersection matrix or as the boolean
//! verdict of a named spatial predicate — evaluated incrementally, so
//! most predicates stop long before the full matrix is known.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        relate / prepare                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  decomposition (geometry)  │  edge cell index  │  predicate     │
//! └─────────────────────────────────────────────────────────────────┘
//!               │                       │                  ▲
//!               ▼                       ▼                  │
//!      envelope fast paths ──► candidate edge pairs        │
//!                                       │                  │
//!                                       ▼                  │
//!                      exact intersections (robust signs)  │
//!                                       │                  │
//!                                       ▼                  │
//!              nodes / arcs / points ── dimension facts ───┘
//! ```
//!
//! All numeric classification is driven by sign-exact orientation
//! predicates, so a point exactly on an edge is BOUNDARY, a collinear
//! overlap is recognized exactly, and the produced matrix is always
//! internally consistent.
//!
//! The dominant real-world pattern — one geometry tested against many —
//! is served by [`prepare`]: the prepared handle caches the
//! decomposition and edge index of its geometry and reuses them for
//! every query, leaving per-query cost to the other operand.
//!
//! # Example
//!
//! ```
//! use geo_types::{Geometry, LineString, Polygon};
//! use spatial_relate::{prepare, relate, touches};
//!
//! let poly = Geometry::Polygon(Polygon::new(
//!     LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
//!     vec![],
//! ));
//! let line = Geometry::LineString(LineString::from(vec![(-3.0, 2.0), (0.0, 2.0)]));
//!
//! assert_eq!(relate(&line, &poly).unwrap().to_string(), "FF1F00212");
//! assert!(touches(&line, &poly).unwrap());
//!
//! let prepared = prepare(&poly).unwrap();
//! assert!(prepared.touches(&line).unwrap());
//! ```
//!
//! # Modules
//!
//! - [`matrix`]: `Location`, `Dimension`, `IntersectionMatrix`
//! - [`predicate`]: incremental topology predicates and pattern constants
//! - `geometry`: operand decomposition and exact point location
//! - `intersect`: robust segment intersection classification
//! - `edge_index`: grid cell index for candidate edge pruning
//! - `relate`: the engine and one-shot entry points
//! - `prepared`: cached handles for repeated queries
//! - [`error`]: error types

pub mod error;
pub mod matrix;
pub mod predicate;

mod edge_index;
mod geometry;
mod intersect;
mod prepared;
mod relate;

pub use edge_index::IndexConfig;
pub use error::{RelateError, Result};
pub use matrix::{Dimension, IntersectionMatrix, Location};
pub use predicate::{patterns, TopologyPredicate};
pub use prepared::{prepare, prepare_with_config, BuildStats, PreparedGeometry};
pub use relate::{
    contains, covered_by, covers, crosses, disjoint, equals_topo, evaluate, intersects, locate,
    overlaps, relate, relate_pattern, touches, within,
};
