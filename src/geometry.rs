//! Operand decomposition and point location.
//!
//! A [`RelateGeometry`] is the per-operand topological structure: the
//! geometry flattened into point, line and ring elements over a flat
//! edge arena, with boundary classification and exact point location.
//!
//! # Design
//!
//! - Collections are flattened recursively and treated as the union of
//!   their parts; `Rect`/`Triangle`/`Line` are normalized to rings and
//!   lines.
//! - Linework boundary follows the mod-2 rule: an endpoint is on the
//!   boundary when it terminates an odd number of non-closed lines.
//! - Edges live in one flat arena addressed by index; ring adjacency is
//!   (first_edge, position) arithmetic, so the naturally cyclic
//!   node/edge structure needs no owning references.
//! - Point-in-area location is a ray-crossing counter whose per-edge
//!   decision is a sign of `robust::orient2d`; a point exactly on a ring
//!   edge classifies [`Location::Boundary`] despite floating-point
//!   coordinates. Ring edges are bucketed into horizontal strips so a
//!   location query only visits edges whose span can contain the query.

use crate::error::{RelateError, Result};
use crate::intersect::{on_segment, orient};
use crate::matrix::{Dimension, Location};
use geo::{BoundingRect, CoordsIter};
use geo_types::{Coord, Geometry, Polygon, Rect};
use rustc_hash::FxHashMap;

/// Bit-pattern key for exact coordinate identity (`-0.0` normalized).
pub(crate) type CoordKey = (u64, u64);

pub(crate) fn coord_key(c: Coord<f64>) -> CoordKey {
    ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
}

/// Which element an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeKind {
    /// Segment of a (multi)linestring element.
    Line { elem: u32 },
    /// Segment of an area boundary ring.
    Ring { elem: u32 },
}

impl EdgeKind {
    pub(crate) fn is_ring(self) -> bool {
        matches!(self, EdgeKind::Ring { .. })
    }
}

/// One segment in the flat edge arena.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub p: Coord<f64>,
    pub q: Coord<f64>,
    pub kind: EdgeKind,
    /// Index of `p` in the owning element's vertex chain/cycle.
    pub pos: u32,
}

impl Edge {
    pub(crate) fn env(&self) -> Rect<f64> {
        Rect::new(self.p, self.q)
    }
}

/// A polyline element.
#[derive(Debug, Clone)]
pub(crate) struct LineElement {
    pub first_edge: u32,
    pub edge_count: u32,
    pub env: Rect<f64>,
}

/// One boundary ring of a polygon.
#[derive(Debug, Clone)]
pub(crate) struct RingElement {
    pub first_edge: u32,
    pub edge_count: u32,
    pub env: Rect<f64>,
    /// Whether the polygon interior lies to the left of the directed
    /// ring edges (derived from ring orientation and shell/hole role).
    pub interior_on_left: bool,
    pub polygon: u32,
}

/// A polygon element: shell ring plus hole rings.
#[derive(Debug, Clone)]
pub(crate) struct PolygonElement {
    pub shell: u32,
    pub holes: Vec<u32>,
    pub env: Rect<f64>,
}

/// Horizontal strip buckets over ring edges, so point location visits
/// only edges whose y-span can contain the query.
#[derive(Debug, Clone)]
struct StripIndex {
    y_min: f64,
    inv_height: f64,
    strips: Vec<Vec<u32>>,
}

impl StripIndex {
    fn build(edges: &[Edge], ring_edges: &[u32], env: &Rect<f64>) -> StripIndex {
        let count = ring_edges.len().clamp(1, 1024);
        let height = env.height();
        let inv_height = if height > 0.0 {
            count as f64 / height
        } else {
            0.0
        };
        let mut strips = vec![Vec::new(); count];
        let last = count as i64 - 1;
        for &eid in ring_edges {
            let e = &edges[eid as usize];
            let (lo_y, hi_y) = (e.p.y.min(e.q.y), e.p.y.max(e.q.y));
            let lo = (((lo_y - env.min().y) * inv_height).floor() as i64).clamp(0, last) as usize;
            let hi = (((hi_y - env.min().y) * inv_height).floor() as i64).clamp(0, last) as usize;
            for strip in &mut strips[lo..=hi] {
                strip.push(eid);
            }
        }
        StripIndex {
            y_min: env.min().y,
            inv_height,
            strips,
        }
    }

    fn candidates(&self, y: f64) -> &[u32] {
        let last = self.strips.len() as i64 - 1;
        let idx = (((y - self.y_min) * self.inv_height).floor() as i64).clamp(0, last) as usize;
        &self.strips[idx]
    }
}

/// Envelope helpers (closed-interval semantics).
pub(crate) fn env_intersects(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x
        && b.min().x <= a.max().x
        && a.min().y <= b.max().y
        && b.min().y <= a.max().y
}

pub(crate) fn env_covers(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.min().x
        && a.max().x >= b.max().x
        && a.min().y <= b.min().y
        && a.max().y >= b.max().y
}

pub(crate) fn env_contains_coord(e: &Rect<f64>, c: Coord<f64>) -> bool {
    c.x >= e.min().x && c.x <= e.max().x && c.y >= e.min().y && c.y <= e.max().y
}

fn env_of(coords: &[Coord<f64>]) -> Rect<f64> {
    let mut min = coords[0];
    let mut max = coords[0];
    for c in &coords[1..] {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }
    Rect::new(min, max)
}

fn env_union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

/// Per-operand topological structure.
#[derive(Debug, Clone)]
pub(crate) struct RelateGeometry {
    pub points: Vec<Coord<f64>>,
    pub lines: Vec<LineElement>,
    pub rings: Vec<RingElement>,
    pub polygons: Vec<PolygonElement>,
    pub edges: Vec<Edge>,
    /// Endpoint occurrence counts of non-closed lines; odd = boundary.
    boundary_parity: FxHashMap<CoordKey, (u32, Coord<f64>)>,
    pub env: Option<Rect<f64>>,
    pub area_env: Option<Rect<f64>>,
    pub line_env: Option<Rect<f64>>,
    pub point_env: Option<Rect<f64>>,
    strip: Option<StripIndex>,
}

impl RelateGeometry {
    /// Decompose a geometry, validating coordinate finiteness.
    pub(crate) fn build(g: &Geometry<f64>) -> Result<RelateGeometry> {
        for c in g.coords_iter() {
            if !(c.x.is_finite() && c.y.is_finite()) {
                return Err(RelateError::NonFiniteCoordinate { x: c.x, y: c.y });
            }
        }
        let mut rg = RelateGeometry {
            points: Vec::new(),
            lines: Vec::new(),
            rings: Vec::new(),
            polygons: Vec::new(),
            edges: Vec::new(),
            boundary_parity: FxHashMap::default(),
            env: None,
            area_env: None,
            line_env: None,
            point_env: None,
            strip: None,
        };
        rg.add(g);
        rg.finish_build(g);
        Ok(rg)
    }

    fn add(&mut self, g: &Geometry<f64>) {
        match g {
            Geometry::Point(p) => self.points.push(p.0),
            Geometry::MultiPoint(mp) => self.points.extend(mp.iter().map(|p| p.0)),
            Geometry::Line(l) => self.add_line_coords(&[l.start, l.end]),
            Geometry::LineString(ls) => self.add_line_coords(&ls.0),
            Geometry::MultiLineString(mls) => {
                for ls in mls {
                    self.add_line_coords(&ls.0);
                }
            }
            Geometry::Polygon(p) => self.add_polygon(p),
            Geometry::MultiPolygon(mp) => {
                for p in mp {
                    self.add_polygon(p);
                }
            }
            Geometry::Rect(r) => self.add_polygon(&r.to_polygon()),
            Geometry::Triangle(t) => self.add_polygon(&t.to_polygon()),
            Geometry::GeometryCollection(gc) => {
                for g in gc {
                    self.add(g);
                }
            }
        }
    }

    fn add_line_coords(&mut self, coords: &[Coord<f64>]) {
        let c = dedup_coords(coords);
        match c.len() {
            0 => return,
            // Degenerate single-vertex line: tolerated as a point.
            1 => {
                self.points.push(c[0]);
                return;
            }
            _ => {}
        }
        let closed = c[0] == c[c.len() - 1];
        let elem = self.lines.len() as u32;
        let first_edge = self.edges.len() as u32;
        for (i, w) in c.windows(2).enumerate() {
            self.edges.push(Edge {
                p: w[0],
                q: w[1],
                kind: EdgeKind::Line { elem },
                pos: i as u32,
            });
        }
        self.lines.push(LineElement {
            first_edge,
            edge_count: (c.len() - 1) as u32,
            env: env_of(&c),
        });
        if !closed {
            self.bump_parity(c[0]);
            self.bump_parity(c[c.len() - 1]);
        }
    }

    fn bump_parity(&mut self, c: Coord<f64>) {
        self.boundary_parity
            .entry(coord_key(c))
            .and_modify(|(n, _)| *n += 1)
            .or_insert((1, c));
    }

    fn add_polygon(&mut self, poly: &Polygon<f64>) {
        let polygon = self.polygons.len() as u32;
        let Some(shell) = self.add_ring(&poly.exterior().0, polygon, true) else {
            return;
        };
        let mut holes = Vec::new();
        for h in poly.interiors() {
            if let Some(r) = self.add_ring(&h.0, polygon, false) {
                holes.push(r);
            }
        }
        let env = self.rings[shell as usize].env;
        self.polygons.push(PolygonElement { shell, holes, env });
    }

    /// Returns the new ring id, or `None` for a degenerate ring.
    fn add_ring(&mut self, coords: &[Coord<f64>], polygon: u32, is_shell: bool) -> Option<u32> {
        let mut c = dedup_coords(coords);
        if c.len() >= 2 && c[0] == c[c.len() - 1] {
            c.pop();
        }
        if c.len() < 3 {
            return None;
        }
        let ccw = ring_is_ccw(&c)?;
        let elem = self.rings.len() as u32;
        let first_edge = self.edges.len() as u32;
        let n = c.len();
        for (i, &p) in c.iter().enumerate() {
            self.edges.push(Edge {
                p,
                q: c[(i + 1) % n],
                kind: EdgeKind::Ring { elem },
                pos: i as u32,
            });
        }
        self.rings.push(RingElement {
            first_edge,
            edge_count: n as u32,
            env: env_of(&c),
            interior_on_left: is_shell == ccw,
            polygon,
        });
        Some(elem)
    }

    fn finish_build(&mut self, g: &Geometry<f64>) {
        self.env = g.bounding_rect();
        self.area_env = self
            .polygons
            .iter()
            .map(|p| p.env)
            .reduce(env_union);
        self.line_env = self.lines.iter().map(|l| l.env).reduce(env_union);
        self.point_env = self
            .points
            .iter()
            .map(|&c| Rect::new(c, c))
            .reduce(env_union);
        if !self.rings.is_empty() {
            let ring_edges: Vec<u32> = self
                .edges
                .iter()
                .enumerate()
                .filter(|(_, e)| e.kind.is_ring())
                .map(|(i, _)| i as u32)
                .collect();
            // Holes of invalid polygons may poke outside the shell
            // union; widen to the full ring extent.
            let mut env = self.area_env.unwrap_or_else(|| self.rings[0].env);
            for r in &self.rings {
                env = env_union(env, r.env);
            }
            self.strip = Some(StripIndex::build(&self.edges, &ring_edges, &env));
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.polygons.is_empty()
    }

    pub(crate) fn has_areas(&self) -> bool {
        !self.polygons.is_empty()
    }

    pub(crate) fn dimension(&self) -> Dimension {
        if self.has_areas() {
            Dimension::Surface
        } else if !self.lines.is_empty() {
            Dimension::Curve
        } else if !self.points.is_empty() {
            Dimension::Point
        } else {
            Dimension::Empty
        }
    }

    pub(crate) fn boundary_dimension(&self) -> Dimension {
        if self.has_areas() {
            Dimension::Curve
        } else if self.boundary_parity.values().any(|(n, _)| n % 2 == 1) {
            Dimension::Point
        } else {
            Dimension::Empty
        }
    }

    /// Odd-parity line endpoints: the linework boundary point set.
    pub(crate) fn boundary_points(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.boundary_parity
            .values()
            .filter(|(n, _)| n % 2 == 1)
            .map(|&(_, c)| c)
    }

    pub(crate) fn is_line_boundary(&self, c: Coord<f64>) -> bool {
        self.boundary_parity
            .get(&coord_key(c))
            .map(|(n, _)| n % 2 == 1)
            .unwrap_or(false)
    }

    /// Locate a point relative to the area parts only, optionally
    /// ignoring some polygons (used for structural node classification,
    /// where incident rings are already accounted for).
    pub(crate) fn locate_in_areas(&self, pt: Coord<f64>, exclude: &[u32]) -> Location {
        if self.polygons.is_empty() {
            return Location::Exterior;
        }
        let Some(strip) = &self.strip else {
            return Location::Exterior;
        };
        let mut parity: FxHashMap<u32, u32> = FxHashMap::default();
        for &eid in strip.candidates(pt.y) {
            let e = &self.edges[eid as usize];
            let EdgeKind::Ring { elem } = e.kind else {
                continue;
            };
            let ring = &self.rings[elem as usize];
            if exclude.contains(&ring.polygon) {
                continue;
            }
            // A ring whose envelope excludes the point cannot contain
            // it or carry it on an edge; its parity stays even.
            if !env_contains_coord(&ring.env, pt) {
                continue;
            }
            if on_segment(e.p, e.q, pt) {
                return Location::Boundary;
            }
            let above_p = e.p.y > pt.y;
            let above_q = e.q.y > pt.y;
            if above_p != above_q {
                let o = orient(e.p, e.q, pt);
                let upward = e.q.y > e.p.y;
                if (upward && o == 1) || (!upward && o == -1) {
                    *parity.entry(elem).or_insert(0) += 1;
                }
            }
        }
        let odd = |r: u32| parity.get(&r).map(|n| n % 2 == 1).unwrap_or(false);
        for (pid, poly) in self.polygons.iter().enumerate() {
            if exclude.contains(&(pid as u32)) {
                continue;
            }
            if odd(poly.shell) && !poly.holes.iter().any(|&h| odd(h)) {
                return Location::Interior;
            }
        }
        Location::Exterior
    }

    /// Whether the point lies on any line element's edges.
    pub(crate) fn on_linework(&self, pt: Coord<f64>) -> bool {
        for line in &self.lines {
            if !env_contains_coord(&line.env, pt) {
                continue;
            }
            let lo = line.first_edge as usize;
            let hi = lo + line.edge_count as usize;
            for e in &self.edges[lo..hi] {
                if on_segment(e.p, e.q, pt) {
                    return true;
                }
            }
        }
        false
    }

    /// Union-rule location of a point relative to the whole operand:
    /// area interior absorbs everything, area boundary beats line
    /// interior, linework location follows the mod-2 rule.
    pub(crate) fn locate(&self, pt: Coord<f64>) -> Location {
        match self.locate_in_areas(pt, &[]) {
            Location::Interior => return Location::Interior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
        if self.on_linework(pt) {
            return if self.is_line_boundary(pt) {
                Location::Boundary
            } else {
                Location::Interior
            };
        }
        if self.points.iter().any(|&p| p == pt) {
            return Location::Interior;
        }
        Location::Exterior
    }

    /// Local ring geometry at a node known to lie on the given ring
    /// edge: previous vertex, node, next vertex along the ring.
    pub(crate) fn ring_wedge(
        &self,
        edge_id: u32,
        node: Coord<f64>,
    ) -> (Coord<f64>, Coord<f64>, Coord<f64>) {
        let e = &self.edges[edge_id as usize];
        let EdgeKind::Ring { elem } = e.kind else {
            return (e.p, node, e.q);
        };
        let ring = &self.rings[elem as usize];
        let n = ring.edge_count;
        if node == e.p {
            let prev = &self.edges[(ring.first_edge + (e.pos + n - 1) % n) as usize];
            (prev.p, e.p, e.q)
        } else if node == e.q {
            let next = &self.edges[(ring.first_edge + (e.pos + 1) % n) as usize];
            (e.p, e.q, next.q)
        } else {
            (e.p, node, e.q)
        }
    }

    pub(crate) fn edge_interior_on_left(&self, edge_id: u32) -> bool {
        match self.edges[edge_id as usize].kind {
            EdgeKind::Ring { elem } => self.rings[elem as usize].interior_on_left,
            EdgeKind::Line { .. } => false,
        }
    }

    pub(crate) fn edge_polygon(&self, edge_id: u32) -> Option<u32> {
        match self.edges[edge_id as usize].kind {
            EdgeKind::Ring { elem } => Some(self.rings[elem as usize].polygon),
            EdgeKind::Line { .. } => None,
        }
    }
}

fn dedup_coords(coords: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(coords.len());
    for &c in coords {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
    out
}

/// Ring orientation via the extremal (lowest, then rightmost) vertex.
/// `None` when the ring is fully degenerate.
fn ring_is_ccw(c: &[Coord<f64>]) -> Option<bool> {
    let n = c.len();
    let mut m = 0;
    for i in 1..n {
        if c[i].y < c[m].y || (c[i].y == c[m].y && c[i].x > c[m].x) {
            m = i;
        }
    }
    let prev = c[(m + n - 1) % n];
    let next = c[(m + 1) % n];
    match orient(prev, c[m], next) {
        1 => Some(true),
        -1 => Some(false),
        _ => {
            // Degenerate turn at the extremal vertex; fall back to the
            // shoelace sign.
            let mut area2 = 0.0;
            for i in 0..n {
                let a = c[i];
                let b = c[(i + 1) % n];
                area2 += a.x * b.y - b.x * a.y;
            }
            if area2 > 0.0 {
                Some(true)
            } else if area2 < 0.0 {
                Some(false)
            } else {
                None
            }
        }
    }
}
