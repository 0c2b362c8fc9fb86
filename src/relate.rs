//! The relate engine.
//!
//! Orchestrates operand decomposition, envelope pruning, exact edge
//! intersection, location classification and fact streaming into a
//! [`TopologyPredicate`].
//!
//! # Pipeline
//!
//! ```text
//! predicate init (operand dimensions)
//!        │
//!        ▼
//! envelope fast paths ── empty / disjoint envelopes → exterior facts
//!        │
//!        ▼
//! candidate edge pairs (cell index) → exact intersections → nodes/splits
//!        │
//!        ▼
//! node facts → per-element arc classification → point facts
//!        │
//!        ▼
//! predicate finish (or earlier short-circuit)
//! ```
//!
//! Arc classification is exact for valid input: every decision at an
//! intersection node is an orientation sign over original input
//! coordinates (wedge tests against the incident ring edges), and a
//! sub-segment with no boundary contact is classified through a
//! ray-crossing query on one of its original vertices.

use crate::edge_index::{EdgeIndex, IndexConfig};
use crate::error::{RelateError, Result};
use crate::geometry::{
    coord_key, env_contains_coord, env_covers, env_intersects, CoordKey, Edge, EdgeKind,
    RelateGeometry,
};
use crate::intersect::{axis_param, seg_seg, SegSeg};
use crate::matrix::{Dimension, IntersectionMatrix, Location};
use crate::predicate::TopologyPredicate;
use geo_types::{Coord, Geometry, Rect};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Compute the full DE-9IM matrix for `(a, b)`.
pub fn relate(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<IntersectionMatrix> {
    let mut pred = TopologyPredicate::matrix();
    evaluate(a, b, &mut pred)?;
    Ok(pred.into_matrix())
}

/// Evaluate an arbitrary DE-9IM pattern for `(a, b)`.
///
/// The pattern is validated before either geometry is touched.
pub fn relate_pattern(a: &Geometry<f64>, b: &Geometry<f64>, pattern: &str) -> Result<bool> {
    let mut pred = TopologyPredicate::matches(pattern)?;
    evaluate(a, b, &mut pred)?;
    Ok(pred.verdict().unwrap_or(false))
}

/// Run a predicate against `(a, b)`: the generic entry point behind the
/// named predicates and [`relate`].
pub fn evaluate(a: &Geometry<f64>, b: &Geometry<f64>, pred: &mut TopologyPredicate) -> Result<()> {
    let ga = RelateGeometry::build(a)?;
    let gb = RelateGeometry::build(b)?;
    evaluate_decomposed(&ga, None, &gb, pred);
    Ok(())
}

fn eval_named(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    mut pred: TopologyPredicate,
) -> Result<bool> {
    evaluate(a, b, &mut pred)?;
    Ok(pred.verdict().unwrap_or(false))
}

/// A and B share at least one point.
pub fn intersects(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::intersects())
}

/// A and B share no points.
pub fn disjoint(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::disjoint())
}

/// Every point of B lies in A, and their interiors intersect.
pub fn contains(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::contains())
}

/// Every point of A lies in B, and their interiors intersect.
pub fn within(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::within())
}

/// Every point of B lies in A.
pub fn covers(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::covers())
}

/// Every point of A lies in B.
pub fn covered_by(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::covered_by())
}

/// Interiors intersect and each geometry reaches the other's exterior,
/// in a lower dimension than the operands allow for overlap.
pub fn crosses(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::crosses())
}

/// Boundaries touch but interiors stay apart.
pub fn touches(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::touches())
}

/// Interiors intersect in the operands' common dimension and each
/// geometry reaches the other's exterior.
pub fn overlaps(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::overlaps())
}

/// Topological equality: same point set.
pub fn equals_topo(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<bool> {
    eval_named(a, b, TopologyPredicate::equals_topo())
}

/// Locate a coordinate relative to a geometry, exactly on boundaries.
pub fn locate(g: &Geometry<f64>, coord: Coord<f64>) -> Result<Location> {
    if !(coord.x.is_finite() && coord.y.is_finite()) {
        return Err(RelateError::NonFiniteCoordinate {
            x: coord.x,
            y: coord.y,
        });
    }
    Ok(RelateGeometry::build(g)?.locate(coord))
}

// ============================================================================
// Engine
// ============================================================================

/// A split point strictly inside an edge.
#[derive(Debug, Clone, Copy)]
struct Split {
    t: f64,
    key: CoordKey,
}

/// A collinear overlap span on an edge, in edge parameters.
#[derive(Debug, Clone, Copy)]
struct Span {
    t0: f64,
    t1: f64,
    /// Whether the overlapping other-side edge is an area ring edge.
    other_is_ring: bool,
    /// For ring/ring overlaps: both interiors on the same side.
    same_side: bool,
}

/// Intersection events discovered on one side's edges.
#[derive(Debug, Default)]
struct SideEvents {
    splits: FxHashMap<u32, Vec<Split>>,
    spans: FxHashMap<u32, Vec<Span>>,
    touched_lines: FxHashSet<u32>,
    touched_rings: FxHashSet<u32>,
}

impl SideEvents {
    fn touch(&mut self, kind: EdgeKind) {
        match kind {
            EdgeKind::Line { elem } => {
                self.touched_lines.insert(elem);
            }
            EdgeKind::Ring { elem } => {
                self.touched_rings.insert(elem);
            }
        }
    }
}

/// An intersection node between the two operands' linework.
#[derive(Debug)]
struct Node {
    pt: Coord<f64>,
    a_edges: SmallVec<[u32; 2]>,
    b_edges: SmallVec<[u32; 2]>,
}

type Nodes = FxHashMap<CoordKey, Node>;

/// Location class of an arc (an edge piece with uniform location).
#[derive(Debug, Clone, Copy, PartialEq)]
enum ArcClass {
    /// Inside the other operand's areas.
    In,
    /// Outside areas and off the other operand's linework.
    Out,
    /// Along an area boundary ring of the other operand.
    On { same_side: bool },
}

/// Core evaluation over decomposed operands. `a_index` is the prepared
/// cached index over A's edges, if any.
pub(crate) fn evaluate_decomposed(
    a: &RelateGeometry,
    a_index: Option<&EdgeIndex>,
    b: &RelateGeometry,
    pred: &mut TopologyPredicate,
) {
    pred.init(a.dimension(), b.dimension());
    if pred.is_known() {
        return;
    }

    // The exteriors of two bounded geometries always share the plane.
    pred.update(Location::Exterior, Location::Exterior, Dimension::Surface);
    if pred.is_known() {
        return;
    }

    let env_overlap = match (a.env, b.env) {
        (Some(ea), Some(eb)) => env_intersects(&ea, &eb),
        _ => false,
    };
    if a.is_empty() || b.is_empty() || !env_overlap {
        tracing::trace!(
            predicate = pred.name(),
            "envelope fast path: empty operand or disjoint envelopes"
        );
        exterior_facts(a, b, pred);
        pred.finish();
        return;
    }
    let (env_a, env_b) = (a.env.unwrap(), b.env.unwrap());

    // Parts of an operand sticking out of the other's envelope pin the
    // exterior cells before any exact work.
    escape_facts(a, &env_b, true, pred);
    escape_facts(b, &env_a, false, pred);
    if pred.is_known() {
        return;
    }

    let built;
    let (index, index_is_a) = match a_index {
        Some(ix) => (ix, true),
        None => {
            if a.edges.len() >= b.edges.len() {
                built = EdgeIndex::build(a, &IndexConfig::default());
                (&built, true)
            } else {
                built = EdgeIndex::build(b, &IndexConfig::default());
                (&built, false)
            }
        }
    };

    let (nodes, ev_a, ev_b) = collect_events(a, b, index, index_is_a);
    tracing::debug!(
        predicate = pred.name(),
        nodes = nodes.len(),
        a_edges = a.edges.len(),
        b_edges = b.edges.len(),
        "collected intersection events"
    );

    node_facts(a, b, &nodes, pred);
    if pred.is_known() {
        return;
    }

    classify_side(a, b, &ev_a, &nodes, true, pred);
    if pred.is_known() {
        return;
    }
    classify_side(b, a, &ev_b, &nodes, false, pred);
    if pred.is_known() {
        return;
    }

    point_facts(a, b, true, pred);
    if pred.is_known() {
        return;
    }
    point_facts(b, a, false, pred);
    if pred.is_known() {
        return;
    }

    pred.finish();
}

/// Emit a fact with `own` relative to side S and `other` relative to the
/// opposite side, transposing when S is operand B.
fn emit(pred: &mut TopologyPredicate, s_is_a: bool, own: Location, other: Location, dim: Dimension) {
    if s_is_a {
        pred.update(own, other, dim);
    } else {
        pred.update(other, own, dim);
    }
}

/// Facts for the empty-operand / disjoint-envelope path: each non-empty
/// side lies entirely in the other's exterior.
fn exterior_facts(a: &RelateGeometry, b: &RelateGeometry, pred: &mut TopologyPredicate) {
    if !a.is_empty() {
        pred.update(Location::Interior, Location::Exterior, a.dimension());
        let bd = a.boundary_dimension();
        if bd != Dimension::Empty {
            pred.update(Location::Boundary, Location::Exterior, bd);
        }
    }
    if !b.is_empty() {
        pred.update(Location::Exterior, Location::Interior, b.dimension());
        let bd = b.boundary_dimension();
        if bd != Dimension::Empty {
            pred.update(Location::Exterior, Location::Boundary, bd);
        }
    }
}

/// Per-category envelope escape: any category envelope not covered by
/// the other operand's envelope puts that category's interior (and for
/// areas, boundary) into the other's exterior.
fn escape_facts(s: &RelateGeometry, other_env: &Rect<f64>, s_is_a: bool, pred: &mut TopologyPredicate) {
    if let Some(env) = s.area_env {
        if !env_covers(other_env, &env) {
            emit(pred, s_is_a, Location::Interior, Location::Exterior, Dimension::Surface);
            emit(pred, s_is_a, Location::Boundary, Location::Exterior, Dimension::Curve);
        }
    }
    if let Some(env) = s.line_env {
        if !env_covers(other_env, &env) {
            emit(pred, s_is_a, Location::Interior, Location::Exterior, Dimension::Curve);
        }
    }
    if let Some(env) = s.point_env {
        if !env_covers(other_env, &env) {
            emit(pred, s_is_a, Location::Interior, Location::Exterior, Dimension::Point);
        }
    }
}

// ============================================================================
// Event collection
// ============================================================================

fn collect_events(
    a: &RelateGeometry,
    b: &RelateGeometry,
    index: &EdgeIndex,
    index_is_a: bool,
) -> (Nodes, SideEvents, SideEvents) {
    let mut nodes = Nodes::default();
    let mut ev_a = SideEvents::default();
    let mut ev_b = SideEvents::default();
    let probe = if index_is_a { b } else { a };
    let indexed = if index_is_a { a } else { b };
    for (pid, pe) in probe.edges.iter().enumerate() {
        for iid in index.query(&pe.env()) {
            let ie = &indexed.edges[iid as usize];
            let (aid, ae, bid, be) = if index_is_a {
                (iid, ie, pid as u32, pe)
            } else {
                (pid as u32, pe, iid, ie)
            };
            process_pair(a, b, aid, ae, bid, be, &mut nodes, &mut ev_a, &mut ev_b);
        }
    }
    (nodes, ev_a, ev_b)
}

#[allow(clippy::too_many_arguments)]
fn process_pair(
    a: &RelateGeometry,
    b: &RelateGeometry,
    aid: u32,
    ae: &Edge,
    bid: u32,
    be: &Edge,
    nodes: &mut Nodes,
    ev_a: &mut SideEvents,
    ev_b: &mut SideEvents,
) {
    match seg_seg(ae.p, ae.q, be.p, be.q) {
        SegSeg::None => {}
        SegSeg::Point(pt) => {
            register_node(nodes, pt, aid, bid);
            add_split(ev_a, aid, ae, pt);
            add_split(ev_b, bid, be, pt);
            ev_a.touch(ae.kind);
            ev_b.touch(be.kind);
        }
        SegSeg::Overlap(r0, r1) => {
            register_node(nodes, r0, aid, bid);
            register_node(nodes, r1, aid, bid);
            add_split(ev_a, aid, ae, r0);
            add_split(ev_a, aid, ae, r1);
            add_split(ev_b, bid, be, r0);
            add_split(ev_b, bid, be, r1);
            let same_side = overlap_same_side(a, b, aid, ae, bid, be);
            add_span(ev_a, aid, ae, r0, r1, be.kind.is_ring(), same_side);
            add_span(ev_b, bid, be, r0, r1, ae.kind.is_ring(), same_side);
            ev_a.touch(ae.kind);
            ev_b.touch(be.kind);
        }
    }
}

fn register_node(nodes: &mut Nodes, pt: Coord<f64>, aid: u32, bid: u32) {
    let node = nodes.entry(coord_key(pt)).or_insert_with(|| Node {
        pt,
        a_edges: SmallVec::new(),
        b_edges: SmallVec::new(),
    });
    if !node.a_edges.contains(&aid) {
        node.a_edges.push(aid);
    }
    if !node.b_edges.contains(&bid) {
        node.b_edges.push(bid);
    }
}

fn add_split(ev: &mut SideEvents, eid: u32, e: &Edge, pt: Coord<f64>) {
    if pt == e.p || pt == e.q {
        return;
    }
    ev.splits.entry(eid).or_default().push(Split {
        t: axis_param(e.p, e.q, pt),
        key: coord_key(pt),
    });
}

#[allow(clippy::too_many_arguments)]
fn add_span(
    ev: &mut SideEvents,
    eid: u32,
    e: &Edge,
    r0: Coord<f64>,
    r1: Coord<f64>,
    other_is_ring: bool,
    same_side: bool,
) {
    let ta = axis_param(e.p, e.q, r0);
    let tb = axis_param(e.p, e.q, r1);
    ev.spans.entry(eid).or_default().push(Span {
        t0: ta.min(tb),
        t1: ta.max(tb),
        other_is_ring,
        same_side,
    });
}

/// For a collinear ring/ring overlap: do the two polygon interiors lie
/// on the same side of the shared carrier line? Exact: decided by edge
/// direction signs on the dominant axis and the rings' interior sides.
fn overlap_same_side(
    a: &RelateGeometry,
    b: &RelateGeometry,
    aid: u32,
    ae: &Edge,
    bid: u32,
    be: &Edge,
) -> bool {
    if !(ae.kind.is_ring() && be.kind.is_ring()) {
        return false;
    }
    let same_dir = if (ae.q.x - ae.p.x).abs() >= (ae.q.y - ae.p.y).abs() {
        (ae.q.x > ae.p.x) == (be.q.x > be.p.x)
    } else {
        (ae.q.y > ae.p.y) == (be.q.y > be.p.y)
    };
    let flags_equal = a.edge_interior_on_left(aid) == b.edge_interior_on_left(bid);
    same_dir == flags_equal
}

// ============================================================================
// Node facts
// ============================================================================

fn node_facts(a: &RelateGeometry, b: &RelateGeometry, nodes: &Nodes, pred: &mut TopologyPredicate) {
    for node in nodes.values() {
        let la = node_location(a, &node.a_edges, node.pt);
        let lb = node_location(b, &node.b_edges, node.pt);
        pred.update(la, lb, Dimension::Point);
        if pred.is_known() {
            return;
        }
    }
}

/// Location of an intersection node within its own operand, decided
/// structurally from the incident edges (exact even for computed
/// crossing coordinates), then union-upgraded against non-incident area
/// parts.
fn node_location(side: &RelateGeometry, incident: &[u32], pt: Coord<f64>) -> Location {
    let mut on_ring = false;
    let mut on_line = false;
    let mut exclude: SmallVec<[u32; 2]> = SmallVec::new();
    for &eid in incident {
        match side.edges[eid as usize].kind {
            EdgeKind::Ring { .. } => {
                on_ring = true;
                if let Some(p) = side.edge_polygon(eid) {
                    if !exclude.contains(&p) {
                        exclude.push(p);
                    }
                }
            }
            EdgeKind::Line { .. } => on_line = true,
        }
    }
    if side.has_areas() {
        match side.locate_in_areas(pt, &exclude) {
            Location::Interior => return Location::Interior,
            Location::Boundary => on_ring = true,
            Location::Exterior => {}
        }
    }
    if on_ring {
        return Location::Boundary;
    }
    if on_line {
        if side.is_line_boundary(pt) {
            return Location::Boundary;
        }
        return Location::Interior;
    }
    Location::Exterior
}

// ============================================================================
// Arc classification
// ============================================================================

fn classify_side(
    s: &RelateGeometry,
    t: &RelateGeometry,
    events: &SideEvents,
    nodes: &Nodes,
    s_is_a: bool,
    pred: &mut TopologyPredicate,
) {
    for (lid, line) in s.lines.iter().enumerate() {
        if pred.is_known() {
            return;
        }
        let lo = line.first_edge;
        let hi = lo + line.edge_count;
        if !events.touched_lines.contains(&(lid as u32)) {
            let class = untouched_class(t, &line.env, s.edges[lo as usize].p);
            emit_arc_facts(pred, s_is_a, false, class, false);
            continue;
        }
        let mut carried: Option<bool> = None;
        for eid in lo..hi {
            classify_edge(s, t, events, nodes, s_is_a, eid, &mut carried, pred);
            if pred.is_known() {
                return;
            }
        }
    }
    for (rid, ring) in s.rings.iter().enumerate() {
        if pred.is_known() {
            return;
        }
        let lo = ring.first_edge;
        let hi = lo + ring.edge_count;
        if !events.touched_rings.contains(&(rid as u32)) {
            let class = untouched_class(t, &ring.env, s.edges[lo as usize].p);
            emit_arc_facts(pred, s_is_a, true, class, false);
            continue;
        }
        let mut carried: Option<bool> = None;
        for eid in lo..hi {
            classify_edge(s, t, events, nodes, s_is_a, eid, &mut carried, pred);
            if pred.is_known() {
                return;
            }
        }
    }
}

/// Class of an element with no intersection events: its connected
/// linework lies in a single region of the other operand, decided by one
/// representative original vertex.
fn untouched_class(t: &RelateGeometry, env: &Rect<f64>, representative: Coord<f64>) -> ArcClass {
    if !t.has_areas() {
        return ArcClass::Out;
    }
    if let Some(area_env) = t.area_env {
        if !env_intersects(env, &area_env) {
            return ArcClass::Out;
        }
    }
    if t.locate_in_areas(representative, &[]) == Location::Interior {
        ArcClass::In
    } else {
        ArcClass::Out
    }
}

#[allow(clippy::too_many_arguments)]
fn classify_edge(
    s: &RelateGeometry,
    t: &RelateGeometry,
    events: &SideEvents,
    nodes: &Nodes,
    s_is_a: bool,
    eid: u32,
    carried: &mut Option<bool>,
    pred: &mut TopologyPredicate,
) {
    let e = &s.edges[eid as usize];
    let is_ring = e.kind.is_ring();
    let splits = events.splits.get(&eid);
    let spans = events.spans.get(&eid);

    // Event-free edge away from the other operand: stays in its carried
    // region, or outside everything.
    if splits.is_none() && spans.is_none() && !nodes.contains_key(&coord_key(e.p)) {
        let class = match *carried {
            Some(true) => ArcClass::In,
            Some(false) => ArcClass::Out,
            None => {
                let quick = t
                    .area_env
                    .map(|env| !env_intersects(&e.env(), &env))
                    .unwrap_or(true);
                if quick {
                    ArcClass::Out
                } else if t.locate_in_areas(e.p, &[]) == Location::Interior {
                    ArcClass::In
                } else {
                    ArcClass::Out
                }
            }
        };
        *carried = Some(class == ArcClass::In);
        emit_arc_facts(pred, s_is_a, is_ring, class, false);
        return;
    }

    let mut bounds: Vec<(f64, CoordKey)> = Vec::with_capacity(2 + splits.map_or(0, |s| s.len()));
    bounds.push((axis_param(e.p, e.q, e.p), coord_key(e.p)));
    if let Some(splits) = splits {
        let mut sorted = splits.clone();
        sorted.sort_by(|x, y| x.t.partial_cmp(&y.t).unwrap());
        sorted.dedup_by_key(|s| s.key);
        for s in sorted {
            bounds.push((s.t, s.key));
        }
    }
    bounds.push((axis_param(e.p, e.q, e.q), coord_key(e.q)));

    let empty_spans: Vec<Span> = Vec::new();
    let spans = spans.unwrap_or(&empty_spans);

    for w in bounds.windows(2) {
        let (t0, k0) = w[0];
        let (t1, k1) = w[1];
        if t0 >= t1 {
            continue;
        }
        let ring_span = spans
            .iter()
            .find(|sp| sp.other_is_ring && sp.t0 <= t0 && t1 <= sp.t1);
        let line_cov = spans
            .iter()
            .any(|sp| !sp.other_is_ring && sp.t0 <= t0 && t1 <= sp.t1);

        let class = if let Some(sp) = ring_span {
            *carried = None;
            ArcClass::On {
                same_side: sp.same_side,
            }
        } else if t.has_areas() {
            let inside = piece_in_areas(t, nodes, s_is_a, k0, k1, e, *carried);
            *carried = Some(inside);
            if inside {
                ArcClass::In
            } else {
                ArcClass::Out
            }
        } else {
            *carried = Some(false);
            ArcClass::Out
        };
        emit_arc_facts(pred, s_is_a, is_ring, class, line_cov);
        if pred.is_known() {
            return;
        }
    }
}

/// Whether an edge piece lies inside the other operand's areas. Anchored
/// at a bounding node on the other operand's rings when one exists
/// (wedge test over original coordinates), else carried from the
/// previous piece, else located by ray crossing from the edge's original
/// start vertex.
fn piece_in_areas(
    t: &RelateGeometry,
    nodes: &Nodes,
    s_is_a: bool,
    k0: CoordKey,
    k1: CoordKey,
    e: &Edge,
    carried: Option<bool>,
) -> bool {
    if let Some(node) = nodes.get(&k0) {
        if let Some(inside) = wedge_in(t, other_edges(node, s_is_a), node.pt, e.q) {
            return inside;
        }
    }
    if let Some(node) = nodes.get(&k1) {
        if let Some(inside) = wedge_in(t, other_edges(node, s_is_a), node.pt, e.p) {
            return inside;
        }
    }
    if let Some(c) = carried {
        return c;
    }
    t.locate_in_areas(e.p, &[]) == Location::Interior
}

fn other_edges<'n>(node: &'n Node, s_is_a: bool) -> &'n [u32] {
    if s_is_a {
        &node.b_edges
    } else {
        &node.a_edges
    }
}

/// Is the direction from `node` toward `dirpt` locally inside the other
/// operand's areas? `None` when no ring of the other operand passes
/// through the node.
fn wedge_in(t: &RelateGeometry, incident: &[u32], node: Coord<f64>, dirpt: Coord<f64>) -> Option<bool> {
    let mut any = false;
    for &eid in incident {
        if !t.edges[eid as usize].kind.is_ring() {
            continue;
        }
        any = true;
        let (a, p, b) = t.ring_wedge(eid, node);
        let interior_left = t.edge_interior_on_left(eid);
        match dir_in_wedge(p, a, b, dirpt, interior_left) {
            WedgeSide::In => return Some(true),
            WedgeSide::OnBorder | WedgeSide::Out => {}
        }
    }
    if any {
        Some(false)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum WedgeSide {
    In,
    Out,
    OnBorder,
}

/// Whether the direction from `p` toward `d` enters the polygon interior
/// at a boundary node with ring neighbors `a` (previous) and `b` (next).
/// All decisions are orientation signs over original coordinates.
fn dir_in_wedge(
    p: Coord<f64>,
    a: Coord<f64>,
    b: Coord<f64>,
    d: Coord<f64>,
    interior_left: bool,
) -> WedgeSide {
    use crate::intersect::orient;
    let (a, b) = if interior_left { (a, b) } else { (b, a) };
    let o_in = orient(a, p, d);
    let o_out = orient(p, b, d);
    if o_in == 0 && same_ray(p, a, d) {
        return WedgeSide::OnBorder;
    }
    if o_out == 0 && same_ray(p, b, d) {
        return WedgeSide::OnBorder;
    }
    let o_turn = orient(a, p, b);
    let inside = if o_turn > 0 {
        o_in > 0 && o_out > 0
    } else if o_turn < 0 {
        o_in > 0 || o_out > 0
    } else {
        o_in > 0
    };
    if inside {
        WedgeSide::In
    } else {
        WedgeSide::Out
    }
}

/// `d` lies on the ray from `p` toward `toward` (all three collinear).
fn same_ray(p: Coord<f64>, toward: Coord<f64>, d: Coord<f64>) -> bool {
    if (toward.x - p.x).abs() >= (toward.y - p.y).abs() {
        (toward.x > p.x) == (d.x > p.x) && d.x != p.x
    } else {
        (toward.y > p.y) == (d.y > p.y) && d.y != p.y
    }
}

/// Dimension facts carried by one classified arc.
fn emit_arc_facts(
    pred: &mut TopologyPredicate,
    s_is_a: bool,
    is_ring: bool,
    class: ArcClass,
    line_cov: bool,
) {
    use Location::{Boundary, Exterior, Interior};
    if is_ring {
        match class {
            ArcClass::In => {
                emit(pred, s_is_a, Boundary, Interior, Dimension::Curve);
                emit(pred, s_is_a, Interior, Interior, Dimension::Surface);
                emit(pred, s_is_a, Exterior, Interior, Dimension::Surface);
            }
            ArcClass::On { same_side: true } => {
                emit(pred, s_is_a, Boundary, Boundary, Dimension::Curve);
                emit(pred, s_is_a, Interior, Interior, Dimension::Surface);
            }
            ArcClass::On { same_side: false } => {
                emit(pred, s_is_a, Boundary, Boundary, Dimension::Curve);
                emit(pred, s_is_a, Interior, Exterior, Dimension::Surface);
                emit(pred, s_is_a, Exterior, Interior, Dimension::Surface);
            }
            ArcClass::Out => {
                if line_cov {
                    emit(pred, s_is_a, Boundary, Interior, Dimension::Curve);
                } else {
                    emit(pred, s_is_a, Boundary, Exterior, Dimension::Curve);
                }
                emit(pred, s_is_a, Interior, Exterior, Dimension::Surface);
            }
        }
    } else {
        match class {
            ArcClass::In => emit(pred, s_is_a, Interior, Interior, Dimension::Curve),
            ArcClass::On { .. } => emit(pred, s_is_a, Interior, Boundary, Dimension::Curve),
            ArcClass::Out => {
                if line_cov {
                    emit(pred, s_is_a, Interior, Interior, Dimension::Curve);
                } else {
                    emit(pred, s_is_a, Interior, Exterior, Dimension::Curve);
                }
            }
        }
    }
}

// ============================================================================
// Point facts
// ============================================================================

fn point_facts(s: &RelateGeometry, t: &RelateGeometry, s_is_a: bool, pred: &mut TopologyPredicate) {
    for pt in s.boundary_points() {
        let own = s.locate(pt);
        let other = locate_pruned(t, pt);
        emit(pred, s_is_a, own, other, Dimension::Point);
        if pred.is_known() {
            return;
        }
    }
    for &pt in &s.points {
        let own = s.locate(pt);
        let other = locate_pruned(t, pt);
        emit(pred, s_is_a, own, other, Dimension::Point);
        if pred.is_known() {
            return;
        }
    }
}

fn locate_pruned(t: &RelateGeometry, pt: Coord<f64>) -> Location {
    match t.env {
        Some(env) if env_contains_coord(&env, pt) => t.locate(pt),
        _ => Location::Exterior,
    }
}
