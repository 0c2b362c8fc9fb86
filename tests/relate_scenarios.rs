//! Scenario tests over a WKT corpus: named predicates in both argument
//! orders, the transpose law, prepared/one-shot equivalence, and
//! pattern/named consistency.

use geo_types::Geometry;
use spatial_relate::{
    contains, covered_by, covers, crosses, disjoint, equals_topo, intersects, overlaps, prepare,
    relate, relate_pattern, touches, within, Dimension, IntersectionMatrix,
};
use std::str::FromStr;

fn geom(wkt: &str) -> Geometry<f64> {
    let parsed = wkt::Wkt::<f64>::from_str(wkt).expect("valid WKT");
    Geometry::try_from(parsed).expect("convertible geometry")
}

fn check_relate(wkta: &str, wktb: &str, expected: &str) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(
        relate(&a, &b).unwrap().to_string(),
        expected,
        "relate({}, {})",
        wkta,
        wktb
    );
}

fn check_intersects_disjoint(wkta: &str, wktb: &str, expected: bool) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(intersects(&a, &b).unwrap(), expected, "intersects a/b");
    assert_eq!(intersects(&b, &a).unwrap(), expected, "intersects b/a");
    assert_eq!(disjoint(&a, &b).unwrap(), !expected, "disjoint a/b");
    assert_eq!(disjoint(&b, &a).unwrap(), !expected, "disjoint b/a");
}

fn check_contains_within(wkta: &str, wktb: &str, expected: bool) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(contains(&a, &b).unwrap(), expected, "contains a/b");
    assert_eq!(within(&b, &a).unwrap(), expected, "within b/a");
}

fn check_covers_covered_by(wkta: &str, wktb: &str, expected: bool) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(covers(&a, &b).unwrap(), expected, "covers a/b");
    assert_eq!(covered_by(&b, &a).unwrap(), expected, "coveredBy b/a");
}

fn check_crosses(wkta: &str, wktb: &str, expected: bool) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(crosses(&a, &b).unwrap(), expected, "crosses a/b");
    assert_eq!(crosses(&b, &a).unwrap(), expected, "crosses b/a");
}

fn check_touches(wkta: &str, wktb: &str, expected: bool) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(touches(&a, &b).unwrap(), expected, "touches a/b");
    assert_eq!(touches(&b, &a).unwrap(), expected, "touches b/a");
}

fn check_overlaps(wkta: &str, wktb: &str, expected: bool) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(overlaps(&a, &b).unwrap(), expected, "overlaps a/b");
    assert_eq!(overlaps(&b, &a).unwrap(), expected, "overlaps b/a");
}

fn check_equals(wkta: &str, wktb: &str, expected: bool) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(equals_topo(&a, &b).unwrap(), expected, "equalsTopo a/b");
    assert_eq!(equals_topo(&b, &a).unwrap(), expected, "equalsTopo b/a");
}

fn check_relate_matches(wkta: &str, wktb: &str, pattern: &str, expected: bool) {
    let (a, b) = (geom(wkta), geom(wktb));
    assert_eq!(
        relate_pattern(&a, &b, pattern).unwrap(),
        expected,
        "matches({}) for {} / {}",
        pattern,
        wkta,
        wktb
    );
}

const SQUARE_10: &str = "POLYGON((0 0, 10 0, 10 10, 0 10, 0 0))";
const SQUARE_4: &str = "POLYGON((0 0, 4 0, 4 4, 0 4, 0 0))";
const DONUT: &str = "POLYGON((0 0, 8 0, 8 8, 0 8, 0 0), (2 2, 2 6, 6 6, 6 2, 2 2))";

// ============================================================================
// Point scenarios
// ============================================================================

#[test]
fn point_point() {
    check_intersects_disjoint("POINT(1 1)", "POINT(1 1)", true);
    check_intersects_disjoint("POINT(1 1)", "POINT(2 1)", false);
    check_equals("POINT(1 1)", "POINT(1 1)", true);
    check_touches("POINT(1 1)", "POINT(1 1)", false);
    check_relate("POINT(1 1)", "POINT(1 1)", "0FFFFFFF2");
    check_relate("POINT(1 1)", "POINT(2 1)", "FF0FFF0F2");
    check_overlaps(
        "MULTIPOINT((0 0), (1 1))",
        "MULTIPOINT((1 1), (2 2))",
        true,
    );
}

#[test]
fn point_line() {
    check_relate("POINT(5 0)", "LINESTRING(0 0, 10 0)", "0FFFFF102");
    check_contains_within("LINESTRING(0 0, 10 0)", "POINT(5 0)", true);
    check_touches("POINT(0 0)", "LINESTRING(0 0, 10 0)", true);
    check_relate("POINT(0 0)", "LINESTRING(0 0, 10 0)", "F0FFFF102");
    check_covers_covered_by("LINESTRING(0 0, 10 0)", "POINT(0 0)", true);
    check_contains_within("LINESTRING(0 0, 10 0)", "POINT(0 0)", false);
    check_intersects_disjoint("POINT(5 1)", "LINESTRING(0 0, 10 0)", false);
}

#[test]
fn point_at_even_parity_node_is_interior() {
    // The shared endpoint of two chained lines has even parity: the
    // linework interior passes through it.
    check_contains_within(
        "MULTILINESTRING((0 0, 2 0), (2 0, 4 0))",
        "POINT(2 0)",
        true,
    );
    check_touches("MULTILINESTRING((0 0, 2 0), (2 0, 4 0))", "POINT(2 0)", false);
}

#[test]
fn point_polygon() {
    check_contains_within(SQUARE_4, "POINT(2 2)", true);
    check_relate("POINT(2 2)", SQUARE_4, "0FFFFF212");
    check_touches("POINT(0 2)", SQUARE_4, true);
    check_relate("POINT(0 2)", SQUARE_4, "F0FFFF212");
    check_covers_covered_by(SQUARE_4, "POINT(0 2)", true);
    check_contains_within(SQUARE_4, "POINT(0 2)", false);
    check_intersects_disjoint("POINT(9 9)", SQUARE_4, false);
    // Hole interior is exterior; hole ring is boundary.
    check_intersects_disjoint("POINT(4 4)", DONUT, false);
    check_touches("POINT(2 4)", DONUT, true);
    check_contains_within(DONUT, "POINT(1 1)", true);
}

// ============================================================================
// Line scenarios
// ============================================================================

#[test]
fn line_line() {
    check_relate("LINESTRING(0 0, 4 4)", "LINESTRING(0 4, 4 0)", "0F1FF0102");
    check_crosses("LINESTRING(0 0, 4 4)", "LINESTRING(0 4, 4 0)", true);
    check_relate("LINESTRING(0 0, 2 0)", "LINESTRING(1 0, 3 0)", "1010F0102");
    check_overlaps("LINESTRING(0 0, 2 0)", "LINESTRING(1 0, 3 0)", true);
    check_equals("LINESTRING(0 0, 2 2)", "LINESTRING(2 2, 0 0)", true);
    check_contains_within("LINESTRING(0 0, 4 0)", "LINESTRING(1 0, 2 0)", true);
    check_relate("LINESTRING(0 0, 4 0)", "LINESTRING(1 0, 2 0)", "101FF0FF2");
    check_touches("LINESTRING(0 0, 1 1)", "LINESTRING(1 1, 2 0)", true);
    check_relate("LINESTRING(0 0, 10 0)", "LINESTRING(5 0, 5 5)", "F01FF0102");
    check_touches("LINESTRING(0 0, 10 0)", "LINESTRING(5 0, 5 5)", true);
    check_intersects_disjoint("LINESTRING(0 0, 1 0)", "LINESTRING(0 1, 1 1)", false);
}

#[test]
fn line_equal_with_different_tessellation() {
    check_equals("LINESTRING(0 0, 4 0)", "LINESTRING(0 0, 2 0, 4 0)", true);
}

#[test]
fn closed_line_has_no_boundary() {
    // A closed line touching a point at its start vertex meets it with
    // its interior.
    check_contains_within(
        "LINESTRING(0 0, 4 0, 4 4, 0 0)",
        "POINT(0 0)",
        true,
    );
}

#[test]
fn line_polygon() {
    check_relate("LINESTRING(-2 2, 6 2)", SQUARE_4, "101FF0212");
    check_crosses("LINESTRING(-2 2, 6 2)", SQUARE_4, true);
    check_relate("LINESTRING(-3 2, 0 2)", SQUARE_4, "FF1F00212");
    check_touches("LINESTRING(-3 2, 0 2)", SQUARE_4, true);
    check_crosses("LINESTRING(-3 2, 0 2)", SQUARE_4, false);
    check_relate("LINESTRING(1 1, 3 1)", SQUARE_4, "1FF0FF212");
    check_contains_within(SQUARE_4, "LINESTRING(1 1, 3 1)", true);
    check_relate("LINESTRING(1 0, 3 0)", SQUARE_4, "F1FF0F212");
    check_touches("LINESTRING(1 0, 3 0)", SQUARE_4, true);
    check_covers_covered_by(SQUARE_4, "LINESTRING(1 0, 3 0)", true);
    check_contains_within(SQUARE_4, "LINESTRING(1 0, 3 0)", false);
}

#[test]
fn line_through_polygon_corner() {
    check_relate("LINESTRING(-2 -2, 2 2)", SQUARE_4, "1010F0212");
    check_crosses("LINESTRING(-2 -2, 2 2)", SQUARE_4, true);
}

#[test]
fn line_entering_through_boundary_segment() {
    // Runs along the bottom edge, then turns into the interior.
    check_relate("LINESTRING(1 0, 3 0, 3 2)", SQUARE_4, "11F00F212");
    check_covers_covered_by(SQUARE_4, "LINESTRING(1 0, 3 0, 3 2)", true);
    check_touches("LINESTRING(1 0, 3 0, 3 2)", SQUARE_4, false);
}

// ============================================================================
// Polygon scenarios
// ============================================================================

#[test]
fn polygon_polygon_disjoint() {
    check_relate(SQUARE_4, "POLYGON((10 0, 14 0, 14 4, 10 4, 10 0))", "FF2FF1212");
    check_intersects_disjoint(SQUARE_4, "POLYGON((10 0, 14 0, 14 4, 10 4, 10 0))", false);
}

#[test]
fn polygon_polygon_overlapping() {
    check_relate(SQUARE_4, "POLYGON((2 2, 6 2, 6 6, 2 6, 2 2))", "212101212");
    check_overlaps(SQUARE_4, "POLYGON((2 2, 6 2, 6 6, 2 6, 2 2))", true);
    check_intersects_disjoint(SQUARE_4, "POLYGON((2 2, 6 2, 6 6, 2 6, 2 2))", true);
}

#[test]
fn polygon_polygon_edge_adjacent() {
    check_relate(SQUARE_4, "POLYGON((4 0, 8 0, 8 4, 4 4, 4 0))", "FF2F11212");
    check_touches(SQUARE_4, "POLYGON((4 0, 8 0, 8 4, 4 4, 4 0))", true);
    check_overlaps(SQUARE_4, "POLYGON((4 0, 8 0, 8 4, 4 4, 4 0))", false);
    check_relate_matches(
        SQUARE_4,
        "POLYGON((4 0, 8 0, 8 4, 4 4, 4 0))",
        "F***T****",
        true,
    );
}

#[test]
fn polygon_polygon_corner_adjacent() {
    check_relate(SQUARE_4, "POLYGON((4 4, 8 4, 8 8, 4 8, 4 4))", "FF2F01212");
    check_touches(SQUARE_4, "POLYGON((4 4, 8 4, 8 8, 4 8, 4 4))", true);
}

#[test]
fn polygon_polygon_contained() {
    check_relate(SQUARE_10, "POLYGON((2 2, 5 2, 5 5, 2 5, 2 2))", "212FF1FF2");
    check_contains_within(SQUARE_10, "POLYGON((2 2, 5 2, 5 5, 2 5, 2 2))", true);
    check_covers_covered_by(SQUARE_10, "POLYGON((2 2, 5 2, 5 5, 2 5, 2 2))", true);
    check_touches(SQUARE_10, "POLYGON((2 2, 5 2, 5 5, 2 5, 2 2))", false);
}

#[test]
fn polygon_polygon_contained_with_shared_boundary() {
    check_relate(SQUARE_10, SQUARE_4, "212F11FF2");
    check_contains_within(SQUARE_10, SQUARE_4, true);
    check_covers_covered_by(SQUARE_10, SQUARE_4, true);
    check_relate_matches(SQUARE_10, SQUARE_4, "T**FF*FF*", false);
    check_relate_matches(
        SQUARE_10,
        "POLYGON((2 2, 5 2, 5 5, 2 5, 2 2))",
        "T**FF*FF*",
        true,
    );
}

#[test]
fn polygon_polygon_equal() {
    check_equals(SQUARE_4, SQUARE_4, true);
    check_relate(SQUARE_4, SQUARE_4, "2FFF1FFF2");
    // Same ring, different start vertex and orientation.
    check_equals(SQUARE_4, "POLYGON((4 4, 4 0, 0 0, 0 4, 4 4))", true);
    check_relate(SQUARE_4, "POLYGON((4 4, 4 0, 0 0, 0 4, 4 4))", "2FFF1FFF2");
}

#[test]
fn polygon_in_donut_hole() {
    check_relate(DONUT, "POLYGON((3 3, 5 3, 5 5, 3 5, 3 3))", "FF2FF1212");
    check_intersects_disjoint(DONUT, "POLYGON((3 3, 5 3, 5 5, 3 5, 3 3))", false);
}

#[test]
fn polygon_filling_donut_hole() {
    check_relate(DONUT, "POLYGON((2 2, 6 2, 6 6, 2 6, 2 2))", "FF2F112F2");
    check_touches(DONUT, "POLYGON((2 2, 6 2, 6 6, 2 6, 2 2))", true);
}

#[test]
fn multipolygon_contained() {
    check_contains_within(
        SQUARE_10,
        "MULTIPOLYGON(((2 2, 4 2, 4 4, 2 4, 2 2)), ((6 6, 8 6, 8 8, 6 8, 6 6)))",
        true,
    );
    check_relate(
        SQUARE_10,
        "MULTIPOLYGON(((2 2, 4 2, 4 4, 2 4, 2 2)), ((6 6, 8 6, 8 8, 6 8, 6 6)))",
        "212FF1FF2",
    );
}

// ============================================================================
// Collection and empty scenarios
// ============================================================================

#[test]
fn collection_within_polygon() {
    check_relate(
        "GEOMETRYCOLLECTION(POINT(2 2), LINESTRING(1 1, 3 1))",
        SQUARE_4,
        "1FF0FF212",
    );
    check_contains_within(
        SQUARE_4,
        "GEOMETRYCOLLECTION(POINT(2 2), LINESTRING(1 1, 3 1))",
        true,
    );
}

#[test]
fn empty_operands() {
    check_intersects_disjoint("POLYGON EMPTY", SQUARE_4, false);
    check_intersects_disjoint("LINESTRING EMPTY", "LINESTRING(0 0, 1 1)", false);
    check_relate("POLYGON EMPTY", SQUARE_4, "FFFFFF212");
    check_relate(SQUARE_4, "POLYGON EMPTY", "FF2FF1FF2");
    check_relate("POLYGON EMPTY", "POLYGON EMPTY", "FFFFFFFF2");
    check_contains_within(SQUARE_4, "POLYGON EMPTY", false);
    check_contains_within("POLYGON EMPTY", "POLYGON EMPTY", false);
    check_equals("POLYGON EMPTY", "POLYGON EMPTY", false);
    check_touches("POLYGON EMPTY", SQUARE_4, false);
    check_crosses("POLYGON EMPTY", SQUARE_4, false);
}

// ============================================================================
// Cross-cutting properties over the corpus
// ============================================================================

fn corpus() -> Vec<(Geometry<f64>, Geometry<f64>)> {
    let pairs = [
        ("POINT(1 1)", "POINT(1 1)"),
        ("POINT(5 0)", "LINESTRING(0 0, 10 0)"),
        ("POINT(0 2)", SQUARE_4),
        ("POINT(4 4)", DONUT),
        ("LINESTRING(0 0, 4 4)", "LINESTRING(0 4, 4 0)"),
        ("LINESTRING(0 0, 2 0)", "LINESTRING(1 0, 3 0)"),
        ("LINESTRING(-2 2, 6 2)", SQUARE_4),
        ("LINESTRING(-3 2, 0 2)", SQUARE_4),
        ("LINESTRING(1 0, 3 0, 3 2)", SQUARE_4),
        ("LINESTRING(-2 -2, 2 2)", SQUARE_4),
        (SQUARE_4, "POLYGON((2 2, 6 2, 6 6, 2 6, 2 2))"),
        (SQUARE_4, "POLYGON((4 0, 8 0, 8 4, 4 4, 4 0))"),
        (SQUARE_10, SQUARE_4),
        (DONUT, "POLYGON((3 3, 5 3, 5 5, 3 5, 3 3))"),
        (DONUT, "POLYGON((2 2, 6 2, 6 6, 2 6, 2 2))"),
        (SQUARE_10, "MULTIPOLYGON(((2 2, 4 2, 4 4, 2 4, 2 2)), ((6 6, 8 6, 8 8, 6 8, 6 6)))"),
        ("GEOMETRYCOLLECTION(POINT(2 2), LINESTRING(1 1, 3 1))", SQUARE_4),
        ("POLYGON EMPTY", SQUARE_4),
        ("MULTILINESTRING((0 0, 2 0), (2 0, 4 0))", "LINESTRING(2 0, 2 3)"),
    ];
    pairs.iter().map(|(a, b)| (geom(a), geom(b))).collect()
}

#[test]
fn transpose_law_over_corpus() {
    for (a, b) in &corpus() {
        let ab = relate(a, b).unwrap();
        let ba = relate(b, a).unwrap();
        assert_eq!(ab.transposed(), ba, "transpose law for {:?} / {:?}", a, b);
    }
}

#[test]
fn symmetric_predicates_over_corpus() {
    for (a, b) in &corpus() {
        assert_eq!(intersects(a, b).unwrap(), intersects(b, a).unwrap());
        assert_eq!(disjoint(a, b).unwrap(), !intersects(a, b).unwrap());
        assert_eq!(touches(a, b).unwrap(), touches(b, a).unwrap());
        assert_eq!(crosses(a, b).unwrap(), crosses(b, a).unwrap());
        assert_eq!(overlaps(a, b).unwrap(), overlaps(b, a).unwrap());
        assert_eq!(equals_topo(a, b).unwrap(), equals_topo(b, a).unwrap());
        assert_eq!(contains(a, b).unwrap(), within(b, a).unwrap());
        assert_eq!(covers(a, b).unwrap(), covered_by(b, a).unwrap());
    }
}

#[test]
fn prepared_equivalence_over_corpus() {
    for (a, b) in &corpus() {
        let prepared = prepare(a).unwrap();
        assert_eq!(prepared.relate(b).unwrap(), relate(a, b).unwrap());
        assert_eq!(prepared.intersects(b).unwrap(), intersects(a, b).unwrap());
        assert_eq!(prepared.disjoint(b).unwrap(), disjoint(a, b).unwrap());
        assert_eq!(prepared.contains(b).unwrap(), contains(a, b).unwrap());
        assert_eq!(prepared.within(b).unwrap(), within(a, b).unwrap());
        assert_eq!(prepared.covers(b).unwrap(), covers(a, b).unwrap());
        assert_eq!(prepared.covered_by(b).unwrap(), covered_by(a, b).unwrap());
        assert_eq!(prepared.crosses(b).unwrap(), crosses(a, b).unwrap());
        assert_eq!(prepared.touches(b).unwrap(), touches(a, b).unwrap());
        assert_eq!(prepared.overlaps(b).unwrap(), overlaps(a, b).unwrap());
        assert_eq!(prepared.equals_topo(b).unwrap(), equals_topo(a, b).unwrap());
    }
}

#[test]
fn named_predicates_agree_with_matrix() {
    for (a, b) in &corpus() {
        let m: IntersectionMatrix = relate(a, b).unwrap();
        let dim_a = prepare(a).unwrap().dimension();
        let dim_b = prepare(b).unwrap().dimension();
        assert_eq!(intersects(a, b).unwrap(), m.is_intersects());
        assert_eq!(disjoint(a, b).unwrap(), m.is_disjoint());
        assert_eq!(contains(a, b).unwrap(), m.is_contains());
        assert_eq!(within(a, b).unwrap(), m.is_within());
        assert_eq!(covers(a, b).unwrap(), m.is_covers());
        assert_eq!(covered_by(a, b).unwrap(), m.is_covered_by());
        assert_eq!(touches(a, b).unwrap(), m.is_touches(dim_a, dim_b));
        assert_eq!(crosses(a, b).unwrap(), m.is_crosses(dim_a, dim_b));
        assert_eq!(overlaps(a, b).unwrap(), m.is_overlaps(dim_a, dim_b));
        assert_eq!(equals_topo(a, b).unwrap(), m.is_equals_topo(dim_a, dim_b));
    }
}

#[test]
fn named_predicates_agree_with_fixed_patterns() {
    for (a, b) in &corpus() {
        let m = relate(a, b).unwrap();
        assert_eq!(contains(a, b).unwrap(), m.matches("T*****FF*").unwrap());
        assert_eq!(within(a, b).unwrap(), m.matches("T*F**F***").unwrap());
        assert_eq!(disjoint(a, b).unwrap(), m.matches("FF*FF****").unwrap());
        let covers_any = m.matches("T*****FF*").unwrap()
            || m.matches("*T****FF*").unwrap()
            || m.matches("***T**FF*").unwrap()
            || m.matches("****T*FF*").unwrap();
        assert_eq!(covers(a, b).unwrap(), covers_any);
    }
}

#[test]
fn relate_pattern_rejects_malformed_patterns() {
    let a = geom(SQUARE_4);
    assert!(relate_pattern(&a, &a, "T*****FF").is_err());
    assert!(relate_pattern(&a, &a, "T*****FF**").is_err());
    assert!(relate_pattern(&a, &a, "T*****FFX").is_err());
    assert!(relate_pattern(&a, &a, "t*****FF*").is_err());
}

#[test]
fn dimension_of_prepared_operands() {
    assert_eq!(prepare(&geom("POINT(1 1)")).unwrap().dimension(), Dimension::Point);
    assert_eq!(
        prepare(&geom("LINESTRING(0 0, 1 1)")).unwrap().dimension(),
        Dimension::Curve
    );
    assert_eq!(prepare(&geom(SQUARE_4)).unwrap().dimension(), Dimension::Surface);
    assert_eq!(
        prepare(&geom("POLYGON EMPTY")).unwrap().dimension(),
        Dimension::Empty
    );
}
