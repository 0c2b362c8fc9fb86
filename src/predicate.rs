//! Incremental topology predicates.
//!
//! A [`TopologyPredicate`] consumes dimension facts — "the intersection of
//! region X of A and region Y of B has at least dimension D" — in whatever
//! order the engine discovers them, and decides as early as possible
//! whether the answer is already determined.
//!
//! # Design
//!
//! Variants form a small closed set: the full-matrix accumulator (never
//! short-circuits), the named boolean relations, and the arbitrary
//! pattern matcher. The named relations are expressed as alternative
//! DE-9IM patterns (the relation holds if any alternative matches), which
//! gives all of them one shared early-decision rule over the monotone
//! matrix:
//!
//! - an alternative *fails permanently* once a confirmed cell exceeds
//!   what its pattern allows (`F` with anything non-empty, a digit with a
//!   higher dimension);
//! - TRUE may be declared early only from cells that are *satisfied
//!   permanently* (`*`, `T` with any hit, `2` at surface dimension);
//! - everything else resolves at exhaustion against the final matrix.
//!
//! The final verdict is therefore independent of fact order; only how
//! early the verdict is reached varies.

use crate::error::Result;
use crate::matrix::{Dimension, IntersectionMatrix, Location, Pattern};
use std::fmt;

/// Common DE-9IM pattern constants.
pub mod patterns {
    /// Interiors intersect.
    pub const INTERIOR_INTERSECTS: &str = "T********";
    /// Boundaries touch but interiors do not intersect.
    pub const ADJACENT: &str = "F***T****";
    /// A contains B with no boundary contact.
    pub const CONTAINS_PROPERLY: &str = "T**FF*FF*";
}

/// Dimension gate for relations whose pattern depends on the operand
/// dimensions; resolved when the engine calls `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    None,
    Crosses,
    Overlaps,
    EqualsTopo,
    Touches,
}

#[derive(Debug, Clone)]
struct Alternative {
    pattern: Pattern,
    failed: bool,
}

impl Alternative {
    fn new(pattern: &str) -> Alternative {
        Alternative {
            // Fixed relation patterns are compile-time constants.
            pattern: Pattern::parse(pattern).expect("fixed relation pattern"),
            failed: false,
        }
    }
}

#[derive(Debug, Clone)]
enum Kind {
    /// Full-matrix accumulator.
    Matrix,
    /// Boolean relation: the OR of one or more alternative patterns.
    Patterns { alts: Vec<Alternative>, gate: Gate },
}

/// Stateful evaluator for one relate call.
///
/// Created fresh per call, fed facts by the engine, queried for its
/// verdict. The tri-state verdict is `None` (undetermined), `Some(true)`
/// or `Some(false)`.
#[derive(Debug, Clone)]
pub struct TopologyPredicate {
    name: &'static str,
    kind: Kind,
    matrix: IntersectionMatrix,
    verdict: Option<bool>,
}

impl TopologyPredicate {
    fn from_patterns(name: &'static str, alts: &[&str], gate: Gate) -> TopologyPredicate {
        TopologyPredicate {
            name,
            kind: Kind::Patterns {
                alts: alts.iter().map(|p| Alternative::new(p)).collect(),
                gate,
            },
            matrix: IntersectionMatrix::new(),
            verdict: None,
        }
    }

    /// Full-matrix accumulator: consumes every fact, never
    /// short-circuits; the result is the completed matrix.
    pub fn matrix() -> TopologyPredicate {
        TopologyPredicate {
            name: "relateMatrix",
            kind: Kind::Matrix,
            matrix: IntersectionMatrix::new(),
            verdict: None,
        }
    }

    /// Any interior/boundary cell intersects.
    pub fn intersects() -> TopologyPredicate {
        Self::from_patterns(
            "intersects",
            &["T********", "*T*******", "***T*****", "****T****"],
            Gate::None,
        )
    }

    /// No interior/boundary cell intersects.
    pub fn disjoint() -> TopologyPredicate {
        Self::from_patterns("disjoint", &["FF*FF****"], Gate::None)
    }

    /// A contains B.
    pub fn contains() -> TopologyPredicate {
        Self::from_patterns("contains", &["T*****FF*"], Gate::None)
    }

    /// A within B.
    pub fn within() -> TopologyPredicate {
        Self::from_patterns("within", &["T*F**F***"], Gate::None)
    }

    /// A covers B.
    pub fn covers() -> TopologyPredicate {
        Self::from_patterns(
            "covers",
            &["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"],
            Gate::None,
        )
    }

    /// A covered by B.
    pub fn covered_by() -> TopologyPredicate {
        Self::from_patterns(
            "coveredBy",
            &["T*F**F***", "*TF**F***", "**FT*F***", "**F*TF***"],
            Gate::None,
        )
    }

    /// A crosses B (dimension-dependent pattern).
    pub fn crosses() -> TopologyPredicate {
        Self::from_patterns("crosses", &[], Gate::Crosses)
    }

    /// A touches B: boundary contact without interior contact.
    pub fn touches() -> TopologyPredicate {
        Self::from_patterns("touches", &[], Gate::Touches)
    }

    /// A overlaps B (dimension-dependent pattern).
    pub fn overlaps() -> TopologyPredicate {
        Self::from_patterns("overlaps", &[], Gate::Overlaps)
    }

    /// Topological equality.
    pub fn equals_topo() -> TopologyPredicate {
        Self::from_patterns("equalsTopo", &[], Gate::EqualsTopo)
    }

    /// Arbitrary 9-character DE-9IM pattern over `{0,1,2,T,F,*}`.
    ///
    /// Fails with [`RelateError::InvalidPattern`](crate::RelateError) at
    /// construction time, before any geometry is touched.
    pub fn matches(pattern: &str) -> Result<TopologyPredicate> {
        let parsed = Pattern::parse(pattern)?;
        Ok(TopologyPredicate {
            name: "matches",
            kind: Kind::Patterns {
                alts: vec![Alternative {
                    pattern: parsed,
                    failed: false,
                }],
                gate: Gate::None,
            },
            matrix: IntersectionMatrix::new(),
            verdict: None,
        })
    }

    /// Diagnostic name of the relation.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the verdict is already determined.
    pub fn is_known(&self) -> bool {
        self.verdict.is_some()
    }

    /// The verdict: `None` until determined.
    pub fn verdict(&self) -> Option<bool> {
        self.verdict
    }

    /// The accumulated matrix. Complete only for the matrix accumulator
    /// after a full relate call; short-circuiting predicates may stop
    /// with a partial matrix.
    pub fn intersection_matrix(&self) -> &IntersectionMatrix {
        &self.matrix
    }

    /// Consume self, yielding the accumulated matrix.
    pub fn into_matrix(self) -> IntersectionMatrix {
        self.matrix
    }

    /// Resolve dimension-gated relations before any geometry work.
    pub(crate) fn init(&mut self, dim_a: Dimension, dim_b: Dimension) {
        let Kind::Patterns { alts, gate } = &mut self.kind else {
            return;
        };
        match *gate {
            Gate::None => {}
            Gate::Crosses => {
                if dim_a != Dimension::Empty && dim_b != Dimension::Empty && dim_a < dim_b {
                    *alts = vec![Alternative::new("T*T******")];
                } else if dim_b != Dimension::Empty && dim_a > dim_b {
                    *alts = vec![Alternative::new("T*****T**")];
                } else if dim_a == Dimension::Curve && dim_b == Dimension::Curve {
                    *alts = vec![Alternative::new("0********")];
                } else {
                    self.verdict = Some(false);
                }
            }
            Gate::Overlaps => {
                if dim_a != dim_b || dim_a == Dimension::Empty {
                    self.verdict = Some(false);
                } else if dim_a == Dimension::Curve {
                    *alts = vec![Alternative::new("1*T***T**")];
                } else {
                    *alts = vec![Alternative::new("T*T***T**")];
                }
            }
            Gate::EqualsTopo => {
                if dim_a != dim_b {
                    self.verdict = Some(false);
                } else {
                    *alts = vec![Alternative::new("T*F**FFF*")];
                }
            }
            Gate::Touches => {
                if dim_a == Dimension::Point && dim_b == Dimension::Point {
                    self.verdict = Some(false);
                } else {
                    *alts = vec![
                        Alternative::new("FT*******"),
                        Alternative::new("F**T*****"),
                        Alternative::new("F***T****"),
                    ];
                }
            }
        }
    }

    /// Consume one dimension fact.
    pub(crate) fn update(&mut self, a: Location, b: Location, dim: Dimension) {
        if self.verdict.is_some() {
            return;
        }
        self.matrix.set(a, b, dim);
        let Kind::Patterns { alts, .. } = &mut self.kind else {
            return;
        };
        let mut all_failed = true;
        let mut any_satisfied = false;
        for alt in alts.iter_mut() {
            if alt.failed {
                continue;
            }
            let mut satisfied = true;
            for i in 0..9 {
                let row = [Location::Interior, Location::Boundary, Location::Exterior][i / 3];
                let col = [Location::Interior, Location::Boundary, Location::Exterior][i % 3];
                let value = self.matrix.get(row, col);
                if alt.pattern.cells[i].exceeded_by(value) {
                    alt.failed = true;
                    break;
                }
                if !alt.pattern.cells[i].satisfied_by(value) {
                    satisfied = false;
                }
            }
            if alt.failed {
                continue;
            }
            all_failed = false;
            if satisfied {
                any_satisfied = true;
            }
        }
        if all_failed {
            self.verdict = Some(false);
        } else if any_satisfied {
            self.verdict = Some(true);
        }
    }

    /// All facts exhausted: resolve the verdict from the final matrix.
    pub(crate) fn finish(&mut self) {
        if self.verdict.is_some() {
            return;
        }
        self.verdict = Some(match &self.kind {
            Kind::Matrix => true,
            Kind::Patterns { alts, .. } => alts
                .iter()
                .any(|alt| !alt.failed && alt.pattern.matches(&self.matrix)),
        });
    }
}

impl fmt::Display for TopologyPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
