//! DE-9IM intersection matrix and its named-predicate derivations.
//!
//! The dimensionally-extended nine-intersection model describes the
//! topological relationship between two geometries A and B as a 3×3 grid:
//! for each pair of regions (interior/boundary/exterior of A crossed with
//! the same for B), the dimension of the intersection of those regions.
//!
//! # Design
//!
//! Cells are monotone: the engine discovers intersection facts
//! incrementally and a cell only ever rises (empty → point → curve →
//! surface), never falls. The canonical 9-character serialization uses
//! `{F,0,1,2}` in row-major order `II,IB,IE,BI,BB,BE,EI,EB,EE`.

use crate::error::{RelateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a point relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// In the interior of the geometry.
    Interior,
    /// On the boundary of the geometry.
    Boundary,
    /// Outside the geometry.
    Exterior,
}

impl Location {
    /// Row/column index of this location in the matrix.
    pub(crate) fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }

}

/// Topological dimension of an intersection between two regions.
///
/// The discriminant order matters: cells are raised with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// No intersection ('F', conventional value -1).
    Empty,
    /// 0-dimensional intersection ('0').
    Point,
    /// 1-dimensional intersection ('1').
    Curve,
    /// 2-dimensional intersection ('2').
    Surface,
}

impl Dimension {
    /// Conventional numeric value: -1, 0, 1 or 2.
    pub fn value(self) -> i8 {
        match self {
            Dimension::Empty => -1,
            Dimension::Point => 0,
            Dimension::Curve => 1,
            Dimension::Surface => 2,
        }
    }

    /// Matrix-code symbol: 'F', '0', '1' or '2'.
    pub fn symbol(self) -> char {
        match self {
            Dimension::Empty => 'F',
            Dimension::Point => '0',
            Dimension::Curve => '1',
            Dimension::Surface => '2',
        }
    }

    fn from_symbol(c: char) -> Option<Dimension> {
        match c {
            'F' => Some(Dimension::Empty),
            '0' => Some(Dimension::Point),
            '1' => Some(Dimension::Curve),
            '2' => Some(Dimension::Surface),
            _ => None,
        }
    }

    /// True for any non-empty dimension.
    pub fn intersects(self) -> bool {
        self != Dimension::Empty
    }
}

/// One cell of a DE-9IM pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternCell {
    /// `*`: matches anything, including empty.
    Any,
    /// `T`: matches any non-empty dimension.
    NonEmpty,
    /// `F`, `0`, `1` or `2`: matches that dimension exactly.
    Dim(Dimension),
}

impl PatternCell {
    fn parse(c: char) -> Option<PatternCell> {
        match c {
            '*' => Some(PatternCell::Any),
            'T' => Some(PatternCell::NonEmpty),
            _ => Dimension::from_symbol(c).map(PatternCell::Dim),
        }
    }

    /// Exact match against a final cell value.
    pub(crate) fn matches(self, dim: Dimension) -> bool {
        match self {
            PatternCell::Any => true,
            PatternCell::NonEmpty => dim.intersects(),
            PatternCell::Dim(d) => dim == d,
        }
    }

    /// Whether a monotone cell currently at `dim` can never match this
    /// cell again, no matter how far it is raised later.
    pub(crate) fn exceeded_by(self, dim: Dimension) -> bool {
        match self {
            PatternCell::Any | PatternCell::NonEmpty => false,
            PatternCell::Dim(d) => dim > d,
        }
    }

    /// Whether a monotone cell currently at `dim` is satisfied
    /// permanently: no further raise can break the match.
    pub(crate) fn satisfied_by(self, dim: Dimension) -> bool {
        match self {
            PatternCell::Any => true,
            PatternCell::NonEmpty => dim.intersects(),
            // Only the maximum dimension is immune to further raises.
            PatternCell::Dim(d) => d == Dimension::Surface && dim == Dimension::Surface,
        }
    }
}

/// A parsed 9-cell DE-9IM pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pattern {
    pub(crate) cells: [PatternCell; 9],
}

impl Pattern {
    /// Parse a 9-character pattern over `{0,1,2,T,F,*}`.
    pub(crate) fn parse(pattern: &str) -> Result<Pattern> {
        let chars: Vec<char> = pattern.chars().collect();
        if chars.len() != 9 {
            return Err(RelateError::InvalidPattern(format!(
                "expected 9 characters, got {}: {:?}",
                chars.len(),
                pattern
            )));
        }
        let mut cells = [PatternCell::Any; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = PatternCell::parse(c).ok_or_else(|| {
                RelateError::InvalidPattern(format!(
                    "disallowed character {:?} at position {} in {:?}",
                    c, i, pattern
                ))
            })?;
        }
        Ok(Pattern { cells })
    }

    /// Exact match against a completed matrix.
    pub(crate) fn matches(&self, m: &IntersectionMatrix) -> bool {
        (0..9).all(|i| self.cells[i].matches(m.cells[i / 3][i % 3]))
    }
}

/// The DE-9IM intersection matrix.
///
/// Rows index regions of geometry A, columns regions of geometry B, in
/// interior/boundary/exterior order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionMatrix {
    /// Create a matrix with every cell empty.
    pub fn new() -> IntersectionMatrix {
        IntersectionMatrix {
            cells: [[Dimension::Empty; 3]; 3],
        }
    }

    /// Get the dimension of a cell.
    pub fn get(&self, a: Location, b: Location) -> Dimension {
        self.cells[a.index()][b.index()]
    }

    /// Raise a cell to `max(current, dim)`. Cells never regress: a
    /// higher-dimension intersection supersedes lower ones discovered
    /// later for the same cell.
    pub fn set(&mut self, a: Location, b: Location, dim: Dimension) {
        let cell = &mut self.cells[a.index()][b.index()];
        if dim > *cell {
            *cell = dim;
        }
    }

    /// The transposed matrix: `relate(B, A)` is the transpose of
    /// `relate(A, B)`.
    pub fn transposed(&self) -> IntersectionMatrix {
        let mut out = IntersectionMatrix::new();
        for r in 0..3 {
            for c in 0..3 {
                out.cells[c][r] = self.cells[r][c];
            }
        }
        out
    }

    /// Match against a 9-character pattern: `T` is any non-empty
    /// dimension, `*` matches anything, digits and `F` match exactly.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        Ok(Pattern::parse(pattern)?.matches(self))
    }

    fn cell(&self, a: Location, b: Location) -> Dimension {
        self.cells[a.index()][b.index()]
    }

    fn ii(&self) -> Dimension {
        self.cell(Location::Interior, Location::Interior)
    }

    /// No intersection in any interior/boundary cell.
    pub fn is_disjoint(&self) -> bool {
        use Location::{Boundary as B, Interior as I};
        !self.cell(I, I).intersects()
            && !self.cell(I, B).intersects()
            && !self.cell(B, I).intersects()
            && !self.cell(B, B).intersects()
    }

    /// Negation of [`is_disjoint`](Self::is_disjoint).
    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// A contains B: `T*****FF*`.
    pub fn is_contains(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.ii().intersects()
            && !self.cell(E, I).intersects()
            && !self.cell(E, B).intersects()
    }

    /// A within B: `T*F**F***`.
    pub fn is_within(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        self.ii().intersects()
            && !self.cell(I, E).intersects()
            && !self.cell(B, E).intersects()
    }

    /// A covers B: some intersection, and nothing of B escapes A.
    pub fn is_covers(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        let touches_somewhere = self.cell(I, I).intersects()
            || self.cell(I, B).intersects()
            || self.cell(B, I).intersects()
            || self.cell(B, B).intersects();
        touches_somewhere
            && !self.cell(E, I).intersects()
            && !self.cell(E, B).intersects()
    }

    /// A covered by B: some intersection, and nothing of A escapes B.
    pub fn is_covered_by(&self) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        let touches_somewhere = self.cell(I, I).intersects()
            || self.cell(I, B).intersects()
            || self.cell(B, I).intersects()
            || self.cell(B, B).intersects();
        touches_somewhere
            && !self.cell(I, E).intersects()
            && !self.cell(B, E).intersects()
    }

    /// Topological equality: `T*F**FFF*`, with equal operand dimensions.
    pub fn is_equals_topo(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary as B, Exterior as E, Interior as I};
        dim_a == dim_b
            && self.ii().intersects()
            && !self.cell(I, E).intersects()
            && !self.cell(B, E).intersects()
            && !self.cell(E, I).intersects()
            && !self.cell(E, B).intersects()
    }

    /// Touches: interiors do not meet, but boundaries touch something.
    /// Defined for all operand dimension pairs except point/point.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Boundary as B, Interior as I};
        if dim_a == Dimension::Point && dim_b == Dimension::Point {
            return false;
        }
        !self.ii().intersects()
            && (self.cell(I, B).intersects()
                || self.cell(B, I).intersects()
                || self.cell(B, B).intersects())
    }

    /// Crosses: interiors meet, and each geometry reaches the other's
    /// exterior. Defined for lower/higher-dimension pairs and for
    /// line/line (where the interior intersection must be a point).
    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Exterior as E, Interior as I};
        if dim_a < dim_b {
            self.ii().intersects() && self.cell(I, E).intersects()
        } else if dim_a > dim_b {
            self.ii().intersects() && self.cell(E, I).intersects()
        } else if dim_a == Dimension::Curve {
            self.ii() == Dimension::Point
        } else {
            false
        }
    }

    /// Overlaps: interiors meet in a same-dimension intersection and
    /// each geometry reaches the other's exterior.
    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::{Exterior as E, Interior as I};
        if dim_a != dim_b {
            return false;
        }
        let escapes = self.cell(I, E).intersects() && self.cell(E, I).intersects();
        match dim_a {
            Dimension::Point | Dimension::Surface => self.ii().intersects() && escapes,
            Dimension::Curve => self.ii() == Dimension::Curve && escapes,
            Dimension::Empty => false,
        }
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl FromStr for IntersectionMatrix {
    type Err = RelateError;

    fn from_str(s: &str) -> Result<IntersectionMatrix> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(RelateError::InvalidPattern(format!(
                "expected 9 characters, got {}: {:?}",
                chars.len(),
                s
            )));
        }
        let mut m = IntersectionMatrix::new();
        for (i, &c) in chars.iter().enumerate() {
            let dim = Dimension::from_symbol(c).ok_or_else(|| {
                RelateError::InvalidPattern(format!(
                    "disallowed character {:?} at position {} in {:?}",
                    c, i, s
                ))
            })?;
            m.cells[i / 3][i % 3] = dim;
        }
        Ok(m)
    }
}
