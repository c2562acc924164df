use pa_scoring::{Alignment, Score, GAP};
use pa_types::Seq;
use std::ops::Range;

/// Collects the columns of an alignment while walking back from its end.
///
/// Columns are pushed in reverse order and the rows are flipped once in
/// `finish`.
pub struct Traceback<'a> {
    a: Seq<'a>,
    b: Seq<'a>,
    row_a: Vec<u8>,
    row_b: Vec<u8>,
}

impl<'a> Traceback<'a> {
    pub fn new(a: Seq<'a>, b: Seq<'a>) -> Self {
        let cap = a.len() + b.len();
        Self {
            a,
            b,
            row_a: Vec::with_capacity(cap),
            row_b: Vec::with_capacity(cap),
        }
    }

    /// The column `a[i-1]` against `b[j-1]`.
    #[inline]
    pub fn diagonal(&mut self, i: usize, j: usize) {
        self.row_a.push(self.a[i - 1]);
        self.row_b.push(self.b[j - 1]);
    }

    /// The column `a[i-1]` against a gap.
    #[inline]
    pub fn del(&mut self, i: usize) {
        self.row_a.push(self.a[i - 1]);
        self.row_b.push(GAP);
    }

    /// The column of a gap against `b[j-1]`.
    #[inline]
    pub fn ins(&mut self, j: usize) {
        self.row_a.push(GAP);
        self.row_b.push(self.b[j - 1]);
    }

    pub fn finish(mut self, score: Score, a_range: Range<usize>, b_range: Range<usize>) -> Alignment {
        self.row_a.reverse();
        self.row_b.reverse();
        Alignment {
            a: self.row_a,
            b: self.row_b,
            score,
            a_range,
            b_range,
        }
    }
}
