//! Hirschberg's divide and conquer global alignment in linear space.
//!
//! `a` is split in the middle. A forward scan of the top half and a backward
//! scan of the bottom half give, for each column `j` of `b`, the best score
//! of a path crossing the middle row at `j`. The alignment is split at the
//! first column with the maximal sum and both halves are solved recursively.
//!
//! The rows run along the shorter input: when `a` is shorter than `b`, the
//! inputs are swapped and the result is transposed back.
use crate::front::{Direction, RowScanner};
use pa_scoring::*;
use pa_types::{Seq, Sequence};
use std::iter::repeat;

/// Global aligner with a linear gap penalty using `O(min(|a|, |b|))` memory
/// besides the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hirschberg {
    pub sc: LinearScore,
}

impl Hirschberg {
    pub fn new(sc: LinearScore) -> Self {
        Self { sc }
    }

    /// Score of a single symbol `x` placed against position `k` of `other`,
    /// with every other symbol against a gap. `k == other.len()` puts `x`
    /// against a gap as well.
    fn single_symbol_score(&self, x: u8, other: Seq, k: usize) -> Score {
        let n = other.len();
        if k < n {
            self.sc.gaps(k) + self.sc.sub(x, other[k]) + self.sc.gaps(n - k - 1)
        } else {
            self.sc.gaps(n + 1)
        }
    }

    /// The first placement of `x` in `other` with the maximal score.
    fn best_placement(&self, x: u8, other: Seq) -> (usize, Score) {
        let mut best = (0, self.single_symbol_score(x, other, 0));
        for k in 1..=other.len() {
            let s = self.single_symbol_score(x, other, k);
            if s > best.1 {
                best = (k, s);
            }
        }
        best
    }

    /// Align `a` and `b`, which start at positions `offset` of the full inputs.
    fn align_dc(
        &self,
        a: Seq,
        b: Seq,
        offset: (usize, usize),
        scanners: &mut (RowScanner, RowScanner),
    ) -> Alignment {
        let (m, n) = (a.len(), b.len());
        let a_range = offset.0..offset.0 + m;
        let b_range = offset.1..offset.1 + n;

        if m == 0 {
            return Alignment {
                a: vec![GAP; n],
                b: b.to_vec(),
                score: self.sc.gaps(n),
                a_range,
                b_range,
            };
        }
        if n == 0 {
            return Alignment {
                a: a.to_vec(),
                b: vec![GAP; m],
                score: self.sc.gaps(m),
                a_range,
                b_range,
            };
        }
        if m == 1 {
            let (j, score) = self.best_placement(a[0], b);
            let (row_a, row_b): (Sequence, Sequence) = if j < n {
                let row_a = repeat(GAP).take(j).chain([a[0]]).chain(repeat(GAP).take(n - j - 1));
                (row_a.collect(), b.to_vec())
            } else {
                let row_a = repeat(GAP).take(n).chain([a[0]]).collect();
                (row_a, b.iter().copied().chain([GAP]).collect())
            };
            return Alignment {
                a: row_a,
                b: row_b,
                score,
                a_range,
                b_range,
            };
        }
        if n == 1 {
            let (i, score) = self.best_placement(b[0], a);
            let (row_a, row_b): (Sequence, Sequence) = if i < m {
                let row_b = repeat(GAP).take(i).chain([b[0]]).chain(repeat(GAP).take(m - i - 1));
                (a.to_vec(), row_b.collect())
            } else {
                let row_b = repeat(GAP).take(m).chain([b[0]]).collect();
                (a.iter().copied().chain([GAP]).collect(), row_b)
            };
            return Alignment {
                a: row_a,
                b: row_b,
                score,
                a_range,
                b_range,
            };
        }

        // Find the column where the optimal path crosses the middle row.
        let mid = m / 2;
        let (fw, bw) = &mut *scanners;
        let left = fw.last_row(&a[..mid], b, Direction::Forward);
        let right = bw.last_row(&a[mid..], b, Direction::Backward);
        let mut split = (0, left[0] + right[0]);
        for j in 1..=n {
            let s = left[j] + right[j];
            if s > split.1 {
                split = (j, s);
            }
        }
        let (j, score) = split;
        log::trace!("split {m}x{n} at ({mid}, {j}) with score {score}");

        let mut left = self.align_dc(&a[..mid], &b[..j], offset, scanners);
        let right = self.align_dc(
            &a[mid..],
            &b[j..],
            (offset.0 + mid, offset.1 + j),
            scanners,
        );
        debug_assert_eq!(left.score + right.score, score);

        // Join
        left.append(right);
        left
    }
}

impl Default for Hirschberg {
    fn default() -> Self {
        Self::new(LinearScore::global_default())
    }
}

impl Aligner for Hirschberg {
    fn align(&mut self, a: Seq, b: Seq) -> Result<Alignment, ConfigurationError> {
        self.sc.check_overflow(a.len(), b.len())?;
        log::debug!("Hirschberg on {}x{}", a.len(), b.len());
        let mut scanners = (RowScanner::new(self.sc), RowScanner::new(self.sc));
        if a.len() < b.len() {
            let x = self.align_dc(b, a, (0, 0), &mut scanners);
            return Ok(Alignment {
                a: x.b,
                b: x.a,
                score: x.score,
                a_range: x.b_range,
                b_range: x.a_range,
            });
        }
        Ok(self.align_dc(a, b, (0, 0), &mut scanners))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn align(a: &[u8], b: &[u8]) -> Alignment {
        Hirschberg::default().align(a, b).unwrap()
    }

    #[test]
    fn empty_sides() {
        let x = align(b"", b"ACG");
        assert_eq!((&x.a[..], &x.b[..], x.score), (&b"---"[..], &b"ACG"[..], -3));
        let x = align(b"AC", b"");
        assert_eq!((&x.a[..], &x.b[..], x.score), (&b"AC"[..], &b"--"[..], -2));
        assert_eq!(align(b"", b""), Alignment::empty());
    }

    #[test]
    fn single_symbol_first_best_placement() {
        let x = align(b"C", b"ACAC");
        assert_eq!(x.a, b"-C--");
        assert_eq!(x.score, 1 - 3);

        // No match: the first position wins the tie with all other substitutions.
        let x = align(b"G", b"AC");
        assert_eq!(x.a, b"G-");
        assert_eq!(x.score, -2);

        let x = align(b"ACAC", b"C");
        assert_eq!(x.b, b"-C--");
    }

    #[test]
    fn single_symbol_gapped_when_cheaper() {
        // Substituting costs 10, two gaps cost 2.
        let mut h = Hirschberg::new(LinearScore::new(1, -10, -1));
        let x = h.align(b"G", b"A").unwrap();
        assert_eq!(x.a, b"-G");
        assert_eq!(x.b, b"A-");
        assert_eq!(x.score, -2);
        let x = h.align(b"GG", b"A").unwrap();
        assert_eq!(x.a, b"GG-");
        assert_eq!(x.b, b"--A");
        assert_eq!(x.score, -3);
    }

    #[test]
    fn shorter_input_is_transposed() {
        let (a, b) = (b"TATGC", b"AGTACGCA");
        let x = align(a, b);
        let y = align(b, a);
        assert_eq!((&x.a, &x.b), (&y.b, &y.a));
        assert_eq!(x.score, y.score);
        assert_eq!((x.a_range.clone(), x.b_range.clone()), (0..5, 0..8));
        assert_eq!(x.verify(a, b), Ok(()));
        assert_eq!(x.linear_score(&LinearScore::global_default()), x.score);
    }

    #[test]
    fn split_ranges_cover_inputs() {
        let (a, b) = (b"AGTACGCA", b"TATGC");
        let x = align(a, b);
        assert_eq!(x.a_range, 0..8);
        assert_eq!(x.b_range, 0..5);
        assert_eq!(x.verify(a, b), Ok(()));
        assert_eq!(x.linear_score(&LinearScore::global_default()), x.score);
    }
}
