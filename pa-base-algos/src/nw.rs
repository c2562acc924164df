//! Full-matrix aligners with a linear gap penalty.
//!
//! `NW` computes a global (Needleman-Wunsch) alignment and `SW` a local
//! (Smith-Waterman) one. Both fill the same `(m+1) x (n+1)` matrix
//!
//! ```text
//! H(i,j) = max(H(i-1,j-1) + sub(a[i-1], b[j-1]), H(i-1,j) + gap, H(i,j-1) + gap)
//! ```
//!
//! and only differ in the boundary, the clamping at 0, and where the
//! traceback starts and stops.
pub mod affine;

use crate::matrix::Matrix;
use crate::trace::Traceback;
use pa_scoring::*;
use pa_types::Seq;
use std::cmp::max;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Boundaries `i*gap` and `j*gap`; trace from `(m, n)` to `(0, 0)`.
    Global,
    /// Boundaries and cells clamped at 0; trace from the best cell until a 0.
    Local,
}

/// The filled matrix, and the cell the traceback starts from.
struct Filled {
    h: Matrix,
    start: (usize, usize),
    score: Score,
}

fn fill(a: Seq, b: Seq, sc: &LinearScore, mode: Mode) -> Filled {
    let (m, n) = (a.len(), b.len());
    let mut h = Matrix::new(m + 1, n + 1, 0);
    if mode == Mode::Global {
        for i in 1..=m {
            h[(i, 0)] = sc.gaps(i);
        }
        for j in 1..=n {
            h[(0, j)] = sc.gaps(j);
        }
    }

    // (score, i, j) of the first cell with the largest value.
    let mut best = (0, 0, 0);
    for i in 1..=m {
        for j in 1..=n {
            let diag = h[(i - 1, j - 1)] + sc.sub(a[i - 1], b[j - 1]);
            let gap = max(h[(i - 1, j)], h[(i, j - 1)]) + sc.gap_penalty;
            let mut s = max(diag, gap);
            if mode == Mode::Local {
                s = max(s, 0);
                if s > best.0 {
                    best = (s, i, j);
                }
            }
            h[(i, j)] = s;
        }
        log::trace!("row {i}: {:?}", h.row(i));
    }

    match mode {
        Mode::Global => Filled {
            score: h[(m, n)],
            h,
            start: (m, n),
        },
        Mode::Local => Filled {
            h,
            start: (best.1, best.2),
            score: best.0,
        },
    }
}

/// Walk back from `filled.start`, preferring the diagonal, then up (`a`
/// against a gap), then left (`b` against a gap).
fn trace(a: Seq, b: Seq, sc: &LinearScore, mode: Mode, filled: Filled) -> Alignment {
    let Filled { h, start, score } = filled;
    let (mut i, mut j) = start;
    log::trace!("traceback from ({i}, {j}) with score {score}");
    let mut tb = Traceback::new(a, b);
    loop {
        let done = match mode {
            Mode::Global => i == 0 && j == 0,
            Mode::Local => i == 0 || j == 0 || h[(i, j)] == 0,
        };
        if done {
            break;
        }
        let s = h[(i, j)];
        if i > 0 && j > 0 && s == h[(i - 1, j - 1)] + sc.sub(a[i - 1], b[j - 1]) {
            tb.diagonal(i, j);
            i -= 1;
            j -= 1;
        } else if i > 0 && s == h[(i - 1, j)] + sc.gap_penalty {
            tb.del(i);
            i -= 1;
        } else if j > 0 && s == h[(i, j - 1)] + sc.gap_penalty {
            tb.ins(j);
            j -= 1;
        } else {
            unreachable!("cell ({i}, {j}) with score {s} has no predecessor");
        }
    }
    tb.finish(score, i..start.0, j..start.1)
}

/// Needleman-Wunsch global aligner with a linear gap penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NW {
    pub sc: LinearScore,
}

impl NW {
    pub fn new(sc: LinearScore) -> Self {
        Self { sc }
    }
}

impl Default for NW {
    fn default() -> Self {
        Self::new(LinearScore::global_default())
    }
}

impl Aligner for NW {
    fn align(&mut self, a: Seq, b: Seq) -> Result<Alignment, ConfigurationError> {
        self.sc.check_overflow(a.len(), b.len())?;
        log::debug!("NW on {}x{}", a.len(), b.len());
        let filled = fill(a, b, &self.sc, Mode::Global);
        Ok(trace(a, b, &self.sc, Mode::Global, filled))
    }
}

/// Smith-Waterman local aligner with a linear gap penalty.
///
/// Returns the empty alignment with score 0 when no pair of substrings has a
/// positive score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SW {
    pub sc: LinearScore,
}

impl SW {
    pub fn new(sc: LinearScore) -> Self {
        Self { sc }
    }
}

impl Default for SW {
    fn default() -> Self {
        Self::new(LinearScore::local_default())
    }
}

impl Aligner for SW {
    fn align(&mut self, a: Seq, b: Seq) -> Result<Alignment, ConfigurationError> {
        self.sc.check_overflow(a.len(), b.len())?;
        log::debug!("SW on {}x{}", a.len(), b.len());
        let filled = fill(a, b, &self.sc, Mode::Local);
        if filled.score == 0 {
            return Ok(Alignment::empty());
        }
        Ok(trace(a, b, &self.sc, Mode::Local, filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_matrix() {
        let sc = LinearScore::global_default();
        let f = fill(b"AG", b"AAG", &sc, Mode::Global);
        assert_eq!(f.h.row(0), &[0, -1, -2, -3]);
        assert_eq!(f.h.row(1), &[-1, 1, 0, -1]);
        assert_eq!(f.h.row(2), &[-2, 0, 0, 1]);
        assert_eq!(f.score, 1);
    }

    #[test]
    fn diagonal_is_preferred_on_ties() {
        // Matching A with either A of AA scores 0. At (1, 2) the diagonal ties
        // with the gap and wins, so the last A is matched.
        let x = NW::default().align(b"A", b"AA").unwrap();
        assert_eq!(x.a, b"-A");
        assert_eq!(x.b, b"AA");
        assert_eq!(x.score, 0);
    }

    #[test]
    fn gap_up_before_left() {
        // From (1, 1) with sub scoring -5, both gaps tie; up is taken first,
        // so the symbol of `a` is gapped at the end of the alignment.
        let sc = LinearScore::new(1, -5, -1);
        let x = NW::new(sc).align(b"A", b"C").unwrap();
        assert_eq!(x.a, b"-A");
        assert_eq!(x.b, b"C-");
        assert_eq!(x.score, -2);
    }

    #[test]
    fn local_clamps_and_restarts() {
        let sc = LinearScore::local_default();
        let x = SW::new(sc).align(b"TTTACGTTT", b"GGACGGG").unwrap();
        assert_eq!(x.a, b"ACG");
        assert_eq!(x.b, b"ACG");
        assert_eq!(x.score, 6);
        assert_eq!(x.a_range, 3..6);
        assert_eq!(x.b_range, 2..5);
    }

    #[test]
    fn local_first_maximum_wins() {
        // Both occurrences of AC score 4; the first one found row by row is kept.
        let x = SW::default().align(b"AC", b"ACTTAC").unwrap();
        assert_eq!(x.score, 4);
        assert_eq!(x.b_range, 0..2);
    }
}
