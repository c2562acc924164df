//! Smith-Waterman with affine gap scores (Gotoh), using three layers:
//!
//! - `M(i,j)`: the alignment ends in a match or substitution,
//! - `I(i,j)`: it ends with `b[j-1]` against a gap,
//! - `D(i,j)`: it ends with `a[i-1]` against a gap.
//!
//! A run of `l` gap columns scores `open + l * extend`. All three layers are
//! clamped at 0 so an alignment can start anywhere.
use crate::matrix::Matrix;
use crate::trace::Traceback;
use pa_scoring::*;
use pa_types::Seq;
use std::cmp::max;

/// Score of unreachable boundary states. Adding a single transition to it
/// can not overflow once `check_overflow` passed.
const NEG_INF: Score = Score::MIN / 2;

/// The layer an alignment ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Match,
    Ins,
    Del,
}

impl Layer {
    /// The order in which predecessor layers are probed during traceback.
    const ORDER: [Layer; 3] = [Layer::Match, Layer::Ins, Layer::Del];
}

struct Layers {
    m: Matrix,
    ins: Matrix,
    del: Matrix,
}

impl Layers {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            m: Matrix::new(rows, cols, 0),
            ins: Matrix::new(rows, cols, NEG_INF),
            del: Matrix::new(rows, cols, NEG_INF),
        }
    }

    #[inline]
    fn get(&self, layer: Layer, i: usize, j: usize) -> Score {
        match layer {
            Layer::Match => self.m[(i, j)],
            Layer::Ins => self.ins[(i, j)],
            Layer::Del => self.del[(i, j)],
        }
    }
}

/// Smith-Waterman local aligner with affine gap scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AffineSW {
    pub sc: AffineScore,
}

impl AffineSW {
    pub fn new(sc: AffineScore) -> Self {
        Self { sc }
    }

    /// Score of entering `to` at the cell following a state in layer `from`.
    #[inline]
    fn transition(&self, from: Layer, to: Layer, s: Score) -> Score {
        match (from, to) {
            (_, Layer::Match) => s,
            (Layer::Ins, Layer::Ins) | (Layer::Del, Layer::Del) => self.sc.gap_extend,
            _ => self.sc.open_extend(),
        }
    }

    /// Fill all three layers. Returns them with the position and layer of the
    /// last (in row major order, then M, I, D) state with the maximal score.
    fn fill(&self, a: Seq, b: Seq) -> (Layers, Score, (usize, usize, Layer)) {
        let (m, n) = (a.len(), b.len());
        let mut l = Layers::new(m + 1, n + 1);
        let sc = &self.sc;
        let oe = sc.open_extend();
        let e = sc.gap_extend;

        let mut best = (0, (0, 0, Layer::Match));
        for i in 1..=m {
            for j in 1..=n {
                let ins = max(
                    max(l.m[(i, j - 1)] + oe, l.ins[(i, j - 1)] + e),
                    max(l.del[(i, j - 1)] + oe, 0),
                );
                let del = max(
                    max(l.m[(i - 1, j)] + oe, l.ins[(i - 1, j)] + oe),
                    max(l.del[(i - 1, j)] + e, 0),
                );
                let s = sc.sub(a[i - 1], b[j - 1]);
                let diag = max(
                    l.m[(i - 1, j - 1)],
                    max(l.ins[(i - 1, j - 1)], l.del[(i - 1, j - 1)]),
                );
                let mat = max(diag + s, 0);
                l.m[(i, j)] = mat;
                l.ins[(i, j)] = ins;
                l.del[(i, j)] = del;

                // Later states win ties; a score of 0 never starts a traceback.
                for (layer, v) in [(Layer::Match, mat), (Layer::Ins, ins), (Layer::Del, del)] {
                    if v > 0 && v >= best.0 {
                        best = (v, (i, j, layer));
                    }
                }
            }
        }
        (l, best.0, best.1)
    }

    fn trace(
        &self,
        a: Seq,
        b: Seq,
        l: &Layers,
        score: Score,
        (end_i, end_j, end_layer): (usize, usize, Layer),
    ) -> Alignment {
        log::trace!("traceback from ({end_i}, {end_j}) in {end_layer:?} with score {score}");
        let mut tb = Traceback::new(a, b);
        let (mut i, mut j, mut layer) = (end_i, end_j, end_layer);
        // A positive value is never a boundary state, so `i, j > 0` here.
        while l.get(layer, i, j) > 0 {
            let v = l.get(layer, i, j);
            let (pi, pj) = match layer {
                Layer::Match => (i - 1, j - 1),
                Layer::Ins => (i, j - 1),
                Layer::Del => (i - 1, j),
            };
            let s = match layer {
                Layer::Match => self.sc.sub(a[i - 1], b[j - 1]),
                _ => 0,
            };
            let Some(prev) = Layer::ORDER
                .into_iter()
                .find(|&p| l.get(p, pi, pj) + self.transition(p, layer, s) == v)
            else {
                unreachable!("state ({i}, {j}, {layer:?}) with score {v} has no predecessor");
            };
            match layer {
                Layer::Match => tb.diagonal(i, j),
                Layer::Ins => tb.ins(j),
                Layer::Del => tb.del(i),
            }
            (i, j, layer) = (pi, pj, prev);
        }
        tb.finish(score, i..end_i, j..end_j)
    }
}

impl Aligner for AffineSW {
    fn align(&mut self, a: Seq, b: Seq) -> Result<Alignment, ConfigurationError> {
        self.sc.check_overflow(a.len(), b.len())?;
        log::debug!("affine SW on {}x{}", a.len(), b.len());
        let (layers, score, end) = self.fill(a, b);
        if score == 0 {
            return Ok(Alignment::empty());
        }
        Ok(self.trace(a, b, &layers, score, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_gap_run_is_opened_once() {
        // Deleting one T costs 4 and joins both halves into 8 matches.
        let x = AffineSW::default().align(b"ACGTTACGT", b"ACGTACGT").unwrap();
        assert_eq!(x.score, 8 * 2 - 4);
        assert_eq!(x.affine_score(&AffineSW::default().sc), x.score);
        assert_eq!(x.cigar().to_string(), "3=1D5=");
    }

    #[test]
    fn gap_open_splits_regions() {
        // Skipping AAA costs 6, more than the 4 gained by also matching GG.
        let x = AffineSW::default().align(b"ACGTAAAGG", b"ACGTGG").unwrap();
        assert_eq!(x.score, 8);
        assert_eq!(x.a, b"ACGT");
        assert_eq!(x.a_range, 0..4);
    }

    #[test]
    fn last_best_state_wins() {
        let (a, b) = (b"AC", b"ACTTAC");
        let x = AffineSW::default().align(a, b).unwrap();
        assert_eq!(x.score, 4);
        assert_eq!(x.a_range, 0..2);
        assert_eq!(x.b_range, 4..6);
        assert_eq!(x.verify(a, b), Ok(()));
    }

    #[test]
    fn no_similarity() {
        let x = AffineSW::default().align(b"AAAA", b"CCCC").unwrap();
        assert_eq!(x, Alignment::empty());
        let x = AffineSW::default().align(b"", b"CCCC").unwrap();
        assert_eq!(x, Alignment::empty());
    }

    #[test]
    fn ins_and_del_layers() {
        let sc = AffineScore::new(3, -3, -1, -1);
        let x = AffineSW::new(sc).align(b"AACCTT", b"AAGGCCTT").unwrap();
        assert_eq!(x.cigar().to_string(), "2=2I4=");
        assert_eq!(x.score, 6 * 3 - 3);
        let x = AffineSW::new(sc).align(b"AAGGCCTT", b"AACCTT").unwrap();
        assert_eq!(x.cigar().to_string(), "2=2D4=");
        assert_eq!(x.score, 6 * 3 - 3);
    }
}
