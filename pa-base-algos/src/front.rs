use pa_scoring::{LinearScore, Score};
use pa_types::Seq;
use std::cmp::max;

/// The direction to run in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Align prefixes: `row[j]` is the score of `a` against `b[..j]`.
    Forward,
    /// Align suffixes: `row[j]` is the score of `a` against `b[j..]`.
    Backward,
}

/// Computes the last row of the global alignment matrix of `a` and `b` in
/// `O(|b|)` memory, by keeping only the previous and the current row.
///
/// The buffers are reused between calls.
#[derive(Debug, Clone)]
pub struct RowScanner {
    sc: LinearScore,
    prev: Vec<Score>,
    cur: Vec<Score>,
}

impl RowScanner {
    pub fn new(sc: LinearScore) -> Self {
        Self {
            sc,
            prev: vec![],
            cur: vec![],
        }
    }

    /// The scores of `a` against all prefixes (`Forward`) or all suffixes
    /// (`Backward`) of `b`, indexed by the position in `b` where they end or
    /// start. The result has length `|b|+1`.
    pub fn last_row(&mut self, a: Seq, b: Seq, direction: Direction) -> &[Score] {
        let n = b.len();
        let sc = self.sc;
        let gap = sc.gap_penalty;
        self.prev.clear();
        self.cur.clear();
        self.cur.resize(n + 1, 0);
        match direction {
            Direction::Forward => {
                self.prev.extend((0..=n).map(|j| sc.gaps(j)));
                for (i, &x) in a.iter().enumerate() {
                    self.cur[0] = sc.gaps(i + 1);
                    for j in 1..=n {
                        self.cur[j] = max(
                            self.prev[j - 1] + sc.sub(x, b[j - 1]),
                            max(self.prev[j], self.cur[j - 1]) + gap,
                        );
                    }
                    std::mem::swap(&mut self.prev, &mut self.cur);
                }
            }
            Direction::Backward => {
                self.prev.extend((0..=n).map(|j| sc.gaps(n - j)));
                for (i, &x) in a.iter().rev().enumerate() {
                    self.cur[n] = sc.gaps(i + 1);
                    for j in (0..n).rev() {
                        self.cur[j] = max(
                            self.prev[j + 1] + sc.sub(x, b[j]),
                            max(self.prev[j], self.cur[j + 1]) + gap,
                        );
                    }
                    std::mem::swap(&mut self.prev, &mut self.cur);
                }
            }
        }
        &self.prev
    }
}

/// The last row of the global alignment matrix of `a` and `b`: the scores of
/// `a` against each prefix of `b`.
///
/// Scores are not checked for overflow; see `LinearScore::check_overflow`.
pub fn last_row(a: Seq, b: Seq, sc: &LinearScore) -> Vec<Score> {
    RowScanner::new(*sc)
        .last_row(a, b, Direction::Forward)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_matches_full_matrix() {
        // Last row of the matrix in `nw::tests::global_matrix`.
        let sc = LinearScore::global_default();
        assert_eq!(last_row(b"AG", b"AAG", &sc), vec![-2, 0, 0, 1]);
        assert_eq!(last_row(b"", b"AAG", &sc), vec![0, -1, -2, -3]);
        assert_eq!(last_row(b"AG", b"", &sc), vec![-2]);
    }

    #[test]
    fn backward_is_forward_on_reversed_input() {
        let sc = LinearScore::new(2, -1, -2);
        let (a, b) = (b"GATTACA", b"GCATGCU");
        let ra: Vec<u8> = a.iter().rev().copied().collect();
        let rb: Vec<u8> = b.iter().rev().copied().collect();
        let mut forward = last_row(&ra, &rb, &sc);
        forward.reverse();
        let mut scanner = RowScanner::new(sc);
        assert_eq!(scanner.last_row(a, b, Direction::Backward), &forward[..]);
    }

    #[test]
    fn buffers_are_reused() {
        let mut scanner = RowScanner::new(LinearScore::global_default());
        let long = scanner.last_row(b"ACGT", b"ACGTACGT", Direction::Forward).to_vec();
        assert_eq!(long[4], 4);
        assert_eq!(
            scanner.last_row(b"A", b"A", Direction::Backward),
            &[1, -1]
        );
    }
}
