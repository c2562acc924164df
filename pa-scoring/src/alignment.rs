//! The `Alignment` returned by all aligners, and its CIGAR representation.

use crate::{AffineScore, AlignmentError, LinearScore, Score, GAP};
use pa_types::{seq_to_string, Seq, Sequence};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Range};

/// The operation in a single alignment column.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum AlignOp {
    Match,
    Sub,
    /// A symbol of `b` against a gap.
    Ins,
    /// A symbol of `a` against a gap.
    Del,
}

impl AlignOp {
    /// The operation of the column with `x` in row `a` and `y` in row `b`.
    pub fn from_column(x: u8, y: u8) -> AlignOp {
        if x == GAP {
            AlignOp::Ins
        } else if y == GAP {
            AlignOp::Del
        } else if x == y {
            AlignOp::Match
        } else {
            AlignOp::Sub
        }
    }

    /// The extended CIGAR character.
    pub fn to_char(self) -> char {
        match self {
            AlignOp::Match => '=',
            AlignOp::Sub => 'X',
            AlignOp::Ins => 'I',
            AlignOp::Del => 'D',
        }
    }

    pub fn is_gap(self) -> bool {
        matches!(self, AlignOp::Ins | AlignOp::Del)
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct CigarElem {
    pub op: AlignOp,
    pub cnt: usize,
}

/// Run-length encoded alignment operations.
#[derive(Default, Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Cigar {
    pub ops: Vec<CigarElem>,
}

impl Cigar {
    pub fn push(&mut self, op: AlignOp) {
        if let Some(s) = self.ops.last_mut() {
            if s.op == op {
                s.cnt += 1;
                return;
            }
        }
        self.ops.push(CigarElem { op, cnt: 1 });
    }

    /// The number of alignment columns.
    pub fn len(&self) -> usize {
        self.ops.iter().map(|e| e.cnt).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl FromIterator<AlignOp> for Cigar {
    fn from_iter<T: IntoIterator<Item = AlignOp>>(iter: T) -> Self {
        let mut cigar = Cigar::default();
        for op in iter {
            cigar.push(op);
        }
        cigar
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.ops {
            write!(f, "{}{}", elem.cnt, elem.op.to_char())?;
        }
        Ok(())
    }
}

/// An alignment of `a[a_range]` against `b[b_range]`.
///
/// `a` and `b` are the two rows of the alignment: equal length, padded with
/// `GAP`. For global alignments the ranges cover the full inputs; for local
/// alignments they are the aligned regions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub a: Sequence,
    pub b: Sequence,
    pub score: Score,
    pub a_range: Range<usize>,
    pub b_range: Range<usize>,
}

impl Alignment {
    /// The empty alignment with score 0.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The number of columns.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }

    pub fn ops(&self) -> impl Iterator<Item = AlignOp> + '_ {
        self.a
            .iter()
            .zip(&self.b)
            .map(|(&x, &y)| AlignOp::from_column(x, y))
    }

    pub fn cigar(&self) -> Cigar {
        self.ops().collect()
    }

    /// `|` below identical columns, spaces elsewhere.
    pub fn match_line(&self) -> String {
        self.ops()
            .map(|op| if op == AlignOp::Match { '|' } else { ' ' })
            .collect()
    }

    /// Recompute the score of the columns under a linear model.
    pub fn linear_score(&self, sc: &LinearScore) -> Score {
        self.ops()
            .map(|op| match op {
                AlignOp::Match => sc.match_score,
                AlignOp::Sub => sc.mismatch_penalty,
                AlignOp::Ins | AlignOp::Del => sc.gap_penalty,
            })
            .sum()
    }

    /// Recompute the score of the columns under an affine model.
    /// Each maximal run of `Ins` or of `Del` columns is charged one gap open.
    pub fn affine_score(&self, sc: &AffineScore) -> Score {
        let mut score = 0;
        let mut prev = None;
        for op in self.ops() {
            score += match op {
                AlignOp::Match => sc.match_score,
                AlignOp::Sub => sc.mismatch_penalty,
                AlignOp::Ins | AlignOp::Del if prev == Some(op) => sc.gap_extend,
                AlignOp::Ins | AlignOp::Del => sc.open_extend(),
            };
            prev = Some(op);
        }
        score
    }

    /// Append `other`, which aligns the parts of the inputs directly following
    /// the ranges covered by `self`.
    pub fn append(&mut self, other: Alignment) {
        if self.is_empty() && self.a_range.is_empty() && self.b_range.is_empty() {
            self.a_range = other.a_range.start..other.a_range.start;
            self.b_range = other.b_range.start..other.b_range.start;
        }
        self.a.extend_from_slice(&other.a);
        self.b.extend_from_slice(&other.b);
        self.score += other.score;
        self.a_range.end += other.a_range.len();
        self.b_range.end += other.b_range.len();
    }

    /// Check that this is a well-formed alignment of `a[a_range]` and `b[b_range]`.
    pub fn verify(&self, a: Seq, b: Seq) -> Result<(), AlignmentError> {
        if self.a.len() != self.b.len() {
            return Err(AlignmentError::RowLengthMismatch(self.a.len(), self.b.len()));
        }
        if let Some(col) = self
            .a
            .iter()
            .zip(&self.b)
            .position(|(&x, &y)| x == GAP && y == GAP)
        {
            return Err(AlignmentError::DoubleGap(col));
        }
        let spells = |row: &[u8], input: Seq, range: &Range<usize>| {
            input.get(range.clone()).is_some_and(|region| {
                row.iter()
                    .copied()
                    .filter(|&c| c != GAP)
                    .eq(region.iter().copied())
            })
        };
        if !spells(&self.a, a, &self.a_range) {
            return Err(AlignmentError::SequenceMismatch('a'));
        }
        if !spells(&self.b, b, &self.b_range) {
            return Err(AlignmentError::SequenceMismatch('b'));
        }
        Ok(())
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", seq_to_string(&self.a))?;
        writeln!(f, "{}", self.match_line())?;
        writeln!(f, "{}", seq_to_string(&self.b))?;
        write!(f, "score {}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aln(a: &str, b: &str, score: Score) -> Alignment {
        let a_len = a.bytes().filter(|&c| c != GAP).count();
        let b_len = b.bytes().filter(|&c| c != GAP).count();
        Alignment {
            a: a.as_bytes().to_vec(),
            b: b.as_bytes().to_vec(),
            score,
            a_range: 0..a_len,
            b_range: 0..b_len,
        }
    }

    #[test]
    fn cigar_runs() {
        let x = aln("GATT-ACA", "GCATTGCA", 0);
        assert_eq!(x.cigar().to_string(), "1=2X1=1I1X2=");
        let x = aln("AC--GT", "ACTTG-", 0);
        assert_eq!(x.cigar().to_string(), "2=2I1=1D");
        assert_eq!(x.cigar().len(), 6);
        assert_eq!(x.match_line(), "||  | ");
    }

    #[test]
    fn rescoring() {
        let x = aln("AC--GT", "ACTTG-", 0);
        assert_eq!(x.linear_score(&LinearScore::global_default()), 3 - 3);
        // Two runs: one insertion of length 2, one deletion of length 1.
        let sc = AffineScore::new(2, -1, -3, -1);
        assert_eq!(x.affine_score(&sc), 3 * 2 + (-3 - 2) + (-3 - 1));
    }

    #[test]
    fn verify_detects_malformed_rows() {
        assert_eq!(aln("AC-G", "A-TG", 0).verify(b"ACG", b"ATG"), Ok(()));
        assert_eq!(
            aln("AC-G", "A-T", 0).verify(b"ACG", b"AT"),
            Err(AlignmentError::RowLengthMismatch(4, 3))
        );
        assert_eq!(
            aln("A-G", "A-G", 0).verify(b"AG", b"AG"),
            Err(AlignmentError::DoubleGap(1))
        );
        assert_eq!(
            aln("AC", "AC", 0).verify(b"AG", b"AC"),
            Err(AlignmentError::SequenceMismatch('a'))
        );
    }

    #[test]
    fn verify_local_ranges() {
        let mut x = aln("GTT-AC", "GTTTAC", 7);
        x.a_range = 1..6;
        x.b_range = 1..7;
        assert_eq!(x.verify(b"GGTTACTA", b"TGTTTACGG"), Ok(()));
        x.a_range = 2..7;
        assert_eq!(
            x.verify(b"GGTTACTA", b"TGTTTACGG"),
            Err(AlignmentError::SequenceMismatch('a'))
        );
    }

    #[test]
    fn append_joins_ranges() {
        let mut left = aln("AC", "A-", 1);
        let right = aln("-GT", "TGT", 2);
        left.append(right);
        assert_eq!(left.a, b"AC-GT");
        assert_eq!(left.b, b"A-TGT");
        assert_eq!(left.score, 3);
        assert_eq!(left.a_range, 0..4);
        assert_eq!(left.b_range, 0..4);
        assert_eq!(left.verify(b"ACGT", b"ATGT"), Ok(()));

        let mut empty = Alignment::empty();
        empty.append(aln("A", "A", 1));
        assert_eq!(empty.a_range, 0..1);
    }

    #[test]
    fn display() {
        let x = aln("GA-T", "GATT", 1);
        assert_eq!(x.to_string(), "GA-T\n|| |\nGATT\nscore 1");
    }
}
