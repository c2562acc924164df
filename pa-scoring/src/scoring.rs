//! This module contains the `LinearScore` and `AffineScore` scoring models,
//! and the loosely typed `ScoringConfig` they are built from.
//!
//! Scores are maximised. Penalties are conventionally negative, but no sign
//! is assumed anywhere: the aligners always take the maximum over all
//! transitions, so any choice of signs gives a well defined optimum.

use crate::{ConfigurationError, Score};
use serde::{Deserialize, Serialize};
use std::cmp::max;

/// The largest absolute cell value we allow. Half of the range is kept free
/// so that adding a single transition to a sentinel never wraps.
const MAX_CELL: u64 = (Score::MAX / 2) as u64;

/// Check that `max_abs` per column over `len_a + len_b` columns (plus one
/// transition) stays within `MAX_CELL`.
fn check_overflow(max_abs: u64, len_a: usize, len_b: usize) -> Result<(), ConfigurationError> {
    let columns = (len_a as u64)
        .checked_add(len_b as u64)
        .and_then(|c| c.checked_add(1));
    match columns.and_then(|c| c.checked_mul(max_abs)) {
        Some(total) if total <= MAX_CELL => Ok(()),
        _ => Err(ConfigurationError::ScoreOverflow {
            len_a,
            len_b,
            max_abs,
        }),
    }
}

/// Scoring with a fixed penalty per gap column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearScore {
    /// Reward for two identical symbols.
    pub match_score: Score,
    /// Score for two different symbols, typically negative.
    pub mismatch_penalty: Score,
    /// Score for each symbol aligned against a gap, typically negative.
    pub gap_penalty: Score,
}

impl LinearScore {
    pub const fn new(match_score: Score, mismatch_penalty: Score, gap_penalty: Score) -> Self {
        Self {
            match_score,
            mismatch_penalty,
            gap_penalty,
        }
    }

    /// match=1, mismatch=-1, gap=-1: the default for global alignment.
    pub const fn global_default() -> Self {
        Self::new(1, -1, -1)
    }

    /// match=2, mismatch=-1, gap=-1: the default for local alignment.
    pub const fn local_default() -> Self {
        Self::new(2, -1, -1)
    }

    /// match=0, mismatch=-1, gap=-1: the global score is minus the edit distance.
    pub const fn edit() -> Self {
        Self::new(0, -1, -1)
    }

    /// The score of aligning symbol `x` against symbol `y`.
    #[inline]
    pub fn sub(&self, x: u8, y: u8) -> Score {
        if x == y {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }

    /// The score of `len` symbols aligned against gaps.
    #[inline]
    pub fn gaps(&self, len: usize) -> Score {
        len as Score * self.gap_penalty
    }

    pub fn max_abs(&self) -> u64 {
        [self.match_score, self.mismatch_penalty, self.gap_penalty]
            .into_iter()
            .map(|s| s.unsigned_abs() as u64)
            .max()
            .unwrap_or_default()
    }

    /// Make sure no cell of a `len_a` by `len_b` alignment can overflow.
    pub fn check_overflow(&self, len_a: usize, len_b: usize) -> Result<(), ConfigurationError> {
        check_overflow(self.max_abs(), len_a, len_b)
    }
}

/// Scoring where a run of `l` gap columns scores `open + l * extend`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffineScore {
    pub match_score: Score,
    pub mismatch_penalty: Score,
    /// Charged once per run of gaps.
    pub gap_open: Score,
    /// Charged for every gap column, including the first.
    pub gap_extend: Score,
}

impl Default for AffineScore {
    /// match=2, mismatch=-1, open=-3, extend=-1.
    fn default() -> Self {
        Self::new(2, -1, -3, -1)
    }
}

impl AffineScore {
    pub const fn new(
        match_score: Score,
        mismatch_penalty: Score,
        gap_open: Score,
        gap_extend: Score,
    ) -> Self {
        Self {
            match_score,
            mismatch_penalty,
            gap_open,
            gap_extend,
        }
    }

    /// The affine model that scores exactly like `linear`: opening is free and
    /// each gap column costs the linear gap penalty.
    pub const fn with_free_open(linear: LinearScore) -> Self {
        Self::new(
            linear.match_score,
            linear.mismatch_penalty,
            0,
            linear.gap_penalty,
        )
    }

    #[inline]
    pub fn sub(&self, x: u8, y: u8) -> Score {
        if x == y {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }

    /// The score of the first column of a gap run.
    #[inline]
    pub fn open_extend(&self) -> Score {
        self.gap_open + self.gap_extend
    }

    /// The score of a run of `len > 0` gap columns.
    pub fn gap_run(&self, len: usize) -> Score {
        self.gap_open + len as Score * self.gap_extend
    }

    pub fn max_abs(&self) -> u64 {
        let gap = self.gap_open.unsigned_abs() as u64 + self.gap_extend.unsigned_abs() as u64;
        max(
            gap,
            max(
                self.match_score.unsigned_abs() as u64,
                self.mismatch_penalty.unsigned_abs() as u64,
            ),
        )
    }

    pub fn check_overflow(&self, len_a: usize, len_b: usize) -> Result<(), ConfigurationError> {
        check_overflow(self.max_abs(), len_a, len_b)
    }
}

/// The recognised scoring options, each of which may be missing.
///
/// This is what a caller (command line, serialized settings) fills in. The
/// strict models are obtained with `linear()` and `affine()`, which fail when
/// an option required by that mode is missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub match_score: Option<Score>,
    #[serde(default)]
    pub mismatch_penalty: Option<Score>,
    #[serde(default)]
    pub gap_penalty: Option<Score>,
    #[serde(default)]
    pub gap_open: Option<Score>,
    #[serde(default)]
    pub gap_extend: Option<Score>,
}

impl ScoringConfig {
    /// Take the options set in `self`, and the remaining ones from `defaults`.
    pub fn or(self, defaults: ScoringConfig) -> ScoringConfig {
        ScoringConfig {
            match_score: self.match_score.or(defaults.match_score),
            mismatch_penalty: self.mismatch_penalty.or(defaults.mismatch_penalty),
            gap_penalty: self.gap_penalty.or(defaults.gap_penalty),
            gap_open: self.gap_open.or(defaults.gap_open),
            gap_extend: self.gap_extend.or(defaults.gap_extend),
        }
    }

    pub fn linear(&self) -> Result<LinearScore, ConfigurationError> {
        Ok(LinearScore {
            match_score: required(self.match_score, "match_score")?,
            mismatch_penalty: required(self.mismatch_penalty, "mismatch_penalty")?,
            gap_penalty: required(self.gap_penalty, "gap_penalty")?,
        })
    }

    pub fn affine(&self) -> Result<AffineScore, ConfigurationError> {
        Ok(AffineScore {
            match_score: required(self.match_score, "match_score")?,
            mismatch_penalty: required(self.mismatch_penalty, "mismatch_penalty")?,
            gap_open: required(self.gap_open, "gap_open")?,
            gap_extend: required(self.gap_extend, "gap_extend")?,
        })
    }
}

fn required(option: Option<Score>, name: &'static str) -> Result<Score, ConfigurationError> {
    option.ok_or(ConfigurationError::MissingOption(name))
}

impl From<LinearScore> for ScoringConfig {
    fn from(sc: LinearScore) -> Self {
        ScoringConfig {
            match_score: Some(sc.match_score),
            mismatch_penalty: Some(sc.mismatch_penalty),
            gap_penalty: Some(sc.gap_penalty),
            ..Default::default()
        }
    }
}

impl From<AffineScore> for ScoringConfig {
    fn from(sc: AffineScore) -> Self {
        ScoringConfig {
            match_score: Some(sc.match_score),
            mismatch_penalty: Some(sc.mismatch_penalty),
            gap_open: Some(sc.gap_open),
            gap_extend: Some(sc.gap_extend),
            ..Default::default()
        }
    }
}
