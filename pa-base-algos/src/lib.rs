//! Score-maximising pairwise aligners:
//!
//! - `NW`: global alignment, full matrix,
//! - `SW`: local alignment with a linear gap penalty,
//! - `AffineSW`: local alignment with affine gap scores,
//! - `Hirschberg`: global alignment in linear space, built on `RowScanner`.
//!
//! Each is also available as a free function taking the scoring model.
use clap::ValueEnum;
use pa_types::Seq;
use serde::{Deserialize, Serialize};

mod front;
mod hirschberg;
mod matrix;
mod trace;

pub mod cli;
pub mod nw;


pub use front::{last_row, Direction, RowScanner};
pub use hirschberg::Hirschberg;
pub use nw::{affine::AffineSW, NW, SW};
pub use pa_scoring::*;

/// Needleman-Wunsch global alignment of `a` and `b`.
pub fn global_align(a: Seq, b: Seq, sc: &LinearScore) -> Result<Alignment, ConfigurationError> {
    NW::new(*sc).align(a, b)
}

/// Smith-Waterman local alignment of `a` and `b` with a linear gap penalty.
pub fn local_align(a: Seq, b: Seq, sc: &LinearScore) -> Result<Alignment, ConfigurationError> {
    SW::new(*sc).align(a, b)
}

/// Smith-Waterman local alignment of `a` and `b` with affine gap scores.
pub fn local_align_affine(
    a: Seq,
    b: Seq,
    sc: &AffineScore,
) -> Result<Alignment, ConfigurationError> {
    AffineSW::new(*sc).align(a, b)
}

/// Global alignment of `a` and `b` in linear space. The score is the same as
/// for `global_align`; the alignment may differ when several are optimal.
pub fn global_align_linear_space(
    a: Seq,
    b: Seq,
    sc: &LinearScore,
) -> Result<Alignment, ConfigurationError> {
    Hirschberg::new(*sc).align(a, b)
}

/// The global alignment score of `a` and `b`, in linear space and without traceback.
pub fn global_score(a: Seq, b: Seq, sc: &LinearScore) -> Result<Score, ConfigurationError> {
    sc.check_overflow(a.len(), b.len())?;
    let mut scanner = RowScanner::new(*sc);
    Ok(scanner.last_row(a, b, Direction::Forward)[b.len()])
}

/// The available alignment algorithms.
#[derive(ValueEnum, Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Algorithm {
    /// Needleman-Wunsch.
    #[default]
    Global,
    /// Smith-Waterman with a linear gap penalty.
    Local,
    /// Smith-Waterman with affine gap scores.
    LocalAffine,
    /// Hirschberg.
    LinearSpace,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Global,
        Algorithm::Local,
        Algorithm::LocalAffine,
        Algorithm::LinearSpace,
    ];

    /// The scores used for options that are not set explicitly.
    pub fn default_scoring(&self) -> ScoringConfig {
        match self {
            Algorithm::Global | Algorithm::LinearSpace => LinearScore::global_default().into(),
            Algorithm::Local => LinearScore::local_default().into(),
            Algorithm::LocalAffine => AffineScore::default().into(),
        }
    }

    /// Build an aligner from the given options, completed with `default_scoring`.
    pub fn build(&self, config: &ScoringConfig) -> Result<Box<dyn Aligner>, ConfigurationError> {
        let config = config.or(self.default_scoring());
        Ok(match self {
            Algorithm::Global => Box::new(NW::new(config.linear()?)),
            Algorithm::Local => Box::new(SW::new(config.linear()?)),
            Algorithm::LocalAffine => Box::new(AffineSW::new(config.affine()?)),
            Algorithm::LinearSpace => Box::new(Hirschberg::new(config.linear()?)),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Global => "Needleman-Wunsch",
            Algorithm::Local => "Smith-Waterman",
            Algorithm::LocalAffine => "Smith-Waterman (affine)",
            Algorithm::LinearSpace => "Hirschberg",
        }
    }
}
