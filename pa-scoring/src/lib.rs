use pa_types::Seq;

pub mod alignment;
pub mod error;
pub mod scoring;

// Re-export types for convenience of `use pa_scoring::*;`.
pub use alignment::*;
pub use error::*;
pub use scoring::*;

/// The accumulated score of a (partial) alignment. Higher is better.
pub type Score = i32;

/// The symbol used to pad the rows of an alignment.
/// It is reserved and should not occur in the input sequences.
pub const GAP: u8 = b'-';

/// A pairwise aligner: computes one optimal alignment of `a` and `b` under
/// the scoring model it was built with.
///
/// Aligners keep no state between calls; the `&mut self` receiver only allows
/// implementations to reuse buffers.
pub trait Aligner: std::fmt::Debug {
    fn align(&mut self, a: Seq, b: Seq) -> Result<Alignment, ConfigurationError>;
}
