use thiserror::Error;

/// Rejected scoring configurations. These are reported before any matrix is
/// allocated; once the configuration is accepted, aligning always succeeds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A scoring option required by the selected mode was not given.
    #[error("missing scoring option `{0}`")]
    MissingOption(&'static str),

    /// The scores of an alignment of this size could exceed the score type.
    #[error(
        "scores of up to {max_abs} per column over {len_a}+{len_b} symbols may overflow the score type"
    )]
    ScoreOverflow {
        len_a: usize,
        len_b: usize,
        max_abs: u64,
    },
}

/// Reasons an `Alignment` is not a valid alignment of its inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("aligned rows have different lengths: {0} and {1}")]
    RowLengthMismatch(usize, usize),

    #[error("column {0} aligns a gap against a gap")]
    DoubleGap(usize),

    /// Stripping the gaps from row `a` or `b` does not give the aligned range
    /// of the corresponding input.
    #[error("row {0} does not spell the aligned range of its input")]
    SequenceMismatch(char),
}
