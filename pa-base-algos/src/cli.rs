use crate::Algorithm;
use clap::Parser;
use pa_scoring::{Score, ScoringConfig};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
#[clap(next_help_heading = "Algorithm")]
pub struct AlgorithmArgs {
    /// The alignment algorithm to run.
    #[clap(long, default_value_t, value_enum, display_order = 10)]
    pub algorithm: Algorithm,

    /// Run all algorithms on each pair and print each result.
    #[clap(long, display_order = 10)]
    pub compare: bool,
}

impl AlgorithmArgs {
    /// The algorithms to run on each pair.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        if self.compare {
            Algorithm::ALL.to_vec()
        } else {
            vec![self.algorithm]
        }
    }
}

/// Scoring options. Options that are not given take the default of the
/// selected algorithm.
#[derive(Parser, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[clap(next_help_heading = "Scoring")]
pub struct ScoringArgs {
    /// Score for two identical symbols.
    #[clap(long = "match", allow_negative_numbers = true, value_name = "SCORE")]
    pub match_score: Option<Score>,

    /// Score for two different symbols.
    #[clap(long = "mismatch", allow_negative_numbers = true, value_name = "SCORE")]
    pub mismatch_penalty: Option<Score>,

    /// Score for each gap column, for the linear gap modes.
    #[clap(long = "gap", allow_negative_numbers = true, value_name = "SCORE")]
    pub gap_penalty: Option<Score>,

    /// Score for opening a gap, for `local-affine`.
    #[clap(long, allow_negative_numbers = true, value_name = "SCORE")]
    pub gap_open: Option<Score>,

    /// Score for each gap column, for `local-affine`.
    #[clap(long, allow_negative_numbers = true, value_name = "SCORE")]
    pub gap_extend: Option<Score>,
}

impl From<ScoringArgs> for ScoringConfig {
    fn from(args: ScoringArgs) -> Self {
        ScoringConfig {
            match_score: args.match_score,
            mismatch_penalty: args.mismatch_penalty,
            gap_penalty: args.gap_penalty,
            gap_open: args.gap_open,
            gap_extend: args.gap_extend,
        }
    }
}
