use anyhow::{bail, Context, Result};
use bio::io::fasta;
use clap::{value_parser, Parser};
use itertools::Itertools;
use pa_base_algos::{
    cli::{AlgorithmArgs, ScoringArgs},
    Algorithm, Alignment, Score,
};
use pa_types::{seq_to_string, Seq};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::{ControlFlow, Range},
    path::{Path, PathBuf},
};

/// Align pairs of sequences with Needleman-Wunsch, Smith-Waterman or Hirschberg.
#[derive(Parser, Serialize, Deserialize)]
#[clap(author, about, disable_version_flag(true))]
// Override some generator flags
#[clap(mut_arg("seed", |a| a.hide_short_help(true)))]
#[clap(mut_arg("cnt", |a| a.hide_short_help(true)))]
#[clap(mut_arg("size", |a| a.hide_short_help(true)))]
#[clap(mut_arg("error_model", |a| a.hide_short_help(true)))]
#[clap(group(
    clap::ArgGroup::new("input_type")
        .required(true)
        .args(&["input", "a", "length"]),
))]
pub struct Cli {
    /// A .seq, .txt, or Fasta file with sequence pairs to align, or a directory of them.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub input: Option<PathBuf>,

    /// The first sequence of a single pair to align.
    #[clap(short, long = "seq-a", requires = "b", display_order = 1)]
    pub a: Option<String>,

    /// The second sequence of a single pair to align.
    #[clap(short, long = "seq-b", requires = "a", display_order = 1)]
    pub b: Option<String>,

    /// Write one JSON object per pair and algorithm.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub output: Option<PathBuf>,

    /// Print less. Pass twice for summary line only.
    ///
    /// Print one line per alignment instead of the aligned sequences.
    /// Pass twice to only print the summary.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    #[clap(flatten)]
    pub algorithm: AlgorithmArgs,

    #[clap(flatten)]
    pub scoring: ScoringArgs,

    /// Options to generate an input pair.
    #[clap(flatten, next_help_heading = "Generated input")]
    pub generate: pa_generate::DatasetGenerator,
}

/// One alignment, as written to the `--output` file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Index of the input pair.
    pub pair: usize,
    pub algorithm: Algorithm,
    pub score: Score,
    pub cigar: String,
    pub a_range: Range<usize>,
    pub b_range: Range<usize>,
    pub aligned_a: String,
    pub aligned_b: String,
}

impl Record {
    pub fn new(pair: usize, algorithm: Algorithm, aln: &Alignment) -> Self {
        Record {
            pair,
            algorithm,
            score: aln.score,
            cigar: aln.cigar().to_string(),
            a_range: aln.a_range.clone(),
            b_range: aln.b_range.clone(),
            aligned_a: seq_to_string(&aln.a),
            aligned_b: seq_to_string(&aln.b),
        }
    }
}

fn strip_marker<'a>(line: &'a [u8], marker: u8, f: &Path) -> Result<&'a [u8]> {
    line.strip_prefix(&[marker])
        .with_context(|| format!("{}: expected a line starting with `{}`", f.display(), marker as char))
}

impl Cli {
    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(Seq, Seq) -> Result<ControlFlow<()>>,
    ) -> Result<()> {
        if let (Some(a), Some(b)) = (&self.a, &self.b) {
            run_pair(a.as_bytes(), b.as_bytes())?;
            return Ok(());
        }

        if let Some(input) = &self.input {
            // Parse file
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                let mut files = input
                    .read_dir()
                    .with_context(|| format!("{} is not a file or directory", input.display()))?
                    .map(|entry| entry.map(|e| e.path()))
                    .collect::<Result<Vec<_>, _>>()?;
                files.sort();
                files
            };

            'outer: for f in files {
                let open = || File::open(&f).with_context(|| format!("failed to open {}", f.display()));
                match f.extension().and_then(|ext| ext.to_str()) {
                    Some(ext @ ("seq" | "txt")) => {
                        for (a, b) in BufReader::new(open()?).lines().tuples() {
                            let (a, b) = (a?, b?);
                            let (a, b) = if ext == "seq" {
                                (strip_marker(a.as_bytes(), b'>', &f)?, strip_marker(b.as_bytes(), b'<', &f)?)
                            } else {
                                (a.as_bytes(), b.as_bytes())
                            };
                            if run_pair(a, b)?.is_break() {
                                break 'outer;
                            }
                        }
                    }
                    Some("fna" | "fa" | "fasta") => {
                        for (a, b) in fasta::Reader::new(BufReader::new(open()?)).records().tuples() {
                            let (a, b) = (a?, b?);
                            if run_pair(a.seq(), b.seq())?.is_break() {
                                break 'outer;
                            }
                        }
                    }
                    ext => {
                        bail!(
                            "{}: unknown file extension {ext:?}. Must be in {{seq,txt,fna,fa,fasta}}.",
                            f.display()
                        )
                    }
                };
            }
        } else {
            // Generate random input.
            let seed = self.generate.seed.unwrap_or_else(|| {
                let seed = ChaCha8Rng::from_entropy().gen_range(0..1_000);
                log::info!("Seed: {seed}");
                seed
            });
            let rng = &mut ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..self.generate.cnt.unwrap_or(1) {
                let (a, b) = self.generate.settings.generate(rng);
                if run_pair(&a, &b)?.is_break() {
                    break;
                }
            }
        }
        Ok(())
    }
}
