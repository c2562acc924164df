use anyhow::{Context, Result};
use clap::Parser;
use pa_base_algos::{Aligner, Algorithm, ScoringConfig};
use pa_bin::{Cli, Record};
use pa_types::Seq;
use std::{
    fs::File,
    io::{BufWriter, Write},
    ops::ControlFlow,
    time::{Duration, Instant},
};

/// Running totals for one algorithm.
struct Stats {
    algorithm: Algorithm,
    aligner: Box<dyn Aligner>,
    total_score: i64,
    time: Duration,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let config: ScoringConfig = args.scoring.into();
    let mut stats = args
        .algorithm
        .algorithms()
        .into_iter()
        .map(|algorithm| {
            let aligner = algorithm
                .build(&config)
                .with_context(|| format!("invalid scoring for {}", algorithm.name()))?;
            log::info!("{}: {aligner:?}", algorithm.name());
            Ok(Stats {
                algorithm,
                aligner,
                total_score: 0,
                time: Duration::ZERO,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut output = match &args.output {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => None,
    };

    let mut pairs = 0;
    // Process the input.
    args.process_input_pairs(|a: Seq, b: Seq| {
        let mut scores = Vec::with_capacity(stats.len());
        for s in &mut stats {
            let start = Instant::now();
            let aln = s
                .aligner
                .align(a, b)
                .with_context(|| format!("pair {pairs}: {} failed", s.algorithm.name()))?;
            s.time += start.elapsed();
            s.total_score += aln.score as i64;
            scores.push((s.algorithm, aln.score));

            if args.silent == 0 {
                println!("{pairs:>5} {:<24} {aln}", s.algorithm.name());
            } else if args.silent == 1 {
                println!(
                    "{pairs:>5} {:<24} score {:>6} cigar {}",
                    s.algorithm.name(),
                    aln.score,
                    aln.cigar()
                );
            }
            if let Some(output) = &mut output {
                serde_json::to_writer(&mut *output, &Record::new(pairs, s.algorithm, &aln))?;
                writeln!(output)?;
            }
        }

        // Both global aligners must find the same optimum.
        let score_of = |algorithm: Algorithm| scores.iter().find(|(x, _)| *x == algorithm).map(|(_, s)| *s);
        if let (Some(full), Some(linear)) = (
            score_of(Algorithm::Global),
            score_of(Algorithm::LinearSpace),
        ) {
            if full != linear {
                log::warn!("pair {pairs}: global score {full} but linear space score {linear}");
            }
        }
        pairs += 1;
        Ok(ControlFlow::Continue(()))
    })?;

    if let Some(mut output) = output {
        output.flush()?;
    }

    for s in &stats {
        println!(
            "{:<24} pairs {pairs:>5} total score {:>8} time {:>8.3}s",
            s.algorithm.name(),
            s.total_score,
            s.time.as_secs_f64()
        );
    }
    Ok(())
}
