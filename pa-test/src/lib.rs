use itertools::Itertools;
use rand::{seq::IteratorRandom, thread_rng, Rng};

use pa_generate::ErrorModel;
use pa_scoring::*;
use pa_types::{seq_to_string, Seq, Sequence};

pub fn test_sequences() -> Vec<(Seq<'static>, Seq<'static>)> {
    vec![
        (b"GATTACA", b"GCATGCU"),
        (b"GGTTGACTA", b"TGTTACGG"),
        (b"AGTACGCA", b"TATGC"),
        (b"", b"ACG"),
        (b"ACGT", b""),
        (b"AAAA", b"TTTT"),
        (b"TTGGGTCAATCAGCCAGTTTTTA", b"TTTGAGTGGGTCATCACCGATTTTAT"),
        (b"ACTGACCAGT", b"CCGACAGGA"),
        (b"AGTTTTAT", b"ACCGATTTTTA"),
        (b"CTCTCTTCTCTCTCTA", b"CCTCTCTCTCTCCTCTC"),
        (b"AGTGGGTTGCCTTCATTCCG", b"AGTGGTGTCTTCAGGCCTTCATTCCG"),
        (b"GCACGTCGCCCCCCGCCCGCG", b"GCCCGCCCGCCCGCCCCCGCCCCC"),
        (b"CGCGTGTATCCGTCCACATCGAGCCGCCCTTGTTGCTTTTCGAGCGCTCATTTCCCGCAAGAGTGGCGTGCGGTCACTTTCGCGCAGCAATTAGAGTACTAACGGGTAGACGTGGCTTTCCTCCTCGTCCTGTCAACGCGCATAGGATGTCCTGCAGCAGGCCGCCGCGATTGCCTAAATCAAGGGGTTCCAATGGAGTTTCCATCTGATATCCGCGCTCCGGTTCTGAGTCTAAAGTGGAAATACTCCGAATGGGCCGGTATGAGGTTGGGTCAATCAGCCAGTTTTTA",
         b"CGCTGGGGATGCCTCCACCTTTCGAGTGCCTGTTGGTTCCGACGCTATCATAGTCCCCATGCAAGGAGATGGCTGCGCGTCCTATCGCGCGGCAAATAGAGTCTACGGGGGCGGCTGTCCTCCTCGTCCTGGTCAACGGCCATAGGATTTCCGCGATGGTCGCCCGGATGTGCCTAAACCAAGGCTCCGATGGAGCTGCCTCTGATATCCGCGCTGCCGGTTTCCTGACGTCTGAAAACGTTGGAAAATACCTCCGAATGGGCCCCGTTTGAGTGGGTCATCACCGATTTTAT"),
    ]
}

const FIXED: bool = false;

/// Random sequence pairs over a grid of lengths, error rates and error models,
/// together with the parameters that generated them.
pub fn gen_seqs() -> impl Iterator<Item = ((Sequence, Sequence), (usize, f32, ErrorModel, u64))> {
    let rng = &mut thread_rng();
    let mut ns = vec![
        0usize, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 30, 40, 50,
        60, 70, 80, 90, 100, 110, 120, 130, 140, 150, 160, 170, 180, 190, 200, 250, 300, 400, 500,
    ];
    let mut es = vec![
        0.0f32, 0.01, 0.02, 0.03, 0.05, 0.10, 0.20, 0.30, 0.40, 0.50, 0.60, 0.70, 1.0,
    ];

    // Pick a random subset of the above for 4x speedup. CI runs often enough to get good coverage.
    if !FIXED {
        let nl = ns.len();
        ns = ns.into_iter().choose_multiple(rng, nl / 4);
        let el = es.len();
        es = es.into_iter().choose_multiple(rng, el / 4);
    }

    let models = [
        ErrorModel::Uniform,
        ErrorModel::NoisyInsert,
        ErrorModel::NoisyDelete,
        ErrorModel::SymmetricRepeat,
    ];
    // Run each test on a new random seed for increased coverage over time.
    let seeds = if FIXED {
        [31415]
    } else {
        [rng.gen_range(0..u64::MAX)]
    };
    ns.into_iter()
        .cartesian_product(es)
        .cartesian_product(models)
        .cartesian_product(seeds)
        .map(|(((n, e), error_model), seed)| {
            let (a, b) = pa_generate::generate_model(n, e, error_model, seed);
            ((a, b), (n, e, error_model, seed))
        })
}

/// All hardcoded and generated pairs with `n <= max_n`, with a description
/// to print before running each.
fn test_inputs(max_n: usize) -> impl Iterator<Item = (Sequence, Sequence, String)> {
    let fixed = test_sequences().into_iter().map(|(a, b)| {
        let params = format!(
            "hardcoded test_sequences: a {:?} b {:?}",
            seq_to_string(a),
            seq_to_string(b)
        );
        (a.to_vec(), b.to_vec(), params)
    });
    let generated = gen_seqs()
        .filter(move |(_, (n, ..))| *n <= max_n)
        .map(|((a, b), (n, e, error_model, seed))| {
            let params = format!("seed {seed:>10} n {n:>5} e {e:>.2} error_model {error_model:?}");
            (a, b, params)
        });
    fixed.chain(generated)
}

/// Align `a` and `b`, and check that the result is a valid alignment whose
/// score is reproduced by `rescore`.
pub fn test_aligner_on_input(
    a: Seq,
    b: Seq,
    aligner: &mut impl Aligner,
    rescore: &impl Fn(&Alignment) -> Score,
    params: &str,
) -> Alignment {
    // Set to true for local debugging.
    const D: bool = false;

    // useful in case of panics inside the alignment code.
    eprintln!("{params}");
    if D {
        eprintln!("a {}\nb {}", seq_to_string(a), seq_to_string(b));
    }
    let aln = match aligner.align(a, b) {
        Ok(aln) => aln,
        Err(err) => panic!("{params}\n{err}\nAligner\n{aligner:?}"),
    };
    if let Err(err) = aln.verify(a, b) {
        panic!(
            "\n{params}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();\n{err}\n{aln}",
            seq_to_string(a),
            seq_to_string(b),
        );
    }
    assert_eq!(
        rescore(&aln),
        aln.score,
        "\n{params}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();\ncigar: {}\nAligner\n{aligner:?}",
        seq_to_string(a),
        seq_to_string(b),
        aln.cigar(),
    );
    aln
}

/// Test the given aligner on a large set of random sequences:
/// - length 0 to 500
/// - error rate 0.01 to 1.0
/// - error models: uniform, noisy insert, noisy delete, symmetric repeat (using `pa_generate`)
///
/// - The returned alignment must be valid.
/// - Its score must equal the score recomputed by `rescore` from the columns.
pub fn test_aligner(aligner: impl Aligner, rescore: impl Fn(&Alignment) -> Score) {
    test_aligner_up_to(aligner, rescore, usize::MAX);
}

/// As test_aligner, but only test sequences with n <= max_n.
pub fn test_aligner_up_to(
    mut aligner: impl Aligner,
    rescore: impl Fn(&Alignment) -> Score,
    max_n: usize,
) {
    for (a, b, params) in test_inputs(max_n) {
        test_aligner_on_input(&a, &b, &mut aligner, &rescore, &params);
    }
}

/// Test that a global aligner built with `LinearScore::edit()` returns minus
/// the edit distance computed by `triple_accel::levenshtein_exp`, and aligns
/// the full sequences.
pub fn test_edit_distance(mut aligner: impl Aligner, max_n: usize) {
    let sc = LinearScore::edit();
    for (a, b, params) in test_inputs(max_n) {
        let aln =
            test_aligner_on_input(&a, &b, &mut aligner, &|x: &Alignment| x.linear_score(&sc), &params);
        let dist = triple_accel::levenshtein_exp(&a, &b) as Score;
        assert_eq!(
            -dist,
            aln.score,
            "\n{params}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();\nAligner\n{aligner:?}",
            seq_to_string(&a),
            seq_to_string(&b),
        );
        assert_eq!((aln.a_range, aln.b_range), (0..a.len(), 0..b.len()), "{params}");
    }
}

/// Test that two aligners for the same problem agree on the score.
pub fn test_same_score(mut aligner: impl Aligner, mut reference: impl Aligner, max_n: usize) {
    for (a, b, params) in test_inputs(max_n) {
        eprintln!("{params}");
        let (Ok(x), Ok(y)) = (aligner.align(&a, &b), reference.align(&a, &b)) else {
            panic!("{params}\nconfiguration rejected");
        };
        assert_eq!(
            x.score,
            y.score,
            "\n{params}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();\n{x}\n{y}",
            seq_to_string(&a),
            seq_to_string(&b),
        );
    }
}
