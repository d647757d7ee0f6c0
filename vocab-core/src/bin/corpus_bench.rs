//! Corpus Throughput Benchmark
//!
//! Measures how fast the analysis chain gets through a large plain-text
//! corpus, such as a dump of social media posts with one post per line.
//!
//! ## What It Benchmarks
//!
//! 1. **Tokenize**: Run reduction, segmentation and case folding
//! 2. **Match**: Span matching of pre-tokenized lines against the dictionary
//! 3. **Pipeline**: Full per-document analysis, sequential and with rayon
//!
//! ## Usage
//!
//! ```bash
//! # Tokenizer only (built-in demo dictionary for the match stages)
//! ./target/release/corpus_bench /path/to/posts.txt
//!
//! # With a real category table
//! ./target/release/corpus_bench /path/to/posts.txt /path/to/dictionary.csv
//! ```
//!
//! Each line of the input is treated as one document.
//!
//! ## Output
//!
//! ```text
//! === Pipeline (parallel) ===
//! --------------------------------
//! Mode        : Pipeline (parallel)
//! Elapsed     : 0.211 s
//! Throughput  : 0.412 GiB/s
//! Documents   : 1_000_000
//! Tokens      : 18_332_906
//! Tokens/sec  : 86_885_810
//! --------------------------------
//! ```

use std::env;
use std::error::Error;
use std::fs;
use std::time::{Duration, Instant};

use vocab_core::{Analyzer, CategoryTable, CompiledLexicon, Stoplist, Tokenizer};
use vocab_types::{AnalyzerConfig, TableFormat};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

const DEMO_TABLE: &str = "\
Word,Positive,Negative,Social
happy|glad|joy*|love*|great,X,,
sad|cry*|hate*|awful,,X,
friend*|family|we|us|our,,,X
hang out|hang* out,,,X
";

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: corpus_bench <text-file> [dictionary]");
        std::process::exit(1);
    }

    println!("Loading corpus...");
    let input = fs::read_to_string(&args[1])?;
    let docs: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();

    let table = match args.get(2) {
        Some(path) => CategoryTable::from_path(path, TableFormat::default())?,
        None => CategoryTable::parse_str(DEMO_TABLE, TableFormat::default())?,
    };
    let lexicon = CompiledLexicon::compile(&table)?;

    println!("File size:  {}", fmt_bytes(input.len() as u64));
    println!("Documents:  {}", fmt_count(docs.len() as u64));
    println!("Dictionary: {}\n", lexicon.stats());

    let analyzer = Analyzer::new(lexicon, Stoplist::new(), AnalyzerConfig::default());

    bench_tokenize(&docs, input.len());
    bench_match(&analyzer, &docs, input.len());
    bench_pipeline(&analyzer, &docs, input.len());

    Ok(())
}

fn bench_tokenize(docs: &[&str], bytes: usize) {
    let tokenizer = Tokenizer::default();

    println!("=== Tokenize ===");

    warmup(|| {
        let sink: usize = docs.iter().map(|d| tokenizer.tokenize(d).len()).sum();
        std::hint::black_box(sink);
    });

    let mut tokens = 0u64;
    let elapsed = measure(|| {
        let local: usize = docs.iter().map(|d| tokenizer.tokenize(d).len()).sum();
        tokens = local as u64;
        std::hint::black_box(tokens);
    });

    print_perf("Tokenize", bytes, elapsed, docs.len(), tokens);
}

fn bench_match(analyzer: &Analyzer, docs: &[&str], bytes: usize) {
    let tokenized: Vec<Vec<String>> = docs.iter().map(|d| analyzer.tokenize(d)).collect();
    let tokens: u64 = tokenized.iter().map(|t| t.len() as u64).sum();
    let lexicon = analyzer.lexicon();

    println!("=== Match ===");

    warmup(|| {
        for doc in &tokenized {
            std::hint::black_box(lexicon.match_tokens(doc.as_slice()));
        }
    });

    let elapsed = measure(|| {
        for doc in &tokenized {
            std::hint::black_box(lexicon.match_tokens(doc.as_slice()));
        }
    });

    print_perf("Match", bytes, elapsed, docs.len(), tokens);
}

fn bench_pipeline(analyzer: &Analyzer, docs: &[&str], bytes: usize) {
    println!("=== Pipeline (sequential) ===");

    let mut tokens = 0u64;
    warmup(|| {
        for doc in docs {
            std::hint::black_box(analyzer.analyze(doc));
        }
    });
    let elapsed = measure(|| {
        let mut local = 0u64;
        for doc in docs {
            local += analyzer.analyze(doc).raw.count as u64;
        }
        tokens = local;
        std::hint::black_box(tokens);
    });
    print_perf("Pipeline (sequential)", bytes, elapsed, docs.len(), tokens);

    println!("=== Pipeline (parallel) ===");

    warmup(|| {
        std::hint::black_box(analyzer.analyze_batch(docs));
    });
    let elapsed = measure(|| {
        let local: u64 = analyzer
            .analyze_batch(docs)
            .iter()
            .map(|m| m.raw.count as u64)
            .sum();
        tokens = local;
        std::hint::black_box(tokens);
    });
    print_perf("Pipeline (parallel)", bytes, elapsed, docs.len(), tokens);
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, docs: usize, tokens: u64) {
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.3} GiB/s", gib / secs);
    println!("Documents   : {}", fmt_count(docs as u64));

    if tokens > 0 {
        println!("Tokens      : {}", fmt_count(tokens));
        println!("Tokens/sec  : {}", fmt_count((tokens as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
