// Evidence store benchmark
// Measures clue-index insertion and attribution lookup latency
// Target: p95 < 2ms for a 1000-clue batch, random insertion order

use cluebox::evidence::{AttributionTable, ClueIndex};
use std::time::{Duration, Instant};

/// Benchmark configuration
const ITERATIONS: usize = 200;
const WARMUP_ITERATIONS: usize = 20;
const BATCH: usize = 1000;

/// Per-batch timings, reported both per batch and per operation
struct BatchTimings {
    samples: Vec<Duration>,
    ops_per_batch: usize,
}

impl BatchTimings {
    fn new(mut samples: Vec<Duration>, ops_per_batch: usize) -> Self {
        samples.sort_unstable();
        Self {
            samples,
            ops_per_batch,
        }
    }

    /// Nearest-rank quantile, `q` in 0..=1
    fn quantile(&self, q: f64) -> Duration {
        let rank = ((self.samples.len() - 1) as f64 * q).round() as usize;
        self.samples[rank]
    }

    fn ns_per_op(&self, batch: Duration) -> f64 {
        batch.as_nanos() as f64 / self.ops_per_batch.max(1) as f64
    }
}

struct BenchmarkResult {
    scenario: String,
    timings: BatchTimings,
    budget: Duration,
}

impl BenchmarkResult {
    fn print(&self) {
        let median = self.timings.quantile(0.5);
        let p95 = self.timings.quantile(0.95);

        println!("\n=== {} ===", self.scenario);
        for (label, batch) in [
            ("fastest", self.timings.quantile(0.0)),
            ("median", median),
            ("p95", p95),
            ("slowest", self.timings.quantile(1.0)),
        ] {
            println!(
                "  {:<8} {:>12} per batch  {:>8.1} ns/op",
                label,
                format!("{:?}", batch),
                self.timings.ns_per_op(batch)
            );
        }

        let verdict = if p95 < self.budget { "within" } else { "OVER" };
        println!("  p95 {} budget of {:?}", verdict, self.budget);
    }
}

/// Clue texts in a scrambled but deterministic order, with repeats
fn scrambled_clues() -> Vec<String> {
    let mut state: u64 = 0x9E37_79B9;
    (0..BATCH)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            format!("clue #{:05}", (state >> 33) % (BATCH as u64 * 3 / 4))
        })
        .collect()
}

fn measure<F: FnMut()>(ops_per_batch: usize, mut f: F) -> BatchTimings {
    for _ in 0..WARMUP_ITERATIONS {
        f();
    }

    let mut samples = Vec::with_capacity(ITERATIONS);
    for _ in 0..ITERATIONS {
        let start = Instant::now();
        f();
        samples.push(start.elapsed());
    }

    BatchTimings::new(samples, ops_per_batch)
}

fn benchmark_clue_index_insert(clues: &[String]) -> BenchmarkResult {
    let timings = measure(clues.len(), || {
        let mut index = ClueIndex::new();
        for clue in clues {
            index.insert(clue);
        }
        std::hint::black_box(index.len());
    });

    BenchmarkResult {
        scenario: format!("ClueIndex insert x{}", clues.len()),
        timings,
        budget: Duration::from_millis(2),
    }
}

fn benchmark_attribution_lookup(clues: &[String]) -> BenchmarkResult {
    let mut table = AttributionTable::new();
    for (i, clue) in clues.iter().enumerate() {
        table.insert(clue, &format!("suspect-{}", i % 7));
    }

    let timings = measure(clues.len(), || {
        let hits = clues.iter().filter(|c| table.lookup(c).is_some()).count();
        std::hint::black_box(hits);
    });

    BenchmarkResult {
        scenario: format!("AttributionTable lookup x{}", clues.len()),
        timings,
        budget: Duration::from_millis(2),
    }
}

fn main() {
    let clues = scrambled_clues();

    println!("Evidence store benchmark ({} iterations)", ITERATIONS);

    benchmark_clue_index_insert(&clues).print();
    benchmark_attribution_lookup(&clues).print();
}
