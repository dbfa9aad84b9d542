use pure_fill::{Options, Replacer, RunIndex};
use std::time::{Duration, Instant};
use tdoc::{Document, InlineStyle, Paragraph, ParagraphType, Span};

/// Performance benchmark suite for document filling
///
/// Run with: cargo test --release --bench performance -- --nocapture
///
/// This measures:
/// - Run index construction
/// - Placeholder substitution with whole and split keys
/// - Block resolution within and across paragraphs
const SMALL_DOC_PARAGRAPHS: usize = 10;
const MEDIUM_DOC_PARAGRAPHS: usize = 100;
const LARGE_DOC_PARAGRAPHS: usize = 1000;

const ITERATIONS: usize = 20;

const SAMPLE_WORDS: &[&str] = &[
    "Lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
];

fn sentence(words: usize) -> String {
    let mut text = String::new();
    for j in 0..words {
        if j > 0 {
            text.push(' ');
        }
        text.push_str(SAMPLE_WORDS[j % SAMPLE_WORDS.len()]);
    }
    text
}

/// Every paragraph carries a placeholder split over three styled spans.
fn create_placeholder_document(num_paragraphs: usize, avg_words_per_para: usize) -> Document {
    let mut doc = Document::new();

    for i in 0..num_paragraphs {
        let paragraph_type = match i % 4 {
            0 => ParagraphType::Header1,
            1 => ParagraphType::Header2,
            _ => ParagraphType::Text,
        };

        let mut bold = Span::new_text("me}");
        bold.style = InlineStyle::Bold;
        let paragraph = Paragraph::new(paragraph_type).with_content(vec![
            Span::new_text(&format!("{} ${{na", sentence(avg_words_per_para))),
            bold,
            Span::new_text(&format!(" and ${{phone}} {}", sentence(avg_words_per_para / 2))),
        ]);
        doc.add_paragraph(paragraph);
    }

    doc
}

/// Alternates single-paragraph blocks with blocks spanning three paragraphs.
fn create_block_document(num_paragraphs: usize) -> Document {
    let mut doc = Document::new();

    for i in 0..num_paragraphs {
        let text = match i % 5 {
            0 => format!("Paragraph {i} <opt>optional {i}</opt> done."),
            1 => format!("Paragraph {i} opens <opt>"),
            2 => format!("inside {i}"),
            3 => format!("closes</opt> paragraph {i}"),
            _ => sentence(12),
        };
        doc.add_paragraph(Paragraph::new_text().with_content(vec![Span::new_text(&text)]));
    }

    doc
}

struct BenchmarkResult {
    name: String,
    iterations: usize,
    total_duration: Duration,
    avg_duration: Duration,
    min_duration: Duration,
    max_duration: Duration,
}

impl BenchmarkResult {
    fn print(&self) {
        println!("\n{}", "=".repeat(70));
        println!("Benchmark: {}", self.name);
        println!("{}", "=".repeat(70));
        println!("Iterations:     {}", self.iterations);
        println!("Total time:     {:?}", self.total_duration);
        println!("Average:        {:?}", self.avg_duration);
        println!("Min:            {:?}", self.min_duration);
        println!("Max:            {:?}", self.max_duration);

        if self.avg_duration.as_millis() > 100 {
            println!("\n⚠️  WARNING: Average duration > 100ms");
        }
    }
}

/// Runs `f` on a fresh input from `setup` each iteration; only `f` is timed.
fn benchmark<T, S, F>(name: &str, iterations: usize, mut setup: S, mut f: F) -> BenchmarkResult
where
    S: FnMut() -> T,
    F: FnMut(T),
{
    let mut durations = Vec::with_capacity(iterations);

    // Warmup
    for _ in 0..3 {
        f(setup());
    }

    for _ in 0..iterations {
        let input = setup();
        let start = Instant::now();
        f(input);
        durations.push(start.elapsed());
    }

    let total_duration: Duration = durations.iter().sum();
    let avg_duration = total_duration / iterations as u32;
    let min_duration = durations.iter().min().copied().unwrap_or_default();
    let max_duration = durations.iter().max().copied().unwrap_or_default();

    BenchmarkResult {
        name: name.to_string(),
        iterations,
        total_duration,
        avg_duration,
        min_duration,
        max_duration,
    }
}

#[test]
fn bench_run_index() {
    let runs: Vec<String> = (0..200).map(|i| format!("run {i} ${{key}} ")).collect();
    let result = benchmark(
        "Run index (200 runs)",
        ITERATIONS * 10,
        || runs.clone(),
        |runs| {
            let index = RunIndex::build(&runs);
            assert!(index.find("${key}").is_some());
        },
    );
    result.print();
}

#[test]
fn bench_substitution() {
    let replacer = Replacer::new(Options::default());
    for (label, size) in [
        ("small", SMALL_DOC_PARAGRAPHS),
        ("medium", MEDIUM_DOC_PARAGRAPHS),
        ("large", LARGE_DOC_PARAGRAPHS),
    ] {
        let doc = create_placeholder_document(size, 40);
        let result = benchmark(
            &format!("Substitution, {label} document ({size} paragraphs)"),
            ITERATIONS,
            || doc.clone(),
            |mut doc| {
                let rewritten = replacer
                    .substitute(&mut doc, [("name", "Ivan"), ("phone", "+55 123 456 789")])
                    .expect("substitution failed");
                assert_eq!(rewritten, size * 2);
            },
        );
        result.print();
    }
}

#[test]
fn bench_block_resolution() {
    let replacer = Replacer::new(Options::default());
    for (label, size) in [("medium", MEDIUM_DOC_PARAGRAPHS), ("large", LARGE_DOC_PARAGRAPHS)] {
        let doc = create_block_document(size);
        for keep in [false, true] {
            let result = benchmark(
                &format!("Blocks, {label} document, keep={keep}"),
                ITERATIONS,
                || doc.clone(),
                |mut doc| {
                    replacer
                        .apply_blocks(&mut doc, [("opt", keep)])
                        .expect("block resolution failed");
                },
            );
            result.print();
        }
    }
}
