//! Word-frequency scaling benchmark CLI
//!
//! Counts token frequencies across a set of text files with a varying number
//! of parallel workers and reports how analysis time scales.
//!
//! ## Quick Start
//!
//! ```bash
//! # Sweep the default worker counts [1, 2, half, all]
//! ./wordfreq-bench run books/
//!
//! # Explicit sweep, stemming tokenizer, JSON output
//! ./wordfreq-bench run a.txt b.txt \
//!     --workers 1,2,4,8 \
//!     --tokenizer linguistic \
//!     --repeats 3 \
//!     --output results/scaling.json
//!
//! # One analysis at a fixed worker count
//! ./wordfreq-bench count a.txt --workers 4 --top 20
//!
//! # Inspect chunk boundaries
//! ./wordfreq-bench split a.txt --chunks 4
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `wordfreq.toml` (or `--config`); command-line flags
//! override the file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use wordfreq_scaling::analysis::Pipeline;
use wordfreq_scaling::config::{available_parallelism, AnalyzerConfig, Language, TokenizerKind};
use wordfreq_scaling::corpus::{chunk_bounds, read_text, Corpus, SplitMode};
use wordfreq_scaling::report::{emit, ConsoleSink, JsonSink, ReportSink};
use wordfreq_scaling::scaling::ScalingHarness;
use wordfreq_scaling::tokenizer::build_tokenizer;

/// Tokenizer for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TokenizerArg {
    /// Whitespace split, punctuation strip, alphabetic filter
    Simple,
    /// Stopword removal and Snowball stemming
    Linguistic,
}

impl From<TokenizerArg> for TokenizerKind {
    fn from(arg: TokenizerArg) -> Self {
        match arg {
            TokenizerArg::Simple => TokenizerKind::Simple,
            TokenizerArg::Linguistic => TokenizerKind::Linguistic,
        }
    }
}

/// Chunk boundary policy for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SplitModeArg {
    /// Boundaries snap to whitespace
    Word,
    /// Fixed-width windows
    Char,
}

impl From<SplitModeArg> for SplitMode {
    fn from(arg: SplitModeArg) -> Self {
        match arg {
            SplitModeArg::Word => SplitMode::Word,
            SplitModeArg::Char => SplitMode::Char,
        }
    }
}

#[derive(Parser)]
#[command(name = "wordfreq-bench")]
#[command(about = "Parallel word-frequency analysis with worker-count scaling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by `run` and `count`
#[derive(clap::Args)]
struct AnalysisArgs {
    /// Text files or directories to analyze
    files: Vec<PathBuf>,

    /// Path to config file (TOML), defaults to ./wordfreq.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Token normalization policy
    #[arg(short, long, value_enum)]
    tokenizer: Option<TokenizerArg>,

    /// Stemmer and stopword language (linguistic tokenizer): english, french,
    /// german, spanish, italian, portuguese or romanian
    #[arg(short, long)]
    language: Option<String>,

    /// Stopword list, one word per line (linguistic tokenizer)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Number of ranked tokens to print
    #[arg(long)]
    top: Option<usize>,

    /// Chunk boundary policy
    #[arg(long, value_enum)]
    split_mode: Option<SplitModeArg>,

    /// File extensions picked up from directories (comma-separated, e.g., "txt,md")
    #[arg(short, long, value_delimiter = ',')]
    extensions: Option<Vec<String>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the worker-count sweep and report the most frequent tokens
    ///
    /// Every configuration analyzes the whole corpus; speedup is measured
    /// against the first configuration.
    Run {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Worker counts to sweep, in order (comma-separated, e.g., "1,2,4")
        #[arg(short, long, value_delimiter = ',')]
        workers: Option<Vec<usize>>,

        /// Runs per worker-count configuration
        #[arg(short, long)]
        repeats: Option<usize>,

        /// Worker count used for the ranked-token report
        #[arg(long)]
        report_workers: Option<usize>,

        /// Output file for the full report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip peak memory sampling
        #[arg(long)]
        no_memory: bool,
    },

    /// Analyze once at a fixed worker count
    Count {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Number of parallel workers
        #[arg(short, long, default_value = "1")]
        workers: usize,
    },

    /// Print the chunk boundaries of one file
    Split {
        /// Text file to split
        file: PathBuf,

        /// Number of chunks
        #[arg(short = 'n', long, default_value = "4")]
        chunks: usize,

        /// Chunk boundary policy
        #[arg(long, value_enum, default_value = "word")]
        split_mode: SplitModeArg,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            analysis,
            workers,
            repeats,
            report_workers,
            output,
            no_memory,
        } => {
            let mut config = load_config(&analysis)?;
            if workers.is_some() {
                config.worker_counts = workers;
            }
            if let Some(repeats) = repeats {
                config.repeats = repeats;
            }
            if report_workers.is_some() {
                config.report_workers = report_workers;
            }
            config.validate()?;

            run_sweep(&analysis.files, &config, output.as_deref(), !no_memory)?;
        }

        Commands::Count { analysis, workers } => {
            let config = load_config(&analysis)?;
            config.validate()?;
            count_once(&analysis.files, &config, workers)?;
        }

        Commands::Split {
            file,
            chunks,
            split_mode,
        } => {
            show_chunks(&file, chunks, split_mode.into())?;
        }
    }

    Ok(())
}

/// Config file first, then command-line overrides
fn load_config(args: &AnalysisArgs) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::load_default()?,
    };

    if let Some(tokenizer) = args.tokenizer {
        config.tokenizer = tokenizer.into();
    }
    if let Some(language) = &args.language {
        config.language = Language::from_str(language)
            .with_context(|| format!("Unknown language: {}", language))?;
    }
    if args.stopwords.is_some() {
        config.stopwords_file = args.stopwords.clone();
    }
    if let Some(top) = args.top {
        config.top_n = top;
    }
    if let Some(split_mode) = args.split_mode {
        config.split_mode = split_mode.into();
    }
    if let Some(extensions) = &args.extensions {
        config.extensions = extensions.clone();
    }

    Ok(config)
}

fn build_pipeline(config: &AnalyzerConfig) -> Result<Pipeline> {
    let tokenizer = build_tokenizer(
        config.tokenizer,
        config.language,
        config.stopwords_file.as_deref(),
    )?;
    Ok(Pipeline::new(tokenizer, config.split_mode))
}

fn load_corpus(files: &[PathBuf], config: &AnalyzerConfig) -> Result<Corpus> {
    if files.is_empty() {
        anyhow::bail!("No input files given");
    }
    let corpus = Corpus::discover(files, &config.extensions)?;
    Ok(corpus)
}

fn run_sweep(
    files: &[PathBuf],
    config: &AnalyzerConfig,
    output: Option<&Path>,
    monitor_memory: bool,
) -> Result<()> {
    let corpus = load_corpus(files, config)?;
    let pipeline = build_pipeline(config)?;
    let parallelism = available_parallelism();
    let worker_counts = config.resolved_worker_counts(parallelism);
    let report_workers = config.resolved_report_workers(parallelism);

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                 WORD FREQUENCY SCALING SWEEP                 ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Files:      {}", corpus.len());
    println!(
        "Tokenizer:  {} ({})",
        config.tokenizer.name(),
        config.tokenizer.description()
    );
    println!("Split mode: {}", config.split_mode.name());
    println!("Workers:    {:?} (report at {})", worker_counts, report_workers);
    println!("Repeats:    {}", config.repeats);
    println!("Cores:      {}\n", parallelism);

    let harness = ScalingHarness::new(pipeline)
        .with_repeats(config.repeats)
        .with_resource_monitoring(monitor_memory);
    let report = harness.run(&corpus, &worker_counts, report_workers, config.top_n)?;

    let mut console = ConsoleSink::stdout();
    emit(&mut console, &report)?;

    if let Some(path) = output {
        let mut json = JsonSink::new(path);
        emit(&mut json, &report)?;
        println!("\nResults saved to: {}", json.path().display());
    }

    if report.content_mismatch_is_fatal() {
        anyhow::bail!("Frequency tables differ across worker counts");
    }
    Ok(())
}

fn count_once(files: &[PathBuf], config: &AnalyzerConfig, workers: usize) -> Result<()> {
    let corpus = load_corpus(files, config)?;
    let pipeline = build_pipeline(config)?;

    let run = pipeline.analyze_corpus(&corpus, workers)?;

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                     WORD FREQUENCY COUNT                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    for summary in &run.files {
        println!(
            "  {}: {} tokens, {} distinct, {} chunks, {:.3}s",
            summary.source,
            summary.total_tokens,
            summary.distinct_tokens,
            summary.chunk_count,
            summary.elapsed_secs
        );
    }
    println!(
        "\n{} tokens, {} distinct in {:.3}s (wall {:.3}s) with {} workers\n",
        run.total_tokens,
        run.distinct_tokens,
        run.elapsed.as_secs_f64(),
        run.wall_time.as_secs_f64(),
        workers
    );

    let mut console = ConsoleSink::stdout();
    console.top_tokens(&run.table.top_n(config.top_n))?;
    for diag in &run.diagnostics {
        println!("  ⚠ {}: {}", diag.source, diag.message);
    }
    Ok(())
}

fn show_chunks(file: &Path, chunks: usize, mode: SplitMode) -> Result<()> {
    let text = read_text(file)?;
    let bounds = chunk_bounds(&text, chunks, mode)?;

    println!(
        "{}: {} bytes -> {} chunks ({} mode)\n",
        file.display(),
        text.len(),
        bounds.len(),
        mode.name()
    );
    for (i, range) in bounds.iter().enumerate() {
        let preview: String = text[range.clone()].trim().chars().take(40).collect();
        println!(
            "  [{:>3}] {:>10}..{:<10} {:>8} bytes  {:?}",
            i,
            range.start,
            range.end,
            range.len(),
            preview
        );
    }
    Ok(())
}
