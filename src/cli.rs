use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use calcfuzz::harness::{CandidateEvaluator, ReferenceEvaluator};
use calcfuzz::{Harness, RunConfig, generate_batch};
use clap::{Parser, ValueEnum};
use log::{info, warn};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Calcfuzz - Differential fuzzing for expression evaluators
#[derive(Parser, Debug)]
#[command(name = "calcfuzz")]
#[command(
    about = "Generate random arithmetic expressions and compare a candidate evaluator against a reference"
)]
#[command(version)]
pub struct CliArgs {
    /// YAML file with the full run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of rounds to run
    #[arg(short, long)]
    pub rounds: Option<usize>,

    /// Nominal expression length in slots
    #[arg(long)]
    pub length: Option<usize>,

    /// Base seed; a random one is chosen and printed when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated operator symbols, e.g. "+,-,*,/"
    #[arg(long, value_delimiter = ',')]
    pub operators: Option<Vec<String>>,

    /// Comma-separated function names, e.g. "abs,sqrt,max,min"
    #[arg(long, value_delimiter = ',')]
    pub functions: Option<Vec<String>>,

    /// Maximum number of extra arguments for variadic functions
    #[arg(long)]
    pub max_extra_arguments: Option<usize>,

    /// URL of the reference evaluator
    #[arg(long)]
    pub reference_url: Option<String>,

    /// Candidate command line; the input file path is appended
    #[arg(long)]
    pub candidate: Option<String>,

    /// Per-evaluator timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Print generated expressions without evaluating them
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any round diverged
    #[arg(long)]
    pub fail_on_divergence: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub run: RunConfig,
    pub seed: u64,
    pub dry_run: bool,
    pub fail_on_divergence: bool,
    pub log_level: LogLevel,
}

fn parse_operators(symbols: &[String]) -> Result<Vec<char>> {
    symbols
        .iter()
        .map(|s| {
            let mut chars = s.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => bail!("Operator must be a single character: '{}'", s),
            }
        })
        .collect()
}

/// Merge command line flags over the configuration file
pub fn build_config(args: CliArgs) -> Result<CliConfig> {
    let mut run = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        None => RunConfig::default(),
    };

    if let Some(rounds) = args.rounds {
        run.rounds = rounds;
    }
    if let Some(length) = args.length {
        run.length = length;
    }
    if let Some(seed) = args.seed {
        run.seed = Some(seed);
    }
    if let Some(operators) = &args.operators {
        run.generator.operators = parse_operators(operators)?;
    }
    if let Some(functions) = args.functions {
        let functions: Vec<String> = functions.into_iter().map(|f| f.trim().to_string()).collect();
        // Keep only the variadic markers that still name a function
        run.generator
            .variadic_functions
            .retain(|v| functions.contains(v));
        run.generator.functions = functions;
    }
    if let Some(max_extra) = args.max_extra_arguments {
        run.generator.max_extra_arguments = max_extra;
    }
    if let Some(url) = args.reference_url {
        run.reference.url = url;
    }
    if let Some(candidate) = &args.candidate {
        run.candidate.command = candidate.split_whitespace().map(String::from).collect();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        run.timeout_ms = timeout_ms;
    }

    run.validate().context("Invalid configuration")?;

    let seed = run.seed.unwrap_or_else(rand::random);

    Ok(CliConfig {
        run,
        seed,
        dry_run: args.dry_run,
        fail_on_divergence: args.fail_on_divergence,
        log_level: args.log_level,
    })
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    build_config(CliArgs::parse())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    info!(
        "Running {} rounds of length {} with seed {}",
        config.run.rounds, config.run.length, config.seed
    );
    println!("Seed: {}", config.seed);

    if config.dry_run {
        let expressions = generate_batch(
            &config.run.generator,
            config.run.length,
            config.seed,
            config.run.rounds,
        )?;
        for expr in expressions {
            println!("{}", expr);
        }
        return Ok(());
    }

    let timeout = Duration::from_millis(config.run.timeout_ms);
    let reference = ReferenceEvaluator::new(config.run.reference.url.clone(), timeout)?;
    let candidate = CandidateEvaluator::new(&config.run.candidate.command)?;
    info!(
        "Reference: {}, candidate: {}",
        reference.url(),
        candidate.command_line()
    );

    let harness = Harness::new(config.run, Box::new(reference), Box::new(candidate));
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let summary = runtime.block_on(harness.run(config.seed))?;

    println!("{}", summary);
    if summary.divergences > 0 {
        warn!("{} of {} rounds diverged", summary.divergences, summary.rounds);
        if config.fail_on_divergence {
            bail!("{} divergent rounds", summary.divergences);
        }
    }
    Ok(())
}
