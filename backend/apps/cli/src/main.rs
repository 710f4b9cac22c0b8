//! Puzzle CLI Entry Point
//!
//! Generates, solves and verifies client puzzles and reports timings.
//! Uses `anyhow` at the top level, but puzzle failures travel as
//! `kernel::error::AppError` so their exit codes survive.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use kernel::error::app_error::{AppError, AppResult, ResultExt};
use kernel::error::kind::ErrorKind;
use platform::crypto::{Digest256, Sha256Hasher, random_array, random_bytes, sha256};
use puzzle::domain::services::clear_leading_bits;
use puzzle::{
    BaselineClient, BaselineServer, Challenge, GeneratorConfig, OptimizedClient, OptimizedServer,
    PuzzleError, SolverConfig, SubPuzzle,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const KEY_LEN: usize = 128;
const BASELINE_DATA_LEN: usize = 512;
const OPTIMIZED_DATA_LEN: usize = 256;

#[derive(Parser)]
#[command(author, version, about = "Juels-Brainard client puzzles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, solve and verify a baseline challenge
    Baseline {
        /// Number of subpuzzles
        #[arg(short)]
        k: u8,

        /// Difficulty in bits (0..=16)
        #[arg(short)]
        m: u16,
    },

    /// Generate, solve and verify an optimized challenge
    Optimized {
        /// Number of subpuzzles
        #[arg(short)]
        k: u16,

        /// Difficulty in bits
        #[arg(short)]
        m: u16,

        /// Bit length of x ∥ z_i (multiple of 16, at most 512)
        #[arg(short)]
        l: u32,
    },

    /// Solve randomly built baseline subpuzzles without a server
    SolveRandom {
        /// Number of subpuzzles
        #[arg(short)]
        k: u8,

        /// Difficulty in bits (0..=16)
        #[arg(short)]
        m: u16,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Hex-encoded server key (random 128 bytes when omitted)
    #[arg(long, global = true)]
    key: Option<String>,

    /// Hex-encoded request data (random when omitted)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Challenge timestamp
    #[arg(long, global = true, default_value_t = 1)]
    timestamp: u32,

    /// Solver threads [default: PUZZLE_JOBS or 1]
    #[arg(long, global = true)]
    jobs: Option<usize>,

    /// Attempts per optimized subpuzzle [default: PUZZLE_MAX_ATTEMPTS or 2^32]
    #[arg(long, global = true)]
    max_attempts: Option<u64>,

    /// Overwrite erased bits with random bits instead of zeros
    #[arg(long, global = true)]
    randomize_erasure: bool,

    /// Print challenge, solution and timings as JSON
    #[arg(long, global = true)]
    json: bool,
}

impl RunArgs {
    fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig::from_env();
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        config
    }

    fn generator_config(&self) -> GeneratorConfig {
        if self.randomize_erasure {
            GeneratorConfig::randomized()
        } else {
            GeneratorConfig::default()
        }
    }

    fn key(&self) -> AppResult<Vec<u8>> {
        decode_or_random(self.key.as_deref(), KEY_LEN)
    }

    fn data(&self, default_len: usize) -> AppResult<Vec<u8>> {
        decode_or_random(self.data.as_deref(), default_len)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Timings {
    generate_us: Option<u64>,
    solve_us: u64,
    verify_us: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a, C, S> {
    scheme: &'static str,
    challenge: &'a C,
    solution: &'a S,
    verified: bool,
    timings: Timings,
}

fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "puzzle_cli=info,puzzle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            tracing::error!("Verification failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            let app = err.downcast_ref::<AppError>();
            if app.is_none_or(AppError::is_fault) {
                tracing::error!(error = ?err, "Run failed");
            }
            let code = app.map_or(1, AppError::exit_code);
            eprintln!("Error: {err}");
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let hasher = Arc::new(Sha256Hasher);
    let args = &cli.run;

    match cli.command {
        Commands::Baseline { k, m } => run_baseline(args, hasher, k, m),
        Commands::Optimized { k, m, l } => run_optimized(args, hasher, k, m, l),
        Commands::SolveRandom { k, m } => run_solve_random(args, hasher, k, m),
    }
}

fn run_baseline(args: &RunArgs, hasher: Arc<Sha256Hasher>, k: u8, m: u16) -> anyhow::Result<bool> {
    let key = args.key()?;
    let data = args.data(BASELINE_DATA_LEN)?;
    let server = BaselineServer::new(Arc::clone(&hasher), Arc::new(args.generator_config()));
    let client = BaselineClient::new(hasher, Arc::new(args.solver_config()));

    let (challenge, generated) = timed(|| server.generate(&data, &key, args.timestamp, k, m));
    let challenge = challenge.map_err(reject)?;
    let (solution, solved) = timed(|| client.solve(&challenge));
    let solution = solution.map_err(reject)?;
    let (verified, checked) = timed(|| server.verify(&solution, &data, &key, k));

    let report = Report {
        scheme: "baseline",
        challenge: &challenge,
        solution: &solution,
        verified,
        timings: Timings {
            generate_us: Some(micros(generated)),
            solve_us: micros(solved),
            verify_us: Some(micros(checked)),
        },
    };
    emit(args, &report, &format!("k={k} m={m}"))?;
    Ok(verified)
}

fn run_optimized(
    args: &RunArgs,
    hasher: Arc<Sha256Hasher>,
    k: u16,
    m: u16,
    l: u32,
) -> anyhow::Result<bool> {
    let key = args.key()?;
    let data = args.data(OPTIMIZED_DATA_LEN)?;
    let server = OptimizedServer::new(Arc::clone(&hasher));
    let client = OptimizedClient::new(hasher, Arc::new(args.solver_config()));

    let (challenge, generated) = timed(|| server.generate(&data, &key, args.timestamp, k, m, l));
    let challenge = challenge.map_err(reject)?;
    let (solution, solved) = timed(|| client.solve(&challenge));
    let solution = solution.map_err(reject)?;
    let (verified, checked) = timed(|| server.verify(&solution, &data, &key, l, k, m));

    let report = Report {
        scheme: "optimized",
        challenge: &challenge,
        solution: &solution,
        verified,
        timings: Timings {
            generate_us: Some(micros(generated)),
            solve_us: micros(solved),
            verify_us: Some(micros(checked)),
        },
    };
    emit(args, &report, &format!("k={k} m={m} l={l}"))?;
    Ok(verified)
}

/// Build `k` subpuzzles from random preimages, solve them, and check the
/// client recovered every preimage
fn run_solve_random(
    args: &RunArgs,
    hasher: Arc<Sha256Hasher>,
    k: u8,
    m: u16,
) -> anyhow::Result<bool> {
    let mut challenge = Challenge::new(args.timestamp, k, m);
    let mut originals: Vec<Digest256> = Vec::with_capacity(usize::from(k));

    for _ in 0..k {
        let preimage: Digest256 = random_array();
        let mut erased = preimage;
        clear_leading_bits(&mut erased, m).map_err(reject)?;
        challenge
            .push(SubPuzzle::new(erased, sha256(&preimage)))
            .map_err(reject)?;
        originals.push(preimage);
    }

    let client = BaselineClient::new(hasher, Arc::new(args.solver_config()));
    let (solution, solved) = timed(|| client.solve(&challenge));
    let solution = solution.map_err(reject)?;

    let recovered = solution.len() == originals.len()
        && solution
            .subsolutions()
            .iter()
            .zip(&originals)
            .all(|(sub, original)| &sub.solution == original);

    let report = Report {
        scheme: "solve-random",
        challenge: &challenge,
        solution: &solution,
        verified: recovered,
        timings: Timings {
            generate_us: None,
            solve_us: micros(solved),
            verify_us: None,
        },
    };
    emit(args, &report, &format!("k={k} m={m}"))?;
    Ok(recovered)
}

fn emit<C: Serialize, S: Serialize>(
    args: &RunArgs,
    report: &Report<'_, C, S>,
    params: &str,
) -> AppResult<()> {
    let text = render(args.json, report, params)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{text}").map_app_err(ErrorKind::Internal, "Failed to write report")
}

fn render<C: Serialize, S: Serialize>(
    json: bool,
    report: &Report<'_, C, S>,
    params: &str,
) -> AppResult<String> {
    if json {
        return serde_json::to_string_pretty(report)
            .map_app_err(ErrorKind::Internal, "Failed to encode report as JSON");
    }

    let mut lines = vec![format!("{} ({params})", report.scheme)];
    if let Some(us) = report.timings.generate_us {
        lines.push(format!("  generate  {us} us"));
    }
    lines.push(format!("  solve     {} us", report.timings.solve_us));
    if let Some(us) = report.timings.verify_us {
        lines.push(format!("  verify    {us} us"));
    }
    lines.push(format!("  verified  {}", report.verified));
    Ok(lines.join("\n"))
}

/// Log a puzzle failure at its severity and lift it into the shared error type
fn reject(err: PuzzleError) -> AppError {
    err.log();
    err.into()
}

fn decode_or_random(hex_arg: Option<&str>, len: usize) -> AppResult<Vec<u8>> {
    match hex_arg {
        Some(encoded) => Ok(hex::decode(encoded)?),
        None => Ok(random_bytes(len)),
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let started = Instant::now();
    let out = f();
    (out, started.elapsed())
}

fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}
