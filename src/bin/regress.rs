use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use regress_core::vector::Vector3;
use trajectory_regression::config::{load_manifest, manifest_files};
use trajectory_regression::eclipse::{self, Shadow, bodies};
use trajectory_regression::run::run_batch;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compare propagated trajectories against reference output"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run regression test cases
    Compare(CompareArgs),
    /// Evaluate the illumination ratio of a single geometry
    Illumination(IlluminationArgs),
}

#[derive(Args)]
struct CompareArgs {
    /// Directory of case manifests (*.toml, *.yaml, *.yml)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Case manifest file (repeatable)
    #[arg(short = 'f', long = "file")]
    files: Vec<PathBuf>,

    /// Output directory; each run writes into a timestamped subfolder
    #[arg(short = 'o', long = "output", default_value = "output")]
    output: PathBuf,

    /// Directory against which relative reference paths are resolved
    #[arg(short = 'm', long = "reference-dir")]
    reference_dir: Option<PathBuf>,
}

#[derive(Args)]
struct IlluminationArgs {
    /// Spacecraft position relative to the occulting body, metres (X,Y,Z)
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    spacecraft: Vector3,

    /// Light source position relative to the occulting body, metres (X,Y,Z)
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    source: Vector3,

    /// Occulting body
    #[arg(long, value_enum, default_value_t = Body::Earth)]
    body: Body,

    /// Light source radius in metres (defaults to the Sun)
    #[arg(long, default_value_t = bodies::SUN)]
    source_radius: f64,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Body {
    Earth,
    Moon,
}

impl Body {
    fn radius_m(self) -> f64 {
        match self {
            Body::Earth => bodies::EARTH,
            Body::Moon => bodies::MOON,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Compare(args) => compare(args),
        Command::Illumination(args) => illumination(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn compare(args: CompareArgs) -> anyhow::Result<()> {
    let mut sources = Vec::new();
    sources.extend(args.input.clone());
    sources.extend(args.files.iter().cloned());
    if sources.is_empty() {
        bail!("no test cases given; pass --input <DIR> or --file <FILE>");
    }

    let mut cases = Vec::new();
    let mut load_failures = 0usize;
    for source in &sources {
        let files = match manifest_files(source) {
            Ok(files) => files,
            Err(err) => {
                log::error!("failed to list {}: {err}", source.display());
                load_failures += 1;
                continue;
            }
        };
        for file in files {
            match load_manifest(&file, args.reference_dir.as_deref()) {
                Ok(loaded) => cases.extend(loaded),
                Err(err) => {
                    log::error!("failed to load {}: {err}", file.display());
                    load_failures += 1;
                }
            }
        }
    }

    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S-%3f");
    let run_dir = args.output.join(stamp.to_string());
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;

    let summary = run_batch(&cases, &run_dir);
    println!("Output: {}", run_dir.display());
    println!(
        "Cases: {} succeeded, {} failed",
        summary.succeeded.len(),
        summary.failed.len() + load_failures
    );
    for (name, reason) in &summary.failed {
        println!("  FAILED {name}: {reason}");
    }

    if !summary.is_success() || load_failures > 0 {
        bail!(
            "{} of {} case(s) failed",
            summary.failed.len() + load_failures,
            summary.total() + load_failures
        );
    }
    Ok(())
}

fn illumination(args: IlluminationArgs) -> anyhow::Result<()> {
    let ratio = eclipse::illumination_ratio(
        &args.spacecraft,
        &args.source,
        args.body.radius_m(),
        args.source_radius,
    )?;
    let shadow = match Shadow::from_ratio(ratio) {
        Shadow::Umbra => "umbra",
        Shadow::Penumbra => "penumbra",
        Shadow::Light => "light",
    };
    println!("Illumination ratio: {ratio:.6} ({shadow})");
    Ok(())
}

fn parse_vector(s: &str) -> Result<Vector3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected X,Y,Z but got '{s}'"));
    }
    let mut v = [0.0; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|err| format!("invalid component '{part}': {err}"))?;
    }
    Ok(v)
}
