use anyhow::{Context, Result};
use casejsonl::{process, validate};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(about = "Convert support-case CSV data to a JSONL evaluation dataset")]
#[command(version)]
struct Cli {
    /// Path to the input CSV file
    input_csv: PathBuf,

    /// Path to the output JSONL file (default: input file with a .jsonl extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Validate the output file and show sample records
    #[arg(long)]
    validate: bool,

    /// Number of sample records to show during validation
    #[arg(long, default_value_t = validate::DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) resolve paths ────────────────────────────────────────────
    let cli = Cli::parse();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| process::utils::default_output_path(&cli.input_csv));

    println!("Converting CSV to JSONL...");
    println!("Input: {}", cli.input_csv.display());
    println!("Output: {}", output.display());
    println!("{:-<50}", "");

    // ─── 3) convert ──────────────────────────────────────────────────
    let report = process::convert(&cli.input_csv, &output)
        .with_context(|| format!("converting {}", cli.input_csv.display()))?;

    println!();
    println!("Conversion completed!");
    println!("Successfully converted: {} records", report.converted_count);
    println!("Skipped records: {}", report.skipped_count);
    println!("Output file: {}", output.display());

    // ─── 4) optional read-back ───────────────────────────────────────
    if cli.validate {
        match validate::validate(&output, cli.sample_size) {
            Ok(summary) => println!("\n{}", summary),
            // the dataset is already written; a failed read-back is not fatal
            Err(e) => error!("Validation error: {}", e),
        }
    }

    info!("done");
    Ok(())
}
