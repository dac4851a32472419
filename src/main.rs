// Mon Oct 12 2026 - Alex

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use rayon::prelude::*;
use sigscan::{
    config::ScanConfig,
    report::{self, FileReport},
    utils::{format_bytes, LoggingUtils},
    Address, BackendFamily, Pattern, ScanContext,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Vectorized wildcard signature scanner", long_about = None)]
struct Args {
    /// Pattern in IDA form, e.g. "48 8B ?? ?? 89"
    #[arg(short, long)]
    pattern: String,

    /// Required start-address stride (power of two)
    #[arg(short, long)]
    align: Option<usize>,

    /// scalar, sse2, avx2 or neon; detected when omitted
    #[arg(short, long)]
    backend: Option<BackendFamily>,

    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many matches per file (0 = no limit)
    #[arg(short, long)]
    max_matches: Option<usize>,

    /// Resolve a rel32 operand this many bytes into each match
    #[arg(long)]
    rel: Option<usize>,

    /// Address the first byte of each file is reported at
    #[arg(long, value_parser = parse_address)]
    base: Option<u64>,

    /// Scan files one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Write results as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn parse_address(s: &str) -> Result<u64, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid address '{}': {}", s, e))
}

fn build_config(args: &Args) -> Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    if let Some(backend) = args.backend {
        config.backend = Some(backend);
    }
    if let Some(align) = args.align {
        config.alignment = align;
    }
    if let Some(max_matches) = args.max_matches {
        config.max_matches = max_matches;
    }
    if args.sequential {
        config.parallel = false;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    LoggingUtils::init_for_cli(args.verbose);

    let config = build_config(&args)?;
    let pattern: Pattern = args
        .pattern
        .parse()
        .with_context(|| format!("Invalid pattern '{}'", args.pattern))?;
    let ctx = ScanContext::from_config(&pattern, &config)?;
    let base = Address::new(args.base.unwrap_or(0));

    println!("{} Pattern: {}", "[*]".blue(), pattern.to_string().cyan());
    println!(
        "{} Routine: {} ({} alignment)",
        "[*]".blue(),
        ctx.routine(),
        ctx.alignment()
    );
    log::info!(
        "Scanning {} file(s) with {} significant byte(s)",
        args.files.len(),
        pattern.significant_byte_count()
    );

    let start_time = Instant::now();
    let scan = |path: &PathBuf| {
        report::scan_file(&ctx, path, base, config.max_matches, args.rel)
    };
    let results: Vec<_> = if config.parallel {
        args.files.par_iter().map(scan).collect()
    } else {
        args.files.iter().map(scan).collect()
    };

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for result in results {
        match result {
            Ok(report) => {
                print_report(&report);
                reports.push(report);
            }
            Err(e) => {
                eprintln!("{} {}", "[!]".red(), e);
                failures += 1;
            }
        }
    }

    if let Some(path) = &args.output {
        report::save_reports(&reports, path)
            .with_context(|| format!("Failed to save results to {}", path.display()))?;
        println!("{} Results saved to: {}", "[+]".green(), path.display());
    }

    let total: usize = reports.iter().map(|r| r.matches.len()).sum();
    let scanned: u64 = reports.iter().map(|r| r.size).sum();
    println!();
    println!(
        "{} {} match(es) in {} across {} file(s) in {:.2}s",
        "[+]".green(),
        total,
        format_bytes(scanned),
        reports.len(),
        start_time.elapsed().as_secs_f64()
    );

    if failures > 0 {
        anyhow::bail!("{} file(s) could not be scanned", failures);
    }
    Ok(())
}

fn print_report(report: &FileReport) {
    println!();
    println!(
        "{} {} ({}, {:.2}ms)",
        "[+]".green(),
        report.path.display().to_string().bold(),
        format_bytes(report.size),
        report.elapsed_ms
    );

    if report.matches.is_empty() {
        println!("  {}", "no matches".dimmed());
        return;
    }

    for m in &report.matches {
        let mut line = format!(
            "  {} {}  {}",
            format!("+0x{:08x}", m.offset).yellow(),
            m.address,
            m.bytes.dimmed()
        );
        if let (Some(rel), Some(target)) = (m.rel_offset, m.rel_address) {
            line.push_str(&format!(" -> {} (file {})", target.to_string().cyan(), signed_hex(rel)));
        }
        println!("{}", line);
    }

    if report.truncated {
        println!("  {}", "... stopped at max matches".dimmed());
    }
}

fn signed_hex(value: i64) -> String {
    if value < 0 {
        format!("-0x{:x}", value.unsigned_abs())
    } else {
        format!("0x{:x}", value)
    }
}
