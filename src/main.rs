use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;

use fitinfo::{Fit, FitReport, Node};

/// Parse a FIT image, verify every embedded hash, and print a report.
#[derive(Parser)]
#[command(name = "fitinfo", version, about)]
struct Args {
    /// Path to the FIT image (.itb) file.
    itb: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Report only the named configuration (default: all of them).
    #[arg(long)]
    config: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let blob = fs::read(&args.itb)
        .with_context(|| format!("reading {}", args.itb.display()))?;
    let root = Node::from_dtb(&blob)?;

    let fit = match Fit::build(&root) {
        Ok(fit) => fit,
        Err(err) => {
            eprintln!("{} {err}", "FAIL".red().bold());
            return Err(err.into());
        }
    };

    let mut report = FitReport::new(&fit);
    if let Some(name) = &args.config {
        if !fit.configs().contains_key(name) {
            bail!("configuration `{name}` not present in {}", args.itb.display());
        }
        report.retain_config(name);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
        println!("{} all image hashes verified", "OK".green().bold());
    }
    Ok(())
}
