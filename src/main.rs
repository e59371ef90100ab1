mod pages;
mod parser;
mod settings;
mod tables;

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use parser::MatchTables;
use settings::Settings;

#[derive(Parser)]
#[command(name = "dota_parser", about = "Normalize saved match report pages into tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse saved matches and write one JSON object per match
    Parse {
        /// Match ids (default: every id with a saved overview page)
        ids: Vec<u64>,
        /// Saved pages root (overrides DOTA_PAGES_DIR)
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// File of already-processed ids to skip, one per line
        #[arg(short, long)]
        known: Option<PathBuf>,
    },
    /// Parse one match and show per-table row counts
    Inspect {
        id: u64,
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(?settings, "settings loaded");

    match cli.command {
        Commands::Parse {
            ids,
            dir,
            out,
            known,
        } => {
            let dir = dir.unwrap_or_else(|| settings.pages_dir.clone());
            let candidates = if ids.is_empty() {
                pages::discover_ids(&dir)?
            } else {
                ids
            };
            let known = match known {
                Some(path) => pages::read_known(&path)?,
                None => HashSet::new(),
            };
            let ids = pages::new_ids(&candidates, &known);
            if ids.is_empty() {
                eprintln!("No new matches to parse.");
                return Ok(());
            }

            let sink: Box<dyn Write> = match &out {
                Some(path) => Box::new(
                    File::create(path).with_context(|| format!("creating {}", path.display()))?,
                ),
                None => Box::new(io::stdout().lock()),
            };
            let mut sink = BufWriter::new(sink);

            eprintln!("Parsing {} matches from {}...", ids.len(), dir.display());
            let counts = process_matches(&dir, &ids, settings.chunk_size, &mut sink)?;
            sink.flush()?;
            counts.print();
        }
        Commands::Inspect { id, dir } => {
            let dir = dir.unwrap_or_else(|| settings.pages_dir.clone());
            let tables = parse_one(&dir, id)?;

            println!("Match {}", tables.match_id);
            println!("{:<12} | {:>6}", "Table", "Rows");
            println!("{}", "-".repeat(21));
            for (table, rows) in tables.row_counts() {
                let rows = rows.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
                println!("{:<12} | {:>6}", table, rows);
            }
            if !tables.failures.is_empty() {
                println!("\n--- Failures ---");
                for f in &tables.failures {
                    println!("  {}/{}: {}", f.section, f.table, f.error);
                }
            }
        }
    }

    Ok(())
}

#[derive(Default)]
struct ParseCounts {
    matches: usize,
    skipped: usize,
    failed_tables: usize,
    elapsed: Duration,
}

impl ParseCounts {
    fn print(&self) {
        eprintln!(
            "Wrote {} matches ({} skipped, {} failed tables) in {:.1}s, {:.0} matches/s.",
            self.matches,
            self.skipped,
            self.failed_tables,
            self.elapsed.as_secs_f64(),
            self.per_second(),
        );
    }

    fn per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.matches + self.skipped) as f64 / secs
        } else {
            0.0
        }
    }
}

fn parse_one(dir: &Path, id: u64) -> Result<MatchTables> {
    let docs = pages::load_documents(dir, id)?;
    if docs.is_empty() {
        anyhow::bail!("no saved pages for match {id} under {}", dir.display());
    }
    debug!(match_id = id, pages = docs.len(), "pages loaded");
    let tables = parser::process_match(&docs).with_context(|| format!("match {id}"))?;
    if tables.match_id != id {
        warn!(requested = id, found = tables.match_id, "pages carry a different match id");
    }
    Ok(tables)
}

/// Parse in parallel batches; each batch is written in input order.
fn process_matches(
    dir: &Path,
    ids: &[u64],
    chunk_size: usize,
    sink: &mut impl Write,
) -> Result<ParseCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let started = Instant::now();
    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:>8} [{bar:32.green/white}] {pos}/{len} matches, eta {eta}")?
            .progress_chars("=> "),
    );
    pb.set_message("parsing");

    let mut counts = ParseCounts::default();
    for chunk in ids.chunks(chunk_size.max(1)) {
        let results: Vec<_> = chunk.par_iter().map(|&id| (id, parse_one(dir, id))).collect();

        for (id, result) in results {
            match result {
                Ok(tables) => {
                    counts.matches += 1;
                    counts.failed_tables += tables.failures.len();
                    serde_json::to_writer(&mut *sink, &tables)?;
                    sink.write_all(b"\n")?;
                }
                Err(e) => {
                    counts.skipped += 1;
                    pb.suspend(|| warn!(match_id = id, error = %format!("{e:#}"), "match skipped"));
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    counts.elapsed = started.elapsed();
    Ok(counts)
}
