// demos/dump_pages.rs
//! Write a run of pages from a spool file to stdout.
//!
//! ```text
//! cargo run --example dump_pages -- statement.txt 3 2
//! ```

use report_index_rs::*;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("usage: dump_pages <spool file> [start page] [count]");
        return Ok(());
    };
    let start = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
    let count = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);

    let spool = SpoolReader::open(path)?;
    eprintln!("{}: {} pages, {} format", path, spool.page_count(), spool.format());

    let run = spool.get_page_range(start, count)?;
    if run.page_count < count {
        eprintln!("only {} of {} requested pages available", run.page_count, count);
    }

    std::io::stdout().write_all(&run.bytes)?;
    Ok(())
}
