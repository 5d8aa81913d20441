// demos/inspect_index.rs
//! Print the header, segment table and directory of an index file, then
//! optionally search it.
//!
//! ```text
//! cargo run --example inspect_index -- statement.idx
//! cargo run --example inspect_index -- statement.idx 12:3 EP2412310 prefix
//! ```

use report_index_rs::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("usage: inspect_index <index file> [line:field value [exact|prefix]]");
        return Ok(());
    };

    let reader = IndexReader::open(path)?;

    match reader.info() {
        Some(info) => println!(
            "header: {} segments declared, date {:?}, flags 0x{:04X}",
            info.segment_count, info.date, info.flags
        ),
        None => println!("header: signature not recognised"),
    }
    println!("segments discovered: {}", reader.segment_count());
    for segment in reader.segments() {
        println!("  #{:<3} @{:>8}  {} bytes", segment.index, segment.data_start, segment.len());
    }

    println!("directory:");
    for entry in reader.directory().entries() {
        println!(
            "  {} -> segment {} (flags 0x{:02X})",
            entry.key(),
            entry.target_segment,
            entry.flags
        );
    }

    for diagnostic in reader.diagnostics() {
        println!("warning: {}", diagnostic);
    }

    if let [_, key, value, rest @ ..] = args.as_slice() {
        let key: FieldKey = key.parse()?;
        let mode = match rest.first().map(String::as_str) {
            Some("prefix") => SearchMode::Prefix,
            _ => SearchMode::Exact,
        };

        let outcome = reader.search_key(key, value, mode);
        println!("{} search for {:?} in {}: pages {:?}", mode, value, key, outcome.value);
        for diagnostic in &outcome.diagnostics {
            println!("warning: {}", diagnostic);
        }
    }

    Ok(())
}
