//! CLI tool for folioview - replays a recorded pointer/scroll/hover trace
//! through the reveal controller and outputs the emitted targets as JSON
//!
//! Usage:
//!   folioview_cli <trace.json>                       # Output JSON to stdout
//!   folioview_cli <trace.json> -o out.json           # Output JSON to file
//!   folioview_cli <trace.json> --config reveal.json  # Non-default config
//!
//! Set `RUST_LOG=folioview=debug` for lifecycle logging on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use folioview::reveal::{parse_trace, replay};
use folioview::RevealConfig;
use tracing_subscriber::EnvFilter;

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        fail("Usage: folioview_cli <trace.json> [-o output.json] [--config config.json]");
    }

    let input_path = &args[1];
    let mut output_path: Option<&String> = None;
    let mut config_path: Option<&String> = None;
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "-o" => output_path = rest.next(),
            "--config" => config_path = rest.next(),
            other => fail(&format!("Unknown argument: {other}")),
        }
    }

    let config = match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .unwrap_or_else(|e| fail(&format!("Error reading {path}: {e}")));
            RevealConfig::from_json(&raw)
                .unwrap_or_else(|e| fail(&format!("Error in config {path}: {e}")))
        }
        None => RevealConfig::default(),
    };

    // Read and parse trace
    let raw = fs::read_to_string(input_path)
        .unwrap_or_else(|e| fail(&format!("Error reading {input_path}: {e}")));
    let events =
        parse_trace(&raw).unwrap_or_else(|e| fail(&format!("Error parsing trace: {e}")));

    let result = replay(config, &events);
    tracing::info!(
        steps = result.steps.len(),
        hovering = result.final_state.hovering,
        "replay finished"
    );

    // Serialize to JSON
    let json = serde_json::to_string_pretty(&result)
        .unwrap_or_else(|e| fail(&format!("Error serializing JSON: {e}")));

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
