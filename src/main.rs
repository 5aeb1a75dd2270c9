use clap::Parser;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use page_param_detect::{DetectorConfig, PaginationDetector, Result, ScanEvent};

mod args;
use args::Args;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("Detection failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => DetectorConfig::from_file(path)?,
        None => DetectorConfig::default(),
    };
    let mut detector = PaginationDetector::new(config);
    if let Some(max_paging_docs) = args.max_paging_docs {
        detector = detector.with_max_paging_docs(max_paging_docs);
    }

    let events = read_events(&args.events)?;
    ::log::info!("Read {} scan events for {}", events.len(), args.doc_url);

    let result = detector.detect_events(&events, &args.doc_url);
    ::log::info!("Detected {:?} with {} pages", result.param_type, result.pages.len());

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);
    Ok(())
}

fn read_events(path: &Path) -> Result<Vec<ScanEvent>> {
    let mut contents = String::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut contents)?;
    } else {
        contents = std::fs::read_to_string(path)?;
    }
    Ok(serde_json::from_str(&contents)?)
}
