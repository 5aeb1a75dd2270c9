use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-param-detect")]
#[command(about = "Detects pagination from the numbers found while scanning a document")]
#[command(version)]
pub struct Args {
    /// JSON file with the scanner's events, or "-" for stdin
    pub events: PathBuf,

    /// URL of the scanned document
    #[arg(short, long)]
    pub doc_url: String,

    /// Detector configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the maximum number of distinct paging links
    #[arg(long)]
    pub max_paging_docs: Option<usize>,

    /// Pretty-print the result
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
