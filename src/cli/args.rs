//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Generate Quizlet flash cards from Go package documentation
#[derive(Parser, Debug)]
#[command(name = "gocards")]
#[command(about = "Generate Quizlet flash cards from Go package documentation")]
#[command(version)]
pub struct Args {
    /// Path to the Go source directory
    #[arg(short, long)]
    pub src: Option<PathBuf>,

    /// Output directory (a temporary directory is created if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Prefix for output file names
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Path to a custom card template file
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Glob patterns to exclude from parsing (can be repeated)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Print the default card template to stdout and exit
    #[arg(long)]
    pub print_template: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
