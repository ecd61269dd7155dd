//! CLI module for gocards

mod args;

pub use args::Args;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{CardTemplate, CardWriter, DEFAULT_TEMPLATE};
use crate::parser::GoParser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    // Diagnostic mode: print the embedded template and exit without
    // touching the input directory
    if args.print_template {
        println!("{}", DEFAULT_TEMPLATE);
        return Ok(());
    }

    // Load config file if it exists, then merge CLI arguments (CLI takes
    // precedence)
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new("gocards.toml")),
    };
    cfg.merge_cli(args.src, args.out, args.prefix, args.template, args.exclude);
    cfg.validate()?;

    let src = cfg
        .source
        .directory
        .clone()
        .ok_or_else(|| Error::config_validation("no source directory given (use --src)"))?;
    if !src.exists() {
        return Err(Error::PathNotFound(src));
    }

    // Parse the Go code. Any file that fails to parse aborts the run
    // before anything is written.
    let excludes = cfg.compiled_excludes()?;
    let mut parser = GoParser::new()?.with_verbose(args.verbose);
    let packages = parser.parse_dir(&src, &excludes)?;

    // Compile the card template
    let template = match &cfg.template.path {
        Some(path) => CardTemplate::from_file(path)?,
        None => CardTemplate::new()?,
    };

    // Resolve the output directory, creating a temporary one if the user
    // didn't pick one
    let out_dir = match cfg.output.directory.clone() {
        Some(dir) => dir,
        None => temp_out_dir()?,
    };
    std::fs::create_dir_all(&out_dir)?;

    println!("input: {}", src.display());
    println!("output: {}", out_dir.display());
    println!("generating...");

    let writer = CardWriter::new(template, cfg.output.prefix.clone(), out_dir);
    for pkg in packages.values() {
        match writer.write_package(pkg)? {
            Some(path) => {
                if args.verbose {
                    println!("  {} -> {}", pkg.name, path.display());
                }
            }
            None => {
                if args.verbose {
                    println!("  {} (skipped)", pkg.name);
                }
            }
        }
    }

    println!("done");

    Ok(())
}

/// Create a fresh temporary directory for card output
fn temp_out_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new().prefix("gocards").tempdir()?;
    Ok(dir.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_out_dir_is_created() {
        let dir = temp_out_dir().unwrap();
        assert!(dir.exists());
        assert!(dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap()
            .starts_with("gocards"));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
