use std::env;
use std::path::PathBuf;
use tramites_export::{Config, Error, ReportProcessor};

const DEFAULT_OUTPUT_FILE: &str = "reporte_tramites.xlsx";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [output.xlsx]", args[0]);
        return Ok(());
    }

    let output_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

    let config = Config::from_env()?;

    let processor = ReportProcessor::new(config, output_path);
    processor.process();

    println!("Processing completed successfully");
    Ok(())
}
