mod export;
mod fetch;
mod page;
mod tramite;

pub use export::{ReportExporter, ReportTable};
pub use fetch::TramiteFetcher;
pub use page::{parse_page, TramitePage};
pub use tramite::{Tramite, FIXED_FIELDS};

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use crate::config::Config;
use crate::error::Error;

pub struct ReportProcessor {
    config: Config,
    output_path: PathBuf,
    progress_logger: ProgressLogger,
}

struct ProgressLogger {
    log_file: Option<Mutex<File>>,
    log_path: PathBuf,
    start_time: Instant,
}

impl ProgressLogger {
    fn new(log_dir: &Path) -> Result<Self, Error> {
        // Ensure the log directory exists
        fs::create_dir_all(log_dir).map_err(Error::Io)?;

        // Create a log file name with timestamp
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("export_{}.log", timestamp);
        let log_path = log_dir.join(log_filename);

        let mut log_file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(true)
            .open(&log_path)
            .map_err(Error::Io)?;

        writeln!(log_file, "=== Log started at {} ===", timestamp).map_err(Error::Io)?;

        Ok(Self {
            log_file: Some(Mutex::new(log_file)),
            log_path,
            start_time: Instant::now(),
        })
    }

    // Fallback when the log file cannot be created; messages still reach stdout
    fn stdout_only() -> Self {
        Self {
            log_file: None,
            log_path: PathBuf::new(),
            start_time: Instant::now(),
        }
    }

    fn log(&self, message: &str) {
        let elapsed = self.start_time.elapsed();
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let log_message = format!("[{} +{}s] {}\n", timestamp, elapsed.as_secs(), message);

        if let Some(log_file) = &self.log_file {
            if let Ok(mut file) = log_file.lock() {
                let _ = file.write_all(log_message.as_bytes());
                let _ = file.flush();
            }
        }

        // Print to stdout for debugging
        print!("{}", log_message);
    }

    fn get_log_path(&self) -> &Path {
        &self.log_path
    }
}

impl ReportProcessor {
    pub fn new(config: Config, output_path: PathBuf) -> Self {
        let log_dir = PathBuf::from(&config.logging.directory);
        let progress_logger = match ProgressLogger::new(&log_dir) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("Error creating log file in '{}': {}", log_dir.display(), e);
                ProgressLogger::stdout_only()
            }
        };

        Self {
            config,
            output_path,
            progress_logger,
        }
    }

    // Runs the full pipeline: fetch every page of tramites, then export them
    // to the spreadsheet. Fetch and export failures are reported on stderr
    // and leave a shorter or missing report; they never abort the run
    pub fn process(&self) {
        self.progress_logger.log("Starting tramite report generation");

        let tramites = match TramiteFetcher::new(&self.config.api) {
            Ok(fetcher) => fetcher.fetch_all(),
            Err(e) => {
                eprintln!("Error creating HTTP client: {}", e);
                Vec::new()
            }
        };
        self.progress_logger
            .log(&format!("Fetched {} tramites", tramites.len()));

        let exporter = ReportExporter::new(&self.config.export);
        exporter.export(&tramites, &self.output_path);

        self.progress_logger.log("Report generation finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, ExportConfig, LoggingConfig};
    use tempfile::tempdir;

    fn test_config(log_dir: &Path) -> Config {
        Config {
            api: ApiConfig {
                // Port 0 is never reachable, so fetches fail fast
                base_url: "http://127.0.0.1:0/tramites".to_string(),
                token: "test-token".to_string(),
            },
            export: ExportConfig {
                nested_fields: vec!["nombre".to_string()],
            },
            logging: LoggingConfig {
                directory: log_dir.to_string_lossy().to_string(),
            },
        }
    }

    #[test]
    fn test_processor_creation() {
        let temp_dir = tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");

        let processor = ReportProcessor::new(
            test_config(&log_dir),
            temp_dir.path().join("reporte.xlsx"),
        );

        assert!(log_dir.exists());
        assert!(processor.progress_logger.get_log_path().exists());
    }

    #[test]
    fn test_progress_logging() {
        let temp_dir = tempdir().unwrap();
        let logger = ProgressLogger::new(temp_dir.path()).unwrap();

        logger.log("First entry");
        logger.log("Second entry");

        // Give filesystem a moment to sync
        std::thread::sleep(std::time::Duration::from_millis(100));

        let log_content = fs::read_to_string(logger.get_log_path()).unwrap();
        assert!(log_content.contains("=== Log started at"));
        assert!(log_content.contains("First entry"));
        assert!(log_content.contains("Second entry"));
    }

    #[test]
    fn test_stdout_only_logger_does_not_panic() {
        let logger = ProgressLogger::stdout_only();
        logger.log("Message without a log file");
        assert_eq!(logger.get_log_path(), Path::new(""));
    }

    #[test]
    fn test_logger_falls_back_when_log_dir_is_a_file() {
        let temp_dir = tempdir().unwrap();
        let blocking_file = temp_dir.path().join("logs");
        fs::write(&blocking_file, "not a directory").unwrap();

        let processor = ReportProcessor::new(
            test_config(&blocking_file),
            temp_dir.path().join("reporte.xlsx"),
        );
        assert_eq!(processor.progress_logger.get_log_path(), Path::new(""));
    }

    #[test]
    fn test_process_without_reachable_api() {
        let temp_dir = tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let output_path = temp_dir.path().join("reporte.xlsx");

        let processor = ReportProcessor::new(test_config(&log_dir), output_path.clone());
        processor.process();

        // Give filesystem a moment to sync
        std::thread::sleep(std::time::Duration::from_millis(100));

        let log_content = fs::read_to_string(processor.progress_logger.get_log_path()).unwrap();
        assert!(log_content.contains("Starting tramite report generation"));
        assert!(log_content.contains("Fetched 0 tramites"));
        assert!(log_content.contains("Report generation finished"));

        // Nothing fetched, so no spreadsheet is written
        assert!(!output_path.exists());
    }
}
