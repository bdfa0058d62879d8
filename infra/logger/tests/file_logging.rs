use appwire_logger::{LogSettings, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn json_file_logging_writes_records() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let settings = LogSettings { json: true, dir: Some(log_dir.clone()), ..LogSettings::default() };
    let logger = Logger::from_settings("integration-file-logging", &settings)?;
    assert!(logger.guard().is_some());

    tracing::info!(answer = 42, "hello from integration test");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let content = fs::read_to_string(&log_file)?;
    let line = content
        .lines()
        .find(|line| line.contains("hello from integration test"))
        .expect("record should be written");
    assert!(line.starts_with('{'), "records should be JSON: {line}");
    assert!(line.contains("\"answer\":42"));

    Ok(())
}
