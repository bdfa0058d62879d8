use appwire_logger::{LogSettings, Logger};

#[test]
fn init_from_default_settings_has_no_guard() {
    let logger = Logger::from_settings("integration-console-only", &LogSettings::default())
        .expect("logger should initialize");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
