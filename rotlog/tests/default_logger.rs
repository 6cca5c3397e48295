use std::{fs, path::PathBuf, sync::Arc};

use rotlog::{Level, LogError, Logger, RotatingLogFile};

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rotlog_it_{name}"));
    let _ = fs::remove_dir_all(&dir);
    dir
}

// The process-wide logger and the `log` bridge are global, so the whole
// lifecycle runs in one test.
#[test]
fn test_default_logger_lifecycle() {
    let dir = test_dir("default_logger");
    let first_path = dir.join("first.log");
    let second_path = dir.join("second.log");

    let logger = rotlog::init_default(Logger::builder().level(Level::Info)).unwrap();
    assert!(matches!(
        rotlog::init_default(Logger::builder()),
        Err(LogError::AlreadyInitialized)
    ));
    assert!(Arc::ptr_eq(&logger, &rotlog::default_logger()));

    rotlog::register(RotatingLogFile::new(&first_path, "").unwrap()).unwrap();
    rotlog::install_log_bridge(log::LevelFilter::Trace).unwrap();

    let line = line!() + 1;
    rotlog::info!("macro {}", 1);
    rotlog::debug!("below level");
    log::warn!("from the log crate");
    log::trace!("filtered by rotlog level");
    rotlog::fatal!(logger: logger, "explicit {}", "instance");
    rotlog::flush().unwrap();

    let content = fs::read_to_string(&first_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3, "{content}");
    assert!(lines[0].starts_with("[INFO]["));
    assert!(lines[0].ends_with(&format!("[default_logger.rs:{line}]macro 1")));
    assert!(lines[1].starts_with("[WARN]["));
    assert!(lines[1].ends_with("]from the log crate"));
    assert!(lines[2].starts_with("[FATAL]["));
    assert!(lines[2].ends_with("]explicit instance"));

    rotlog::close();
    assert!(logger.is_closed());
    rotlog::error!("goes to a fresh logger without sinks");

    let fresh = rotlog::default_logger();
    assert!(!Arc::ptr_eq(&logger, &fresh));
    assert_eq!(fresh.level(), Level::Debug);
    rotlog::set_level(Level::Warning);
    assert_eq!(fresh.level(), Level::Warning);
    rotlog::set_time_format("%H:%M").unwrap();
    rotlog::register(RotatingLogFile::new(&second_path, "").unwrap()).unwrap();
    rotlog::warn!("after reopen");
    rotlog::close();

    let content = fs::read_to_string(&second_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("[WARN]["));
    assert_eq!(content.split(']').nth(1).map(str::len), Some("[12:00".len()));
    assert_eq!(fs::read_to_string(&first_path).unwrap().lines().count(), 3);
}
