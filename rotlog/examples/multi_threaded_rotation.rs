use std::{path::PathBuf, sync::Arc, time::Duration};

use rotlog::{Level, LogStdout, Logger, RotatingLogFile};

fn main() {
    let dir = PathBuf::from("/tmp/rotlog_example_rotation");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("app.log");

    let logger = Arc::new(
        Logger::builder()
            .level(Level::Debug)
            .rotate_interval(Duration::from_secs(1))
            .build(),
    );
    logger
        .register(
            RotatingLogFile::new(&path, &format!("{}.%Y%M%D%H%m", path.display()))
                .expect("Invalid rotation pattern")
                .with_levels(Level::Trace, Level::Info),
        )
        .expect("Unable to open log file");
    logger
        .register(LogStdout::new(true).with_levels(Level::Warning, Level::Fatal))
        .expect("Unable to attach console");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for n in 0..25 {
                    rotlog::info!(logger: logger, "thread {i} message {n}");
                }
                rotlog::warn!(logger: logger, "thread {i} done");
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.close();

    println!("\n--- Rotation Summary ---");
    for entry in std::fs::read_dir(&dir).unwrap().flatten() {
        let lines = std::fs::read_to_string(entry.path()).unwrap().lines().count();
        println!("  {} ({lines} lines)", entry.file_name().to_string_lossy());
    }
}
