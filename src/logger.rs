//! Logging setup. In the browser records go to the devtools console;
//! native builds and tests use `env_logger`.

use log::{LevelFilter, Record};

/// `[LEVEL target] message`
pub fn format_record(record: &Record) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};

    pub struct ConsoleLogger {
        level: LevelFilter,
    }

    impl ConsoleLogger {
        pub const fn new(level: LevelFilter) -> Self {
            Self { level }
        }
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= self.level
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = super::format_record(record);
            match record.level() {
                Level::Error => web_sys::console::error_1(&line.into()),
                Level::Warn => web_sys::console::warn_1(&line.into()),
                Level::Info => web_sys::console::info_1(&line.into()),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line.into()),
            }
        }

        fn flush(&self) {}
    }

    pub static LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Trace);
}

#[cfg(target_arch = "wasm32")]
pub use console::ConsoleLogger;

/// Install the logger. Later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    if log::set_logger(&console::LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Install the logger. `RUST_LOG` overrides `level`. Later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "{}", format_record(record))
        })
        .try_init();
}
