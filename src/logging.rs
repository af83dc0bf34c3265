use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use backtrace::Backtrace;
use env_logger::fmt::Color;
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::Lazy;

use crate::config;

// Shared ring buffer of recent log lines, dumped into panic.log on a crash.
static LOG_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::with_capacity(config::MAX_LOG_LINES))));

struct BufferLogger {
    log_buffer: Arc<Mutex<VecDeque<String>>>,
}

impl BufferLogger {
    fn new() -> Self {
        Self {
            log_buffer: Arc::clone(&LOG_BUFFER),
        }
    }

    fn log_to_buffer(&self, message: &str, target: &str) {
        if target.starts_with(config::APP_NAME) {
            let mut buffer = self.log_buffer.lock().unwrap();
            if buffer.len() == config::MAX_LOG_LINES {
                buffer.pop_front();
            }
            buffer.push_back(message.to_string());
        }
    }

    fn get_shared_buffer(&self) -> Arc<Mutex<VecDeque<String>>> {
        Arc::clone(&self.log_buffer)
    }
}

impl log::Log for BufferLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with(config::APP_NAME) && metadata.level() <= LevelFilter::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("{:<5} {}", record.level(), record.args());
            self.log_to_buffer(&message, record.target());
        }
    }

    fn flush(&self) {}
}

struct CompositeLogger {
    console_logger: env_logger::Logger,
    buffer_logger: BufferLogger,
}

impl log::Log for CompositeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console_logger.enabled(metadata) || self.buffer_logger.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.console_logger.enabled(record.metadata()) {
            self.console_logger.log(record);
        }
        if self.buffer_logger.enabled(record.metadata()) {
            self.buffer_logger.log(record);
        }
    }

    fn flush(&self) {
        self.console_logger.flush();
        self.buffer_logger.flush();
    }
}

pub fn setup_logger(app_name: &str) -> Arc<Mutex<VecDeque<String>>> {
    let buffer_logger = BufferLogger::new();
    let shared_buffer = buffer_logger.get_shared_buffer();

    let mut builder = env_logger::Builder::new();
    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else if cfg!(debug_assertions) {
        builder.filter(Some(app_name), LevelFilter::Debug);
    } else {
        builder.filter(Some(app_name), LevelFilter::Info);
    }

    builder.filter(None, LevelFilter::Off);

    builder.format(|buf, record| {
        let mut style = buf.style();
        match record.level() {
            Level::Error => style.set_color(Color::Red),
            Level::Warn => style.set_color(Color::Yellow),
            Level::Info => style.set_color(Color::Green),
            Level::Debug => style.set_color(Color::Blue),
            Level::Trace => style.set_color(Color::White),
        };
        writeln!(buf, "{:<5} {}", style.value(record.level()), record.args())
    });

    let console_logger = builder.build();

    let composite_logger = CompositeLogger {
        console_logger,
        buffer_logger,
    };

    log::set_boxed_logger(Box::new(composite_logger)).expect("Failed to set logger");
    log::set_max_level(LevelFilter::Trace);

    shared_buffer
}

pub fn get_log_directory(app_name: &str) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app_name)
        .join("logs")
}

pub fn setup_panic_hook(app_name: &str, log_buffer: Arc<Mutex<VecDeque<String>>>) {
    let log_file_path = get_log_directory(app_name).join("panic.log");
    std::fs::create_dir_all(log_file_path.parent().unwrap())
        .expect("Failed to create log directory");

    panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::new();
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ");
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_file_path)
            .expect("Failed to open panic log file");

        writeln!(file, "Panic at {}: {}", timestamp, info).expect("Failed to write panic info");
        writeln!(file, "Backtrace:\n{:?}\n", backtrace).expect("Failed to write backtrace");

        writeln!(file, "Last {} log entries:\n", config::MAX_LOG_LINES)
            .expect("Failed to write log header");

        let buffer = log_buffer.lock().unwrap();
        for log in buffer.iter() {
            writeln!(file, "{}", log).expect("Failed to write log entry");
        }
    }));
}
