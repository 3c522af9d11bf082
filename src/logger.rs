//! `log` sink for terminal UIs.
//!
//! Records are forwarded over a channel instead of being written to stderr,
//! which would corrupt the alternate screen. The UI drains the receiver and
//! shows the messages in its status bar.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

pub type ChannelData = (log::Level, String);

pub struct ChannelLogger {
    tx: Mutex<Sender<ChannelData>>,
    level: log::LevelFilter,
}

impl ChannelLogger {
    pub fn new(tx: Sender<ChannelData>, level: log::LevelFilter) -> Self {
        Self {
            tx: Mutex::new(tx),
            level,
        }
    }
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.target().starts_with(env!("CARGO_CRATE_NAME")) && metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(tx) = self.tx.lock() {
            tx.send((record.level(), format!("{}", record.args()))).ok();
        }
    }

    fn flush(&self) {}
}

/// Install a [`ChannelLogger`] as the global logger and return the receiving
/// end. A logger that is already installed is left in place.
pub fn init(level: log::LevelFilter) -> Receiver<ChannelData> {
    let (tx, rx) = mpsc::channel();
    log::set_max_level(level);
    log::set_boxed_logger(Box::new(ChannelLogger::new(tx, level))).unwrap_or_default();
    rx
}
