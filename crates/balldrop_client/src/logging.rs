//! BevyLogPrinter: мост simulation logger → bevy::log (tracing)
//!
//! Timestamp уже добавлен simulation logger'ом.

use bevy::prelude::*;
use balldrop_simulation::{LogLevel, LogPrinter};

pub struct BevyLogPrinter;

impl LogPrinter for BevyLogPrinter {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Warning => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
    }
}
