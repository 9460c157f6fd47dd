use crate::ui::{self, StatusKind};

/// Severity of a reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Plain,
    Info,
    Success,
    Warn,
}

/// Sink for the user-facing output of a command.
pub trait Reporter {
    fn report(&self, level: Level, label: &str, message: &str);

    fn plain(&self, message: &str) {
        self.report(Level::Plain, "", message);
    }

    fn info(&self, message: &str) {
        self.report(Level::Info, "Info", message);
    }

    fn success(&self, label: &str, message: &str) {
        self.report(Level::Success, label, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, "Warning", message);
    }
}

/// Writes reports to the terminal with coloured status labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, level: Level, label: &str, message: &str) {
        let kind = match level {
            Level::Plain => StatusKind::Plain,
            Level::Info => StatusKind::Info,
            Level::Success => StatusKind::Success,
            Level::Warn => StatusKind::Warn,
        };
        ui::write_status(kind, label, message);
    }
}
