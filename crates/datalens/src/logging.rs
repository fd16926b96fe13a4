//! Injectable logging capability.
//!
//! The coordinator never writes to a global sink directly; it reports through
//! an [`AnalysisLogger`] handed to it at construction. [`TracingLogger`]
//! forwards to `tracing`, [`NullLogger`] discards everything.

use std::any::Any;
use std::panic;
use std::sync::Arc;

use tracing::Level;

/// A sink for pipeline log events.
pub trait AnalysisLogger: Send + Sync {
    /// Record a message emitted while the pipeline was in `stage`.
    fn log(&self, level: Level, stage: &str, message: &str);

    /// Record a debug message.
    fn debug(&self, stage: &str, message: &str) {
        self.log(Level::DEBUG, stage, message);
    }

    /// Record an informational message.
    fn info(&self, stage: &str, message: &str) {
        self.log(Level::INFO, stage, message);
    }

    /// Record a warning.
    fn warn(&self, stage: &str, message: &str) {
        self.log(Level::WARN, stage, message);
    }

    /// Record an error.
    fn error(&self, stage: &str, message: &str) {
        self.log(Level::ERROR, stage, message);
    }
}

/// Forwards log events to the `tracing` macros under the `datalens` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl AnalysisLogger for TracingLogger {
    fn log(&self, level: Level, stage: &str, message: &str) {
        if level == Level::ERROR {
            tracing::error!(target: "datalens", stage = stage, "{}", message);
        } else if level == Level::WARN {
            tracing::warn!(target: "datalens", stage = stage, "{}", message);
        } else if level == Level::INFO {
            tracing::info!(target: "datalens", stage = stage, "{}", message);
        } else if level == Level::DEBUG {
            tracing::debug!(target: "datalens", stage = stage, "{}", message);
        } else {
            tracing::trace!(target: "datalens", stage = stage, "{}", message);
        }
    }
}

/// Discards all log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl AnalysisLogger for NullLogger {
    fn log(&self, _level: Level, _stage: &str, _message: &str) {}
}

/// Replace the process panic hook with one that reports through `logger`.
///
/// `AnalysisCoordinator::analyze` recovers from panics, but the default hook
/// still prints to stderr before the unwind is caught. Binaries call this once
/// at startup so those messages reach the same sink as every other event.
pub fn route_panics_to(logger: Arc<dyn AnalysisLogger>) {
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!(" at {}:{}", l.file(), l.line()))
            .unwrap_or_default();
        logger.error(
            "panic",
            &format!("{}{}", panic_message(info.payload()), location),
        );
    }));
}

/// Extract the text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(Level, String, String)>>,
    }

    impl AnalysisLogger for Recorder {
        fn log(&self, level: Level, stage: &str, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((level, stage.to_string(), message.to_string()));
        }
    }

    #[test]
    fn test_default_methods_route_levels() {
        let recorder = Recorder::default();
        recorder.info("normalizing", "start");
        recorder.warn("analyzing", "sparse");
        recorder.error("error", "boom");

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].0, Level::INFO);
        assert_eq!(events[1].1, "analyzing");
        assert_eq!(events[2].0, Level::ERROR);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[test]
    fn test_panics_routed_to_logger() {
        let recorder = Arc::new(Recorder::default());
        route_panics_to(recorder.clone());

        let outcome = panic::catch_unwind(|| -> u8 { panic!("hooked failure") });
        let _ = panic::take_hook();

        assert!(outcome.is_err());
        let events = recorder.events.lock().unwrap();
        assert!(events.iter().any(|(level, stage, message)| {
            *level == Level::ERROR
                && stage == "panic"
                && message.starts_with("hooked failure at ")
                && message.contains("logging.rs")
        }));
    }

    #[test]
    fn test_builtin_loggers_accept_all_levels() {
        for level in [Level::TRACE, Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR] {
            TracingLogger.log(level, "validating", "message");
            NullLogger.log(level, "validating", "message");
        }
    }
}
