//! Span and timing helpers.

use tracing::{info_span, Span};

/// Span covering one reconciliation run.
pub fn run_span(artifact: &str) -> Span {
    info_span!("run", artifact = %artifact)
}

/// Span for a manifest fetch.
pub fn fetch_span(source: &str) -> Span {
    info_span!("fetch", source = %source)
}

/// Span for a file operation.
pub fn file_span(operation: &str, path: &str) -> Span {
    info_span!("file", op = %operation, path = %path)
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) -> std::time::Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
        duration
    }
}

/// Macro for timing a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Instrument;

    #[test]
    fn test_timer_measures() {
        let timer = Timer::start("unit");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timer.finish() >= std::time::Duration::from_millis(2));
    }

    #[test]
    fn test_timed_macro_returns_body_value() {
        let value = crate::timed!("sum", 2 + 3);
        assert_eq!(value, 5);
    }

    #[tokio::test]
    async fn test_spans_instrument_futures() {
        let out = async { 7 }.instrument(fetch_span("file:manifest.json")).await;
        assert_eq!(out, 7);
        let _run = run_span("pack_formats.rs").entered();
        let _file = file_span("write", "pack_formats.rs").entered();
    }
}
