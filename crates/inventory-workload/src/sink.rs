//! The chart rendering capability.

use std::path::Path;
use thiserror::Error;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Errors raised while rendering a chart. Never fatal to a simulation.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Writing the artifact failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Labels and values do not describe a drawable series.
    #[error("Invalid series: {0}")]
    InvalidSeries(String),
}

/// Renders labeled numeric series to image artifacts.
///
/// `destination` is a file name; sinks resolve it against their own output
/// location.
pub trait ChartSink: Send + Sync {
    fn render_series(
        &self,
        title: &str,
        labels: &[&str],
        values: &[f64],
        destination: &Path,
    ) -> Result<(), ChartError>;
}

/// Call `sink.render_series` without stalling the async workers.
///
/// On a multi-threaded runtime the call runs under `block_in_place`; on a
/// current-thread runtime, or outside any runtime, it runs inline.
pub fn render_blocking(
    sink: &dyn ChartSink,
    title: &str,
    labels: &[&str],
    values: &[f64],
    destination: &Path,
) -> Result<(), ChartError> {
    let render = || sink.render_series(title, labels, values, destination);
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(render)
        }
        _ => render(),
    }
}

/// Sink that discards every chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChartSink;

impl ChartSink for NoopChartSink {
    fn render_series(
        &self,
        _title: &str,
        _labels: &[&str],
        _values: &[f64],
        _destination: &Path,
    ) -> Result<(), ChartError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSink {
        calls: AtomicUsize,
    }

    impl ChartSink for CountingSink {
        fn render_series(
            &self,
            _title: &str,
            labels: &[&str],
            values: &[f64],
            _destination: &Path,
        ) -> Result<(), ChartError> {
            if labels.len() != values.len() {
                return Err(ChartError::InvalidSeries("length mismatch".to_string()));
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_render_blocking_outside_runtime() {
        let sink = CountingSink::default();

        render_blocking(&sink, "t", &["a"], &[1.0], Path::new("a.svg")).unwrap();

        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_render_blocking_on_current_thread_runtime() {
        let sink = CountingSink::default();

        render_blocking(&sink, "t", &["a"], &[1.0], Path::new("a.svg")).unwrap();

        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_render_blocking_on_multi_thread_runtime() {
        let sink = CountingSink::default();

        render_blocking(&sink, "t", &["a"], &[1.0], Path::new("a.svg")).unwrap();
        let err = render_blocking(&sink, "t", &["a", "b"], &[1.0], Path::new("b.svg"));

        assert!(matches!(err, Err(ChartError::InvalidSeries(_))));
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }
}
