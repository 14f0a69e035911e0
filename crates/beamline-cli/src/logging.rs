use crate::error::{CliError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    registry::LookupSpan,
};

/// Level shown on stderr for the given `-v` count; `-q` keeps errors only.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Level written to `--log-file`: never less detailed than debug.
pub fn file_level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    level_filter(verbosity, quiet).max(LevelFilter::DEBUG)
}

/// Plain-text layer for the log file. Closing a resolution, expansion or
/// loading span writes one line carrying its `sequence` (or `path`) field and timing.
fn file_layer<S>(file: File, filter: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter)
}

fn create_log_file(path: &Path) -> Result<File> {
    File::create(path).map_err(CliError::Io)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(level_filter(verbosity, quiet));

    let log_layer = log_file
        .as_deref()
        .map(create_log_file)
        .transpose()?
        .map(|file| file_layer(file, file_level_filter(verbosity, quiet)));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(log_layer)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, error, info, info_span, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_level_filters() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn log_file_keeps_at_least_debug_detail() {
        assert_eq!(file_level_filter(0, false), LevelFilter::DEBUG);
        assert_eq!(file_level_filter(0, true), LevelFilter::DEBUG);
        assert_eq!(file_level_filter(3, false), LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!("This is info");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    #[serial]
    fn file_layer_records_sequence_spans_below_the_console_level() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("run.log");

        let file = create_log_file(&log_path).unwrap();
        let subscriber =
            tracing_subscriber::registry().with(file_layer(file, file_level_filter(0, true)));

        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("expansion_task", sequence = "LINE");
            let _guard = span.enter();
            debug!(inserted = 2, "Sequence expansion complete.");
            trace!("Dropped by the file filter.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Sequence expansion complete."));
        assert!(content.contains("sequence=\"LINE\""));
        assert!(content.contains("close"));
        assert!(!content.contains("Dropped by the file filter."));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
