use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.slack-pulse/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.slack-pulse/`
/// - `~/.slack-pulse/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let pulse_dir = home.join(".slack-pulse");
    std::fs::create_dir_all(&pulse_dir)?;
    std::fs::create_dir_all(pulse_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Attempt to locate the CSV data directory relative to the working
/// directory.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./info/`
/// 2. `./data/`
///
/// Returns `None` when neither path exists.
pub fn discover_data_path() -> Option<PathBuf> {
    let candidates = [PathBuf::from("info"), PathBuf::from("data")];
    candidates.into_iter().find(|p| p.is_dir())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let pulse_dir = tmp.path().join(".slack-pulse");
        assert!(pulse_dir.is_dir(), ".slack-pulse dir must exist");
        assert!(pulse_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    // ── test_discover_data_path ───────────────────────────────────────────────

    // Discovery depends on the process-wide working directory, so the empty
    // and populated cases share one test to avoid racing on chdir.
    #[test]
    fn test_discover_data_path() {
        let tmp = TempDir::new().expect("tempdir");
        let original = std::env::current_dir().expect("cwd");
        std::env::set_current_dir(tmp.path()).expect("chdir");

        let absent = discover_data_path();

        std::fs::create_dir_all(tmp.path().join("info")).unwrap();
        std::fs::create_dir_all(tmp.path().join("data")).unwrap();
        let present = discover_data_path();

        std::env::set_current_dir(original).expect("restore cwd");

        assert!(absent.is_none(), "no candidate dirs yet");
        assert_eq!(present, Some(PathBuf::from("info")), "info wins over data");
    }
}
