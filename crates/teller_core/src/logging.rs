//! Logging bootstrap for the teller process.
//!
//! # Responsibility
//! - Start the file-backed rolling logger exactly once per process.
//! - Capture panics as structured error events.
//!
//! # Invariants
//! - Re-initialization with the same configuration is a no-op.
//! - Conflicting re-initialization is rejected, never applied.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "teller";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 3;
const PANIC_SUMMARY_MAX_CHARS: usize = 120;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts file logging at `level` under `dir`, creating the directory if
/// needed.
///
/// # Errors
/// - Unsupported `level`.
/// - `dir` cannot be created or the logger backend fails to start.
/// - Logging was already initialized with a different level or directory.
pub fn init_logging(level: &str, dir: &Path) -> Result<(), String> {
    let level = canonical_level(level)?;
    let dir = dir.to_path_buf();

    if let Some(active) = ACTIVE.get() {
        return check_matches(active, level, &dir);
    }

    let init_dir = dir.clone();
    let active = ACTIVE.get_or_try_init(|| -> Result<ActiveLogger, String> {
        std::fs::create_dir_all(&init_dir)
            .map_err(|err| format!("cannot create log directory `{}`: {err}", init_dir.display()))?;

        let handle = Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_file(
                FileSpec::default()
                    .directory(init_dir.as_path())
                    .basename(LOG_BASENAME),
            )
            .rotate(
                Criterion::Size(ROTATE_AT_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEEP_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("cannot start logger: {err}"))?;

        install_panic_hook();

        info!(
            "event=logging_started module=core status=ok level={level} dir={} version={}",
            init_dir.display(),
            env!("CARGO_PKG_VERSION")
        );

        Ok(ActiveLogger {
            level,
            dir: init_dir,
            _handle: handle,
        })
    })?;

    // A racing init may have won with a different configuration.
    check_matches(active, level, &dir)
}

/// Default level per build mode: `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn check_matches(active: &ActiveLogger, level: &'static str, dir: &Path) -> Result<(), String> {
    if active.dir != dir {
        return Err(format!(
            "logging already active at `{}`; refusing to switch to `{}`",
            active.dir.display(),
            dir.display()
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already active at level `{}`; refusing to switch to `{level}`",
            active.level
        ));
    }
    Ok(())
}

fn canonical_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic module=core status=error location={location} payload={}",
            panic_summary(panic_info)
        );
        previous(panic_info);
    }));
}

// Panic payloads can carry user-typed text; flatten newlines and cap length
// before they reach the log file.
fn panic_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    let flat = payload.replace(['\n', '\r'], " ");
    let mut summary: String = flat.chars().take(PANIC_SUMMARY_MAX_CHARS).collect();
    if flat.chars().count() > PANIC_SUMMARY_MAX_CHARS {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::{canonical_level, init_logging};

    #[test]
    fn canonical_level_normalizes_and_rejects() {
        assert_eq!(canonical_level("INFO").unwrap(), "info");
        assert_eq!(canonical_level(" Warning ").unwrap(), "warn");
        let err = canonical_level("chatty").unwrap_err();
        assert!(err.contains("unsupported log level"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let other = tempfile::tempdir().expect("temp dir");

        init_logging("info", dir.path()).expect("first init should succeed");
        init_logging("info", dir.path()).expect("same config should be a no-op");

        let level_err = init_logging("debug", dir.path()).expect_err("level conflict");
        assert!(level_err.contains("refusing to switch"));

        let dir_err = init_logging("info", other.path()).expect_err("dir conflict");
        assert!(dir_err.contains("refusing to switch"));
    }
}
