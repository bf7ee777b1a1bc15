//! Integration harness binary.
//!
//! Runs the three fixed scenarios against the composer and exits 0 when all
//! complete, 1 on any error. Takes no command-line arguments. Diagnostics go
//! to stdout; tracing goes to stderr and optionally a rolling log file.

use std::path::PathBuf;

use env_flags::env_flags;
use once_cell::sync::OnceCell;

use prompt_composer::config::{UserConfig, composer_home, load_user_config, resolve_settings};
use prompt_composer::harness;

static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Log output style for the stderr and file layers.
enum LogFormat {
    Json,
    Compact,
    Pretty,
    Full,
}

fn init_tracing(home: &std::path::Path, user_cfg: Option<&UserConfig>) {
    env_flags! {
        /// Tracing filter, e.g. "info", "debug", or targets format.
        RUST_LOG: &str = "info";
        /// Preferred filter env (alias). If set, overrides RUST_LOG.
        TRACING_FILTER: &str = "";
        /// Pretty formatting for logs (ignored if TRACING_JSON=true).
        TRACING_PRETTY: bool = false;
        /// Compact single-line formatting for logs (ignored if TRACING_JSON=true)
        TRACING_COMPACT: bool = true;
        /// JSON formatting for logs
        TRACING_JSON: bool = false;
        /// If true, also log to file under <PROMPT_COMPOSER_HOME>/logs or LOG_DIR
        LOG_TO_FILE: bool = false;
        /// Optional explicit log directory (absolute). Defaults to <PROMPT_COMPOSER_HOME>/logs
        LOG_DIR: &str = "";
    }

    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, prelude::*};

    let env_set = |k: &str| std::env::var_os(k).is_some();
    let logging_cfg = user_cfg.and_then(|c| c.logging.as_ref());

    let mut rust_log = if !(*TRACING_FILTER).is_empty() {
        (*TRACING_FILTER).to_string()
    } else {
        (*RUST_LOG).to_string()
    };
    if !(env_set("TRACING_FILTER") || env_set("RUST_LOG"))
        && let Some(level) = logging_cfg.and_then(|c| c.level.as_ref())
    {
        rust_log = level.clone();
    }

    let pick = |env_key: &str, env_val: bool, file_val: Option<bool>| {
        if env_set(env_key) {
            env_val
        } else {
            file_val.unwrap_or(env_val)
        }
    };
    let json = pick("TRACING_JSON", *TRACING_JSON, logging_cfg.and_then(|c| c.json));
    let compact = pick(
        "TRACING_COMPACT",
        *TRACING_COMPACT,
        logging_cfg.and_then(|c| c.compact),
    );
    let pretty = pick(
        "TRACING_PRETTY",
        *TRACING_PRETTY,
        logging_cfg.and_then(|c| c.pretty),
    );
    let log_to_file = pick(
        "LOG_TO_FILE",
        *LOG_TO_FILE,
        logging_cfg.and_then(|c| c.to_file),
    );
    let log_dir: Option<PathBuf> = if !(*LOG_DIR).is_empty() {
        Some(PathBuf::from((*LOG_DIR).to_string()))
    } else {
        logging_cfg
            .and_then(|c| c.dir.as_ref())
            .map(|d| prompt_composer::config::expand_home(d))
    };

    let format = if json {
        LogFormat::Json
    } else if compact {
        LogFormat::Compact
    } else if pretty {
        LogFormat::Pretty
    } else {
        LogFormat::Full
    };

    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new("info"));

    // Harness diagnostics own stdout; all tracing goes to stderr.
    let file_writer = if log_to_file {
        let dir = log_dir.unwrap_or_else(|| home.join("logs"));
        match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, "compose-check.log");
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                Some(nb)
            }
            Err(e) => {
                eprintln!("warning: failed to create log dir: {e}");
                None
            }
        }
    } else {
        None
    };

    let reg = tracing_subscriber::registry().with(filter);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);
    // Built per match arm: each arm's subscriber stack has a distinct type,
    // so a single `let` binding cannot be reused across arms.
    macro_rules! file_layer {
        () => {
            file_writer.clone().map(|nb| {
                tracing_subscriber::fmt::layer()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(nb)
            })
        };
    }

    let init_result = match format {
        LogFormat::Json => reg
            .with(stderr_layer.json())
            .with(file_layer!().map(|l| l.json()))
            .try_init(),
        LogFormat::Compact => reg
            .with(stderr_layer.compact())
            .with(file_layer!().map(|l| l.compact()))
            .try_init(),
        LogFormat::Pretty => reg
            .with(stderr_layer.pretty())
            .with(file_layer!().map(|l| l.pretty()))
            .try_init(),
        LogFormat::Full => reg.with(stderr_layer).with(file_layer!()).try_init(),
    };
    if let Err(e) = init_result {
        tracing::debug!("tracing already set: {:?}", e);
    }
}

fn main() {
    let home = composer_home();
    let user_cfg = match load_user_config(&home) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("warning: ignoring unreadable config: {e:#}");
            None
        }
    };
    init_tracing(&home, user_cfg.as_ref());

    let settings = resolve_settings(user_cfg.as_ref());
    tracing::info!(
        "starting compose-check (home={}, progress_call_threshold={})",
        home.display(),
        settings.progress_call_threshold
    );

    if let Err(e) = harness::run_all(&settings) {
        println!("❌ Test failed: {e:#}");
        std::process::exit(1);
    }
}
