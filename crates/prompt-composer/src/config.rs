//! Layered configuration: env flags win over an optional `config.toml` under
//! the composer home, which wins over built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default tool-call count above which progress monitoring is injected.
pub const DEFAULT_PROGRESS_CALL_THRESHOLD: u32 = 5;

/// Resolved knobs consumed by the composer.
#[derive(Debug, Clone)]
pub struct ComposeSettings {
    pub progress_call_threshold: u32,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            progress_call_threshold: DEFAULT_PROGRESS_CALL_THRESHOLD,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    pub logging: Option<LoggingCfg>,
    pub compose: Option<ComposeCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComposeCfg {
    pub progress_call_threshold: Option<u32>,
}

/// Load `<home>/config.toml` if present.
pub fn load_user_config(home: &Path) -> anyhow::Result<Option<UserConfig>> {
    let path = home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path)?;
    let cfg: UserConfig = toml::from_str(&s)?;
    Ok(Some(cfg))
}

/// Composer home directory: `PROMPT_COMPOSER_HOME`, else `$HOME/.prompt-composer`,
/// else `.prompt-composer` under the current directory.
pub fn composer_home() -> PathBuf {
    if let Ok(dir) = std::env::var("PROMPT_COMPOSER_HOME")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".prompt-composer");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".prompt-composer")
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Resolve compose settings with env > file > default precedence.
pub fn resolve_settings(user_cfg: Option<&UserConfig>) -> ComposeSettings {
    use env_flags::env_flags;
    env_flags! {
        /// Tool-call count above which progress monitoring is injected.
        PROGRESS_CALL_THRESHOLD: u32 = 5;
    }
    let env_set = std::env::var_os("PROGRESS_CALL_THRESHOLD").is_some();
    let progress_call_threshold = if env_set {
        *PROGRESS_CALL_THRESHOLD
    } else {
        user_cfg
            .and_then(|c| c.compose.as_ref())
            .and_then(|c| c.progress_call_threshold)
            .unwrap_or(DEFAULT_PROGRESS_CALL_THRESHOLD)
    };
    ComposeSettings {
        progress_call_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn missing_config_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_user_config(dir.path()).expect("load ok");
        assert!(cfg.is_none());
    }

    #[test]
    fn config_file_parses_both_tables() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut f = std::fs::File::create(dir.path().join("config.toml")).expect("create");
        writeln!(
            f,
            "[logging]\nlevel = \"debug\"\njson = true\n\n[compose]\nprogress_call_threshold = 3"
        )
        .expect("write");
        let cfg = load_user_config(dir.path())
            .expect("load ok")
            .expect("config present");
        assert_eq!(
            cfg.logging.as_ref().and_then(|l| l.level.as_deref()),
            Some("debug")
        );
        assert_eq!(cfg.logging.as_ref().and_then(|l| l.json), Some(true));
        assert_eq!(
            cfg.compose.as_ref().and_then(|c| c.progress_call_threshold),
            Some(3)
        );
    }

    #[test]
    fn file_threshold_overrides_default() {
        let cfg = UserConfig {
            logging: None,
            compose: Some(ComposeCfg {
                progress_call_threshold: Some(2),
            }),
        };
        // Only meaningful when the env knob is unset, which is the normal case
        // for the test runner.
        if std::env::var_os("PROGRESS_CALL_THRESHOLD").is_none() {
            let settings = resolve_settings(Some(&cfg));
            assert_eq!(settings.progress_call_threshold, 2);
        }
    }

    #[test]
    fn defaults_apply_without_config() {
        if std::env::var_os("PROGRESS_CALL_THRESHOLD").is_none() {
            let settings = resolve_settings(None);
            assert_eq!(
                settings.progress_call_threshold,
                DEFAULT_PROGRESS_CALL_THRESHOLD
            );
        }
    }

    #[test]
    fn expand_home_handles_tilde_prefix() {
        let p = expand_home("/absolute/path");
        assert_eq!(p, PathBuf::from("/absolute/path"));
        if let Ok(home) = std::env::var("HOME") {
            let p = expand_home("~/x");
            assert_eq!(p, PathBuf::from(home).join("x"));
        }
    }
}
