use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP settings for image fetches (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds. Unset means libcurl's default (no overall limit).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-transfer timeout in seconds. Unset means a fetch may block indefinitely.
    pub timeout_secs: Option<u64>,
    /// `User-Agent` header sent with each fetch.
    pub user_agent: Option<String>,
    /// Treat a non-2xx image response as fatal instead of saving its body.
    pub fail_on_http_error: bool,
}

/// Export configuration loaded from `~/.config/s2w/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Rewrite each `<img src>` in emitted content to its downloaded local path.
    pub relink_images: bool,
    /// Base URL used for each item's `<link>` (`<site_url>/posts/<post_id>`).
    pub site_url: String,
    /// Offset of the publishing timezone from UTC, in minutes (540 = UTC+9).
    pub target_offset_minutes: i32,
    pub http: HttpConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            relink_images: false,
            site_url: "https://example.com".to_string(),
            target_offset_minutes: 9 * 60,
            http: HttpConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Checks values serde cannot: offset range and site URL syntax.
    pub fn validate(&self) -> Result<()> {
        const MINUTES_PER_DAY: i32 = 24 * 60;
        if self.target_offset_minutes <= -MINUTES_PER_DAY
            || self.target_offset_minutes >= MINUTES_PER_DAY
        {
            anyhow::bail!(
                "target_offset_minutes must be within ±24h, got {}",
                self.target_offset_minutes
            );
        }
        url::Url::parse(&self.site_url)
            .with_context(|| format!("invalid site_url: {}", self.site_url))?;
        Ok(())
    }

    /// `<site_url>/posts/<post_id>`, without doubling a trailing slash.
    pub fn post_link(&self, post_id: &str) -> String {
        format!("{}/posts/{}", self.site_url.trim_end_matches('/'), post_id)
    }
}

/// Path of the user config file, if one exists under the XDG config dirs.
pub fn default_config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("s2w")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the XDG config file is used when
/// present and built-in defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<ExportConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path()? {
            Some(p) => p,
            None => {
                tracing::debug!("no config file found, using defaults");
                return Ok(ExportConfig::default());
            }
        },
    };
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<ExportConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: ExportConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = ExportConfig::default();
        assert!(!cfg.relink_images);
        assert_eq!(cfg.site_url, "https://example.com");
        assert_eq!(cfg.target_offset_minutes, 540);
        assert_eq!(cfg.http, HttpConfig::default());
        assert!(!cfg.http.fail_on_http_error);
        cfg.validate().unwrap();
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ExportConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ExportConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let cfg: ExportConfig = toml::from_str("relink_images = true").unwrap();
        assert!(cfg.relink_images);
        assert_eq!(cfg.site_url, "https://example.com");
        assert_eq!(cfg.target_offset_minutes, 540);
    }

    #[test]
    fn config_toml_http_section() {
        let toml = r#"
            site_url = "https://blog.example.org/"
            target_offset_minutes = -300

            [http]
            connect_timeout_secs = 10
            timeout_secs = 120
            user_agent = "s2w-test"
            fail_on_http_error = true
        "#;
        let cfg: ExportConfig = toml::from_str(toml).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.target_offset_minutes, -300);
        assert_eq!(cfg.http.connect_timeout_secs, Some(10));
        assert_eq!(cfg.http.timeout_secs, Some(120));
        assert_eq!(cfg.http.user_agent.as_deref(), Some("s2w-test"));
        assert!(cfg.http.fail_on_http_error);
        assert_eq!(
            cfg.post_link("abc123"),
            "https://blog.example.org/posts/abc123"
        );
    }

    #[test]
    fn validate_rejects_out_of_range_offset() {
        let cfg = ExportConfig {
            target_offset_minutes: 24 * 60,
            ..ExportConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_site_url() {
        let cfg = ExportConfig {
            site_url: "not a url".to_string(),
            ..ExportConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"relink_images = true\n").unwrap();
        f.flush().unwrap();
        let cfg = load(Some(f.path())).unwrap();
        assert!(cfg.relink_images);
    }

    #[test]
    fn load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
