//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use booksearch_core::{LanguageCode, MAX_PAGE_SIZE, SortOrder};

/// File configuration for booksearch defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Default result ordering.
    pub sort_order: Option<SortOrder>,
    /// Default results per page (1..=40).
    pub page_size: Option<u8>,
    /// Default language restriction.
    pub language: Option<LanguageCode>,
    /// Catalog connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Catalog request timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Alternative catalog endpoint (mirrors, testing).
    pub base_url: Option<String>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(page_size) = self.page_size
            && !(1..=MAX_PAGE_SIZE).contains(&page_size)
        {
            bail!("Invalid config value for `page_size`: {page_size}. Expected range: 1..={MAX_PAGE_SIZE}");
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url)
                .with_context(|| format!("Invalid config value for `base_url`: '{base_url}'"))?;
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Log filter directive for this setting.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/booksearch/config.toml`
/// 2. `$HOME/.config/booksearch/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("booksearch")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("booksearch")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_number}");

        match key {
            "sort_order" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                let order = parsed
                    .parse::<SortOrder>()
                    .map_err(|reason| anyhow::anyhow!(reason))
                    .with_context(invalid)?;
                cfg.sort_order = Some(order);
            }
            "page_size" => {
                let parsed = parse_integer_u64(value).with_context(invalid)?;
                let page_size = u8::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("page_size out of range for u8"))
                    .with_context(invalid)?;
                cfg.page_size = Some(page_size);
            }
            "language" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.language = Some(LanguageCode::new(&parsed).with_context(invalid)?);
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "base_url" => {
                cfg.base_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(invalid)?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        other => bail!("Unknown verbosity '{other}' (expected default, verbose, quiet or debug)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config_all_keys() {
        let cfg = parse_config_str(
            r#"
            # booksearch defaults
            sort_order = "newest"
            page_size = 15   # per page
            language = "PT"
            connect_timeout_secs = 5
            read_timeout_secs = 20
            base_url = "http://127.0.0.1:8080/volumes#frag"
            verbosity = "quiet"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.sort_order, Some(SortOrder::Newest));
        assert_eq!(cfg.page_size, Some(15));
        assert_eq!(cfg.language.unwrap().as_str(), "pt");
        assert_eq!(cfg.connect_timeout_secs, Some(5));
        assert_eq!(cfg.read_timeout_secs, Some(20));
        assert_eq!(cfg.base_url.as_deref(), Some("http://127.0.0.1:8080/volumes#frag"));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Quiet));
    }

    #[test]
    fn test_parse_config_rejects_unknown_key_with_line_number() {
        let err = parse_config_str("page_size = 10\ncolour = \"red\"\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("colour"), "unexpected message: {msg}");
        assert!(msg.contains("line 2"), "unexpected message: {msg}");
    }

    #[test]
    fn test_parse_config_rejects_out_of_range_page_size() {
        let err = parse_config_str("page_size = 41").unwrap_err();
        assert!(err.to_string().contains("page_size"), "unexpected message: {err}");
        assert!(parse_config_str("page_size = 0").is_err());
        assert!(parse_config_str("page_size = 300").is_err());
    }

    #[test]
    fn test_parse_config_rejects_bad_values() {
        assert!(parse_config_str("sort_order = \"oldest\"").is_err());
        assert!(parse_config_str("sort_order = newest").is_err(), "strings must be quoted");
        assert!(parse_config_str("language = \"english\"").is_err());
        assert!(parse_config_str("read_timeout_secs = 0").is_err());
        assert!(parse_config_str("connect_timeout_secs = -3").is_err());
        assert!(parse_config_str("base_url = \"not a url\"").is_err());
        assert!(parse_config_str("verbosity = \"loud\"").is_err());
        assert!(parse_config_str("just some words").is_err());
    }

    #[test]
    fn test_load_file_config_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "page_size = 12\n").unwrap();

        let cfg = load_file_config(&path).unwrap();
        assert_eq!(cfg.page_size, Some(12));
    }

    #[test]
    fn test_load_file_config_missing_file_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        let err = load_file_config(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"), "unexpected message: {err}");
    }
}
