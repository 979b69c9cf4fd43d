//! Configuration loading and effective settings resolution.
//!
//! A config file is only read when `--config <file>` is passed; nothing is
//! discovered implicitly. TOML (`.toml`) and YAML (`.yaml|.yml`) are accepted.
//! Defaults:
//! - `output`: `human`
//! - `clean.fix_headings|convert_links|convert_images|normalize_names`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{MigrateError, Result};
use crate::models::CleanOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Detector report format.
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Cleaner section under `[clean]`.
pub struct CleanCfg {
    pub fix_headings: Option<bool>,
    pub convert_links: Option<bool>,
    pub convert_images: Option<bool>,
    pub normalize_names: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root of a config file.
pub struct MigrateConfig {
    pub output: Option<OutputMode>,
    pub clean: Option<CleanCfg>,
}

/// Cleaner flags as given on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CleanFlags {
    pub fix_headings: bool,
    pub convert_links: bool,
    pub convert_images: bool,
    pub normalize_names: bool,
    pub all: bool,
}

/// Load a config file, choosing the parser from the extension.
pub fn load_config(path: &Path) -> Result<MigrateConfig> {
    let s = fs::read_to_string(path).map_err(|e| MigrateError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str::<MigrateConfig>(&s).map_err(|e| e.to_string()),
        _ => toml::from_str::<MigrateConfig>(&s).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| MigrateError::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// Load the config file if one was given, else defaults.
pub fn load_optional(path: Option<&Path>) -> Result<MigrateConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(MigrateConfig::default()),
    }
}

/// Resolve cleaner passes. A flag on the command line switches its pass on;
/// otherwise the config value applies.
pub fn resolve_clean(flags: &CleanFlags, cfg: &MigrateConfig) -> CleanOptions {
    if flags.all {
        return CleanOptions::all();
    }
    let file = cfg.clean.clone().unwrap_or_default();
    let pick = |cli: bool, file: Option<bool>| cli || file.unwrap_or(false);
    CleanOptions {
        fix_headings: pick(flags.fix_headings, file.fix_headings),
        convert_links: pick(flags.convert_links, file.convert_links),
        convert_images: pick(flags.convert_images, file.convert_images),
        normalize_names: pick(flags.normalize_names, file.normalize_names),
    }
}

/// Resolve detector output mode.
pub fn resolve_output(cli: Option<OutputMode>, cfg: &MigrateConfig) -> OutputMode {
    cli.or(cfg.output).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_toml_and_resolve() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mdmigrate.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
[clean]
convert_links = true
fix_headings = false
    "#
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(resolve_output(None, &cfg), OutputMode::Json);
        let opts = resolve_clean(&CleanFlags::default(), &cfg);
        assert!(opts.convert_links);
        assert!(!opts.fix_headings);
        assert!(!opts.normalize_names);
    }

    #[test]
    fn test_load_yaml_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mdmigrate.yml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: json
clean:
  convert_images: true
            "#
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(resolve_output(Some(OutputMode::Human), &cfg), OutputMode::Human);
        let flags = CleanFlags {
            fix_headings: true,
            ..CleanFlags::default()
        };
        let opts = resolve_clean(&flags, &cfg);
        assert!(opts.fix_headings);
        assert!(opts.convert_images);
        assert!(!opts.convert_links);
    }

    #[test]
    fn test_defaults_without_config() {
        let cfg = load_optional(None).unwrap();
        assert_eq!(resolve_output(None, &cfg), OutputMode::Human);
        assert_eq!(resolve_clean(&CleanFlags::default(), &cfg), CleanOptions::default());
        let all = CleanFlags {
            all: true,
            ..CleanFlags::default()
        };
        assert_eq!(resolve_clean(&all, &cfg), CleanOptions::all());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "output = [").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, MigrateError::Config { .. }));
        assert!(err.is_usage());
    }
}
