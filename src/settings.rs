//! Settings infrastructure for flatpos.
//!
//! This module provides support for loading and parsing settings.toml files
//! to configure translator behavior and highlight rules.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::highlight::{HighlightRule, Highlighter};
use crate::translate::TranslateOptions;

/// File name searched for by [`discover_settings`].
pub const SETTINGS_FILE: &str = "settings.toml";

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Translator query options.
    #[serde(default)]
    pub translator: TranslateOptions,

    /// Highlight configuration.
    pub highlight: Option<HighlightSettings>,
}

/// Highlight rules, applied in order.
#[derive(Debug, Default, Deserialize)]
pub struct HighlightSettings {
    #[serde(default)]
    pub rules: Vec<RuleSettings>,
}

/// A single named regex rule.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSettings {
    pub name: String,
    pub pattern: String,
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid pattern for highlight rule '{rule}'")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}

impl Settings {
    /// Parse settings from TOML source.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn translate_options(&self) -> TranslateOptions {
        self.translator
    }

    fn rules(&self) -> &[RuleSettings] {
        self.highlight
            .as_ref()
            .map(|h| h.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Compile highlight rules, failing on the first invalid pattern.
    pub fn try_highlighter(&self) -> Result<Highlighter, SettingsError> {
        let rules = self
            .rules()
            .iter()
            .map(|rule| {
                HighlightRule::new(rule.name.clone(), &rule.pattern).map_err(|source| {
                    SettingsError::Pattern {
                        rule: rule.name.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Highlighter::new(rules))
    }

    /// Compile highlight rules, skipping invalid patterns with a warning.
    pub fn highlighter(&self) -> Highlighter {
        let mut rules = Vec::new();
        for rule in self.rules() {
            match HighlightRule::new(rule.name.clone(), &rule.pattern) {
                Ok(compiled) => rules.push(compiled),
                Err(e) => {
                    warn!(rule = %rule.name, error = %e, "skipping highlight rule with invalid pattern");
                }
            }
        }
        Highlighter::new(rules)
    }
}

/// Load settings from a settings.toml file, reporting failures.
pub fn try_load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Settings::from_toml(&content, path)
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match try_load_settings(path) {
        Ok(settings) => settings,
        Err(SettingsError::Io { .. }) => Settings::default(),
        Err(e) => {
            warn!(error = %e, "using default settings");
            Settings::default()
        }
    }
}

/// Discover settings.toml by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found settings.toml.
/// If not found, returns `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    // Phase 1: Walk up from start_dir
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    // Phase 2: Check immediate child directories
    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join(SETTINGS_FILE);
                if candidate.is_file() {
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Settings {
        Settings::from_toml(content, Path::new("settings.toml")).unwrap()
    }

    #[test]
    fn empty_settings_use_defaults() {
        let settings = parse("");
        assert!(settings.translate_options().reset_to_start);
        assert!(settings.highlighter().is_empty());
    }

    #[test]
    fn translator_and_rules() {
        let settings = parse(
            r#"
            [translator]
            reset_to_start = false

            [[highlight.rules]]
            name = "keyword"
            pattern = '\b(fn|let)\b'

            [[highlight.rules]]
            name = "number"
            pattern = '\d+'
            "#,
        );

        assert_eq!(settings.translate_options(), TranslateOptions::RESUME);
        let highlighter = settings.try_highlighter().unwrap();
        let names: Vec<&str> = highlighter.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["keyword", "number"]);
    }

    #[test]
    fn invalid_pattern() {
        let settings = parse(
            r#"
            [[highlight.rules]]
            name = "broken"
            pattern = "("

            [[highlight.rules]]
            name = "ok"
            pattern = "x"
            "#,
        );

        let err = settings.try_highlighter().unwrap_err();
        assert!(matches!(err, SettingsError::Pattern { ref rule, .. } if rule == "broken"));
        assert_eq!(settings.highlighter().rules().len(), 1);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Settings::from_toml("[translator", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn missing_file() {
        let path = Path::new("/nonexistent/settings.toml");
        assert!(matches!(
            try_load_settings(path),
            Err(SettingsError::Io { .. })
        ));
        assert!(load_settings(path).highlight.is_none());
    }
}
