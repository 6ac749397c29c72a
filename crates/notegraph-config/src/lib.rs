use notegraph_engine::{FrontmatterFormat, FrontmatterSyntax};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How frontmatter is read from note files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontmatterConfig {
    pub syntax: FrontmatterSyntax,
}

/// Layout of the JSON export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub indent: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            indent: FrontmatterFormat::DEFAULT_INDENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory, single file or glob pattern naming the notes to load.
    pub notes_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,
    #[serde(default)]
    pub frontmatter: FrontmatterConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn new(notes_path: impl Into<String>) -> Self {
        Self {
            notes_path: notes_path.into(),
            export_path: None,
            frontmatter: FrontmatterConfig::default(),
            export: ExportConfig::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.notes_path = Self::expand(&config.notes_path).unwrap_or(config.notes_path);
        config.export_path = config
            .export_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/notegraph");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand(value: &str) -> Option<String> {
        shellexpand::full(value)
            .ok()
            .map(|expanded| expanded.into_owned())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        Self::expand(&path.to_string_lossy()).map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/notegraph/config.toml"));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = toml::from_str(r#"notes_path = "/tmp/notes""#).unwrap();

        assert_eq!(config, Config::new("/tmp/notes"));
        assert_eq!(config.frontmatter.syntax, FrontmatterSyntax::Auto);
        assert_eq!(config.export.indent, 4);
    }

    #[test]
    fn test_full_config() {
        let config_content = r#"
notes_path = "/tmp/notes/**/*.md"
export_path = "/tmp/export.json"

[frontmatter]
syntax = "yaml"

[export]
indent = 2
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.notes_path, "/tmp/notes/**/*.md");
        assert_eq!(config.export_path, Some(PathBuf::from("/tmp/export.json")));
        assert_eq!(config.frontmatter.syntax, FrontmatterSyntax::Yaml);
        assert_eq!(config.export, ExportConfig { indent: 2 });
    }

    #[test]
    fn test_empty_export_section_uses_default_indent() {
        let config_content = r#"
notes_path = "/tmp/notes"

[export]
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.export.indent, FrontmatterFormat::DEFAULT_INDENT);
    }

    #[test]
    fn test_unknown_export_key_is_ignored() {
        let config: Config =
            toml::from_str("notes_path = \"/n\"\n[export]\nindent = 8\nformat = \"yaml\"\n")
                .unwrap();

        assert_eq!(config.export.indent, 8);
    }

    #[test]
    fn test_unknown_syntax_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "notes_path = \"/n\"\n[frontmatter]\nsyntax = \"xml\"\n",
        )
        .unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_expand_with_tilde() {
        let expanded = Config::expand("~/test/path").unwrap();

        assert!(!expanded.starts_with('~'));
        assert!(expanded.contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("NOTEGRAPH_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$NOTEGRAPH_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("NOTEGRAPH_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_keeps_glob_pattern() {
        assert_eq!(
            Config::expand("/notes/**/*.md").as_deref(),
            Some("/notes/**/*.md")
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            export_path: Some(PathBuf::from("/tmp/out.json")),
            export: ExportConfig { indent: 2 },
            ..Config::new("/tmp/test-notes")
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        unsafe {
            env::set_var("NOTEGRAPH_NOTES_ROOT", "/custom/notes");
        }
        std::fs::write(
            &config_file,
            "notes_path = \"$NOTEGRAPH_NOTES_ROOT/my-notes\"\nexport_path = \"$NOTEGRAPH_NOTES_ROOT/out.json\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.notes_path, "/custom/notes/my-notes");
        assert_eq!(
            config.export_path,
            Some(PathBuf::from("/custom/notes/out.json"))
        );

        unsafe {
            env::remove_var("NOTEGRAPH_NOTES_ROOT");
        }
    }
}
