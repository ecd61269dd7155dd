use crate::error::{Error, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration, loadable from `gocards.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub template: TemplateConfig,
}

/// Source tree settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory of Go source files
    pub directory: Option<PathBuf>,
    /// Glob patterns excluded from parsing, in addition to the built-in
    /// `_test` filename rule
    pub exclude: Vec<String>,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory; a temporary directory is created when absent
    pub directory: Option<PathBuf>,
    /// Prefix for output file names
    pub prefix: String,
}

/// Template settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Custom card template file; replaces the built-in default
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        src: Option<PathBuf>,
        out: Option<PathBuf>,
        prefix: Option<String>,
        template: Option<PathBuf>,
        exclude: Vec<String>,
    ) {
        if let Some(dir) = src {
            self.source.directory = Some(dir);
        }

        if let Some(dir) = out {
            self.output.directory = Some(dir);
        }

        if let Some(p) = prefix {
            self.output.prefix = p;
        }

        if let Some(t) = template {
            self.template.path = Some(t);
        }

        if !exclude.is_empty() {
            self.source.exclude.extend(exclude);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.prefix.contains('/') || self.output.prefix.contains(std::path::MAIN_SEPARATOR) {
            return Err(Error::config_validation(
                "prefix must not contain a path separator",
            ));
        }

        Ok(())
    }

    /// Compile the exclude patterns
    pub fn compiled_excludes(&self) -> Result<Vec<Pattern>> {
        self.source
            .exclude
            .iter()
            .map(|p| Pattern::new(p).map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.source.directory.is_none());
        assert!(config.source.exclude.is_empty());
        assert!(config.output.directory.is_none());
        assert_eq!(config.output.prefix, "");
        assert!(config.template.path.is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[source]
directory = "go/src"
exclude = ["*_gen.go"]

[output]
directory = "cards"
prefix = "go-"

[template]
path = "custom.tmpl"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.source.directory, Some(PathBuf::from("go/src")));
        assert_eq!(config.source.exclude, vec!["*_gen.go".to_string()]);
        assert_eq!(config.output.directory, Some(PathBuf::from("cards")));
        assert_eq!(config.output.prefix, "go-");
        assert_eq!(config.template.path, Some(PathBuf::from("custom.tmpl")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/gocards.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/gocards.toml"));
        assert!(config.source.directory.is_none());
    }

    #[test]
    fn test_merge_cli_takes_precedence() {
        let mut config = Config::default();
        config.output.prefix = "from-config-".to_string();
        config.source.directory = Some(PathBuf::from("config/src"));

        config.merge_cli(
            Some(PathBuf::from("cli/src")),
            Some(PathBuf::from("cli/out")),
            Some("cli-".to_string()),
            Some(PathBuf::from("cli.tmpl")),
            vec!["vendor*".to_string()],
        );

        assert_eq!(config.source.directory, Some(PathBuf::from("cli/src")));
        assert_eq!(config.output.directory, Some(PathBuf::from("cli/out")));
        assert_eq!(config.output.prefix, "cli-");
        assert_eq!(config.template.path, Some(PathBuf::from("cli.tmpl")));
        assert_eq!(config.source.exclude, vec!["vendor*".to_string()]);
    }

    #[test]
    fn test_merge_cli_keeps_config_values() {
        let mut config = Config::default();
        config.output.prefix = "keep-".to_string();

        config.merge_cli(None, None, None, None, vec![]);
        assert_eq!(config.output.prefix, "keep-");
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_prefix_with_separator() {
        let mut config = Config::default();
        config.output.prefix = "sub/dir-".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compiled_excludes() {
        let mut config = Config::default();
        config.source.exclude = vec!["*_gen.go".to_string()];
        let patterns = config.compiled_excludes().unwrap();
        assert_eq!(patterns.len(), 1);
        assert!(patterns[0].matches("types_gen.go"));
    }

    #[test]
    fn test_compiled_excludes_bad_pattern() {
        let mut config = Config::default();
        config.source.exclude = vec!["[invalid".to_string()];
        assert!(config.compiled_excludes().is_err());
    }
}
