//! Configuration for interface generation and formatting.
//!
//! Load order: `.ifacemaker.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILE: &str = ".ifacemaker.toml";

/// Top-level ifacemaker configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MakerConfig {
    pub generation: GenerationConfig,
    pub format: FormatConfig,
}

/// What gets extracted from the scanned sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Copy method doc comments into the generated interface.
    pub copy_docs: bool,
    /// Method names that never make it into the interface.
    pub exclude: Vec<String>,
}

/// How the synthesized interface is canonicalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub formatter: FormatterKind,
    /// Program and arguments for [`FormatterKind::Command`]. Source is piped
    /// through stdin and read back from stdout.
    pub command: Vec<String>,
    /// Drop imports the interface never references (builtin formatter only).
    pub prune_imports: bool,
}

/// Which formatter canonicalizes the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterKind {
    /// In-process tree-sitter based canonicalizer.
    #[default]
    Builtin,
    /// External program such as `goimports` or `gofmt`.
    Command,
}

impl FromStr for FormatterKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "command" => Ok(Self::Command),
            other => anyhow::bail!("unknown formatter: {other} (expected builtin or command)"),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            copy_docs: true,
            exclude: Vec::new(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            formatter: FormatterKind::Builtin,
            command: vec!["goimports".to_string()],
            prune_imports: true,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl MakerConfig {
    /// Load config from `.ifacemaker.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        env_override("IFACEMAKER_COPY_DOCS", &mut self.generation.copy_docs);
        env_override("IFACEMAKER_FORMATTER", &mut self.format.formatter);
        env_override("IFACEMAKER_PRUNE_IMPORTS", &mut self.format.prune_imports);
        if let Ok(cmd) = std::env::var("IFACEMAKER_FORMAT_COMMAND") {
            self.format.command = cmd.split_whitespace().map(String::from).collect();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.format.formatter == FormatterKind::Command && self.format.command.is_empty() {
            anyhow::bail!("format.formatter is \"command\" but format.command is empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MakerConfig::default();
        assert!(config.generation.copy_docs);
        assert!(config.generation.exclude.is_empty());
        assert_eq!(config.format.formatter, FormatterKind::Builtin);
        assert_eq!(config.format.command, vec!["goimports"]);
        assert!(config.format.prune_imports);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[generation]
copy_docs = false
exclude = ["String", "Close"]

[format]
formatter = "command"
command = ["gofmt", "-s"]
"#;
        let config: MakerConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.generation.copy_docs);
        assert_eq!(config.generation.exclude, vec!["String", "Close"]);
        assert_eq!(config.format.formatter, FormatterKind::Command);
        assert_eq!(config.format.command, vec!["gofmt", "-s"]);
        // Defaults for unspecified fields
        assert!(config.format.prune_imports);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = MakerConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert_eq!(config.format.formatter, FormatterKind::Builtin);
    }

    #[test]
    fn test_load_rejects_empty_command() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[format]
formatter = "command"
command = []
"#,
        )
        .unwrap();

        let err = MakerConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("format.command is empty"));
    }

    #[test]
    fn test_load_reads_project_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            "[generation]\nexclude = [\"Reset\"]\n",
        )
        .unwrap();

        let config = MakerConfig::load(tmp.path()).unwrap();
        assert_eq!(config.generation.exclude, vec!["Reset"]);
        assert!(config.generation.copy_docs);
    }

    #[test]
    fn test_formatter_kind_from_str() {
        assert_eq!("Builtin".parse::<FormatterKind>().unwrap(), FormatterKind::Builtin);
        assert_eq!(" command ".parse::<FormatterKind>().unwrap(), FormatterKind::Command);
        assert!("gofmt".parse::<FormatterKind>().is_err());
    }
}
