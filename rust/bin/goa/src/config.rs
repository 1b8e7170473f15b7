//! Project configuration.
//!
//! Reads `goa.toml` from the working directory (or `--config <path>`).
//! Every key is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default schema output path.
pub const OUTPUT_FILE: &str = "def.proto";

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "goa.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoaConfig {
    /// Where the generated schema is written. Overwritten on every run.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Fail on fields whose Go type has no schema counterpart instead of
    /// emitting `<unsupported>`.
    #[serde(default)]
    pub strict: bool,

    /// Proto package statement for the generated schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(default)]
    pub protoc: ProtocConfig,
}

/// How the external schema compiler is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocConfig {
    /// Compiler executable (looked up on `PATH`).
    #[serde(default = "default_program")]
    pub program: String,

    /// `--java_out` directory. Empty disables Java output.
    #[serde(default = "default_out_dir")]
    pub java_out: String,

    /// `--go_out` directory. Empty disables Go output.
    #[serde(default = "default_out_dir")]
    pub go_out: String,

    /// Extra arguments passed before the schema path (e.g. `--proto_path=.`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from(OUTPUT_FILE)
}

fn default_program() -> String {
    "protoc".to_string()
}

fn default_out_dir() -> String {
    ".".to_string()
}

impl Default for GoaConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            strict: false,
            package: None,
            protoc: ProtocConfig::default(),
        }
    }
}

impl Default for ProtocConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            java_out: default_out_dir(),
            go_out: default_out_dir(),
            extra_args: Vec::new(),
        }
    }
}

impl GoaConfig {
    /// Config path used when `--config` is not given.
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: GoaConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GoaConfig::default();
        assert_eq!(config.output, PathBuf::from("def.proto"));
        assert!(!config.strict);
        assert_eq!(config.protoc.program, "protoc");
        assert_eq!(config.protoc.java_out, ".");
        assert_eq!(config.protoc.go_out, ".");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = GoaConfig::load(&dir.path().join("goa.toml")).unwrap();
        assert_eq!(config, GoaConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goa.toml");
        std::fs::write(
            &path,
            r#"
strict = true
package = "rpc"

[protoc]
java_out = ""
extra_args = ["--proto_path=."]
"#,
        )
        .unwrap();

        let config = GoaConfig::load(&path).unwrap();
        assert!(config.strict);
        assert_eq!(config.package.as_deref(), Some("rpc"));
        assert_eq!(config.output, PathBuf::from("def.proto"));
        assert_eq!(config.protoc.program, "protoc");
        assert_eq!(config.protoc.java_out, "");
        assert_eq!(config.protoc.go_out, ".");
        assert_eq!(config.protoc.extra_args, vec!["--proto_path=."]);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goa.toml");
        std::fs::write(&path, "strict = \"yes\"").unwrap();
        let err = GoaConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("goa.toml"));
    }

    #[test]
    fn test_roundtrip() {
        let mut config = GoaConfig::default();
        config.package = Some("calc".to_string());
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: GoaConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }
}
