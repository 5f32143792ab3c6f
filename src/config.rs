// Configuration management for mapper-gen

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = ".mapper-gen.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub scan: ScanConfig,
}

/// Where sources live and where mapper files go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Path segment after which the package path starts
    pub source_root_marker: String,
    /// Suffix stripped from the source path to form the namespace
    pub source_suffix: String,
    /// Suffix of data-access interface files
    pub mapper_suffix: String,
    /// Replaces `mapper_suffix` in the output file name
    pub output_suffix: String,
    /// Output directory, relative to the workspace root
    pub mapper_dir: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extension of value-object source files
    pub vo_extension: String,
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_root_marker: "main/java/".to_string(),
            source_suffix: ".java".to_string(),
            mapper_suffix: "Mapper.java".to_string(),
            output_suffix: "_SQL.xml".to_string(),
            mapper_dir: "src/main/resources/mappers".to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            vo_extension: ".java".to_string(),
            exclude: vec![
                "target/".to_string(),
                "build/".to_string(),
                "node_modules/".to_string(),
                ".git/".to_string(),
                ".idea/".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the workspace root.
    /// Falls back to the defaults when `.mapper-gen.toml` is missing or invalid.
    pub fn from_project_dir<P: AsRef<Path>>(project_dir: P) -> Self {
        let config_path = project_dir.as_ref().join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Self::default();
        }

        match Self::from_file(&config_path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {}", config_path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Could not load config from {}: {}", config_path.display(), e);
                tracing::info!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Check if a path is outside the excluded directories
    pub fn should_scan_file(&self, file_path: &str) -> bool {
        let normalized = file_path.replace('\\', "/");
        !self
            .scan
            .exclude
            .iter()
            .any(|pattern| self.matches_pattern(&normalized, pattern))
    }

    /// Simple pattern matching (directory prefixes, `*.ext`, substrings)
    fn matches_pattern(&self, file_path: &str, pattern: &str) -> bool {
        if pattern.ends_with('/') {
            // Directory pattern
            file_path.starts_with(pattern) || file_path.contains(&format!("/{}", pattern))
        } else if let Some(ext) = pattern.strip_prefix("*.") {
            file_path.ends_with(&format!(".{}", ext))
        } else {
            file_path.contains(pattern)
        }
    }

    /// Glob used to locate the source file of a value-object type
    pub fn vo_glob(&self, type_name: &str) -> String {
        format!("**/{}{}", type_name, self.scan.vo_extension)
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        let layout = &self.layout;
        let required = [
            ("layout.source_root_marker", &layout.source_root_marker),
            ("layout.source_suffix", &layout.source_suffix),
            ("layout.mapper_suffix", &layout.mapper_suffix),
            ("layout.output_suffix", &layout.output_suffix),
            ("scan.vo_extension", &self.scan.vo_extension),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("{} cannot be empty", key));
            }
        }

        if Path::new(&layout.mapper_dir).is_absolute() {
            return Err(anyhow::anyhow!(
                "layout.mapper_dir must be relative to the workspace: {}",
                layout.mapper_dir
            ));
        }

        if !self.scan.vo_extension.starts_with('.') {
            return Err(anyhow::anyhow!(
                "scan.vo_extension must start with '.': {}",
                self.scan.vo_extension
            ));
        }

        Ok(())
    }
}

/// Load configuration for a workspace
pub fn load_config(project_dir: &Path) -> Config {
    Config::from_project_dir(project_dir)
}
