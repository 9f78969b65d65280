use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use veil_core::{Category, LogStyle};

/// Name of the per-project file, found by walking up from the working directory
pub const PROJECT_FILE: &str = "veil.toml";

// ============================================================================
// Global Config (config.toml in the platform config directory)
// ============================================================================

/// Configuration for veil
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed seed; when unset each document is seeded from its content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default)]
    pub extractor: ExtractorKind,

    /// Texts that are never flagged
    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Texts that are always flagged
    #[serde(default)]
    pub terms: Vec<TermConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    #[default]
    Regex,
    Llm,
    Hybrid,
}

impl ExtractorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractorKind::Regex => "regex",
            ExtractorKind::Llm => "llm",
            ExtractorKind::Hybrid => "hybrid",
        }
    }

    pub fn uses_model(&self) -> bool {
        !matches!(self, ExtractorKind::Regex)
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regex" => Ok(ExtractorKind::Regex),
            "llm" => Ok(ExtractorKind::Llm),
            "hybrid" => Ok(ExtractorKind::Hybrid),
            other => bail!("Unknown extractor '{}'. Use regex, llm or hybrid", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_delimiter")]
    pub log_delimiter: String,

    #[serde(default = "default_arrow")]
    pub arrow: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// An exact text that is always flagged as `category`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermConfig {
    pub text: String,
    pub category: Category,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            extractor: ExtractorKind::default(),
            ignore: Vec::new(),
            llm: LlmConfig::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
            terms: Vec::new(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout(),
            temperature: 0.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_delimiter: default_delimiter(),
            arrow: default_arrow(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_api_key_env() -> String {
    "VEIL_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_delimiter() -> String {
    "=====".to_string()
}

fn default_arrow() -> String {
    "=>".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    17380
}

impl LlmConfig {
    /// API key from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl OutputConfig {
    pub fn log_style(&self) -> LogStyle {
        LogStyle {
            delimiter: self.log_delimiter.clone(),
            arrow: self.arrow.clone(),
        }
    }
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "veil", "veil") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.veil/config.toml")
        }
    }

    /// Global (or explicit) config with the nearest project file applied
    pub fn effective(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        if let Some((_, project)) = ProjectConfig::find_and_load()? {
            config.apply_project(project);
        }
        config.validate()?;
        Ok(config)
    }

    /// Overlay a project file: seed and extractor replace, terms and ignore extend
    pub fn apply_project(&mut self, project: ProjectConfig) {
        if project.seed.is_some() {
            self.seed = project.seed;
        }
        if let Some(extractor) = project.extractor {
            self.extractor = extractor;
        }
        self.terms.extend(project.terms);
        self.ignore.extend(project.ignore);
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.extractor.uses_model() {
            if self.llm.endpoint.trim().is_empty() {
                bail!("llm.endpoint must be set for the {} extractor", self.extractor);
            }
            if self.llm.model.trim().is_empty() {
                bail!("llm.model must be set for the {} extractor", self.extractor);
            }
        }
        if self.llm.timeout_secs == 0 {
            bail!("llm.timeout_secs must be greater than zero");
        }
        if self.output.log_delimiter.contains('\n') || self.output.arrow.contains('\n') {
            bail!("output.log_delimiter and output.arrow must be single-line");
        }
        if let Some(term) = self.terms.iter().find(|t| t.text.trim().is_empty()) {
            bail!("terms entry for category {} has empty text", term.category);
        }
        Ok(())
    }
}

// ============================================================================
// Project Config (veil.toml)
// ============================================================================

/// Project-level configuration (veil.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<ExtractorKind>,

    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub terms: Vec<TermConfig>,
}

impl ProjectConfig {
    /// Find and load veil.toml from current or parent directories
    pub fn find_and_load() -> anyhow::Result<Option<(PathBuf, Self)>> {
        if let Some(root) = Self::find_project_root()? {
            let config = Self::load(&root)?;
            Ok(Some((root, config)))
        } else {
            Ok(None)
        }
    }

    /// Find veil.toml by walking up from current directory
    pub fn find_project_root() -> anyhow::Result<Option<PathBuf>> {
        let current = std::env::current_dir()?;
        Self::find_project_root_from(&current)
    }

    /// Find veil.toml by walking up from given directory
    pub fn find_project_root_from(start: &Path) -> anyhow::Result<Option<PathBuf>> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_FILE).exists() {
                return Ok(Some(current));
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Load veil.toml from project root
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let path = project_root.join(PROJECT_FILE);
        let content = std::fs::read_to_string(&path)?;
        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid project file {}", path.display()))?;
        Ok(config)
    }

    /// Save veil.toml to project root
    pub fn save(&self, project_root: &Path) -> anyhow::Result<()> {
        let path = project_root.join(PROJECT_FILE);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Starter project file written by `veil config init`
    pub fn starter() -> Self {
        Self {
            seed: None,
            extractor: Some(ExtractorKind::Regex),
            ignore: vec!["Medicare".to_string()],
            terms: vec![TermConfig {
                text: "Acme Health Trust".to_string(),
                category: Category::Organization,
            }],
        }
    }
}
