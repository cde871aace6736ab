use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::{
    services::{prompt::DEFAULT_TEMPLATE, reply, shortcut},
    PromptComposer, ReplyPolicy, SessionSettings, ShortcutMatcher, ShortcutRule, DEFAULT_TOP_K,
};
use crate::domain::DomainError;

pub const CONFIG_DIR_ENV: &str = "PAGE_CHAT_CONFIG_DIR";
const CONFIG_FILE: &str = "config.yaml";
const PROMPTS_FILE: &str = "prompts.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}

/// Runtime settings plus prompt texts.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub rag: RagConfig,
    pub loader: LoaderConfig,
    pub display: DisplayConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-1.5-pro".to_string(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "embedding-001".to_string(),
            dimension: 768,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub top_k: usize,
    pub chunk_size: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            chunk_size: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("page-chat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub wrap_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { wrap_width: 90 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub rag: RagPrompts,
    pub replies: RepliesConfig,
    pub shortcuts: Vec<ShortcutRule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    pub template: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepliesConfig {
    pub empty_answer: String,
    pub apology: String,
}

impl Default for RepliesConfig {
    fn default() -> Self {
        Self {
            empty_answer: reply::DEFAULT_EMPTY_ANSWER.to_string(),
            apology: reply::DEFAULT_APOLOGY.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads `config.yaml` and `prompts.yaml` from `$PAGE_CHAT_CONFIG_DIR`
    /// (default `./config`), then applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| "config".into());
        let mut config = Self::load_from(Path::new(&dir))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Missing files fall back to defaults; present files must parse.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            config: read_yaml(&dir.join(CONFIG_FILE))?.unwrap_or_default(),
            prompts: read_yaml(&dir.join(PROMPTS_FILE))?.unwrap_or_default(),
        })
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("SERVER_HOST") {
            self.config.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.config.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "SERVER_PORT".into(),
                value: port,
            })?;
        }
        if let Some(provider) = lookup("LLM_PROVIDER") {
            self.config.llm.provider = provider;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            self.config.llm.model = model;
        }
        if let Some(provider) = lookup("EMBEDDING_PROVIDER") {
            self.config.embedding.provider = provider;
        }
        if let Some(model) = lookup("EMBEDDING_MODEL") {
            self.config.embedding.model = model;
        }
        Ok(())
    }

    pub fn session_settings(&self) -> Result<SessionSettings, DomainError> {
        let shortcuts = if self.prompts.shortcuts.is_empty() {
            shortcut::default_rules()
        } else {
            self.prompts.shortcuts.clone()
        };

        Ok(SessionSettings {
            top_k: self.config.rag.top_k,
            composer: Arc::new(PromptComposer::new(self.prompts.rag.template.clone())?),
            shortcuts: ShortcutMatcher::new(shortcuts),
            replies: ReplyPolicy::new(
                self.prompts.replies.empty_answer.clone(),
                self.prompts.replies.apology.clone(),
            ),
        })
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_yaml::from_str(&raw)
        .map(Some)
        .map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_files_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();

        assert_eq!(config.config.rag.top_k, 3);
        assert_eq!(config.config.display.wrap_width, 90);
        assert_eq!(config.config.llm.provider, "gemini");
        assert_eq!(config.prompts.rag.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "llm:\n  provider: anthropic\n  model: claude-3-5-haiku-latest\nrag:\n  chunk_size: 400\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(PROMPTS_FILE),
            "shortcuts:\n  - trigger: Cheers\n    reply: Cheers!\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.config.llm.provider, "anthropic");
        assert_eq!(config.config.llm.timeout_seconds, 60);
        assert_eq!(config.config.rag.chunk_size, 400);
        assert_eq!(config.config.rag.top_k, 3);

        let settings = config.session_settings().unwrap();
        assert_eq!(settings.shortcuts.reply_for("cheers"), Some("Cheers!"));
        assert_eq!(settings.shortcuts.reply_for("thanks"), None);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "rag: [not, a, map").unwrap();
        assert!(matches!(
            AppConfig::load_from(dir.path()),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [("SERVER_PORT", "9000"), ("LLM_MODEL", "gemini-1.5-flash")]
            .into_iter()
            .collect();
        let mut config = AppConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.config.server.port, 9000);
        assert_eq!(config.config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|k| (k == "SERVER_PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn test_template_without_placeholders_is_rejected() {
        let mut config = AppConfig::default();
        config.prompts.rag.template = "just answer".into();
        assert!(config.session_settings().is_err());
    }

    #[test]
    fn test_default_settings_match_session_defaults() {
        let settings = AppConfig::default().session_settings().unwrap();
        assert_eq!(settings.top_k, DEFAULT_TOP_K);
        assert_eq!(settings.shortcuts.rules(), ShortcutMatcher::default().rules());
    }
}
