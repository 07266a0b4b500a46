use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Gemini REST endpoint (v1beta carries `systemInstruction`).
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_INSTRUCTIONS_PATH: &str = "inavora.json";

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub instructions: InstructionSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// `None` keeps the service up but every chat request answers 500.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct InstructionSettings {
    /// Re-read on every request, relative to the working directory.
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    /// `["*"]` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl CorsSettings {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl ChatConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the chat settings from `lookup`, which returns the raw value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").as_deref() == Some("prod");

        let api_key = lookup("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .map(Secret::new);
        if api_key.is_none() {
            if is_prod {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_API_KEY is required in production but not set"
                )));
            }
            tracing::warn!("GEMINI_API_KEY not found in environment or .env file");
        }

        let timeout_secs = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_GEMINI_TIMEOUT_SECS,
                    "Invalid GEMINI_TIMEOUT_SECS, using default"
                );
                DEFAULT_GEMINI_TIMEOUT_SECS
            }),
            None => DEFAULT_GEMINI_TIMEOUT_SECS,
        };

        Ok(ChatConfig {
            common,
            gemini: GeminiSettings {
                api_key,
                model: env_or(&lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                api_base: env_or(&lookup, "GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                timeout_secs,
            },
            instructions: InstructionSettings {
                path: env_or(&lookup, "INAVORA_INSTRUCTIONS_PATH", DEFAULT_INSTRUCTIONS_PATH)
                    .into(),
            },
            cors: CorsSettings {
                allowed_origins: parse_origins(&env_or(&lookup, "CORS_ALLOWED_ORIGINS", "*")),
            },
        })
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            gemini: GeminiSettings {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
            },
            instructions: InstructionSettings {
                path: DEFAULT_INSTRUCTIONS_PATH.into(),
            },
            cors: CorsSettings {
                allowed_origins: vec!["*".to_string()],
            },
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ChatConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ChatConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let config = from_vars(&[]).unwrap();
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini.api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.gemini.timeout_secs, DEFAULT_GEMINI_TIMEOUT_SECS);
        assert_eq!(config.instructions.path, PathBuf::from(DEFAULT_INSTRUCTIONS_PATH));
        assert!(config.cors.allows_any());
    }

    #[test]
    fn variables_override_defaults() {
        let config = from_vars(&[
            ("GEMINI_API_KEY", "test-key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_API_BASE", "http://127.0.0.1:9999/v1beta"),
            ("GEMINI_TIMEOUT_SECS", "15"),
            ("INAVORA_INSTRUCTIONS_PATH", "/etc/inavora/rules.json"),
            ("CORS_ALLOWED_ORIGINS", "https://app.example, https://admin.example"),
        ])
        .unwrap();

        assert_eq!(
            config.gemini.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("test-key")
        );
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.api_base, "http://127.0.0.1:9999/v1beta");
        assert_eq!(config.gemini.timeout_secs, 15);
        assert_eq!(config.instructions.path, PathBuf::from("/etc/inavora/rules.json"));
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://app.example", "https://admin.example"]
        );
    }

    #[test]
    fn production_requires_api_key() {
        let err = from_vars(&[("ENVIRONMENT", "prod")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let err = from_vars(&[("ENVIRONMENT", "prod"), ("GEMINI_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let config = from_vars(&[("ENVIRONMENT", "prod"), ("GEMINI_API_KEY", "k")]).unwrap();
        assert!(config.gemini.api_key.is_some());
    }

    #[test]
    fn missing_key_outside_production_is_not_fatal() {
        let config = from_vars(&[("ENVIRONMENT", "dev")]).unwrap();
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn unparsable_timeout_uses_default() {
        let config = from_vars(&[("GEMINI_TIMEOUT_SECS", "soon")]).unwrap();
        assert_eq!(config.gemini.timeout_secs, DEFAULT_GEMINI_TIMEOUT_SECS);
    }

    #[test]
    fn parses_comma_separated_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,"),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn wildcard_origin_allows_any() {
        assert!(ChatConfig::default().cors.allows_any());

        let cors = CorsSettings {
            allowed_origins: parse_origins("https://app.inavora.com"),
        };
        assert!(!cors.allows_any());
    }

    #[test]
    fn default_reads_local_instruction_file() {
        let config = ChatConfig::default();
        assert_eq!(config.instructions.path, PathBuf::from("inavora.json"));
        assert_eq!(config.gemini.model, "gemini-flash-latest");
        assert!(config.gemini.api_key.is_none());
    }
}
