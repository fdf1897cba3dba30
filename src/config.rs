use crate::components::schedule::{InferencePolicy, ShiftKey};
use crate::error::{config_error, PlannerResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Default Gemini API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default directory of the file store
pub const DEFAULT_DATA_DIR: &str = "./data";
/// Default user-facing locale
pub const DEFAULT_LOCALE: &str = "ar";
/// Optional file overriding the non-secret settings
pub const CONFIG_FILE: &str = "config/planner.toml";

/// Main configuration structure for the planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key, only needed when generating
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini API root URL
    pub gemini_base_url: String,
    /// Directory holding the stored preferences
    pub data_dir: PathBuf,
    /// Locale of user-facing messages
    pub locale: String,
    /// Shift assumed for worked Monday to Thursday days with an unrecognized
    /// description
    pub unmatched_shift: ShiftKey,
}

/// Settings that `config/planner.toml` may override
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    gemini_model: Option<String>,
    gemini_base_url: Option<String>,
    data_dir: Option<PathBuf>,
    locale: Option<String>,
    unmatched_shift: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            locale: DEFAULT_LOCALE.to_string(),
            unmatched_shift: ShiftKey::Off,
        }
    }
}

/// Parse the unmatched-shift setting; only Monday to Thursday shifts and
/// `off` make sense there
pub fn parse_unmatched_shift(value: &str) -> PlannerResult<ShiftKey> {
    let key = value
        .trim()
        .parse::<ShiftKey>()
        .map_err(|e| config_error(&e))?;

    if key == ShiftKey::FriSatWork {
        return Err(config_error(
            "PLANNER_UNMATCHED_SHIFT must be off or a Monday to Thursday shift",
        ));
    }

    Ok(key)
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> PlannerResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            data_dir: env::var("PLANNER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            locale: env::var("PLANNER_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string()),
            unmatched_shift: match env::var("PLANNER_UNMATCHED_SHIFT") {
                Ok(value) => parse_unmatched_shift(&value)?,
                Err(_) => ShiftKey::Off,
            },
        };

        match fs::read_to_string(CONFIG_FILE) {
            Ok(content) => {
                info!("Applying settings from {}", CONFIG_FILE);
                config.apply_file(&content)?;
            }
            Err(e) => debug!("No {} ({}), using environment only", CONFIG_FILE, e),
        }

        Ok(config)
    }

    /// Override settings with the contents of a TOML config file
    pub fn apply_file(&mut self, content: &str) -> PlannerResult<()> {
        let overrides: FileOverrides = toml::from_str(content)?;

        if let Some(model) = overrides.gemini_model {
            self.gemini_model = model;
        }
        if let Some(base_url) = overrides.gemini_base_url {
            self.gemini_base_url = base_url;
        }
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        if let Some(unmatched) = overrides.unmatched_shift {
            self.unmatched_shift = parse_unmatched_shift(&unmatched)?;
        }

        Ok(())
    }

    /// Inference policy derived from the configuration
    pub fn inference_policy(&self) -> InferencePolicy {
        InferencePolicy {
            unmatched_work: self.unmatched_shift,
        }
    }
}
