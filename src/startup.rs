use crate::app::AppState;
use crate::components::generation::{GeminiBackend, GenerationHandle};
use crate::components::storage::FileStore;
use crate::config::Config;
use crate::error::Error;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config and apply its locale
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => {
            rust_i18n::set_locale(&config.locale);
            info!("Setting locale to {}", config.locale);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Open the file store and restore the application state from it
pub fn load_state(config: &Config) -> miette::Result<AppState> {
    let store = FileStore::new(config.data_dir.clone())?;
    let mut state = AppState::load(Arc::new(store), config.inference_policy());
    if state.restore_schedule() {
        info!("Restored saved schedule");
    }
    Ok(state)
}

/// Spawn the generation actor backed by Gemini
pub fn start_generation(config: &Config) -> GenerationHandle {
    let backend = GeminiBackend::new(
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
    );
    GenerationHandle::new(Arc::new(backend))
}
