use std::sync::Arc;

use axum::Router;

pub mod config;
pub mod modules;
pub mod services;

use config::app::Config;
use services::gemini::GeminiClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gemini: GeminiClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gemini = GeminiClient::new(&config.gemini_base_url, &config.gemini_model);

        Self {
            config: Arc::new(config),
            gemini,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = config::cors::layer(&state.config.cors_allowed_origins);

    Router::new()
        .merge(modules::summarize::routes::routes())
        .merge(modules::health::routes::routes())
        .layer(cors)
        .with_state(state)
}
