use axum::{routing::post, Router};

use crate::modules::summarize::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/summarize", post(controller::summarize))
}
