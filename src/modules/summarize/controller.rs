use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::modules::summarize::schema::{ErrorResponse, SummarizeRequest, SummarizeResponse};
use crate::services::gemini::{compose_prompt, GeminiError};
use crate::AppState;

pub const NO_SUMMARY: &str = "No summary generated";

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

pub async fn summarize(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SummarizeResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Checked before the body so a misconfigured server always answers 500.
    let Some(api_key) = state.config.api_key.as_deref() else {
        tracing::error!("AI_API_KEY not set, rejecting summarize request");
        return Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI_API_KEY not set",
        ));
    };

    // Decoded regardless of Content-Type; a `null` body means empty fields.
    let payload = serde_json::from_slice::<Option<SummarizeRequest>>(&body)
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected summarize request body");
            error_response(StatusCode::BAD_REQUEST, "Invalid request")
        })?
        .unwrap_or_default();

    let prompt = compose_prompt(&payload.transcript, &payload.prompt);

    let response = state
        .gemini
        .generate_content(api_key, prompt)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, model = state.gemini.model(), "Gemini call failed");
            match e {
                GeminiError::InvalidResponse(_) => error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Invalid response from Gemini",
                ),
                _ => error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to call Gemini API",
                ),
            }
        })?;

    let summary = match response.first_text() {
        Some(text) => text.to_string(),
        None => {
            tracing::warn!(
                finish_reason = ?response.finish_reason(),
                "Gemini returned no text, using placeholder summary"
            );
            NO_SUMMARY.to_string()
        }
    };

    Ok(Json(SummarizeResponse { summary }))
}
