use crate::dtos::{PromptRequest, PromptResponse};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

/// Response header telling monitoring whether the text came from the model
/// or is the fallback. The JSON body is the same either way.
pub const RELAY_SOURCE_HEADER: &str = "x-relay-source";

/// Relay a prompt to the model.
///
/// Always 200 once the prompt is valid: provider failures come back as the
/// fallback text with `status: "success"`.
pub async fn submit_prompt(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    tracing::info!(method = %method, "Received prompt request");
    tracing::debug!(headers = ?headers, "Prompt request headers");

    let request = PromptRequest::from_json_body(&body).map_err(|e| {
        let outcome = match e {
            AppError::BadRequest(_) => "rejected",
            _ => "error",
        };
        metrics::record_relay_outcome(outcome);
        e
    })?;

    tracing::info!(prompt = %request.as_str(), "User prompt");

    let reply = state.relay.relay(request).await;

    tracing::info!(
        source = reply.source.as_str(),
        "Sending response back to client"
    );

    let mut response = (
        StatusCode::OK,
        Json(PromptResponse::success(reply.prompt, reply.response)),
    )
        .into_response();
    response.headers_mut().insert(
        RELAY_SOURCE_HEADER,
        HeaderValue::from_static(reply.source.as_str()),
    );

    Ok(response)
}

/// Bare `OPTIONS /prompt` without CORS request headers. Real preflights are
/// answered by the CORS layer before reaching the router.
pub async fn prompt_preflight() -> StatusCode {
    StatusCode::OK
}
