//! HTTP request handlers for the server.
//!
//! Every route answers `200 OK` with an `OperationOutcome` body, including
//! malformed requests. The caller's identity arrives pre-validated in the
//! `x-user-id` header.

use crate::actions::{self, SharedStore};
use crate::outcome::OperationOutcome;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    response::Json,
    routing::{get, post},
    Router as AxumRouter,
};
use marginalia_assist::Assistant;
use marginalia_domain::{AnalysisResult, InferenceProvider, Note, NoteUpdate, SearchCandidate};
use marginalia_llm::LlmError;
use serde::{Deserialize, Serialize};

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Shared application state
pub struct AppState<P> {
    /// Assist pipeline
    pub assistant: Assistant<P>,
    /// Note persistence
    pub store: SharedStore,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            assistant: self.assistant.clone(),
            store: self.store.clone(),
        }
    }
}

/// Body of the single-text AI routes
#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    /// Text to transform
    pub content: String,
}

/// Body of `POST /ai/translate`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Text to translate
    pub content: String,
    /// Language name, e.g. "Spanish"
    pub target_language: String,
}

/// Body of `POST /ai/search`
///
/// Without `notes` the caller's stored notes are searched.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Natural-language query
    pub query: String,
    /// Explicit candidate set
    #[serde(default)]
    pub notes: Option<Vec<SearchCandidate>>,
}

/// Body of `POST /notes`
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Note title
    #[serde(default)]
    pub title: String,
    /// Markup body
    #[serde(default)]
    pub content: String,
}

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Server version
    pub version: String,
}

type Reply<T> = Json<OperationOutcome<T>>;

fn rejected<T>(rejection: JsonRejection) -> Reply<T> {
    Json(OperationOutcome::invalid(format!(
        "Invalid request body: {}",
        rejection.body_text()
    )))
}

/// User id from the identity header, empty when absent or not UTF-8
fn user_id(headers: &HeaderMap) -> &str {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default()
}

/// POST /ai/continue
async fn continue_text<P>(
    State(state): State<AppState<P>>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Reply<String>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    match payload {
        Ok(Json(req)) => Json(actions::continue_action(&state.assistant, &req.content).await),
        Err(rejection) => rejected(rejection),
    }
}

/// POST /ai/summarize
async fn summarize<P>(
    State(state): State<AppState<P>>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Reply<String>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    match payload {
        Ok(Json(req)) => Json(actions::summarize_action(&state.assistant, &req.content).await),
        Err(rejection) => rejected(rejection),
    }
}

/// POST /ai/enhance
async fn enhance<P>(
    State(state): State<AppState<P>>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Reply<String>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    match payload {
        Ok(Json(req)) => Json(actions::enhance_action(&state.assistant, &req.content).await),
        Err(rejection) => rejected(rejection),
    }
}

/// POST /ai/translate
async fn translate<P>(
    State(state): State<AppState<P>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Reply<String>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    match payload {
        Ok(Json(req)) => Json(
            actions::translate_action(&state.assistant, &req.content, &req.target_language).await,
        ),
        Err(rejection) => rejected(rejection),
    }
}

/// POST /ai/analyze
async fn analyze<P>(
    State(state): State<AppState<P>>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Reply<AnalysisResult>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    match payload {
        Ok(Json(req)) => Json(actions::analyze_action(&state.assistant, &req.content).await),
        Err(rejection) => rejected(rejection),
    }
}

/// POST /ai/search
async fn search<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Reply<Vec<String>>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejected(rejection),
    };

    let outcome = match req.notes {
        Some(candidates) => {
            actions::semantic_search_action(&state.assistant, &req.query, candidates).await
        }
        None => {
            actions::search_user_notes_action(
                &state.assistant,
                &state.store,
                user_id(&headers),
                &req.query,
            )
            .await
        }
    };
    Json(outcome)
}

/// GET /notes
async fn list_notes<P>(State(state): State<AppState<P>>, headers: HeaderMap) -> Reply<Vec<Note>>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    Json(actions::list_notes_action(&state.store, user_id(&headers)))
}

/// POST /notes
async fn create_note<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Reply<Note>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    match payload {
        Ok(Json(req)) => Json(actions::create_note_action(
            &state.store,
            user_id(&headers),
            &req.title,
            &req.content,
        )),
        Err(rejection) => rejected(rejection),
    }
}

/// GET /notes/:id
async fn get_note<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<Note>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    Json(actions::get_note_action(&state.store, user_id(&headers), &id))
}

/// PATCH /notes/:id
async fn update_note<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<NoteUpdate>, JsonRejection>,
) -> Reply<Note>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    match payload {
        Ok(Json(update)) => Json(actions::update_note_action(
            &state.store,
            user_id(&headers),
            &id,
            update,
        )),
        Err(rejection) => rejected(rejection),
    }
}

/// DELETE /notes/:id
async fn delete_note<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<()>
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    Json(actions::delete_note_action(&state.store, user_id(&headers), &id))
}

/// GET /health
async fn health_check() -> Reply<HealthCheckResponse> {
    Json(OperationOutcome::success(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Create the axum router with all routes
pub fn create_router<P>(state: AppState<P>) -> AxumRouter
where
    P: InferenceProvider<Error = LlmError> + 'static,
{
    AxumRouter::new()
        .route("/ai/continue", post(continue_text::<P>))
        .route("/ai/summarize", post(summarize::<P>))
        .route("/ai/enhance", post(enhance::<P>))
        .route("/ai/translate", post(translate::<P>))
        .route("/ai/analyze", post(analyze::<P>))
        .route("/ai/search", post(search::<P>))
        .route("/notes", get(list_notes::<P>).post(create_note::<P>))
        .route(
            "/notes/:id",
            get(get_note::<P>)
                .patch(update_note::<P>)
                .delete(delete_note::<P>),
        )
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::new_shared_store;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use marginalia_assist::AssistConfig;
    use marginalia_llm::MockProvider;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(provider: &MockProvider) -> AxumRouter {
        create_router(AppState {
            assistant: Assistant::new(provider.clone(), AssistConfig::default()),
            store: new_shared_store(":memory:").unwrap(),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(&MockProvider::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_summarize_route() {
        let provider = MockProvider::new("Short summary.");
        let response = app(&provider)
            .oneshot(
                Request::post("/ai/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({ "content": "A long note" }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "success", "data": "Short summary." })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_envelope() {
        let provider = MockProvider::default();
        let response = app(&provider)
            .oneshot(
                Request::post("/ai/translate")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"content": "hola"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["kind"], "InputInvalid");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_notes_require_user_header() {
        let response = app(&MockProvider::default())
            .oneshot(Request::get("/notes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            body_json(response).await,
            json!({ "status": "error", "message": "User ID is required", "kind": "InputInvalid" })
        );
    }

    #[test]
    fn test_user_id_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(user_id(&headers), "");

        headers.insert(USER_ID_HEADER, " user_1 ".parse().unwrap());
        assert_eq!(user_id(&headers), "user_1");
    }
}
