// College Compass - Web Server
// REST API over the catalog core with Axum

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use college_compass::{
    format, CatalogStore, ComparisonEngine, ConversationStore, ConversationTurn, Engine,
    InsertError, InstitutionRecord, QueryEngine, Role, ScoreError,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    catalog: Arc<CatalogStore>,
    engine: Arc<Engine>,
    conversations: Arc<ConversationStore>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message.into()),
        }
    }
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    conversation_id: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    conversation_id: String,
}

#[derive(Deserialize)]
struct ProgramParams {
    program: Option<String>,
}

#[derive(Deserialize)]
struct LocationParams {
    location: Option<String>,
}

#[derive(Deserialize)]
struct CompareRequest {
    institutions: Vec<String>,
}

#[derive(Deserialize)]
struct CalculatorRequest {
    institution: String,
    gpa: f64,
    sat: Option<u32>,
    act: Option<u32>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(serde_json::json!({
        "status": "healthy",
        "institutions": state.catalog.len(),
        "active_conversations": state.conversations.len(),
    })))
}

/// POST /api/chat - Dispatch one chat message
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let message = request.message.trim().to_string();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("Message cannot be empty")),
        )
            .into_response();
    }

    let conversation_id = request
        .conversation_id
        .unwrap_or_else(|| state.conversations.begin());

    let history = state.conversations.history(&conversation_id);
    state
        .conversations
        .record(&conversation_id, Role::User, &message);

    let reply = state.engine.handle(&message, &history);
    let response = format::render(&reply);
    state
        .conversations
        .record(&conversation_id, Role::Bot, &response);

    (
        StatusCode::OK,
        Json(ApiResponse::ok(ChatResponse {
            response,
            conversation_id,
        })),
    )
        .into_response()
}

/// GET /api/conversations - List conversation ids
async fn list_conversations(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.conversations.ids()))
}

/// GET /api/conversations/:id - Conversation history
async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let history: Vec<ConversationTurn> = state.conversations.history(&id);
    Json(ApiResponse::ok(history))
}

/// DELETE /api/conversations/:id - Clear a conversation
async fn clear_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if state.conversations.clear(&id) {
        (
            StatusCode::OK,
            Json(ApiResponse::ok("Conversation cleared successfully")),
        )
            .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err("Conversation not found")),
        )
            .into_response()
    }
}

/// GET /api/institutions - Full catalog
async fn get_institutions(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.catalog.all()))
}

/// GET /api/institutions/:name - Resolve one institution by alias
async fn get_institution(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    // Decode URL-encoded name
    let decoded = urlencoding::decode(&name)
        .unwrap_or_else(|_| name.clone().into())
        .into_owned();

    match state.catalog.lookup(&decoded) {
        Some(record) => (StatusCode::OK, Json(ApiResponse::ok(record))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err("Institution not found")),
        )
            .into_response(),
    }
}

/// GET /api/institutions/search/program?program=x
async fn search_by_program(
    State(state): State<AppState>,
    Query(params): Query<ProgramParams>,
) -> impl IntoResponse {
    let program = match params.program {
        Some(program) if !program.is_empty() => program,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::err("Program parameter required")),
            )
                .into_response()
        }
    };

    let results = QueryEngine::new(&state.catalog).search_by_program(&program);
    (StatusCode::OK, Json(ApiResponse::ok(results))).into_response()
}

/// GET /api/institutions/search/location?location=x
async fn search_by_location(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> impl IntoResponse {
    let location = match params.location {
        Some(location) if !location.is_empty() => location,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::err("Location parameter required")),
            )
                .into_response()
        }
    };

    let results = QueryEngine::new(&state.catalog).search_by_location(&location);
    (StatusCode::OK, Json(ApiResponse::ok(results))).into_response()
}

/// POST /api/institutions/compare - Side-by-side comparison
async fn compare_institutions(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> impl IntoResponse {
    if request.institutions.len() < 2 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(
                "At least 2 institutions required for comparison",
            )),
        )
            .into_response();
    }

    match ComparisonEngine::new(&state.catalog).compare(&request.institutions) {
        Ok(result) => (StatusCode::OK, Json(ApiResponse::ok(result))).into_response(),
        Err(error) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(error.to_string())),
        )
            .into_response(),
    }
}

/// POST /api/admission/calculator - Admission-chance scoring
async fn admission_calculator(
    State(state): State<AppState>,
    Json(request): Json<CalculatorRequest>,
) -> impl IntoResponse {
    match state
        .engine
        .score_admission(&request.institution, request.gpa, request.sat, request.act)
    {
        Ok(assessment) => (StatusCode::OK, Json(ApiResponse::ok(assessment))).into_response(),
        Err(ScoreError::MissingInput) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("Institution name and GPA are required")),
        )
            .into_response(),
        Err(ScoreError::NotFound(alias)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(format!("Institution not found: {}", alias))),
        )
            .into_response(),
    }
}

/// GET /api/admin/statistics - Catalog aggregates
async fn admin_statistics(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.statistics() {
        Some(stats) => (StatusCode::OK, Json(ApiResponse::ok(stats))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err("No institutions in catalog")),
        )
            .into_response(),
    }
}

/// POST /api/admin/institutions - Add an institution
async fn admin_add_institution(
    State(state): State<AppState>,
    Json(record): Json<InstitutionRecord>,
) -> impl IntoResponse {
    match state.catalog.insert(record, false) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok("Institution added successfully")),
        )
            .into_response(),
        Err(InsertError::AlreadyExists(key)) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::err(format!(
                "Institution already exists: {}",
                key
            ))),
        )
            .into_response(),
        Err(error @ InsertError::ValidationFailed(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(error.to_string())),
        )
            .into_response(),
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 College Compass - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let catalog = Arc::new(CatalogStore::with_defaults());
    println!("✓ Catalog loaded: {} institutions", catalog.len());

    let state = AppState {
        engine: Arc::new(Engine::new(catalog.clone())),
        catalog,
        conversations: Arc::new(ConversationStore::new()),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/chat", post(chat))
        .route("/conversations", get(list_conversations))
        .route(
            "/conversations/:id",
            get(get_conversation).delete(clear_conversation),
        )
        .route("/institutions", get(get_institutions))
        .route("/institutions/:name", get(get_institution))
        .route("/institutions/search/program", get(search_by_program))
        .route("/institutions/search/location", get(search_by_location))
        .route("/institutions/compare", post(compare_institutions))
        .route("/admission/calculator", post(admission_calculator))
        .route("/admin/statistics", get(admin_statistics))
        .route("/admin/institutions", post(admin_add_institution))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/institutions");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
