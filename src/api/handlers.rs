//! HTTP request handlers

use super::types::{
    AppStateResponse, ErrorResponse, InputRequest, MessageResponse, PageRequest,
    SessionResponse, SignupResponse, SubmitRequest, SubmitResponse,
};
use super::ApiState;
use crate::account::{
    ContactForm, FeedbackForm, LoginForm, SignupForm, UserProfile, ValidationError,
};
use crate::app_state::Page;
use crate::history::{reports, Report};
use crate::session::SubmitError;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Login flag and page
        .route("/api/state", get(get_app_state))
        .route("/api/page", put(set_page))
        // Accounts
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/profile", get(get_profile))
        // Messages to the team
        .route("/api/contact", post(contact))
        .route("/api/feedback", post(feedback))
        // Diagnosis session
        .route("/api/session", get(get_session))
        .route("/api/session/new", post(new_session))
        .route("/api/session/input", put(set_input))
        .route("/api/session/submit", post(submit))
        // History, newest first
        .route("/api/reports", get(list_reports))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Accounts
// ============================================================

async fn get_app_state(State(state): State<ApiState>) -> Json<AppStateResponse> {
    Json(AppStateResponse {
        page: state.app.page(),
        logged_in: state.app.is_logged_in(),
    })
}

async fn set_page(
    State(state): State<ApiState>,
    Json(req): Json<PageRequest>,
) -> Json<AppStateResponse> {
    state.navigate(req.page);
    Json(AppStateResponse {
        page: state.app.page(),
        logged_in: state.app.is_logged_in(),
    })
}

async fn signup(
    State(state): State<ApiState>,
    Json(form): Json<SignupForm>,
) -> Result<Json<SignupResponse>, AppError> {
    let profile = state.signup(&form)?;
    Ok(Json(SignupResponse {
        profile,
        page: state.app.page(),
    }))
}

async fn login(
    State(state): State<ApiState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<AppStateResponse>, AppError> {
    state.login(&form)?;
    Ok(Json(AppStateResponse {
        page: state.app.page(),
        logged_in: true,
    }))
}

async fn logout(State(state): State<ApiState>) -> Json<AppStateResponse> {
    state.app.logout();
    Json(AppStateResponse {
        page: state.app.page(),
        logged_in: false,
    })
}

async fn get_profile(State(state): State<ApiState>) -> Result<Json<UserProfile>, AppError> {
    state
        .app
        .profile()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No Profile Data".to_string()))
}

// ============================================================
// Contact and Feedback
// ============================================================

async fn contact(Json(form): Json<ContactForm>) -> Result<Json<MessageResponse>, AppError> {
    form.validate()?;
    tracing::info!(email = %form.email, "Contact message received");
    Ok(Json(MessageResponse {
        message: ContactForm::ACKNOWLEDGEMENT,
    }))
}

async fn feedback(Json(form): Json<FeedbackForm>) -> Result<Json<MessageResponse>, AppError> {
    form.validate()?;
    tracing::info!(rating = form.rating, "Feedback received");
    Ok(Json(MessageResponse {
        message: FeedbackForm::ACKNOWLEDGEMENT,
    }))
}

// ============================================================
// Diagnosis Session
// ============================================================

async fn get_session(State(state): State<ApiState>) -> Json<SessionResponse> {
    Json(SessionResponse::new(
        &state.session().snapshot(),
        state.app.page(),
    ))
}

async fn new_session(State(state): State<ApiState>) -> Json<SessionResponse> {
    state.app.navigate(Page::Diagnose);
    let session = state.reset_session();
    Json(SessionResponse::new(&session.snapshot(), state.app.page()))
}

async fn set_input(
    State(state): State<ApiState>,
    Json(req): Json<InputRequest>,
) -> Result<StatusCode, AppError> {
    state.session().set_pending_input(req.text)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Submit `{ text }`, or the pending input when the body is empty
async fn submit(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmitResponse>, AppError> {
    let text = if body.is_empty() {
        None
    } else {
        if !is_json(&headers) {
            return Err(AppError::BadRequest(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }
        let Json(req) = Json::<SubmitRequest>::from_bytes(&body)?;
        req.text
    };

    let session = state.session();
    let outcome = match text {
        Some(text) => session.submit(&text).await,
        None => session.submit_pending().await,
    }?;

    Ok(Json(SubmitResponse {
        outcome: outcome.label(),
        message: outcome.to_message().to_view(),
    }))
}

// ============================================================
// Reports
// ============================================================

async fn list_reports(State(state): State<ApiState>) -> Json<Vec<Report>> {
    Json(reports(&state.app.history()))
}

async fn get_version() -> &'static str {
    concat!("medibot ", env!("CARGO_PKG_VERSION"))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Unauthorized { message: String, redirect: Page },
    Conflict(String),
    NotFound(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::EmptyInput => {
                AppError::BadRequest("Please enter at least one symptom.".to_string())
            }
            SubmitError::AuthRequired => AppError::Unauthorized {
                message: e.to_string(),
                redirect: Page::Login,
            },
            SubmitError::Busy => AppError::Conflict(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::Unauthorized { message, redirect } => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(message).with_redirect(redirect),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
        };

        (status, Json(body)).into_response()
    }
}
