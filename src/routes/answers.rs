use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::AnswerSubmission;
use crate::models::{CoverageRequest, ErrorResponse, ExpectedKeywords, FeedbackRequest, HealthResponse};
use crate::routes::AppState;

/// Configure health and answer scoring routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/answers/coverage", web::post().to(score_coverage))
        .route("/answers/feedback", web::post().to(submit_feedback))
        .route("/answers/{id}", web::get().to(get_feedback));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        stored_answers: state.store.len(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "Validation failed",
        errors.to_string(),
        400,
    ))
}

/// Keyword coverage endpoint
///
/// POST /api/v1/answers/coverage
///
/// Request body:
/// ```json
/// {
///   "keywords": ["api", "database"],
///   "answerText": "string"
/// }
/// ```
async fn score_coverage(
    state: web::Data<AppState>,
    req: web::Json<CoverageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for coverage request: {}", errors);
        return validation_error(errors);
    }

    let req = req.into_inner();
    let keywords = ExpectedKeywords::from(req.keywords);
    let report = state
        .feedback
        .scorer()
        .score_expected(&keywords, &req.answer_text);

    tracing::debug!(
        "Coverage request: {} keywords, score {}",
        keywords.as_slice().len(),
        report.score
    );

    HttpResponse::Ok().json(report)
}

/// Answer feedback endpoint
///
/// POST /api/v1/answers/feedback
///
/// Request body:
/// ```json
/// {
///   "sessionId": "string",
///   "userId": "string",
///   "questionId": "string",
///   "keywords": ["string"],
///   "answerText": "string",
///   "ratings": { "technical": 7, "communication": 8, "depth": 6 }
/// }
/// ```
///
/// `keywords` and `ratings` are optional.
async fn submit_feedback(
    state: web::Data<AppState>,
    req: web::Json<FeedbackRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!(
            "Validation failed for feedback request: session={:?}, question={:?}: {}",
            req.session_id,
            req.question_id,
            errors
        );
        return validation_error(errors);
    }

    let submission = AnswerSubmission::from(req.into_inner());
    let feedback = state.feedback.build(submission);

    tracing::info!(
        "Scored answer {} for user {} in session {}: overall {}, coverage {}/10",
        feedback.question_id,
        feedback.user_id,
        feedback.session_id,
        feedback.overall_score,
        feedback.coverage.score
    );

    state.store.insert(feedback.clone()).await;

    HttpResponse::Ok().json(feedback)
}

/// Fetch a stored feedback record
///
/// GET /api/v1/answers/{id}
async fn get_feedback(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let raw_id = path.into_inner();
    let id = match uuid::Uuid::parse_str(&raw_id) {
        Ok(id) => id,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid feedback id",
                e.to_string(),
                400,
            ));
        }
    };

    match state.store.get(&id).await {
        Some(feedback) => HttpResponse::Ok().json(feedback),
        None => HttpResponse::NotFound().json(ErrorResponse::new(
            "Feedback not found",
            format!("No feedback stored with id {}", id),
            404,
        )),
    }
}
