use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{MatchError, Matcher, ScoringModel};
use crate::models::{
    AccommodationType, DisabilityType, ErrorResponse, ExperienceRange, FindMatchesRequest,
    FindMatchesResponse, HealthResponse, Industry, OptionsResponse, WorkPreference,
    MAX_EXPERIENCE_YEARS,
};
use crate::render::render_lines;
use crate::services::EmployerSource;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn EmployerSource>,
    pub model: Arc<dyn ScoringModel>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/options", web::get().to(form_options))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let employer_count = state.directory.len();
    let status = if employer_count > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        employer_count,
        timestamp: chrono::Utc::now(),
    })
}

/// Values accepted by the find matches endpoint
///
/// GET /api/v1/options
async fn form_options() -> impl Responder {
    fn labels<T: ToString>(values: &[T]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    HttpResponse::Ok().json(OptionsResponse {
        disability_types: labels(DisabilityType::ALL),
        work_preferences: labels(WorkPreference::ALL),
        industries: labels(Industry::ALL),
        accommodations: labels(AccommodationType::ALL),
        experience_years: ExperienceRange {
            min: 0,
            max: MAX_EXPERIENCE_YEARS,
            default: 5,
        },
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "disabilityType": "hearing",
///   "experienceYears": 5,
///   "workPreference": "hybrid",
///   "industry": "tech",
///   "accommodations": ["interpreter services"]
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let profile = req.into_inner().into_profile();

    tracing::info!(
        "Finding matches for request {}: industry={}, accommodations={}",
        request_id,
        profile.industry_preference,
        profile.desired_accommodations.len()
    );

    let outcome = match state
        .matcher
        .find_matches(&profile, state.directory.employers(), state.model.as_ref())
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Matching failed for request {}: {}", request_id, e);
            return error_response(&e);
        }
    };

    let lines = render_lines(&outcome.ranked.tier);

    tracing::info!(
        "Request {}: tier={}, scored {} of {} employers ({} candidates, {} skipped)",
        request_id,
        outcome.ranked.tier.kind(),
        outcome.scored,
        outcome.total_employers,
        outcome.candidates,
        outcome.skipped.len()
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        request_id,
        top_score: outcome.ranked.top_score,
        num_top_matches: outcome.ranked.num_top_matches,
        display: outcome.ranked.tier,
        results: outcome.ranked.results,
        lines,
        total_employers: outcome.total_employers,
        candidates_scored: outcome.scored,
        skipped_employers: outcome.skipped,
    })
}

fn error_response(error: &MatchError) -> HttpResponse {
    let (status, label) = match error {
        MatchError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input"),
        MatchError::EmptyDirectory => (StatusCode::SERVICE_UNAVAILABLE, "Empty employer directory"),
        MatchError::Scoring { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "Scoring failed"),
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: label.to_string(),
        message: error.to_string(),
        status_code: status.as_u16(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use crate::core::{FeatureSchema, FeatureVector, ScoringError};
    use crate::models::EmployerRecord;
    use crate::services::CsvEmployerDirectory;

    struct ConstantModel(f64);

    impl ScoringModel for ConstantModel {
        fn schema(&self) -> &FeatureSchema {
            FeatureSchema::current()
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64, ScoringError> {
            Ok(self.0)
        }
    }

    fn create_state(employers: Vec<EmployerRecord>) -> AppState {
        AppState {
            directory: Arc::new(CsvEmployerDirectory::from_records(employers)),
            model: Arc::new(ConstantModel(0.873)),
            matcher: Matcher::default(),
        }
    }

    fn create_employer(name: &str, industry: &str) -> EmployerRecord {
        EmployerRecord {
            name: name.to_string(),
            company_size: "small".to_string(),
            industry: industry.to_string(),
            remote_policy: "hybrid".to_string(),
            available_accommodations: Default::default(),
        }
    }

    #[actix_web::test]
    async fn test_find_matches_endpoint() {
        let state = create_state(vec![create_employer("Acme", "tech"), create_employer("Globex", "tech")]);
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({
                "disabilityType": "vision",
                "experienceYears": 8,
                "workPreference": "fully remote",
                "industry": "tech",
                "accommodations": ["remote work"]
            }))
            .to_request();
        let resp: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.num_top_matches, 2);
        assert_eq!(resp.lines[0], "Top 2 Employer Matches");
        assert_eq!(resp.lines[1], "1. Acme - Match Score: 87.3%");
        assert_eq!(resp.candidates_scored, 2);
    }

    #[actix_web::test]
    async fn test_empty_directory_is_unavailable() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(create_state(vec![]))).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({
                "disabilityType": "vision",
                "workPreference": "hybrid",
                "industry": "tech"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_out_of_range_experience_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(create_state(vec![create_employer("Acme", "tech")])))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({
                "disabilityType": "vision",
                "experienceYears": 40,
                "workPreference": "hybrid",
                "industry": "tech"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_options_lists_accommodations() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/options").to_request();
        let resp: OptionsResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.accommodations.len(), 7);
        assert_eq!(resp.industries[0], "tech");
        assert_eq!(resp.experience_years.max, 30);
    }
}
