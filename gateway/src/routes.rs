//! Territory, demographics, provider scoring and map config routes
//!
//! All JSON bodies are camelCase to match the map front end.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use demographics::{DemographicsReport, DemographicsService, Practice, ProviderScore};
use geojson::{FeatureCollection, JsonObject};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use territory_lock::{
    ClaimRequest, Conflict, Hold, LockError, AreaRequest, Record, ReleaseOutcome, ReleaseTarget,
    Territory, TerritoryListing, TerritoryManager,
};

use crate::error::{ApiError, ApiJson};

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<TerritoryManager>,
    pub demographics: Arc<DemographicsService>,
    pub google_maps_api_key: Option<String>,
}

// ========== Request/Response Types ==========

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub success: bool,
    #[serde(flatten)]
    pub listing: TerritoryListing,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockResponse {
    pub success: bool,
    pub lock_date: DateTime<Utc>,
    pub message: String,
    pub territory: Territory,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldResponse {
    pub success: bool,
    pub message: String,
    pub expires_at: DateTime<Utc>,
    pub time_remaining: String,
    pub hold: Hold,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRequest {
    pub territory_id: Option<String>,
    pub hold_id: Option<String>,
    pub reason: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseResponse {
    pub success: bool,
    pub message: &'static str,
    /// False when nothing active had the id
    pub released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub available: bool,
    pub conflict: Option<Conflict>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: DemographicsReport,
    pub radius: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderScoreResponse {
    pub success: bool,
    #[serde(flatten)]
    pub score: ProviderScore,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfigResponse {
    pub success: bool,
    pub google_maps_api_key: String,
}

/// `HH:MM:SS`, clamped at zero. Hours are not wrapped at 24.
pub fn format_remaining(until: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (until - now).num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

// ========== Route Handlers ==========

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "territory-gateway",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_territories(
    State(state): State<AppState>,
) -> Result<Json<ListResponse>, ApiError> {
    let listing = state.manager.list_territories().await?;
    Ok(Json(ListResponse {
        success: true,
        listing,
    }))
}

pub async fn lock_territory(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ClaimRequest>,
) -> Result<(StatusCode, Json<LockResponse>), ApiError> {
    let territory = state.manager.lock_territory(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(LockResponse {
            success: true,
            lock_date: territory.created_at,
            message: format!(
                "Territory locked successfully for {}",
                territory.owner.practice
            ),
            territory,
        }),
    ))
}

pub async fn hold_territory(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ClaimRequest>,
) -> Result<(StatusCode, Json<HoldResponse>), ApiError> {
    let hold = state.manager.hold_territory(req).await?;
    let hours = state.manager.config().hold_duration.num_hours();

    Ok((
        StatusCode::CREATED,
        Json(HoldResponse {
            success: true,
            message: format!("Territory held for {} hours", hours),
            expires_at: hold.expires_at,
            time_remaining: format_remaining(hold.expires_at, state.manager.now()),
            hold,
        }),
    ))
}

pub async fn release_territory(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReleaseRequest>,
) -> Result<Json<ReleaseResponse>, ApiError> {
    let target = ReleaseTarget::from_ids(req.territory_id, req.hold_id)?;
    let outcome = state
        .manager
        .release_territory(target.clone(), req.reason.as_deref())
        .await?;

    let response = match outcome {
        ReleaseOutcome::Released(record) => ReleaseResponse {
            success: true,
            message: match record {
                Record::Lock(_) => "Territory lock released",
                Record::Hold(_) => "Territory hold released",
            },
            released: true,
            record: Some(record),
        },
        ReleaseOutcome::NotFound => ReleaseResponse {
            success: true,
            message: match target {
                ReleaseTarget::Territory(_) => "No active territory lock with that id",
                ReleaseTarget::Hold(_) => "No active territory hold with that id",
            },
            released: false,
            record: None,
        },
    };

    Ok(Json(response))
}

pub async fn check_territory(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AreaRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let circle = req.validate().map_err(LockError::from)?;
    let conflict = state.manager.check_conflict(&circle).await?;

    Ok(Json(CheckResponse {
        available: conflict.is_none(),
        conflict,
    }))
}

/// Locks and holds as GeoJSON points with radius properties for the map
/// overlay.
pub async fn territories_geojson(
    State(state): State<AppState>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let listing = state.manager.list_territories().await?;

    let locks = listing.locked.iter().map(|t| {
        let mut props = JsonObject::new();
        props.insert("kind".into(), "locked".into());
        props.insert("practice".into(), t.owner.practice.clone().into());
        props.insert("rep".into(), t.owner.rep.clone().into());
        props.insert("createdAt".into(), t.created_at.to_rfc3339().into());
        t.circle().to_feature(&t.id, props)
    });
    let holds = listing.held.iter().map(|h| {
        let mut props = JsonObject::new();
        props.insert("kind".into(), "held".into());
        props.insert("practice".into(), h.owner.practice.clone().into());
        props.insert("rep".into(), h.owner.rep.clone().into());
        props.insert("createdAt".into(), h.created_at.to_rfc3339().into());
        props.insert("expiresAt".into(), h.expires_at.to_rfc3339().into());
        h.circle().to_feature(&h.id, props)
    });

    Ok(Json(geofence::feature_collection(locks.chain(holds).collect())))
}

pub async fn survey_demographics(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AreaRequest>,
) -> Result<Json<SurveyResponse>, ApiError> {
    let circle = req.validate().map_err(LockError::from)?;
    let report = state.demographics.survey(&circle).await?;
    Ok(Json(SurveyResponse {
        success: true,
        report,
        radius: circle.radius_miles,
    }))
}

pub async fn score_provider(
    State(state): State<AppState>,
    ApiJson(practice): ApiJson<Practice>,
) -> Result<Json<ProviderScoreResponse>, ApiError> {
    if practice.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Practice name required"));
    }

    Ok(Json(ProviderScoreResponse {
        success: true,
        score: demographics::score_provider(&practice),
        timestamp: state.manager.now(),
    }))
}

pub async fn map_config(
    State(state): State<AppState>,
) -> Result<Json<MapConfigResponse>, ApiError> {
    let key = state
        .google_maps_api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(ApiError::NotConfigured("Google Maps API key"))?;

    Ok(Json(MapConfigResponse {
        success: true,
        google_maps_api_key: key.to_string(),
    }))
}

// ========== Router ==========

pub fn territory_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/territories",
            get(list_territories)
                .post(lock_territory)
                .put(hold_territory)
                .delete(release_territory),
        )
        .route("/territories/check", post(check_territory))
        .route("/territories/geojson", get(territories_geojson))
        .route("/demographics", post(survey_demographics))
        .route("/providers/score", post(score_provider))
        .route("/config", get(map_config))
        .with_state(state)
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", territory_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use chrono::{Duration, TimeZone};
    use demographics::{CensusClient, ZipLocator};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use territory_lock::{InMemoryStore, LockConfig, LogNotifier, ManualClock};
    use tower::ServiceExt;

    fn state_with_key(key: Option<&str>) -> (AppState, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 15, 0, 0).unwrap(),
        ));
        let manager = TerritoryManager::new(
            Arc::new(InMemoryStore::new()),
            clock.clone(),
            Arc::new(LogNotifier),
            LockConfig::default(),
        );
        let demographics = DemographicsService::new(
            ZipLocator::new(None).unwrap(),
            CensusClient::new("http://127.0.0.1:9/acs5", None).unwrap(),
        );
        let state = AppState {
            manager: Arc::new(manager),
            demographics: Arc::new(demographics),
            google_maps_api_key: key.map(str::to_string),
        };
        (state, clock)
    }

    fn test_app() -> Router {
        app(state_with_key(None).0)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn smile_atlanta() -> Value {
        json!({
            "lat": 33.8488,
            "lng": -84.3877,
            "radius": 10,
            "practice": "Smile Atlanta",
            "practiceAddress": "3200 Peachtree Rd NE",
            "rep": "Jordan Lee",
            "repEmail": "jordan@example.com"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&test_app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_lock_then_list() {
        let app = test_app();

        let (status, body) = send(&app, Method::POST, "/api/v1/territories", Some(smile_atlanta())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Territory locked successfully for Smile Atlanta");
        assert_eq!(body["lockDate"], body["territory"]["createdAt"]);
        let id = body["territory"]["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("territory_"));

        let (status, listing) = send(&app, Method::GET, "/api/v1/territories", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listing["success"], true);
        assert_eq!(listing["availableCount"], 7);
        assert_eq!(listing["held"].as_array().unwrap().len(), 0);

        let locked = &listing["locked"][0];
        assert_eq!(locked, &body["territory"]);
        assert_eq!(locked["status"], "ACTIVE");
        assert_eq!(locked["lat"], 33.8488);
        assert_eq!(locked["practiceAddress"], "3200 Peachtree Rd NE");
    }

    #[tokio::test]
    async fn test_overlapping_lock_is_rejected() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/territories", Some(smile_atlanta())).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/territories",
            Some(json!({
                "lat": 33.7490, "lng": -84.3880, "radius": 10,
                "practice": "Downtown Dental", "rep": "Sam Rivera"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Territory conflict detected");
        assert_eq!(body["conflict"]["practice"], "Smile Atlanta");
        assert_eq!(body["conflict"]["type"], "LOCKED");
        let distance = body["conflict"]["distance"].as_f64().unwrap();
        let min_required = body["conflict"]["minRequired"].as_f64().unwrap();
        assert!(distance < min_required);
    }

    #[tokio::test]
    async fn test_missing_fields_are_listed() {
        let (status, body) = send(
            &test_app(),
            Method::POST,
            "/api/v1/territories",
            Some(json!({ "radius": 5, "practice": "Smile Atlanta" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: lat, lng, rep");
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let app = test_app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/territories")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &test_app(),
            Method::POST,
            "/api/v1/territories",
            Some(json!({ "lat": "north", "lng": 1.0, "radius": 5, "practice": "p", "rep": "r" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates() {
        let mut claim = smile_atlanta();
        claim["lat"] = json!(95.0);
        let (status, _) = send(&test_app(), Method::POST, "/api/v1/territories", Some(claim)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_hold_and_hold_again() {
        let app = test_app();

        let (status, body) = send(&app, Method::PUT, "/api/v1/territories", Some(smile_atlanta())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Territory held for 48 hours");
        assert_eq!(body["timeRemaining"], "48:00:00");
        assert_eq!(body["expiresAt"], body["hold"]["expiresAt"]);
        assert!(body["hold"]["id"].as_str().unwrap().starts_with("hold_"));

        let (status, again) = send(&app, Method::PUT, "/api/v1/territories", Some(smile_atlanta())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(again["error"], "Territory already on hold");
        assert_eq!(again["holdExpires"], body["expiresAt"]);
        assert_eq!(again["holdId"], body["hold"]["id"]);
    }

    #[tokio::test]
    async fn test_lock_supersedes_hold_at_same_site() {
        let app = test_app();
        send(&app, Method::PUT, "/api/v1/territories", Some(smile_atlanta())).await;

        let (status, _) = send(&app, Method::POST, "/api/v1/territories", Some(smile_atlanta())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, listing) = send(&app, Method::GET, "/api/v1/territories", None).await;
        assert_eq!(listing["locked"].as_array().unwrap().len(), 1);
        assert_eq!(listing["held"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_expired_hold_frees_the_site() {
        let (state, clock) = state_with_key(None);
        let app = app(state);
        let claim = json!({
            "lat": 34.0, "lng": -84.0, "radius": 5,
            "practice": "North Fulton Dental", "rep": "Avery Kim"
        });

        let (status, _) = send(&app, Method::PUT, "/api/v1/territories", Some(claim.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        clock.advance(Duration::hours(48) + Duration::seconds(1));

        let (_, listing) = send(&app, Method::GET, "/api/v1/territories", None).await;
        assert_eq!(listing["held"].as_array().unwrap().len(), 0);

        let mut other = claim;
        other["practice"] = json!("Roswell Smiles");
        let (status, _) = send(&app, Method::POST, "/api/v1/territories", Some(other)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_release_requires_exactly_one_id() {
        let app = test_app();

        let (status, body) = send(&app, Method::DELETE, "/api/v1/territories", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Must specify territoryId or holdId");

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/api/v1/territories",
            Some(json!({ "territoryId": "territory_a", "holdId": "hold_b" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_release_lock() {
        let app = test_app();
        let (_, created) = send(&app, Method::POST, "/api/v1/territories", Some(smile_atlanta())).await;
        let id = created["territory"]["id"].clone();

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/api/v1/territories",
            Some(json!({ "territoryId": id, "reason": "Practice closed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["released"], true);
        assert_eq!(body["message"], "Territory lock released");
        assert_eq!(body["record"]["status"], "RELEASED");

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/api/v1/territories",
            Some(json!({ "territoryId": id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["released"], false);
        assert!(body.get("record").is_none());

        let (_, listing) = send(&app, Method::GET, "/api/v1/territories", None).await;
        assert_eq!(listing["locked"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_release_hold() {
        let app = test_app();
        let (_, created) = send(&app, Method::PUT, "/api/v1/territories", Some(smile_atlanta())).await;

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/api/v1/territories",
            Some(json!({ "holdId": created["hold"]["id"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Territory hold released");
    }

    #[tokio::test]
    async fn test_check_availability() {
        let app = test_app();
        let area = json!({ "lat": 33.7490, "lng": -84.3880, "radius": 10 });

        let (status, body) = send(&app, Method::POST, "/api/v1/territories/check", Some(area.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);
        assert!(body["conflict"].is_null());

        send(&app, Method::POST, "/api/v1/territories", Some(smile_atlanta())).await;

        let (_, body) = send(&app, Method::POST, "/api/v1/territories/check", Some(area)).await;
        assert_eq!(body["available"], false);
        assert_eq!(body["conflict"]["practice"], "Smile Atlanta");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/territories/check",
            Some(json!({ "lat": 33.7 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_geojson_overlay() {
        let app = test_app();
        send(&app, Method::POST, "/api/v1/territories", Some(smile_atlanta())).await;
        send(
            &app,
            Method::PUT,
            "/api/v1/territories",
            Some(json!({
                "lat": 25.77, "lng": -80.19, "radius": 3,
                "practice": "Brickell Dental", "rep": "Riley Cruz"
            })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/v1/territories/geojson", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "FeatureCollection");

        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["geometry"]["coordinates"], json!([-84.3877, 33.8488]));
        assert_eq!(features[0]["properties"]["kind"], "locked");
        assert_eq!(features[1]["properties"]["kind"], "held");
        assert_eq!(features[1]["properties"]["radiusMiles"], 3.0);
    }

    #[tokio::test]
    async fn test_map_config() {
        let (status, body) = send(&test_app(), Method::GET, "/api/v1/config", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("not configured"));

        let app = app(state_with_key(Some("browser-key")).0);
        let (status, body) = send(&app, Method::GET, "/api/v1/config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["googleMapsApiKey"], "browser-key");
    }

    #[tokio::test]
    async fn test_demographics_validates_area() {
        let (status, body) = send(
            &test_app(),
            Method::POST,
            "/api/v1/demographics",
            Some(json!({ "lat": 33.8488, "lng": -84.3877 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: radius");
    }

    #[tokio::test]
    async fn test_provider_score() {
        let app = test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/providers/score",
            Some(json!({
                "name": "Peachtree Orthodontics",
                "address": "3200 Peachtree Rd NE, Suite 100",
                "phone": "(404) 555-0100"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["isProvider"], true);
        assert_eq!(body["confidence"], "high");
        assert_eq!(body["details"]["totalScore"], 75);
        assert_eq!(body["details"]["factors"]["specialization"], 30);
        assert_eq!(body["timestamp"], "2026-03-02T15:00:00Z");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/providers/score",
            Some(json!({ "name": "Bob's Family Dentistry" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isProvider"], false);
        assert_eq!(body["confidence"], "low");
    }

    #[tokio::test]
    async fn test_provider_score_requires_name() {
        for body in [json!({ "address": "12 Elm St" }), json!({ "name": "  " })] {
            let (status, body) =
                send(&test_app(), Method::POST, "/api/v1/providers/score", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Practice name required");
        }
    }

    #[test]
    fn test_format_remaining() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 15, 0, 0).unwrap();
        assert_eq!(format_remaining(now + Duration::hours(48), now), "48:00:00");
        assert_eq!(
            format_remaining(now + Duration::seconds(3723), now),
            "01:02:03"
        );
        assert_eq!(format_remaining(now - Duration::seconds(5), now), "00:00:00");
    }
}
