use std::{net::SocketAddr, path::PathBuf};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use caravan::{
    config::AppConfig,
    db::{init_pool, run_migrations, DbPool},
    routes::create_router,
    services::{catalog::CatalogService, storage::StorageService},
    state::AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    db: DbPool,
    _root: TempDir,
}

async fn test_app() -> TestApp {
    let root = TempDir::new().expect("temp dir");
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let config = AppConfig {
        database_url: format!(
            "sqlite://{}",
            root.path().join("http.sqlite").to_string_lossy()
        ),
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        data_root: manifest_dir.join("data"),
        static_root: manifest_dir.join("static"),
        cookie_secret: "http-test-cookie-secret".into(),
    };
    let db = init_pool(&config.database_url).await.expect("pool");
    run_migrations(&db).await.expect("migrations");
    let catalog = CatalogService::load(&config.data_root).await;
    let storage = StorageService::new(db.clone());
    let state = AppState::new(config, db.clone(), catalog, storage);
    TestApp {
        router: create_router(state),
        db,
        _root: root,
    }
}

impl TestApp {
    async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response")
    }

    async fn post(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::from(form.to_string())).expect("request"))
            .await
            .expect("response")
    }
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn draft_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("caravan_draft="))
        .and_then(|value| value.split(';').next())
        .expect("draft cookie")
        .to_string()
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_string()
}

#[tokio::test]
async fn landing_page_lists_featured_trips() {
    let app = test_app().await;
    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Featured Road Trips"));
    assert!(body.contains("/trips/northern-michigan"));
    assert!(body.contains("/trips/southern-california"));
}

#[tokio::test]
async fn trip_tabs_fall_back_to_coming_soon() {
    let app = test_app().await;
    let body = body_text(app.get("/trips/washington?tab=restaurants").await).await;
    assert!(body.contains("Coming Soon"));

    let body = body_text(app.get("/trips/northern-michigan?tab=restaurants").await).await;
    assert!(!body.contains("Coming Soon"));
}

#[tokio::test]
async fn campground_filter_reports_empty_locations() {
    let app = test_app().await;
    let body = body_text(app.get("/trips/arizona?type=lodging").await).await;
    assert!(body.contains("No campgrounds available for this selection."));
    assert!(body.contains("Desert Oasis Resort"));
    assert!(!body.contains("Grand Canyon South Rim Campground"));
}

#[tokio::test]
async fn unknown_pages_render_not_found() {
    let app = test_app().await;
    assert_eq!(app.get("/trips/atlantis").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.get("/campgrounds/atlantis-tent-0").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.get("/no/such/page").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn campground_detail_shows_the_record() {
    let app = test_app().await;
    let response = app.get("/campgrounds/mountRainier-lodging-1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Rainier View Lodge"));
    assert!(body.contains("/trips/washington"));
}

#[tokio::test]
async fn location_campgrounds_api_returns_both_kinds() {
    let app = test_app().await;
    let body = body_text(app.get("/api/locations/traverseCity/campgrounds").await).await;
    let json: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(json["tent"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["lodging"].as_array().map(Vec::len), Some(1));

    let body = body_text(app.get("/api/locations/atlantis/campgrounds").await).await;
    let json: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(json["tent"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn missing_custom_trip_shows_trip_not_found() {
    let app = test_app().await;
    let response = app.get("/build-trip/result/123").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Trip Not Found"));

    let response = app.get("/api/custom-trips/not-a-number").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn details_without_destinations_are_rejected() {
    let app = test_app().await;
    let response = app
        .post("/build-trip/region", "region=arizona", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = draft_cookie(&response);

    let response = app
        .post(
            "/build-trip/details",
            "trip_length=5&accommodation=all&action=continue",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Select at least one destination to continue."));
}

#[tokio::test]
async fn wizard_builds_and_stores_a_custom_trip() {
    let app = test_app().await;

    let response = app
        .post("/build-trip/region", "region=northern-michigan", None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/build-trip");
    let cookie = draft_cookie(&response);

    let response = app
        .post(
            "/build-trip/details",
            "trip_length=8&accommodation=all&location=traverseCity&location=picturedRocks&action=continue",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = draft_cookie(&response);

    let page = app
        .router
        .clone()
        .oneshot(
            Request::get("/build-trip")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let body = body_text(page).await;
    assert!(body.contains("Twelvemile Beach Campground"));
    assert!(!body.contains("Straits State Park"));

    let response = app
        .post(
            "/build-trip/campgrounds/toggle",
            "campground=traverseCity-tent-0",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = draft_cookie(&response);

    let response = app
        .post("/build-trip/campgrounds", "action=continue", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = draft_cookie(&response);

    let response = app.post("/build-trip/create", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let result_path = location(&response);
    assert!(result_path.starts_with("/build-trip/result/"));

    let response = app.get(&result_path).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Traverse City → Pictured Rocks"));
    assert!(body.contains("Traverse City State Forest Campground"));

    let id = result_path.trim_start_matches("/build-trip/result/");
    let body = body_text(app.get(&format!("/api/custom-trips/{id}")).await).await;
    let json: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(json["id"], serde_json::Value::String(id.to_string()));
    assert_eq!(json["tripLength"], 8);
    assert_eq!(json["region"], "northern-michigan");
    assert_eq!(json["campgrounds"][0]["type"], "tent");
}

#[tokio::test]
async fn unreadable_custom_trip_shows_trip_not_found() {
    let app = test_app().await;
    sqlx::query(
        "INSERT INTO custom_trips (storage_key, trip_id, document, created_at) VALUES ('customTrip-555', '555', 'not json', '2024-10-19T00:00:00+00:00')",
    )
    .execute(&app.db)
    .await
    .expect("insert unreadable document");

    let response = app.get("/build-trip/result/555").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Trip Not Found"));

    let response = app.get("/api/custom-trips/555").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unparsable_trip_length_keeps_the_current_length() {
    let app = test_app().await;
    let response = app.post("/build-trip/region", "region=arizona", None).await;
    let cookie = draft_cookie(&response);

    let response = app
        .post(
            "/build-trip/details",
            "trip_length=abc&accommodation=all&action=continue",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("Select at least one destination to continue."));
    assert!(body.contains("Trip length (days): 7"));

    let response = app
        .post(
            "/build-trip/details",
            "accommodation=all&location=sedona&action=back",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn negative_trip_length_is_clamped() {
    let app = test_app().await;
    let response = app.post("/build-trip/region", "region=arizona", None).await;
    let cookie = draft_cookie(&response);

    let response = app
        .post(
            "/build-trip/details",
            "trip_length=-1&accommodation=all&action=continue",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Trip length (days): 3"));
}

#[tokio::test]
async fn campground_api_uses_camel_case_keys() {
    let app = test_app().await;
    let body = body_text(app.get("/api/locations/mountRainier/campgrounds").await).await;
    let json: serde_json::Value = serde_json::from_str(&body).expect("json");
    let lodge = &json["lodging"][1];
    assert_eq!(lodge["title"], "Rainier View Lodge");
    assert!(lodge["cityAndState"].is_string());
    assert!(lodge["imageUrls"].is_array());
    assert!(lodge.get("city_and_state").is_none());
}
