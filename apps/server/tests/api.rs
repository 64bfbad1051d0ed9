//! End-to-end tests driving the router in-process against an in-memory
//! database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shoelab_db::{Database, DbConfig};
use shoelab_server::config::ServerConfig;
use shoelab_server::{build_router, AppState};

async fn app_with(config: ServerConfig) -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    build_router(AppState::new(db, config))
}

async fn app() -> Router {
    app_with(ServerConfig::default()).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, value)
}

fn reference_build() -> Value {
    json!({
        "shoeName": "X",
        "sizeId": 9,
        "brandId": 1,
        "typeId": 10,
        "colorId": 20,
        "cushionId": 32,
        "cushionColorId": 41,
        "laceColorId": 51
    })
}

// =============================================================================
// Health & Catalog
// =============================================================================

#[tokio::test]
async fn healthz_returns_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn healthz_reports_unreachable_database() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let app = build_router(AppState::new(db.clone(), ServerConfig::default()));
    db.close().await;

    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, Value::String("unavailable".to_string()));
}

#[tokio::test]
async fn debug_db_reports_table_state() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/debug/db", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "tableExists": true, "shoesCount": 0 }));
}

#[tokio::test]
async fn catalog_lists_all_families() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["basePrice"], 60);
    assert_eq!(body["size"].as_array().unwrap().len(), 7);
    assert_eq!(body["brand"][0]["name"], "SoleTech");
    assert_eq!(body["brand"][0]["priceDelta"], 40);
    assert!(body.get("type").is_some());
    assert!(body.get("laceColor").is_some());
}

// =============================================================================
// Quote
// =============================================================================

#[tokio::test]
async fn quote_reference_build() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/api/quote", Some(reference_build())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 158);
    assert_eq!(body["totalLabel"], "$158.00");
    assert_eq!(body["violations"], json!([]));
    assert_eq!(body["submittable"], true);
    assert_eq!(body["explanation"], "No issues found.");
}

#[tokio::test]
async fn quote_without_body_is_empty_config() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/api/quote", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 60);
    assert_eq!(body["violations"][0]["code"], "EMPTY_CONFIG");
    assert_eq!(body["submittable"], false);
}

#[tokio::test]
async fn quote_reports_warning_and_error() {
    let app = app().await;
    let mut draft = reference_build();
    draft["colorId"] = json!(22);
    draft["laceColorId"] = json!(52);

    let (_, body) = send(&app, Method::POST, "/api/quote", Some(draft)).await;
    let codes: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["NEON_WHITE_CLASH", "BRAND_COLOR_BLOCK"]);
    assert_eq!(body["violations"][0]["severity"], "warning");
    assert_eq!(body["submittable"], false);
}

#[tokio::test]
async fn quote_accepts_string_ids() {
    let app = app().await;
    let draft = json!({ "brandId": "2", "typeId": "12" });
    let (status, body) = send(&app, Method::POST, "/api/quote", Some(draft)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 60 + 30 + 15);
}

#[tokio::test]
async fn quote_rejects_malformed_json() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/quote")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Shoes CRUD
// =============================================================================

#[tokio::test]
async fn create_then_fetch() {
    let app = app().await;

    let (status, created) = send(&app, Method::POST, "/api/shoes", Some(reference_build())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["shoeName"], "X");
    assert_eq!(created["price"], 158);
    assert_eq!(created["priceLabel"], "$158.00");

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/shoes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, list) = send(&app, Method::GET, "/api/shoes", None).await;
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn create_reports_missing_fields_in_order() {
    let app = app().await;
    let draft = json!({ "shoeName": "", "brandId": 1, "typeId": 10, "cushionId": 32, "cushionColorId": 41 });

    let (status, body) = send(&app, Method::POST, "/api/shoes", Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["message"],
        "Missing required fields: shoeName, sizeId, colorId, laceColorId"
    );
}

#[tokio::test]
async fn create_with_empty_body_lists_every_field() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/api/shoes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Missing required fields: shoeName, sizeId, brandId, typeId, colorId, cushionId, cushionColorId, laceColorId"
    );
}

#[tokio::test]
async fn create_rejects_blocking_violation() {
    let app = app().await;
    let mut draft = reference_build();
    draft["colorId"] = json!(22);

    let (status, body) = send(&app, Method::POST, "/api/shoes", Some(draft)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "RULE_VIOLATION");
    assert_eq!(body["violations"][0]["code"], "BRAND_COLOR_BLOCK");

    let (_, list) = send(&app, Method::GET, "/api/shoes", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn create_allows_warnings() {
    let app = app().await;
    let mut draft = reference_build();
    draft["laceColorId"] = json!(52);

    let (status, _) = send(&app, Method::POST, "/api/shoes", Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn create_without_rule_enforcement() {
    let config = ServerConfig {
        enforce_rules: false,
        ..ServerConfig::default()
    };
    let app = app_with(config).await;
    let mut draft = reference_build();
    draft["sizeId"] = json!(62);

    let (status, body) = send(&app, Method::POST, "/api/shoes", Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sizeId"], 62);
}

#[tokio::test]
async fn get_unknown_shoe_is_404() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/shoes/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Shoe not found");
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/shoes/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn patch_updates_only_given_fields() {
    let app = app().await;
    let (_, created) = send(&app, Method::POST, "/api/shoes", Some(reference_build())).await;
    let uri = format!("/api/shoes/{}", created["id"]);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "shoeName": "Renamed", "laceColorId": "53" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["shoeName"], "Renamed");
    assert_eq!(updated["laceColorId"], 53);
    assert_eq!(updated["brandId"], 1);
    assert_eq!(updated["price"], 158 + 3);
}

#[tokio::test]
async fn patch_with_nothing_to_update() {
    let app = app().await;
    let (_, created) = send(&app, Method::POST, "/api/shoes", Some(reference_build())).await;
    let uri = format!("/api/shoes/{}", created["id"]);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No valid fields to update");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "unknown": 1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No valid fields to update");
}

#[tokio::test]
async fn patch_rejects_empty_name() {
    let app = app().await;
    let (_, created) = send(&app, Method::POST, "/api/shoes", Some(reference_build())).await;
    let uri = format!("/api/shoes/{}", created["id"]);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "shoeName": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: shoeName");
}

#[tokio::test]
async fn patch_validates_merged_configuration() {
    let app = app().await;
    let (_, created) = send(&app, Method::POST, "/api/shoes", Some(reference_build())).await;
    let uri = format!("/api/shoes/{}", created["id"]);

    // Foam Flex on a stored Runner: the patch alone looks harmless.
    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "cushionId": 33 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["violations"][0]["code"], "RUNNER_CUSHION");

    let (_, unchanged) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(unchanged["cushionId"], 32);
}

#[tokio::test]
async fn patch_unknown_shoe_is_404() {
    let app = app().await;
    let (status, _) = send(&app, Method::PATCH, "/api/shoes/77", Some(json!({ "sizeId": 8 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_missing() {
    let app = app().await;
    let (_, created) = send(&app, Method::POST, "/api/shoes", Some(reference_build())).await;
    let uri = format!("/api/shoes/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_prices_seeded_demo_row() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.shoes().seed_if_empty().await.unwrap();
    let app = build_router(AppState::new(db, ServerConfig::default()));

    let (status, list) = send(&app, Method::GET, "/api/shoes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["shoeName"], "My New Daily Runners");
    // Size 62 is not in the catalog and adds nothing.
    assert_eq!(list[0]["price"], 153);
}

#[tokio::test]
async fn price_labels_follow_configured_locale() {
    let config = ServerConfig {
        currency: "EUR".to_string(),
        locale: "de-DE".to_string(),
        ..ServerConfig::default()
    };
    let app = app_with(config).await;

    let (_, body) = send(&app, Method::POST, "/api/quote", Some(reference_build())).await;
    assert_eq!(body["totalLabel"], "158,00\u{a0}€");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_patches_cannot_combine_into_blocked_shoe() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("shoes.db")))
        .await
        .unwrap();
    let app = build_router(AppState::new(db.clone(), ServerConfig::default()));

    // SoleTech is harmless alone and Red is harmless alone; together they
    // are blocked, so exactly one of the two patches may win.
    for _ in 0..20 {
        let mut draft = reference_build();
        draft["brandId"] = json!(2);
        let (status, created) = send(&app, Method::POST, "/api/shoes", Some(draft)).await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/api/shoes/{}", created["id"]);

        let brand = {
            let (app, uri) = (app.clone(), uri.clone());
            tokio::spawn(async move {
                send(&app, Method::PATCH, &uri, Some(json!({ "brandId": 1 }))).await
            })
        };
        let color = {
            let (app, uri) = (app.clone(), uri.clone());
            tokio::spawn(async move {
                send(&app, Method::PATCH, &uri, Some(json!({ "colorId": 22 }))).await
            })
        };
        let (brand, color) = (brand.await.unwrap(), color.await.unwrap());

        let mut statuses = [brand.0.as_u16(), color.0.as_u16()];
        statuses.sort_unstable();
        assert_eq!(statuses, [200, 422]);

        let (_, stored) = send(&app, Method::GET, &uri, None).await;
        assert!(
            !(stored["brandId"] == 1 && stored["colorId"] == 22),
            "stored a blocked configuration: {}",
            stored
        );
    }

    db.close().await;
}

// =============================================================================
// CORS
// =============================================================================

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/shoes/1")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn cors_allows_only_configured_origins() {
    let config = ServerConfig {
        cors_origins: vec!["http://localhost:5173".to_string(), "bad\norigin".to_string()],
        ..ServerConfig::default()
    };
    let app = app_with(config).await;

    let allowed = app.clone().oneshot(preflight("http://localhost:5173")).await.unwrap();
    let allow_origin = allowed
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .unwrap();
    assert_eq!(allow_origin.to_str().unwrap(), "http://localhost:5173");

    let denied = app.oneshot(preflight("http://elsewhere.test")).await.unwrap();
    assert!(denied
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn cors_is_permissive_without_configured_origins() {
    let app = app().await;

    let response = app.oneshot(preflight("http://elsewhere.test")).await.unwrap();
    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .unwrap();
    assert_eq!(allow_origin.to_str().unwrap(), "*");
}
