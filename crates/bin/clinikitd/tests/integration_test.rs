//! End-to-end smoke tests for the full clinikitd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! role repository, real services, real module registry, real axum router)
//! and exercises the HTTP layer via `tower::ServiceExt::oneshot` — no TCP
//! port is bound.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use clinikit_adapter_http_axum::extract::ROLES_HEADER;
use clinikit_adapter_http_axum::router;
use clinikit_adapter_http_axum::state::AppState;
use clinikit_adapter_storage_sqlite_sqlx::{Config as DbConfig, SqliteRoleRepository};
use clinikit_app::module::TemplateModule;
use clinikit_app::ports::RoleRepository;
use clinikit_app::registry::ModuleRegistry;
use clinikit_app::services::role_service::RoleService;
use clinikit_domain::id::RoleId;
use clinikit_domain::manifest::Manifest;
use clinikit_domain::role::{PermissionEntry, Permissions, Role};
use clinikitd::config::Config;
use clinikitd::loader::ManifestLoadError;
use clinikitd::{StartupError, build_app};

fn manifest(id: &str, name: &str) -> Manifest {
    Manifest::from_value(json!({
        "moduleID": id,
        "moduleName": name,
        "cardDescription": {
            "title": name,
            "description": format!("{name} description"),
            "icon": "science",
            "iconColor": "text-blue-500"
        },
        "database": { "tableName": id }
    }))
    .expect("test manifest should be valid")
}

/// Build a fully-wired router backed by an in-memory `SQLite` database,
/// seeded with a `lab` role limited to the labs module and an `root` admin.
async fn app() -> axum::Router {
    let db = DbConfig {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let roles = SqliteRoleRepository::new(db.pool().clone());
    roles
        .create(Role {
            id: RoleId::new("lab").unwrap(),
            name: Some("Lab staff".to_string()),
            permissions: Permissions::Entries(vec![PermissionEntry::for_module("labs")]),
        })
        .await
        .unwrap();
    roles
        .create(Role {
            id: RoleId::new("root").unwrap(),
            name: None,
            permissions: Permissions::Admin,
        })
        .await
        .unwrap();

    let mut modules = ModuleRegistry::new();
    modules
        .register(TemplateModule::new(manifest("labs", "Labs"), roles.clone()))
        .unwrap();
    modules
        .register(TemplateModule::new(
            manifest("pharmacy", "Pharmacy"),
            roles.clone(),
        ))
        .unwrap();

    router::build(AppState::new(modules, RoleService::new(roles))).unwrap()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str, roles: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(roles) = roles {
        builder = builder.header(ROLES_HEADER, roles);
    }
    builder.body(Body::empty()).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app().await.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Dashboard and module pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_home_page_with_permitted_cards_only() {
    let resp = app().await.oneshot(get("/", Some("lab"))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("card-labs"));
    assert!(!body.contains("card-pharmacy"));
}

#[tokio::test]
async fn should_render_home_page_without_cards_when_no_roles_sent() {
    let resp = app().await.oneshot(get("/", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(!body.contains("card-labs"));
}

#[tokio::test]
async fn should_render_every_module_page_for_admin() {
    let app = app().await;
    for (uri, heading) in [
        ("/pharmacy", "Main Page"),
        ("/pharmacy/config", "Configuration Page"),
        ("/pharmacy/settings", "Settings Page"),
        ("/pharmacy/help", "Help Page"),
    ] {
        let resp = app.clone().oneshot(get(uri, Some("root"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        assert!(body_string(resp).await.contains(heading), "{uri}");
    }
}

#[tokio::test]
async fn should_list_manifest_on_help_page() {
    let resp = app()
        .await
        .oneshot(get("/labs/help", Some("lab")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("moduleID: labs"));
    assert!(body.contains("moduleName: Labs"));
}

#[tokio::test]
async fn should_forbid_module_page_for_unrelated_role() {
    let resp = app()
        .await
        .oneshot(get("/pharmacy/help", Some("lab")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_skip_unknown_roles_when_checking_access() {
    let resp = app()
        .await
        .oneshot(get("/labs", Some("ghost, lab")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Role administration + permission API
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_role_crud_cycle() {
    let app = app().await;

    // Create a role granting every module
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/roles")
                .header("content-type", "application/json")
                .header(ROLES_HEADER, "root")
                .body(Body::from(
                    json!({
                        "_id": "nurse",
                        "name": "Nurse",
                        "permissions": [{ "moduleID": "all" }]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Fetch it back
    let resp = app
        .clone()
        .oneshot(get("/api/roles/nurse", Some("root")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let role: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(role["_id"], "nurse");
    assert_eq!(role["permissions"], json!([{ "moduleID": "all" }]));

    // The wildcard grants pharmacy
    let resp = app
        .clone()
        .oneshot(get("/api/modules/pharmacy/permitted", Some("nurse")))
        .await
        .unwrap();
    let verdict: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(verdict["permitted"], true);

    // All three roles are listed
    let resp = app.clone().oneshot(get("/api/roles", Some("root"))).await.unwrap();
    let roles: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(roles.as_array().map(Vec::len), Some(3));

    // Delete
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/roles/nurse")
                .header(ROLES_HEADER, "root")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Gone, and no longer grants access
    let resp = app
        .clone()
        .oneshot(get("/api/roles/nurse", Some("root")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .oneshot(get("/pharmacy", Some("nurse")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_return_manifest_from_api() {
    let resp = app()
        .await
        .oneshot(get("/api/modules/labs", Some("lab")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let value: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(value["database"]["tableName"], "labs");
}

fn post_role(body: &Value, roles: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/roles")
        .header("content-type", "application/json");
    if let Some(roles) = roles {
        builder = builder.header(ROLES_HEADER, roles);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn should_not_let_anonymous_caller_mint_admin_role() {
    let app = app().await;
    let minted = json!({ "_id": "mine", "permissions": "admin" });

    let resp = app.clone().oneshot(post_role(&minted, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .clone()
        .oneshot(post_role(&minted, Some("lab")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The role was never stored, so it opens nothing
    let resp = app.oneshot(get("/pharmacy", Some("mine"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_hide_manifest_of_module_caller_cannot_access() {
    let resp = app()
        .await
        .oneshot(get("/api/modules/pharmacy", Some("lab")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Startup from configuration
// ---------------------------------------------------------------------------

fn config_with(manifests: Vec<PathBuf>) -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.modules.manifests = manifests;
    config
}

#[tokio::test]
async fn should_build_app_from_manifest_file() {
    let dir = std::env::temp_dir().join(format!("clinikitd-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("properties.json");
    std::fs::write(&path, Value::Object(manifest("radiology", "Radiology").raw().clone()).to_string())
        .unwrap();

    let app = build_app(&config_with(vec![path])).await.unwrap();

    // No roles seeded yet, so the page exists but is forbidden
    let resp = app.oneshot(get("/radiology", Some("lab"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_fail_startup_when_manifest_missing() {
    let result = build_app(&config_with(vec![PathBuf::from("missing/properties.json")])).await;

    assert!(matches!(
        result,
        Err(StartupError::Manifest(ManifestLoadError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn should_seed_bootstrap_admin_at_startup() {
    let mut config = config_with(vec![]);
    config.roles.bootstrap_admin = Some("root".to_string());
    let app = build_app(&config).await.unwrap();

    let resp = app
        .clone()
        .oneshot(post_role(
            &json!({ "_id": "lab", "permissions": [{ "moduleID": "labs" }] }),
            Some("root"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.oneshot(get("/api/roles", Some("root"))).await.unwrap();
    let roles: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(roles.as_array().map(Vec::len), Some(2));
}
