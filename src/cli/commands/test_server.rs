//! In-process fake of the platform API for command tests.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::cli::commands::CommandContext;
use crate::config::Config;

pub const TEST_TOKEN: &str = "test-token";

type Params = Query<HashMap<String, String>>;

#[derive(Clone, Default)]
pub struct FakePlatform {
    pub favorites: Arc<Mutex<HashSet<String>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TEST_TOKEN))
}

/// Apply `$search` over `displayName` then `$skip`/`$top`.
fn paged(items: Vec<Value>, params: &HashMap<String, String>) -> Vec<Value> {
    let search = params.get("$search").map(|s| s.to_lowercase());
    let skip = params.get("$skip").and_then(|s| s.parse().ok()).unwrap_or(0);
    let top = params.get("$top").and_then(|s| s.parse().ok()).unwrap_or(100);
    items
        .into_iter()
        .filter(|item| match &search {
            Some(s) => item["displayName"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(s)),
            None => true,
        })
        .skip(skip)
        .take(top)
        .collect()
}

fn listing(
    headers: &HeaderMap,
    field: &str,
    items: Vec<Value>,
    params: &HashMap<String, String>,
) -> Response {
    if !authorized(headers) {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    }
    let mut body = serde_json::Map::new();
    body.insert(field.to_string(), Value::Array(paged(items, params)));
    Json(Value::Object(body)).into_response()
}

fn imodels_of(itwin: &str) -> Vec<Value> {
    if itwin != "twin-1" {
        return Vec::new();
    }
    vec![
        json!({ "id": "m1", "displayName": "Bridge Deck", "state": "initialized", "createdDateTime": "2024-02-10T08:15:00Z", "description": "Main span" }),
        json!({ "id": "m2", "displayName": "Abutment", "state": "initialized", "createdDateTime": "2023-06-01T12:00:00Z" }),
        json!({ "id": "m3", "displayName": "Deck Drainage", "state": "notInitialized", "createdDateTime": "2024-05-20T09:30:00Z" }),
    ]
}

fn itwins() -> Vec<Value> {
    vec![
        json!({ "id": "t1", "displayName": "Harbour Crossing", "number": "HC-01", "subClass": "Project", "status": "Active" }),
        json!({ "id": "t2", "displayName": "Airport Expansion", "number": "AE-07", "subClass": "Project", "status": "Active" }),
        json!({ "id": "t3", "displayName": "Ring Road", "number": "RR-12", "subClass": "Project", "status": "Inactive" }),
    ]
}

async fn list_imodels(headers: HeaderMap, Query(params): Params) -> Response {
    let itwin = params.get("iTwinId").cloned().unwrap_or_default();
    listing(&headers, "iModels", imodels_of(&itwin), &params)
}

async fn list_itwins(headers: HeaderMap, Query(params): Params) -> Response {
    listing(&headers, "iTwins", itwins(), &params)
}

async fn list_favorite_itwins(
    State(platform): State<FakePlatform>,
    headers: HeaderMap,
    Query(params): Params,
) -> Response {
    let favorites = platform.favorites.lock().unwrap().clone();
    let items = itwins()
        .into_iter()
        .filter(|t| t["id"].as_str().is_some_and(|id| favorites.contains(id)))
        .collect();
    listing(&headers, "iTwins", items, &params)
}

async fn list_projects(headers: HeaderMap, Query(params): Params) -> Response {
    let projects = vec![
        json!({ "id": "p1", "displayName": "Tunnel Retrofit", "projectNumber": "TR-2", "industry": "Rail", "registrationDateTime": "2022-03-01T00:00:00Z" }),
        json!({ "id": "p2", "displayName": "bridge survey", "projectNumber": "BS-9", "industry": "Roads", "registrationDateTime": "2021-11-15T00:00:00Z" }),
        json!({ "id": "p3", "displayName": "Bridge Widening", "projectNumber": "BW-4", "registrationDateTime": "2023-07-04T00:00:00Z" }),
    ];
    // Projects are searched client-side; the fake ignores `$search`
    let mut params = params;
    params.remove("$search");
    listing(&headers, "projects", projects, &params)
}

async fn list_named_versions(
    headers: HeaderMap,
    Path(imodel): Path<String>,
    Query(params): Params,
) -> Response {
    let versions = if imodel == "m1" {
        vec![
            json!({ "id": "v1", "displayName": "Design freeze", "changesetIndex": 12, "createdDateTime": "2024-03-01T10:00:00Z" }),
            json!({ "id": "v2", "displayName": "Tender issue", "changesetIndex": 40, "createdDateTime": "2024-04-11T10:00:00Z" }),
        ]
    } else {
        Vec::new()
    };
    listing(&headers, "namedVersions", versions, &params)
}

async fn list_changesets(
    headers: HeaderMap,
    Path(imodel): Path<String>,
    Query(params): Params,
) -> Response {
    let changesets = if imodel == "m1" {
        (1..=5)
            .map(|i| json!({ "id": format!("cs{}", i), "index": i, "description": format!("change {}", i), "pushDateTime": format!("2024-01-0{}T00:00:00Z", i) }))
            .collect()
    } else {
        Vec::new()
    };
    listing(&headers, "changesets", changesets, &params)
}

async fn thumbnail(headers: HeaderMap, Path(imodel): Path<String>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if imodel == "m1" {
        vec![0x89u8, b'P', b'N', b'G'].into_response()
    } else {
        (StatusCode::NOT_FOUND, "thumbnail not found").into_response()
    }
}

async fn add_favorite(
    State(platform): State<FakePlatform>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    platform.favorites.lock().unwrap().insert(id);
    StatusCode::OK
}

async fn remove_favorite(
    State(platform): State<FakePlatform>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    platform.favorites.lock().unwrap().remove(&id);
    StatusCode::NO_CONTENT
}

/// Spawn the fake platform and return its URL
pub async fn spawn_test_server(platform: FakePlatform) -> (String, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route("/imodels", get(list_imodels))
        .route("/imodels/{id}/namedversions", get(list_named_versions))
        .route("/imodels/{id}/changesets", get(list_changesets))
        .route("/imodels/{id}/thumbnail", get(thumbnail))
        .route("/itwins", get(list_itwins))
        .route("/itwins/favorites", get(list_favorite_itwins))
        .route("/itwins/favorites/{id}", post(add_favorite).delete(remove_favorite))
        .route("/projects", get(list_projects))
        .with_state(platform);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (url, handle)
}

/// Context against `url` with the test token and the given page size
pub fn context(url: &str, token: Option<&str>, page_size: usize) -> CommandContext {
    let config = Config::default()
        .with_api_url(Some(url.to_string()))
        .with_access_token(token.map(str::to_string))
        .with_page_size(Some(page_size));
    CommandContext::new(config)
}
