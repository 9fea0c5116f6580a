//! Shared test helpers: in-memory sources and an in-process fake API server

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use dogedex_collection::models::{CatalogItem, OwnershipRecord};
use dogedex_collection::types::{CatalogSource, DogService, OwnershipSource, SourceError};
use dogedex_common::api::{
    AddDogToUserDto, ApiEnvelope, DefaultResponse, DogData, DogDto, DogListData,
    AUTH_TOKEN_HEADER,
};
use dogedex_common::config::ClientConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// In-memory sources
// ============================================================================

/// Observations of one fake fetch
#[derive(Default)]
pub struct FetchProbe {
    pub calls: AtomicUsize,
    pub completed: AtomicBool,
    pub dropped_early: AtomicBool,
}

/// Sets `dropped_early` unless disarmed before drop
struct DropGuard {
    probe: Arc<FetchProbe>,
    armed: bool,
}

impl Drop for DropGuard {
    fn drop(&mut self) {
        if self.armed {
            self.probe.dropped_early.store(true, Ordering::SeqCst);
        }
    }
}

/// Behaviour of a fake fetch
#[derive(Clone)]
pub enum Outcome<T> {
    Return(Result<Vec<T>, SourceError>),
    Panic,
}

/// Catalog or ownership source returning a canned outcome after a delay
pub struct FakeSource<T> {
    outcome: Outcome<T>,
    delay: Duration,
    pub probe: Arc<FetchProbe>,
}

impl<T: Clone + Send + Sync> FakeSource<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self::with_outcome(Outcome::Return(Ok(items)))
    }

    pub fn failing(error: SourceError) -> Self {
        Self::with_outcome(Outcome::Return(Err(error)))
    }

    pub fn panicking() -> Self {
        Self::with_outcome(Outcome::Panic)
    }

    pub fn with_outcome(outcome: Outcome<T>) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            probe: Arc::new(FetchProbe::default()),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn run(&self) -> Result<Vec<T>, SourceError> {
        self.probe.calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = DropGuard {
            probe: Arc::clone(&self.probe),
            armed: true,
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        guard.armed = false;
        self.probe.completed.store(true, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Return(result) => result.clone(),
            Outcome::Panic => panic!("fake source panicked"),
        }
    }
}

#[async_trait]
impl CatalogSource for FakeSource<CatalogItem> {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, SourceError> {
        self.run().await
    }
}

#[async_trait]
impl OwnershipSource for FakeSource<OwnershipRecord> {
    async fn fetch_owned(&self) -> Result<Vec<OwnershipRecord>, SourceError> {
        self.run().await
    }
}

/// Single-item service with canned answers
pub struct FakeDogService {
    pub added: Mutex<Vec<i64>>,
    pub fail: bool,
    pub known: HashMap<String, CatalogItem>,
}

impl FakeDogService {
    pub fn new(fail: bool) -> Self {
        let mut known = HashMap::new();
        known.insert("n02085620-chihuahua".to_string(), CatalogItem::new(1, 2, "Chihuahua"));
        Self {
            added: Mutex::new(Vec::new()),
            fail,
            known,
        }
    }
}

#[async_trait]
impl DogService for FakeDogService {
    async fn add_to_collection(&self, item_id: i64) -> Result<(), SourceError> {
        if self.fail {
            return Err(SourceError::Network("unreachable".to_string()));
        }
        self.added.lock().unwrap().push(item_id);
        Ok(())
    }

    async fn find_by_ml_id(&self, ml_id: &str) -> Result<CatalogItem, SourceError> {
        self.known
            .get(ml_id)
            .cloned()
            .ok_or_else(|| SourceError::Rejected("error_getting_dog_by_ml_id".to_string()))
    }
}

/// Two-item catalog: "FakeDog1" (id 0) and "FakeDog2" (id 1)
pub fn two_dog_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(0, 1, "FakeDog1"),
        CatalogItem::new(1, 2, "FakeDog2").with_category("Toy"),
    ]
}

// ============================================================================
// Fake HTTP API
// ============================================================================

/// State served by the fake API
#[derive(Clone)]
pub struct FakeApiState {
    pub catalog: Arc<Vec<DogDto>>,
    pub owned_ids: Arc<Mutex<Vec<i64>>>,
    pub token: String,
    /// Status code forced on the catalog endpoint (200 = normal)
    pub catalog_status: StatusCode,
}

impl FakeApiState {
    pub fn new(catalog: Vec<DogDto>, owned_ids: Vec<i64>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            owned_ids: Arc::new(Mutex::new(owned_ids)),
            token: "secret-token".to_string(),
            catalog_status: StatusCode::OK,
        }
    }
}

/// Running fake API
pub struct FakeApi {
    pub base_url: String,
    pub state: FakeApiState,
}

impl FakeApi {
    pub fn client_config(&self, auth_token: Option<&str>) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            auth_token: auth_token.map(str::to_string),
            timeout: Duration::from_secs(5),
            log_level: "debug".to_string(),
        }
    }
}

pub fn dog_dto(id: i64, index: u32, name: &str) -> DogDto {
    DogDto {
        id,
        index,
        name: name.to_string(),
        dog_type: "Terrier".to_string(),
        image_url: format!("https://img.example/{}.png", id),
        temperament: "Alert".to_string(),
        ..Default::default()
    }
}

fn has_token(headers: &HeaderMap, state: &FakeApiState) -> bool {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == state.token)
        .unwrap_or(false)
}

async fn get_all_dogs(
    State(state): State<FakeApiState>,
) -> (StatusCode, Json<ApiEnvelope<DogListData>>) {
    let dogs = if state.catalog_status.is_success() {
        state.catalog.as_ref().clone()
    } else {
        Vec::new()
    };
    (
        state.catalog_status,
        Json(ApiEnvelope::success(DogListData { dogs })),
    )
}

async fn get_user_dogs(
    State(state): State<FakeApiState>,
    headers: HeaderMap,
) -> (StatusCode, Json<ApiEnvelope<DogListData>>) {
    if !has_token(&headers, &state) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiEnvelope::rejected("unauthorized", DogListData::default())),
        );
    }
    let owned = state.owned_ids.lock().unwrap().clone();
    let dogs = state
        .catalog
        .iter()
        .filter(|dog| owned.contains(&dog.id))
        .cloned()
        .collect();
    (StatusCode::OK, Json(ApiEnvelope::success(DogListData { dogs })))
}

async fn add_dog_to_user(
    State(state): State<FakeApiState>,
    headers: HeaderMap,
    Json(body): Json<AddDogToUserDto>,
) -> Json<DefaultResponse> {
    if !has_token(&headers, &state) {
        return Json(DefaultResponse {
            message: "unauthorized".to_string(),
            is_success: false,
        });
    }
    if !state.catalog.iter().any(|dog| dog.id == body.dog_id) {
        return Json(DefaultResponse {
            message: "dog_not_found".to_string(),
            is_success: false,
        });
    }
    state.owned_ids.lock().unwrap().push(body.dog_id);
    Json(DefaultResponse {
        message: "success".to_string(),
        is_success: true,
    })
}

async fn find_dog_by_ml_id(
    State(state): State<FakeApiState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<ApiEnvelope<DogData>> {
    let wanted = params.get("ml_id").cloned().unwrap_or_default();
    // Labels are "<id>-<name>" in the fake
    let found = state
        .catalog
        .iter()
        .find(|dog| format!("{}-{}", dog.id, dog.name) == wanted)
        .cloned();

    match found {
        Some(dog) => Json(ApiEnvelope::success(DogData { dog })),
        None => Json(ApiEnvelope::rejected(
            "error_getting_dog_by_ml_id",
            DogData { dog: DogDto::default() },
        )),
    }
}

/// Start the fake API on an ephemeral port
pub async fn spawn_fake_api(state: FakeApiState) -> FakeApi {
    let app = Router::new()
        .route("/api/v1/dogs", get(get_all_dogs))
        .route("/api/v1/get_user_dogs", get(get_user_dogs))
        .route("/api/v1/add_dog_to_user", post(add_dog_to_user))
        .route("/api/v1/find_dog_by_ml_id", get(find_dog_by_ml_id))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().expect("Should have local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake API server failed");
    });

    FakeApi {
        base_url: format!("http://{}/api/v1", addr),
        state,
    }
}
