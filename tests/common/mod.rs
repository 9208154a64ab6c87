//! In-memory `PartStore` and request helpers shared by the router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use parts_api::{app_router, AppState, NewPart, Part, PartId, PartStore, StoreError, UpdateOutcome};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Part>,
    next_id: i64,
    calls: usize,
}

/// Mirrors the PostgreSQL store: ids ascend, updates with identical values report no change.
#[derive(Clone, Default)]
pub struct MemoryPartStore {
    inner: Arc<Mutex<Inner>>,
    failing: bool,
}

impl MemoryPartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails as if the pool timed out.
    pub fn failing() -> Self {
        MemoryPartStore {
            failing: true,
            ..Self::default()
        }
    }

    /// Number of store operations issued so far.
    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().calls
    }

    pub fn row(&self, id: i64) -> Option<Part> {
        self.inner.lock().unwrap().rows.get(&id).cloned()
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        if self.failing {
            return Err(StoreError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(inner)
    }
}

#[async_trait]
impl PartStore for MemoryPartStore {
    async fn list(&self) -> Result<Vec<Part>, StoreError> {
        let inner = self.enter()?;
        Ok(inner.rows.values().rev().cloned().collect())
    }

    async fn get(&self, id: PartId) -> Result<Option<Part>, StoreError> {
        let inner = self.enter()?;
        Ok(inner.rows.get(&id.get()).cloned())
    }

    async fn create(&self, part: &NewPart) -> Result<Part, StoreError> {
        let mut inner = self.enter()?;
        inner.next_id += 1;
        let id = PartId::new(inner.next_id);
        let now = chrono::Utc::now();
        let mut row = part.clone().into_part(id);
        row.created_at = Some(now);
        row.updated_at = Some(now);
        inner.rows.insert(id.get(), row.clone());
        Ok(row)
    }

    async fn update(&self, id: PartId, part: &NewPart) -> Result<UpdateOutcome, StoreError> {
        let mut inner = self.enter()?;
        let Some(existing) = inner.rows.get_mut(&id.get()) else {
            return Ok(UpdateOutcome::Missing);
        };
        if part.matches(existing) {
            return Ok(UpdateOutcome::Unchanged);
        }
        let created_at = existing.created_at;
        let mut row = part.clone().into_part(id);
        row.created_at = created_at;
        row.updated_at = Some(chrono::Utc::now());
        *existing = row.clone();
        Ok(UpdateOutcome::Updated(row))
    }

    async fn delete(&self, id: PartId) -> Result<bool, StoreError> {
        let mut inner = self.enter()?;
        Ok(inner.rows.remove(&id.get()).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.enter()?;
        Ok(())
    }
}

pub fn router(store: &MemoryPartStore) -> Router {
    router_with_static(store, "does-not-exist")
}

pub fn router_with_static(store: &MemoryPartStore, static_dir: impl AsRef<Path>) -> Router {
    app_router(AppState::new(store.clone()), static_dir)
}

/// Router over any store, without a frontend directory.
pub fn router_for(parts: impl PartStore + 'static) -> Router {
    app_router(AppState::new(parts), "does-not-exist")
}

/// Send one request; returns status and the body parsed as JSON (null when empty or not JSON).
pub async fn api_call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// POST a part and return its id as the string the API reports.
pub async fn create_part(router: &Router, body: Value) -> String {
    let (status, created) = api_call(router, "POST", "/api/parts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    created["part_id"].as_str().expect("part_id is a string").to_string()
}
