//! HTTP implementation of the store traits.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::config::ApiConfig;
use crate::api::store::{CollectionStore, Resource, StoreError, StoreResult, TournamentStore};
use crate::ids::{EntityId, EntityKind};
use crate::reconcile::Record;
use crate::tournament::Tournament;

/// A JSON client for the per-entity CRUD endpoints.
///
/// One generic implementation covers every collection: the [`Resource`]
/// constants supply the route segment and the payload keys, and every id
/// is validated before it is interpolated into a URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, parts: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for part in parts {
            url.push('/');
            url.push_str(part);
        }
        url
    }

    /// The id kind a scope segment must carry.
    fn scope_kind(scope: &str) -> Option<EntityKind> {
        match scope {
            "tmnt" => Some(EntityKind::Tournament),
            "event" => Some(EntityKind::Event),
            "div" => Some(EntityKind::Division),
            "squad" => Some(EntityKind::Squad),
            _ => None,
        }
    }

    fn check_scope(scope: &str, scope_id: &EntityId) -> StoreResult<()> {
        match Self::scope_kind(scope) {
            Some(kind) if scope_id.has_kind(kind) => Ok(()),
            _ => Err(StoreError::InvalidId(scope_id.to_string())),
        }
    }

    fn check_id(id: &EntityId, kind: EntityKind) -> StoreResult<()> {
        if id.has_kind(kind) {
            Ok(())
        } else {
            Err(StoreError::InvalidId(id.to_string()))
        }
    }

    async fn read_body(resp: reqwest::Response, route: &'static str) -> StoreResult<Value> {
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Rejected {
                route,
                status: status.as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    fn unwrap_key<T: DeserializeOwned>(
        body: Value,
        route: &'static str,
        key: &'static str,
    ) -> StoreResult<T> {
        let inner = body
            .get(key)
            .cloned()
            .ok_or(StoreError::MalformedResponse { route, key })?;
        Ok(serde_json::from_value(inner)?)
    }
}

#[async_trait]
impl<T> CollectionStore<T> for ApiClient
where
    T: Record + Resource + Serialize + DeserializeOwned + Send + Sync,
{
    async fn fetch_by_scope(&self, scope: &str, scope_id: &EntityId) -> StoreResult<Vec<T>> {
        Self::check_scope(scope, scope_id)?;
        let url = self.url(&[T::ROUTE, scope, scope_id.as_str()]);
        log::debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let body = Self::read_body(resp, T::ROUTE).await?;
        Self::unwrap_key(body, T::ROUTE, T::MANY)
    }

    async fn insert(&self, item: &T) -> StoreResult<T> {
        let url = self.url(&[T::ROUTE]);
        log::debug!("POST {url}");
        let resp = self.http.post(&url).json(item).send().await?;
        let body = Self::read_body(resp, T::ROUTE).await?;
        Self::unwrap_key(body, T::ROUTE, T::ONE)
    }

    async fn insert_many(&self, items: &[T]) -> StoreResult<usize> {
        let url = self.url(&[T::ROUTE, "many"]);
        log::debug!("POST {url} ({} records)", items.len());
        let resp = self.http.post(&url).json(items).send().await?;
        let body = Self::read_body(resp, T::ROUTE).await?;
        Self::unwrap_key(body, T::ROUTE, "count")
    }

    async fn update(&self, item: &T) -> StoreResult<T> {
        Self::check_id(item.id(), T::KIND)?;
        let url = self.url(&[T::ROUTE, item.id().as_str()]);
        log::debug!("PUT {url}");
        let resp = self.http.put(&url).json(item).send().await?;
        let body = Self::read_body(resp, T::ROUTE).await?;
        Self::unwrap_key(body, T::ROUTE, T::ONE)
    }

    async fn delete(&self, id: &EntityId) -> StoreResult<()> {
        Self::check_id(id, T::KIND)?;
        let url = self.url(&[T::ROUTE, id.as_str()]);
        log::debug!("DELETE {url}");
        let resp = self.http.delete(&url).send().await?;
        Self::read_body(resp, T::ROUTE).await?;
        Ok(())
    }

    async fn delete_by_scope(&self, scope: &str, scope_id: &EntityId) -> StoreResult<usize> {
        Self::check_scope(scope, scope_id)?;
        let url = self.url(&[T::ROUTE, scope, scope_id.as_str()]);
        log::debug!("DELETE {url}");
        let resp = self.http.delete(&url).send().await?;
        let body = Self::read_body(resp, T::ROUTE).await?;
        Self::unwrap_key(body, T::ROUTE, "count")
    }
}

#[async_trait]
impl TournamentStore for ApiClient {
    async fn fetch_tournament(&self, id: &EntityId) -> StoreResult<Tournament> {
        Self::check_id(id, Tournament::KIND)?;
        let url = self.url(&[Tournament::ROUTE, id.as_str()]);
        log::debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let body = Self::read_body(resp, Tournament::ROUTE).await?;
        Self::unwrap_key(body, Tournament::ROUTE, Tournament::ONE)
    }

    async fn update_tournament(&self, tournament: &Tournament) -> StoreResult<Tournament> {
        Self::check_id(&tournament.id, Tournament::KIND)?;
        let url = self.url(&[Tournament::ROUTE, tournament.id.as_str()]);
        log::debug!("PUT {url}");
        let resp = self.http.put(&url).json(tournament).send().await?;
        let body = Self::read_body(resp, Tournament::ROUTE).await?;
        Self::unwrap_key(body, Tournament::ROUTE, Tournament::ONE)
    }
}
