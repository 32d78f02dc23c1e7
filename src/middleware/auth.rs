use crate::core::AppError;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Header carrying the tenant's API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Paths reachable without an API key
const PUBLIC_PATHS: [&str; 3] = ["/", "/health", "/ready"];

/// Tenant resolved from the request's API key
///
/// Inserted into request extensions; handlers take it as
/// `web::ReqData<AuthenticatedTenant>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedTenant {
    pub tenant_id: String,
    pub api_key_id: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRecord {
    pub id: String,
    pub tenant_id: String,
    pub is_active: bool,
}

/// Lookup of API keys by digest
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    async fn find_by_hash(&self, key_hash: &str) -> crate::core::Result<Option<ApiKeyRecord>>;
}

pub struct MySqlApiKeyStore {
    pool: MySqlPool,
}

impl MySqlApiKeyStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyStore for MySqlApiKeyStore {
    async fn find_by_hash(&self, key_hash: &str) -> crate::core::Result<Option<ApiKeyRecord>> {
        let record = sqlx::query_as::<_, ApiKeyRecord>(
            r#"
            SELECT id, tenant_id, is_active
            FROM api_keys
            WHERE key_hash = ?
            LIMIT 1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(ref record) = record {
            // Best effort; a failed timestamp update must not reject the request
            if let Err(e) = sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = ?")
                .bind(&record.id)
                .execute(&self.pool)
                .await
            {
                tracing::warn!(api_key_id = %record.id, "Failed to update last_used_at: {}", e);
            }
        }

        Ok(record)
    }
}

/// SHA-256 hex digest under which API keys are stored
pub fn hash_api_key(api_key: &str) -> String {
    hex::encode(Sha256::digest(api_key.as_bytes()))
}

/// Resolve the tenant owning `api_key`
pub async fn authenticate(store: &dyn ApiKeyStore, api_key: &str) -> crate::core::Result<AuthenticatedTenant> {
    let record = store
        .find_by_hash(&hash_api_key(api_key))
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid API key"))?;

    if !record.is_active {
        return Err(AppError::unauthorized("API key is inactive"));
    }

    Ok(AuthenticatedTenant {
        tenant_id: record.tenant_id,
        api_key_id: record.id,
    })
}

/// API Key authentication middleware
pub struct ApiKeyAuth {
    store: Arc<dyn ApiKeyStore>,
}

impl ApiKeyAuth {
    pub fn new(store: Arc<dyn ApiKeyStore>) -> Self {
        Self { store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            store: self.store.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    store: Arc<dyn ApiKeyStore>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let store = self.store.clone();

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.path()) {
                return svc.call(req).await;
            }

            let api_key = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| Error::from(AppError::unauthorized("Missing X-API-Key header")))?;

            let tenant = authenticate(store.as_ref(), &api_key)
                .await
                .map_err(Error::from)?;

            tracing::debug!(tenant_id = %tenant.tenant_id, "Request authenticated");
            req.extensions_mut().insert(tenant);

            svc.call(req).await
        })
    }
}
