use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use std::collections::HashMap;
use crate::state::AppState;
use std::sync::Arc;

const MAX_TENANT_ID_LEN: usize = 64;

/// Tenant scope taken from the `{tenant_id}` path segment.
pub struct TenantId(pub String);

fn is_valid_tenant_id(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= MAX_TENANT_ID_LEN
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromRequestParts<Arc<AppState>> for TenantId {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        let tenant_id = params.get("tenant_id").ok_or(StatusCode::BAD_REQUEST)?;

        if !is_valid_tenant_id(tenant_id) {
            return Err(StatusCode::BAD_REQUEST);
        }

        tracing::Span::current().record("tenant_id", tenant_id.as_str());
        Ok(TenantId(tenant_id.clone()))
    }
}
