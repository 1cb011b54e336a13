// web_app/server_fns.rs - Leptos server function declarations
//
// These are the server function declarations that are accessible from both
// client (WASM) and server (native Rust). The #[server] macro automatically
// generates:
// - On server: The actual function implementation
// - On client: A stub that makes HTTP POST requests to the server
//
// IMPORTANT: This file must be compiled for BOTH ssr and hydrate features!

use leptos::prelude::*;
use crate::web_app::model::*;
use crate::web_app::state::FetchError;

#[cfg(feature = "ssr")]
async fn pool() -> Result<sqlx::PgPool, ServerFnError> {
    use actix_web::{web::Data, HttpRequest};
    use sqlx::PgPool;
    use leptos_actix::extract;
    use crate::web_app::api::db;

    // First try to get from context (for testing or if manually set)
    if let Some(pool) = use_context::<PgPool>() {
        return Ok(pool);
    }

    if let Some(pool) = db::get_db() {
        return Ok(pool);
    }

    match extract::<HttpRequest>().await {
        Ok(req) => {
            if let Some(pool_data) = req.app_data::<Data<PgPool>>() {
                return Ok(pool_data.as_ref().clone());
            }
        }
        Err(e) => {
            tracing::error!("Failed to extract HttpRequest: {}", e);
        }
    }

    Err(ServerFnError::new("Database pool not available"))
}

impl From<ServerFnError> for FetchError {
    fn from(err: ServerFnError) -> Self {
        match err {
            ServerFnError::Request(msg) | ServerFnError::Response(msg) => FetchError::Transport(msg),
            other => FetchError::Server(other.to_string()),
        }
    }
}

/// Role lookup outcome with a missing role folded into `NotFound`
pub fn found_role(
    id_or_name: &str,
    lookup: Result<Option<RoleGroup>, ServerFnError>,
) -> Result<RoleGroup, FetchError> {
    lookup?.ok_or_else(|| FetchError::NotFound(id_or_name.to_string()))
}

/// Look up a role by id or name; `None` when it does not exist
#[server(GetRole, "/api")]
pub async fn get_role(id_or_name: String) -> Result<Option<RoleGroup>, ServerFnError> {
    use crate::web_app::api::queries;

    let pool = pool().await?;
    let role = queries::find_role(&pool, &id_or_name).await.map_err(|e| {
        tracing::error!("Role lookup failed: {}", e);
        ServerFnError::new(format!("Role lookup failed: {}", e))
    })?;

    if role.is_none() {
        tracing::info!("Role not found: '{}'", id_or_name);
    }
    Ok(role)
}

/// One page of the role list
#[server(ListRoles, "/api")]
pub async fn list_roles(query: RoleListQuery) -> Result<ResultPage<RoleGroup>, ServerFnError> {
    use crate::web_app::api::queries;

    tracing::info!("Role list request: {:?}", query);
    let pool = pool().await?;

    let results = queries::list_roles(&pool, &query).await;
    match &results {
        Ok(page) => tracing::info!("Role list: {} of {} roles", page.results.len(), page.total),
        Err(e) => tracing::error!("Role list failed: {}", e),
    }
    results.map_err(|e| ServerFnError::new(format!("Role list failed: {}", e)))
}

/// Role names for the role list's search suggestions
#[server(SuggestRoles, "/api")]
pub async fn suggest_roles(query: SuggestionQuery) -> Result<ResultPage<RoleGroup>, ServerFnError> {
    use crate::web_app::api::queries;

    let pool = pool().await?;
    queries::list_roles(&pool, &RoleListQuery::from(query))
        .await
        .map_err(|e| ServerFnError::new(format!("Role suggestions failed: {}", e)))
}

/// One page of a role's membership audit
#[server(ListRoleAudits, "/api")]
pub async fn list_role_audits(query: RoleAuditQuery) -> Result<ResultPage<RoleMembership>, ServerFnError> {
    use crate::web_app::api::queries;

    tracing::info!("Role audit request: {:?}", query);
    let pool = pool().await?;

    let results = queries::list_role_audits(&pool, &query).await;
    match &results {
        Ok(page) => tracing::info!("Role audit: {} of {} memberships", page.results.len(), page.total),
        Err(e) => tracing::error!("Role audit failed: {}", e),
    }
    results.map_err(|e| ServerFnError::new(format!("Role audit failed: {}", e)))
}

/// Group names for the audit page's search suggestions
#[server(SuggestGroups, "/api")]
pub async fn suggest_groups(query: SuggestionQuery) -> Result<ResultPage<Group>, ServerFnError> {
    use crate::web_app::api::queries;

    let pool = pool().await?;
    queries::list_groups(&pool, &query)
        .await
        .map_err(|e| ServerFnError::new(format!("Group suggestions failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_transport_failures_are_distinct() {
        let err = FetchError::from(ServerFnError::Request("connection refused".to_string()));
        assert_eq!(err, FetchError::Transport("connection refused".to_string()));

        let err = FetchError::from(ServerFnError::Response("bad gateway".to_string()));
        assert_eq!(err, FetchError::Transport("bad gateway".to_string()));

        let err = FetchError::from(ServerFnError::new("Role lookup failed"));
        assert!(matches!(err, FetchError::Server(_)));
    }

    #[test]
    fn test_found_role() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let role = RoleGroup {
            id: "rg_1".to_string(),
            name: "Engineering".to_string(),
            description: None,
            created_at: created,
            updated_at: created,
            deleted_at: None,
        };

        assert_eq!(found_role("rg_1", Ok(Some(role.clone()))), Ok(role));
        assert_eq!(
            found_role("ghost", Ok(None)),
            Err(FetchError::NotFound("ghost".to_string()))
        );
        assert!(matches!(
            found_role("rg_1", Err(ServerFnError::Request("offline".to_string()))),
            Err(FetchError::Transport(_))
        ));
    }
}
